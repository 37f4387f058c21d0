use anyhow::{ensure, Result};
use clap::Parser;
use fixpt_math::Fixed16_16;
use fixpt_tools::init_tracing;
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::hint::black_box;
use std::time::Instant;
use tracing::info;

/// Times Q16.16 arithmetic and math functions against the same operations
/// on f64.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Operations per measurement
    #[arg(long, default_value_t = 1_000_000)]
    iterations: usize,

    /// Seed for the random operands
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

type P = Fixed16_16;

struct Operands {
    fixed: Vec<(P, P)>,
    float: Vec<(f64, f64)>,
}

impl Operands {
    /// Pairs with `a` in `[lo, hi)` and a strictly positive `b` below 100.
    fn generate(rng: &mut StdRng, count: usize, lo: f64, hi: f64) -> Self {
        let float: Vec<(f64, f64)> = (0..count)
            .map(|_| (rng.gen_range(lo..hi), rng.gen_range(0.5..100.0)))
            .collect();
        let fixed = float
            .iter()
            .map(|&(a, b)| (P::from_f64(a), P::from_f64(b)))
            .collect();
        Self { fixed, float }
    }
}

/// Nanoseconds per call of `op` over every operand pair.
fn time<T: Copy>(pairs: &[(T, T)], op: impl Fn(T, T) -> T) -> f64 {
    let start = Instant::now();
    for &(a, b) in pairs {
        black_box(op(black_box(a), black_box(b)));
    }
    start.elapsed().as_nanos() as f64 / pairs.len() as f64
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();
    ensure!(args.iterations > 0, "--iterations must be positive");

    let mut rng = StdRng::seed_from_u64(args.seed);
    info!(iterations = args.iterations, seed = args.seed, "generating operands");
    let wide = Operands::generate(&mut rng, args.iterations, -1000.0, 1000.0);
    let unit = Operands::generate(&mut rng, args.iterations, -3.0, 3.0);
    let positive = Operands::generate(&mut rng, args.iterations, 0.01, 1000.0);

    let rows: Vec<(&str, f64, f64)> = vec![
        ("add", time(&wide.fixed, |a, b| a + b), time(&wide.float, |a, b| a + b)),
        ("mul", time(&unit.fixed, |a, b| a * b), time(&unit.float, |a, b| a * b)),
        ("div", time(&wide.fixed, |a, b| a / b), time(&wide.float, |a, b| a / b)),
        ("sqrt", time(&positive.fixed, |a, _| a.sqrt()), time(&positive.float, |a, _| a.sqrt())),
        ("cbrt", time(&wide.fixed, |a, _| a.cbrt()), time(&wide.float, |a, _| a.cbrt())),
        ("exp", time(&unit.fixed, |a, _| a.exp()), time(&unit.float, |a, _| a.exp())),
        ("log2", time(&positive.fixed, |a, _| a.log2()), time(&positive.float, |a, _| a.log2())),
        ("sin", time(&wide.fixed, |a, _| a.sin()), time(&wide.float, |a, _| a.sin())),
        ("atan", time(&wide.fixed, |a, _| a.atan()), time(&wide.float, |a, _| a.atan())),
        ("atan2", time(&wide.fixed, |a, b| a.atan2(b)), time(&wide.float, |a, b| a.atan2(b))),
    ];

    println!("{:<8} {:>12} {:>12} {:>8}", "op", "Q16.16 ns", "f64 ns", "ratio");
    for (name, fixed, float) in rows {
        println!("{name:<8} {fixed:>12.2} {float:>12.2} {:>8.2}", fixed / float);
    }
    Ok(())
}
