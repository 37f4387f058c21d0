use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use fixpt_math::{Int, Signed, Storage};
use fixpt_tools::{init_tracing, relative_error, Function};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Sweeps the math functions over their domains and writes one CSV per
/// function comparing each fixed-point format against f64.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Directory the CSV files and summary.json are written to
    #[arg(long, default_value = "accuracy")]
    output_dir: PathBuf,

    /// Functions to evaluate (all when omitted)
    #[arg(long, value_enum, value_delimiter = ',')]
    functions: Vec<Function>,
}

const FORMATS: [&str; 4] = ["Q24.8", "Q20.12", "Q16.16", "Q8.24"];

#[derive(Serialize)]
struct Summary {
    samples: usize,
    /// Largest relative error per format
    max_error: BTreeMap<&'static str, f64>,
    /// Samples the format rejected as out of domain
    rejected: BTreeMap<&'static str, usize>,
}

fn evaluate_all(function: Function, args: [f64; 2]) -> [Option<f64>; 4] {
    fn one<B: Storage<I> + Signed, I: Int, const F: u32>(
        function: Function,
        args: [f64; 2],
    ) -> Option<f64> {
        function.evaluate::<B, I, F, true>(args).ok()
    }
    [
        one::<i32, i64, 8>(function, args),
        one::<i32, i64, 12>(function, args),
        one::<i32, i64, 16>(function, args),
        one::<i32, i64, 24>(function, args),
    ]
}

fn sweep(function: Function, dir: &Path) -> Result<Summary> {
    let path = dir.join(format!("{}.csv", function.name()));
    let file = File::create(&path).with_context(|| format!("creating {}", path.display()))?;
    let mut out = BufWriter::new(file);
    writeln!(out, "x,real,{}", FORMATS.join(","))?;

    let samples = function.samples();
    let mut summary = Summary {
        samples: samples.len(),
        max_error: FORMATS.iter().map(|&f| (f, 0.0)).collect(),
        rejected: FORMATS.iter().map(|&f| (f, 0)).collect(),
    };

    for sample in &samples {
        let real = function.reference(sample.args);
        write!(out, "{:.6},{:.6}", sample.x, real)?;
        for (format, value) in FORMATS.iter().zip(evaluate_all(function, sample.args)) {
            match value {
                Some(value) => {
                    write!(out, ",{value:.6}")?;
                    let err = relative_error(value, real);
                    let max = summary.max_error.entry(*format).or_insert(0.0);
                    *max = max.max(err);
                }
                None => {
                    write!(out, ",nan")?;
                    *summary.rejected.entry(*format).or_insert(0) += 1;
                }
            }
        }
        writeln!(out)?;
    }
    out.flush().with_context(|| format!("writing {}", path.display()))?;

    info!(
        function = function.name(),
        samples = summary.samples,
        path = %path.display(),
        "sweep written"
    );
    for (format, count) in summary.rejected.iter().filter(|(_, count)| **count > 0) {
        warn!(function = function.name(), format, count, "samples out of domain");
    }
    Ok(summary)
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let functions = if args.functions.is_empty() {
        Function::value_variants().to_vec()
    } else {
        args.functions.clone()
    };

    fs::create_dir_all(&args.output_dir)
        .with_context(|| format!("creating {}", args.output_dir.display()))?;

    let mut report = BTreeMap::new();
    for function in functions {
        report.insert(function.name(), sweep(function, &args.output_dir)?);
    }

    let summary_path = args.output_dir.join("summary.json");
    let json = serde_json::to_string_pretty(&report)?;
    fs::write(&summary_path, json)
        .with_context(|| format!("writing {}", summary_path.display()))?;

    print!("{:<8}", "function");
    for format in FORMATS {
        print!(" {format:>12}");
    }
    println!();
    for (name, summary) in &report {
        print!("{name:<8}");
        for format in FORMATS {
            print!(" {:>12.6}", summary.max_error[format]);
        }
        println!();
    }
    info!(path = %summary_path.display(), "summary written");
    Ok(())
}
