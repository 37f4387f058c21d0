//! Shared pieces of the `fixpt-accuracy` and `fixpt-bench` binaries.

use clap::ValueEnum;
use fixpt_math::{Fixed, Int, Result, Signed, Storage};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs a stdout `tracing` subscriber, filtered by `RUST_LOG` (default
/// `info`).
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .init();
}

/// Relative error of `value` against `reference`, or the absolute error when
/// the reference is too close to zero for a ratio to be meaningful.
pub fn relative_error(value: f64, reference: f64) -> f64 {
    let diff = (value - reference).abs();
    if reference.abs() < 1e-10 {
        diff
    } else {
        (diff / reference).abs()
    }
}

/// Functions the accuracy sweep knows how to evaluate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, ValueEnum)]
pub enum Function {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Atan2,
    Sqrt,
    Cbrt,
    Exp,
    Log2,
}

/// One sample of a sweep: the value plotted on the x axis and the arguments
/// passed to the function.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sample {
    pub x: f64,
    pub args: [f64; 2],
}

impl Sample {
    fn unary(x: f64) -> Self {
        Self { x, args: [x, 0.0] }
    }
}

impl Function {
    pub fn name(self) -> &'static str {
        match self {
            Function::Sin => "sin",
            Function::Cos => "cos",
            Function::Tan => "tan",
            Function::Asin => "asin",
            Function::Acos => "acos",
            Function::Atan => "atan",
            Function::Atan2 => "atan2",
            Function::Sqrt => "sqrt",
            Function::Cbrt => "cbrt",
            Function::Exp => "exp",
            Function::Log2 => "log2",
        }
    }

    /// Inputs for the sweep, chosen so that every format can represent them
    /// and every result.
    pub fn samples(self) -> Vec<Sample> {
        let degrees = (-179..=180).map(|angle| (angle, f64::from(angle).to_radians()));
        match self {
            Function::Sin | Function::Cos => degrees.map(|(_, x)| Sample::unary(x)).collect(),
            Function::Tan => degrees
                .filter(|(angle, _)| (angle + 90) % 180 != 0)
                .map(|(_, x)| Sample::unary(x))
                .collect(),
            Function::Atan2 => degrees
                .map(|(_, x)| Sample {
                    x,
                    args: [x.sin(), x.cos()],
                })
                .collect(),
            Function::Asin | Function::Acos => (-100..=100)
                .map(|v| Sample::unary(f64::from(v) / 100.0))
                .collect(),
            Function::Atan => (-5000..=5000)
                .step_by(5)
                .map(|v| Sample::unary(f64::from(v) / 1000.0))
                .collect(),
            Function::Sqrt => (0..1000)
                .map(|v| Sample::unary(f64::from(v) / 10.0))
                .collect(),
            Function::Cbrt => (-200..=200)
                .map(|v| Sample::unary(f64::from(v) / 2.0))
                .collect(),
            Function::Exp => (-400..=400)
                .map(|v| Sample::unary(f64::from(v) / 100.0))
                .collect(),
            Function::Log2 => (1..=1000)
                .map(|v| Sample::unary(f64::from(v) / 10.0))
                .collect(),
        }
    }

    /// The `f64` reference result.
    pub fn reference(self, [a, b]: [f64; 2]) -> f64 {
        match self {
            Function::Sin => a.sin(),
            Function::Cos => a.cos(),
            Function::Tan => a.tan(),
            Function::Asin => a.asin(),
            Function::Acos => a.acos(),
            Function::Atan => a.atan(),
            Function::Atan2 => a.atan2(b),
            Function::Sqrt => a.sqrt(),
            Function::Cbrt => a.cbrt(),
            Function::Exp => a.exp(),
            Function::Log2 => a.log2(),
        }
    }

    /// The fixed-point result, converted back to `f64`. Domain errors (for
    /// example a tangent too close to its pole) are returned rather than
    /// panicking.
    pub fn evaluate<B, I, const F: u32, const R: bool>(self, [a, b]: [f64; 2]) -> Result<f64>
    where
        B: Storage<I> + Signed,
        I: Int,
    {
        let (a, b) = (
            Fixed::<B, I, F, R>::from_f64(a),
            Fixed::<B, I, F, R>::from_f64(b),
        );
        let result = match self {
            Function::Sin => a.sin(),
            Function::Cos => a.cos(),
            Function::Tan => a.try_tan()?,
            Function::Asin => a.try_asin()?,
            Function::Acos => a.try_acos()?,
            Function::Atan => a.atan(),
            Function::Atan2 => a.try_atan2(b)?,
            Function::Sqrt => a.try_sqrt()?,
            Function::Cbrt => a.cbrt(),
            Function::Exp => a.exp(),
            Function::Log2 => a.try_log2()?,
        };
        Ok(result.to_f64())
    }
}
