//! # fixpt-math
//!
//! Deterministic fixed-point arithmetic with integer-only math functions.
//!
//! [`Fixed`] stores a number as an integer scaled by `2^F`, generic over the
//! storage integer, a wider intermediate integer, the number of fraction bits
//! and whether the last bit is rounded. Because every operation (including
//! `sqrt`, `exp`, `ln`, `sin` and `atan2`) is evaluated with integer
//! arithmetic, results are bit-identical across platforms and compilers.
//!
//! ```
//! use fixpt_math::Fixed16_16;
//!
//! let x = Fixed16_16::from_f64(2.0);
//! let y = x.sqrt() * Fixed16_16::pi();
//! assert_eq!(y.to_string().parse::<Fixed16_16>(), Ok(y));
//! ```
//!
//! Addition, subtraction and integer conversion wrap on overflow. Operations
//! with preconditions (division by zero, roots and logarithms of
//! out-of-domain inputs, poles of `tan`) panic when violated; each has a
//! `try_*` twin returning [`Result`].
//!
//! Only dependency is `thiserror` (plus optional `serde`).

pub mod classify;
pub mod error;
pub mod fixed;
pub mod fmt;
pub mod int;
pub mod nearest;
pub mod ops;
pub mod power;
pub mod trig;

pub use error::{FixedPointError, Result};
pub use fixed::{Fixed, Fixed16_16, Fixed20_12, Fixed24_8, Fixed8_24};
pub use int::{highest_bit, Int, Signed, Storage};
