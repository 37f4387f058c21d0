//! Fixed-point error types

use thiserror::Error;

use crate::int::Int;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FixedPointError {
    #[error("Division by zero")]
    DivisionByZero,

    #[error("{function}: argument out of domain (requires {requirement})")]
    Domain {
        function: &'static str,
        requirement: &'static str,
    },

    #[error("Overflow in {operation}: result exceeds the fixed-point range")]
    Overflow { operation: &'static str },

    #[error("Cannot parse a fixed-point number from an empty string")]
    EmptyLiteral,

    #[error("Invalid fixed-point literal: {0:?}")]
    InvalidLiteral(String),
}

pub type Result<T> = std::result::Result<T, FixedPointError>;

impl FixedPointError {
    pub(crate) const fn domain(function: &'static str, requirement: &'static str) -> Self {
        Self::Domain {
            function,
            requirement,
        }
    }
}

pub(crate) fn check_divisor<T: Int>(divisor: T) -> Result<()> {
    if divisor == T::ZERO {
        Err(FixedPointError::DivisionByZero)
    } else {
        Ok(())
    }
}

/// Unwraps a precondition check, turning a violation into a panic that
/// points at the caller of the panicking API.
#[track_caller]
pub(crate) fn fatal<T>(result: Result<T>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => panic!("{err}"),
    }
}
