//! Floating-point style classification.
//!
//! A fixed-point value is never infinite or NaN, so most predicates are
//! constant. They exist so code written against `f64` ports unchanged.

use core::num::FpCategory;

use crate::fixed::Fixed;
use crate::int::{Int, Storage};

impl<B: Storage<I>, I: Int, const F: u32, const R: bool> Fixed<B, I, F, R> {
    /// [`FpCategory::Zero`] or [`FpCategory::Normal`]; nothing else can occur.
    #[inline]
    pub fn classify(self) -> FpCategory {
        if self.raw() == B::ZERO {
            FpCategory::Zero
        } else {
            FpCategory::Normal
        }
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        true
    }

    #[inline]
    pub fn is_infinite(self) -> bool {
        false
    }

    #[inline]
    pub fn is_nan(self) -> bool {
        false
    }

    #[inline]
    pub fn is_normal(self) -> bool {
        self.raw() != B::ZERO
    }

    /// True for values below zero. There is no negative zero.
    #[inline]
    pub fn is_sign_negative(self) -> bool {
        self.raw().is_negative()
    }

    #[inline]
    pub fn is_sign_positive(self) -> bool {
        !self.is_sign_negative()
    }

    #[inline]
    pub fn is_greater(self, other: Self) -> bool {
        self > other
    }

    #[inline]
    pub fn is_greater_equal(self, other: Self) -> bool {
        self >= other
    }

    #[inline]
    pub fn is_less(self, other: Self) -> bool {
        self < other
    }

    #[inline]
    pub fn is_less_equal(self, other: Self) -> bool {
        self <= other
    }

    #[inline]
    pub fn is_less_greater(self, other: Self) -> bool {
        self != other
    }

    /// Always false: every pair of values is ordered.
    #[inline]
    pub fn is_unordered(self, _other: Self) -> bool {
        false
    }
}
