//! Trigonometric functions.
//!
//! Sine is a fifth-order curve fit over a quarter turn, extended by symmetry
//! (worst-case relative error about 0.07% over `[-pi, pi]`). Arc tangent is a
//! third-degree odd polynomial on `[0, 1]`; the other inverse functions are
//! expressed through it.

use crate::error::{fatal, FixedPointError, Result};
use crate::fixed::Fixed;
use crate::int::{Int, Signed, Storage};

impl<B: Storage<I> + Signed, I: Int, const F: u32, const R: bool> Fixed<B, I, F, R> {
    /// Sine of an angle in radians.
    pub fn sin(self) -> Self {
        // Map one turn onto [0, 4)
        let mut x = self.fmod(Self::two_pi()) / Self::half_pi();
        if x.raw().is_negative() {
            x += Self::from_int(4i32);
        }

        let two = Self::from_int(2i32);
        let mut sign = B::ONE;
        if x > two {
            sign = -B::ONE;
            x -= two;
        }
        if x > Self::one() {
            x = two - x;
        }

        let x2 = x * x;
        let pi = Self::pi();
        let three = B::from_i128(3);
        let five = B::from_i128(5);
        x * sign * (pi - x2 * (Self::two_pi() - five - x2 * (pi - three))) / B::TWO
    }

    /// Cosine of an angle in radians.
    #[inline]
    pub fn cos(self) -> Self {
        // Reduce first; half_pi + self wraps near the top of the range
        (self.fmod(Self::two_pi()) + Self::half_pi()).sin()
    }

    /// Tangent of an angle in radians.
    ///
    /// # Panics
    ///
    /// Panics when the cosine is within one raw unit of zero, where the
    /// tangent is not representable. See [`try_tan`](Self::try_tan).
    #[track_caller]
    pub fn tan(self) -> Self {
        fatal(self.try_tan())
    }

    pub fn try_tan(self) -> Result<Self> {
        let cos = self.cos();
        if cos.raw().magnitude() <= B::ONE {
            return Err(FixedPointError::domain("tan", "cos(x) != 0"));
        }
        Ok(self.sin() / cos)
    }

    /// Arc tangent of `x` in `[-1, 1]`.
    fn atan_sanitized(self) -> Self {
        let a = Self::from_fixed_point::<63>(716_203_666_280_654_660);
        let b = Self::from_fixed_point::<63>(-2_651_115_102_768_076_601);
        let c = Self::from_fixed_point::<63>(9_178_930_894_564_541_004);

        let xx = self * self;
        ((a * xx + b) * xx + c) * self
    }

    /// `atan(y / x)` for `x != 0`, never forming a ratio above one. For tiny
    /// `x` this avoids overflowing the quotient.
    ///
    /// Magnitudes are compared in the intermediate type and nothing is
    /// negated, so `MIN` is handled like any other value.
    fn atan_div(y: Self, x: Self) -> Self {
        if y.wide().magnitude() > x.wide().magnitude() {
            let inverse = (x / y).atan_sanitized();
            if y.raw().is_negative() == x.raw().is_negative() {
                Self::half_pi() - inverse
            } else {
                -Self::half_pi() - inverse
            }
        } else {
            (y / x).atan_sanitized()
        }
    }

    /// Arc tangent, in `[-pi/2, pi/2]`.
    pub fn atan(self) -> Self {
        Self::atan_div(self, Self::one())
    }

    /// Arc sine, in `[-pi/2, pi/2]`.
    ///
    /// # Panics
    ///
    /// Panics unless `-1 <= self <= 1`.
    #[track_caller]
    pub fn asin(self) -> Self {
        fatal(self.try_asin())
    }

    pub fn try_asin(self) -> Result<Self> {
        if self < -Self::one() || self > Self::one() {
            return Err(FixedPointError::domain("asin", "-1 <= x <= 1"));
        }
        let yy = Self::one() - self * self;
        if yy.raw() == B::ZERO {
            return Ok(Self::half_pi().copysign(self));
        }
        Ok(Self::atan_div(self, yy.sqrt()))
    }

    /// Arc cosine, in `[0, pi]`.
    ///
    /// # Panics
    ///
    /// Panics unless `-1 <= self <= 1`.
    #[track_caller]
    pub fn acos(self) -> Self {
        fatal(self.try_acos())
    }

    pub fn try_acos(self) -> Result<Self> {
        if self < -Self::one() || self > Self::one() {
            return Err(FixedPointError::domain("acos", "-1 <= x <= 1"));
        }
        if self == -Self::one() {
            return Ok(Self::pi());
        }
        let yy = Self::one() - self * self;
        Ok(Self::atan_div(yy.sqrt(), Self::one() + self) * B::TWO)
    }

    /// Four-quadrant arc tangent of `self / x`, in `[-pi, pi]`.
    ///
    /// # Panics
    ///
    /// Panics if both `self` and `x` are zero.
    #[track_caller]
    pub fn atan2(self, x: Self) -> Self {
        fatal(self.try_atan2(x))
    }

    pub fn try_atan2(self, x: Self) -> Result<Self> {
        let y = self;
        if x.raw() == B::ZERO {
            return match y.raw().cmp(&B::ZERO) {
                core::cmp::Ordering::Greater => Ok(Self::half_pi()),
                core::cmp::Ordering::Less => Ok(-Self::half_pi()),
                core::cmp::Ordering::Equal => {
                    Err(FixedPointError::domain("atan2", "x != 0 or y != 0"))
                }
            };
        }

        let angle = Self::atan_div(y, x);
        if x.raw().is_negative() {
            if y.raw().is_negative() {
                Ok(angle - Self::pi())
            } else {
                Ok(angle + Self::pi())
            }
        } else {
            Ok(angle)
        }
    }
}
