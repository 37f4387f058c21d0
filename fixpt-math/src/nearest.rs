//! Rounding to integers, remainders and sign manipulation.

use crate::error::{check_divisor, fatal, Result};
use crate::fixed::Fixed;
use crate::int::{Int, Storage};

impl<B: Storage<I>, I: Int, const F: u32, const R: bool> Fixed<B, I, F, R> {
    /// Rounds toward positive infinity.
    pub fn ceil(self) -> Self {
        let frac = Self::frac();
        let mut value = self.wide();
        if value > I::ZERO {
            value = value + (frac - I::ONE);
        }
        Self::from_wide(value / frac * frac)
    }

    /// Rounds toward negative infinity.
    pub fn floor(self) -> Self {
        let frac = Self::frac();
        let mut value = self.wide();
        if value < I::ZERO {
            value = value - (frac - I::ONE);
        }
        Self::from_wide(value / frac * frac)
    }

    /// Rounds toward zero.
    pub fn trunc(self) -> Self {
        let frac = Self::frac();
        Self::from_wide(self.wide() / frac * frac)
    }

    /// Rounds to nearest, ties away from zero.
    pub fn round(self) -> Self {
        let frac = Self::frac();
        let halves = self.wide() / (frac / I::TWO);
        Self::from_wide((halves / I::TWO + halves % I::TWO) * frac)
    }

    /// Rounds to nearest, ties to even.
    pub fn nearbyint(self) -> Self {
        let frac = Self::frac();
        let value = self.wide();
        let is_half = (value % frac).magnitude() == frac / I::TWO;
        let halves = value / (frac / I::TWO);
        let mut rounded = halves / I::TWO + halves % I::TWO;
        if is_half {
            rounded = rounded - rounded % I::TWO;
        }
        Self::from_wide(rounded * frac)
    }

    /// Same as [`nearbyint`](Self::nearbyint); there is no rounding mode to
    /// consult.
    #[inline]
    pub fn rint(self) -> Self {
        self.nearbyint()
    }

    /// Absolute value. Wraps for the most negative value.
    #[inline]
    pub fn abs(self) -> Self {
        Self::from_raw(self.raw().magnitude())
    }

    /// Magnitude of `self` with the sign of `sign`.
    pub fn copysign(self, sign: Self) -> Self {
        let magnitude = self.raw().magnitude();
        if sign.raw().is_negative() {
            Self::from_raw(magnitude.wrapping_neg())
        } else {
            Self::from_raw(magnitude)
        }
    }

    /// The next representable value after `self` in the direction of `to`.
    pub fn next_after(self, to: Self) -> Self {
        if self == to {
            to
        } else if to > self {
            Self::from_raw(self.raw().wrapping_add(B::ONE))
        } else {
            Self::from_raw(self.raw().wrapping_sub(B::ONE))
        }
    }

    /// Splits into fractional and integral parts, both carrying the sign of
    /// `self`.
    pub fn modf(self) -> (Self, Self) {
        let frac = Self::frac();
        let value = self.wide();
        (
            Self::from_wide(value % frac),
            Self::from_wide(value / frac * frac),
        )
    }

    /// Remainder of truncating division; the result has the sign of `self`.
    ///
    /// # Panics
    ///
    /// Panics if `divisor` is zero. See [`try_fmod`](Self::try_fmod).
    #[track_caller]
    pub fn fmod(self, divisor: Self) -> Self {
        fatal(self.try_fmod(divisor))
    }

    pub fn try_fmod(self, divisor: Self) -> Result<Self> {
        check_divisor(divisor.raw())?;
        Ok(Self::from_wide(self.wide() % divisor.wide()))
    }

    /// IEEE remainder `self - n * divisor`, where `n` is `self / divisor`
    /// rounded to nearest even.
    ///
    /// # Panics
    ///
    /// Panics if `divisor` is zero.
    #[track_caller]
    pub fn remainder(self, divisor: Self) -> Self {
        fatal(self.try_remainder(divisor))
    }

    pub fn try_remainder(self, divisor: Self) -> Result<Self> {
        self.try_remquo(divisor).map(|(remainder, _)| remainder)
    }

    /// The IEEE remainder together with the rounded quotient it was
    /// computed from.
    ///
    /// # Panics
    ///
    /// Panics if `divisor` is zero.
    #[track_caller]
    pub fn remquo(self, divisor: Self) -> (Self, i32) {
        fatal(self.try_remquo(divisor))
    }

    pub fn try_remquo(self, divisor: Self) -> Result<(Self, i32)> {
        check_divisor(divisor.raw())?;
        let quotient = (self / divisor).nearbyint();
        Ok((self - quotient * divisor, quotient.to_int::<i32>()))
    }
}

#[cfg(test)]
mod tests {
    use crate::{Fixed20_12, Fixed24_8};

    type P = Fixed24_8;

    fn p(value: f64) -> P {
        P::from_f64(value)
    }

    fn n(value: i32) -> P {
        P::from_int(value)
    }

    #[test]
    fn test_round() {
        assert_eq!(n(2), p(2.3).round());
        assert_eq!(n(3), p(2.5).round());
        assert_eq!(n(3), p(2.7).round());
        assert_eq!(n(-2), p(-2.3).round());
        assert_eq!(n(-3), p(-2.5).round());
        assert_eq!(n(-3), p(-2.7).round());
        assert_eq!(n(0), n(0).round());
    }

    #[test]
    fn test_ceil() {
        assert_eq!(n(1), n(1).ceil());
        assert_eq!(n(-1), n(-1).ceil());
        assert_eq!(n(3), p(2.4).ceil());
        assert_eq!(n(-2), p(-2.4).ceil());
        assert_eq!(n(0), n(0).ceil());
    }

    #[test]
    fn test_floor() {
        assert_eq!(n(1), n(1).floor());
        assert_eq!(n(-1), n(-1).floor());
        assert_eq!(n(2), p(2.7).floor());
        assert_eq!(n(-3), p(-2.7).floor());
        assert_eq!(n(0), n(0).floor());
    }

    #[test]
    fn test_trunc() {
        assert_eq!(n(1), n(1).trunc());
        assert_eq!(n(-1), n(-1).trunc());
        assert_eq!(n(2), p(2.7).trunc());
        assert_eq!(n(-2), p(-2.9).trunc());
        assert_eq!(n(0), n(0).trunc());
    }

    #[test]
    fn test_nearbyint_ties_to_even() {
        for round in [P::nearbyint, P::rint] {
            assert_eq!(n(2), round(p(2.3)));
            assert_eq!(n(2), round(p(2.5)));
            assert_eq!(n(4), round(p(3.5)));
            assert_eq!(n(-2), round(p(-2.3)));
            assert_eq!(n(-2), round(p(-2.5)));
            assert_eq!(n(-4), round(p(-3.5)));
            assert_eq!(n(0), round(n(0)));
        }
    }

    #[test]
    fn test_abs() {
        assert_eq!(p(13.125), p(-13.125).abs());
        assert_eq!(p(13.125), p(13.125).abs());
        assert_eq!(n(1), n(-1).abs());
        assert_eq!(n(1), n(1).abs());
    }

    #[test]
    fn test_fmod() {
        assert_eq!(p(1.5), p(9.5).fmod(n(2)));
        assert_eq!(p(-1.5), p(-9.5).fmod(n(2)));
        assert_eq!(p(1.5), p(9.5).fmod(n(-2)));
        assert_eq!(p(-1.5), p(-9.5).fmod(n(-2)));
        assert_eq!(p(1.5), p(9.5) % n(2));
    }

    #[test]
    #[should_panic(expected = "Division by zero")]
    fn test_fmod_by_zero() {
        let _ = p(9.5).fmod(P::ZERO);
    }

    #[test]
    fn test_remainder() {
        // 9.5 / 2 = 4.75 rounds to 5
        assert_eq!(p(-0.5), p(9.5).remainder(n(2)));
        // 9 / 2 = 4.5 rounds to the even 4
        assert_eq!(n(1), n(9).remainder(n(2)));
        assert_eq!(n(-1), n(11).remainder(n(2)));
        assert_eq!(p(0.5), p(-9.5).remainder(n(2)));
    }

    #[test]
    fn test_remquo() {
        assert_eq!((p(-0.5), 5), p(9.5).remquo(n(2)));
        assert_eq!((p(0.5), -5), p(-9.5).remquo(n(2)));
        assert_eq!((p(0.5), 5), p(-9.5).remquo(n(-2)));
        assert!(p(1.0).try_remquo(P::ZERO).is_err());
    }

    #[test]
    fn test_copysign() {
        assert_eq!(p(-13.125), p(-13.125).copysign(p(-7.25)));
        assert_eq!(p(-13.125), p(13.125).copysign(p(-7.25)));
        assert_eq!(p(13.125), p(-13.125).copysign(p(7.25)));
        assert_eq!(p(13.125), p(13.125).copysign(p(7.25)));

        assert_eq!(n(-13), n(-13).copysign(n(-7)));
        assert_eq!(n(-13), n(13).copysign(n(-7)));
        assert_eq!(n(13), n(-13).copysign(n(7)));
        assert_eq!(n(13), n(13).copysign(n(7)));
    }

    #[test]
    fn test_next_after() {
        let x = Fixed20_12::from_int(1i32);
        assert_eq!(x.next_after(x), x);
        assert_eq!(x.next_after(Fixed20_12::from_int(2i32)).raw(), 4097);
        assert_eq!(x.next_after(Fixed20_12::ZERO).raw(), 4095);
    }

    #[test]
    fn test_modf() {
        assert_eq!((p(0.75), n(2)), p(2.75).modf());
        assert_eq!((p(-0.75), n(-2)), p(-2.75).modf());
        assert_eq!((P::ZERO, n(3)), n(3).modf());
    }
}
