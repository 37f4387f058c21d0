//! Roots, powers, exponentials and logarithms.
//!
//! Everything here is evaluated with integer arithmetic only, so results are
//! bit-identical on every platform. Roots use digit-by-digit extraction,
//! exponentials and logarithms a fifth-degree minimax polynomial on a reduced
//! argument. The polynomial coefficients are stored as 60 to 63 bit fixed-point
//! patterns and rounded to `F` fraction bits when evaluated.

use crate::error::{check_divisor, fatal, FixedPointError, Result};
use crate::fixed::Fixed;
use crate::int::{highest_bit, Int, Signed, Storage};

impl<B: Storage<I>, I: Int, const F: u32, const R: bool> Fixed<B, I, F, R> {
    /// Square root, last bit rounded to nearest.
    ///
    /// # Panics
    ///
    /// Panics if `self` is negative. See [`try_sqrt`](Self::try_sqrt).
    #[track_caller]
    pub fn sqrt(self) -> Self {
        fatal(self.try_sqrt())
    }

    pub fn try_sqrt(self) -> Result<Self> {
        if self.raw().is_negative() {
            return Err(FixedPointError::domain("sqrt", "x >= 0"));
        }
        if self.raw() == B::ZERO {
            return Ok(self);
        }

        // Binary digit-by-digit root of raw * 2^F, starting from the greatest
        // power of four not above it.
        let mut num = self.wide() << F;
        let mut res = I::ZERO;
        let mut bit = I::ONE << ((highest_bit(self.raw()) + F) / 2 * 2);
        while bit != I::ZERO {
            let val = res + bit;
            res = res >> 1;
            if num >= val {
                num = num - val;
                res = res + bit;
            }
            bit = bit >> 2;
        }

        if num > res {
            res = res + I::ONE;
        }
        Ok(Self::from_wide(res))
    }

    /// `sqrt(x² + y²)`. The squares wrap if they exceed the range.
    ///
    /// # Panics
    ///
    /// Panics if both arguments are zero.
    #[track_caller]
    pub fn hypot(self, other: Self) -> Self {
        fatal(self.try_hypot(other))
    }

    pub fn try_hypot(self, other: Self) -> Result<Self> {
        if self.raw() == B::ZERO && other.raw() == B::ZERO {
            return Err(FixedPointError::domain("hypot", "x != 0 or y != 0"));
        }
        (self * self + other * other).try_sqrt()
    }
}

impl<B: Storage<I> + Signed, I: Int, const F: u32, const R: bool> Fixed<B, I, F, R> {
    /// Cube root, defined for every input.
    pub fn cbrt(self) -> Self {
        if self.raw() == B::ZERO {
            return self;
        }

        // Cube root of |raw| * 2^(2F), three bits per step. The magnitude is
        // taken in the intermediate type so that MIN has one. The input is
        // shifted by F twice with a digit pass in between so the remainder
        // never outgrows the intermediate type.
        let three = I::from_i128(3);
        let mut num = self.wide().magnitude();
        let mut ofs = ((highest_bit(num) + 2 * F) / 3 * 3) as i32;
        let mut res = I::ZERO;

        let mut digits = |num: &mut I, ofs: &mut i32| {
            while *ofs >= 0 {
                res = res + res;
                let val = (three.wrapping_mul(res).wrapping_mul(res + I::ONE) + I::ONE) << *ofs as u32;
                if *num >= val {
                    *num = *num - val;
                    res = res + I::ONE;
                }
                *ofs -= 3;
            }
        };

        num = num << F;
        ofs -= F as i32;
        digits(&mut num, &mut ofs);

        num = num << F;
        ofs += F as i32;
        digits(&mut num, &mut ofs);

        if self.raw().is_negative() {
            res = res.wrapping_neg();
        }
        Self::from_wide(res)
    }

    /// `e^x`. Results below the smallest step round to zero.
    pub fn exp(self) -> Self {
        // Floor, so the fraction is in [0, 1) for negative inputs too
        let whole = self.raw().to_i128() >> F;
        let x = self - Self::from_int(whole);

        let a = Self::from_fixed_point::<63>(128_239_257_017_632_854);
        let b = Self::from_fixed_point::<63>(320_978_614_890_280_666);
        let c = Self::from_fixed_point::<63>(1_571_680_799_599_592_947);
        let d = Self::from_fixed_point::<63>(4_603_349_000_587_966_862);
        let e = Self::from_fixed_point::<62>(4_612_052_447_974_689_712);
        let f = Self::from_fixed_point::<63>(9_223_361_618_412_247_875);
        let poly = ((((a * x + b) * x + c) * x + d) * x + e) * x + f;

        if whole >= 0 {
            return Self::e().powi(whole as i32) * poly;
        }

        // e^-n would overflow long before e^n underflows, so divide step by
        // step instead; the value reaches zero after at most F + 1 steps
        let e = Self::e();
        let mut result = poly;
        for _ in 0..whole.unsigned_abs() {
            result = result / e;
            if result.raw() == B::ZERO {
                break;
            }
        }
        result
    }

    /// `2^x`. Results below the smallest step round to zero.
    pub fn exp2(self) -> Self {
        let whole = self.raw().to_i128() >> F;
        let x = self - Self::from_int(whole);

        let a = Self::from_fixed_point::<63>(17_491_766_697_771_214);
        let b = Self::from_fixed_point::<63>(82_483_038_782_406_547);
        let c = Self::from_fixed_point::<63>(515_275_173_969_157_690);
        let d = Self::from_fixed_point::<63>(2_214_897_896_212_987_987);
        let e = Self::from_fixed_point::<63>(6_393_224_161_192_452_326);
        let f = Self::from_fixed_point::<63>(9_223_371_050_976_163_566);
        let poly = ((((a * x + b) * x + c) * x + d) * x + e) * x + f;

        if whole >= 0 {
            return Self::from_int(2i32).powi(whole as i32) * poly;
        }

        // A negative power of two is a right shift of poly, which is below 2
        let shift = whole.unsigned_abs();
        if shift > u128::from(F) + 1 {
            return Self::ZERO;
        }
        Self::rescale(poly.raw().to_i128(), F + shift as u32)
    }

    /// `e^x - 1`.
    pub fn exp_m1(self) -> Self {
        self.exp() - Self::one()
    }

    /// Base-2 logarithm.
    ///
    /// # Panics
    ///
    /// Panics unless `self > 0`. See [`try_log2`](Self::try_log2).
    #[track_caller]
    pub fn log2(self) -> Self {
        fatal(self.try_log2())
    }

    pub fn try_log2(self) -> Result<Self> {
        if self.raw() <= B::ZERO {
            return Err(FixedPointError::domain("log2", "x > 0"));
        }

        // Normalize to [1, 2) and keep the shift as the exponent
        let highest = highest_bit(self.raw());
        let x = if highest >= F {
            Self::from_wide(self.wide() >> (highest - F))
        } else {
            Self::from_wide(self.wide() << (F - highest))
        };

        let a = Self::from_fixed_point::<63>(413_886_001_457_275_979);
        let b = Self::from_fixed_point::<63>(-3_842_121_857_793_256_941);
        let c = Self::from_fixed_point::<62>(7_522_345_947_206_307_744);
        let d = Self::from_fixed_point::<61>(-8_187_571_043_052_183_818);
        let e = Self::from_fixed_point::<60>(5_870_342_889_289_496_598);
        let f = Self::from_fixed_point::<61>(-6_457_199_832_668_582_866);
        let poly = ((((a * x + b) * x + c) * x + d) * x + e) * x + f;

        Ok(Self::from_int(highest as i32 - F as i32) + poly)
    }

    /// Natural logarithm.
    ///
    /// # Panics
    ///
    /// Panics unless `self > 0`.
    #[track_caller]
    pub fn ln(self) -> Self {
        fatal(self.try_ln())
    }

    pub fn try_ln(self) -> Result<Self> {
        let numerator = self
            .try_log2()
            .map_err(|_| FixedPointError::domain("ln", "x > 0"))?;
        Ok(numerator / Self::e().log2())
    }

    /// Base-10 logarithm.
    ///
    /// # Panics
    ///
    /// Panics unless `self > 0`.
    #[track_caller]
    pub fn log10(self) -> Self {
        fatal(self.try_log10())
    }

    pub fn try_log10(self) -> Result<Self> {
        let numerator = self
            .try_log2()
            .map_err(|_| FixedPointError::domain("log10", "x > 0"))?;
        Ok(numerator / Self::from_int(10i32).log2())
    }

    /// `ln(1 + x)`.
    ///
    /// # Panics
    ///
    /// Panics unless `self > -1`.
    #[track_caller]
    pub fn ln_1p(self) -> Self {
        fatal(self.try_ln_1p())
    }

    pub fn try_ln_1p(self) -> Result<Self> {
        (Self::one() + self)
            .try_ln()
            .map_err(|_| FixedPointError::domain("ln_1p", "x > -1"))
    }

    /// Raises to an integer power by repeated squaring. Negative exponents
    /// divide instead of multiply, so no reciprocal is rounded.
    ///
    /// # Panics
    ///
    /// Panics if `self` is zero and `exp <= 0`.
    #[track_caller]
    pub fn powi(self, exp: i32) -> Self {
        fatal(self.try_powi(exp))
    }

    pub fn try_powi(self, exp: i32) -> Result<Self> {
        if self.raw() == B::ZERO {
            return if exp > 0 {
                Ok(Self::ZERO)
            } else {
                Err(FixedPointError::domain("powi", "exp > 0 for a zero base"))
            };
        }

        let mut result = Self::one();
        let mut intermediate = self;
        let mut exp = exp;
        while exp != 0 {
            if exp % 2 != 0 {
                if exp < 0 {
                    // The squares can underflow to zero
                    check_divisor(intermediate.raw())?;
                    result = result / intermediate;
                } else {
                    result = result * intermediate;
                }
            }
            exp /= 2;
            intermediate = intermediate * intermediate;
        }
        Ok(result)
    }

    /// Raises to a fixed-point power. Integral exponents go through
    /// [`powi`](Self::powi); fractional ones through `exp2(log2(self) * exp)`.
    ///
    /// # Panics
    ///
    /// Panics if `self` is zero and `exp <= 0`, or if `self` is negative and
    /// `exp` has a fractional part.
    #[track_caller]
    pub fn pow(self, exp: Self) -> Self {
        fatal(self.try_pow(exp))
    }

    pub fn try_pow(self, exp: Self) -> Result<Self> {
        if self.raw() == B::ZERO {
            return if exp.raw() > B::ZERO {
                Ok(Self::ZERO)
            } else {
                Err(FixedPointError::domain("pow", "exp > 0 for a zero base"))
            };
        }

        if exp.raw().is_negative() {
            let denominator = self.try_pow(-exp)?;
            check_divisor(denominator.raw())?;
            return Ok(Self::one() / denominator);
        }

        if exp.wide() % Self::frac() == I::ZERO {
            return self.try_powi((exp.wide() / Self::frac()).to_i128() as i32);
        }

        if self.raw().is_negative() {
            return Err(FixedPointError::domain(
                "pow",
                "base > 0 for a fractional exponent",
            ));
        }
        Ok((self.try_log2()? * exp).exp2())
    }
}

#[cfg(test)]
mod tests {
    use crate::{Fixed, Fixed16_16, Fixed20_12, FixedPointError};

    type P = Fixed16_16;

    fn p(value: f64) -> P {
        P::from_f64(value)
    }

    fn n(value: i32) -> P {
        P::from_int(value)
    }

    fn assert_close(actual: P, expected: f64, tolerance: f64) {
        let actual = actual.to_f64();
        assert!(
            (actual - expected).abs() <= tolerance,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_sqrt_exact_squares() {
        type Q = Fixed20_12;
        assert_eq!(Q::ZERO, Q::ZERO.sqrt());
        assert_eq!(Q::from_int(1i32), Q::from_int(1i32).sqrt());
        assert_eq!(Q::from_int(2i32), Q::from_int(4i32).sqrt());
        assert_eq!(Q::from_int(3i32), Q::from_int(9i32).sqrt());
        assert_eq!(Q::from_int(100i32), Q::from_int(10_000i32).sqrt());
        assert_eq!(Q::from_f64(0.5), Q::from_f64(0.25).sqrt());
    }

    #[test]
    fn test_sqrt_unsigned_storage() {
        type U = Fixed<u32, u64, 16>;
        assert_eq!(U::from_int(7u32), U::from_int(49u32).sqrt());
    }

    #[test]
    #[should_panic(expected = "sqrt: argument out of domain")]
    fn test_sqrt_of_negative() {
        let _ = n(-1).sqrt();
    }

    #[test]
    fn test_try_sqrt_of_negative() {
        assert_eq!(
            n(-1).try_sqrt(),
            Err(FixedPointError::domain("sqrt", "x >= 0"))
        );
    }

    #[test]
    fn test_cbrt() {
        assert_eq!(P::ZERO, P::ZERO.cbrt());
        assert_eq!(n(2), n(8).cbrt());
        assert_eq!(n(-3), n(-27).cbrt());
        assert_close(p(2.0).cbrt(), 2f64.cbrt(), 0.0002);
        assert_close(p(0.001).cbrt(), 0.1, 0.0005);
    }

    #[test]
    fn test_cbrt_of_min() {
        // -2^15 is an exact cube
        assert_eq!(n(-32), P::min_value().cbrt());
        let wide = Fixed20_12::min_value().cbrt().to_f64();
        assert!((wide + 2f64.powi(19).cbrt()).abs() < 0.001, "got {wide}");
    }

    #[test]
    fn test_hypot() {
        assert_eq!(n(5), n(3).hypot(n(4)));
        assert_eq!(n(5), n(-3).hypot(n(-4)));
        assert!(P::ZERO.try_hypot(P::ZERO).is_err());
    }

    #[test]
    #[should_panic(expected = "hypot")]
    fn test_hypot_of_zeros() {
        let _ = P::ZERO.hypot(P::ZERO);
    }

    #[test]
    fn test_powi() {
        assert_eq!(n(1), n(5).powi(0));
        assert_eq!(n(125), n(5).powi(3));
        assert_eq!(n(-8), n(-2).powi(3));
        assert_eq!(p(0.25), n(2).powi(-2));
        assert_eq!(P::ZERO, P::ZERO.powi(3));
        assert!(P::ZERO.try_powi(0).is_err());
        assert!(P::ZERO.try_powi(-1).is_err());
    }

    #[test]
    fn test_pow() {
        assert_eq!(n(8), n(2).pow(n(3)));
        assert_eq!(p(0.125), n(2).pow(n(-3)));
        assert_eq!(n(9), n(-3).pow(n(2)));
        assert_close(n(2).pow(p(0.5)), 2f64.sqrt(), 0.002);
        assert_close(n(10).pow(p(1.5)), 10f64.powf(1.5), 0.5);
        assert!(n(-2).try_pow(p(0.5)).is_err());
        assert!(P::ZERO.try_pow(P::ZERO).is_err());
        assert_eq!(P::ZERO, P::ZERO.pow(p(0.5)));
    }

    #[test]
    fn test_exp() {
        assert_close(P::ZERO.exp(), 1.0, 0.0001);
        assert_close(n(1).exp(), core::f64::consts::E, 0.001);
        assert_close(n(-1).exp(), (-1f64).exp(), 0.001);
        assert_close(p(2.5).exp(), 2.5f64.exp(), 0.02);
        assert_close(p(0.5).exp_m1(), 0.5f64.exp_m1(), 0.001);
    }

    #[test]
    fn test_exp_underflows_to_zero() {
        for k in -20..=-5 {
            let actual = n(k).exp();
            assert!(actual >= P::ZERO, "exp({k}) = {actual}");
            assert_close(actual, f64::from(k).exp(), P::epsilon().to_f64());
        }
        assert_eq!(1, n(-11).exp().raw());
        assert_eq!(P::ZERO, n(-20).exp());
        assert_eq!(P::ZERO, P::min_value().exp());
        assert_eq!(-n(1), P::min_value().exp_m1());
    }

    #[test]
    fn test_exp2() {
        assert_close(n(3).exp2(), 8.0, 0.001);
        assert_close(p(0.5).exp2(), 2f64.sqrt(), 0.0005);
        assert_close(p(-1.5).exp2(), 2f64.powf(-1.5), 0.0005);
    }

    #[test]
    fn test_exp2_underflows_to_zero() {
        for k in -20..=-8 {
            let actual = n(k).exp2();
            assert!(actual >= P::ZERO, "exp2({k}) = {actual}");
            assert_close(actual, 2f64.powi(k), P::epsilon().to_f64());
        }
        assert_eq!(1, n(-16).exp2().raw());
        assert_eq!(P::ZERO, n(-18).exp2());
        assert_eq!(P::ZERO, P::min_value().exp2());
    }

    #[test]
    fn test_logarithms() {
        assert_close(n(1).log2(), 0.0, 0.0002);
        assert_close(n(8).log2(), 3.0, 0.0005);
        assert_close(p(0.125).log2(), -3.0, 0.0005);
        assert_close(n(10).ln(), 10f64.ln(), 0.001);
        assert_close(n(1000).log10(), 3.0, 0.002);
        assert_close(p(0.5).ln_1p(), 1.5f64.ln(), 0.001);
    }

    #[test]
    fn test_logarithm_domain() {
        assert!(P::ZERO.try_log2().is_err());
        assert!(n(-1).try_ln().is_err());
        assert!(n(-1).try_log10().is_err());
        assert_eq!(
            n(-1).try_ln_1p(),
            Err(FixedPointError::domain("ln_1p", "x > -1"))
        );
    }

    #[test]
    #[should_panic(expected = "log2: argument out of domain")]
    fn test_log2_of_zero() {
        let _ = P::ZERO.log2();
    }
}
