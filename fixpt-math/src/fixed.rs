//! Fixed-point scalar type

use core::marker::PhantomData;

use crate::int::{Int, Storage};

/// A fixed-point number stored as a `B` integer scaled by `2^F`.
///
/// * `B`: storage integer (`i8` to `i64`, `u8` to `u64`)
/// * `I`: intermediate integer, strictly wider than `B`, used by
///   multiplication, division and rescaling
/// * `F`: number of fraction bits, `0 < F < B::BITS`
/// * `R`: round the last bit to nearest in multiplication, division and
///   conversion (`true`), or truncate (`false`)
///
/// Equality and ordering compare the raw integers. Addition, subtraction and
/// integer conversion wrap on overflow; choosing a split with enough integer
/// bits for the expected range is the caller's responsibility. Use the
/// `checked_*` methods to detect overflow instead.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Fixed<B, I, const F: u32, const R: bool = true> {
    raw: B,
    _wide: PhantomData<I>,
}

/// 16 integer bits, 16 fraction bits.
pub type Fixed16_16 = Fixed<i32, i64, 16>;
/// 24 integer bits, 8 fraction bits.
pub type Fixed24_8 = Fixed<i32, i64, 8>;
/// 8 integer bits, 24 fraction bits.
pub type Fixed8_24 = Fixed<i32, i64, 24>;
/// 20 integer bits, 12 fraction bits.
pub type Fixed20_12 = Fixed<i32, i64, 12>;

impl<B: Storage<I>, I: Int, const F: u32, const R: bool> Fixed<B, I, F, R> {
    const VALID: () = assert!(
        F > 0 && F < B::BITS,
        "fraction bits must be non-zero and leave room for one integer bit"
    );

    pub const ZERO: Self = Self {
        raw: B::ZERO,
        _wide: PhantomData,
    };

    /// Number of non-sign bits in the storage integer.
    pub const DIGITS: u32 = if B::SIGNED { B::BITS - 1 } else { B::BITS };

    /// Constructs a value from its raw scaled representation.
    #[inline]
    pub fn from_raw(raw: B) -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::VALID;
        Self {
            raw,
            _wide: PhantomData,
        }
    }

    /// The raw scaled representation.
    #[inline]
    pub fn raw(self) -> B {
        self.raw
    }

    /// `2^F` in the intermediate type, where it cannot overflow.
    #[inline]
    pub(crate) fn frac() -> I {
        I::ONE << F
    }

    #[inline]
    pub(crate) fn wide(self) -> I {
        self.raw.widen()
    }

    #[inline]
    pub(crate) fn from_wide(wide: I) -> Self {
        Self::from_raw(B::narrow(wide))
    }

    #[inline]
    pub fn one() -> Self {
        Self::from_wide(Self::frac())
    }

    /// Converts an integer, truncating the bits that do not fit.
    #[inline]
    pub fn from_int<T: Int>(value: T) -> Self {
        Self::from_wide(I::from_i128(value.to_i128()).wrapping_mul(Self::frac()))
    }

    /// Converts to an integer, truncating the fraction toward zero.
    #[inline]
    pub fn to_int<T: Int>(self) -> T {
        T::from_i128((self.wide() / Self::frac()).to_i128())
    }

    /// Converts a float, rounding to nearest (ties away from zero) or
    /// truncating when rounding is disabled.
    pub fn from_f64(value: f64) -> Self {
        let scaled = value * Self::frac().to_f64();
        let scaled = match (R, value >= 0.0) {
            (false, _) => scaled,
            (true, true) => scaled + 0.5,
            (true, false) => scaled - 0.5,
        };
        Self::from_raw(B::from_f64(scaled))
    }

    #[inline]
    pub fn from_f32(value: f32) -> Self {
        Self::from_f64(f64::from(value))
    }

    #[inline]
    pub fn to_f64(self) -> f64 {
        self.raw.to_f64() / Self::frac().to_f64()
    }

    #[inline]
    pub fn to_f32(self) -> f32 {
        self.to_f64() as f32
    }

    /// Constructs a value from an integer holding `N` fraction bits.
    ///
    /// Dropping fraction bits rounds the last kept bit to nearest (when `R`);
    /// adding fraction bits is exact. Integer bits that do not fit are
    /// truncated.
    #[inline]
    pub fn from_fixed_point<const N: u32>(value: i64) -> Self {
        Self::rescale(i128::from(value), N)
    }

    pub(crate) fn rescale(value: i128, bits: u32) -> Self {
        if bits > F {
            let shift = bits - F;
            let kept = value / (1i128 << shift);
            let raw = if R {
                kept + (value / (1i128 << (shift - 1))) % 2
            } else {
                kept
            };
            Self::from_raw(B::from_i128(raw))
        } else {
            Self::from_raw(B::from_i128(value.wrapping_mul(1i128 << (F - bits))))
        }
    }

    /// Converts to a fixed-point type with a different layout, following the
    /// target type's rounding flag.
    #[inline]
    pub fn convert<B2, I2, const F2: u32, const R2: bool>(self) -> Fixed<B2, I2, F2, R2>
    where
        B2: Storage<I2>,
        I2: Int,
    {
        Fixed::<B2, I2, F2, R2>::rescale(self.raw.to_i128(), F)
    }

    //
    // Constants, derived from 60 to 62 bit patterns of pi and e.
    //

    #[inline]
    pub fn e() -> Self {
        Self::from_fixed_point::<61>(6_267_931_151_224_907_085)
    }

    #[inline]
    pub fn pi() -> Self {
        Self::from_fixed_point::<61>(7_244_019_458_077_122_842)
    }

    #[inline]
    pub fn half_pi() -> Self {
        Self::from_fixed_point::<62>(7_244_019_458_077_122_842)
    }

    #[inline]
    pub fn two_pi() -> Self {
        Self::from_fixed_point::<60>(7_244_019_458_077_122_842)
    }

    //
    // Limits
    //

    #[inline]
    pub fn min_value() -> Self {
        Self::from_raw(B::MIN)
    }

    #[inline]
    pub fn max_value() -> Self {
        Self::from_raw(B::MAX)
    }

    /// The smallest positive value, one raw unit.
    #[inline]
    pub fn epsilon() -> Self {
        Self::from_raw(B::ONE)
    }

    /// Largest error introduced by rounding to nearest: one half.
    #[inline]
    pub fn round_error() -> Self {
        Self::from_wide(Self::frac() / I::TWO)
    }

    /// Decimal digits needed to print any value without loss.
    pub fn max_digits10() -> u32 {
        max_digits10(Self::DIGITS - F) + max_digits10(F)
    }
}

/// `ceil(bits * log10(2))` evaluated in 8.24 fixed point.
const fn max_digits10(bits: u32) -> u32 {
    ((bits as u64 * 5_050_445 + (1 << 24) - 1) >> 24) as u32
}

#[cfg(feature = "serde")]
impl<B, I, const F: u32, const R: bool> serde::Serialize for Fixed<B, I, F, R>
where
    B: Storage<I> + serde::Serialize,
    I: Int,
{
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.raw.serialize(serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de, B, I, const F: u32, const R: bool> serde::Deserialize<'de> for Fixed<B, I, F, R>
where
    B: Storage<I> + serde::Deserialize<'de>,
    I: Int,
{
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        B::deserialize(deserializer).map(Self::from_raw)
    }
}
