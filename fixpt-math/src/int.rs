//! Integer primitives the fixed-point type is generic over.
//!
//! [`Int`] abstracts the handful of operations the arithmetic core needs from
//! a primitive integer. [`Storage`] pairs a storage integer with a strictly
//! wider intermediate integer of the same signedness; it is only implemented
//! for valid pairs, so `Fixed<i32, i16, 8>` fails to compile.

use core::fmt::{Debug, Display, LowerHex};
use core::hash::Hash;
use core::ops::{Add, Div, Mul, Neg, Rem, Shl, Shr, Sub};

pub trait Int:
    Copy
    + Debug
    + Display
    + LowerHex
    + Default
    + Eq
    + Ord
    + Hash
    + Send
    + Sync
    + 'static
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Rem<Output = Self>
    + Shl<u32, Output = Self>
    + Shr<u32, Output = Self>
{
    const ZERO: Self;
    const ONE: Self;
    const TWO: Self;
    const MIN: Self;
    const MAX: Self;
    const BITS: u32;
    const SIGNED: bool;

    /// Truncating conversion, like an `as` cast.
    fn from_i128(value: i128) -> Self;
    fn try_from_i128(value: i128) -> Option<Self>;
    /// Only lossless for integers up to 64 bits and for `i128`.
    fn to_i128(self) -> i128;
    /// Saturating conversion that truncates toward zero.
    fn from_f64(value: f64) -> Self;
    fn to_f64(self) -> f64;

    fn leading_zeros(self) -> u32;
    fn wrapping_add(self, rhs: Self) -> Self;
    fn wrapping_sub(self, rhs: Self) -> Self;
    fn wrapping_mul(self, rhs: Self) -> Self;
    fn wrapping_neg(self) -> Self;
    fn checked_add(self, rhs: Self) -> Option<Self>;
    fn checked_sub(self, rhs: Self) -> Option<Self>;
    fn checked_mul(self, rhs: Self) -> Option<Self>;

    #[inline]
    fn is_negative(self) -> bool {
        self < Self::ZERO
    }

    /// Absolute value, wrapping at `MIN`; identity for unsigned integers.
    #[inline]
    fn magnitude(self) -> Self {
        if self.is_negative() {
            self.wrapping_neg()
        } else {
            self
        }
    }
}

/// Marker for signed integers, which unlock negation and the
/// transcendental functions.
pub trait Signed: Int + Neg<Output = Self> {}

/// A storage integer together with its wider intermediate type `I`.
pub trait Storage<I: Int>: Int {
    fn widen(self) -> I;
    /// Truncates the high bits that do not fit.
    fn narrow(wide: I) -> Self;
    fn try_narrow(wide: I) -> Option<Self>;
}

macro_rules! impl_int {
    ($signed:expr; $($t:ty),*) => {$(
        impl Int for $t {
            const ZERO: Self = 0;
            const ONE: Self = 1;
            const TWO: Self = 2;
            const MIN: Self = <$t>::MIN;
            const MAX: Self = <$t>::MAX;
            const BITS: u32 = <$t>::BITS;
            const SIGNED: bool = $signed;

            #[inline]
            fn from_i128(value: i128) -> Self {
                value as $t
            }

            #[inline]
            fn try_from_i128(value: i128) -> Option<Self> {
                <$t>::try_from(value).ok()
            }

            #[inline]
            fn to_i128(self) -> i128 {
                self as i128
            }

            #[inline]
            fn from_f64(value: f64) -> Self {
                value as $t
            }

            #[inline]
            fn to_f64(self) -> f64 {
                self as f64
            }

            #[inline]
            fn leading_zeros(self) -> u32 {
                <$t>::leading_zeros(self)
            }

            #[inline]
            fn wrapping_add(self, rhs: Self) -> Self {
                <$t>::wrapping_add(self, rhs)
            }

            #[inline]
            fn wrapping_sub(self, rhs: Self) -> Self {
                <$t>::wrapping_sub(self, rhs)
            }

            #[inline]
            fn wrapping_mul(self, rhs: Self) -> Self {
                <$t>::wrapping_mul(self, rhs)
            }

            #[inline]
            fn wrapping_neg(self) -> Self {
                <$t>::wrapping_neg(self)
            }

            #[inline]
            fn checked_add(self, rhs: Self) -> Option<Self> {
                <$t>::checked_add(self, rhs)
            }

            #[inline]
            fn checked_sub(self, rhs: Self) -> Option<Self> {
                <$t>::checked_sub(self, rhs)
            }

            #[inline]
            fn checked_mul(self, rhs: Self) -> Option<Self> {
                <$t>::checked_mul(self, rhs)
            }
        }
    )*};
}

impl_int!(true; i8, i16, i32, i64, i128);
impl_int!(false; u8, u16, u32, u64, u128);

impl Signed for i8 {}
impl Signed for i16 {}
impl Signed for i32 {}
impl Signed for i64 {}
impl Signed for i128 {}

macro_rules! impl_storage {
    ($($narrow:ty => $($wide:ty),+;)*) => {$($(
        impl Storage<$wide> for $narrow {
            #[inline]
            fn widen(self) -> $wide {
                <$wide>::from(self)
            }

            #[inline]
            fn narrow(wide: $wide) -> Self {
                wide as $narrow
            }

            #[inline]
            fn try_narrow(wide: $wide) -> Option<Self> {
                <$narrow>::try_from(wide).ok()
            }
        }
    )+)*};
}

impl_storage! {
    i8 => i16, i32, i64;
    i16 => i32, i64, i128;
    i32 => i64, i128;
    i64 => i128;
    u8 => u16, u32, u64;
    u16 => u32, u64, u128;
    u32 => u64, u128;
    u64 => u128;
}

/// Index of the most significant set bit. Negative values report the sign
/// bit.
///
/// # Panics
///
/// Panics if `value` is zero.
#[inline]
pub fn highest_bit<T: Int>(value: T) -> u32 {
    assert!(value != T::ZERO, "highest_bit of zero is undefined");
    T::BITS - 1 - value.leading_zeros()
}
