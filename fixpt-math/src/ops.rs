//! Arithmetic operators.
//!
//! Products and quotients are formed in the intermediate type and narrowed
//! back, rounding the last bit to nearest when `R` is set. Addition,
//! subtraction and negation wrap. Integer operands are accepted on either side
//! and are not converted to fixed point before multiplying or dividing, which
//! keeps the full precision of the other operand.

use core::ops::{
    Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Rem, RemAssign, Sub, SubAssign,
};

use crate::error::{check_divisor, fatal, FixedPointError, Result};
use crate::fixed::Fixed;
use crate::int::{Int, Signed, Storage};

impl<B: Storage<I>, I: Int, const F: u32, const R: bool> Fixed<B, I, F, R> {
    /// Product in the intermediate type, scaled back to `F` fraction bits.
    fn mul_wide(self, rhs: Self) -> Option<I> {
        let product = self.wide().checked_mul(rhs.wide())?;
        Some(if R {
            let doubled = product / (Self::frac() / I::TWO);
            doubled / I::TWO + doubled % I::TWO
        } else {
            product / Self::frac()
        })
    }

    /// Quotient in the intermediate type. The divisor must be non-zero.
    fn div_wide(self, rhs: Self) -> Option<I> {
        let divisor = rhs.wide();
        Some(if R {
            let doubled = self.wide().checked_mul(Self::frac())?.checked_mul(I::TWO)? / divisor;
            doubled / I::TWO + doubled % I::TWO
        } else {
            self.wide().checked_mul(Self::frac())? / divisor
        })
    }

    /// Addition that reports overflow instead of wrapping.
    pub fn checked_add(self, rhs: Self) -> Result<Self> {
        self.raw()
            .checked_add(rhs.raw())
            .map(Self::from_raw)
            .ok_or(FixedPointError::Overflow { operation: "add" })
    }

    /// Subtraction that reports overflow instead of wrapping.
    pub fn checked_sub(self, rhs: Self) -> Result<Self> {
        self.raw()
            .checked_sub(rhs.raw())
            .map(Self::from_raw)
            .ok_or(FixedPointError::Overflow { operation: "sub" })
    }

    /// Multiplication that reports a product outside the representable range.
    pub fn checked_mul(self, rhs: Self) -> Result<Self> {
        self.mul_wide(rhs)
            .and_then(B::try_narrow)
            .map(Self::from_raw)
            .ok_or(FixedPointError::Overflow { operation: "mul" })
    }

    /// Division that reports a zero divisor or a quotient outside the
    /// representable range.
    pub fn checked_div(self, rhs: Self) -> Result<Self> {
        check_divisor(rhs.raw())?;
        self.div_wide(rhs)
            .and_then(B::try_narrow)
            .map(Self::from_raw)
            .ok_or(FixedPointError::Overflow { operation: "div" })
    }
}

impl<B: Storage<I>, I: Int, const F: u32, const R: bool> Add for Fixed<B, I, F, R> {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::from_raw(self.raw().wrapping_add(rhs.raw()))
    }
}

impl<B: Storage<I>, I: Int, const F: u32, const R: bool> Sub for Fixed<B, I, F, R> {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::from_raw(self.raw().wrapping_sub(rhs.raw()))
    }
}

impl<B: Storage<I>, I: Int, const F: u32, const R: bool> Mul for Fixed<B, I, F, R> {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        let product = self.wide().wrapping_mul(rhs.wide());
        if R {
            let doubled = product / (Self::frac() / I::TWO);
            Self::from_wide(doubled / I::TWO + doubled % I::TWO)
        } else {
            Self::from_wide(product / Self::frac())
        }
    }
}

impl<B: Storage<I>, I: Int, const F: u32, const R: bool> Div for Fixed<B, I, F, R> {
    type Output = Self;

    /// # Panics
    ///
    /// Panics if `rhs` is zero.
    #[track_caller]
    fn div(self, rhs: Self) -> Self {
        fatal(check_divisor(rhs.raw()));
        let dividend = self.wide().wrapping_mul(Self::frac());
        if R {
            let doubled = dividend.wrapping_mul(I::TWO) / rhs.wide();
            Self::from_wide(doubled / I::TWO + doubled % I::TWO)
        } else {
            Self::from_wide(dividend / rhs.wide())
        }
    }
}

impl<B: Storage<I>, I: Int, const F: u32, const R: bool> Rem for Fixed<B, I, F, R> {
    type Output = Self;

    /// Same as [`Fixed::fmod`].
    #[track_caller]
    #[inline]
    fn rem(self, rhs: Self) -> Self {
        self.fmod(rhs)
    }
}

impl<B: Storage<I> + Signed, I: Int, const F: u32, const R: bool> Neg for Fixed<B, I, F, R> {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self::from_raw(self.raw().wrapping_neg())
    }
}

//
// Mixed operations with a storage integer on the right
//

impl<B: Storage<I>, I: Int, const F: u32, const R: bool> Add<B> for Fixed<B, I, F, R> {
    type Output = Self;

    #[inline]
    fn add(self, rhs: B) -> Self {
        self + Self::from_int(rhs)
    }
}

impl<B: Storage<I>, I: Int, const F: u32, const R: bool> Sub<B> for Fixed<B, I, F, R> {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: B) -> Self {
        self - Self::from_int(rhs)
    }
}

impl<B: Storage<I>, I: Int, const F: u32, const R: bool> Mul<B> for Fixed<B, I, F, R> {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: B) -> Self {
        Self::from_raw(self.raw().wrapping_mul(rhs))
    }
}

impl<B: Storage<I>, I: Int, const F: u32, const R: bool> Div<B> for Fixed<B, I, F, R> {
    type Output = Self;

    /// # Panics
    ///
    /// Panics if `rhs` is zero.
    #[track_caller]
    #[inline]
    fn div(self, rhs: B) -> Self {
        fatal(check_divisor(rhs));
        // Divided wide so that MIN / -1 wraps instead of trapping
        Self::from_wide(self.wide() / rhs.widen())
    }
}

//
// Mixed operations with a storage integer on the left
//

macro_rules! impl_int_lhs {
    ($($t:ty),*) => {$(
        impl<I: Int, const F: u32, const R: bool> Add<Fixed<$t, I, F, R>> for $t
        where
            $t: Storage<I>,
        {
            type Output = Fixed<$t, I, F, R>;

            #[inline]
            fn add(self, rhs: Fixed<$t, I, F, R>) -> Self::Output {
                rhs + self
            }
        }

        impl<I: Int, const F: u32, const R: bool> Sub<Fixed<$t, I, F, R>> for $t
        where
            $t: Storage<I>,
        {
            type Output = Fixed<$t, I, F, R>;

            #[inline]
            fn sub(self, rhs: Fixed<$t, I, F, R>) -> Self::Output {
                Fixed::from_int(self) - rhs
            }
        }

        impl<I: Int, const F: u32, const R: bool> Mul<Fixed<$t, I, F, R>> for $t
        where
            $t: Storage<I>,
        {
            type Output = Fixed<$t, I, F, R>;

            #[inline]
            fn mul(self, rhs: Fixed<$t, I, F, R>) -> Self::Output {
                rhs * self
            }
        }

        impl<I: Int, const F: u32, const R: bool> Div<Fixed<$t, I, F, R>> for $t
        where
            $t: Storage<I>,
        {
            type Output = Fixed<$t, I, F, R>;

            #[track_caller]
            #[inline]
            fn div(self, rhs: Fixed<$t, I, F, R>) -> Self::Output {
                Fixed::from_int(self) / rhs
            }
        }
    )*};
}

impl_int_lhs!(i8, i16, i32, i64, u8, u16, u32, u64);

//
// Compound assignment, for any right-hand side the binary operator accepts
//

macro_rules! impl_assign {
    ($($assign:ident :: $assign_fn:ident => $op:ident :: $op_fn:ident),*) => {$(
        impl<T, B: Storage<I>, I: Int, const F: u32, const R: bool> $assign<T> for Fixed<B, I, F, R>
        where
            Self: $op<T, Output = Self>,
        {
            #[track_caller]
            #[inline]
            fn $assign_fn(&mut self, rhs: T) {
                *self = $op::$op_fn(*self, rhs);
            }
        }
    )*};
}

impl_assign!(
    AddAssign::add_assign => Add::add,
    SubAssign::sub_assign => Sub::sub,
    MulAssign::mul_assign => Mul::mul,
    DivAssign::div_assign => Div::div,
    RemAssign::rem_assign => Rem::rem
);
