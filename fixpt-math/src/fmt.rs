//! Text formatting and parsing.
//!
//! `Display` prints the exact decimal expansion of the value, which always
//! terminates because the denominator is a power of two. A precision
//! (`{:.3}`) rounds that expansion half-up. `FromStr` accepts decimal
//! literals with an optional exponent and rounds to the nearest
//! representable value (or truncates, for types without rounding). Every
//! digit takes part in the conversion, however long the literal.

use core::fmt;
use core::str::FromStr;

use crate::error::FixedPointError;
use crate::fixed::Fixed;
use crate::int::{Int, Storage};

/// Explicit exponents are clamped here; anything larger overflows or
/// underflows every layout anyway.
const EXPONENT_LIMIT: i32 = 10_000;

impl<B: Storage<I>, I: Int, const F: u32, const R: bool> fmt::Display for Fixed<B, I, F, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let raw = self.raw().to_i128();
        let magnitude = raw.unsigned_abs();
        let mask = (1u128 << F) - 1;

        let mut whole = magnitude >> F;
        let mut rest = magnitude & mask;
        let mut digits = Vec::new();

        match f.precision() {
            None => {
                while rest != 0 {
                    rest *= 10;
                    digits.push((rest >> F) as u8);
                    rest &= mask;
                }
            }
            Some(precision) => {
                for _ in 0..precision {
                    rest *= 10;
                    digits.push((rest >> F) as u8);
                    rest &= mask;
                }
                // Half-up on the remaining exact tail
                if rest << 1 >= 1u128 << F {
                    let mut carry = true;
                    for digit in digits.iter_mut().rev() {
                        if *digit == 9 {
                            *digit = 0;
                        } else {
                            *digit += 1;
                            carry = false;
                            break;
                        }
                    }
                    if carry {
                        whole += 1;
                    }
                }
            }
        }

        let mut text = whole.to_string();
        if !digits.is_empty() {
            text.push('.');
            text.extend(digits.iter().map(|digit| char::from(b'0' + digit)));
        }
        f.pad_integral(raw >= 0, "", &text)
    }
}

impl<B: Storage<I>, I: Int, const F: u32, const R: bool> fmt::Debug for Fixed<B, I, F, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (0x{:0width$x})",
            self,
            self.raw(),
            width = (B::BITS / 4) as usize
        )
    }
}

impl<B: Storage<I>, I: Int, const F: u32, const R: bool> FromStr for Fixed<B, I, F, R> {
    type Err = FixedPointError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        if text.is_empty() {
            return Err(FixedPointError::EmptyLiteral);
        }
        let invalid = || FixedPointError::InvalidLiteral(text.to_owned());

        let bytes = text.as_bytes();
        let mut pos = 0;
        let negative = match bytes.first() {
            Some(b'-') => {
                pos += 1;
                true
            }
            Some(b'+') => {
                pos += 1;
                false
            }
            _ => false,
        };

        let mut digits = Vec::new();
        while let Some(digit) = bytes.get(pos).filter(|b| b.is_ascii_digit()) {
            digits.push(digit - b'0');
            pos += 1;
        }
        // Position of the decimal point within `digits`
        let mut point = digits.len() as i64;

        if bytes.get(pos) == Some(&b'.') {
            pos += 1;
            while let Some(digit) = bytes.get(pos).filter(|b| b.is_ascii_digit()) {
                digits.push(digit - b'0');
                pos += 1;
            }
        }

        if digits.is_empty() {
            return Err(invalid());
        }

        if matches!(bytes.get(pos), Some(b'e' | b'E')) {
            pos += 1;
            let exponent_negative = match bytes.get(pos) {
                Some(b'-') => {
                    pos += 1;
                    true
                }
                Some(b'+') => {
                    pos += 1;
                    false
                }
                _ => false,
            };
            let start = pos;
            let mut explicit: i32 = 0;
            while let Some(digit) = bytes.get(pos).filter(|b| b.is_ascii_digit()) {
                explicit = (explicit * 10 + i32::from(digit - b'0')).min(EXPONENT_LIMIT);
                pos += 1;
            }
            if pos == start {
                return Err(invalid());
            }
            point += i64::from(if exponent_negative { -explicit } else { explicit });
        }

        if pos != bytes.len() {
            return Err(invalid());
        }

        let overflow = || FixedPointError::Overflow { operation: "parse" };
        let magnitude = scale(digits, point, F, R).ok_or_else(overflow)?;
        let magnitude = i128::try_from(magnitude).map_err(|_| overflow())?;
        let raw = if negative { -magnitude } else { magnitude };
        B::try_from_i128(raw).map(Self::from_raw).ok_or_else(overflow)
    }
}

/// `0.digits * 10^point * 2^bits` as an integer, rounded to nearest or
/// truncated. `None` if the result does not fit in `u128`.
fn scale(mut digits: Vec<u8>, mut point: i64, bits: u32, round: bool) -> Option<u128> {
    if point < -20 {
        // Below 10^-20 every layout rounds to zero
        return Some(0);
    }
    if point < 0 {
        let mut padded = vec![0; point.unsigned_abs() as usize];
        padded.append(&mut digits);
        digits = padded;
        point = 0;
    }

    let split = digits.len().min(point as usize);
    let mut fraction = digits.split_off(split);

    let mut whole: u128 = 0;
    for digit in digits {
        whole = whole.checked_mul(10)?.checked_add(u128::from(digit))?;
    }
    for _ in split as i64..point {
        whole = whole.checked_mul(10)?;
    }

    // Binary expansion of the decimal fraction, one bit past the last kept
    while fraction.last() == Some(&0) {
        fraction.pop();
    }
    let mut fraction_bits: u128 = 0;
    for _ in 0..=bits {
        let mut carry = 0;
        for digit in fraction.iter_mut().rev() {
            let twice = *digit * 2 + carry;
            *digit = twice % 10;
            carry = twice / 10;
        }
        fraction_bits = fraction_bits << 1 | u128::from(carry);
    }

    let doubled = whole.checked_mul(1u128 << (bits + 1))? | fraction_bits;
    Some(if round {
        doubled / 2 + doubled % 2
    } else {
        doubled / 2
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Fixed16_16, Fixed24_8};

    type P = Fixed16_16;

    fn p(value: f64) -> P {
        P::from_f64(value)
    }

    #[test]
    fn test_display_exact() {
        assert_eq!(p(1.5).to_string(), "1.5");
        assert_eq!(p(-1.5).to_string(), "-1.5");
        assert_eq!(P::from_int(3i32).to_string(), "3");
        assert_eq!(P::ZERO.to_string(), "0");
        assert_eq!(P::epsilon().to_string(), "0.0000152587890625");
        assert_eq!(P::min_value().to_string(), "-32768");
        assert_eq!(Fixed24_8::from_f64(-13.125).to_string(), "-13.125");
    }

    #[test]
    fn test_display_precision() {
        assert_eq!(format!("{:.2}", p(1.125)), "1.13");
        assert_eq!(format!("{:.3}", p(1.125)), "1.125");
        assert_eq!(format!("{:.5}", p(1.125)), "1.12500");
        assert_eq!(format!("{:.0}", p(2.5)), "3");
        assert_eq!(format!("{:.1}", p(9.96)), "10.0");
        assert_eq!(format!("{:.2}", p(-0.125)), "-0.13");
    }

    #[test]
    fn test_display_padding_and_sign() {
        assert_eq!(format!("{:>8}", p(1.5)), "     1.5");
        assert_eq!(format!("{:<6}|", p(1.5)), "1.5   |");
        assert_eq!(format!("{:+}", p(1.5)), "+1.5");
        assert_eq!(format!("{:08.2}", p(-1.5)), "-0001.50");
    }

    #[test]
    fn test_debug_shows_raw() {
        assert_eq!(format!("{:?}", p(1.5)), "1.5 (0x00018000)");
        assert_eq!(format!("{:?}", p(-1.0)), "-1 (0xffff0000)");
    }

    #[test]
    fn test_parse() {
        assert_eq!("1.5".parse::<P>(), Ok(p(1.5)));
        assert_eq!("-0.25".parse::<P>(), Ok(p(-0.25)));
        assert_eq!("+7".parse::<P>(), Ok(P::from_int(7i32)));
        assert_eq!(".5".parse::<P>(), Ok(p(0.5)));
        assert_eq!("5.".parse::<P>(), Ok(P::from_int(5i32)));
        assert_eq!("1e2".parse::<P>(), Ok(P::from_int(100i32)));
        assert_eq!("2.5E-1".parse::<P>(), Ok(p(0.25)));
        assert_eq!("-32768".parse::<P>(), Ok(P::min_value()));
        assert_eq!("3.14159265358979323846264338327950288".parse::<P>(), Ok(P::pi()));
        assert_eq!("1e-400".parse::<P>(), Ok(P::ZERO));
    }

    #[test]
    fn test_parse_rounding() {
        // 0.00001 * 2^16 = 0.655
        assert_eq!("0.00001".parse::<P>().map(P::raw), Ok(1));
        assert_eq!(
            "0.00001".parse::<Fixed<i32, i64, 16, false>>().map(|x| x.raw()),
            Ok(0)
        );
    }

    #[test]
    fn test_parse_keeps_every_digit() {
        // 2^-17 is exactly half a step; a tie rounds away from zero
        assert_eq!(
            "10000.00000762939453125".parse::<P>().map(P::raw),
            Ok(10_000 * 65_536 + 1)
        );
        assert_eq!(
            "10000.00000762939453124".parse::<P>().map(P::raw),
            Ok(10_000 * 65_536)
        );
        assert_eq!(
            "-10000.00000762939453125".parse::<P>().map(P::raw),
            Ok(-(10_000 * 65_536 + 1))
        );
        assert_eq!(
            "0.000000000000000000000000000000000000000001e42".parse::<P>(),
            Ok(P::one())
        );
    }

    #[test]
    fn test_parse_full_width_fraction() {
        type Q63 = Fixed<i64, i128, 63>;
        assert_eq!("-1".parse::<Q63>(), Ok(Q63::min_value()));
        assert_eq!("0.5".parse::<Q63>().map(Q63::raw), Ok(1 << 62));
        assert_eq!("0.9999999999999999999".parse::<Q63>(), Ok(Q63::max_value()));
        // Rounds up to one, which does not fit
        assert_eq!(
            "0.99999999999999999999".parse::<Q63>(),
            Err(FixedPointError::Overflow { operation: "parse" })
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("".parse::<P>(), Err(FixedPointError::EmptyLiteral));
        for text in ["abc", "-", ".", "1.2.3", "1e", "1e+", "1 ", "0x10"] {
            assert_eq!(
                text.parse::<P>(),
                Err(FixedPointError::InvalidLiteral(text.to_owned())),
                "{text}"
            );
        }
        let overflow = Err(FixedPointError::Overflow { operation: "parse" });
        assert_eq!("40000".parse::<P>(), overflow);
        assert_eq!("32768".parse::<P>(), overflow);
        assert_eq!("1e50".parse::<P>(), overflow);
        // Rounds up to 32768
        assert_eq!("32767.99999237060546875".parse::<P>(), overflow);
    }

    #[test]
    fn test_display_parse_round_trip() {
        for raw in [-1_234_567, -65_536, -1, 0, 1, 3, 65_535, 98_765_432] {
            let x = P::from_raw(raw);
            assert_eq!(x.to_string().parse::<P>(), Ok(x));
        }
    }
}
