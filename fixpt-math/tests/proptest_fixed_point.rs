use fixpt_math::{Fixed16_16, Fixed24_8};
use proptest::prelude::*;

type P = Fixed16_16;

// Property 1: Negation is an involution and the additive inverse
proptest! {
    #[test]
    fn prop_negation(raw in any::<i32>()) {
        let x = P::from_raw(raw);
        prop_assert_eq!(-(-x), x);
        prop_assert_eq!(x + (-x), P::ZERO);
        prop_assert_eq!((-x) + x, P::ZERO);
    }
}

// Property 2: Exactly one of <, ==, > holds
proptest! {
    #[test]
    fn prop_trichotomy(a in any::<i32>(), b in any::<i32>()) {
        let (x, y) = (P::from_raw(a), P::from_raw(b));
        let relations = [x < y, x == y, x > y];
        prop_assert_eq!(relations.iter().filter(|&&r| r).count(), 1);
        prop_assert_eq!(x < y, a < b);
    }
}

// Property 3: Integer round trip for every representable integer
proptest! {
    #[test]
    fn prop_int_roundtrip(n in -32768i32..=32767) {
        prop_assert_eq!(P::from_int(n).to_int::<i32>(), n);
        prop_assert_eq!(P::from_int(n).to_f64(), f64::from(n));
    }
}

// Property 4: Multiplication and addition commute bit-exactly
proptest! {
    #[test]
    fn prop_commutative(a in any::<i32>(), b in any::<i32>()) {
        let (x, y) = (P::from_raw(a), P::from_raw(b));
        prop_assert_eq!(x * y, y * x);
        prop_assert_eq!(x + y, y + x);
    }
}

// Property 5: Multiplication by one and division by one are identities
proptest! {
    #[test]
    fn prop_one_is_identity(raw in any::<i32>()) {
        let x = P::from_raw(raw);
        prop_assert_eq!(x * P::one(), x);
        prop_assert_eq!(x / P::one(), x);
        prop_assert_eq!(x * 1i32, x);
    }
}

// Property 6: Checked arithmetic agrees with the wrapping operators in range
proptest! {
    #[test]
    fn prop_checked_matches_unchecked(
        a in -1_000_000_000i32..1_000_000_000,
        b in -1_000_000_000i32..1_000_000_000,
    ) {
        let (x, y) = (P::from_raw(a), P::from_raw(b));
        prop_assert_eq!(x.checked_add(y), Ok(x + y));
        prop_assert_eq!(x.checked_sub(y), Ok(x - y));
    }
}

// Property 7: sqrt squares back and is monotone
proptest! {
    #[test]
    fn prop_sqrt(a in 65_536i32..=30_000 * 65_536, b in 65_536i32..=30_000 * 65_536) {
        let (x, y) = (P::from_raw(a), P::from_raw(b));
        let root = x.sqrt();
        let square = (root * root).to_f64();
        prop_assert!(
            (square - x.to_f64()).abs() <= 0.0003 * x.to_f64(),
            "sqrt({})^2 = {}", x, square
        );
        if x <= y {
            prop_assert!(x.sqrt() <= y.sqrt());
        }
    }
}

// Property 8: cbrt keeps the sign and has odd symmetry
proptest! {
    #[test]
    fn prop_cbrt_odd(raw in any::<i32>()) {
        let x = P::from_raw(raw);
        prop_assert_eq!(x.cbrt().raw().signum(), raw.signum());
        // -MIN wraps back to MIN
        if raw != i32::MIN {
            prop_assert_eq!((-x).cbrt(), -x.cbrt());
        }
    }
}

// Property 9: sin^2 + cos^2 == 1 over one turn
proptest! {
    #[test]
    fn prop_pythagorean_identity(angle in -std::f64::consts::PI..std::f64::consts::PI) {
        let x = P::from_f64(angle);
        let (s, c) = (x.sin().to_f64(), x.cos().to_f64());
        prop_assert!((s * s + c * c - 1.0).abs() <= 0.005, "angle {}", angle);
    }
}

// Property 10: ln inverts exp in a bounded range
proptest! {
    #[test]
    fn prop_ln_exp_inverse(value in -3.0f64..3.0) {
        let x = P::from_f64(value);
        let back = x.exp().ln();
        prop_assert!((back - x).abs().to_f64() <= 0.01, "ln(exp({})) = {}", x, back);
    }
}

// Property 11: Display output parses back to the same value
proptest! {
    #[test]
    fn prop_display_parse_roundtrip(raw in any::<i32>()) {
        let x = P::from_raw(raw);
        prop_assert_eq!(x.to_string().parse::<P>(), Ok(x));

        let y = Fixed24_8::from_raw(raw);
        prop_assert_eq!(y.to_string().parse::<Fixed24_8>(), Ok(y));
    }
}

// Property 12: Rounding functions bracket the value
proptest! {
    #[test]
    fn prop_rounding_brackets(raw in -2_000_000_000i32..2_000_000_000) {
        let x = P::from_raw(raw);
        prop_assert!(x.floor() <= x);
        prop_assert!(x.ceil() >= x);
        prop_assert!((x - x.round()).abs() <= P::round_error());
        prop_assert!((x - x.nearbyint()).abs() <= P::round_error());
        let (fract, whole) = x.modf();
        prop_assert_eq!(fract + whole, x);
    }
}
