//! Property tests for numeric field coercion.

use proptest::prelude::*;

use livid::domain::services::{parse_double, parse_integer};

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 96,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Integer coercion never panics on arbitrary text.
    #[test]
    fn parse_integer_never_panics(text in ".{0,64}") {
        let _ = parse_integer(&text);
    }

    /// PROPERTY: Double coercion never panics on arbitrary text.
    #[test]
    fn parse_double_never_panics(text in ".{0,64}") {
        let _ = parse_double(&text);
    }

    /// PROPERTY: Decimal renderings of any i64 read back unchanged,
    /// including both saturation bounds.
    #[test]
    fn decimal_integers_read_back(n in any::<i64>()) {
        prop_assert_eq!(parse_integer(&n.to_string()), n);
    }

    /// PROPERTY: Trailing garbage after the digits is ignored.
    #[test]
    fn integer_suffix_is_ignored(n in 1u32.., suffix in "[g-z ]{1,8}") {
        prop_assert_eq!(parse_integer(&format!("{n}{suffix}")), i64::from(n));
    }

    /// PROPERTY: A `0x` prefix selects base 16.
    #[test]
    fn hex_prefix_selects_base_16(n in any::<u32>()) {
        prop_assert_eq!(parse_integer(&format!("0x{n:x}")), i64::from(n));
        prop_assert_eq!(parse_integer(&format!("0X{n:X}")), i64::from(n));
    }

    /// PROPERTY: Finite doubles survive a display round trip.
    #[test]
    fn finite_doubles_read_back(x in any::<f64>().prop_filter("finite", |x| x.is_finite())) {
        prop_assert_eq!(parse_double(&x.to_string()), x);
    }
}
