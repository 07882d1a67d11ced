//! Property-based tests.

use proptest::prelude::*;
use scour::prelude::*;

// ============================================================================
// NUMERIC STRING ROUND-TRIP: stringify then parse reproduces the value
// ============================================================================

proptest! {
    #[test]
    fn stringified_floats_parse_back_exactly(x in proptest::num::f64::NORMAL | proptest::num::f64::ZERO) {
        let field = number().allow(Kind::String).build().unwrap();
        let cleaned = field.clean(format!("{x}")).unwrap();
        prop_assert_eq!(cleaned, Some(x));
    }

    #[test]
    fn small_integers_survive_string_coercion(n in -1_000_000i64..1_000_000i64) {
        let field = number().allow(Kind::String).build().unwrap();
        let cleaned = field.clean(n.to_string()).unwrap();
        prop_assert_eq!(cleaned, Some(n as f64));
    }
}

// ============================================================================
// IDEMPOTENCY: a cleaned value re-validates to itself
// ============================================================================

proptest! {
    #[test]
    fn string_cleaning_is_idempotent(s in "[ a-zA-Z0-9]{0,24}") {
        let field = string()
            .empty(true)
            .transform(StringTransform::Trim)
            .transform(StringTransform::Title)
            .build()
            .unwrap();
        let once = field.validate(&Value::from(s.as_str())).unwrap();
        let twice = field.validate(&once).unwrap();
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn number_cleaning_is_idempotent(x in proptest::num::f64::NORMAL, p in 0u32..4) {
        let field = number().precision(p).build().unwrap();
        let once = field.validate(&Value::Number(x)).unwrap();
        let twice = field.validate(&once).unwrap();
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn validation_outcome_is_stable(s in ".{0,40}") {
        let field = email().empty(true).build().unwrap();
        let first = field.validate(&Value::from(s.as_str())).is_ok();
        let second = field.validate(&Value::from(s.as_str())).is_ok();
        prop_assert_eq!(first, second);
    }
}
