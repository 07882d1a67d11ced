//! Number field validator.
//!
//! Validation order: convert type, emptiness shortcut, type check, choice
//! test, precision rounding, range. String input goes through a forgiving
//! parse that strips grouping characters before demanding a well-formed
//! decimal.

use serde_json::json;

use crate::constraints::{AllowSet, Bound, Choices, Conversion, Converter, Range};
use crate::core::error::{ConfigError, ValidationError};
use crate::core::traits::Field;
use crate::value::{Kind, Value};

fn type_error() -> ValidationError {
    ValidationError::Type("Value must be of type number".into())
}

/// Parses a string into a number, tolerating grouping characters such as
/// commas and spaces. The surviving digits must form a plain decimal:
/// at most one leading minus, at most one dot, at least one digit.
///
/// Digits are truncated (not rounded) past `precision` before parsing, and
/// the parse is rejected when the binary result cannot reproduce the
/// decimal digits, so a cleaned number re-validates to itself.
fn parse_number(
    input: &str,
    empty: bool,
    precision: Option<u32>,
) -> Result<Value, ValidationError> {
    let stripped: String = input
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();

    if stripped.is_empty() {
        if empty {
            return Ok(Value::Null);
        }
        return Err(ValidationError::Required("Please enter a value".into()));
    }

    let (negative, digits) = match stripped.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, stripped.as_str()),
    };
    if digits.contains('-') {
        return Err(type_error());
    }

    let (int_part, frac_part) = match digits.split_once('.') {
        Some((int_part, frac_part)) => {
            if frac_part.contains('.') {
                return Err(type_error());
            }
            (int_part, frac_part)
        }
        None => (digits, ""),
    };
    if int_part.is_empty() && frac_part.is_empty() {
        return Err(type_error());
    }

    let frac_part = match precision {
        Some(p) => &frac_part[..frac_part.len().min(p as usize)],
        None => frac_part,
    };

    // Canonical form: no leading zeros in the integer part, no trailing
    // zeros in the fraction, no dangling dot.
    let int_canonical = int_part.trim_start_matches('0');
    let int_canonical = if int_canonical.is_empty() {
        "0"
    } else {
        int_canonical
    };
    let frac_canonical = frac_part.trim_end_matches('0');

    let mut canonical = String::new();
    if negative {
        canonical.push('-');
    }
    canonical.push_str(int_canonical);
    if !frac_canonical.is_empty() {
        canonical.push('.');
        canonical.push_str(frac_canonical);
    }

    let parsed: f64 = canonical.parse().map_err(|_| type_error())?;
    if format!("{parsed}") != canonical {
        return Err(ValidationError::Type(
            "number is too large or has too many decimal places".into(),
        ));
    }
    Ok(Value::Number(parsed))
}

fn from_string(field: &NumberField, value: &Value) -> Result<Value, ValidationError> {
    let Value::String(s) = value else {
        return Ok(value.clone());
    };
    parse_number(s, field.empty, field.precision)
}

fn from_boolean(_: &NumberField, value: &Value) -> Result<Value, ValidationError> {
    Ok(Value::Number(match value {
        Value::Bool(true) => 1.0,
        _ => 0.0,
    }))
}

const CONVERSIONS: &[(Kind, Conversion<NumberField>)] = &[
    (Kind::String, from_string),
    (Kind::Boolean, from_boolean),
];

const CONVERTER: Converter<NumberField> = Converter::new(Kind::Number, CONVERSIONS);

/// Validates and cleans numeric input.
#[derive(Debug, Clone, PartialEq)]
pub struct NumberField {
    empty: bool,
    allow: AllowSet,
    choices: Choices,
    range: Range,
    precision: Option<u32>,
}

impl NumberField {
    #[must_use]
    pub fn builder() -> NumberBuilder {
        NumberBuilder::default()
    }

    /// Typed convenience wrapper: `None` is the cleaned "no value" state.
    pub fn clean(&self, input: impl Into<Value>) -> Result<Option<f64>, ValidationError> {
        match self.validate(&input.into())? {
            Value::Number(n) => Ok(Some(n)),
            _ => Ok(None),
        }
    }

    fn round(&self, value: f64) -> f64 {
        match self.precision {
            // f64::round is half-away-from-zero, matching the decimal
            // rounding users expect for e.g. 0.5 at precision 0.
            Some(p) => {
                let factor = 10f64.powi(p as i32);
                let rounded = (value * factor).round() / factor;
                // Scaling can overflow for huge magnitudes; the value then
                // has no fractional digits to round anyway.
                if rounded.is_finite() { rounded } else { value }
            }
            None => value,
        }
    }
}

impl Field for NumberField {
    fn validate(&self, input: &Value) -> Result<Value, ValidationError> {
        let value = CONVERTER.convert(&self.allow, self, input)?;

        if value.is_null() && self.empty {
            return Ok(Value::Null);
        }

        let Value::Number(n) = value else {
            return Err(type_error());
        };
        if !n.is_finite() {
            return Err(type_error());
        }

        self.choices.test(&Value::Number(n))?;

        let n = self.round(n);
        self.range.test(n)?;

        Ok(Value::Number(n))
    }

    fn serialize(&self) -> serde_json::Value {
        let mut out = json!({
            "empty": self.empty,
            "allowTypes": self.allow.serialize(),
        });
        let map = out.as_object_mut().expect("serialize root is an object");
        if let Some(min) = self.range.min() {
            map.insert("min".into(), crate::value::json_number(min.value));
            if !min.inclusive {
                map.insert("minExclusive".into(), json!(true));
            }
        }
        if let Some(max) = self.range.max() {
            map.insert("max".into(), crate::value::json_number(max.value));
            if !max.inclusive {
                map.insert("maxExclusive".into(), json!(true));
            }
        }
        if let Some(choices) = self.choices.values() {
            map.insert("choices".into(), json!(choices));
        }
        if let Some(precision) = self.precision {
            map.insert("precision".into(), json!(precision));
        }
        out
    }
}

/// Builder for [`NumberField`].
#[derive(Debug, Clone, Default)]
pub struct NumberBuilder {
    empty: bool,
    allow: AllowSet,
    choices: Option<Vec<Value>>,
    min: Option<Bound>,
    max: Option<Bound>,
    precision: Option<u32>,
}

impl NumberBuilder {
    /// Treats "no value" (and blank string input) as valid.
    #[must_use]
    pub fn empty(mut self, empty: bool) -> Self {
        self.empty = empty;
        self
    }

    #[must_use]
    pub fn min(mut self, min: impl Into<Bound>) -> Self {
        self.min = Some(min.into());
        self
    }

    #[must_use]
    pub fn max(mut self, max: impl Into<Bound>) -> Self {
        self.max = Some(max.into());
        self
    }

    /// Maximum number of decimal places; cleaned values are rounded to it.
    #[must_use]
    pub fn precision(mut self, precision: u32) -> Self {
        self.precision = Some(precision);
        self
    }

    #[must_use]
    pub fn allow(mut self, kind: Kind) -> Self {
        self.allow.insert(kind);
        self
    }

    #[must_use]
    pub fn allow_all(mut self) -> Self {
        self.allow.insert_all();
        self
    }

    #[must_use]
    pub fn choices<I, T>(mut self, choices: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        self.choices = Some(choices.into_iter().map(Into::into).collect());
        self
    }

    pub fn build(self) -> Result<NumberField, ConfigError> {
        let mut range = Range::new();
        if let Some(min) = self.min {
            range.set_min(min)?;
        }
        if let Some(max) = self.max {
            range.set_max(max)?;
        }

        let mut choices = Choices::unset();
        if let Some(values) = self.choices {
            choices.set(values)?;
        }

        Ok(NumberField {
            empty: self.empty,
            allow: self.allow,
            choices,
            range,
            precision: self.precision,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn number() -> NumberBuilder {
        NumberField::builder()
    }

    #[rstest]
    #[case(1.0)]
    #[case(-1.0)]
    #[case(0.0)]
    #[case(1.5)]
    fn plain_numbers_are_valid(#[case] input: f64) {
        let field = number().build().unwrap();
        assert_eq!(field.clean(input).unwrap(), Some(input));
    }

    #[rstest]
    #[case(Value::from("1"))]
    #[case(Value::Bool(true))]
    #[case(Value::Null)]
    #[case(Value::Array(vec![]))]
    fn foreign_types_fail_without_allow(#[case] input: Value) {
        let field = number().build().unwrap();
        assert!(matches!(
            field.validate(&input),
            Err(ValidationError::Type(_))
        ));
    }

    #[test]
    fn nan_and_infinity_are_rejected() {
        let field = number().build().unwrap();
        assert!(field.validate(&Value::Number(f64::NAN)).is_err());
        assert!(field.validate(&Value::Number(f64::INFINITY)).is_err());
    }

    #[rstest]
    #[case("1", 1.0)]
    #[case("-1", -1.0)]
    #[case("1.5", 1.5)]
    #[case("1.", 1.0)]
    #[case(".1", 0.1)]
    #[case("-.5", -0.5)]
    #[case("00100", 100.0)]
    #[case("1.50", 1.5)]
    #[case("123, 000", 123_000.0)]
    #[case("$1,234.50", 1234.5)]
    #[case("1e3", 13.0)]
    fn string_coercion(#[case] input: &str, #[case] expected: f64) {
        let field = number().allow(Kind::String).build().unwrap();
        assert_eq!(field.clean(input).unwrap(), Some(expected));
    }

    #[rstest]
    #[case(".")]
    #[case("-")]
    #[case("-.")]
    #[case("1.2.3")]
    #[case("1-2")]
    #[case("--1")]
    fn malformed_strings_fail(#[case] input: &str) {
        let field = number().allow(Kind::String).build().unwrap();
        assert!(matches!(
            field.validate(&Value::from(input)),
            Err(ValidationError::Type(_))
        ));
    }

    #[test]
    fn unrepresentable_integer_string_fails() {
        let field = number().allow(Kind::String).build().unwrap();
        let err = field.validate(&Value::from("9007199254740993")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "number is too large or has too many decimal places"
        );
    }

    #[test]
    fn blank_string_needs_empty() {
        let strict = number().allow(Kind::String).build().unwrap();
        assert!(matches!(
            strict.validate(&Value::from("")),
            Err(ValidationError::Required(_))
        ));

        let lenient = number().allow(Kind::String).empty(true).build().unwrap();
        assert_eq!(lenient.clean("").unwrap(), None);
        assert_eq!(lenient.clean("  $ ").unwrap(), None);
    }

    #[rstest]
    #[case(Value::Bool(true), 1.0)]
    #[case(Value::Bool(false), 0.0)]
    fn boolean_coercion(#[case] input: Value, #[case] expected: f64) {
        let field = number().allow(Kind::Boolean).build().unwrap();
        assert_eq!(field.clean(input).unwrap(), Some(expected));
    }

    #[rstest]
    #[case(0.9, false)]
    #[case(1.0, true)]
    #[case(5.0, true)]
    #[case(10.0, true)]
    #[case(10.1, false)]
    fn inclusive_range(#[case] input: f64, #[case] valid: bool) {
        let field = number().min(1.0).max(10.0).build().unwrap();
        assert_eq!(field.validate(&Value::Number(input)).is_ok(), valid);
    }

    #[rstest]
    #[case(1.0, false)]
    #[case(1.001, true)]
    #[case(9.999, true)]
    #[case(10.0, false)]
    fn exclusive_range(#[case] input: f64, #[case] valid: bool) {
        let field = number()
            .min(Bound::exclusive(1.0))
            .max(Bound::exclusive(10.0))
            .build()
            .unwrap();
        assert_eq!(field.validate(&Value::Number(input)).is_ok(), valid);
    }

    #[test]
    fn range_message_without_units() {
        let field = number().min(18).build().unwrap();
        let err = field.validate(&Value::Number(17.0)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Please enter a value that is at least 18 (currently 17)"
        );
    }

    #[test]
    fn inverted_range_fails_configuration() {
        assert_eq!(
            number().min(2.0).max(1.0).build().unwrap_err(),
            ConfigError::InvertedRange
        );
    }

    #[rstest]
    #[case(1.234, 2, 1.23)]
    #[case(1.25, 1, 1.3)]
    #[case(-1.25, 1, -1.3)]
    #[case(0.5, 0, 1.0)]
    #[case(1.0, 2, 1.0)]
    fn precision_rounds_half_away_from_zero(
        #[case] input: f64,
        #[case] precision: u32,
        #[case] expected: f64,
    ) {
        let field = number().precision(precision).build().unwrap();
        assert_eq!(field.clean(input).unwrap(), Some(expected));
    }

    #[test]
    fn string_precision_truncates_before_parsing() {
        let field = number()
            .allow(Kind::String)
            .precision(2)
            .build()
            .unwrap();
        assert_eq!(field.clean("1.239").unwrap(), Some(1.23));
    }

    #[test]
    fn range_applies_after_rounding() {
        let field = number().precision(0).max(10).build().unwrap();
        assert_eq!(field.clean(10.4).unwrap(), Some(10.0));
        assert!(field.validate(&Value::Number(10.6)).is_err());
    }

    #[rstest]
    #[case(1.0, true)]
    #[case(2.5, true)]
    #[case(3.0, false)]
    fn choices(#[case] input: f64, #[case] valid: bool) {
        let field = number().choices([1.0, 2.5]).build().unwrap();
        assert_eq!(field.validate(&Value::Number(input)).is_ok(), valid);
    }

    #[test]
    fn choice_error_lists_values() {
        let field = number().choices([1, 2, 3]).build().unwrap();
        let err = field.validate(&Value::Number(4.0)).unwrap_err();
        assert_eq!(err.to_string(), "value must be one of 1, 2 or 3");
    }

    #[test]
    fn serialization_includes_configured_keys() {
        let field = number()
            .empty(true)
            .min(1)
            .max(10)
            .precision(2)
            .build()
            .unwrap();
        assert_eq!(
            field.serialize(),
            serde_json::json!({
                "empty": true,
                "allowTypes": [],
                "min": 1,
                "max": 10,
                "precision": 2,
            })
        );
    }
}
