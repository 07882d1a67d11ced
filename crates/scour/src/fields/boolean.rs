//! Boolean field validator.
//!
//! Validation order: convert type, emptiness shortcut, type check, choice
//! test. String coercion recognizes the usual yes/no vocabulary, matched
//! case-insensitively on the exact input; anything else is rejected inside
//! the conversion.

use serde_json::json;

use crate::constraints::{AllowSet, Choices, Conversion, Converter};
use crate::core::error::{ConfigError, ValidationError};
use crate::core::traits::Field;
use crate::value::{Kind, Value};

fn type_error() -> ValidationError {
    ValidationError::Type("Value must be of type boolean".into())
}

const TRUE_WORDS: &[&str] = &["yes", "true", "1", "t"];
const FALSE_WORDS: &[&str] = &["no", "false", "0", "f"];

fn from_string(field: &BooleanField, value: &Value) -> Result<Value, ValidationError> {
    let Value::String(s) = value else {
        return Ok(value.clone());
    };
    // No trimming: "  true " is not a boolean word.
    if field.empty && s.is_empty() {
        return Ok(Value::Null);
    }
    let word = s.to_lowercase();
    if TRUE_WORDS.contains(&word.as_str()) {
        return Ok(Value::Bool(true));
    }
    if FALSE_WORDS.contains(&word.as_str()) {
        return Ok(Value::Bool(false));
    }
    Err(ValidationError::Required("please enter a value".into()))
}

fn from_number(_: &BooleanField, value: &Value) -> Result<Value, ValidationError> {
    Ok(match value {
        Value::Number(n) => Value::Bool(*n != 0.0),
        other => other.clone(),
    })
}

const CONVERSIONS: &[(Kind, Conversion<BooleanField>)] = &[
    (Kind::String, from_string),
    (Kind::Number, from_number),
];

const CONVERTER: Converter<BooleanField> = Converter::new(Kind::Boolean, CONVERSIONS);

/// Validates and cleans boolean input.
#[derive(Debug, Clone, PartialEq)]
pub struct BooleanField {
    empty: bool,
    allow: AllowSet,
    choices: Choices,
}

impl BooleanField {
    #[must_use]
    pub fn builder() -> BooleanBuilder {
        BooleanBuilder::default()
    }

    /// Typed convenience wrapper: `None` is the cleaned "no value" state.
    pub fn clean(&self, input: impl Into<Value>) -> Result<Option<bool>, ValidationError> {
        match self.validate(&input.into())? {
            Value::Bool(b) => Ok(Some(b)),
            _ => Ok(None),
        }
    }
}

impl Field for BooleanField {
    fn validate(&self, input: &Value) -> Result<Value, ValidationError> {
        let value = CONVERTER.convert(&self.allow, self, input)?;

        if value.is_null() && self.empty {
            return Ok(Value::Null);
        }

        let Value::Bool(b) = value else {
            return Err(type_error());
        };

        self.choices.test(&Value::Bool(b))?;
        Ok(Value::Bool(b))
    }

    fn serialize(&self) -> serde_json::Value {
        let mut out = json!({
            "empty": self.empty,
            "allowTypes": self.allow.serialize(),
        });
        if let Some(choices) = self.choices.values() {
            out.as_object_mut()
                .expect("serialize root is an object")
                .insert("choices".into(), json!(choices));
        }
        out
    }
}

/// Builder for [`BooleanField`].
#[derive(Debug, Clone, Default)]
pub struct BooleanBuilder {
    empty: bool,
    allow: AllowSet,
    choices: Option<Vec<Value>>,
}

impl BooleanBuilder {
    #[must_use]
    pub fn empty(mut self, empty: bool) -> Self {
        self.empty = empty;
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

    /// Restricting a boolean to one choice turns it into a consent box.
    #[must_use]
    pub fn choices<I, T>(mut self, choices: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        self.choices = Some(choices.into_iter().map(Into::into).collect());
        self
    }

    pub fn build(self) -> Result<BooleanField, ConfigError> {
        let mut choices = Choices::unset();
        if let Some(values) = self.choices {
            choices.set(values)?;
        }
        Ok(BooleanField {
            empty: self.empty,
            allow: self.allow,
            choices,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn boolean() -> BooleanBuilder {
        BooleanField::builder()
    }

    #[rstest]
    #[case(true)]
    #[case(false)]
    fn plain_booleans_are_valid(#[case] input: bool) {
        let field = boolean().build().unwrap();
        assert_eq!(field.clean(input).unwrap(), Some(input));
    }

    #[rstest]
    #[case(Value::from("true"))]
    #[case(Value::Number(1.0))]
    #[case(Value::Null)]
    #[case(Value::Array(vec![]))]
    fn foreign_types_fail_without_allow(#[case] input: Value) {
        let field = boolean().build().unwrap();
        let err = field.validate(&input).unwrap_err();
        assert_eq!(err.to_string(), "Value must be of type boolean");
    }

    #[rstest]
    #[case("true", true)]
    #[case("t", true)]
    #[case("YES", true)]
    #[case("1", true)]
    #[case("false", false)]
    #[case("f", false)]
    #[case("No", false)]
    #[case("0", false)]
    fn string_coercion(#[case] input: &str, #[case] expected: bool) {
        let field = boolean().allow(Kind::String).build().unwrap();
        assert_eq!(field.clean(input).unwrap(), Some(expected));
    }

    #[rstest]
    #[case("maybe")]
    #[case("on")]
    #[case("2")]
    #[case("truthy")]
    #[case(" true ")]
    #[case("  ")]
    fn unrecognized_strings_fail(#[case] input: &str) {
        let field = boolean().allow(Kind::String).build().unwrap();
        let err = field.validate(&Value::from(input)).unwrap_err();
        assert_eq!(err.to_string(), "please enter a value");
    }

    #[test]
    fn blank_string_needs_empty() {
        let strict = boolean().allow(Kind::String).build().unwrap();
        let err = strict.validate(&Value::from("")).unwrap_err();
        assert_eq!(err.to_string(), "please enter a value");

        let lenient = boolean().allow(Kind::String).empty(true).build().unwrap();
        assert_eq!(lenient.clean("").unwrap(), None);
        // empty covers the empty string only, not whitespace.
        assert!(lenient.validate(&Value::from("  ")).is_err());
    }

    #[rstest]
    #[case(1.0, true)]
    #[case(2.0, true)]
    #[case(-1.0, true)]
    #[case(0.0, false)]
    fn nonzero_numbers_are_true(#[case] input: f64, #[case] expected: bool) {
        let field = boolean().allow(Kind::Number).build().unwrap();
        assert_eq!(field.clean(input).unwrap(), Some(expected));
    }

    #[test]
    fn consent_box_requires_true() {
        let field = boolean().choices([true]).build().unwrap();
        assert_eq!(field.clean(true).unwrap(), Some(true));
        let err = field.validate(&Value::Bool(false)).unwrap_err();
        assert_eq!(err.to_string(), "value must be one of true");
    }

    #[test]
    fn null_with_empty_passes() {
        let field = boolean().empty(true).build().unwrap();
        assert_eq!(field.clean(Value::Null).unwrap(), None);
    }

    #[test]
    fn serialization() {
        let field = boolean().empty(true).choices([true]).build().unwrap();
        assert_eq!(
            field.serialize(),
            serde_json::json!({
                "empty": true,
                "allowTypes": [],
                "choices": [true],
            })
        );
    }
}
