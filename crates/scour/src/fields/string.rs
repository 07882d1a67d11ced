//! String field validator.
//!
//! Validation order: convert type, type check, transforms, choice test,
//! emptiness test, length range. Trimming always precedes the (at most
//! one) case transform; a cleaned empty string becomes `Value::Null`.

use serde::Serialize;
use serde_json::json;

use crate::constraints::{AllowSet, Choices, Conversion, Converter, Range};
use crate::core::error::{ConfigError, ValidationError};
use crate::core::traits::Field;
use crate::value::{Kind, Value};

/// A single step of the string transform pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum StringTransform {
    Trim,
    TrimStart,
    TrimEnd,
    UpperCase,
    LowerCase,
    /// Capitalize the first letter of each word.
    Title,
    /// Capitalize the first letter only.
    UpperCaseFirst,
}

impl StringTransform {
    fn is_case_transform(self) -> bool {
        matches!(
            self,
            StringTransform::UpperCase
                | StringTransform::LowerCase
                | StringTransform::Title
                | StringTransform::UpperCaseFirst
        )
    }
}

fn from_number(_: &StringField, value: &Value) -> Result<Value, ValidationError> {
    Ok(Value::String(value.to_string()))
}

fn from_boolean(_: &StringField, value: &Value) -> Result<Value, ValidationError> {
    Ok(Value::String(value.to_string()))
}

const CONVERSIONS: &[(Kind, Conversion<StringField>)] = &[
    (Kind::Number, from_number),
    (Kind::Boolean, from_boolean),
];

const CONVERTER: Converter<StringField> = Converter::new(Kind::String, CONVERSIONS);

/// Validates and cleans string input.
#[derive(Debug, Clone, PartialEq)]
pub struct StringField {
    empty: bool,
    allow: AllowSet,
    choices: Choices,
    range: Range,
    transforms: Vec<StringTransform>,
    trim_start: bool,
    trim_end: bool,
    case: Option<StringTransform>,
}

impl StringField {
    #[must_use]
    pub fn builder() -> StringBuilder {
        StringBuilder::default()
    }

    /// Typed convenience wrapper: `None` is the cleaned "no value" state.
    pub fn clean(&self, input: impl Into<Value>) -> Result<Option<String>, ValidationError> {
        match self.validate(&input.into())? {
            Value::String(s) => Ok(Some(s)),
            _ => Ok(None),
        }
    }

    fn apply_transforms(&self, input: String) -> String {
        let mut value = input;
        if self.trim_start {
            value = value.trim_start().to_owned();
        }
        if self.trim_end {
            value = value.trim_end().to_owned();
        }
        match self.case {
            Some(StringTransform::UpperCase) => value.to_uppercase(),
            Some(StringTransform::LowerCase) => value.to_lowercase(),
            Some(StringTransform::Title) => title_case(&value),
            Some(StringTransform::UpperCaseFirst) => upper_case_first(&value),
            _ => value,
        }
    }
}

/// Uppercases the first letter of every whitespace-separated word, leaving
/// all other characters untouched.
fn title_case(input: &str) -> String {
    let mut at_word_start = true;
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        if ch.is_whitespace() {
            at_word_start = true;
            out.push(ch);
        } else if at_word_start {
            at_word_start = false;
            out.extend(ch.to_uppercase());
        } else {
            out.push(ch);
        }
    }
    out
}

/// Uppercases the first non-whitespace character only.
fn upper_case_first(input: &str) -> String {
    let mut done = false;
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        if !done && !ch.is_whitespace() {
            done = true;
            out.extend(ch.to_uppercase());
        } else {
            out.push(ch);
        }
    }
    out
}

impl Field for StringField {
    fn validate(&self, input: &Value) -> Result<Value, ValidationError> {
        let value = CONVERTER.convert(&self.allow, self, input)?;

        if value.is_null() && self.empty {
            return Ok(Value::Null);
        }

        let Value::String(s) = value else {
            return Err(ValidationError::Type("Value must be of type string".into()));
        };

        let s = self.apply_transforms(s);
        self.choices.test(&Value::String(s.clone()))?;

        if s.is_empty() && !self.empty {
            return Err(ValidationError::Required("Please enter a value".into()));
        }

        self.range.test(s.chars().count() as f64)?;

        Ok(if s.is_empty() {
            Value::Null
        } else {
            Value::String(s)
        })
    }

    fn serialize(&self) -> serde_json::Value {
        let mut out = json!({
            "empty": self.empty,
            "allowTypes": self.allow.serialize(),
        });
        let map = out.as_object_mut().expect("serialize root is an object");
        if let Some(min) = self.range.min() {
            map.insert("minLength".into(), json!(min.value as u64));
        }
        if let Some(max) = self.range.max() {
            map.insert("maxLength".into(), json!(max.value as u64));
        }
        if let Some(choices) = self.choices.values() {
            map.insert("choices".into(), json!(choices));
        }
        if !self.transforms.is_empty() {
            map.insert("transformString".into(), json!(self.transforms));
        }
        out
    }
}

/// Builder for [`StringField`]; `build` validates the whole configuration
/// before a field value exists.
#[derive(Debug, Clone, Default)]
pub struct StringBuilder {
    empty: bool,
    allow: AllowSet,
    choices: Option<Vec<Value>>,
    min_length: Option<usize>,
    max_length: Option<usize>,
    transforms: Vec<StringTransform>,
}

impl StringBuilder {
    /// Allows the empty string (cleaned to "no value").
    #[must_use]
    pub fn empty(mut self, empty: bool) -> Self {
        self.empty = empty;
        self
    }

    #[must_use]
    pub fn min_length(mut self, min: usize) -> Self {
        self.min_length = Some(min);
        self
    }

    #[must_use]
    pub fn max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    /// Permits coercion from a source kind.
    #[must_use]
    pub fn allow(mut self, kind: Kind) -> Self {
        self.allow.insert(kind);
        self
    }

    /// Permits coercion from every recognized source kind.
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

    /// A single acceptable value, normalized to a one-element choice set.
    #[must_use]
    pub fn choice(self, choice: impl Into<Value>) -> Self {
        self.choices([choice.into()])
    }

    /// Appends a transform to the pipeline.
    #[must_use]
    pub fn transform(mut self, transform: StringTransform) -> Self {
        self.transforms.push(transform);
        self
    }

    pub fn build(self) -> Result<StringField, ConfigError> {
        let mut range = Range::with_units("characters");
        if let Some(min) = self.min_length {
            range.set_min(min)?;
        }
        if let Some(max) = self.max_length {
            range.set_max(max)?;
        }

        let mut choices = Choices::unset();
        if let Some(values) = self.choices {
            choices.set(values)?;
        }

        let mut case = None;
        let mut trim_start = false;
        let mut trim_end = false;
        for transform in &self.transforms {
            match transform {
                StringTransform::Trim => {
                    trim_start = true;
                    trim_end = true;
                }
                StringTransform::TrimStart => trim_start = true,
                StringTransform::TrimEnd => trim_end = true,
                case_transform => {
                    if case.is_some() {
                        return Err(ConfigError::ConflictingCaseTransforms);
                    }
                    case = Some(*case_transform);
                }
            }
        }
        debug_assert!(case.is_none_or(StringTransform::is_case_transform));

        Ok(StringField {
            empty: self.empty,
            allow: self.allow,
            choices,
            range,
            transforms: self.transforms,
            trim_start,
            trim_end,
            case,
        })
    }
}
