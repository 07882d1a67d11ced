//! Date field validator.
//!
//! Validation order: convert type, emptiness shortcut, type check, choice
//! test, range, now-relative bounds. Dates compare by instant: two inputs
//! with the same epoch millisecond are the same value, whatever their
//! source representation.

use chrono::{DateTime, NaiveDate, Utc};
use serde_json::json;

use crate::constraints::{AllowSet, Bound, Choices, Conversion, Converter, Range};
use crate::core::error::{ConfigError, ValidationError};
use crate::core::traits::Field;
use crate::value::{Kind, Value};

fn type_error() -> ValidationError {
    ValidationError::Type("Value must be a date".into())
}

/// Accepts RFC 3339 timestamps and bare `YYYY-MM-DD` dates (taken as
/// midnight UTC). Anything else passes through to the type check.
fn from_string(_: &DateField, value: &Value) -> Result<Value, ValidationError> {
    let Value::String(s) = value else {
        return Ok(value.clone());
    };
    let s = s.trim();
    if s.is_empty() {
        return Ok(Value::Null);
    }
    if let Ok(instant) = DateTime::parse_from_rfc3339(s) {
        return Ok(Value::Date(instant.with_timezone(&Utc)));
    }
    if let Ok(day) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(Value::Date(day.and_hms_opt(0, 0, 0).unwrap_or_default().and_utc()));
    }
    Ok(value.clone())
}

/// Epoch milliseconds.
fn from_number(_: &DateField, value: &Value) -> Result<Value, ValidationError> {
    let Value::Number(n) = value else {
        return Ok(value.clone());
    };
    match DateTime::from_timestamp_millis(*n as i64) {
        Some(instant) if n.is_finite() => Ok(Value::Date(instant)),
        _ => Err(type_error()),
    }
}

const CONVERSIONS: &[(Kind, Conversion<DateField>)] = &[
    (Kind::String, from_string),
    (Kind::Number, from_number),
];

const CONVERTER: Converter<DateField> = Converter::new(Kind::Date, CONVERSIONS);

fn epoch_millis(instant: DateTime<Utc>) -> f64 {
    instant.timestamp_millis() as f64
}

/// Validates and cleans date input.
#[derive(Debug, Clone, PartialEq)]
pub struct DateField {
    empty: bool,
    allow: AllowSet,
    choices: Choices,
    range: Range,
    no_future: bool,
    no_past: bool,
}

impl DateField {
    #[must_use]
    pub fn builder() -> DateBuilder {
        DateBuilder::default()
    }

    /// Typed convenience wrapper: `None` is the cleaned "no value" state.
    pub fn clean(&self, input: impl Into<Value>) -> Result<Option<DateTime<Utc>>, ValidationError> {
        match self.validate(&input.into())? {
            Value::Date(instant) => Ok(Some(instant)),
            _ => Ok(None),
        }
    }
}

impl Field for DateField {
    fn validate(&self, input: &Value) -> Result<Value, ValidationError> {
        let value = CONVERTER.convert(&self.allow, self, input)?;

        if value.is_null() && self.empty {
            return Ok(Value::Null);
        }

        let Value::Date(instant) = value else {
            return Err(type_error());
        };

        self.choices.test(&Value::Date(instant))?;
        self.range.test(epoch_millis(instant))?;

        // Strict comparison against now: an instant equal to the
        // validation-time clock fails either bound.
        let now = Utc::now();
        if self.no_future && instant >= now {
            return Err(ValidationError::Range(
                "Value cannot be in the future".into(),
            ));
        }
        if self.no_past && instant <= now {
            return Err(ValidationError::Range("Value cannot be in the past".into()));
        }

        Ok(Value::Date(instant))
    }

    fn serialize(&self) -> serde_json::Value {
        let mut out = json!({
            "empty": self.empty,
            "allowTypes": self.allow.serialize(),
        });
        let map = out.as_object_mut().expect("serialize root is an object");
        if let Some(min) = self.range.min() {
            map.insert("min".into(), json!(render_millis(min.value)));
            if !min.inclusive {
                map.insert("minExclusive".into(), json!(true));
            }
        }
        if let Some(max) = self.range.max() {
            map.insert("max".into(), json!(render_millis(max.value)));
            if !max.inclusive {
                map.insert("maxExclusive".into(), json!(true));
            }
        }
        if let Some(choices) = self.choices.values() {
            map.insert("choices".into(), json!(choices));
        }
        if self.no_future {
            map.insert("noFuture".into(), json!(true));
        }
        if self.no_past {
            map.insert("noPast".into(), json!(true));
        }
        out
    }
}

fn render_millis(millis: f64) -> String {
    DateTime::from_timestamp_millis(millis as i64)
        .unwrap_or_default()
        .format("%Y-%m-%dT%H:%M:%S%.3fZ")
        .to_string()
}

/// One end of a date range: an instant plus its inclusivity.
///
/// A bare [`DateTime<Utc>`] converts to an inclusive bound; pair it with
/// `false` for an exclusive one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DateBound {
    pub instant: DateTime<Utc>,
    pub inclusive: bool,
}

impl From<DateTime<Utc>> for DateBound {
    fn from(instant: DateTime<Utc>) -> Self {
        Self {
            instant,
            inclusive: true,
        }
    }
}

impl From<(DateTime<Utc>, bool)> for DateBound {
    fn from((instant, inclusive): (DateTime<Utc>, bool)) -> Self {
        Self { instant, inclusive }
    }
}

/// Builder for [`DateField`].
#[derive(Debug, Clone, Default)]
pub struct DateBuilder {
    empty: bool,
    allow: AllowSet,
    choices: Option<Vec<DateTime<Utc>>>,
    min: Option<DateBound>,
    max: Option<DateBound>,
    no_future: bool,
    no_past: bool,
}

impl DateBuilder {
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

    /// Earliest acceptable instant.
    #[must_use]
    pub fn min(mut self, min: impl Into<DateBound>) -> Self {
        self.min = Some(min.into());
        self
    }

    /// Latest acceptable instant.
    #[must_use]
    pub fn max(mut self, max: impl Into<DateBound>) -> Self {
        self.max = Some(max.into());
        self
    }

    #[must_use]
    pub fn choices(mut self, choices: impl IntoIterator<Item = DateTime<Utc>>) -> Self {
        self.choices = Some(choices.into_iter().collect());
        self
    }

    /// Rejects instants at or after validation-time "now".
    #[must_use]
    pub fn no_future(mut self) -> Self {
        self.no_future = true;
        self
    }

    /// Rejects instants at or before validation-time "now".
    #[must_use]
    pub fn no_past(mut self) -> Self {
        self.no_past = true;
        self
    }

    pub fn build(self) -> Result<DateField, ConfigError> {
        let mut range = Range::new();
        if let Some(min) = self.min {
            range.set_min(Bound::new(epoch_millis(min.instant), min.inclusive))?;
        }
        if let Some(max) = self.max {
            range.set_max(Bound::new(epoch_millis(max.instant), max.inclusive))?;
        }

        let mut choices = Choices::unset();
        if let Some(values) = self.choices {
            choices.set(values.into_iter().map(Value::Date).collect())?;
        }

        Ok(DateField {
            empty: self.empty,
            allow: self.allow,
            choices,
            range,
            no_future: self.no_future,
            no_past: self.no_past,
        })
    }
}
