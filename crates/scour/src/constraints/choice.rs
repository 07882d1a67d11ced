//! Membership checks against an optional fixed set of allowed values.

use crate::core::error::{ConfigError, ValidationError};
use crate::value::Value;

/// An optional non-empty set of acceptable values of the field's target
/// type. Unset choices make [`Choices::test`] a no-op.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Choices {
    values: Option<Vec<Value>>,
}

impl Choices {
    #[must_use]
    pub fn unset() -> Self {
        Self::default()
    }

    /// Replaces the choice set. An empty list is a configuration error;
    /// callers normalize a single value to a one-element list.
    pub fn set(&mut self, values: Vec<Value>) -> Result<(), ConfigError> {
        if values.is_empty() {
            return Err(ConfigError::EmptyChoices);
        }
        self.values = Some(values);
        Ok(())
    }

    #[must_use]
    pub fn values(&self) -> Option<&[Value]> {
        self.values.as_deref()
    }

    /// Fails with a choice error when a set is configured and `value` is
    /// not a member.
    pub fn test(&self, value: &Value) -> Result<(), ValidationError> {
        let Some(values) = &self.values else {
            return Ok(());
        };

        if values.contains(value) {
            return Ok(());
        }

        Err(ValidationError::Choice(format!(
            "value must be one of {}",
            comma_list(values)
        )))
    }
}

/// Joins values as "a, b or c".
fn comma_list(items: &[Value]) -> String {
    match items {
        [] => String::new(),
        [only] => only.to_string(),
        [head @ .., last] => {
            let head = head
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            format!("{head} or {last}")
        }
    }
}
