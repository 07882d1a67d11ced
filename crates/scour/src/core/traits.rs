//! The field-validator abstraction and the public entry points.

use serde_json::json;

use crate::core::error::{ErrorTree, ValidationError};
use crate::value::Value;

/// A field validator: given an arbitrary input value, produce a cleaned
/// value of the field's target type or fail with a [`ValidationError`].
///
/// The trait is object safe so heterogeneous schemas can hold
/// `Box<dyn Field>` per field name. Configuration is fixed once a field is
/// built; a validation pass only reads it.
pub trait Field: Send + Sync {
    /// Validates and coerces `input`, returning the cleaned value.
    ///
    /// This is the propagating form: callers who want a structured
    /// pass/fail report instead use [`check`].
    fn validate(&self, input: &Value) -> Result<Value, ValidationError>;

    /// The field's declared configuration as a plain JSON mapping.
    ///
    /// Contains exactly the declared configuration keys, with unset
    /// optional keys omitted; nested object fields serialize recursively.
    /// Introspection only — the validation algorithm never reads it.
    fn serialize(&self) -> serde_json::Value {
        json!({})
    }
}

impl<F: Field + ?Sized> Field for Box<F> {
    fn validate(&self, input: &Value) -> Result<Value, ValidationError> {
        (**self).validate(input)
    }

    fn serialize(&self) -> serde_json::Value {
        (**self).serialize()
    }
}

/// Structured result of a non-propagating validation call.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub success: bool,
    /// The cleaned value; `None` on failure.
    pub value: Option<Value>,
    /// The error report; `None` on success.
    pub errors: Option<ErrorTree>,
}

impl Outcome {
    /// Converts back to the propagating form.
    pub fn into_result(self) -> Result<Value, ErrorTree> {
        match self.value {
            Some(value) if self.success => Ok(value),
            _ => Err(self
                .errors
                .unwrap_or_else(|| ErrorTree::message("Validation failed"))),
        }
    }
}

/// Validates `input` against `field`, reporting failure as data instead of
/// an error value.
pub fn check<F: Field + ?Sized>(field: &F, input: impl Into<Value>) -> Outcome {
    match field.validate(&input.into()) {
        Ok(value) => Outcome {
            success: true,
            value: Some(value),
            errors: None,
        },
        Err(err) => Outcome {
            success: false,
            value: None,
            errors: Some(err.into_tree()),
        },
    }
}
