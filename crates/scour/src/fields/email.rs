//! Email field: string validation plus an address format check.

use serde_json::json;

use crate::core::error::{ConfigError, ValidationError};
use crate::core::traits::Field;
use crate::fields::string::{StringBuilder, StringField, StringTransform};
use crate::formats::email::{MAX_EMAIL_LENGTH, is_email};
use crate::formats::host::HostKind;
use crate::value::Value;

/// Validates an email address.
#[derive(Debug, Clone, PartialEq)]
pub struct EmailField {
    inner: StringField,
    kinds: Vec<HostKind>,
}

impl EmailField {
    #[must_use]
    pub fn builder() -> EmailBuilder {
        EmailBuilder::default()
    }

    pub fn clean(&self, input: impl Into<Value>) -> Result<Option<String>, ValidationError> {
        match self.validate(&input.into())? {
            Value::String(s) => Ok(Some(s)),
            _ => Ok(None),
        }
    }
}

impl Field for EmailField {
    fn validate(&self, input: &Value) -> Result<Value, ValidationError> {
        let value = self.inner.validate(input)?;
        let Value::String(s) = &value else {
            return Ok(value);
        };
        if !is_email(s, &self.kinds) {
            return Err(ValidationError::Format("Please enter a valid email".into()));
        }
        Ok(value)
    }

    fn serialize(&self) -> serde_json::Value {
        let mut out = self.inner.serialize();
        out.as_object_mut()
            .expect("serialize root is an object")
            .insert("allow".into(), json!(self.kinds));
        out
    }
}

/// Builder for [`EmailField`]. The length limit defaults to the combined
/// local-part and domain maximums; domains default to names only.
#[derive(Debug, Clone)]
pub struct EmailBuilder {
    string: StringBuilder,
    max_length: Option<usize>,
    kinds: Vec<HostKind>,
}

impl Default for EmailBuilder {
    fn default() -> Self {
        Self {
            string: StringBuilder::default(),
            max_length: None,
            kinds: vec![HostKind::Domain],
        }
    }
}

impl EmailBuilder {
    #[must_use]
    pub fn empty(mut self, empty: bool) -> Self {
        self.string = self.string.empty(empty);
        self
    }

    #[must_use]
    pub fn max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    #[must_use]
    pub fn transform(mut self, transform: StringTransform) -> Self {
        self.string = self.string.transform(transform);
        self
    }

    /// Replaces the host kinds accepted for the domain part.
    #[must_use]
    pub fn hosts(mut self, kinds: impl IntoIterator<Item = HostKind>) -> Self {
        self.kinds = kinds.into_iter().collect();
        self
    }

    pub fn build(self) -> Result<EmailField, ConfigError> {
        let inner = self
            .string
            .max_length(self.max_length.unwrap_or(MAX_EMAIL_LENGTH))
            .build()?;
        Ok(EmailField {
            inner,
            kinds: self.kinds,
        })
    }
}
