//! Domain-name field: string validation plus a hostname/IP format check.

use serde_json::json;

use crate::core::error::{ConfigError, ValidationError};
use crate::core::traits::Field;
use crate::fields::string::{StringBuilder, StringField, StringTransform};
use crate::formats::host::{HostKind, MAX_DOMAIN_LENGTH, is_host};
use crate::value::Value;

/// Validates a hostname or IP literal.
#[derive(Debug, Clone, PartialEq)]
pub struct DomainField {
    inner: StringField,
    kinds: Vec<HostKind>,
}

impl DomainField {
    #[must_use]
    pub fn builder() -> DomainBuilder {
        DomainBuilder::default()
    }

    pub fn clean(&self, input: impl Into<Value>) -> Result<Option<String>, ValidationError> {
        match self.validate(&input.into())? {
            Value::String(s) => Ok(Some(s)),
            _ => Ok(None),
        }
    }
}

impl Field for DomainField {
    fn validate(&self, input: &Value) -> Result<Value, ValidationError> {
        let value = self.inner.validate(input)?;
        // A cleaned "no value" skips the format check.
        let Value::String(s) = &value else {
            return Ok(value);
        };
        if !is_host(s, &self.kinds) {
            return Err(ValidationError::Format("Please enter a valid domain".into()));
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

/// Builder for [`DomainField`]. The length limit defaults to the RFC 1035
/// maximum; the acceptable host kinds default to domain names only.
#[derive(Debug, Clone)]
pub struct DomainBuilder {
    string: StringBuilder,
    max_length: Option<usize>,
    kinds: Vec<HostKind>,
}

impl Default for DomainBuilder {
    fn default() -> Self {
        Self {
            string: StringBuilder::default(),
            max_length: None,
            kinds: vec![HostKind::Domain],
        }
    }
}

impl DomainBuilder {
    #[must_use]
    pub fn empty(mut self, empty: bool) -> Self {
        self.string = self.string.empty(empty);
        self
    }

    #[must_use]
    pub fn min_length(mut self, min: usize) -> Self {
        self.string = self.string.min_length(min);
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

    /// Replaces the accepted host kinds.
    #[must_use]
    pub fn hosts(mut self, kinds: impl IntoIterator<Item = HostKind>) -> Self {
        self.kinds = kinds.into_iter().collect();
        self
    }

    pub fn build(self) -> Result<DomainField, ConfigError> {
        let inner = self
            .string
            .max_length(self.max_length.unwrap_or(MAX_DOMAIN_LENGTH))
            .build()?;
        Ok(DomainField {
            inner,
            kinds: self.kinds,
        })
    }
}
