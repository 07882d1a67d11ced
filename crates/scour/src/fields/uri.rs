//! URI field: string validation plus a URI format check.

use serde_json::json;

use crate::core::error::{ConfigError, ValidationError};
use crate::core::traits::Field;
use crate::fields::string::{StringBuilder, StringField, StringTransform};
use crate::formats::host::HostKind;
use crate::formats::uri::{UriOptions, is_uri};
use crate::value::Value;

/// Validates a URI.
#[derive(Debug, Clone)]
pub struct UriField {
    inner: StringField,
    options: UriOptions,
}

impl UriField {
    #[must_use]
    pub fn builder() -> UriBuilder {
        UriBuilder::default()
    }

    pub fn clean(&self, input: impl Into<Value>) -> Result<Option<String>, ValidationError> {
        match self.validate(&input.into())? {
            Value::String(s) => Ok(Some(s)),
            _ => Ok(None),
        }
    }
}

impl Field for UriField {
    fn validate(&self, input: &Value) -> Result<Value, ValidationError> {
        let value = self.inner.validate(input)?;
        let Value::String(s) = &value else {
            return Ok(value);
        };
        if !is_uri(s, &self.options) {
            return Err(ValidationError::Format("Please enter a valid uri".into()));
        }
        Ok(value)
    }

    fn serialize(&self) -> serde_json::Value {
        let mut out = self.inner.serialize();
        let map = out.as_object_mut().expect("serialize root is an object");
        map.insert("allow".into(), json!(self.options.host_kinds));
        if let Some(protocols) = &self.options.protocols {
            map.insert("allowedProtocols".into(), json!(protocols));
        }
        if self.options.protocol_optional {
            map.insert("protocolOptional".into(), json!(true));
        }
        out
    }
}

/// Builder for [`UriField`]. Hosts default to any kind; any scheme is
/// accepted unless an allow list is given.
#[derive(Debug, Clone, Default)]
pub struct UriBuilder {
    string: StringBuilder,
    options: UriOptions,
}

impl UriBuilder {
    #[must_use]
    pub fn empty(mut self, empty: bool) -> Self {
        self.string = self.string.empty(empty);
        self
    }

    #[must_use]
    pub fn max_length(mut self, max: usize) -> Self {
        self.string = self.string.max_length(max);
        self
    }

    #[must_use]
    pub fn transform(mut self, transform: StringTransform) -> Self {
        self.string = self.string.transform(transform);
        self
    }

    /// Restricts accepted schemes.
    #[must_use]
    pub fn protocols(mut self, protocols: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.options.protocols = Some(protocols.into_iter().map(Into::into).collect());
        self
    }

    /// Accepts URIs with no scheme.
    #[must_use]
    pub fn protocol_optional(mut self) -> Self {
        self.options.protocol_optional = true;
        self
    }

    /// Replaces the host kinds accepted for the authority.
    #[must_use]
    pub fn hosts(mut self, kinds: impl IntoIterator<Item = HostKind>) -> Self {
        self.options.host_kinds = kinds.into_iter().collect();
        self
    }

    pub fn build(self) -> Result<UriField, ConfigError> {
        Ok(UriField {
            inner: self.string.build()?,
            options: self.options,
        })
    }
}
