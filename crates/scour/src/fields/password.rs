//! Password field: string validation plus character-class requirements.

use serde_json::json;

use crate::core::error::{ConfigError, ValidationError};
use crate::core::traits::Field;
use crate::fields::string::{StringBuilder, StringField};
use crate::value::Value;

const SYMBOLS: &str = "`~!@#$%^&*()+=:;'\"<>/?_-";

fn requirement_error(what: &str, escape: Option<usize>) -> ValidationError {
    let alternative = match escape {
        Some(length) => format!(" or make your password at least {length}"),
        None => String::new(),
    };
    ValidationError::Format(format!("Please enter {what}{alternative}"))
}

/// Validates a password against toggleable character-class requirements.
#[derive(Debug, Clone, PartialEq)]
pub struct PasswordField {
    inner: StringField,
    require_upper_case: bool,
    require_lower_case: bool,
    require_number: bool,
    require_symbol: bool,
    ignore_requirements_if_length_is_at_least: Option<usize>,
}

impl PasswordField {
    #[must_use]
    pub fn builder() -> PasswordBuilder {
        PasswordBuilder::default()
    }

    pub fn clean(&self, input: impl Into<Value>) -> Result<Option<String>, ValidationError> {
        match self.validate(&input.into())? {
            Value::String(s) => Ok(Some(s)),
            _ => Ok(None),
        }
    }
}

impl Field for PasswordField {
    fn validate(&self, input: &Value) -> Result<Value, ValidationError> {
        let value = self.inner.validate(input)?;
        let Value::String(s) = &value else {
            return Ok(value);
        };

        let escape = self.ignore_requirements_if_length_is_at_least;
        if let Some(length) = escape
            && s.chars().count() >= length
        {
            return Ok(value);
        }

        if self.require_upper_case && !s.chars().any(|c| c.is_ascii_uppercase()) {
            return Err(requirement_error("a capital letter (such as A)", escape));
        }
        if self.require_lower_case && !s.chars().any(|c| c.is_ascii_lowercase()) {
            return Err(requirement_error("a lower case letter (such as a)", escape));
        }
        if self.require_number && !s.chars().any(|c| c.is_ascii_digit()) {
            return Err(requirement_error("a number (such as 0)", escape));
        }
        if self.require_symbol && !s.chars().any(|c| SYMBOLS.contains(c)) {
            return Err(requirement_error("a symbol (such as #)", escape));
        }

        Ok(value)
    }

    fn serialize(&self) -> serde_json::Value {
        let mut out = self.inner.serialize();
        let map = out.as_object_mut().expect("serialize root is an object");
        map.insert("requireUpperCase".into(), json!(self.require_upper_case));
        map.insert("requireLowerCase".into(), json!(self.require_lower_case));
        map.insert("requireNumber".into(), json!(self.require_number));
        map.insert("requireSymbol".into(), json!(self.require_symbol));
        if let Some(length) = self.ignore_requirements_if_length_is_at_least {
            map.insert("ignoreRequirementsIfLengthIsAtLeast".into(), json!(length));
        }
        out
    }
}

/// Builder for [`PasswordField`]. All class requirements start disabled.
#[derive(Debug, Clone, Default)]
pub struct PasswordBuilder {
    string: StringBuilder,
    require_upper_case: bool,
    require_lower_case: bool,
    require_number: bool,
    require_symbol: bool,
    ignore_requirements_if_length_is_at_least: Option<usize>,
}

impl PasswordBuilder {
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
        self.string = self.string.max_length(max);
        self
    }

    #[must_use]
    pub fn require_upper_case(mut self) -> Self {
        self.require_upper_case = true;
        self
    }

    #[must_use]
    pub fn require_lower_case(mut self) -> Self {
        self.require_lower_case = true;
        self
    }

    #[must_use]
    pub fn require_number(mut self) -> Self {
        self.require_number = true;
        self
    }

    #[must_use]
    pub fn require_symbol(mut self) -> Self {
        self.require_symbol = true;
        self
    }

    /// Length at or beyond which all class requirements are waived.
    #[must_use]
    pub fn ignore_requirements_if_length_is_at_least(mut self, length: usize) -> Self {
        self.ignore_requirements_if_length_is_at_least = Some(length);
        self
    }

    pub fn build(self) -> Result<PasswordField, ConfigError> {
        Ok(PasswordField {
            inner: self.string.build()?,
            require_upper_case: self.require_upper_case,
            require_lower_case: self.require_lower_case,
            require_number: self.require_number,
            require_symbol: self.require_symbol,
            ignore_requirements_if_length_is_at_least: self
                .ignore_requirements_if_length_is_at_least,
        })
    }
}
