//! # scour
//!
//! Declarative validation and coercion for untrusted data.
//!
//! Build a schema of field validators, hand it an arbitrary value, and get
//! back either a cleaned, coerced value or a structured per-field error
//! report.
//!
//! ## Quick Start
//!
//! ```rust
//! use scour::prelude::*;
//!
//! let schema = object()
//!     .field("name", string().transform(StringTransform::Trim).build()?)
//!     .field("age", number().allow(Kind::String).min(0).build()?)
//!     .build()?;
//!
//! let cleaned = schema.validate(&Value::from(serde_json::json!({
//!     "name": " Bart Simpson ",
//!     "age": "10",
//! })))?;
//! assert_eq!(cleaned.as_object().unwrap()["age"], Value::Number(10.0));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Built-in Fields
//!
//! - **Scalars**: [`StringField`](fields::StringField),
//!   [`NumberField`](fields::NumberField),
//!   [`BooleanField`](fields::BooleanField), [`DateField`](fields::DateField)
//! - **Composite**: [`ObjectField`](fields::ObjectField) with nested
//!   schemas, additional-field policies, and cross-field checks
//! - **Patterns**: [`DomainField`](fields::DomainField),
//!   [`EmailField`](fields::EmailField), [`UriField`](fields::UriField),
//!   [`PasswordField`](fields::PasswordField)
//!
//! Validation either propagates a [`ValidationError`] or, through
//! [`check`], reports pass/fail as plain data.

pub mod constraints;
pub mod core;
pub mod fields;
pub mod formats;
pub mod prelude;
pub mod value;

pub use crate::core::error::{ConfigError, ErrorTree, ValidationError, WHOLE_OBJECT};
pub use crate::core::traits::{Field, Outcome, check};
pub use value::{Kind, Value};

use fields::{
    BooleanBuilder, DateBuilder, DomainBuilder, EmailBuilder, NumberBuilder, ObjectBuilder,
    PasswordBuilder, StringBuilder, UriBuilder,
};

/// Starts a string field.
#[must_use]
pub fn string() -> StringBuilder {
    StringBuilder::default()
}

/// Starts a number field.
#[must_use]
pub fn number() -> NumberBuilder {
    NumberBuilder::default()
}

/// Starts a boolean field.
#[must_use]
pub fn boolean() -> BooleanBuilder {
    BooleanBuilder::default()
}

/// Starts a date field.
#[must_use]
pub fn date() -> DateBuilder {
    DateBuilder::default()
}

/// Starts an object field.
#[must_use]
pub fn object() -> ObjectBuilder {
    ObjectBuilder::default()
}

/// Starts a domain-name field.
#[must_use]
pub fn domain() -> DomainBuilder {
    DomainBuilder::default()
}

/// Starts an email field.
#[must_use]
pub fn email() -> EmailBuilder {
    EmailBuilder::default()
}

/// Starts a URI field.
#[must_use]
pub fn uri() -> UriBuilder {
    UriBuilder::default()
}

/// Starts a password field.
#[must_use]
pub fn password() -> PasswordBuilder {
    PasswordBuilder::default()
}
