//! The field validators.
//!
//! Scalars first (string, number, boolean, date), then the object
//! validator, then the domain-pattern fields layered over the string
//! validator.

pub mod boolean;
pub mod date;
pub mod domain;
pub mod email;
pub mod number;
pub mod object;
pub mod password;
pub mod string;
pub mod uri;

pub use boolean::{BooleanBuilder, BooleanField};
pub use date::{DateBound, DateBuilder, DateField};
pub use domain::{DomainBuilder, DomainField};
pub use email::{EmailBuilder, EmailField};
pub use number::{NumberBuilder, NumberField};
pub use object::{AdditionalFields, FieldSpec, ObjectBuilder, ObjectField, ObjectState};
pub use password::{PasswordBuilder, PasswordField};
pub use string::{StringBuilder, StringField, StringTransform};
pub use uri::{UriBuilder, UriField};
