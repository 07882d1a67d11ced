//! Everything needed to declare a schema and validate against it.

pub use crate::core::error::{ConfigError, ErrorTree, ValidationError, WHOLE_OBJECT};
pub use crate::core::traits::{Field, Outcome, check};
pub use crate::fields::{
    AdditionalFields, BooleanField, DateBound, DateField, DomainField, EmailField, FieldSpec,
    NumberField, ObjectField, ObjectState, PasswordField, StringField, StringTransform, UriField,
};
pub use crate::formats::{HostKind, UriOptions, is_email, is_host, is_uri};
pub use crate::value::{Kind, Value};
pub use crate::{boolean, date, domain, email, number, object, password, string, uri};
pub use crate::constraints::{Bound, Range};
