//! Core validation types: the [`Field`] trait, error taxonomy, and entry
//! points.

pub mod error;
pub mod traits;

pub use error::{ConfigError, ErrorTree, ValidationError, WHOLE_OBJECT};
pub use traits::{Field, Outcome, check};
