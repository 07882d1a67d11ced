//! Error types for schema configuration and validation failures.
//!
//! Two failure families, deliberately distinct:
//!
//! - [`ConfigError`] — the schema itself is wrong. Raised by `build()`,
//!   never during validation.
//! - [`ValidationError`] — the input is wrong. Scalar variants carry one
//!   message; [`ValidationError::Object`] carries a whole [`ErrorTree`].
//!
//! Anything that is neither of these is a programming defect and propagates
//! as a panic regardless of how the caller chose to receive errors.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Reserved [`ErrorTree`] key for errors addressed at an object as a whole
/// rather than one of its fields.
pub const WHOLE_OBJECT: &str = "_";

/// Invalid schema configuration, reported at construction time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("a range cannot have a min value larger than the max value")]
    InvertedRange,

    #[error("cannot have a range where min and max are equal and a bound is not inclusive")]
    ExclusiveEqualBounds,

    #[error("must have at least one element in a choice")]
    EmptyChoices,

    #[error("only one case transformation is allowed")]
    ConflictingCaseTransforms,
}

/// Recursive per-field error report.
///
/// A scalar failure is a bare message; an object failure maps field names
/// (or [`WHOLE_OBJECT`]) to messages or further trees. Serializes untagged,
/// so a tree renders as plain nested JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ErrorTree {
    Message(String),
    Fields(BTreeMap<String, ErrorTree>),
}

impl ErrorTree {
    pub fn message(text: impl Into<String>) -> Self {
        ErrorTree::Message(text.into())
    }

    /// Looks up the subtree recorded for a field name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&ErrorTree> {
        match self {
            ErrorTree::Message(_) => None,
            ErrorTree::Fields(map) => map.get(name),
        }
    }

    /// The bare message, when this node is a leaf.
    #[must_use]
    pub fn as_message(&self) -> Option<&str> {
        match self {
            ErrorTree::Message(text) => Some(text),
            ErrorTree::Fields(_) => None,
        }
    }

    /// Total number of leaf messages in the tree.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            ErrorTree::Message(_) => 1,
            ErrorTree::Fields(map) => map.values().map(ErrorTree::len).sum(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            ErrorTree::Message(_) => false,
            ErrorTree::Fields(map) => map.is_empty(),
        }
    }
}

impl fmt::Display for ErrorTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorTree::Message(text) => f.write_str(text),
            ErrorTree::Fields(map) => {
                for (i, (name, tree)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str("; ")?;
                    }
                    write!(f, "{name}: {tree}")?;
                }
                Ok(())
            }
        }
    }
}

/// A single validation failure.
///
/// Scalar field validation is a sequence of gates and fails fast, so one
/// variant with one message is enough. The object validator is the
/// exception: it validates exhaustively and reports every field at once
/// through [`ValidationError::Object`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Runtime type does not match the field's target type after coercion.
    #[error("{0}")]
    Type(String),

    /// A required value is absent or empty.
    #[error("{0}")]
    Required(String),

    /// Value outside the configured numeric or length bounds.
    #[error("{0}")]
    Range(String),

    /// Value not a member of the configured choice set.
    #[error("{0}")]
    Choice(String),

    /// Domain/email/URI/password pattern mismatch.
    #[error("{0}")]
    Format(String),

    /// One or more nested fields failed; the tree has the details.
    #[error("Object failed to validate")]
    Object(ErrorTree),
}

impl ValidationError {
    /// Collapses the error into the tree shape used for reporting:
    /// scalar failures become a leaf message, object failures keep their
    /// per-field structure.
    #[must_use]
    pub fn into_tree(self) -> ErrorTree {
        match self {
            ValidationError::Object(tree) => tree,
            other => ErrorTree::Message(other.to_string()),
        }
    }
}
