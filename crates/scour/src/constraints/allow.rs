//! Source-type allow-sets and the coercion dispatch table.
//!
//! A field names the source [`Kind`]s it will coerce from (or the wildcard
//! "all"). Conversion itself is a fixed `(Kind, fn)` table per field type;
//! each conversion receives the owning field's configuration so it can read
//! sibling options such as `precision` or `empty`.

use serde_json::json;

use crate::core::error::ValidationError;
use crate::value::{Kind, Value};

/// The set of source runtime types a field may be coerced from.
///
/// Absent/empty means no coercion is attempted: foreign types pass through
/// untouched and fail the field's type check.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllowSet {
    all: bool,
    kinds: Vec<Kind>,
}

impl AllowSet {
    /// The default: nothing may be coerced.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// The wildcard: every recognized source kind may be coerced.
    #[must_use]
    pub fn all() -> Self {
        Self {
            all: true,
            kinds: Vec::new(),
        }
    }

    #[must_use]
    pub fn of(kinds: impl IntoIterator<Item = Kind>) -> Self {
        Self {
            all: false,
            kinds: kinds.into_iter().collect(),
        }
    }

    pub fn insert(&mut self, kind: Kind) {
        if !self.kinds.contains(&kind) {
            self.kinds.push(kind);
        }
    }

    pub fn insert_all(&mut self) {
        self.all = true;
    }

    #[must_use]
    pub fn permits(&self, kind: Kind) -> bool {
        self.all || self.kinds.contains(&kind)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.all && self.kinds.is_empty()
    }

    /// The `allowTypes` serialization shape: `["all"]` for the wildcard,
    /// otherwise the configured kind names (empty list when unset).
    #[must_use]
    pub fn serialize(&self) -> serde_json::Value {
        if self.all {
            json!(["all"])
        } else {
            json!(self.kinds.iter().map(|k| k.name()).collect::<Vec<_>>())
        }
    }
}

/// A registered coercion from one source kind into the target type.
pub type Conversion<C> = fn(&C, &Value) -> Result<Value, ValidationError>;

/// Fixed conversion table for one field type.
///
/// `convert` leaves the input untouched when it already has the target
/// kind, when the source kind is not permitted, or when no conversion is
/// registered for it — the field's own type check decides the rest.
#[derive(Debug)]
pub struct Converter<C: 'static> {
    target: Kind,
    table: &'static [(Kind, Conversion<C>)],
}

impl<C: 'static> Converter<C> {
    #[must_use]
    pub const fn new(target: Kind, table: &'static [(Kind, Conversion<C>)]) -> Self {
        Self { target, table }
    }

    pub fn convert(
        &self,
        allow: &AllowSet,
        config: &C,
        input: &Value,
    ) -> Result<Value, ValidationError> {
        let kind = input.kind();
        if kind == self.target || !allow.permits(kind) {
            return Ok(input.clone());
        }

        match self.table.iter().find(|(k, _)| *k == kind) {
            Some((_, conversion)) => conversion(config, input),
            None => Ok(input.clone()),
        }
    }
}
