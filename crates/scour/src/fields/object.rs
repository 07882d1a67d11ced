//! Object field validator.
//!
//! Validates a mapping against a fixed schema of named fields. Unlike the
//! scalar validators this one never fails fast: every declared field is
//! validated and every failure lands in one [`ErrorTree`], so a caller
//! gets complete feedback in a single pass.

use std::collections::BTreeMap;
use std::fmt;

use serde_json::json;

use crate::core::error::{ConfigError, ErrorTree, ValidationError, WHOLE_OBJECT};
use crate::core::traits::Field;
use crate::value::Value;

/// What to do with input keys the schema does not declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AdditionalFields {
    /// Silently drop them from the cleaned output.
    #[default]
    Strip,
    /// Report each one as an error.
    Error,
    /// Copy their raw values into the cleaned output, unvalidated.
    Merge,
}

impl AdditionalFields {
    fn name(self) -> &'static str {
        match self {
            AdditionalFields::Strip => "strip",
            AdditionalFields::Error => "error",
            AdditionalFields::Merge => "merge",
        }
    }
}

/// A schema entry: a built field validator, or a plain mapping of names to
/// further entries. Mappings become nested object validators at build
/// time, inheriting the parent's additional-field policy but never its
/// cross-field check.
pub enum FieldSpec {
    Field(Box<dyn Field>),
    Nested(BTreeMap<String, FieldSpec>),
}

impl<F: Field + 'static> From<F> for FieldSpec {
    fn from(field: F) -> Self {
        FieldSpec::Field(Box::new(field))
    }
}

impl fmt::Debug for FieldSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldSpec::Field(_) => f.write_str("Field"),
            FieldSpec::Nested(map) => f.debug_map().entries(map.iter()).finish(),
        }
    }
}

/// Cross-field validation state handed to a schema's custom check.
///
/// Exposes the cleaned values accumulated so far and collects any errors
/// the check adds. The check runs after the per-field pass whether or not
/// that pass produced errors.
pub struct ObjectState<'a> {
    cleaned: &'a BTreeMap<String, Value>,
    added: Vec<(String, String)>,
}

impl<'a> ObjectState<'a> {
    fn new(cleaned: &'a BTreeMap<String, Value>) -> Self {
        Self {
            cleaned,
            added: Vec::new(),
        }
    }

    /// The cleaned value recorded for a field, if validation of that field
    /// succeeded. A field cleaned to "no value" reads as `Value::Null`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.cleaned.get(name)
    }

    #[must_use]
    pub fn cleaned(&self) -> &BTreeMap<String, Value> {
        self.cleaned
    }

    /// Records an error against the object as a whole.
    pub fn add_error(&mut self, message: impl Into<String>) {
        self.added.push((WHOLE_OBJECT.to_owned(), message.into()));
    }

    /// Records an error against one field.
    pub fn add_field_error(&mut self, name: impl Into<String>, message: impl Into<String>) {
        self.added.push((name.into(), message.into()));
    }
}

type CrossCheck = Box<dyn Fn(&mut ObjectState<'_>) + Send + Sync>;

/// Validates a mapping against a schema of named fields.
pub struct ObjectField {
    empty: bool,
    fields: BTreeMap<String, Box<dyn Field>>,
    policy: AdditionalFields,
    check: Option<CrossCheck>,
}

impl fmt::Debug for ObjectField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectField")
            .field("empty", &self.empty)
            .field("fields", &self.fields.keys().collect::<Vec<_>>())
            .field("policy", &self.policy)
            .field("check", &self.check.is_some())
            .finish()
    }
}

impl ObjectField {
    #[must_use]
    pub fn builder() -> ObjectBuilder {
        ObjectBuilder::default()
    }

    /// Typed convenience wrapper: `None` is the cleaned "no value" state.
    pub fn clean(
        &self,
        input: impl Into<Value>,
    ) -> Result<Option<BTreeMap<String, Value>>, ValidationError> {
        match self.validate(&input.into())? {
            Value::Object(map) => Ok(Some(map)),
            _ => Ok(None),
        }
    }
}

impl Field for ObjectField {
    fn validate(&self, input: &Value) -> Result<Value, ValidationError> {
        if input.is_null() && self.empty {
            return Ok(Value::Null);
        }

        // Null and arrays are objects to a dynamic-language typeof; here
        // they are not.
        let Value::Object(map) = input else {
            return Err(ValidationError::Type("Value must be of type object".into()));
        };

        let mut cleaned = BTreeMap::new();
        let mut errors: BTreeMap<String, ErrorTree> = BTreeMap::new();

        for (name, field) in &self.fields {
            match map.get(name) {
                None => {
                    errors.insert(
                        name.clone(),
                        ErrorTree::message(format!("Please add the field {name}")),
                    );
                }
                Some(value) => match field.validate(value) {
                    Ok(clean) => {
                        cleaned.insert(name.clone(), clean);
                    }
                    Err(err) => {
                        errors.insert(name.clone(), err.into_tree());
                    }
                },
            }
        }

        for (key, value) in map {
            if self.fields.contains_key(key) {
                continue;
            }
            match self.policy {
                AdditionalFields::Strip => {}
                AdditionalFields::Error => {
                    errors.insert(key.clone(), ErrorTree::message("Please remove field"));
                }
                AdditionalFields::Merge => {
                    cleaned.insert(key.clone(), value.clone());
                }
            }
        }

        if let Some(check) = &self.check {
            let mut state = ObjectState::new(&cleaned);
            check(&mut state);
            for (name, message) in state.added {
                errors.insert(name, ErrorTree::message(message));
            }
        }

        if errors.is_empty() {
            Ok(Value::Object(cleaned))
        } else {
            Err(ValidationError::Object(ErrorTree::Fields(errors)))
        }
    }

    fn serialize(&self) -> serde_json::Value {
        let fields: serde_json::Map<String, serde_json::Value> = self
            .fields
            .iter()
            .map(|(name, field)| (name.clone(), field.serialize()))
            .collect();
        json!({
            "empty": self.empty,
            "additionalFields": self.policy.name(),
            "fields": fields,
        })
    }
}

/// Builder for [`ObjectField`].
#[derive(Default)]
pub struct ObjectBuilder {
    empty: bool,
    fields: BTreeMap<String, FieldSpec>,
    policy: AdditionalFields,
    check: Option<CrossCheck>,
}

impl fmt::Debug for ObjectBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectBuilder")
            .field("empty", &self.empty)
            .field("fields", &self.fields)
            .field("policy", &self.policy)
            .field("check", &self.check.is_some())
            .finish()
    }
}

impl ObjectBuilder {
    /// Treats "no value" input as valid, cleaning to "no value".
    #[must_use]
    pub fn empty(mut self, empty: bool) -> Self {
        self.empty = empty;
        self
    }

    /// Declares a field. Accepts any built validator, or a nested
    /// [`FieldSpec`] mapping.
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, spec: impl Into<FieldSpec>) -> Self {
        self.fields.insert(name.into(), spec.into());
        self
    }

    /// Declares a nested object field from another builder's schema.
    ///
    /// The nested object inherits this object's additional-field policy at
    /// build time; a cross-field check never propagates down.
    #[must_use]
    pub fn nested(mut self, name: impl Into<String>, nested: ObjectBuilder) -> Self {
        self.fields
            .insert(name.into(), FieldSpec::Nested(nested.fields));
        self
    }

    #[must_use]
    pub fn additional_fields(mut self, policy: AdditionalFields) -> Self {
        self.policy = policy;
        self
    }

    /// Installs a cross-field check, run after the per-field pass with
    /// read access to the cleaned values collected so far.
    #[must_use]
    pub fn check(mut self, check: impl Fn(&mut ObjectState<'_>) + Send + Sync + 'static) -> Self {
        self.check = Some(Box::new(check));
        self
    }

    pub fn build(self) -> Result<ObjectField, ConfigError> {
        Ok(ObjectField {
            empty: self.empty,
            fields: resolve(self.fields, self.policy),
            policy: self.policy,
            check: self.check,
        })
    }
}

/// Resolves schema entries into built validators, turning nested mappings
/// into object validators that share the parent's policy.
fn resolve(
    specs: BTreeMap<String, FieldSpec>,
    policy: AdditionalFields,
) -> BTreeMap<String, Box<dyn Field>> {
    specs
        .into_iter()
        .map(|(name, spec)| {
            let field: Box<dyn Field> = match spec {
                FieldSpec::Field(field) => field,
                FieldSpec::Nested(nested) => Box::new(ObjectField {
                    empty: false,
                    fields: resolve(nested, policy),
                    policy,
                    check: None,
                }),
            };
            (name, field)
        })
        .collect()
}
