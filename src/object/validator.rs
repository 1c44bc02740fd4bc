//! Field validator
//!
//! Validation steps:
//! - Unknown fields are dropped, not rejected
//! - Known fields are type-checked and normalized
//! - `id`/`id_list` fields must resolve to a stored record of the declared
//!   target variant(s)
//! - Unique fields must not collide with another record of the variant
//!
//! Validation has no side effects and no partial success.

use serde_json::Value;

use super::errors::{ObjectError, ObjectResult};
use super::record::Fields;
use super::time::normalize_timestamp;
use crate::permissions::Permission;
use crate::schema::{FieldDef, FieldType, RefTarget, Schema};
use crate::store::ObjectStore;

/// Checks raw fields against a schema, resolving references through a store.
pub struct FieldValidator<'a, S: ObjectStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: ObjectStore + ?Sized> FieldValidator<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Validates `raw` against `schema`.
    ///
    /// `self_id` is the id of the record being patched, so that a record
    /// re-submitting its own unique value does not collide with itself.
    ///
    /// # Errors
    ///
    /// - `FieldTypeMismatch` / `InvalidPermissionValue` for malformed values
    /// - `DanglingReference` / `WrongReferenceType` for broken references
    /// - `UniqueConstraintViolation` for taken unique values
    pub fn validate(
        &self,
        schema: &Schema,
        raw: &Fields,
        self_id: Option<&str>,
    ) -> ObjectResult<Fields> {
        let mut clean = Fields::new();

        for (name, value) in raw {
            let Some(def) = schema.field(name) else {
                tracing::trace!(variant = %schema.variant, field = %name, "dropping unknown field");
                continue;
            };
            let value = normalize_value(def, value)?;
            if let Some(target) = def.target {
                self.check_references(def, &value, target)?;
            }
            clean.insert(name.clone(), value);
        }

        self.check_unique(schema, &clean, self_id)?;

        Ok(clean)
    }

    fn check_references(&self, def: &FieldDef, value: &Value, target: RefTarget) -> ObjectResult<()> {
        match value {
            Value::String(id) => self.resolve(def.name, id, target),
            Value::Array(ids) => ids
                .iter()
                .filter_map(Value::as_str)
                .try_for_each(|id| self.resolve(def.name, id, target)),
            _ => Ok(()),
        }
    }

    fn resolve(&self, field: &str, id: &str, target: RefTarget) -> ObjectResult<()> {
        let referenced = self
            .store
            .lookup_by_id(id)?
            .ok_or_else(|| ObjectError::DanglingReference {
                field: field.to_string(),
                id: id.to_string(),
            })?;

        if !target.accepts(referenced.object_type()) {
            return Err(ObjectError::WrongReferenceType {
                field: field.to_string(),
                expected: target.to_string(),
                actual: referenced.object_type().as_str().to_string(),
            });
        }
        Ok(())
    }

    fn check_unique(&self, schema: &Schema, clean: &Fields, self_id: Option<&str>) -> ObjectResult<()> {
        for field in schema.unique_fields() {
            let Some(value) = clean.get(field) else {
                continue;
            };
            let mut query = Fields::new();
            query.insert(field.to_string(), value.clone());

            let taken = self
                .store
                .find_by_fields(schema.variant, &query)?
                .iter()
                .any(|r| Some(r.id()) != self_id);
            if taken {
                return Err(ObjectError::UniqueConstraintViolation {
                    field: field.to_string(),
                    value: value.to_string(),
                });
            }
        }
        Ok(())
    }
}

/// Type-checks a single value and converts it to its stored form.
///
/// Pure: does not resolve references.
pub(crate) fn normalize_value(def: &FieldDef, value: &Value) -> ObjectResult<Value> {
    let mismatch = || ObjectError::type_mismatch(def.name, def.field_type.type_name(), json_type_name(value));

    match def.field_type {
        FieldType::String | FieldType::Id => match value {
            Value::String(_) => Ok(value.clone()),
            _ => Err(mismatch()),
        },
        FieldType::Number => match value {
            Value::Number(_) => Ok(value.clone()),
            _ => Err(mismatch()),
        },
        // Older clients send booleans as strings.
        FieldType::Boolean => match value {
            Value::Bool(_) => Ok(value.clone()),
            Value::String(s) if s == "true" => Ok(Value::Bool(true)),
            Value::String(s) if s == "false" => Ok(Value::Bool(false)),
            _ => Err(mismatch()),
        },
        FieldType::List => match value {
            Value::Array(_) => Ok(value.clone()),
            _ => Err(mismatch()),
        },
        FieldType::IdList => {
            let items = value.as_array().ok_or_else(mismatch)?;
            for (i, item) in items.iter().enumerate() {
                if !item.is_string() {
                    return Err(ObjectError::type_mismatch(
                        format!("{}[{}]", def.name, i),
                        "id",
                        json_type_name(item),
                    ));
                }
            }
            Ok(value.clone())
        }
        FieldType::DateTime => value
            .as_str()
            .and_then(normalize_timestamp)
            .map(Value::String)
            .ok_or_else(mismatch),
        FieldType::PermissionBitmask => Permission::from_json(value)
            .map(|p| Value::from(p.to_value()))
            .map_err(|source| ObjectError::InvalidPermissionValue {
                field: def.name.to_string(),
                source,
            }),
    }
}

/// Returns the JSON type name for error messages.
pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "object",
    }
}
