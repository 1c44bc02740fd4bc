//! Object normalizer and dispatcher.
//!
//! Create and patch share one pipeline. A patch is a full reconstruction
//! with the stored fields as base and the submitted fields as overrides, so
//! defaults and required-field checks are never skipped on edit.
//!
//! Construction is pure: nothing is written to the store.

use serde_json::Value;

use super::errors::{ObjectError, ObjectResult};
use super::record::{Fields, Record};
use super::rules::{self, Stage};
use super::time;
use super::validator::{normalize_value, FieldValidator};
use crate::schema::{schema_for, Schema, DEFAULT_NONREWRITABLE_FIELDS};
use crate::stash::{self, Stash, StashResult, MAX_STASH_IDS};
use crate::store::ObjectStore;

/// Construction mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// New record with a fresh id
    Create,
    /// Replacement of the stored record `existing_id`
    Patch { existing_id: String },
}

impl Mode {
    pub fn patch(existing_id: impl Into<String>) -> Self {
        Mode::Patch {
            existing_id: existing_id.into(),
        }
    }
}

/// Entry point for building records from untyped input.
pub struct ObjectEngine<'a, S: ObjectStore + ?Sized> {
    store: &'a S,
    stash_limit: usize,
}

impl<'a, S: ObjectStore + ?Sized> ObjectEngine<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self {
            store,
            stash_limit: MAX_STASH_IDS,
        }
    }

    /// Lower the stash bound. Values above the protocol maximum are capped.
    pub fn with_stash_limit(mut self, limit: usize) -> Self {
        self.stash_limit = limit.min(MAX_STASH_IDS);
        self
    }

    pub fn store(&self) -> &'a S {
        self.store
    }

    /// Builds a record from raw fields, picking the variant from their
    /// `object_type`.
    ///
    /// A patch that omits `object_type` keeps the stored record's variant.
    pub fn dispatch(&self, raw: &Fields, mode: Mode) -> ObjectResult<Record> {
        let tag = match (raw.get("object_type"), &mode) {
            (Some(Value::String(tag)), _) => tag.clone(),
            (Some(other), _) => return Err(ObjectError::UnknownVariant(other.to_string())),
            (None, Mode::Create) => return Err(ObjectError::MissingObjectType),
            (None, Mode::Patch { existing_id }) => self
                .store
                .lookup_by_id(existing_id)?
                .ok_or_else(|| ObjectError::TargetNotFound(existing_id.clone()))?
                .object_type()
                .as_str()
                .to_string(),
        };
        self.construct(&tag, raw, mode)
    }

    /// Builds a record of the variant named by `variant_tag`.
    ///
    /// # Errors
    ///
    /// - `UnknownVariant` if the tag is not registered
    /// - `TargetNotFound` if a patch names an id that is not stored
    /// - `ImmutableFieldRewrite` if a patch changes a protected field
    /// - any validation, completeness or shape error
    pub fn construct(&self, variant_tag: &str, raw: &Fields, mode: Mode) -> ObjectResult<Record> {
        let schema = schema_for(variant_tag)
            .ok_or_else(|| ObjectError::UnknownVariant(variant_tag.to_string()))?;

        let result = match mode {
            Mode::Create => self.create(schema, raw, time::assign_id()),
            Mode::Patch { existing_id } => self.patch(schema, raw, &existing_id),
        };

        match &result {
            Ok(record) => {
                tracing::debug!(variant = %schema.variant, id = record.id(), "constructed object")
            }
            Err(e) => tracing::debug!(variant = %schema.variant, error = %e, "rejected object"),
        }
        result
    }

    /// Create-mode construction with a caller-chosen id.
    pub(crate) fn create(&self, schema: &Schema, raw: &Fields, id: String) -> ObjectResult<Record> {
        let mut raw = raw.clone();
        rules::strip_server_fields(schema.variant, &mut raw);

        let validator = FieldValidator::new(self.store);
        let mut fields = validator.validate(schema, &raw, None)?;

        self.finish(schema, Stage::Create, &mut fields)?;

        Ok(Record::new(id, schema.variant, fields))
    }

    fn patch(&self, schema: &Schema, raw: &Fields, existing_id: &str) -> ObjectResult<Record> {
        let existing = self
            .store
            .lookup_by_id(existing_id)?
            .ok_or_else(|| ObjectError::TargetNotFound(existing_id.to_string()))?;

        if existing.object_type() != schema.variant {
            return Err(ObjectError::ImmutableFieldRewrite("object_type".into()));
        }
        check_immutable(schema, &existing, raw)?;

        let validator = FieldValidator::new(self.store);
        let overrides = validator.validate(schema, raw, Some(existing_id))?;

        let mut fields = existing.into_fields();
        fields.extend(overrides);

        self.finish(schema, Stage::Patch, &mut fields)?;

        Ok(Record::new(existing_id, schema.variant, fields))
    }

    /// Stamps, defaults, completeness and shape checks.
    fn finish(&self, schema: &Schema, stage: Stage, fields: &mut Fields) -> ObjectResult<()> {
        rules::stamp(schema.variant, stage, fields, &time::now());

        for (name, value) in schema.default_values() {
            fields.entry(name).or_insert(value);
        }

        if let Some(missing) = schema.required_fields().find(|f| !fields.contains_key(*f)) {
            return Err(ObjectError::missing(missing));
        }

        rules::check_shape(schema.variant, fields)
    }

    /// Fetches up to the configured bound of records by id.
    pub fn build_stash(&self, id_list: &[String]) -> StashResult<Stash> {
        stash::build_stash(self.store, id_list, self.stash_limit)
    }
}

/// Rejects patches that change a protected field.
///
/// Re-sending the stored value is allowed; clients routinely echo back whole
/// objects. A value that only differs in encoding (e.g. `"true"` for `true`)
/// counts as the same value.
fn check_immutable(schema: &Schema, existing: &Record, raw: &Fields) -> ObjectResult<()> {
    let protected = DEFAULT_NONREWRITABLE_FIELDS
        .iter()
        .copied()
        .chain(schema.immutable_fields());

    for field in protected {
        let Some(submitted) = raw.get(field) else {
            continue;
        };
        let current = existing.wire_value(field);
        if current.as_ref() == Some(submitted) {
            continue;
        }
        let normalized = schema
            .field(field)
            .and_then(|def| normalize_value(def, submitted).ok());
        if normalized.is_some() && normalized == current {
            continue;
        }

        tracing::info!(id = existing.id(), field, "rejected rewrite of protected field");
        return Err(ObjectError::ImmutableFieldRewrite(field.to_string()));
    }
    Ok(())
}
