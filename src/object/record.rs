//! Finished records.
//!
//! On the wire a record is one flat JSON object:
//! `{"id": ..., "type": "object", "object_type": ..., <variant fields>}`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::schema::Variant;

/// Field name to value mapping, used for raw input and record bodies
pub type Fields = Map<String, Value>;

/// Value of the `type` key on every record
pub const RECORD_TYPE: &str = "object";

/// A JSON object that cannot be read back as a record
#[derive(Debug, Error)]
#[error("Malformed record: {0}")]
pub struct MalformedRecord(String);

/// A validated, normalized object with its id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Fields", into = "Fields")]
pub struct Record {
    id: String,
    object_type: Variant,
    fields: Fields,
}

impl Record {
    /// Assembles a record without validating it.
    ///
    /// Client input goes through [`crate::object::ObjectEngine`] instead.
    pub fn new(id: impl Into<String>, object_type: Variant, fields: Fields) -> Self {
        Self {
            id: id.into(),
            object_type,
            fields,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn object_type(&self) -> Variant {
        self.object_type
    }

    /// Variant fields, without `id`, `type` and `object_type`
    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Value of any key as it appears on the wire, including the envelope
    /// keys.
    pub fn wire_value(&self, key: &str) -> Option<Value> {
        match key {
            "id" => Some(Value::from(self.id.as_str())),
            "type" => Some(Value::from(RECORD_TYPE)),
            "object_type" => Some(Value::from(self.object_type.as_str())),
            other => self.fields.get(other).cloned(),
        }
    }

    pub fn into_fields(self) -> Fields {
        self.fields
    }

    /// Flat JSON form
    pub fn to_value(&self) -> Value {
        Value::Object(self.clone().into())
    }
}

impl From<Record> for Fields {
    fn from(record: Record) -> Self {
        let mut out = Map::with_capacity(record.fields.len() + 3);
        out.insert("id".into(), Value::String(record.id));
        out.insert("type".into(), Value::from(RECORD_TYPE));
        out.insert(
            "object_type".into(),
            Value::from(record.object_type.as_str()),
        );
        out.extend(record.fields);
        out
    }
}

impl TryFrom<Fields> for Record {
    type Error = MalformedRecord;

    fn try_from(mut map: Fields) -> Result<Self, Self::Error> {
        let id = match map.remove("id") {
            Some(Value::String(id)) => id,
            _ => return Err(MalformedRecord("'id' must be a string".into())),
        };
        match map.remove("type") {
            Some(Value::String(t)) if t == RECORD_TYPE => {}
            _ => return Err(MalformedRecord(format!("'type' must be \"{}\"", RECORD_TYPE))),
        }
        let object_type = match map.remove("object_type") {
            Some(Value::String(tag)) => Variant::from_tag(&tag)
                .ok_or_else(|| MalformedRecord(format!("unknown object_type '{}'", tag)))?,
            _ => return Err(MalformedRecord("'object_type' must be a string".into())),
        };
        Ok(Record::new(id, object_type, map))
    }
}
