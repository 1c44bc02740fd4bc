//! Schema type definitions
//!
//! Field types:
//! - string, number, boolean
//! - id, id_list: references to other records
//! - list: free-form array
//! - datetime: RFC 3339 timestamp
//! - permission_bitmask: 13-flag permission value

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::permissions::Permission;

/// The closed set of object kinds in the protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    Instance,
    Account,
    Conference,
    ConferenceMember,
    Channel,
    Message,
    Invite,
    Role,
    Report,
    Attachment,
}

impl Variant {
    /// Every variant, in registration order.
    pub const ALL: [Variant; 10] = [
        Variant::Instance,
        Variant::Account,
        Variant::Conference,
        Variant::ConferenceMember,
        Variant::Channel,
        Variant::Message,
        Variant::Invite,
        Variant::Role,
        Variant::Report,
        Variant::Attachment,
    ];

    /// Returns the wire tag (`object_type` value)
    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Instance => "instance",
            Variant::Account => "account",
            Variant::Conference => "conference",
            Variant::ConferenceMember => "conference_member",
            Variant::Channel => "channel",
            Variant::Message => "message",
            Variant::Invite => "invite",
            Variant::Role => "role",
            Variant::Report => "report",
            Variant::Attachment => "attachment",
        }
    }

    /// Parses a wire tag. Returns `None` for unknown tags.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Variant::ALL.into_iter().find(|v| v.as_str() == tag)
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Declared type of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    String,
    Number,
    Boolean,
    /// Id of another record
    Id,
    /// List of ids of other records
    IdList,
    /// Free-form list
    List,
    DateTime,
    PermissionBitmask,
}

impl FieldType {
    /// Returns the type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Number => "number",
            FieldType::Boolean => "boolean",
            FieldType::Id => "id",
            FieldType::IdList => "id_list",
            FieldType::List => "list",
            FieldType::DateTime => "datetime",
            FieldType::PermissionBitmask => "permission_bitmask",
        }
    }

    /// Whether values of this type name other records
    pub fn is_reference(&self) -> bool {
        matches!(self, FieldType::Id | FieldType::IdList)
    }
}

/// Variants an id field may point at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefTarget {
    Any,
    OneOf(&'static [Variant]),
}

impl RefTarget {
    pub fn accepts(&self, variant: Variant) -> bool {
        match self {
            RefTarget::Any => true,
            RefTarget::OneOf(variants) => variants.contains(&variant),
        }
    }
}

impl fmt::Display for RefTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RefTarget::Any => f.write_str("any"),
            RefTarget::OneOf(variants) => {
                for (i, v) in variants.iter().enumerate() {
                    if i > 0 {
                        f.write_str("|")?;
                    }
                    f.write_str(v.as_str())?;
                }
                Ok(())
            }
        }
    }
}

/// Value injected when a field is absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultValue {
    Bool(bool),
    Number(i64),
    Str(&'static str),
    EmptyList,
    Permission(Permission),
}

impl DefaultValue {
    pub fn to_value(self) -> Value {
        match self {
            DefaultValue::Bool(b) => Value::Bool(b),
            DefaultValue::Number(n) => Value::from(n),
            DefaultValue::Str(s) => Value::from(s),
            DefaultValue::EmptyList => Value::Array(Vec::new()),
            DefaultValue::Permission(p) => Value::from(p.to_value()),
        }
    }
}

/// Field definition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDef {
    pub name: &'static str,
    pub field_type: FieldType,
    /// Must be present in every finished record
    pub required: bool,
    /// Cannot change through a patch once stored
    pub immutable: bool,
    /// Value must be unique among records of the variant
    pub unique: bool,
    pub default: Option<DefaultValue>,
    /// Target of `id`/`id_list` fields
    pub target: Option<RefTarget>,
}

impl FieldDef {
    /// Create an optional field of the given type
    pub const fn new(name: &'static str, field_type: FieldType) -> Self {
        Self {
            name,
            field_type,
            required: false,
            immutable: false,
            unique: false,
            default: None,
            target: None,
        }
    }

    pub const fn string(name: &'static str) -> Self {
        Self::new(name, FieldType::String)
    }

    pub const fn number(name: &'static str) -> Self {
        Self::new(name, FieldType::Number)
    }

    pub const fn boolean(name: &'static str) -> Self {
        Self::new(name, FieldType::Boolean)
    }

    pub const fn datetime(name: &'static str) -> Self {
        Self::new(name, FieldType::DateTime)
    }

    pub const fn list(name: &'static str) -> Self {
        Self::new(name, FieldType::List)
    }

    pub const fn permissions(name: &'static str) -> Self {
        Self::new(name, FieldType::PermissionBitmask)
    }

    /// Id field pointing at one of `targets`
    pub const fn id(name: &'static str, targets: &'static [Variant]) -> Self {
        Self::new(name, FieldType::Id).references(RefTarget::OneOf(targets))
    }

    /// Id field pointing at any variant
    pub const fn any_id(name: &'static str) -> Self {
        Self::new(name, FieldType::Id).references(RefTarget::Any)
    }

    /// Id list whose elements point at one of `targets`
    pub const fn id_list(name: &'static str, targets: &'static [Variant]) -> Self {
        Self::new(name, FieldType::IdList).references(RefTarget::OneOf(targets))
    }

    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub const fn immutable(mut self) -> Self {
        self.immutable = true;
        self
    }

    pub const fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    pub const fn default(mut self, value: DefaultValue) -> Self {
        self.default = Some(value);
        self
    }

    pub const fn references(mut self, target: RefTarget) -> Self {
        self.target = Some(target);
        self
    }
}

/// Static metadata for one variant
#[derive(Debug, PartialEq, Eq)]
pub struct Schema {
    pub variant: Variant,
    pub fields: &'static [FieldDef],
}

impl Schema {
    /// Returns the definition of a field, if the variant accepts it
    pub fn field(&self, name: &str) -> Option<&'static FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn is_valid_field(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    pub fn valid_fields(&self) -> impl Iterator<Item = &'static str> {
        self.fields.iter().map(|f| f.name)
    }

    pub fn required_fields(&self) -> impl Iterator<Item = &'static str> {
        self.fields.iter().filter(|f| f.required).map(|f| f.name)
    }

    pub fn immutable_fields(&self) -> impl Iterator<Item = &'static str> {
        self.fields.iter().filter(|f| f.immutable).map(|f| f.name)
    }

    pub fn unique_fields(&self) -> impl Iterator<Item = &'static str> {
        self.fields.iter().filter(|f| f.unique).map(|f| f.name)
    }

    pub fn default_values(&self) -> impl Iterator<Item = (&'static str, Value)> {
        self.fields
            .iter()
            .filter_map(|f| f.default.map(|d| (f.name, d.to_value())))
    }

    pub fn reference_target(&self, name: &str) -> Option<RefTarget> {
        self.field(name).and_then(|f| f.target)
    }
}
