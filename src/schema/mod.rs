//! Schema Registry
//!
//! Static per-variant metadata: valid, required, immutable and unique
//! fields, field types, id-reference targets and default values.
//!
//! # Design Principles
//!
//! - Fixed at compile time, no mutation API
//! - Safe for unrestricted concurrent reads
//! - One table per [`Variant`] arm

mod registry;
mod types;

pub use registry::{schema_for, schema_of, DEFAULT_NONREWRITABLE_FIELDS};
pub use types::{DefaultValue, FieldDef, FieldType, RefTarget, Schema, Variant};
