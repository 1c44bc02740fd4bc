//! # Object Engine
//!
//! Turns untyped field mappings into validated, normalized records.
//!
//! Pipeline: dispatch on `object_type` → field validation (types,
//! references, uniqueness) → stamps and defaults → required-field and
//! shape checks → [`Record`], or an [`ObjectError`] at any stage.

mod engine;
mod errors;
mod ping;
mod record;
mod rules;
mod time;
mod validator;

pub use engine::{Mode, ObjectEngine};
pub use errors::{ObjectError, ObjectResult, ProtocolError};
pub use ping::Ping;
pub use record::{Fields, MalformedRecord, Record, RECORD_TYPE};
pub use time::{assign_id, format_timestamp};
pub use validator::FieldValidator;
