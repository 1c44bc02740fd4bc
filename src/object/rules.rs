//! Variant-specific rules applied around the generic pipeline.
//!
//! Stamps run before defaults and the required-field check, since the
//! server-set timestamps are themselves required. Shape checks run last, on
//! the finished field set.

use serde_json::Value;

use super::errors::{ObjectError, ObjectResult};
use super::record::Fields;
use crate::schema::Variant;

/// Construction stage a stamp is applied in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Stage {
    Create,
    Patch,
}

/// Drops client-sent values for fields the server stamps on create.
///
/// Runs on the raw input before validation, so a malformed value for a field
/// that is about to be overwritten cannot fail the request. A message keeps
/// `edit_date` only when it also claims to be edited.
pub(crate) fn strip_server_fields(variant: Variant, raw: &mut Fields) {
    match variant {
        Variant::Conference => {
            raw.remove("creation_date");
        }
        Variant::Report => {
            raw.remove("submission_date");
        }
        Variant::Message => {
            raw.remove("post_date");
            if !claims_edited(raw) {
                raw.remove("edit_date");
            }
        }
        _ => {}
    }
}

/// `edited` in either of the forms the boolean normalizer accepts.
fn claims_edited(raw: &Fields) -> bool {
    match raw.get("edited") {
        Some(Value::Bool(edited)) => *edited,
        Some(Value::String(s)) => s == "true",
        _ => false,
    }
}

/// Applies server-controlled values. `now` is in stored timestamp form.
pub(crate) fn stamp(variant: Variant, stage: Stage, fields: &mut Fields, now: &str) {
    match (variant, stage) {
        (Variant::Conference, Stage::Create) => {
            fields.insert("creation_date".into(), Value::from(now));
        }
        (Variant::Report, Stage::Create) => {
            fields.insert("submission_date".into(), Value::from(now));
        }
        (Variant::Message, Stage::Create) => {
            fields.insert("post_date".into(), Value::from(now));
            if fields.get("edited") != Some(&Value::Bool(true)) {
                fields.remove("edit_date");
            }
        }
        (Variant::Message, Stage::Patch) => {
            fields.insert("edited".into(), Value::Bool(true));
            fields.insert("edit_date".into(), Value::from(now));
        }
        _ => {}
    }
}

/// Checks the shape constraints that depend on field values.
pub(crate) fn check_shape(variant: Variant, fields: &Fields) -> ObjectResult<()> {
    match variant {
        Variant::Channel => check_channel(fields),
        Variant::Attachment => check_attachment(fields),
        Variant::Account => check_account(fields),
        _ => Ok(()),
    }
}

fn check_channel(fields: &Fields) -> ObjectResult<()> {
    let channel_type = fields.get("channel_type").and_then(Value::as_str).unwrap_or_default();
    match channel_type {
        "text" | "media" => require(fields, &["parent_conference"]),
        "direct_message" => require(fields, &["members", "icon"]),
        other => Err(ObjectError::InvalidChannelType(other.to_string())),
    }
}

fn check_attachment(fields: &Fields) -> ObjectResult<()> {
    let attachment_type = fields
        .get("attachment_type")
        .and_then(Value::as_str)
        .unwrap_or_default();
    match attachment_type {
        "quote" => require(fields, &["quoted_message"]),
        "media" => require(fields, &["media_link"]),
        "embed" => require(fields, &["title", "embed_type"]),
        other => Err(ObjectError::InvalidAttachmentType(other.to_string())),
    }
}

fn check_account(fields: &Fields) -> ObjectResult<()> {
    if fields.get("bot") == Some(&Value::Bool(true)) {
        require(fields, &["bot_owner"])?;
    }
    Ok(())
}

fn require(fields: &Fields, names: &[&str]) -> ObjectResult<()> {
    match names.iter().find(|name| !fields.contains_key(**name)) {
        Some(missing) => Err(ObjectError::missing(*missing)),
        None => Ok(()),
    }
}
