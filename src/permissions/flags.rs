//! Permission bitmask.
//!
//! A permission value is an integer in `0..=8191`; each of the 13 bits is one
//! capability. The bit order is part of the wire protocol and must not change.

use bitflags::bitflags;
use serde_json::Value;

use super::errors::{PermissionError, PermissionResult};
use super::scopes;

/// Largest encodable permission value (all 13 flags set).
pub const MAX_PERMISSION_VALUE: i64 = 8191;

bitflags! {
    /// Capability flags carried by conferences, channels, roles and members.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
    pub struct Permission: u16 {
        /// See the conference and its member list.
        const CONFERENCE_READ = 1 << 0;
        /// Read messages in a channel.
        const CHANNEL_READ = 1 << 1;
        /// Post into a channel.
        const CHANNEL_WRITE = 1 << 2;
        /// Edit and delete own messages.
        const MESSAGE_WRITE = 1 << 3;
        /// Create invites.
        const INVITE_CREATE = 1 << 4;
        /// Change own nickname.
        const MEMBER_WRITE_NICK = 1 << 5;
        /// Rename and reconfigure channels.
        const CHANNEL_MODERATE = 1 << 6;
        /// Delete messages of others.
        const MESSAGE_MODERATE = 1 << 7;
        /// Change nicknames of others.
        const MEMBER_MODERATE_NICK = 1 << 8;
        /// Kick members.
        const MEMBER_KICK = 1 << 9;
        /// Ban members.
        const MEMBER_BAN = 1 << 10;
        /// Create, edit and assign roles.
        const ROLE_MODERATE = 1 << 11;
        /// Edit the conference itself.
        const CONFERENCE_MODERATE = 1 << 12;

        /// Everything a regular member gets.
        const DEFAULT = Self::CONFERENCE_READ.bits()
            | Self::CHANNEL_READ.bits()
            | Self::CHANNEL_WRITE.bits()
            | Self::MESSAGE_WRITE.bits()
            | Self::INVITE_CREATE.bits()
            | Self::MEMBER_WRITE_NICK.bits();
    }
}

impl Default for Permission {
    fn default() -> Self {
        Permission::DEFAULT
    }
}

impl Permission {
    /// Decodes a raw integer into a flag set.
    pub fn decode(value: i64) -> PermissionResult<Self> {
        if !(0..=MAX_PERMISSION_VALUE).contains(&value) {
            return Err(PermissionError::OutOfRange(value));
        }
        // Every bit in range is a defined flag.
        Ok(Permission::from_bits_truncate(value as u16))
    }

    /// Encodes the flag set back to its integer form.
    pub fn to_value(self) -> u16 {
        self.bits()
    }

    /// Breaks the set down into its single-flag components, lowest first.
    pub fn to_flag_list(self) -> Vec<u16> {
        value_to_flag_list(self)
    }

    /// Resolves a scope name or preset shorthand.
    ///
    /// Presets are `none`, `default` and `all`.
    pub fn from_scope_or_preset(name: &str) -> PermissionResult<Self> {
        match name {
            "none" => Ok(Permission::empty()),
            "default" => Ok(Permission::DEFAULT),
            "all" => Ok(Permission::all()),
            other => scopes::flag_for_scope(other)
                .ok_or_else(|| PermissionError::UnknownName(other.to_string())),
        }
    }

    /// Reads a permission field value as submitted by a client.
    ///
    /// Accepted shapes: an integer, a list of single flags (integers or
    /// names), or a whitespace-separated string of names.
    pub fn from_json(value: &Value) -> PermissionResult<Self> {
        match value {
            Value::Number(n) => {
                let raw = n.as_i64().ok_or(PermissionError::Malformed("non-integer number"))?;
                Permission::decode(raw)
            }
            Value::Array(items) => items.iter().try_fold(Permission::empty(), |acc, item| {
                Ok(acc | single_flag(item)?)
            }),
            Value::String(s) => s
                .split_whitespace()
                .try_fold(Permission::empty(), |acc, name| Ok(acc | Permission::from_scope_or_preset(name)?)),
            Value::Null => Err(PermissionError::Malformed("null")),
            Value::Bool(_) => Err(PermissionError::Malformed("boolean")),
            Value::Object(_) => Err(PermissionError::Malformed("object")),
        }
    }

    /// Whether `self` grants everything in `required`.
    pub fn allows(self, required: Permission) -> bool {
        self.contains(required)
    }
}

/// One element of a flag list: an integer with exactly one bit set, or a name.
fn single_flag(item: &Value) -> PermissionResult<Permission> {
    match item {
        Value::Number(n) => {
            let raw = n.as_i64().ok_or(PermissionError::Malformed("non-integer number"))?;
            let flags = Permission::decode(raw)?;
            if flags.bits().count_ones() != 1 {
                return Err(PermissionError::NotASingleFlag(raw));
            }
            Ok(flags)
        }
        Value::String(name) => Permission::from_scope_or_preset(name),
        _ => Err(PermissionError::Malformed("list element")),
    }
}

/// Decomposes a flag set into the powers of two that are set, ascending.
///
/// Raw integers go through [`Permission::decode`] first, so a value above
/// 8191 never reaches the decomposition.
pub fn value_to_flag_list(flags: Permission) -> Vec<u16> {
    let mut rest = flags.bits();
    let mut flags = Vec::with_capacity(rest.count_ones() as usize);
    while rest != 0 {
        let lowest = rest & rest.wrapping_neg();
        flags.push(lowest);
        rest &= rest - 1;
    }
    flags
}
