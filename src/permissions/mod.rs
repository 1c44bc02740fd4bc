//! # Permission Codec
//!
//! Encodes the 13-flag permission bitmask used for authorization across the
//! protocol, and maps it to and from OAuth scope strings.
//!
//! All functions are pure.

mod errors;
mod flags;
mod scopes;

pub use errors::{PermissionError, PermissionResult};
pub use flags::{value_to_flag_list, Permission, MAX_PERMISSION_VALUE};
pub use scopes::{
    flag_for_scope, flags_to_scopes, list_to_scope_string, scope_string_to_flags,
    scope_string_to_list,
};

/// Decodes a raw integer into a flag set.
pub fn decode(value: i64) -> PermissionResult<Permission> {
    Permission::decode(value)
}

/// Encodes a flag set to its integer form.
pub fn flags_to_value(flags: Permission) -> u16 {
    flags.to_value()
}
