//! OAuth scope names for permission flags.

use super::flags::Permission;

/// Scope name for every flag, in bit order.
const SCOPES: [(&str, Permission); 13] = [
    ("conference:read", Permission::CONFERENCE_READ),
    ("channel:read", Permission::CHANNEL_READ),
    ("channel:write", Permission::CHANNEL_WRITE),
    ("message:write", Permission::MESSAGE_WRITE),
    ("invite:create", Permission::INVITE_CREATE),
    ("conference_member:write_nick", Permission::MEMBER_WRITE_NICK),
    ("channel:moderate", Permission::CHANNEL_MODERATE),
    ("message:moderate", Permission::MESSAGE_MODERATE),
    ("conference_member:moderate_nick", Permission::MEMBER_MODERATE_NICK),
    ("conference_member:kick", Permission::MEMBER_KICK),
    ("conference_member:ban", Permission::MEMBER_BAN),
    ("role:moderate", Permission::ROLE_MODERATE),
    ("conference:moderate", Permission::CONFERENCE_MODERATE),
];

/// Looks up the flag for a single scope name.
pub fn flag_for_scope(scope: &str) -> Option<Permission> {
    SCOPES
        .iter()
        .find(|(name, _)| *name == scope)
        .map(|(_, flag)| *flag)
}

/// Maps scope names to flags.
///
/// Unrecognized scopes are skipped rather than rejected; clients send scopes
/// that concern other parts of the server (`account:read`, ...).
pub fn scope_string_to_flags<S: AsRef<str>>(scopes: &[S]) -> Permission {
    scopes.iter().fold(Permission::empty(), |acc, scope| {
        match flag_for_scope(scope.as_ref()) {
            Some(flag) => acc | flag,
            None => {
                tracing::debug!(scope = scope.as_ref(), "ignoring unknown scope");
                acc
            }
        }
    })
}

/// Scope names for every flag set in `flags`, in bit order.
pub fn flags_to_scopes(flags: Permission) -> Vec<&'static str> {
    SCOPES
        .iter()
        .filter(|(_, flag)| flags.contains(*flag))
        .map(|(name, _)| *name)
        .collect()
}

/// Splits an OAuth space-separated scope string.
pub fn scope_string_to_list(scope: &str) -> Vec<String> {
    scope.split_whitespace().map(str::to_string).collect()
}

/// Joins scopes into the OAuth space-separated form.
pub fn list_to_scope_string<S: AsRef<str>>(scopes: &[S]) -> String {
    scopes
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(" ")
}
