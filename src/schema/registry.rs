//! Per-variant schema tables.
//!
//! The registry is fixed at compile time. Adding a variant means adding an
//! arm to [`Variant`] and a table here; `schema_of` keeps the match
//! exhaustive.

use super::types::{DefaultValue, FieldDef, Schema, Variant};
use crate::permissions::Permission;

/// Fields every record carries that a patch may never change.
pub const DEFAULT_NONREWRITABLE_FIELDS: [&str; 3] = ["id", "type", "object_type"];

const DEFAULT_PERMISSIONS: DefaultValue = DefaultValue::Permission(Permission::DEFAULT);

const ACCOUNT: &[Variant] = &[Variant::Account];
const ATTACHMENT: &[Variant] = &[Variant::Attachment];
const CHANNEL: &[Variant] = &[Variant::Channel];
const CONFERENCE: &[Variant] = &[Variant::Conference];
const MESSAGE: &[Variant] = &[Variant::Message];
const ROLE: &[Variant] = &[Variant::Role];
const DM_MEMBER: &[Variant] = &[Variant::Account, Variant::ConferenceMember];

static INSTANCE_SCHEMA: Schema = Schema {
    variant: Variant::Instance,
    fields: &[
        FieldDef::string("address").required().immutable(),
        FieldDef::string("server_software").required(),
        FieldDef::string("name").required(),
        FieldDef::string("description"),
    ],
};

static ACCOUNT_SCHEMA: Schema = Schema {
    variant: Variant::Account,
    fields: &[
        FieldDef::string("username").required().immutable().unique(),
        FieldDef::number("short_status")
            .required()
            .default(DefaultValue::Number(0)),
        FieldDef::string("status"),
        FieldDef::string("bio"),
        FieldDef::boolean("index").default(DefaultValue::Bool(false)),
        FieldDef::string("email"),
        FieldDef::boolean("bot").default(DefaultValue::Bool(false)),
        FieldDef::id("bot_owner", ACCOUNT),
        FieldDef::id_list("friends", ACCOUNT),
        FieldDef::id_list("blocklist", ACCOUNT),
    ],
};

static CONFERENCE_SCHEMA: Schema = Schema {
    variant: Variant::Conference,
    fields: &[
        FieldDef::string("name").required(),
        FieldDef::string("description"),
        FieldDef::string("icon").required(),
        FieldDef::id("owner", ACCOUNT).required(),
        FieldDef::boolean("index").default(DefaultValue::Bool(false)),
        FieldDef::permissions("permissions")
            .required()
            .default(DEFAULT_PERMISSIONS),
        FieldDef::datetime("creation_date").required().immutable(),
        FieldDef::id_list("channels", CHANNEL).default(DefaultValue::EmptyList),
        FieldDef::id_list("users", ACCOUNT).default(DefaultValue::EmptyList),
        FieldDef::id_list("roles", ROLE).default(DefaultValue::EmptyList),
    ],
};

static CONFERENCE_MEMBER_SCHEMA: Schema = Schema {
    variant: Variant::ConferenceMember,
    fields: &[
        FieldDef::id("user_id", ACCOUNT).required().immutable(),
        FieldDef::string("nickname"),
        FieldDef::id("parent_conference", CONFERENCE)
            .required()
            .immutable(),
        FieldDef::id_list("roles", ROLE).default(DefaultValue::EmptyList),
        FieldDef::permissions("permissions")
            .required()
            .default(DEFAULT_PERMISSIONS),
        FieldDef::boolean("banned").default(DefaultValue::Bool(false)),
    ],
};

static CHANNEL_SCHEMA: Schema = Schema {
    variant: Variant::Channel,
    fields: &[
        FieldDef::string("name").required(),
        FieldDef::permissions("permissions")
            .required()
            .default(DEFAULT_PERMISSIONS),
        FieldDef::string("channel_type").required().immutable(),
        FieldDef::id("parent_conference", CONFERENCE).immutable(),
        FieldDef::id_list("members", DM_MEMBER),
        FieldDef::string("icon"),
        FieldDef::string("description"),
    ],
};

static MESSAGE_SCHEMA: Schema = Schema {
    variant: Variant::Message,
    fields: &[
        FieldDef::string("content").required(),
        FieldDef::id("parent_channel", CHANNEL).required().immutable(),
        FieldDef::id("author", ACCOUNT).required().immutable(),
        FieldDef::datetime("post_date").required().immutable(),
        FieldDef::datetime("edit_date").immutable(),
        FieldDef::boolean("edited")
            .required()
            .immutable()
            .default(DefaultValue::Bool(false)),
        FieldDef::id_list("attachments", ATTACHMENT),
        FieldDef::list("reactions"),
        FieldDef::id("reply_to", MESSAGE).immutable(),
    ],
};

static INVITE_SCHEMA: Schema = Schema {
    variant: Variant::Invite,
    fields: &[
        FieldDef::string("name").required(),
        FieldDef::string("code").unique(),
        FieldDef::id("conference_id", CONFERENCE).required().immutable(),
        FieldDef::id("creator", ACCOUNT).required().immutable(),
    ],
};

static ROLE_SCHEMA: Schema = Schema {
    variant: Variant::Role,
    fields: &[
        FieldDef::string("name").required(),
        FieldDef::permissions("permissions")
            .required()
            .default(DEFAULT_PERMISSIONS),
        FieldDef::string("color")
            .required()
            .default(DefaultValue::Str("100, 100, 100")),
        FieldDef::string("description"),
    ],
};

static REPORT_SCHEMA: Schema = Schema {
    variant: Variant::Report,
    fields: &[
        FieldDef::any_id("target").required().immutable(),
        FieldDef::string("note"),
        FieldDef::datetime("submission_date").required().immutable(),
    ],
};

static ATTACHMENT_SCHEMA: Schema = Schema {
    variant: Variant::Attachment,
    fields: &[
        FieldDef::string("attachment_type").required().immutable(),
        FieldDef::id("quoted_message", MESSAGE),
        FieldDef::string("media_link"),
        FieldDef::string("title"),
        FieldDef::number("embed_type"),
        FieldDef::string("description"),
        FieldDef::string("color"),
        FieldDef::string("image"),
    ],
};

/// Returns the schema of a variant
pub fn schema_of(variant: Variant) -> &'static Schema {
    match variant {
        Variant::Instance => &INSTANCE_SCHEMA,
        Variant::Account => &ACCOUNT_SCHEMA,
        Variant::Conference => &CONFERENCE_SCHEMA,
        Variant::ConferenceMember => &CONFERENCE_MEMBER_SCHEMA,
        Variant::Channel => &CHANNEL_SCHEMA,
        Variant::Message => &MESSAGE_SCHEMA,
        Variant::Invite => &INVITE_SCHEMA,
        Variant::Role => &ROLE_SCHEMA,
        Variant::Report => &REPORT_SCHEMA,
        Variant::Attachment => &ATTACHMENT_SCHEMA,
    }
}

/// Looks up a schema by wire tag. `None` for unknown tags.
pub fn schema_for(variant_tag: &str) -> Option<&'static Schema> {
    Variant::from_tag(variant_tag).map(schema_of)
}

impl Variant {
    pub fn schema(&self) -> &'static Schema {
        schema_of(*self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FieldType;

    #[test]
    fn test_every_variant_is_registered() {
        for variant in Variant::ALL {
            let schema = schema_for(variant.as_str()).unwrap();
            assert_eq!(schema.variant, variant);
        }
        assert!(schema_for("carrier_pigeon").is_none());
    }

    #[test]
    fn test_field_names_are_unique_per_variant() {
        for variant in Variant::ALL {
            let names: Vec<_> = variant.schema().valid_fields().collect();
            let mut deduped = names.clone();
            deduped.sort_unstable();
            deduped.dedup();
            assert_eq!(names.len(), deduped.len(), "duplicate field in {}", variant);
        }
    }

    #[test]
    fn test_reference_fields_declare_targets() {
        for variant in Variant::ALL {
            for field in variant.schema().fields {
                assert_eq!(
                    field.field_type.is_reference(),
                    field.target.is_some(),
                    "{}.{}",
                    variant,
                    field.name
                );
            }
        }
    }

    #[test]
    fn test_reserved_names_are_not_fields() {
        for variant in Variant::ALL {
            for reserved in DEFAULT_NONREWRITABLE_FIELDS {
                assert!(!variant.schema().is_valid_field(reserved));
            }
        }
    }

    #[test]
    fn test_account_schema() {
        let schema = schema_of(Variant::Account);
        assert_eq!(
            schema.required_fields().collect::<Vec<_>>(),
            vec!["username", "short_status"]
        );
        assert_eq!(schema.unique_fields().collect::<Vec<_>>(), vec!["username"]);
        assert_eq!(schema.immutable_fields().collect::<Vec<_>>(), vec!["username"]);
        assert!(schema.field("bio").unwrap().default.is_none());
        assert_eq!(schema.field("friends").unwrap().field_type, FieldType::IdList);
    }

    #[test]
    fn test_channel_members_accept_two_variants() {
        let target = schema_of(Variant::Channel).reference_target("members").unwrap();
        assert!(target.accepts(Variant::Account));
        assert!(target.accepts(Variant::ConferenceMember));
        assert!(!target.accepts(Variant::Role));
    }
}
