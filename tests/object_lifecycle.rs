//! Object Lifecycle Tests
//!
//! Create and patch through the dispatcher:
//! - Ids are assigned on create and kept on patch
//! - Defaults fill absent fields, never present ones
//! - Protected fields cannot change on patch
//! - Server-set timestamps are stamped, not taken from input
//! - Every variant can be built from a minimal valid input

use plaster::object::{Fields, Mode, ObjectEngine, ObjectError, Record};
use plaster::schema::Variant;
use plaster::store::{MemoryStore, ObjectStore};
use serde_json::{json, Value};

// =============================================================================
// Helper Functions
// =============================================================================

fn fields(value: Value) -> Fields {
    value.as_object().unwrap().clone()
}

fn create(store: &MemoryStore, value: Value) -> Record {
    let record = ObjectEngine::new(store)
        .dispatch(&fields(value), Mode::Create)
        .unwrap();
    store.insert(record.clone()).unwrap();
    record
}

fn patch(store: &MemoryStore, id: &str, value: Value) -> Result<Record, ObjectError> {
    let record = ObjectEngine::new(store).dispatch(&fields(value), Mode::patch(id))?;
    store.replace(record.clone()).unwrap();
    Ok(record)
}

/// Builds one record of every variant, each referencing the ones before it.
fn populate(store: &MemoryStore) -> Vec<Record> {
    let account = create(store, json!({"object_type": "account", "username": "owner"}));
    let conference = create(
        store,
        json!({
            "object_type": "conference",
            "name": "Rust",
            "icon": "https://example.org/rust.png",
            "owner": account.id()
        }),
    );
    let member = create(
        store,
        json!({
            "object_type": "conference_member",
            "user_id": account.id(),
            "parent_conference": conference.id()
        }),
    );
    let channel = create(
        store,
        json!({
            "object_type": "channel",
            "name": "general",
            "channel_type": "text",
            "parent_conference": conference.id()
        }),
    );
    let message = create(
        store,
        json!({
            "object_type": "message",
            "content": "hello",
            "parent_channel": channel.id(),
            "author": account.id()
        }),
    );
    let attachment = create(
        store,
        json!({
            "object_type": "attachment",
            "attachment_type": "quote",
            "quoted_message": message.id()
        }),
    );
    let invite = create(
        store,
        json!({
            "object_type": "invite",
            "name": "welcome",
            "conference_id": conference.id(),
            "creator": account.id()
        }),
    );
    let role = create(store, json!({"object_type": "role", "name": "moderator"}));
    let report = create(store, json!({"object_type": "report", "target": message.id()}));

    vec![account, conference, member, channel, message, attachment, invite, role, report]
}

// =============================================================================
// Create / Patch Scenario
// =============================================================================

/// Account create, harmless patch, then a rejected username rewrite.
#[test]
fn test_account_create_then_patch() {
    let store = MemoryStore::new();

    let bob = create(
        &store,
        json!({"object_type": "account", "username": "bob", "short_status": 1}),
    );
    assert!(!bob.id().is_empty());
    assert_eq!(bob.object_type(), Variant::Account);
    assert_eq!(bob.get("short_status"), Some(&json!(1)));
    assert!(bob.get("bio").is_none());

    let patched = patch(&store, bob.id(), json!({"bio": "hi"})).unwrap();
    assert_eq!(patched.id(), bob.id());
    assert_eq!(patched.get("username"), Some(&json!("bob")));
    assert_eq!(patched.get("bio"), Some(&json!("hi")));
    assert_eq!(patched.get("short_status"), Some(&json!(1)));

    let err = patch(&store, bob.id(), json!({"username": "carol"})).unwrap_err();
    assert!(matches!(err, ObjectError::ImmutableFieldRewrite(ref f) if f == "username"));

    // A rejected patch leaves the stored record untouched.
    let stored = store.lookup_by_id(bob.id()).unwrap().unwrap();
    assert_eq!(stored.get("username"), Some(&json!("bob")));
}

/// Defaults apply when a field is absent.
#[test]
fn test_defaults_fill_absent_fields() {
    let store = MemoryStore::new();
    let account = create(&store, json!({"object_type": "account", "username": "dana"}));

    assert_eq!(account.get("short_status"), Some(&json!(0)));
    assert_eq!(account.get("bot"), Some(&json!(false)));
    assert_eq!(account.get("index"), Some(&json!(false)));
    assert!(account.get("email").is_none());
}

/// Unknown fields are dropped from the record.
#[test]
fn test_unknown_fields_dropped() {
    let store = MemoryStore::new();
    let account = create(
        &store,
        json!({"object_type": "account", "username": "erin", "favourite_colour": "teal"}),
    );
    assert!(account.get("favourite_colour").is_none());
}

/// Re-sending the whole stored object as a patch succeeds.
#[test]
fn test_echoed_object_patch_accepted() {
    let store = MemoryStore::new();
    let records = populate(&store);

    for record in records {
        let echoed = record.to_value();
        let result = patch(&store, record.id(), echoed);
        assert!(result.is_ok(), "{:?}: {:?}", record.object_type(), result);
    }
}

/// Envelope keys are protected for every variant.
#[test]
fn test_envelope_keys_protected() {
    let store = MemoryStore::new();
    let account = create(&store, json!({"object_type": "account", "username": "finn"}));

    let err = patch(&store, account.id(), json!({"id": "other"})).unwrap_err();
    assert!(matches!(err, ObjectError::ImmutableFieldRewrite(ref f) if f == "id"));

    let err = patch(&store, account.id(), json!({"object_type": "role", "name": "x"})).unwrap_err();
    assert!(matches!(err, ObjectError::ImmutableFieldRewrite(ref f) if f == "object_type"));
}

/// Patching an id that is not stored fails.
#[test]
fn test_patch_missing_target() {
    let store = MemoryStore::new();
    let err = patch(&store, "ghost", json!({"object_type": "account", "bio": "x"})).unwrap_err();
    assert!(matches!(err, ObjectError::TargetNotFound(ref id) if id == "ghost"));

    let err = patch(&store, "ghost", json!({"bio": "x"})).unwrap_err();
    assert!(matches!(err, ObjectError::TargetNotFound(_)));
}

// =============================================================================
// Dispatch Tests
// =============================================================================

#[test]
fn test_dispatch_requires_object_type() {
    let store = MemoryStore::new();
    let engine = ObjectEngine::new(&store);

    let err = engine
        .dispatch(&fields(json!({"username": "x"})), Mode::Create)
        .unwrap_err();
    assert!(matches!(err, ObjectError::MissingObjectType));

    let err = engine
        .dispatch(&fields(json!({"object_type": "spaceship"})), Mode::Create)
        .unwrap_err();
    assert!(matches!(err, ObjectError::UnknownVariant(ref t) if t == "spaceship"));
}

/// Every variant builds from a minimal input and passes its own
/// required-field check.
#[test]
fn test_every_variant_constructs() {
    let store = MemoryStore::new();
    let records = populate(&store);

    let variants: Vec<Variant> = records.iter().map(Record::object_type).collect();
    for variant in Variant::ALL {
        if variant == Variant::Instance {
            continue;
        }
        assert!(variants.contains(&variant), "no record for {}", variant);
    }

    for record in &records {
        for field in record.object_type().schema().required_fields() {
            assert!(
                record.get(field).is_some(),
                "{} missing required {}",
                record.object_type(),
                field
            );
        }
    }
}

// =============================================================================
// Stamp Tests
// =============================================================================

/// Client-supplied timestamps are overwritten on create.
#[test]
fn test_message_post_date_is_server_set() {
    let store = MemoryStore::new();
    let records = populate(&store);
    let channel = &records[3];
    let author = &records[0];

    let message = create(
        &store,
        json!({
            "object_type": "message",
            "content": "backdated",
            "parent_channel": channel.id(),
            "author": author.id(),
            "post_date": "1999-01-01T00:00:00+00:00",
            "edit_date": "1999-01-02T00:00:00+00:00"
        }),
    );

    let post_date = message.get("post_date").and_then(Value::as_str).unwrap();
    assert!(!post_date.starts_with("1999"));
    assert!(post_date.ends_with("+00:00"));
    assert!(message.get("edit_date").is_none());
    assert_eq!(message.get("edited"), Some(&json!(false)));
}

/// Editing a message marks it edited and stamps the edit time.
#[test]
fn test_message_patch_marks_edited() {
    let store = MemoryStore::new();
    let records = populate(&store);
    let message = &records[4];

    let edited = patch(&store, message.id(), json!({"content": "hello, world"})).unwrap();
    assert_eq!(edited.get("content"), Some(&json!("hello, world")));
    assert_eq!(edited.get("edited"), Some(&json!(true)));
    assert!(edited.get("edit_date").is_some());
    assert_eq!(edited.get("post_date"), message.get("post_date"));
}

/// Conference creation dates cannot be rewritten.
#[test]
fn test_conference_creation_date_protected() {
    let store = MemoryStore::new();
    let records = populate(&store);
    let conference = &records[1];

    let err = patch(
        &store,
        conference.id(),
        json!({"creation_date": "2001-01-01T00:00:00+00:00"}),
    )
    .unwrap_err();
    assert!(matches!(err, ObjectError::ImmutableFieldRewrite(ref f) if f == "creation_date"));
}

// =============================================================================
// Shape Tests
// =============================================================================

#[test]
fn test_text_channel_needs_parent_conference() {
    let store = MemoryStore::new();
    let err = ObjectEngine::new(&store)
        .dispatch(
            &fields(json!({"object_type": "channel", "name": "c", "channel_type": "text"})),
            Mode::Create,
        )
        .unwrap_err();
    assert!(matches!(err, ObjectError::MissingRequiredField(ref f) if f == "parent_conference"));
}

#[test]
fn test_unknown_channel_type_rejected() {
    let store = MemoryStore::new();
    let err = ObjectEngine::new(&store)
        .dispatch(
            &fields(json!({"object_type": "channel", "name": "c", "channel_type": "carrier_pigeon"})),
            Mode::Create,
        )
        .unwrap_err();
    assert!(matches!(err, ObjectError::InvalidChannelType(ref t) if t == "carrier_pigeon"));
}

/// Direct message channels reference their members, not a conference.
#[test]
fn test_direct_message_channel() {
    let store = MemoryStore::new();
    let a = create(&store, json!({"object_type": "account", "username": "a"}));
    let b = create(&store, json!({"object_type": "account", "username": "b"}));

    let dm = create(
        &store,
        json!({
            "object_type": "channel",
            "name": "a+b",
            "channel_type": "direct_message",
            "members": [a.id(), b.id()],
            "icon": "https://example.org/dm.png"
        }),
    );
    assert_eq!(dm.get("members"), Some(&json!([a.id(), b.id()])));
    assert_eq!(dm.get("permissions"), Some(&json!(63)));
}

/// A bot account must name its owner.
#[test]
fn test_bot_account_needs_owner() {
    let store = MemoryStore::new();
    let err = ObjectEngine::new(&store)
        .dispatch(
            &fields(json!({"object_type": "account", "username": "beep", "bot": true})),
            Mode::Create,
        )
        .unwrap_err();
    assert!(matches!(err, ObjectError::MissingRequiredField(ref f) if f == "bot_owner"));
}

// =============================================================================
// Permission Field Tests
// =============================================================================

/// Permission fields accept flag lists and scope names and store the value.
#[test]
fn test_permission_field_forms() {
    let store = MemoryStore::new();

    let role = create(
        &store,
        json!({"object_type": "role", "name": "r1", "permissions": [1, 2, 4]}),
    );
    assert_eq!(role.get("permissions"), Some(&json!(7)));

    let role = create(
        &store,
        json!({"object_type": "role", "name": "r2", "permissions": "all"}),
    );
    assert_eq!(role.get("permissions"), Some(&json!(8191)));

    let err = ObjectEngine::new(&store)
        .dispatch(
            &fields(json!({"object_type": "role", "name": "r3", "permissions": 9000})),
            Mode::Create,
        )
        .unwrap_err();
    assert!(matches!(err, ObjectError::InvalidPermissionValue { ref field, .. } if field == "permissions"));
}
