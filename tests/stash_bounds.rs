//! Stash Bound Tests
//!
//! - More ids than the bound fail before any lookup
//! - Any missing id fails the whole stash
//! - Output carries the request metadata and one entry per id

use plaster::object::{Fields, Mode, ObjectEngine, ProtocolError};
use plaster::stash::{build_stash, StashError, MAX_STASH_IDS};
use plaster::store::{MemoryStore, ObjectStore};
use serde_json::json;

fn populate(store: &MemoryStore, count: usize) -> Vec<String> {
    let engine = ObjectEngine::new(store);
    (0..count)
        .map(|i| {
            let raw: Fields = json!({"object_type": "role", "name": format!("role-{}", i)})
                .as_object()
                .unwrap()
                .clone();
            let record = engine.dispatch(&raw, Mode::Create).unwrap();
            let id = record.id().to_string();
            store.insert(record).unwrap();
            id
        })
        .collect()
}

#[test]
fn test_too_many_ids() {
    let store = MemoryStore::new();
    let ids: Vec<String> = (0..=MAX_STASH_IDS).map(|i| format!("id-{}", i)).collect();
    assert_eq!(ids.len(), 101);

    let err = ObjectEngine::new(&store).build_stash(&ids).unwrap_err();
    assert!(matches!(err, StashError::TooManyIds { count: 101, limit: 100 }));
    assert_eq!(err.error_code(), 11);
}

#[test]
fn test_full_stash() {
    let store = MemoryStore::new();
    let ids = populate(&store, MAX_STASH_IDS);

    let stash = ObjectEngine::new(&store).build_stash(&ids).unwrap();
    assert_eq!(stash.len(), 100);
    assert_eq!(stash.id_list(), ids.as_slice());

    let wire = serde_json::to_value(&stash).unwrap();
    let wire = wire.as_object().unwrap();
    assert_eq!(wire["type"], "stash");
    assert_eq!(wire["id_list"].as_array().unwrap().len(), 100);
    // 100 records plus "type" and "id_list"
    assert_eq!(wire.len(), 102);
    assert_eq!(wire[&ids[7]]["name"], "role-7");
}

#[test]
fn test_missing_id_fails_whole_stash() {
    let store = MemoryStore::new();
    let mut ids = populate(&store, MAX_STASH_IDS - 1);
    ids.insert(50, "missing".to_string());

    let err = build_stash(&store, &ids, MAX_STASH_IDS).unwrap_err();
    assert!(matches!(err, StashError::MissingId(ref id) if id == "missing"));
    assert_eq!(err.error_code(), 9);
}

/// A lowered limit applies; a raised one is capped at the protocol maximum.
#[test]
fn test_configured_limit() {
    let store = MemoryStore::new();
    let ids = populate(&store, 5);

    let err = ObjectEngine::new(&store)
        .with_stash_limit(4)
        .build_stash(&ids)
        .unwrap_err();
    assert!(matches!(err, StashError::TooManyIds { count: 5, limit: 4 }));

    let many: Vec<String> = (0..150).map(|i| i.to_string()).collect();
    let err = ObjectEngine::new(&store)
        .with_stash_limit(500)
        .build_stash(&many)
        .unwrap_err();
    assert!(matches!(err, StashError::TooManyIds { limit: 100, .. }));
}

#[test]
fn test_duplicate_ids_bundled_once() {
    let store = MemoryStore::new();
    let ids = populate(&store, 2);
    let request = vec![ids[0].clone(), ids[1].clone(), ids[0].clone()];

    let stash = ObjectEngine::new(&store).build_stash(&request).unwrap();
    assert_eq!(stash.len(), 2);
    assert_eq!(stash.id_list().len(), 3);
    assert!(stash.get(&ids[0]).is_some());
}
