//! # Stash Aggregator
//!
//! Batch fetch of records by id for the stash endpoint. A stash is all or
//! nothing: the first missing id aborts the request.

mod errors;

pub use errors::{StashError, StashResult};

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::object::Record;
use crate::store::ObjectStore;

/// Protocol maximum of ids per stash request
pub const MAX_STASH_IDS: usize = 100;

/// Value of the `type` key on a stash
pub const STASH_TYPE: &str = "stash";

/// Records bundled by id.
///
/// Serializes as `{"type": "stash", "id_list": [...], "<id>": <record>, ...}`
/// with entries in request order.
#[derive(Debug, Clone, PartialEq)]
pub struct Stash {
    id_list: Vec<String>,
    records: Vec<Record>,
}

impl Stash {
    /// Requested ids, as submitted
    pub fn id_list(&self) -> &[String] {
        &self.id_list
    }

    /// Bundled records in request order, one per distinct id
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn get(&self, id: &str) -> Option<&Record> {
        self.records.iter().find(|r| r.id() == id)
    }

    /// Number of bundled records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Serialize for Stash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.records.len() + 2))?;
        map.serialize_entry("type", STASH_TYPE)?;
        map.serialize_entry("id_list", &self.id_list)?;
        for record in &self.records {
            map.serialize_entry(record.id(), record)?;
        }
        map.end()
    }
}

/// Fetches every id in `id_list`.
///
/// # Errors
///
/// - `TooManyIds` if more than `limit` ids are requested
/// - `MissingId` for the first id, in input order, that is not stored
pub fn build_stash<S: ObjectStore + ?Sized>(
    store: &S,
    id_list: &[String],
    limit: usize,
) -> StashResult<Stash> {
    if id_list.len() > limit {
        return Err(StashError::TooManyIds {
            count: id_list.len(),
            limit,
        });
    }

    let mut records: Vec<Record> = Vec::with_capacity(id_list.len());
    for id in id_list {
        if records.iter().any(|r| r.id() == id) {
            continue;
        }
        let record = store
            .lookup_by_id(id)?
            .ok_or_else(|| StashError::MissingId(id.clone()))?;
        records.push(record);
    }

    tracing::debug!(requested = id_list.len(), bundled = records.len(), "built stash");

    Ok(Stash {
        id_list: id_list.to_vec(),
        records,
    })
}
