//! # Object Store
//!
//! The storage collaborator the engine reads from. The engine only ever
//! reads; persisting a finished record is the caller's job.
//!
//! Implementations do not provide compare-and-swap. Callers that patch the
//! same id concurrently must serialize those patches themselves.

mod errors;
mod memory;

pub use errors::{StoreError, StoreResult};
pub use memory::MemoryStore;

use crate::object::{Fields, Record};
use crate::schema::Variant;

/// Storage backend for records
pub trait ObjectStore: Send + Sync {
    /// Find a record by its id
    fn lookup_by_id(&self, id: &str) -> StoreResult<Option<Record>>;

    /// Check whether an id is stored
    fn exists(&self, id: &str) -> StoreResult<bool> {
        Ok(self.lookup_by_id(id)?.is_some())
    }

    /// Records of `variant` whose fields equal every pair in `fields`
    fn find_by_fields(&self, variant: Variant, fields: &Fields) -> StoreResult<Vec<Record>>;

    /// Insert or overwrite a record
    fn store(&self, record: Record) -> StoreResult<()>;

    /// Insert a record whose id is not yet stored
    ///
    /// The default checks and writes in two steps. Stores shared across
    /// threads override it to do both under one lock.
    fn insert(&self, record: Record) -> StoreResult<()> {
        if self.exists(record.id())? {
            return Err(StoreError::IdTaken(record.id().to_string()));
        }
        self.store(record)
    }

    /// Overwrite a record whose id is already stored
    ///
    /// Same two-step default as [`ObjectStore::insert`].
    fn replace(&self, record: Record) -> StoreResult<()> {
        if !self.exists(record.id())? {
            return Err(StoreError::NotFound(record.id().to_string()));
        }
        self.store(record)
    }

    /// Remove a record. Returns whether anything was removed.
    fn delete(&self, id: &str) -> StoreResult<bool>;
}
