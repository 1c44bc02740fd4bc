//! In-memory reference store with optional JSON snapshots.

use std::fs;
use std::path::Path;
use std::sync::RwLock;

use super::errors::{StoreError, StoreResult};
use super::ObjectStore;
use crate::object::{Fields, Record};
use crate::schema::Variant;

/// Insertion-ordered in-memory store
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<Vec<Record>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding `records`
    pub fn with_records(records: Vec<Record>) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }

    /// Number of stored records
    pub fn len(&self) -> StoreResult<usize> {
        let records = self.records.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(records.len())
    }

    pub fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.len()? == 0)
    }

    /// Load a snapshot written by [`MemoryStore::save_snapshot`].
    ///
    /// A missing file yields an empty store.
    pub fn load_snapshot(path: &Path) -> StoreResult<Self> {
        if !path.exists() {
            return Ok(Self::new());
        }
        let content = fs::read_to_string(path).map_err(|e| {
            StoreError::Snapshot(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let records: Vec<Record> = serde_json::from_str(&content).map_err(|e| {
            StoreError::Snapshot(format!("Invalid snapshot {}: {}", path.display(), e))
        })?;
        tracing::info!(path = %path.display(), records = records.len(), "loaded snapshot");
        Ok(Self::with_records(records))
    }

    /// Write all records to `path` as a JSON array.
    ///
    /// Writes to a sibling temp file first, then renames over the target.
    pub fn save_snapshot(&self, path: &Path) -> StoreResult<()> {
        let json = {
            let records = self.records.read().map_err(|_| StoreError::LockPoisoned)?;
            serde_json::to_string_pretty(&*records)
                .map_err(|e| StoreError::Snapshot(format!("Failed to encode snapshot: {}", e)))?
        };
        let tmp = path.with_extension("tmp");
        fs::write(&tmp, json).map_err(|e| {
            StoreError::Snapshot(format!("Failed to write {}: {}", tmp.display(), e))
        })?;
        fs::rename(&tmp, path).map_err(|e| {
            StoreError::Snapshot(format!("Failed to replace {}: {}", path.display(), e))
        })?;
        Ok(())
    }
}

impl ObjectStore for MemoryStore {
    fn lookup_by_id(&self, id: &str) -> StoreResult<Option<Record>> {
        let records = self.records.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(records.iter().find(|r| r.id() == id).cloned())
    }

    fn find_by_fields(&self, variant: Variant, fields: &Fields) -> StoreResult<Vec<Record>> {
        let records = self.records.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(records
            .iter()
            .filter(|r| r.object_type() == variant)
            .filter(|r| fields.iter().all(|(k, v)| r.get(k) == Some(v)))
            .cloned()
            .collect())
    }

    fn store(&self, record: Record) -> StoreResult<()> {
        let mut records = self.records.write().map_err(|_| StoreError::LockPoisoned)?;
        match records.iter_mut().find(|r| r.id() == record.id()) {
            Some(existing) => *existing = record,
            None => records.push(record),
        }
        Ok(())
    }

    /// Check and push under one write guard.
    fn insert(&self, record: Record) -> StoreResult<()> {
        let mut records = self.records.write().map_err(|_| StoreError::LockPoisoned)?;
        if records.iter().any(|r| r.id() == record.id()) {
            return Err(StoreError::IdTaken(record.id().to_string()));
        }
        records.push(record);
        Ok(())
    }

    /// Check and overwrite under one write guard.
    fn replace(&self, record: Record) -> StoreResult<()> {
        let mut records = self.records.write().map_err(|_| StoreError::LockPoisoned)?;
        match records.iter_mut().find(|r| r.id() == record.id()) {
            Some(existing) => {
                *existing = record;
                Ok(())
            }
            None => Err(StoreError::NotFound(record.id().to_string())),
        }
    }

    fn delete(&self, id: &str) -> StoreResult<bool> {
        let mut records = self.records.write().map_err(|_| StoreError::LockPoisoned)?;
        let len_before = records.len();
        records.retain(|r| r.id() != id);
        Ok(records.len() != len_before)
    }
}
