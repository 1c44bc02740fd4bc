//! plaster - object validation and normalization for a federated chat server
//!
//! Turns untyped JSON from clients and remote instances into typed,
//! schema-conformant records:
//!
//! - [`permissions`]: 13-flag permission bitmask and OAuth scope mapping
//! - [`schema`]: static per-variant field tables
//! - [`object`]: field validation, create/patch normalization, dispatch
//! - [`stash`]: bounded multi-object fetches
//! - [`store`]: the storage seam and an in-memory reference store

pub mod cli;
pub mod config;
pub mod instance;
pub mod object;
pub mod observability;
pub mod permissions;
pub mod schema;
pub mod stash;
pub mod store;

pub use config::{Config, ConfigError};
pub use object::{Fields, Mode, ObjectEngine, ObjectError, ObjectResult, Ping, ProtocolError, Record};
pub use permissions::Permission;
pub use schema::Variant;
pub use stash::{Stash, StashError};
pub use store::{MemoryStore, ObjectStore, StoreError};
