//! Instance record bootstrap.
//!
//! Every server describes itself with one instance record under the fixed
//! id `"0"`, rebuilt from configuration at each boot.

use serde_json::Value;

use crate::config::Config;
use crate::object::{Fields, ObjectEngine, ObjectResult, Record};
use crate::schema::Variant;
use crate::store::ObjectStore;

/// Id of the local instance record
pub const INSTANCE_ID: &str = "0";

/// `server_software` value advertised by this build
pub fn server_software() -> String {
    format!("plaster {}", env!("CARGO_PKG_VERSION"))
}

/// Builds the instance record from `config` and stores it, replacing any
/// previous one.
pub fn bootstrap_instance<S: ObjectStore + ?Sized>(
    store: &S,
    config: &Config,
) -> ObjectResult<Record> {
    let mut raw = Fields::new();
    raw.insert("address".into(), Value::from(config.instance_domain.as_str()));
    raw.insert("server_software".into(), Value::from(server_software()));
    raw.insert("name".into(), Value::from(config.instance_name.as_str()));
    if let Some(description) = &config.instance_description {
        raw.insert("description".into(), Value::from(description.as_str()));
    }

    let engine = ObjectEngine::new(store);
    let record = engine.create(Variant::Instance.schema(), &raw, INSTANCE_ID.to_string())?;
    store.store(record.clone())?;

    tracing::info!(address = %config.instance_domain, "instance record ready");
    Ok(record)
}
