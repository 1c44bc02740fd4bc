//! CLI command implementations
//!
//! `serve` boots in a fixed order:
//! 1. Configuration load
//! 2. Snapshot load
//! 3. Instance record bootstrap
//!
//! Then it answers one JSON request per stdin line until input closes.

use std::io::{self, BufRead, Write};
use std::path::Path;

use serde::Deserialize;
use serde_json::{json, Value};

use crate::config::Config;
use crate::instance::bootstrap_instance;
use crate::object::{Fields, Mode, ObjectEngine, ObjectError, Ping};
use crate::observability::{init_logging, Event};
use crate::permissions::{flags_to_scopes, scope_string_to_flags, Permission};
use crate::store::{MemoryStore, ObjectStore};

use super::args::{Command, PermissionAction};
use super::errors::{CliError, CliResult};
use super::io::{read_lines, write_error, write_response, BadRequest, ServerError};

/// One line of serve input
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Request {
    Create { object: Fields },
    Patch { id: String, object: Fields },
    Get { id: String },
    Delete { id: String },
    Stash { id_list: Vec<String> },
}

impl Request {
    /// Whether a successful request changed the store
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            Request::Create { .. } | Request::Patch { .. } | Request::Delete { .. }
        )
    }
}

/// Parses process arguments and runs the selected command.
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Serve { config } => serve(&config),
        Command::Permissions { action } => permissions(action),
    }
}

/// Start the server on stdin/stdout
pub fn serve(config_path: &Path) -> CliResult<()> {
    let config = Config::load(config_path)?;
    init_logging(&config.log_filter).map_err(|e| CliError::Boot(e.to_string()))?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    serve_with(&config, stdin.lock(), stdout.lock())
}

/// Boot from `config` and serve requests read from `input`.
pub fn serve_with<R: BufRead, W: Write>(config: &Config, input: R, mut output: W) -> CliResult<()> {
    Event::BootStart.emit();
    Event::ConfigLoaded.emit();

    let store = match &config.snapshot_path {
        Some(path) => MemoryStore::load_snapshot(path)?,
        None => MemoryStore::new(),
    };
    Event::SnapshotLoaded.emit();

    bootstrap_instance(&store, config)?;
    Event::BootComplete.emit();

    let engine = ObjectEngine::new(&store).with_stash_limit(config.stash_limit);

    for line in read_lines(input) {
        let line = line?;
        let request = match serde_json::from_str::<Request>(&line) {
            Ok(request) => request,
            Err(e) => {
                Event::RequestMalformed.emit();
                write_error(&mut output, &Ping::from_error(&BadRequest(e.to_string())))?;
                continue;
            }
        };

        let mutation = request.is_mutation();
        match handle_request(&engine, request) {
            Ok(data) => {
                if mutation {
                    if let Some(path) = &config.snapshot_path {
                        store.save_snapshot(path)?;
                        Event::SnapshotSaved.emit();
                    }
                }
                write_response(&mut output, data)?;
            }
            Err(ping) => write_error(&mut output, &ping)?,
        }
    }

    Event::ShutdownComplete.emit();
    Ok(())
}

/// Answers a single request. Failures come back as error pings.
pub fn handle_request<S: ObjectStore + ?Sized>(
    engine: &ObjectEngine<'_, S>,
    request: Request,
) -> Result<Value, Ping> {
    let store = engine.store();
    match request {
        Request::Create { object } => {
            let record = engine.dispatch(&object, Mode::Create).map_err(ping)?;
            store
                .insert(record.clone())
                .map_err(|e| ping(ObjectError::from(e)))?;
            Ok(record.to_value())
        }
        Request::Patch { id, object } => {
            let record = engine.dispatch(&object, Mode::patch(id)).map_err(ping)?;
            store
                .replace(record.clone())
                .map_err(|e| ping(ObjectError::from(e)))?;
            Ok(record.to_value())
        }
        Request::Get { id } => {
            let record = store
                .lookup_by_id(&id)
                .map_err(|e| ping(ObjectError::from(e)))?
                .ok_or_else(|| ping(ObjectError::TargetNotFound(id)))?;
            Ok(record.to_value())
        }
        Request::Delete { id } => {
            let removed = store.delete(&id).map_err(|e| ping(ObjectError::from(e)))?;
            if !removed {
                return Err(ping(ObjectError::TargetNotFound(id)));
            }
            Ok(json!({ "id": id }))
        }
        Request::Stash { id_list } => {
            let stash = engine
                .build_stash(&id_list)
                .map_err(|e| Ping::from_error(&e))?;
            serde_json::to_value(&stash)
                .map_err(|e| Ping::from_error(&ServerError(e.to_string())))
        }
    }
}

fn ping(err: ObjectError) -> Ping {
    Ping::from_error(&err)
}

/// Permission codec utilities
pub fn permissions(action: PermissionAction) -> CliResult<()> {
    let flags = match action {
        PermissionAction::Decode { value } => {
            Permission::decode(value).map_err(|e| CliError::InvalidArgument(e.to_string()))?
        }
        PermissionAction::Scopes { scopes } => scope_string_to_flags(&scopes),
    };
    write_response(&mut io::stdout().lock(), describe_permissions(flags))
}

/// `{"value", "flags", "scopes"}` view of a permission set
pub fn describe_permissions(flags: Permission) -> Value {
    json!({
        "value": flags.to_value(),
        "flags": flags.to_flag_list(),
        "scopes": flags_to_scopes(flags),
    })
}
