//! CLI module for plaster
//!
//! Provides command-line interface for:
//! - serve: Boot the engine and answer JSON requests on stdin
//! - permissions: Inspect permission values and OAuth scopes

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command, PermissionAction};
pub use commands::{
    describe_permissions, handle_request, permissions, run, run_command, serve, serve_with,
    Request,
};
pub use errors::{CliError, CliResult};
pub use io::{read_lines, write_error, write_response, BadRequest, ServerError};
