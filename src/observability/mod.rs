//! Observability for the server binary
//!
//! - Structured logging through `tracing`
//! - Typed lifecycle events
//!
//! The library only emits `tracing` events; installing a subscriber is left
//! to the binary (see [`init_logging`]).

mod events;
mod logging;

pub use events::Event;
pub use logging::{build_filter, init_logging};
