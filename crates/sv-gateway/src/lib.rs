//! sv-gateway: one-shot batch round-trip with the external scheduling engine.
//!
//! The engine reads a request on stdin, writes a report to stdout and any
//! diagnostics to stderr, then exits. Nothing here interprets either stream.

pub mod engine;
pub mod error;
pub mod process;

pub use engine::{Engine, EngineOutput};
pub use error::{GatewayError, GatewayResult};
pub use process::{DEFAULT_ENGINE_PROGRAM, EngineCommand, ProcessEngine};
