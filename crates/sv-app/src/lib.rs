//! Shared application service layer for schedview.
//!
//! Frontends call into this crate to load configuration and requests, run
//! the engine pipeline, render reports, and drive an operator session.

pub mod config;
pub mod error;
pub mod output;
pub mod progress;
pub mod run_service;
pub mod session;

// Re-export key types for convenience
pub use config::{
    AppConfig, EngineConfig, OutputConfig, OutputFormat, load_config, load_config_or_default,
};
pub use error::{AppError, AppResult};
pub use output::{render_report, write_output};
pub use progress::{RunProgressEvent, RunStage};
pub use run_service::{
    RunResponse, RunTimingSummary, load_request, parse_output, run_simulation,
    run_simulation_with_progress,
};
pub use session::{Session, SessionSummary};
