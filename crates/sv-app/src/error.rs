//! Error types for the sv-app service layer.

use std::path::PathBuf;

use sv_gateway::GatewayError;
use sv_report::ReportError;
use sv_request::{RequestError, ValidationError};

/// Application error type that wraps errors from the pipeline crates and
/// provides a unified error interface for frontends.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Failed to read config file: {path}")]
    ConfigFileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Config error: {0}")]
    Config(String),

    #[error("Invalid request file {path}: {source}")]
    RequestFile {
        path: PathBuf,
        source: RequestError,
    },

    #[error("Request error: {0}")]
    Request(#[from] RequestError),

    #[error("Engine reported an error:\n{stderr}")]
    EngineReported { stderr: String },

    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error(transparent)]
    Report(#[from] ReportError),

    #[error("Failed to write output file: {path}")]
    OutputWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// One-line description of which side failed, shown above the details.
    pub fn headline(&self) -> &'static str {
        match self {
            AppError::EngineReported { .. } => "The engine reported an error",
            AppError::Gateway(GatewayError::LaunchFailure { .. }) => {
                "The engine could not be started"
            }
            AppError::Gateway(GatewayError::TimedOut { .. }) => "The engine did not finish",
            AppError::Gateway(GatewayError::Io { .. }) => "Communication with the engine failed",
            AppError::Report(_) => "The engine output does not match the expected report format",
            AppError::Request(_) | AppError::RequestFile { .. } => "The request is not valid",
            AppError::ConfigFileRead { .. } | AppError::Config(_) => "The configuration is not valid",
            _ => "The run failed",
        }
    }
}

/// Result type for sv-app operations.
pub type AppResult<T> = Result<T, AppError>;

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::Request(RequestError::Validation(err))
    }
}

impl From<sv_core::CoreError> for AppError {
    fn from(err: sv_core::CoreError) -> Self {
        AppError::Request(RequestError::from(err))
    }
}
