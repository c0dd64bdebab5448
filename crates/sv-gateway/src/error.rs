use std::path::PathBuf;
use std::time::Duration;

pub type GatewayResult<T> = Result<T, GatewayError>;

#[derive(thiserror::Error, Debug)]
pub enum GatewayError {
    #[error("Failed to launch engine {program}: {source}")]
    LaunchFailure {
        program: PathBuf,
        source: std::io::Error,
    },

    #[error("Engine I/O failed while {during}: {source}")]
    Io {
        during: &'static str,
        source: std::io::Error,
    },

    #[error("Engine did not finish within {timeout:?} and was terminated")]
    TimedOut { timeout: Duration },
}
