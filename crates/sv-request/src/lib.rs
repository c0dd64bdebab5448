//! sv-request: operator input collection and the engine request wire format.

pub mod builder;
pub mod schema;
pub mod validate;
pub mod wire;

pub use builder::{BuilderState, RequestBuilder, SimulationRequest};
pub use schema::RequestFile;
pub use validate::ValidationError;

pub type RequestResult<T> = Result<T, RequestError>;

#[derive(thiserror::Error, Debug)]
pub enum RequestError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Malformed request text at line {line}: {message}")]
    Wire { line: usize, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl From<sv_core::CoreError> for RequestError {
    fn from(err: sv_core::CoreError) -> Self {
        RequestError::Validation(ValidationError::Params(err))
    }
}

pub fn load_yaml(path: &std::path::Path) -> RequestResult<SimulationRequest> {
    let content = std::fs::read_to_string(path)?;
    let file: RequestFile = serde_yaml::from_str(&content)?;
    file.into_request()
}

pub fn save_yaml(path: &std::path::Path, request: &SimulationRequest) -> RequestResult<()> {
    let content = serde_yaml::to_string(&RequestFile::from_request(request))?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Load a raw engine input file (the exact text written to the engine's stdin).
pub fn load_wire(path: &std::path::Path) -> RequestResult<SimulationRequest> {
    let content = std::fs::read_to_string(path)?;
    wire::decode(&content)
}
