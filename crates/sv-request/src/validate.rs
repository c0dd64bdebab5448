//! Process descriptor validation.

use sv_core::CoreError;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Process name is required")]
    EmptyName,

    #[error("Invalid process name '{name}': {reason}")]
    InvalidName { name: String, reason: &'static str },

    #[error("All {expected} processes have already been entered")]
    CapacityReached { expected: usize },

    #[error("Request incomplete: {have} of {expected} processes entered")]
    Incomplete { have: usize, expected: usize },

    #[error(transparent)]
    Params(#[from] CoreError),
}

/// Trim a process name and check that it can travel on a request line.
///
/// Commas and line breaks would split the record on the wire, so they are
/// rejected. Names the engine or trace parser handle poorly only warn.
pub fn validate_name(raw: &str) -> Result<String, ValidationError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(ValidationError::EmptyName);
    }
    if name.contains(',') {
        return Err(ValidationError::InvalidName {
            name: name.to_string(),
            reason: "must not contain a comma",
        });
    }
    if name.chars().any(|c| c == '\n' || c == '\r') {
        return Err(ValidationError::InvalidName {
            name: name.to_string(),
            reason: "must not contain a line break",
        });
    }

    if !name.chars().all(char::is_alphabetic) {
        tracing::warn!(
            name,
            "process name is not purely alphabetic; its trace row will not be recognized"
        );
    } else if name.chars().count() > 1 {
        tracing::warn!(name, "the engine identifies processes by a single character");
    }

    Ok(name.to_string())
}

pub fn validate_service(service: u32) -> Result<(), ValidationError> {
    CoreError::check_range("service time", service as i64, 1, u32::MAX as i64)?;
    Ok(())
}
