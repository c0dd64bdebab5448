use thiserror::Error;

pub type CoreResult<T> = Result<T, CoreError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Value out of range for {what}: {value} (allowed {min}..={max})")]
    OutOfRange {
        what: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: String },
}

impl CoreError {
    /// Fail with `OutOfRange` unless `min <= value <= max`.
    pub fn check_range(what: &'static str, value: i64, min: i64, max: i64) -> CoreResult<()> {
        if value < min || value > max {
            return Err(CoreError::OutOfRange {
                what,
                value,
                min,
                max,
            });
        }
        Ok(())
    }
}
