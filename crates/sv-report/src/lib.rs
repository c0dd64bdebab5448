//! sv-report: decoding engine output into structured reports and projecting
//! them into display artifacts.

pub mod html;
pub mod stats;
pub mod text;
pub mod trace;
pub mod types;

pub use stats::parse_stats;
pub use trace::parse_trace;
pub use types::*;

use sv_core::Mode;

pub type ReportResult<T> = Result<T, ReportError>;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ReportError {
    #[error("Malformed stats report: {reason}")]
    MalformedStats { reason: String },
}

/// Parse raw engine stdout in the shape selected by `mode`.
///
/// Stats parsing is strict. Trace parsing never fails: lines it does not
/// recognize are skipped.
pub fn parse(mode: Mode, raw: &str) -> ReportResult<EngineReport> {
    match mode {
        Mode::Trace => Ok(EngineReport::Trace(parse_trace(raw))),
        Mode::Stats => parse_stats(raw).map(EngineReport::Stats),
    }
}

/// Split into trimmed lines and drop blanks.
pub(crate) fn content_lines(raw: &str) -> impl Iterator<Item = &str> {
    raw.lines().map(str::trim).filter(|line| !line.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_lines_trim_and_skip_blanks() {
        let lines: Vec<&str> = content_lines("  a \n\n \t\nb\r\n").collect();
        assert_eq!(lines, vec!["a", "b"]);
    }

    #[test]
    fn dispatches_on_mode() {
        assert!(matches!(
            parse(Mode::Trace, "FCFS 0 1\nA * *"),
            Ok(EngineReport::Trace(_))
        ));
        assert!(matches!(
            parse(Mode::Stats, "FCFS 0 1\nA * *"),
            Err(ReportError::MalformedStats { .. })
        ));
    }
}
