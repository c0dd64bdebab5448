//! Report data types.

use serde::Serialize;
use sv_core::Mode;

use crate::{ReportError, ReportResult};

/// Structured form of one engine reply. Built once by the parser and never
/// modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum EngineReport {
    Trace(TraceReport),
    Stats(StatsReport),
}

impl EngineReport {
    pub fn mode(&self) -> Mode {
        match self {
            EngineReport::Trace(_) => Mode::Trace,
            EngineReport::Stats(_) => Mode::Stats,
        }
    }

    /// Policy label the engine printed at the top of the report, if any.
    pub fn header(&self) -> &str {
        match self {
            EngineReport::Trace(t) => &t.header,
            EngineReport::Stats(s) => &s.header,
        }
    }
}

/// Per-time-unit timeline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TraceReport {
    pub header: String,
    pub time_units: Vec<String>,
    pub rows: Vec<TraceRow>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TraceRow {
    pub label: String,
    pub cells: Vec<String>,
}

impl TraceReport {
    /// Rows whose cell count differs from the number of time units.
    ///
    /// The engine leaves idle cells blank, and blanks vanish when the row is
    /// split on whitespace, so such rows are not aligned to the header.
    pub fn misaligned_rows(&self) -> impl Iterator<Item = &TraceRow> {
        self.rows
            .iter()
            .filter(|row| row.cells.len() != self.time_units.len())
    }

    /// Rows with more cells than time units. The engine prints one more time
    /// unit than cells, so this never happens with well-formed output.
    pub fn overflowing_rows(&self) -> impl Iterator<Item = &TraceRow> {
        self.rows
            .iter()
            .filter(|row| row.cells.len() > self.time_units.len())
    }
}

/// Per-process summary with aggregate means.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatsReport {
    pub header: String,
    pub rows: Vec<StatsRow>,
    pub mean_turnaround: String,
    pub mean_norm_turn: String,
}

/// Values are kept exactly as the engine printed them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatsRow {
    pub process: String,
    pub arrival: String,
    pub service: String,
    pub finish: String,
    pub turnaround: String,
    pub norm_turn: String,
}

impl StatsReport {
    /// Check that the engine reported exactly as many processes as were sent.
    pub fn ensure_process_count(&self, expected: usize) -> ReportResult<()> {
        if self.rows.len() != expected {
            return Err(ReportError::MalformedStats {
                reason: format!(
                    "report lists {} processes, request had {}",
                    self.rows.len(),
                    expected
                ),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(label: &str, cells: usize) -> TraceRow {
        TraceRow {
            label: label.to_string(),
            cells: vec!["*".to_string(); cells],
        }
    }

    #[test]
    fn short_rows_misalign_but_only_long_rows_overflow() {
        let trace = TraceReport {
            header: "FCFS".to_string(),
            time_units: (0..=4).map(|t| t.to_string()).collect(),
            rows: vec![row("A", 4), row("B", 5), row("C", 6)],
        };

        let misaligned: Vec<&str> = trace.misaligned_rows().map(|r| r.label.as_str()).collect();
        assert_eq!(misaligned, vec!["A", "C"]);
        let overflowing: Vec<&str> = trace.overflowing_rows().map(|r| r.label.as_str()).collect();
        assert_eq!(overflowing, vec!["C"]);
    }
}
