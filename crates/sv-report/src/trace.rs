//! Trace report parser.
//!
//! ```text
//! FCFS  0 1 2 3 4 5
//! ------------------
//! A     |*|*|*| | |
//! B     | |.|.|*|*|
//! ------------------
//! ```
//!
//! The first non-separator line holds the policy label followed by one
//! column header per time unit. Each process line starts with an alphabetic
//! label; anything else is not a process row and is skipped.

use crate::content_lines;
use crate::types::{TraceReport, TraceRow};

pub fn parse_trace(raw: &str) -> TraceReport {
    let mut lines = content_lines(raw).filter(|line| !is_separator(line));

    let Some(header_line) = lines.next() else {
        return TraceReport::default();
    };
    let mut tokens = header_line.split_whitespace();
    let header = tokens.next().unwrap_or_default().to_string();
    let time_units: Vec<String> = tokens.map(String::from).collect();

    let rows: Vec<TraceRow> = lines.filter_map(parse_row).collect();

    let report = TraceReport {
        header,
        time_units,
        rows,
    };
    for row in report.misaligned_rows() {
        tracing::debug!(
            label = %row.label,
            cells = row.cells.len(),
            time_units = report.time_units.len(),
            "trace row is not aligned with the header"
        );
    }
    report
}

/// Decorative rule made only of dashes and pipes.
fn is_separator(line: &str) -> bool {
    line.chars()
        .filter(|c| !c.is_whitespace())
        .all(|c| c == '-' || c == '|')
}

fn parse_row(line: &str) -> Option<TraceRow> {
    let spaced = line.replace('|', " ");
    let mut tokens = spaced.split_whitespace();
    let label = tokens.next()?;
    if !label.chars().all(char::is_alphabetic) {
        tracing::trace!(line, "skipping non-process line");
        return None;
    }
    Some(TraceRow {
        label: label.to_string(),
        cells: tokens.map(String::from).collect(),
    })
}
