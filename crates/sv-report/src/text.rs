//! Plain-text projection for terminals.

use crate::types::{EngineReport, StatsReport, TraceReport};

pub fn render(report: &EngineReport) -> String {
    match report {
        EngineReport::Trace(trace) => render_trace(trace),
        EngineReport::Stats(stats) => render_stats(stats),
    }
}

pub fn render_trace(trace: &TraceReport) -> String {
    let mut out = title(&trace.header, "Trace");

    let mut header = vec!["Time".to_string()];
    header.extend(trace.time_units.iter().cloned());
    let rows: Vec<Vec<String>> = trace
        .rows
        .iter()
        .map(|row| {
            let mut cells = vec![row.label.clone()];
            cells.extend(row.cells.iter().cloned());
            cells
        })
        .collect();

    out.push_str(&table(&header, &rows));
    out
}

pub fn render_stats(stats: &StatsReport) -> String {
    let mut out = title(&stats.header, "Stats");

    let header: Vec<String> = [
        "Process",
        "Arrival",
        "Service",
        "Finish",
        "Turnaround",
        "NormTurn",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();
    let rows: Vec<Vec<String>> = stats
        .rows
        .iter()
        .map(|r| {
            vec![
                r.process.clone(),
                r.arrival.clone(),
                r.service.clone(),
                r.finish.clone(),
                r.turnaround.clone(),
                r.norm_turn.clone(),
            ]
        })
        .collect();

    out.push_str(&table(&header, &rows));
    out.push_str(&format!("\nMean Turnaround: {}\n", stats.mean_turnaround));
    out.push_str(&format!("Mean NormTurn:   {}\n", stats.mean_norm_turn));
    out
}

fn title(header: &str, kind: &str) -> String {
    if header.is_empty() {
        String::new()
    } else {
        format!("{} Scheduling {}\n\n", header, kind)
    }
}

/// Left-aligned columns padded to the widest cell, two spaces apart.
/// Rows may be ragged.
fn table(header: &[String], rows: &[Vec<String>]) -> String {
    let columns = rows
        .iter()
        .map(Vec::len)
        .chain(std::iter::once(header.len()))
        .max()
        .unwrap_or(0);
    let mut widths = vec![0usize; columns];
    for line in std::iter::once(header).chain(rows.iter().map(Vec::as_slice)) {
        for (i, cell) in line.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let mut out = String::new();
    for line in std::iter::once(header).chain(rows.iter().map(Vec::as_slice)) {
        let mut text = String::new();
        for (i, cell) in line.iter().enumerate() {
            if i > 0 {
                text.push_str("  ");
            }
            text.push_str(cell);
            text.push_str(&" ".repeat(widths[i] - cell.chars().count()));
        }
        out.push_str(text.trim_end());
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TraceRow;

    #[test]
    fn trace_columns_line_up() {
        let trace = TraceReport {
            header: "SPN".to_string(),
            time_units: vec!["0".to_string(), "1".to_string(), "10".to_string()],
            rows: vec![TraceRow {
                label: "Alpha".to_string(),
                cells: vec!["*".to_string(), "*".to_string(), ".".to_string()],
            }],
        };
        assert_eq!(
            render_trace(&trace),
            "SPN Scheduling Trace\n\nTime   0  1  10\nAlpha  *  *  .\n"
        );
    }

    #[test]
    fn empty_stats_render_headers_and_means() {
        let text = render_stats(&StatsReport::default());
        assert!(text.starts_with("Process  Arrival"));
        assert!(text.contains("Mean Turnaround: \n"));
    }
}
