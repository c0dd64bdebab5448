//! HTML projection of a report.
//!
//! Output is a pure function of the report: no computation, no timestamps,
//! so rendering the same report twice gives identical bytes.

use std::borrow::Cow;

use crate::types::{EngineReport, StatsReport, TraceReport};

const STATS_COLUMNS: [&str; 6] = [
    "Process",
    "Arrival",
    "Service",
    "Finish",
    "Turnaround",
    "NormTurn",
];

/// Render a report as an HTML fragment (tables plus the stats summary).
pub fn render(report: &EngineReport) -> String {
    match report {
        EngineReport::Trace(trace) => render_trace(trace),
        EngineReport::Stats(stats) => render_stats(stats),
    }
}

/// Render a report as a complete standalone page.
pub fn render_document(report: &EngineReport, title: &str) -> String {
    let mut out = String::from("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    out.push_str(&format!("<title>{}</title>\n", escape(title)));
    out.push_str("</head>\n<body>\n");
    out.push_str(&render(report));
    out.push_str("</body>\n</html>\n");
    out
}

pub fn render_trace(trace: &TraceReport) -> String {
    let mut out = String::from("<table class=\"trace\">\n");
    if !trace.header.is_empty() {
        out.push_str(&format!(
            "<caption>{} Scheduling Trace</caption>\n",
            escape(&trace.header)
        ));
    }

    out.push_str("<tr><th>Time</th>");
    for unit in &trace.time_units {
        out.push_str(&format!("<th>{}</th>", escape(unit)));
    }
    out.push_str("</tr>\n");

    for row in &trace.rows {
        out.push_str(&format!("<tr><td>{}</td>", escape(&row.label)));
        for cell in &row.cells {
            out.push_str(&format!("<td>{}</td>", escape(cell)));
        }
        out.push_str("</tr>\n");
    }
    out.push_str("</table>\n");
    out
}

pub fn render_stats(stats: &StatsReport) -> String {
    let mut out = String::from("<table class=\"stats\">\n");
    if !stats.header.is_empty() {
        out.push_str(&format!(
            "<caption>{} Scheduling Stats</caption>\n",
            escape(&stats.header)
        ));
    }

    out.push_str("<tr>");
    for column in STATS_COLUMNS {
        out.push_str(&format!("<th>{}</th>", column));
    }
    out.push_str("</tr>\n");

    for row in &stats.rows {
        out.push_str("<tr>");
        for value in [
            &row.process,
            &row.arrival,
            &row.service,
            &row.finish,
            &row.turnaround,
            &row.norm_turn,
        ] {
            out.push_str(&format!("<td>{}</td>", escape(value)));
        }
        out.push_str("</tr>\n");
    }
    out.push_str("</table>\n");

    out.push_str(&format!(
        "<p class=\"summary\"><b>Mean Turnaround:</b> {}<br>\n<b>Mean NormTurn:</b> {}</p>\n",
        escape(&stats.mean_turnaround),
        escape(&stats.mean_norm_turn)
    ));
    out
}

/// Escape the characters that are significant in HTML text and attributes.
pub fn escape(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}
