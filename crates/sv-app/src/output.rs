//! Report rendering and output destinations.

use std::io::Write;
use std::path::Path;

use sv_report::{EngineReport, html, text};

use crate::config::OutputFormat;
use crate::error::{AppError, AppResult};

pub fn render_report(report: &EngineReport, format: OutputFormat) -> AppResult<String> {
    match format {
        OutputFormat::Html => Ok(html::render_document(
            report,
            &format!("{} Output", report.mode().label()),
        )),
        OutputFormat::Text => Ok(text::render(report)),
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(report)
                .map_err(|e| AppError::Serialization(e.to_string()))?;
            json.push('\n');
            Ok(json)
        }
    }
}

/// Write to `path`, or to stdout when no path is given.
pub fn write_output(path: Option<&Path>, content: &str) -> AppResult<()> {
    match path {
        Some(path) => std::fs::write(path, content).map_err(|e| AppError::OutputWrite {
            path: path.to_path_buf(),
            source: e,
        }),
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(content.as_bytes())?;
            stdout.flush()?;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sv_report::TraceReport;

    #[test]
    fn html_document_is_titled_by_mode() {
        let report = EngineReport::Trace(TraceReport::default());
        let page = render_report(&report, OutputFormat::Html).unwrap();
        assert!(page.contains("<title>Trace Output</title>"));
    }

    #[test]
    fn json_ends_with_newline() {
        let report = EngineReport::Trace(TraceReport::default());
        let json = render_report(&report, OutputFormat::Json).unwrap();
        assert!(json.ends_with("}\n"));
    }
}
