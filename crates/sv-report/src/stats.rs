//! Stats report parser.
//!
//! The engine prints a fixed block of seven pipe-delimited lines:
//!
//! ```text
//! FCFS
//! Process    |  A  |  B  |
//! Arrival    |  0  |  2  |
//! Service    |  3  |  6  | Mean|
//! Finish     |  3  |  9  |-----|
//! Turnaround |  3  |  7  | 5.00|
//! NormTurn   | 1.00| 1.17| 1.08|
//! ```
//!
//! Every line starts with a row label. The last value on the Turnaround and
//! NormTurn lines is the mean over all processes.

use crate::types::{StatsReport, StatsRow};
use crate::{ReportError, ReportResult, content_lines};

pub const STATS_LINES: usize = 7;

const HEADER: usize = 0;
const PROCESS: usize = 1;
const ARRIVAL: usize = 2;
const SERVICE: usize = 3;
const FINISH: usize = 4;
const TURNAROUND: usize = 5;
const NORM_TURN: usize = 6;

const ROW_NAMES: [&str; STATS_LINES] = [
    "header",
    "process",
    "arrival",
    "service",
    "finish",
    "turnaround",
    "normturn",
];

pub fn parse_stats(raw: &str) -> ReportResult<StatsReport> {
    let lines: Vec<&str> = content_lines(raw).collect();
    if lines.len() < STATS_LINES {
        return Err(malformed(format!(
            "expected {} lines, found {}",
            STATS_LINES,
            lines.len()
        )));
    }
    if lines.len() > STATS_LINES {
        tracing::debug!(
            extra = lines.len() - STATS_LINES,
            "ignoring lines after the stats block"
        );
    }

    let header = split_fields(lines[HEADER])
        .first()
        .map(|label| label.to_string())
        .unwrap_or_default();
    let fields: Vec<Vec<&str>> = lines[..STATS_LINES]
        .iter()
        .map(|line| split_fields(line).into_iter().skip(1).collect())
        .collect();

    let processes = &fields[PROCESS];
    let n = processes.len();
    if n == 0 {
        return Err(malformed("process row lists no processes".to_string()));
    }

    for row in [ARRIVAL, SERVICE, FINISH] {
        require_fields(&fields, row, n)?;
    }
    // One value per process plus the mean, nothing more.
    for row in [TURNAROUND, NORM_TURN] {
        let found = fields[row].len();
        if found != n + 1 {
            return Err(malformed(format!(
                "{} row has {} values, expected {}",
                ROW_NAMES[row],
                found,
                n + 1
            )));
        }
    }

    let rows = (0..n)
        .map(|i| StatsRow {
            process: processes[i].to_string(),
            arrival: fields[ARRIVAL][i].to_string(),
            service: fields[SERVICE][i].to_string(),
            finish: fields[FINISH][i].to_string(),
            turnaround: fields[TURNAROUND][i].to_string(),
            norm_turn: fields[NORM_TURN][i].to_string(),
        })
        .collect();

    Ok(StatsReport {
        header,
        rows,
        mean_turnaround: last_field(&fields[TURNAROUND]),
        mean_norm_turn: last_field(&fields[NORM_TURN]),
    })
}

/// Split a record on `|` and `,`, trim, and drop empty fields. The first
/// field is the row label.
fn split_fields(line: &str) -> Vec<&str> {
    line.split(['|', ','])
        .map(str::trim)
        .filter(|field| !field.is_empty())
        .collect()
}

fn require_fields(fields: &[Vec<&str>], row: usize, min: usize) -> ReportResult<()> {
    let found = fields[row].len();
    if found < min {
        return Err(malformed(format!(
            "{} row has {} values, expected at least {}",
            ROW_NAMES[row], found, min
        )));
    }
    Ok(())
}

fn last_field(row: &[&str]) -> String {
    row.last().map(|v| v.to_string()).unwrap_or_default()
}

fn malformed(reason: String) -> ReportError {
    ReportError::MalformedStats { reason }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENGINE_OUTPUT: &str = "FCFS\n\
        Process    |  A  |  B  |\n\
        Arrival    |  0  |  2  |\n\
        Service    |  3  |  6  | Mean|\n\
        Finish     |  3  |  9  |-----|\n\
        Turnaround |  3  |  7  | 5.00|\n\
        NormTurn   | 1.00| 1.17| 1.08|\n\n";

    #[test]
    fn parses_engine_layout() {
        let report = parse_stats(ENGINE_OUTPUT).unwrap();
        assert_eq!(report.header, "FCFS");
        assert_eq!(report.rows.len(), 2);
        assert_eq!(report.rows[1].process, "B");
        assert_eq!(report.rows[1].finish, "9");
        assert_eq!(report.rows[1].norm_turn, "1.17");
        assert_eq!(report.mean_turnaround, "5.00");
        assert_eq!(report.mean_norm_turn, "1.08");
    }

    #[test]
    fn missing_mean_is_malformed() {
        let raw = "H|\nP|A,B\nAr|0,2\nSv|3,4\nFi|3,7\nTu|3,5\nNo|1.0,1.25,1.13";
        let err = parse_stats(raw).unwrap_err();
        assert_eq!(
            err,
            ReportError::MalformedStats {
                reason: "turnaround row has 2 values, expected 3".to_string()
            }
        );
    }

    #[test]
    fn extra_values_after_mean_are_malformed() {
        let raw = "H|\nP|A,B\nAr|0,2\nSv|3,4\nFi|3,7\nTu|3,5,4.0,99\nNo|1.0,1.25,1.13";
        assert_eq!(
            parse_stats(raw).unwrap_err(),
            ReportError::MalformedStats {
                reason: "turnaround row has 4 values, expected 3".to_string()
            }
        );

        let raw = "H|\nP|A,B\nAr|0,2\nSv|3,4\nFi|3,7\nTu|3,5,4.0\nNo|1.0,1.25,1.13,77";
        assert!(matches!(
            parse_stats(raw),
            Err(ReportError::MalformedStats { .. })
        ));
    }

    #[test]
    fn short_value_row_is_malformed_not_truncated() {
        let raw = "H|\nP|A,B\nAr|0\nSv|3,4\nFi|3,7\nTu|3,5,4.0\nNo|1.0,1.25,1.13";
        assert!(matches!(
            parse_stats(raw),
            Err(ReportError::MalformedStats { .. })
        ));
    }

    #[test]
    fn too_few_lines_is_malformed() {
        assert!(parse_stats("").is_err());
        assert!(parse_stats("H|\nP|A").is_err());
    }

    #[test]
    fn process_row_without_values_is_malformed() {
        let raw = "H|\nP|\nAr|0\nSv|3\nFi|3\nTu|3,3\nNo|1,1";
        assert!(parse_stats(raw).is_err());
    }
}
