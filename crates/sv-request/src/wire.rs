//! Line-oriented request text read by the engine on stdin.
//!
//! ```text
//! <mode>
//! <policy>[-<quantum>]
//! <simulation end>
//! <process count>
//! <name>,<arrival>,<service>     (process count times)
//! ```
//!
//! A trailing newline terminates the stream.

use sv_core::{Mode, Policy, ProcessDescriptor, SimulationParams};

use crate::builder::{RequestBuilder, SimulationRequest};
use crate::{RequestError, RequestResult};

const HEADER_LINES: usize = 4;

pub fn encode(params: &SimulationParams, processes: &[ProcessDescriptor]) -> String {
    let mut out = String::new();
    out.push_str(params.mode().as_wire());
    out.push('\n');
    out.push_str(&params.policy().as_wire());
    out.push('\n');
    out.push_str(&params.simulation_end().to_string());
    out.push('\n');
    out.push_str(&params.process_count().to_string());
    out.push('\n');
    for p in processes {
        out.push_str(&format!("{},{},{}\n", p.name, p.arrival, p.service));
    }
    out
}

/// Decode request text back into a request, applying the same checks the
/// builder applies to operator input.
pub fn decode(text: &str) -> RequestResult<SimulationRequest> {
    let lines: Vec<&str> = text.lines().map(|l| l.trim_end_matches('\r')).collect();
    if lines.len() < HEADER_LINES {
        return Err(wire_err(
            lines.len() + 1,
            format!("expected {} header lines", HEADER_LINES),
        ));
    }

    let mode: Mode = lines[0].parse().map_err(|e| wire_err(1, e))?;
    let policy: Policy = lines[1].parse().map_err(|e| wire_err(2, e))?;
    let simulation_end: u32 = parse_number(lines[2], 3)?;
    let process_count: usize = parse_number(lines[3], 4)?;

    let params = SimulationParams::new(mode, policy, simulation_end, process_count)?;
    let mut builder = RequestBuilder::new(params);

    let body = &lines[HEADER_LINES..];
    for (offset, line) in body.iter().enumerate() {
        let line_no = HEADER_LINES + offset + 1;
        if line.trim().is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split(',').collect();
        if fields.len() != 3 {
            return Err(wire_err(
                line_no,
                "expected <name>,<arrival>,<service>".to_string(),
            ));
        }
        let arrival: u32 = parse_number(fields[1], line_no)?;
        let service: u32 = parse_number(fields[2], line_no)?;
        builder.add_process(fields[0], arrival, service)?;
    }

    Ok(builder.build()?)
}

fn parse_number<T: std::str::FromStr>(field: &str, line: usize) -> RequestResult<T> {
    field
        .trim()
        .parse()
        .map_err(|_| wire_err(line, format!("'{}' is not a valid number", field.trim())))
}

fn wire_err(line: usize, message: impl ToString) -> RequestError {
    RequestError::Wire {
        line,
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ValidationError;

    #[test]
    fn encodes_exact_layout() {
        let params =
            SimulationParams::new(Mode::Trace, Policy::new(2).unwrap().with_quantum(4).unwrap(), 20, 2)
                .unwrap();
        let processes = vec![
            ProcessDescriptor {
                name: "A".to_string(),
                arrival: 0,
                service: 3,
            },
            ProcessDescriptor {
                name: "B".to_string(),
                arrival: 2,
                service: 6,
            },
        ];
        assert_eq!(
            encode(&params, &processes),
            "trace\n2-4\n20\n2\nA,0,3\nB,2,6\n"
        );
    }

    #[test]
    fn decodes_engine_input() {
        let request = decode("stats\n5\n20\n2\nA,0,3\r\nB,2,6\n").unwrap();
        assert_eq!(request.mode(), Mode::Stats);
        assert_eq!(request.policy().id(), 5);
        assert_eq!(request.processes()[1].name, "B");
        assert_eq!(request.processes()[1].service, 6);
    }

    #[test]
    fn decode_reports_missing_processes() {
        let err = decode("trace\n1\n10\n3\nA,0,1\n").unwrap_err();
        assert!(matches!(
            err,
            RequestError::Validation(ValidationError::Incomplete {
                have: 1,
                expected: 3
            })
        ));
    }

    #[test]
    fn decode_reports_bad_lines() {
        assert!(matches!(
            decode("trace\n1\nten\n1\nA,0,1\n"),
            Err(RequestError::Wire { line: 3, .. })
        ));
        assert!(matches!(
            decode("trace\n1\n10\n1\nA 0 1\n"),
            Err(RequestError::Wire { line: 5, .. })
        ));
        assert!(matches!(
            decode("trace\n1\n"),
            Err(RequestError::Wire { line: 3, .. })
        ));
    }
}
