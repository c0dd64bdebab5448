use sv_core::Mode;
use sv_report::{EngineReport, ReportError, StatsRow, TraceRow, html, parse, text};

fn row(process: &str, values: [&str; 5]) -> StatsRow {
    StatsRow {
        process: process.to_string(),
        arrival: values[0].to_string(),
        service: values[1].to_string(),
        finish: values[2].to_string(),
        turnaround: values[3].to_string(),
        norm_turn: values[4].to_string(),
    }
}

#[test]
fn stats_fixture_yields_two_rows_and_means() {
    let raw = "H|\nP|A,B\nAr|0,2\nSv|3,4\nFi|3,7\nTu|3,5,4.0\nNo|1.0,1.25,1.13";
    let EngineReport::Stats(stats) = parse(Mode::Stats, raw).unwrap() else {
        panic!("expected a stats report");
    };

    assert_eq!(
        stats.rows,
        vec![
            row("A", ["0", "3", "3", "3", "1.0"]),
            row("B", ["2", "4", "7", "5", "1.25"]),
        ]
    );
    assert_eq!(stats.mean_turnaround, "4.0");
    assert_eq!(stats.mean_norm_turn, "1.13");
    stats.ensure_process_count(2).unwrap();
    assert!(matches!(
        stats.ensure_process_count(3),
        Err(ReportError::MalformedStats { .. })
    ));
}

#[test]
fn trace_fixture_drops_separator() {
    let raw = "FCFS 0 1 2 3\n----------\nA    * * . .\nB    . . * *";
    let EngineReport::Trace(trace) = parse(Mode::Trace, raw).unwrap() else {
        panic!("expected a trace report");
    };

    assert_eq!(trace.header, "FCFS");
    assert_eq!(trace.time_units, vec!["0", "1", "2", "3"]);
    assert_eq!(
        trace.rows,
        vec![
            TraceRow {
                label: "A".to_string(),
                cells: vec!["*", "*", ".", "."].into_iter().map(String::from).collect(),
            },
            TraceRow {
                label: "B".to_string(),
                cells: vec![".", ".", "*", "*"].into_iter().map(String::from).collect(),
            },
        ]
    );
    assert!(trace.rows.iter().all(|r| !r.label.starts_with('-')));
    assert_eq!(trace.misaligned_rows().count(), 0);
}

#[test]
fn header_only_trace_renders_header_only() {
    let report = parse(Mode::Trace, "FCFS 0 1 2\n--------\n").unwrap();
    let EngineReport::Trace(trace) = &report else {
        panic!("expected a trace report");
    };
    assert!(trace.rows.is_empty());

    let rendered = html::render(&report);
    assert_eq!(
        rendered,
        "<table class=\"trace\">\n\
         <caption>FCFS Scheduling Trace</caption>\n\
         <tr><th>Time</th><th>0</th><th>1</th><th>2</th></tr>\n\
         </table>\n"
    );
}

#[test]
fn empty_output_renders_bare_table() {
    let report = parse(Mode::Trace, "").unwrap();
    assert_eq!(
        html::render(&report),
        "<table class=\"trace\">\n<tr><th>Time</th></tr>\n</table>\n"
    );
    assert_eq!(text::render(&report), "Time\n");
}

#[test]
fn rendering_is_idempotent() {
    let reports = [
        parse(Mode::Stats, "H|\nP|A,B\nAr|0,2\nSv|3,4\nFi|3,7\nTu|3,5,4.0\nNo|1.0,1.25,1.13")
            .unwrap(),
        parse(Mode::Trace, "FCFS 0 1 2 3\n----------\nA    * * . .\nB    . . * *").unwrap(),
    ];
    for report in &reports {
        assert_eq!(html::render(report), html::render(report));
        assert_eq!(
            html::render_document(report, "Output"),
            html::render_document(report, "Output")
        );
        assert_eq!(text::render(report), text::render(report));
    }
}

#[test]
fn reports_serialize_with_kind_tag() {
    let report = parse(Mode::Trace, "FCFS 0 1\nA * .").unwrap();
    let json: serde_json::Value = serde_json::to_value(&report).unwrap();
    assert_eq!(json["kind"], "trace");
    assert_eq!(json["time_units"][1], "1");
    assert_eq!(json["rows"][0]["label"], "A");
}
