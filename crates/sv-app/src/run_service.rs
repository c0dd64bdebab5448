//! Run execution: request → engine → report.

use std::path::Path;
use std::time::Instant;

use sv_gateway::{Engine, EngineOutput};
use sv_report::EngineReport;
use sv_request::SimulationRequest;

use crate::error::{AppError, AppResult};
use crate::progress::{RunProgressEvent, RunStage};

/// Wall-clock breakdown of one run.
#[derive(Debug, Clone, Default)]
pub struct RunTimingSummary {
    pub engine_time_s: f64,
    pub parse_time_s: f64,
    pub total_time_s: f64,
}

/// Response from a run execution.
#[derive(Debug, Clone)]
pub struct RunResponse {
    pub report: EngineReport,
    pub output: EngineOutput,
    pub timing: RunTimingSummary,
}

/// Load a request from a YAML request file, or from raw engine input text
/// when `wire` is set.
pub fn load_request(path: &Path, wire: bool) -> AppResult<SimulationRequest> {
    let loaded = if wire {
        sv_request::load_wire(path)
    } else {
        sv_request::load_yaml(path)
    };
    loaded.map_err(|source| AppError::RequestFile {
        path: path.to_path_buf(),
        source,
    })
}

fn emit_progress(
    progress_cb: &mut Option<&mut dyn FnMut(RunProgressEvent)>,
    request: &SimulationRequest,
    stage: RunStage,
    started: Instant,
    message: Option<String>,
) {
    if let Some(cb) = progress_cb.as_deref_mut() {
        cb(RunProgressEvent {
            mode: request.mode(),
            stage,
            elapsed_wall_s: started.elapsed().as_secs_f64(),
            message,
        });
    }
}

/// Run one simulation.
pub fn run_simulation<E: Engine + ?Sized>(
    engine: &E,
    request: &SimulationRequest,
) -> AppResult<RunResponse> {
    run_simulation_with_progress(engine, request, None)
}

/// Run one simulation and stream stage progress events.
///
/// Any text on the engine's stderr aborts the run before parsing.
pub fn run_simulation_with_progress<E: Engine + ?Sized>(
    engine: &E,
    request: &SimulationRequest,
    mut progress_cb: Option<&mut dyn FnMut(RunProgressEvent)>,
) -> AppResult<RunResponse> {
    let started = Instant::now();
    let mut timing = RunTimingSummary::default();

    emit_progress(&mut progress_cb, request, RunStage::Serializing, started, None);
    let request_text = request.serialize();

    emit_progress(
        &mut progress_cb,
        request,
        RunStage::RunningEngine,
        started,
        Some(format!(
            "{} with {} processes",
            request.policy().name(),
            request.process_count()
        )),
    );
    let engine_started = Instant::now();
    let output = engine.run(&request_text)?;
    timing.engine_time_s = engine_started.elapsed().as_secs_f64();

    if output.has_error_output() {
        tracing::info!(exit_code = ?output.exit_code, "engine reported an error");
        return Err(AppError::EngineReported {
            stderr: output.stderr,
        });
    }

    emit_progress(&mut progress_cb, request, RunStage::ParsingReport, started, None);
    let parse_started = Instant::now();
    let report = parse_output(request, &output.stdout)?;
    timing.parse_time_s = parse_started.elapsed().as_secs_f64();
    timing.total_time_s = started.elapsed().as_secs_f64();

    emit_progress(
        &mut progress_cb,
        request,
        RunStage::Completed,
        started,
        Some("Run completed".to_string()),
    );
    tracing::info!(
        mode = %request.mode(),
        policy = request.policy().name(),
        total_time_s = timing.total_time_s,
        "run completed"
    );

    Ok(RunResponse {
        report,
        output,
        timing,
    })
}

/// Parse engine stdout for `request` and check it against what was sent.
///
/// A stats report must list exactly the submitted processes. Rows are matched
/// by position, so a name that differs from the submission order is logged.
pub fn parse_output(request: &SimulationRequest, stdout: &str) -> AppResult<EngineReport> {
    let report = sv_report::parse(request.mode(), stdout)?;

    match &report {
        EngineReport::Stats(stats) => {
            stats.ensure_process_count(request.process_count())?;
            for (row, sent) in stats.rows.iter().zip(request.processes()) {
                if row.process != sent.name {
                    tracing::warn!(
                        reported = %row.process,
                        submitted = %sent.name,
                        "stats row order differs from submission order"
                    );
                }
            }
        }
        EngineReport::Trace(trace) => {
            let overflowing = trace.overflowing_rows().count();
            if overflowing > 0 {
                tracing::warn!(
                    overflowing,
                    time_units = trace.time_units.len(),
                    "trace rows have more cells than the time header"
                );
            } else {
                tracing::debug!(
                    misaligned = trace.misaligned_rows().count(),
                    time_units = trace.time_units.len(),
                    "trace rows checked against the time header"
                );
            }
        }
    }

    Ok(report)
}
