//! Interactive operator session over line-oriented text streams.
//!
//! Two stages repeat until the operator exits or input ends:
//! 1. parameter and process entry, gated by the declared process count;
//! 2. report viewing, with retry (a fresh request from scratch) or exit.

use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::str::FromStr;

use sv_core::{
    MAX_ARRIVAL, MAX_PROCESSES, MAX_SERVICE, MAX_SIMULATION_END, Mode, Policy, SimulationParams,
};
use sv_gateway::Engine;
use sv_report::{EngineReport, html, text};
use sv_request::{RequestBuilder, SimulationRequest, ValidationError};

use crate::error::{AppError, AppResult};
use crate::run_service;

const DEFAULT_SAVE_PATH: &str = "report.html";

/// What happened over the whole session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub completed: usize,
    pub failed: usize,
}

enum Choice {
    Retry,
    Save,
    Exit,
}

pub struct Session<R, W, E> {
    input: R,
    output: W,
    engine: E,
    summary: SessionSummary,
}

impl<R: BufRead, W: Write, E: Engine> Session<R, W, E> {
    pub fn new(input: R, output: W, engine: E) -> Self {
        Self {
            input,
            output,
            engine,
            summary: SessionSummary::default(),
        }
    }

    /// Run until the operator exits or the input stream closes.
    pub fn run(mut self) -> AppResult<SessionSummary> {
        loop {
            writeln!(self.output, "\nEnter Scheduler Simulation Inputs")?;
            let Some(request) = self.collect_request()? else {
                break;
            };
            writeln!(self.output, "All processes entered. Starting simulation...")?;

            let keep_going = match run_service::run_simulation(&self.engine, &request) {
                Ok(response) => {
                    self.summary.completed += 1;
                    self.view_report(&response.report)?
                }
                Err(err) => {
                    self.summary.failed += 1;
                    tracing::debug!(error = %err, "run failed");
                    writeln!(self.output, "\n{}:\n{}", err.headline(), err)?;
                    matches!(self.choose(false)?, Some(Choice::Retry))
                }
            };
            if !keep_going {
                break;
            }
        }
        writeln!(self.output, "Goodbye.")?;
        Ok(self.summary)
    }

    /// Stage 1. Returns `None` if input ends before the request is complete.
    fn collect_request(&mut self) -> AppResult<Option<SimulationRequest>> {
        let Some(mode) = self.prompt_parsed::<Mode>("Mode [trace/stats]: ", |_| Ok(()))? else {
            return Ok(None);
        };

        let listing: Vec<String> = Policy::all().map(|p| p.to_string()).collect();
        writeln!(self.output, "Policies: {}", listing.join(", "))?;
        let Some(mut policy) = self.prompt_parsed::<Policy>("Policy [1-8]: ", |_| Ok(()))? else {
            return Ok(None);
        };
        if policy.takes_quantum() && policy.quantum().is_none() {
            let Some(quantum) = self.prompt_line("Quantum (blank for none): ")? else {
                return Ok(None);
            };
            if !quantum.is_empty() {
                match quantum.parse::<u32>().map_err(|e| e.to_string()).and_then(|q| {
                    policy.with_quantum(q).map_err(|e| e.to_string())
                }) {
                    Ok(with_quantum) => policy = with_quantum,
                    Err(reason) => writeln!(self.output, "Ignoring quantum: {}", reason)?,
                }
            }
        }

        let Some(simulation_end) = self.prompt_parsed::<u32>(
            &format!("Simulation end [1-{}]: ", MAX_SIMULATION_END),
            within(1, MAX_SIMULATION_END),
        )?
        else {
            return Ok(None);
        };
        let Some(process_count) = self.prompt_parsed::<usize>(
            &format!("Number of processes [1-{}]: ", MAX_PROCESSES),
            within(1, MAX_PROCESSES),
        )?
        else {
            return Ok(None);
        };

        let params = SimulationParams::new(mode, policy, simulation_end, process_count)?;
        let mut builder = RequestBuilder::new(params);

        while !builder.is_complete() {
            let index = builder.count() + 1;
            let Some(name) = self.prompt_line(&format!("Process {}/{} name: ", index, process_count))?
            else {
                return Ok(None);
            };
            let Some(arrival) = self.prompt_parsed::<u32>(
                &format!("  Start time [0-{}]: ", MAX_ARRIVAL),
                within(0, MAX_ARRIVAL),
            )?
            else {
                return Ok(None);
            };
            let Some(service) = self.prompt_parsed::<u32>(
                &format!("  Service time [1-{}]: ", MAX_SERVICE),
                within(1, MAX_SERVICE),
            )?
            else {
                return Ok(None);
            };

            match builder.add_process(&name, arrival, service) {
                Ok(count) => {
                    let added = &builder.processes()[count - 1];
                    writeln!(
                        self.output,
                        "{}. Process: {}, Start Time: {}, Service Time: {}",
                        count, added.name, added.arrival, added.service
                    )?;
                }
                Err(ValidationError::EmptyName) => {
                    writeln!(self.output, "Process name is required.")?;
                }
                Err(err) => writeln!(self.output, "{}", err)?,
            }
        }

        Ok(Some(builder.build()?))
    }

    /// Stage 2. Returns whether the operator wants another run.
    fn view_report(&mut self, report: &EngineReport) -> AppResult<bool> {
        writeln!(self.output, "\n{} Output\n", report.mode().label())?;
        write!(self.output, "{}", text::render(report))?;

        loop {
            match self.choose(true)? {
                Some(Choice::Retry) => return Ok(true),
                Some(Choice::Exit) | None => return Ok(false),
                Some(Choice::Save) => {
                    let Some(path) =
                        self.prompt_line(&format!("Save to [{}]: ", DEFAULT_SAVE_PATH))?
                    else {
                        return Ok(false);
                    };
                    let path = if path.is_empty() {
                        PathBuf::from(DEFAULT_SAVE_PATH)
                    } else {
                        PathBuf::from(path)
                    };
                    let page = html::render_document(
                        report,
                        &format!("{} Output", report.mode().label()),
                    );
                    match std::fs::write(&path, page) {
                        Ok(()) => writeln!(self.output, "Saved report to {}", path.display())?,
                        Err(e) => writeln!(
                            self.output,
                            "{}",
                            AppError::OutputWrite { path, source: e }
                        )?,
                    }
                }
            }
        }
    }

    fn choose(&mut self, allow_save: bool) -> AppResult<Option<Choice>> {
        let label = if allow_save {
            "[r]etry simulation, [s]ave HTML, [e]xit: "
        } else {
            "[r]etry simulation, [e]xit: "
        };
        loop {
            let Some(answer) = self.prompt_line(label)? else {
                return Ok(None);
            };
            match answer.to_ascii_lowercase().as_str() {
                "r" | "retry" => return Ok(Some(Choice::Retry)),
                "e" | "exit" | "q" | "quit" => return Ok(Some(Choice::Exit)),
                "s" | "save" if allow_save => return Ok(Some(Choice::Save)),
                _ => writeln!(self.output, "Unrecognized choice '{}'.", answer)?,
            }
        }
    }

    /// Write a prompt and read one trimmed line. `None` at end of input.
    fn prompt_line(&mut self, label: &str) -> AppResult<Option<String>> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Prompt until the answer parses and passes `check`.
    fn prompt_parsed<T>(
        &mut self,
        label: &str,
        check: impl Fn(&T) -> Result<(), String>,
    ) -> AppResult<Option<T>>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        loop {
            let Some(answer) = self.prompt_line(label)? else {
                return Ok(None);
            };
            match answer.parse::<T>() {
                Ok(value) => match check(&value) {
                    Ok(()) => return Ok(Some(value)),
                    Err(reason) => writeln!(self.output, "Invalid value '{}': {}", answer, reason)?,
                },
                Err(e) => writeln!(self.output, "Invalid value '{}': {}", answer, e)?,
            }
        }
    }
}

/// Accept values in `min..=max`.
fn within<T>(min: T, max: T) -> impl Fn(&T) -> Result<(), String>
where
    T: PartialOrd + std::fmt::Display,
{
    move |value: &T| {
        if value >= &min && value <= &max {
            Ok(())
        } else {
            Err(format!("must be between {} and {}", min, max))
        }
    }
}
