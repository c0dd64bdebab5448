//! Subprocess-backed engine.

use std::io::{self, ErrorKind, Read, Write};
use std::path::PathBuf;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::{Engine, EngineOutput, GatewayError, GatewayResult};

/// Binary the engine is expected at when nothing else is configured.
pub const DEFAULT_ENGINE_PROGRAM: &str = "./lab6";

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// How to launch the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineCommand {
    pub program: PathBuf,
    pub args: Vec<String>,
    /// Upper bound on how long to wait for the engine to exit. `None` waits
    /// indefinitely.
    pub timeout: Option<Duration>,
}

impl Default for EngineCommand {
    fn default() -> Self {
        Self {
            program: PathBuf::from(DEFAULT_ENGINE_PROGRAM),
            args: Vec::new(),
            timeout: None,
        }
    }
}

impl EngineCommand {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            ..Self::default()
        }
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Runs the engine as a child process, one process per [`Engine::run`] call.
#[derive(Debug, Clone, Default)]
pub struct ProcessEngine {
    command: EngineCommand,
}

impl ProcessEngine {
    pub fn new(command: EngineCommand) -> Self {
        Self { command }
    }

    pub fn command(&self) -> &EngineCommand {
        &self.command
    }
}

impl Engine for ProcessEngine {
    fn run(&self, request_text: &str) -> GatewayResult<EngineOutput> {
        let started = Instant::now();
        tracing::debug!(
            program = %self.command.program.display(),
            request_bytes = request_text.len(),
            "launching engine"
        );

        let child = Command::new(&self.command.program)
            .args(&self.command.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| GatewayError::LaunchFailure {
                program: self.command.program.clone(),
                source,
            })?;
        let mut guard = ChildGuard::new(child);

        // Write and drain on separate threads so the deadline also bounds an
        // engine that never reads its input.
        let stdout_reader = spawn_reader(guard.child.stdout.take());
        let stderr_reader = spawn_reader(guard.child.stderr.take());
        let writer = spawn_writer(guard.child.stdin.take(), request_text.to_string());

        let status = match guard.wait(self.command.timeout) {
            Ok(status) => status,
            Err(err) => {
                // Once the child is gone the pipes close and every thread returns.
                guard.terminate();
                let _ = join_writer(writer);
                let _ = join_reader(stdout_reader, "reading stdout");
                let _ = join_reader(stderr_reader, "reading stderr");
                return Err(err);
            }
        };
        join_writer(writer)?;
        let stdout = join_reader(stdout_reader, "reading stdout")?;
        let stderr = join_reader(stderr_reader, "reading stderr")?;

        if !status.success() && stderr.is_empty() {
            tracing::warn!(%status, "engine exited unsuccessfully without diagnostics");
        }
        tracing::debug!(
            %status,
            stdout_bytes = stdout.len(),
            stderr_bytes = stderr.len(),
            elapsed_s = started.elapsed().as_secs_f64(),
            "engine finished"
        );

        Ok(EngineOutput {
            stdout,
            stderr,
            exit_code: status.code(),
        })
    }
}

/// Owns the child until it has been reaped. Dropping an unreaped guard kills
/// and waits on the process.
struct ChildGuard {
    child: Child,
    reaped: bool,
}

impl ChildGuard {
    fn new(child: Child) -> Self {
        Self {
            child,
            reaped: false,
        }
    }

    fn wait(&mut self, timeout: Option<Duration>) -> GatewayResult<ExitStatus> {
        let status = match timeout {
            None => self.child.wait().map_err(|source| GatewayError::Io {
                during: "waiting for engine",
                source,
            })?,
            Some(limit) => {
                let deadline = Instant::now() + limit;
                loop {
                    let polled = self.child.try_wait().map_err(|source| GatewayError::Io {
                        during: "waiting for engine",
                        source,
                    })?;
                    if let Some(status) = polled {
                        break status;
                    }
                    if Instant::now() >= deadline {
                        tracing::warn!(?limit, "engine timed out; terminating");
                        self.terminate();
                        return Err(GatewayError::TimedOut { timeout: limit });
                    }
                    thread::sleep(POLL_INTERVAL);
                }
            }
        };
        self.reaped = true;
        Ok(status)
    }

    fn terminate(&mut self) {
        if self.reaped {
            return;
        }
        let _ = self.child.kill();
        let _ = self.child.wait();
        self.reaped = true;
    }
}

impl Drop for ChildGuard {
    fn drop(&mut self) {
        if !self.reaped {
            tracing::debug!(pid = self.child.id(), "reaping engine on early exit");
        }
        self.terminate();
    }
}

type Writer = Option<JoinHandle<io::Result<()>>>;
type Reader = Option<JoinHandle<io::Result<String>>>;

fn spawn_writer<W: Write + Send + 'static>(stdin: Option<W>, request: String) -> Writer {
    stdin.map(|mut stdin| {
        thread::spawn(move || {
            match stdin.write_all(request.as_bytes()) {
                Err(e) if e.kind() == ErrorKind::BrokenPipe => {
                    tracing::warn!("engine closed stdin before the full request was written");
                    Ok(())
                }
                other => other,
            }
            // stdin drops here; the engine sees end-of-input.
        })
    })
}

fn join_writer(writer: Writer) -> GatewayResult<()> {
    let Some(handle) = writer else {
        return Ok(());
    };
    handle
        .join()
        .unwrap_or_else(|_| Err(io::Error::other("writer thread panicked")))
        .map_err(|source| GatewayError::Io {
            during: "writing request",
            source,
        })
}

fn spawn_reader<R: Read + Send + 'static>(stream: Option<R>) -> Reader {
    stream.map(|mut stream| {
        thread::spawn(move || {
            let mut buf = Vec::new();
            stream.read_to_end(&mut buf)?;
            Ok(String::from_utf8_lossy(&buf).into_owned())
        })
    })
}

fn join_reader(reader: Reader, during: &'static str) -> GatewayResult<String> {
    let Some(handle) = reader else {
        return Ok(String::new());
    };
    handle
        .join()
        .unwrap_or_else(|_| Err(io::Error::other("reader thread panicked")))
        .map_err(|source| GatewayError::Io { during, source })
}
