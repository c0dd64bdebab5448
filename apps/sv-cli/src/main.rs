use clap::{Parser, Subcommand, ValueEnum};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;
use sv_app::{
    AppConfig, AppError, AppResult, OutputFormat, RunProgressEvent, RunStage, RunTimingSummary,
    Session, load_config_or_default, render_report, run_service, write_output,
};
use sv_core::Mode;
use sv_gateway::ProcessEngine;

#[derive(Parser)]
#[command(name = "sv-cli")]
#[command(about = "SchedView - front-end for a CPU-scheduling simulation engine", long_about = None)]
struct Cli {
    /// Path to a YAML config file (defaults to ./schedview.yaml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Enter a simulation interactively and view the results
    Session {
        #[command(flatten)]
        engine: EngineArgs,
    },
    /// Run a simulation from a request file
    Run {
        /// Path to the request file
        request_path: PathBuf,
        /// Treat the request file as raw engine input text instead of YAML
        #[arg(long)]
        wire: bool,
        #[command(flatten)]
        engine: EngineArgs,
        /// Report format (defaults to the configured format)
        #[arg(long, value_enum)]
        format: Option<FormatArg>,
        /// Output file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Render previously captured engine output
    Render {
        /// Path to the captured engine stdout
        raw_path: PathBuf,
        /// Report mode the output was produced in (trace or stats)
        #[arg(long)]
        mode: Mode,
        /// Report format (defaults to the configured format)
        #[arg(long, value_enum)]
        format: Option<FormatArg>,
        /// Output file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Validate a request file and print the engine input it produces
    Check {
        /// Path to the request file
        request_path: PathBuf,
        /// Treat the request file as raw engine input text instead of YAML
        #[arg(long)]
        wire: bool,
    },
}

#[derive(clap::Args)]
struct EngineArgs {
    /// Engine executable (overrides engine.program)
    #[arg(long)]
    engine: Option<PathBuf>,
    /// Terminate the engine after this many milliseconds
    #[arg(long)]
    timeout_ms: Option<u64>,
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Html,
    Text,
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Html => OutputFormat::Html,
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();

    match dispatch(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}:\n{}", err.headline(), err);
            ExitCode::FAILURE
        }
    }
}

fn dispatch(cli: Cli) -> AppResult<()> {
    let config = load_config_or_default(cli.config.as_deref())?;

    match cli.command {
        Commands::Session { engine } => cmd_session(config, &engine),
        Commands::Run {
            request_path,
            wire,
            engine,
            format,
            output,
        } => cmd_run(
            config,
            &request_path,
            wire,
            &engine,
            format,
            output.as_deref(),
        ),
        Commands::Render {
            raw_path,
            mode,
            format,
            output,
        } => cmd_render(&config, &raw_path, mode, format, output.as_deref()),
        Commands::Check { request_path, wire } => cmd_check(&request_path, wire),
    }
}

fn engine_for(mut config: AppConfig, args: &EngineArgs) -> AppResult<ProcessEngine> {
    if let Some(program) = &args.engine {
        config.engine.program = program.clone();
    }
    if args.timeout_ms.is_some() {
        config.engine.timeout_ms = args.timeout_ms;
    }
    config.validate()?;
    tracing::debug!(program = %config.engine.program.display(), "using engine");
    Ok(ProcessEngine::new(config.engine.to_command()))
}

fn cmd_session(config: AppConfig, args: &EngineArgs) -> AppResult<()> {
    let engine = engine_for(config, args)?;
    let summary = Session::new(io::stdin().lock(), io::stdout().lock(), engine).run()?;
    tracing::debug!(
        completed = summary.completed,
        failed = summary.failed,
        "session finished"
    );
    Ok(())
}

fn cmd_run(
    config: AppConfig,
    request_path: &Path,
    wire: bool,
    args: &EngineArgs,
    format: Option<FormatArg>,
    output: Option<&Path>,
) -> AppResult<()> {
    let format = format.map_or(config.output.format, OutputFormat::from);
    let request = run_service::load_request(request_path, wire)?;
    let engine = engine_for(config, args)?;

    eprintln!(
        "Running {} simulation ({}, {} processes)...",
        request.mode().as_wire(),
        request.policy(),
        request.process_count()
    );

    let mut last_emit = Instant::now();
    let result = run_service::run_simulation_with_progress(
        &engine,
        &request,
        Some(&mut |event: RunProgressEvent| {
            if event.stage == RunStage::Completed
                || last_emit.elapsed().as_millis() >= 50
            {
                render_cli_progress(&event);
                last_emit = Instant::now();
            }
        }),
    );
    clear_progress_line();
    let response = result?;

    let rendered = render_report(&response.report, format)?;
    write_output(output, &rendered)?;
    if let Some(path) = output {
        eprintln!("Report written to {}", path.display());
    }

    print_timing_summary(&response.timing);
    Ok(())
}

fn cmd_render(
    config: &AppConfig,
    raw_path: &Path,
    mode: Mode,
    format: Option<FormatArg>,
    output: Option<&Path>,
) -> AppResult<()> {
    let format = format.map_or(config.output.format, OutputFormat::from);
    let raw = std::fs::read_to_string(raw_path)?;
    let report = sv_report::parse(mode, &raw)?;
    let rendered = render_report(&report, format)?;
    write_output(output, &rendered)
}

fn cmd_check(request_path: &Path, wire: bool) -> AppResult<()> {
    let request = run_service::load_request(request_path, wire)?;
    eprintln!(
        "✓ Request is valid: {} / {} / {} processes",
        request.mode().as_wire(),
        request.policy(),
        request.process_count()
    );
    print!("{}", request.serialize());
    io::stdout().flush().map_err(AppError::from)
}

fn clear_progress_line() {
    eprint!("\r{}\r", " ".repeat(80));
    let _ = io::stderr().flush();
}

fn render_cli_progress(event: &RunProgressEvent) {
    let spinner = ['|', '/', '-', '\\'];
    let spin_idx = ((event.elapsed_wall_s * 10.0) as usize) % spinner.len();
    let mut line = format!(
        "\r{} {}  elapsed={:.2}s",
        spinner[spin_idx],
        event.stage.label(),
        event.elapsed_wall_s
    );
    if let Some(msg) = &event.message {
        line.push_str(&format!("  {}", msg));
    }
    eprint!("{}", line);
    let _ = io::stderr().flush();
}

fn print_timing_summary(timing: &RunTimingSummary) {
    let total = timing.total_time_s.max(1.0e-12);
    let engine_pct = 100.0 * timing.engine_time_s / total;
    let parse_pct = 100.0 * timing.parse_time_s / total;

    eprintln!("\nTiming summary:");
    eprintln!("  Engine: {:.3}s ({:.1}%)", timing.engine_time_s, engine_pct);
    eprintln!("  Parse:  {:.3}s ({:.1}%)", timing.parse_time_s, parse_pct);
    eprintln!("  Total:  {:.3}s", timing.total_time_s);
}
