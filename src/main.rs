//! CLI entry point for the bikeshare statistics tool.
//!
//! Without `--city` the tool runs the interactive prompt loop; with it, one
//! report is printed for the given filters (month and day default to `all`)
//! and the process exits. Failures print a one-line message and exit non-zero.

use anyhow::Result;
use bikeshare_stats::config::DatasetSource;
use bikeshare_stats::filter::Selection;
use bikeshare_stats::prompt::Prompter;
use bikeshare_stats::session::{SessionOptions, is_closed_input, run_interactive, run_once};
use bikeshare_stats::viewer::DEFAULT_PAGE_SIZE;
use clap::Parser;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "bikeshare_stats")]
#[command(about = "Explore US bikeshare trip data", long_about = None)]
struct Cli {
    /// City to analyze; skips the prompts and prints a single report
    #[arg(short, long)]
    city: Option<String>,

    /// Month filter (january..june or all), used with --city
    #[arg(short, long, default_value = "all")]
    month: String,

    /// Day filter (monday..sunday or all), used with --city
    #[arg(short, long, default_value = "all")]
    day: String,

    /// Directory holding the built-in city CSV files
    #[arg(long, env = "BIKESHARE_DATA_DIR", default_value = ".")]
    data_dir: PathBuf,

    /// JSON file mapping city names to CSV paths (replaces the built-in cities)
    #[arg(long)]
    cities: Option<PathBuf>,

    /// Print reports as JSON
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Rows per page in the raw data viewer
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    page_size: usize,
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok(); // Load .env file

    let cli = Cli::parse();
    let _log_guard = match init_logging() {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to set up logging: {e}");
            return ExitCode::FAILURE;
        }
    };

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            debug!(error = ?e, "Run failed");
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let source = match &cli.cities {
        Some(path) => DatasetSource::load(path)?,
        None => DatasetSource::builtin(&cli.data_dir),
    };
    let options = SessionOptions {
        json: cli.json,
        page_size: cli.page_size,
    };

    match &cli.city {
        Some(city) => {
            let selection = Selection::parse(&cli.month, &cli.day)?;
            let mut stdout = std::io::stdout().lock();
            run_once(&source, city, &selection, &mut stdout, &options)?;
        }
        None => {
            let stdin = std::io::stdin().lock();
            let stdout = std::io::stdout().lock();
            let mut prompter = Prompter::new(stdin, stdout);
            match run_interactive(&source, &mut prompter, &options) {
                Ok(()) => info!("Session finished"),
                Err(e) if is_closed_input(&e) => warn!("Input closed, ending session"),
                Err(e) => return Err(e),
            }
        }
    }

    Ok(())
}

/// Logging setup: plain stderr + JSON rolling log file.
///
/// stderr defaults to `warn` so log lines do not interleave with prompts.
fn init_logging() -> Result<WorkerGuard> {
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/bikeshare_stats.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("bikeshare_stats.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let stderr_filter = EnvFilter::try_from_env("RUST_LOG").unwrap_or(EnvFilter::new("warn"));
    let json_filter = EnvFilter::try_from_env("RUST_LOG_JSON").unwrap_or(EnvFilter::new("debug"));

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(stderr_filter);

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(json_filter);

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .try_init()?;

    Ok(guard)
}
