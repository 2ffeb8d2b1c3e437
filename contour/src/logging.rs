//! Logging infrastructure for Contour.
//!
//! Provides structured logging with file output and optional console output:
//! - Writes to a log file (default `~/.contour/contour.log`, cleared on session start)
//! - Optionally mirrors to stdout
//! - Multi-line pretty format for readability
//! - Configurable via RUST_LOG environment variable

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Guard that must be kept alive for the duration of logging.
///
/// Dropping this guard will flush and close the log file writer.
pub struct LoggingGuard {
    _file_guard: WorkerGuard,
}

/// Initialize logging system.
///
/// Creates the log directory if needed, clears the previous log file,
/// and installs the global subscriber.
///
/// # Arguments
///
/// * `log_dir` - Directory for log files
/// * `log_file` - Log filename (e.g., "contour.log")
/// * `stdout_enabled` - Also print log events to stdout
/// * `debug` - Force `debug` level regardless of RUST_LOG
///
/// # Returns
///
/// LoggingGuard that must be kept alive for logging to work
///
/// # Errors
///
/// Returns error if log directory cannot be created or log file cannot be cleared
pub fn init_logging(
    log_dir: &Path,
    log_file: &str,
    stdout_enabled: bool,
    debug: bool,
) -> Result<LoggingGuard, io::Error> {
    prepare_log_file(log_dir, log_file)?;

    let file_appender = tracing_appender::rolling::never(log_dir, log_file);
    let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false)
        .with_span_events(FmtSpan::CLOSE)
        .pretty();

    let stdout_layer = stdout_enabled.then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(io::stdout)
            .with_ansi(true)
            .with_span_events(FmtSpan::CLOSE)
            .pretty()
    });

    tracing_subscriber::registry()
        .with(env_filter(debug))
        .with(file_layer)
        .with(stdout_layer)
        .init();

    Ok(LoggingGuard {
        _file_guard: file_guard,
    })
}

/// Builds the level filter: `debug` when forced, otherwise RUST_LOG or `info`.
fn env_filter(debug: bool) -> EnvFilter {
    if debug {
        return EnvFilter::new("debug");
    }
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Creates `log_dir` and truncates `log_file` inside it.
fn prepare_log_file(log_dir: &Path, log_file: &str) -> io::Result<PathBuf> {
    fs::create_dir_all(log_dir)?;
    let log_path = log_dir.join(log_file);
    fs::write(&log_path, "")?;
    Ok(log_path)
}
