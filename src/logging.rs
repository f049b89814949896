//! Logging initialization.
//!
//! Sets up the tracing subscriber with a configurable level, format, and
//! output destination. Levels can come from `RUST_LOG` or from the CLI;
//! noisy transport dependencies are filtered down unless explicitly traced.

use std::fs::OpenOptions;
use std::io;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum LogFormat {
    /// Human-readable pretty format.
    #[default]
    Pretty,
    /// Compact single-line format.
    Compact,
    /// JSON format for structured logging.
    Json,
}

/// Builds the default filter directives for a level.
fn level_directives(level: &str, trace_deps: bool) -> String {
    let level = match level {
        "trace" | "debug" | "info" | "warn" | "error" => level,
        _ => "info",
    };

    if trace_deps {
        level.to_string()
    } else {
        format!("{level},reqwest=warn,hyper=warn,rustls=warn")
    }
}

/// Initializes the logging system.
///
/// Returns a guard that must be kept alive for the duration of the program
/// so buffered log lines are flushed.
pub fn init_logging(
    level: &str,
    format: LogFormat,
    output: &str,
    trace_deps: bool,
) -> io::Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_directives(&level.to_lowercase(), trace_deps)));

    let (writer, guard) = match output.to_lowercase().as_str() {
        "stdout" => tracing_appender::non_blocking(
            Box::new(io::stdout()) as Box<dyn io::Write + Send + Sync>
        ),
        "stderr" => tracing_appender::non_blocking(
            Box::new(io::stderr()) as Box<dyn io::Write + Send + Sync>
        ),
        path => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            tracing_appender::non_blocking(Box::new(file) as Box<dyn io::Write + Send + Sync>)
        }
    };

    match format {
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().json().with_writer(writer))
                .init();
        }
        LogFormat::Compact => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().compact().with_writer(writer))
                .init();
        }
        LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().pretty().with_writer(writer))
                .init();
        }
    }

    Ok(Some(guard))
}
