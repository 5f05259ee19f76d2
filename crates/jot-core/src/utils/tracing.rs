use chrono::Local;
use std::io;
use std::path::Path;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    EnvFilter,
    fmt::{self, format::FmtSpan},
    prelude::*,
};

use super::paths::AppPaths;

/// Initialize the tracing system with a file logger that appends to a timestamp-named file.
/// Configuration is loaded from the RUST_LOG environment variable.
///
/// An unusable log directory is not fatal: logging falls back to stderr.
pub fn init_tracing() -> io::Result<()> {
    let timestamp = Local::now().format("%Y%m%d_%H%M%S").to_string();

    let Some(log_dir) = AppPaths::log_dir() else {
        // No data directory on this platform
        return init_stderr();
    };

    let file_appender = match open_log_file(&log_dir, &timestamp) {
        Ok(appender) => appender,
        Err(e) => {
            init_stderr()?;
            tracing::warn!(
                target: "jot::utils::tracing",
                dir = %log_dir.display(),
                error = %e,
                "Log directory unusable; logging to stderr"
            );
            return Ok(());
        }
    };

    let subscriber = tracing_subscriber::registry()
        .with(
            fmt::Layer::new()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_span_events(FmtSpan::CLOSE)
                .with_file(true)
                .with_line_number(true),
        )
        .with(EnvFilter::from_default_env());

    tracing::subscriber::set_global_default(subscriber).map_err(io::Error::other)?;

    tracing::debug!(
        target: "jot::utils::tracing",
        path = %log_dir.join(format!("{timestamp}.log")).display(),
        "Tracing initialized with file output. Filter configured via RUST_LOG env var."
    );
    Ok(())
}

fn open_log_file(log_dir: &Path, timestamp: &str) -> io::Result<RollingFileAppender> {
    std::fs::create_dir_all(log_dir)?;

    RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(timestamp)
        .filename_suffix("log")
        .build(log_dir)
        .map_err(io::Error::other)
}

fn init_stderr() -> io::Result<()> {
    let subscriber = tracing_subscriber::registry()
        .with(
            fmt::Layer::default()
                .with_writer(io::stderr)
                .with_target(true),
        )
        .with(EnvFilter::from_default_env());

    tracing::subscriber::set_global_default(subscriber).map_err(io::Error::other)?;

    tracing::debug!(
        target: "jot::utils::tracing",
        "Tracing initialized with stderr output. Filter configured via RUST_LOG env var."
    );
    Ok(())
}
