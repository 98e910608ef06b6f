//! Logging bootstrap.
//!
//! `RUST_LOG` wins when set; otherwise the environment picks the level.
//! Output goes to stdout unless a log file is configured.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::AppEnv;

/// Error raised when a global subscriber is already installed.
pub type TelemetryError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Filter directive used when `RUST_LOG` is unset.
#[must_use]
pub const fn default_directive(env: AppEnv) -> &'static str {
    match env {
        AppEnv::Local | AppEnv::Dev => "debug",
        AppEnv::Prod => "info",
    }
}

fn filter_for(env: AppEnv) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive(env)))
}

/// Open `path` for appending, creating missing parent directories.
///
/// # Errors
/// Fails when `path` has no file name or the file cannot be opened.
pub fn file_appender(path: &Path) -> Result<RollingFileAppender, TelemetryError> {
    let file_name = path
        .file_name()
        .ok_or_else(|| format!("log file path `{}` has no file name", path.display()))?;
    let directory = path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name.to_string_lossy())
        .build(directory)?;
    Ok(appender)
}

/// Install the global `tracing` subscriber for `env`.
///
/// Local runs get pretty human-readable output; every other environment
/// logs one JSON object per line. With `log_file` set, events are written
/// to that file through a background worker; keep the returned guard alive
/// until shutdown so buffered lines are flushed.
///
/// # Errors
/// Fails when the log file cannot be opened or a global subscriber has
/// already been set.
pub fn init(env: AppEnv, log_file: Option<&Path>) -> Result<Option<WorkerGuard>, TelemetryError> {
    let Some(path) = log_file else {
        let builder = fmt().with_env_filter(filter_for(env));
        match env {
            AppEnv::Local => builder.pretty().try_init()?,
            AppEnv::Dev | AppEnv::Prod => builder.json().try_init()?,
        }
        return Ok(None);
    };

    let (writer, guard) = tracing_appender::non_blocking(file_appender(path)?);
    let builder = fmt()
        .with_env_filter(filter_for(env))
        .with_ansi(false)
        .with_writer(writer);
    match env {
        AppEnv::Local => builder.pretty().try_init()?,
        AppEnv::Dev | AppEnv::Prod => builder.json().try_init()?,
    }
    Ok(Some(guard))
}
