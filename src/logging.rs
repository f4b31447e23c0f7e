use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt};

const LOG_FILE_PREFIX: &str = "snake-arcade";

/// Routes `tracing` output to a log file in `dir`.
///
/// The terminal belongs to the game UI, so nothing is written to stdout or
/// stderr. Honors `RUST_LOG`, defaulting to `info`. Returns `None` (logging
/// disabled) when the file cannot be created; the returned guard must be kept
/// alive until exit to flush buffered lines.
pub fn init(dir: &Path) -> Option<WorkerGuard> {
    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(LOG_FILE_PREFIX)
        .filename_suffix("log")
        .build(dir)
        .ok()?;
    let (writer, guard) = tracing_appender::non_blocking(appender);

    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(writer)
        .with_ansi(false)
        .with_target(false)
        .compact()
        .try_init()
        .ok()?;

    Some(guard)
}
