/// `tracing` subscriber setup.
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

/// Environment variable holding an `EnvFilter` directive (e.g. `accelview=trace`).
pub const LOG_ENV: &str = "ACCELVIEW_LOG";

/// Where log lines go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogSink<'a> {
    Stderr,
    File(&'a Path),
    /// Drop everything; used while the live screen owns the terminal.
    Discard,
}

/// Install the global subscriber.
///
/// `ACCELVIEW_LOG` wins over the default level, which is `warn`, or `debug`
/// when `debug` is set.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened or a subscriber is
/// already installed.
pub fn init(debug: bool, sink: LogSink<'_>) -> Result<()> {
    let default_level = if debug { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));

    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(false);

    let installed = match sink {
        LogSink::Stderr => builder.with_writer(std::io::stderr).try_init(),
        LogSink::File(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("opening log file {}", path.display()))?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
        LogSink::Discard => builder.with_writer(std::io::sink).try_init(),
    };

    installed.map_err(|err| anyhow::anyhow!("installing log subscriber: {err}"))
}
