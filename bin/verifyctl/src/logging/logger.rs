use std::fs::OpenOptions;
use std::sync::Mutex;

use anyhow::Context;
use anyhow::Result;
use slog::o;
use slog::Drain;
use slog::Level;
use slog::Logger;

/// Logger for runs without a log file.
pub fn null() -> Logger {
    Logger::root(slog::Discard, o!())
}

/// Append one JSON object per event to the log file at `path`.
///
/// Events below `level` are dropped and write errors are ignored.
pub fn file(path: &str, level: Level) -> Result<Logger> {
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("unable to open log file at {}", path))?;
    let json = slog_json::Json::new(log_file)
        .set_newlines(true)
        .set_flush(true)
        .add_default_keys()
        .build();
    let drain = Mutex::new(json).filter_level(level).ignore_res();
    let logger = Logger::root(
        drain,
        o!("app" => "verifyctl", "version" => env!("CARGO_PKG_VERSION")),
    );
    Ok(logger)
}
