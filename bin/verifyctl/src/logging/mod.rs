//! Structured logging for `verifyctl`, disabled unless a log file is requested.
use anyhow::Result;
use clap::Args;
use clap::ValueEnum;
use slog::Logger;

use crate::utils::resolve_home;

mod logger;

/// Enumerate valid log verbosity levels.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum LogLevel {
    Critical,
    Error,
    #[value(alias = "warn")]
    Warning,
    #[default]
    Info,
    Debug,
}

impl From<LogLevel> for slog::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Critical => slog::Level::Critical,
            LogLevel::Error => slog::Level::Error,
            LogLevel::Warning => slog::Level::Warning,
            LogLevel::Info => slog::Level::Info,
            LogLevel::Debug => slog::Level::Debug,
        }
    }
}

/// Logging-related options.
#[derive(Args, Debug)]
pub struct LogOpt {
    /// If provided, JSON encoded logs will be appended to this file.
    #[arg(long = "log-file", global = true, env = "VERIFYCTL_LOG_FILE")]
    pub file: Option<String>,

    /// Verbosity level for the log file.
    #[arg(
        long = "log-level",
        global = true,
        env = "VERIFYCTL_LOG_LEVEL",
        default_value_t,
        value_enum
    )]
    pub level: LogLevel,
}

/// Initialise a logger based on the given CLI arguments.
pub fn configure(opt: &LogOpt) -> Result<Logger> {
    let file = match &opt.file {
        Some(file) => resolve_home(file)?,
        None => return Ok(self::logger::null()),
    };
    self::logger::file(&file, opt.level.into())
}
