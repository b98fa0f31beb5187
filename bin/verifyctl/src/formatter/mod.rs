//! Abstract how information is presented to users to enable different interaction styles.
//!
//! - The default `Yaml` formatter aims to provide output suitable for people to read
//!   and to edit into resource files.
//! - The `JSON` formatter aims to provide output suitable for an automated script.
use anyhow::Result;
use clap::Args;
use clap::ValueEnum;

use verifyctl_client::Session;

mod json;
mod yaml;

pub mod ops;

use crate::globals::Globals;

/// Present a list of tenant [`Session`]s to the user.
pub trait TenantList {
    /// Append a new session into the list being formatted.
    fn append(&mut self, session: &Session, current: bool) -> Result<()>;

    /// Handle the now complete list of sessions and emit it to standard output.
    fn finish(&mut self) -> Result<()>;
}

/// List of available output formats.
#[derive(Copy, Clone, Debug, Default, ValueEnum)]
pub enum FormatId {
    /// Output documents as YAML and lists as tables.
    #[default]
    Yaml,

    /// Output information as JSON documents.
    Json,
}

/// Configure output formatting for `verifyctl`.
#[derive(Args, Debug)]
pub struct FormatOpts {
    /// Select the format to use for output.
    #[arg(
        long = "format",
        global = true,
        env = "VERIFYCTL_FORMAT",
        default_value_t,
        value_enum
    )]
    pub format: FormatId,
}

/// Present information to users in their preferred format.
pub struct Formatter {
    /// Runtime strategy to execute formatting operations with.
    strategy: Box<dyn FormatterStrategy>,
}

impl Formatter {
    /// Execute the specified formatting operation.
    pub fn format<O>(&self, globals: &Globals, op: O) -> Result<O::Response>
    where
        O: self::ops::FormatOp,
    {
        let op = op.into();
        let result = self.strategy.format(globals, op)?;
        Ok(O::Response::from(result))
    }
}

/// Interface to implement user output formatting.
pub trait FormatterStrategy {
    /// Execute the requested formatting operation.
    fn format(&self, globals: &Globals, op: self::ops::Ops) -> Result<self::ops::Responses>;
}

/// Instantiate a formatter based on CLI configuration.
pub fn select(format: &FormatOpts) -> Formatter {
    let strategy: Box<dyn FormatterStrategy> = match format.format {
        FormatId::Yaml => Box::new(self::yaml::YamlFormatter),
        FormatId::Json => Box::new(self::json::JsonFormatter),
    };
    Formatter { strategy }
}
