//! Manage resources on Verify tenants from a Command Line Interface.
use anyhow::Result;
use clap::Parser;

mod cmd;
mod formatter;
mod globals;
mod logging;
mod session;
mod utils;

pub mod errors;

pub use self::cmd::Cli;
use self::globals::Globals;

/// Initialise the verifyctl process and invoke a command implementation.
pub async fn run() -> Result<i32> {
    let cli = Cli::parse();
    let globals = Globals::initialise(cli)?;
    slog::debug!(globals.logger, "verifyctl starting"; "version" => env!("CARGO_PKG_VERSION"));

    match &globals.cli.command {
        cmd::Command::Create(cmd) => cmd::create::run(&globals, cmd).await,
        cmd::Command::Delete(cmd) => cmd::delete::run(&globals, cmd).await,
        cmd::Command::Get(cmd) => cmd::get::run(&globals, cmd).await,
        cmd::Command::Login(cmd) => cmd::login::run(&globals, cmd).await,
        cmd::Command::Tenant(cmd) => cmd::tenant::run(&globals, cmd).await,
        cmd::Command::Update(cmd) => cmd::update::run(&globals, cmd).await,
    }
}
