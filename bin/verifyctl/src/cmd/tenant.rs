//! List known tenants or select the current tenant.
use anyhow::Result;
use clap::Args;
use clap::Subcommand;

use crate::formatter::ops::TenantListOp;
use crate::Globals;

/// List known tenants or select the current tenant.
#[derive(Args, Debug)]
pub struct TenantCli {
    /// Select the `verifyctl tenant` command to run.
    #[command(subcommand)]
    pub command: TenantCmd,
}

/// Select the `verifyctl tenant` command to run.
#[derive(Debug, Subcommand)]
pub enum TenantCmd {
    /// List tenants with a stored login session.
    #[command(alias = "ls")]
    List,

    /// Select the tenant future commands act on.
    Use(UseOpt),
}

/// Options for the `verifyctl tenant use` command.
#[derive(Args, Debug)]
pub struct UseOpt {
    /// Hostname of the tenant to select.
    pub tenant: String,
}

/// Execute the selected `verifyctl tenant` command.
pub async fn run(globals: &Globals, cmd: &TenantCli) -> Result<i32> {
    match &cmd.command {
        TenantCmd::List => list(globals).await,
        TenantCmd::Use(opt) => select(globals, opt).await,
    }
}

async fn list(globals: &Globals) -> Result<i32> {
    let store = globals.sessions().await?;
    let mut formatter = globals.formatter.format(globals, TenantListOp)?;

    let current = store.current_tenant();
    for session in store.iter() {
        formatter.append(session, current == Some(session.tenant.as_str()))?;
    }

    formatter.finish()?;
    Ok(0)
}

// The tenant is not checked against known sessions until a command needs it.
async fn select(globals: &Globals, opt: &UseOpt) -> Result<i32> {
    let mut store = globals.sessions().await?;
    store.set_current_tenant(opt.tenant.as_str());
    store.persist(&globals.logger, &globals.store_path).await?;
    println!("Current tenant set to '{}'", opt.tenant);
    Ok(0)
}
