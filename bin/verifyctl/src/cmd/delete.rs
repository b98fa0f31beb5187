//! Delete a resource from the current tenant.
use anyhow::Result;
use clap::Args;

use verifyctl_client::kind::ApiClient;
use verifyctl_client::kind::IdentitySource;
use verifyctl_client::ResourceKind;

use super::ResourceType;
use crate::Globals;

/// Delete a resource from the current tenant.
#[derive(Args, Debug)]
pub struct DeleteCli {
    /// Kind of resource to delete.
    #[arg(value_enum)]
    pub kind: ResourceType,

    /// Name of the resource to delete.
    #[arg(long)]
    pub name: String,
}

/// Execute the `verifyctl delete` command.
pub async fn run(globals: &Globals, cmd: &DeleteCli) -> Result<i32> {
    match cmd.kind {
        ResourceType::ApiClient => delete::<ApiClient>(globals, cmd).await,
        ResourceType::IdentitySource => delete::<IdentitySource>(globals, cmd).await,
    }
}

async fn delete<K: ResourceKind>(globals: &Globals, cmd: &DeleteCli) -> Result<i32> {
    let session = globals.current_session().await?;
    let client = globals.client()?;
    client.resource::<K>(&session).delete(&cmd.name).await?;
    slog::info!(globals.logger, "Deleted resource"; "kind" => K::KIND, "name" => &cmd.name);
    println!("Resource deleted: {}", cmd.name);
    Ok(0)
}
