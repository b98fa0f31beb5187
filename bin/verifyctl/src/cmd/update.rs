//! Replace a resource on the current tenant with the content of a file.
use anyhow::Result;
use clap::Args;

use verifyctl_client::kind::ApiClient;
use verifyctl_client::kind::IdentitySource;
use verifyctl_client::ResourceKind;

use super::ResourceType;
use crate::Globals;

/// Replace a resource on the current tenant with the content of a file.
#[derive(Args, Debug)]
pub struct UpdateCli {
    /// Kind of resource to update.
    #[arg(value_enum)]
    pub kind: ResourceType,

    /// File with the full resource document, or `-` to read standard input.
    #[arg(short, long)]
    pub file: String,
}

/// Execute the `verifyctl update` command.
pub async fn run(globals: &Globals, cmd: &UpdateCli) -> Result<i32> {
    match cmd.kind {
        ResourceType::ApiClient => update::<ApiClient>(globals, cmd).await,
        ResourceType::IdentitySource => update::<IdentitySource>(globals, cmd).await,
    }
}

async fn update<K: ResourceKind>(globals: &Globals, cmd: &UpdateCli) -> Result<i32> {
    let document = super::load::document::<K>(&cmd.file).await?;
    let session = globals.current_session().await?;
    let client = globals.client()?;
    client.resource::<K>(&session).update(&document).await?;
    println!("Resource updated: {}", K::name(&document));
    Ok(0)
}
