//! Create a resource on the current tenant.
use anyhow::Result;
use clap::Args;

use verifyctl_client::kind::ApiClient;
use verifyctl_client::kind::IdentitySource;
use verifyctl_client::kind::ResourceObject;
use verifyctl_client::ResourceKind;

use super::ResourceType;
use crate::formatter::ops::DocumentOp;
use crate::Globals;

/// Create a resource on the current tenant.
#[derive(Args, Debug)]
pub struct CreateCli {
    /// Kind of resource to create.
    #[arg(value_enum)]
    pub kind: ResourceType,

    /// File with the resource document, or `-` to read standard input.
    #[arg(short, long, required_unless_present_any = ["boilerplate", "entitlements"])]
    pub file: Option<String>,

    /// Print a document to start from instead of creating a resource.
    #[arg(long, default_value_t = false, conflicts_with = "entitlements")]
    pub boilerplate: bool,

    /// Print the entitlements an API client needs to manage this kind of resource.
    #[arg(long, default_value_t = false)]
    pub entitlements: bool,
}

/// Execute the `verifyctl create` command.
pub async fn run(globals: &Globals, cmd: &CreateCli) -> Result<i32> {
    match cmd.kind {
        ResourceType::ApiClient => create::<ApiClient>(globals, cmd).await,
        ResourceType::IdentitySource => create::<IdentitySource>(globals, cmd).await,
    }
}

async fn create<K: ResourceKind>(globals: &Globals, cmd: &CreateCli) -> Result<i32> {
    if cmd.boilerplate {
        let boilerplate = ResourceObject::wrap::<K>(K::boilerplate());
        globals.formatter.format(globals, DocumentOp::of(&boilerplate)?)?;
        return Ok(0);
    }
    if cmd.entitlements {
        println!("Entitlements needed to manage {} resources:", K::KIND);
        for entitlement in K::ENTITLEMENTS {
            println!("  - {}", entitlement);
        }
        return Ok(0);
    }

    let source = cmd.file.as_deref().unwrap_or("-");
    let document = super::load::document::<K>(source).await?;
    let session = globals.current_session().await?;
    let client = globals.client()?;
    let created = client.resource::<K>(&session).create(&document).await?;
    slog::debug!(
        globals.logger, "Created resource";
        "kind" => K::KIND, "name" => K::name(&document), "location" => &created.location,
    );
    println!("Resource created: {}", created);
    Ok(0)
}
