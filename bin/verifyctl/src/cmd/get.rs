//! Show one resource, or list resources, from the current tenant.
use anyhow::Result;
use clap::Args;

use verifyctl_client::kind::ApiClient;
use verifyctl_client::kind::IdentitySource;
use verifyctl_client::Lookup;
use verifyctl_client::ResourceKind;

use super::ResourceType;
use crate::formatter::ops::DocumentOp;
use crate::Globals;

/// Show one resource, or list resources, from the current tenant.
#[derive(Args, Debug)]
pub struct GetCli {
    /// Kind of resources to show.
    #[arg(value_enum)]
    pub kind: ResourceType,

    /// Show the resource with this name.
    #[arg(long, conflicts_with = "id")]
    pub name: Option<String>,

    /// Show the resource with this identifier.
    #[arg(long)]
    pub id: Option<String>,

    /// Sort listed resources by the given attribute, for example `+clientName`.
    #[arg(long, conflicts_with_all = ["name", "id"])]
    pub sort: Option<String>,

    /// Maximum number of resources to list.
    #[arg(long, conflicts_with_all = ["name", "id"])]
    pub count: Option<u32>,
}

impl GetCli {
    fn lookup(&self) -> Option<Lookup> {
        match (&self.name, &self.id) {
            (_, Some(id)) => Some(Lookup::Id(id.clone())),
            (Some(name), None) => Some(Lookup::Name(name.clone())),
            (None, None) => None,
        }
    }
}

/// Execute the `verifyctl get` command.
pub async fn run(globals: &Globals, cmd: &GetCli) -> Result<i32> {
    match cmd.kind {
        ResourceType::ApiClient => get::<ApiClient>(globals, cmd).await,
        ResourceType::IdentitySource => get::<IdentitySource>(globals, cmd).await,
    }
}

async fn get<K: ResourceKind>(globals: &Globals, cmd: &GetCli) -> Result<i32> {
    let session = globals.current_session().await?;
    let client = globals.client()?;
    let resources = client.resource::<K>(&session);

    let (document, url) = match cmd.lookup() {
        Some(lookup) => {
            let fetched = resources.get(&lookup).await?;
            (DocumentOp::of(&fetched.data)?, fetched.url)
        }
        None => {
            let fetched = resources.list(cmd.sort.as_deref(), cmd.count).await?;
            (DocumentOp::of(&fetched.data)?, fetched.url)
        }
    };
    slog::debug!(globals.logger, "Fetched resources"; "kind" => K::KIND, "url" => url);
    globals.formatter.format(globals, document)?;
    Ok(0)
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use crate::cmd::Command;
    use crate::Cli;
    use verifyctl_client::Lookup;

    fn parse(args: &[&str]) -> super::GetCli {
        let cli = Cli::try_parse_from(args.iter().copied()).unwrap();
        match cli.command {
            Command::Get(cmd) => cmd,
            _ => panic!("expected the get command"),
        }
    }

    #[test]
    fn lookup_by_id() {
        let cmd = parse(&["verifyctl", "get", "apiclient", "--id", "42"]);
        assert_eq!(cmd.lookup(), Some(Lookup::Id("42".into())));
    }

    #[test]
    fn lookup_by_name() {
        let cmd = parse(&["verifyctl", "get", "apiclient", "--name", "app1"]);
        assert_eq!(cmd.lookup(), Some(Lookup::Name("app1".into())));
    }

    #[test]
    fn list_without_lookup() {
        let cmd = parse(&["verifyctl", "get", "apiclient", "--count", "5"]);
        assert_eq!(cmd.lookup(), None);
        assert_eq!(cmd.count, Some(5));
    }
}
