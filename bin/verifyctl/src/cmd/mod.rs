//! CLI interface for the verifyctl client.
use clap::Args;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;

pub mod create;
pub mod delete;
pub mod get;
pub mod load;
pub mod login;
pub mod tenant;
pub mod update;

use crate::formatter::FormatOpts;
use crate::logging::LogOpt;
use crate::session::SessionOpt;

/// CLI definition for the verifyctl binary.
#[derive(Debug, Parser)]
#[command(about)]
#[command(propagate_version = true)]
#[command(version)]
pub struct Cli {
    /// Session store selection arguments.
    #[command(flatten)]
    pub session: SessionOpt,

    /// Configure how tenants are reached.
    #[command(flatten)]
    pub client: ClientOpt,

    /// Select the `verifyctl` command to run.
    #[command(subcommand)]
    pub command: Command,

    /// Configure how `verifyctl` output is formatted.
    #[command(flatten)]
    pub format: FormatOpts,

    /// Configure `verifyctl` logging.
    #[command(flatten)]
    pub log: LogOpt,
}

/// Options for the API client used to reach tenants.
#[derive(Args, Debug)]
pub struct ClientOpt {
    /// Seconds to wait for each request to the tenant to complete.
    #[arg(long, global = true, env = "VERIFYCTL_TIMEOUT", default_value_t = 30)]
    pub timeout: u64,
}

/// Select the `verifyctl` command to run.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create a resource on the current tenant.
    Create(create::CreateCli),

    /// Delete a resource from the current tenant.
    Delete(delete::DeleteCli),

    /// Show one resource, or list resources, from the current tenant.
    Get(get::GetCli),

    /// Log into a tenant and make it the current tenant.
    #[command(alias = "auth")]
    Login(login::LoginCli),

    /// List known tenants or select the current tenant.
    Tenant(tenant::TenantCli),

    /// Replace a resource on the current tenant with the content of a file.
    Update(update::UpdateCli),
}

/// Kinds of resources `verifyctl` can manage.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum ResourceType {
    /// API clients applications use to call the tenant's APIs.
    #[value(name = "apiclient", alias = "apiclients")]
    ApiClient,

    /// Directories and providers users authenticate against.
    #[value(name = "identitysource", alias = "identitysources")]
    IdentitySource,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;
    use clap::Parser;

    use super::Command;
    use super::ResourceType;
    use crate::Cli;

    #[test]
    fn clap_integrity_check() {
        let command = crate::Cli::command();
        command.debug_assert();
    }

    #[test]
    fn get_by_name() {
        let cli = Cli::try_parse_from(["verifyctl", "get", "apiclient", "--name", "app1"]).unwrap();
        match cli.command {
            Command::Get(get) => {
                assert_eq!(get.kind, ResourceType::ApiClient);
                assert_eq!(get.name.as_deref(), Some("app1"));
            }
            _ => panic!("expected the get command"),
        }
    }

    #[test]
    fn get_by_name_and_id_conflict() {
        let cli = Cli::try_parse_from([
            "verifyctl",
            "get",
            "identitysource",
            "--name",
            "a",
            "--id",
            "b",
        ]);
        assert!(cli.is_err());
    }

    #[test]
    fn create_requires_file() {
        let cli = Cli::try_parse_from(["verifyctl", "create", "apiclient"]);
        assert!(cli.is_err());
        let cli = Cli::try_parse_from(["verifyctl", "create", "apiclient", "--boilerplate"]);
        assert!(cli.is_ok());
    }

    #[test]
    fn login_requires_secret_for_clients() {
        let cli = Cli::try_parse_from([
            "verifyctl",
            "login",
            "t.example.com",
            "--client-id",
            "cid",
        ]);
        assert!(cli.is_err());
        let cli = Cli::try_parse_from([
            "verifyctl",
            "login",
            "t.example.com",
            "--client-id",
            "cid",
            "--user",
        ]);
        assert!(cli.is_ok());
    }
}
