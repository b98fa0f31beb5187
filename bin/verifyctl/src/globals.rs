//! Container for data to made accessible to all `verifyctl` commands.
use std::time::Duration;

use anyhow::Result;
use slog::Logger;

use verifyctl_client::Client;
use verifyctl_client::ClientOptions;
use verifyctl_client::Session;

use crate::formatter::Formatter;
use crate::session::SessionStore;
use crate::utils::resolve_home;
use crate::Cli;

/// Container for data to made accessible to all `verifyctl` commands.
pub struct Globals {
    /// Parse CLI arguments.
    pub cli: Cli,

    /// Configured process formatter for all output.
    pub formatter: Formatter,

    /// Configured process logger for advanced users feedback/debugging.
    pub logger: Logger,

    /// Path to the session store, with `~` expanded.
    pub store_path: String,
}

impl Globals {
    /// Initialise `verifyctl` process [`Globals`].
    pub fn initialise(cli: Cli) -> Result<Self> {
        let logger = crate::logging::configure(&cli.log)?;
        let formatter = crate::formatter::select(&cli.format);
        let store_path = resolve_home(&cli.session.path)?;
        Ok(Globals {
            cli,
            formatter,
            logger,
            store_path,
        })
    }

    /// Initialise an API client configured from the CLI.
    pub fn client(&self) -> Result<Client> {
        let options = ClientOptions::builder()
            .timeout(Duration::from_secs(self.cli.client.timeout))
            .client();
        Client::with(options, self.logger.clone())
    }

    /// Load the session for the current tenant.
    pub async fn current_session(&self) -> Result<Session> {
        let store = self.sessions().await?;
        let session = store.current_session()?;
        slog::debug!(self.logger, "Using session for tenant"; "tenant" => &session.tenant);
        Ok(session.clone())
    }

    /// Load the session store from disk.
    pub async fn sessions(&self) -> Result<SessionStore> {
        SessionStore::load(&self.logger, &self.store_path).await
    }
}
