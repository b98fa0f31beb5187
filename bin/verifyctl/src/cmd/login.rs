//! Log into a tenant and make it the current tenant.
use anyhow::Result;
use clap::Args;
use slog::info;

use verifyctl_client::DeviceAuthorization;

use crate::Globals;

/// Log into a tenant and make it the current tenant.
#[derive(Args, Debug)]
pub struct LoginCli {
    /// Hostname of the tenant to log into, for example `example.verify.ibm.com`.
    pub tenant: String,

    /// ID of the API client, or of the application users log in through.
    #[arg(long)]
    pub client_id: String,

    /// Secret of the API client.
    #[arg(long, env = "VERIFYCTL_CLIENT_SECRET", required_unless_present = "user")]
    pub client_secret: Option<String>,

    /// Log in as a user, approving the login from a browser.
    #[arg(long, default_value_t = false)]
    pub user: bool,
}

/// Obtain a session for the tenant and store it as the current session.
pub async fn run(globals: &Globals, cmd: &LoginCli) -> Result<i32> {
    let client = globals.client()?;
    let secret = cmd.client_secret.as_deref();
    let session = match (cmd.user, secret) {
        (false, Some(secret)) => {
            client
                .login_client_credentials(&cmd.tenant, &cmd.client_id, secret)
                .await?
        }
        _ => {
            client
                .login_device(&cmd.tenant, &cmd.client_id, secret, prompt)
                .await?
        }
    };

    let mut store = globals.sessions().await?;
    store.add_or_replace(session);
    store.set_current_tenant(cmd.tenant.as_str());
    store.persist(&globals.logger, &globals.store_path).await?;
    info!(globals.logger, "Stored login session"; "tenant" => &cmd.tenant, "user" => cmd.user);
    println!("Login succeeded, '{}' is now the current tenant", cmd.tenant);
    Ok(0)
}

fn prompt(authorization: &DeviceAuthorization) {
    println!(
        "Complete the login by visiting {} and entering the code {}",
        authorization.verification_uri, authorization.user_code,
    );
    if let Some(uri) = &authorization.verification_uri_complete {
        println!("Or open {} to skip entering the code", uri);
    }
    println!("Waiting for the login to be approved ...");
}
