//! Sessions with Verify tenants known to `verifyctl`.
use clap::Args;

mod store;

pub use self::store::SessionStore;
pub use self::store::DEFAULT_STORE_PATH;

/// Session store related CLI options.
#[derive(Args, Debug)]
pub struct SessionOpt {
    /// Path to the file known sessions are stored in.
    #[arg(
        long = "config",
        global = true,
        env = "VERIFYCTL_CONFIG",
        default_value = DEFAULT_STORE_PATH,
    )]
    pub path: String,
}

/// Error indicating no session can be used for tenant operations.
#[derive(thiserror::Error, Debug)]
pub enum NoActiveSession {
    /// No tenant was selected.
    #[error("no login session available")]
    NoTenant,

    /// The selected tenant has no stored session.
    #[error("no login session available for tenant '{0}'")]
    UnknownTenant(String),
}
