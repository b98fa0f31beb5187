use std::path::Path;

use anyhow::Context as _;
use anyhow::Result;
use serde::Deserialize;
use serde::Serialize;
use slog::debug;
use slog::info;
use slog::Logger;
use tokio::fs::File;
use tokio::fs::OpenOptions;
use tokio::io::AsyncReadExt;
use tokio::io::AsyncWriteExt;
use tokio::io::ErrorKind;

use verifyctl_client::Session;

use super::NoActiveSession;

/// Default location of the session store, relative to the user's HOME.
pub const DEFAULT_STORE_PATH: &str = "~/.config/verifyctl/config";

const STORE_API_VERSION: &str = "1.0";
const STORE_KIND: &str = "Config";

/// Store all known tenant sessions, persisting them to disk.
///
/// At most one session is kept for each tenant and sessions keep the order they were added in.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStore {
    #[serde(default = "SessionStore::default_api_version")]
    api_version: String,

    #[serde(default = "SessionStore::default_kind")]
    kind: String,

    /// Pointer to the tenant operations act on, if any.
    ///
    /// Always present in the file, as an empty string when no tenant is selected.
    #[serde(default, rename = "tenant", with = "tenant_field")]
    current: Option<String>,

    /// Collection of known sessions.
    #[serde(default)]
    auth: Vec<Session>,
}

impl SessionStore {
    /// Return an empty SessionStore.
    pub fn empty() -> SessionStore {
        SessionStore {
            api_version: SessionStore::default_api_version(),
            kind: SessionStore::default_kind(),
            current: None,
            auth: Vec::new(),
        }
    }

    /// Add a session, replacing the token and kind of any session for the same tenant.
    pub fn add_or_replace(&mut self, session: Session) {
        match self.auth.iter_mut().find(|s| s.tenant == session.tenant) {
            Some(existing) => {
                existing.token = session.token;
                existing.kind = session.kind;
            }
            None => self.auth.push(session),
        }
    }

    /// Session for the current tenant.
    pub fn current_session(&self) -> Result<&Session, NoActiveSession> {
        let tenant = self.current_tenant().ok_or(NoActiveSession::NoTenant)?;
        self.auth
            .iter()
            .find(|session| session.tenant == tenant)
            .ok_or_else(|| NoActiveSession::UnknownTenant(tenant.to_string()))
    }

    /// Tenant operations act on, if one is selected.
    pub fn current_tenant(&self) -> Option<&str> {
        self.current.as_deref().filter(|tenant| !tenant.is_empty())
    }

    /// Iterate over sessions in the store.
    pub fn iter(&self) -> impl Iterator<Item = &Session> {
        self.auth.iter()
    }

    /// Load the session store from disk.
    ///
    /// A missing store file is treated as an empty store.
    pub async fn load(logger: &Logger, path: &str) -> Result<SessionStore> {
        // Async load the store file into a buffer.
        debug!(logger, "Loading session store from disk"; "path" => path);
        let mut reader = match File::open(path).await {
            Ok(file) => file,
            Err(error) if error.kind() == ErrorKind::NotFound => return Ok(SessionStore::empty()),
            Err(error) => {
                return Err(error).context(format!("unable to open session store from {}", path))
            }
        };
        let mut buffer = Vec::new();
        reader
            .read_to_end(&mut buffer)
            .await
            .with_context(|| format!("unable to read session store from {}", path))?;

        // Decode the store from the buffer and return it.
        let store = serde_yaml::from_slice(&buffer)
            .with_context(|| format!("unable to YAML decode session store from {}", path))?;
        Ok(store)
    }

    /// Write the session store to disk.
    ///
    /// If the directory containing the store file does not exist it will be created.
    pub async fn persist(&self, logger: &Logger, path: &str) -> Result<()> {
        debug!(logger, "Persisting session store to disk"; "path" => path);
        ensure_store_path(logger, path).await?;

        // Encode the store to a buffer so it can be written to disk asynchronously.
        let buffer = serde_yaml::to_string(self)
            .with_context(|| format!("unable to YAML encode session store to {}", path))?;
        let mut options = OpenOptions::new();
        options.create(true).truncate(true).write(true);
        #[cfg(unix)]
        options.mode(0o600);
        let mut file = options
            .open(path)
            .await
            .with_context(|| format!("unable to open session store at {}", path))?;

        // The mode above only applies to new files.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.set_permissions(std::fs::Permissions::from_mode(0o600))
                .await
                .with_context(|| format!("unable to restrict access to session store at {}", path))?;
        }
        file.write_all(buffer.as_bytes())
            .await
            .with_context(|| format!("unable to write session store to {}", path))?;
        file.flush()
            .await
            .with_context(|| format!("unable to flush session store to {}", path))
    }

    /// Select the tenant operations act on.
    ///
    /// The tenant is not required to have a session yet.
    pub fn set_current_tenant<S: Into<String>>(&mut self, tenant: S) {
        self.current = Some(tenant.into());
    }
}

impl SessionStore {
    fn default_api_version() -> String {
        String::from(STORE_API_VERSION)
    }

    fn default_kind() -> String {
        String::from(STORE_KIND)
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        SessionStore::empty()
    }
}

mod tenant_field {
    use serde::Deserialize;
    use serde::Deserializer;
    use serde::Serializer;

    pub fn serialize<S>(tenant: &Option<String>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(tenant.as_deref().unwrap_or_default())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let tenant = Option::<String>::deserialize(deserializer)?;
        Ok(tenant.filter(|tenant| !tenant.is_empty()))
    }
}

// Create the session store parent directory if needed.
async fn ensure_store_path(logger: &Logger, path: &str) -> Result<()> {
    let parent = match Path::new(path).parent() {
        None => return Ok(()),
        Some(parent) if parent.as_os_str().is_empty() => return Ok(()),
        Some(parent) => parent,
    };
    if parent.exists() {
        return Ok(());
    }
    info!(logger, "Creating parent directories for session store file"; "path" => path);
    tokio::fs::create_dir_all(parent)
        .await
        .with_context(|| "unable to create parent directories for the session store file")
}
