//! Authenticated sessions with a tenant.
use std::fmt;

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;

/// Who a session was issued to.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum SessionKind {
    /// Token issued to an API client through the client credentials grant.
    #[default]
    Client,

    /// Token issued to a person through an interactive login.
    User,
}

impl SessionKind {
    /// Check if the session was issued to a person.
    pub fn is_user(&self) -> bool {
        matches!(self, SessionKind::User)
    }
}

impl From<bool> for SessionKind {
    fn from(is_user: bool) -> Self {
        match is_user {
            true => SessionKind::User,
            false => SessionKind::Client,
        }
    }
}

// Stored as the `isUser` flag.
impl Serialize for SessionKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_bool(self.is_user())
    }
}

impl<'de> Deserialize<'de> for SessionKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        bool::deserialize(deserializer).map(SessionKind::from)
    }
}

/// Credentials to address API requests to a tenant with.
///
/// Sessions are immutable values: operations receive the session to act on
/// instead of reading it from a shared location.
#[derive(Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Hostname of the tenant, optionally with a port.
    pub tenant: String,

    /// Bearer token sent with every request.
    pub token: String,

    /// Who the token was issued to.
    #[serde(default, rename = "isUser")]
    pub kind: SessionKind,
}

impl Session {
    /// Session for the given tenant and token.
    pub fn new<S1, S2>(tenant: S1, token: S2, kind: SessionKind) -> Session
    where
        S1: Into<String>,
        S2: Into<String>,
    {
        Session {
            tenant: tenant.into(),
            token: token.into(),
            kind,
        }
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("tenant", &self.tenant)
            .field("token", &"<redacted>")
            .field("kind", &self.kind)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::Session;
    use super::SessionKind;

    #[test]
    fn debug_hides_token() {
        let session = Session::new("t.example.com", "secret-token", SessionKind::User);
        let debug = format!("{:?}", session);
        assert!(debug.contains("t.example.com"));
        assert!(!debug.contains("secret-token"));
    }

    #[test]
    fn kind_is_stored_as_flag() {
        let session = Session::new("t.example.com", "abc", SessionKind::User);
        let encoded = serde_json::to_value(&session).unwrap();
        assert_eq!(
            encoded,
            serde_json::json!({"tenant": "t.example.com", "token": "abc", "isUser": true}),
        );
    }

    #[test]
    fn kind_defaults_to_client() {
        let session: Session = serde_yaml::from_str("tenant: t.example.com\ntoken: abc\n").unwrap();
        assert_eq!(session.kind, SessionKind::Client);
    }
}
