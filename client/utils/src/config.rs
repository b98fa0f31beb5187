//! Configuration options for tenant HTTP(S) clients.
use std::time::Duration;

use reqwest::Client;
use reqwest::ClientBuilder;

use crate::request::Endpoint;
use crate::session::Session;

/// Default timeout for requests made by clients.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default timeout for new connections.
const DEFAULT_TIMEOUT_CONNECT: Duration = Duration::from_secs(10);

/// Options to initialise clients with.
///
/// Tenants are addressed by the [`Session`] each request is made for
/// so options only describe how connections are made.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ClientOptions {
    /// URL scheme used to reach tenants.
    pub scheme: String,

    /// Timeout for requests made by the client.
    pub timeout: Duration,

    /// Timeout for new connections initialised by the client.
    pub timeout_connect: Duration,
}

impl ClientOptions {
    /// Define options for API clients.
    pub fn builder() -> ClientOptionsBuilder {
        ClientOptionsBuilder {
            scheme: String::from("https"),
            timeout: DEFAULT_TIMEOUT,
            timeout_connect: DEFAULT_TIMEOUT_CONNECT,
        }
    }

    /// Prepare a [`reqwest`] client builder configured by these options.
    pub fn client(&self, user_agent: &str) -> ClientBuilder {
        Client::builder()
            .connect_timeout(self.timeout_connect)
            .timeout(self.timeout)
            .user_agent(user_agent)
    }

    /// Address requests for the given session.
    pub fn endpoint<'a>(&'a self, session: &'a Session) -> Endpoint<'a> {
        Endpoint::new(session).scheme(&self.scheme)
    }
}

impl Default for ClientOptions {
    fn default() -> Self {
        ClientOptions::builder().client()
    }
}

/// Incrementally build [`ClientOptions`] objects.
pub struct ClientOptionsBuilder {
    scheme: String,
    timeout: Duration,
    timeout_connect: Duration,
}

impl ClientOptionsBuilder {
    /// All options are set, get a usable options object.
    pub fn client(self) -> ClientOptions {
        self.into()
    }

    /// Reach tenants over plain HTTP.
    ///
    /// Only useful to talk to local test servers.
    pub fn insecure_http(mut self) -> Self {
        self.scheme = String::from("http");
        self
    }

    /// Set the timeout for requests made by the client.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the timeout for new connections.
    pub fn timeout_connect(mut self, timeout: Duration) -> Self {
        self.timeout_connect = timeout;
        self
    }
}

impl From<ClientOptionsBuilder> for ClientOptions {
    fn from(value: ClientOptionsBuilder) -> Self {
        ClientOptions {
            scheme: value.scheme,
            timeout: value.timeout,
            timeout_connect: value.timeout_connect,
        }
    }
}
