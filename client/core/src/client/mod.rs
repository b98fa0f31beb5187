//! Implementation of the API client object, to keep files organised.
use anyhow::Context;
use anyhow::Result;
use reqwest::Client as ReqwestClient;
use reqwest::Request;
use slog::Logger;

use verifyctl_client_utils::Endpoint;
use verifyctl_client_utils::Reply;

mod auth;
mod resolve;
mod resource;

pub use self::auth::DeviceAuthorization;
pub use self::resolve::Search;
pub use self::resource::ResourceClient;

use crate::ClientOptions;
use crate::Session;

/// String to set as the user agent in HTTP request.
static CLIENT_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Async API client to Verify tenants.
///
/// The client holds no credentials: the [`Session`] to act on behalf of
/// is passed to every operation.
pub struct Client {
    /// Low-level [`Client`](reqwest::Client) to perform HTTP requests with.
    client: ReqwestClient,

    /// Logger for request level details.
    logger: Logger,

    /// Options the client was created with.
    options: ClientOptions,
}

impl Client {
    /// Initialise a client with [`ClientOptions`].
    pub fn with<O>(options: O, logger: Logger) -> Result<Client>
    where
        O: Into<ClientOptions>,
    {
        let options = options.into();
        let client = options
            .client(CLIENT_USER_AGENT)
            .build()
            .context("unable to initialise HTTP client")?;
        let client = Client {
            client,
            logger,
            options,
        };
        Ok(client)
    }

    /// Address requests for the given session.
    pub(crate) fn endpoint<'a>(&'a self, session: &'a Session) -> Endpoint<'a> {
        self.options.endpoint(session)
    }

    /// Send a request and wait for the full response.
    pub(crate) async fn send(&self, request: Request) -> Result<Reply> {
        let method = request.method().clone();
        let url = request.url().clone();
        slog::debug!(self.logger, "Sending API request"; "method" => %method, "url" => %url);
        let response = self
            .client
            .execute(request)
            .await
            .with_context(|| format!("unable to send {} request to {}", method, url))?;
        let reply = Reply::read(response).await?;
        slog::debug!(
            self.logger, "Received API response";
            "method" => %method, "url" => %url, "status" => reply.status.as_u16(),
        );
        Ok(reply)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use httpmock::MockServer;
    use slog::Logger;

    use super::Client;
    use crate::ClientOptions;
    use crate::Session;
    use crate::SessionKind;

    /// Client talking plain HTTP to local mock servers.
    pub fn client() -> Client {
        let options = ClientOptions::builder().insecure_http().client();
        let logger = Logger::root(slog::Discard, slog::o!());
        Client::with(options, logger).unwrap()
    }

    /// Session for the tenant emulated by a mock server.
    pub fn session(server: &MockServer) -> Session {
        Session::new(server.address().to_string(), "abc", SessionKind::Client)
    }
}
