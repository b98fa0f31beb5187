//! Obtain sessions from a tenant's OAuth endpoints.
use std::time::Duration;

use anyhow::Context;
use anyhow::Result;
use reqwest::header::ACCEPT;
use reqwest::StatusCode;
use serde::Deserialize;
use tokio::time::Instant;

use super::Client;
use crate::error::LoginExpired;
use crate::error::LoginRejected;
use crate::Session;
use crate::SessionKind;

const TOKEN_PATH: &str = "v1.0/endpoint/default/token";
const DEVICE_AUTHORIZATION_PATH: &str = "v1.0/endpoint/default/device_authorization";
const DEVICE_CODE_GRANT: &str = "urn:ietf:params:oauth:grant-type:device_code";

/// Seconds to wait between polls when the tenant does not say.
const DEFAULT_POLL_INTERVAL: u64 = 5;

/// Seconds added to the poll interval when the tenant asks to slow down.
const SLOW_DOWN_STEP: u64 = 5;

/// Pending device authorization the user must approve.
#[derive(Clone, Debug, Deserialize)]
pub struct DeviceAuthorization {
    pub device_code: String,

    /// Code the user enters on the verification page.
    pub user_code: String,

    /// Page the user approves the login on.
    pub verification_uri: String,

    /// Verification page with the user code already filled in.
    #[serde(default)]
    pub verification_uri_complete: Option<String>,

    /// Seconds until the device code expires.
    pub expires_in: u64,

    /// Minimum seconds between token polls.
    #[serde(default)]
    pub interval: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct OAuthError {
    error: String,

    #[serde(default)]
    error_description: Option<String>,
}

/// Outcome of a single token request.
enum Poll {
    Token(String),
    Pending,
    SlowDown,
}

impl Client {
    /// Log in as an API client with the client credentials grant.
    pub async fn login_client_credentials(
        &self,
        tenant: &str,
        client_id: &str,
        client_secret: &str,
    ) -> Result<Session> {
        let form = [
            ("grant_type", "client_credentials"),
            ("client_id", client_id),
            ("client_secret", client_secret),
        ];
        match self.token(tenant, &form).await? {
            Poll::Token(token) => Ok(Session::new(tenant, token, SessionKind::Client)),
            Poll::Pending | Poll::SlowDown => anyhow::bail!(LoginRejected {
                error: String::from("authorization_pending"),
                description: None,
            }),
        }
    }

    /// Log in as a user with the device authorization grant.
    ///
    /// The `prompt` callback is invoked once with the details the user needs
    /// to approve the login, then the tenant is polled until it issues a token.
    pub async fn login_device<F>(
        &self,
        tenant: &str,
        client_id: &str,
        client_secret: Option<&str>,
        prompt: F,
    ) -> Result<Session>
    where
        F: FnOnce(&DeviceAuthorization),
    {
        let mut form = vec![("client_id", client_id)];
        if let Some(secret) = client_secret {
            form.push(("client_secret", secret));
        }
        let url = self.oauth_url(tenant, DEVICE_AUTHORIZATION_PATH)?;
        let request = self
            .client
            .post(url)
            .header(ACCEPT, "application/json")
            .form(&form)
            .build()?;
        let reply = self.send(request).await?;
        reply.check(StatusCode::OK, "unable to start the device login")?;
        let authorization: DeviceAuthorization = reply.json()?;
        prompt(&authorization);

        let deadline = Instant::now() + Duration::from_secs(authorization.expires_in);
        let mut interval = authorization.interval.unwrap_or(DEFAULT_POLL_INTERVAL);
        form.push(("grant_type", DEVICE_CODE_GRANT));
        form.push(("device_code", authorization.device_code.as_str()));
        loop {
            if Instant::now() >= deadline {
                anyhow::bail!(LoginExpired);
            }
            tokio::time::sleep(Duration::from_secs(interval)).await;
            match self.token(tenant, &form).await? {
                Poll::Token(token) => return Ok(Session::new(tenant, token, SessionKind::User)),
                Poll::Pending => (),
                Poll::SlowDown => {
                    interval += SLOW_DOWN_STEP;
                    slog::debug!(self.logger, "Tenant asked to slow down login polling"; "interval" => interval);
                }
            }
        }
    }

    /// Request a token, decoding OAuth errors the device flow expects.
    async fn token(&self, tenant: &str, form: &[(&str, &str)]) -> Result<Poll> {
        let url = self.oauth_url(tenant, TOKEN_PATH)?;
        let request = self
            .client
            .post(url)
            .header(ACCEPT, "application/json")
            .form(form)
            .build()?;
        let reply = self.send(request).await?;
        if reply.status == StatusCode::OK {
            let token: TokenResponse = reply.json()?;
            return Ok(Poll::Token(token.access_token));
        }

        let error = match reply.status {
            StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED => {
                serde_json::from_str::<OAuthError>(&reply.body).ok()
            }
            _ => None,
        };
        match error {
            Some(error) if error.error == "authorization_pending" => Ok(Poll::Pending),
            Some(error) if error.error == "slow_down" => Ok(Poll::SlowDown),
            Some(error) => anyhow::bail!(LoginRejected {
                error: error.error,
                description: error.error_description,
            }),
            None => Err(reply.error("unable to obtain a token").into()),
        }
    }

    fn oauth_url(&self, tenant: &str, path: &str) -> Result<reqwest::Url> {
        let url = format!("{}://{}/{}", self.options.scheme, tenant, path);
        reqwest::Url::parse(&url).with_context(|| format!("unable to address tenant '{}'", tenant))
    }
}
