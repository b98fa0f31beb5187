//! Collect responses from the tenant and check them against expectations.
use anyhow::Context;
use anyhow::Result;
use reqwest::header::LOCATION;
use reqwest::Response;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use crate::error::classify;
use crate::error::ClassifiedError;
use crate::error::MalformedResponse;

/// Fully received response from the tenant.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Reply {
    /// Status code of the response.
    pub status: StatusCode,

    /// URL of the request the response is for.
    pub url: String,

    /// Value of the `Location` header, if set.
    pub location: Option<String>,

    /// Raw response body.
    pub body: String,
}

impl Reply {
    /// Read the full response into a [`Reply`].
    pub async fn read(response: Response) -> Result<Reply> {
        let status = response.status();
        let url = response.url().to_string();
        let location = response
            .headers()
            .get(LOCATION)
            .and_then(|location| location.to_str().ok())
            .map(String::from);
        let body = response
            .text()
            .await
            .with_context(|| format!("unable to read response from {}", url))?;
        Ok(Reply {
            status,
            url,
            location,
            body,
        })
    }

    /// Ensure the response has the expected status, classifying it as an error otherwise.
    pub fn check(&self, expected: StatusCode, default_message: &str) -> Result<(), ClassifiedError> {
        if self.status == expected {
            return Ok(());
        }
        Err(self.error(default_message))
    }

    /// Classify the response as an error, whatever its status.
    ///
    /// Success statuses are reported as [`ClassifiedError::Unclassified`].
    pub fn error(&self, default_message: &str) -> ClassifiedError {
        classify(self.status, &self.body, default_message).unwrap_or_else(|| {
            ClassifiedError::Unclassified {
                status: self.status.as_u16(),
                body: self.body.clone(),
            }
        })
    }

    /// Decode the response body as JSON.
    pub fn json<T>(&self) -> Result<T>
    where
        T: DeserializeOwned,
    {
        serde_json::from_str(&self.body).map_err(|error| {
            let malformed = MalformedResponse::new(format!("invalid JSON body from {}", self.url));
            anyhow::anyhow!(error).context(malformed)
        })
    }
}
