//! Errors encountered during API requests or reported by the tenant.
use std::fmt;

use reqwest::StatusCode;
use serde::Deserialize;

/// Failure reported by the tenant, mapped from an unexpected status code.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum ClassifiedError {
    /// The session is missing, invalid or expired.
    Unauthenticated,

    /// The session is valid but lacks the entitlements for the request.
    Forbidden,

    /// The requested resource does not exist.
    NotFound {
        /// Name or identifier of the missing resource, when known.
        resource: Option<String>,
    },

    /// The tenant rejected the request as invalid.
    BadRequest {
        /// Message reported by the tenant, or a default for the operation.
        detail: String,

        /// Message identifier reported by the tenant, when one was decoded.
        message_id: Option<String>,
    },

    /// Any other status code that was not expected.
    Unclassified {
        /// Status code returned by the tenant.
        status: u16,

        /// Raw response body.
        body: String,
    },
}

impl ClassifiedError {
    /// A named resource was not found.
    pub fn not_found<S: Into<String>>(resource: S) -> ClassifiedError {
        ClassifiedError::NotFound {
            resource: Some(resource.into()),
        }
    }
}

impl fmt::Display for ClassifiedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClassifiedError::Unauthenticated => write!(
                f,
                "login again: the session is not valid or has expired"
            ),
            ClassifiedError::Forbidden => write!(
                f,
                "you are not allowed to make this request: check the entitlements granted to you"
            ),
            ClassifiedError::NotFound { resource: None } => write!(f, "resource not found"),
            ClassifiedError::NotFound {
                resource: Some(resource),
            } => write!(f, "resource '{}' not found", resource),
            ClassifiedError::BadRequest {
                detail,
                message_id: None,
            } => write!(f, "{}", detail),
            ClassifiedError::BadRequest {
                detail,
                message_id: Some(id),
            } => write!(f, "{} {}", id, detail),
            ClassifiedError::Unclassified { status, body } => write!(
                f,
                "unexpected response from the tenant; code={}, body={}",
                status, body,
            ),
        }
    }
}

/// Structured error message returned by the tenant with 400 responses.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ServiceMessage {
    message_id: String,
    message_description: String,
}

/// Map an HTTP status to a [`ClassifiedError`], or `None` for success statuses.
///
/// The `default_message` is used when a 400 response carries no structured message.
pub fn classify(status: StatusCode, body: &str, default_message: &str) -> Option<ClassifiedError> {
    if status.is_success() {
        return None;
    }
    let error = match status {
        StatusCode::UNAUTHORIZED => ClassifiedError::Unauthenticated,
        StatusCode::FORBIDDEN => ClassifiedError::Forbidden,
        StatusCode::NOT_FOUND => ClassifiedError::NotFound { resource: None },
        StatusCode::BAD_REQUEST => match serde_json::from_str::<ServiceMessage>(body) {
            Ok(message) => ClassifiedError::BadRequest {
                detail: message.message_description,
                message_id: Some(message.message_id),
            },
            Err(_) => ClassifiedError::BadRequest {
                detail: default_message.to_string(),
                message_id: None,
            },
        },
        status => ClassifiedError::Unclassified {
            status: status.as_u16(),
            body: body.to_string(),
        },
    };
    Some(error)
}

/// The request body could not be encoded as JSON.
#[derive(Debug, thiserror::Error)]
#[error("unable to encode the request body as JSON")]
pub struct EncodingError(#[source] pub serde_json::Error);

/// A resource identifier cannot address a single item of a collection.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("'{id}' is not a valid resource identifier")]
pub struct InvalidIdentifier {
    /// The rejected identifier.
    pub id: String,
}

/// A successful response did not have the expected shape.
#[derive(Debug, thiserror::Error)]
#[error("malformed response from the tenant: {reason}")]
pub struct MalformedResponse {
    /// What was wrong with the response.
    pub reason: String,
}

impl MalformedResponse {
    pub fn new<S: Into<String>>(reason: S) -> MalformedResponse {
        MalformedResponse {
            reason: reason.into(),
        }
    }
}

/// Error refers to resource with ID.
#[derive(Debug, thiserror::Error)]
#[error("error refers to {resource} '{id}'")]
pub struct ResourceIdentifier {
    /// Identifier of a resource the error refers to.
    pub id: String,

    /// Type of resource the error refers to.
    pub resource: String,
}

impl ResourceIdentifier {
    /// Resource identifier context for the given resource type and id.
    pub fn reference<S1, S2>(resource: S1, id: S2) -> Self
    where
        S1: Into<String>,
        S2: Into<String>,
    {
        ResourceIdentifier {
            id: id.into(),
            resource: resource.into(),
        }
    }
}
