//! Errors `verifyctl` reports with extra hints for users.
pub use crate::session::NoActiveSession;
pub use verifyctl_client::AmbiguousName;
pub use verifyctl_client::ClassifiedError;
pub use verifyctl_client::LoginExpired;
pub use verifyctl_client::LoginRejected;
pub use verifyctl_client::ValidationError;

/// A resource document does not describe the kind of resource expected.
#[derive(thiserror::Error, Debug)]
#[error("the document describes a '{found}' resource but a '{expected}' was expected")]
pub struct KindMismatch {
    pub expected: String,
    pub found: String,
}
