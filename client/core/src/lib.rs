//! Async client library to manage resources on Verify tenants.
//!
//! Every operation receives the [`Session`] it acts on behalf of.
//! Resource kinds supported by the client implement [`ResourceKind`].
pub use verifyctl_client_utils::ClassifiedError;
pub use verifyctl_client_utils::ClientOptions;
pub use verifyctl_client_utils::InvalidIdentifier;
pub use verifyctl_client_utils::MalformedResponse;
pub use verifyctl_client_utils::Session;
pub use verifyctl_client_utils::SessionKind;

mod client;
mod error;
pub mod kind;

pub use self::client::DeviceAuthorization;
pub use self::client::ResourceClient;
pub use self::client::Search;
pub use self::client::Client;
pub use self::error::AmbiguousName;
pub use self::error::LoginExpired;
pub use self::error::LoginRejected;
pub use self::error::ValidationError;
pub use self::kind::Created;
pub use self::kind::Fetched;
pub use self::kind::Lookup;
pub use self::kind::ResourceKind;
pub use self::kind::ResourceList;
