//! Utilities shared by the verifyctl API clients.
//!
//! Requests are built from a [`Session`] without performing any I/O and
//! responses are collected into a [`Reply`] that classifies unexpected status codes.
mod config;
mod error;
mod request;
mod response;
mod session;

pub use self::config::ClientOptions;
pub use self::config::ClientOptionsBuilder;
pub use self::error::classify;
pub use self::error::ClassifiedError;
pub use self::error::EncodingError;
pub use self::error::InvalidIdentifier;
pub use self::error::MalformedResponse;
pub use self::error::ResourceIdentifier;
pub use self::request::Endpoint;
pub use self::response::Reply;
pub use self::session::Session;
pub use self::session::SessionKind;
