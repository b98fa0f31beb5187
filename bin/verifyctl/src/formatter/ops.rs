//! Operations offered by a `verifyctl` formatter interface.
use serde_json::Value as Json;

use self::sealed::SealFormatOp;

/// Internal trait to support ergonomic formatting operations.
pub trait FormatOp: Into<Ops> + SealFormatOp {
    /// Type returned by the matching format operation.
    type Response: From<Responses>;
}

/// All known operations that must be implemented by formatters.
pub enum Ops {
    /// Format a resource document, or a listing of documents.
    Document(Json),

    /// Request a formatter to emit tenant session lists.
    TenantList,
}

/// All known responses from format operations.
pub enum Responses {
    /// The formatting operation was successful.
    Success,

    /// Return a object to format a list of tenant sessions.
    TenantList(Box<dyn super::TenantList>),
}

impl<L> From<L> for Responses
where
    L: super::TenantList + 'static,
{
    fn from(value: L) -> Self {
        Self::TenantList(Box::new(value))
    }
}

// --- Operation & return types -- //
/// Format a resource document, or anything else serialisable, for the user.
pub struct DocumentOp(pub Json);

impl DocumentOp {
    /// Prepare any serialisable value for formatting.
    pub fn of<T: serde::Serialize>(value: &T) -> anyhow::Result<DocumentOp> {
        Ok(DocumentOp(serde_json::to_value(value)?))
    }
}

/// Request a formatter to emit tenant session lists.
pub struct TenantListOp;

/// Private module to seal implementation details.
mod sealed {
    /// Super-trait to seal the [`FormatOp`](super::FormatOp) trait.
    pub trait SealFormatOp {}
}

// --- Implement FormatOp and other traits on types for transparent operations --- //
impl SealFormatOp for DocumentOp {}
impl From<DocumentOp> for Ops {
    fn from(value: DocumentOp) -> Self {
        Self::Document(value.0)
    }
}
impl FormatOp for DocumentOp {
    type Response = ();
}

impl SealFormatOp for TenantListOp {}
impl From<TenantListOp> for Ops {
    fn from(_: TenantListOp) -> Self {
        Self::TenantList
    }
}
impl FormatOp for TenantListOp {
    type Response = Box<dyn super::TenantList>;
}

// --- Implement Responses conversions on return types for transparent operations --- //
impl From<Responses> for Box<dyn super::TenantList> {
    fn from(value: Responses) -> Self {
        match value {
            Responses::TenantList(value) => value,
            _ => panic!("unexpected response type for formatter operation"),
        }
    }
}
impl From<Responses> for () {
    fn from(value: Responses) -> Self {
        match value {
            Responses::Success => (),
            _ => panic!("unexpected response type for formatter operation"),
        }
    }
}
