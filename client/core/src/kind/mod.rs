//! Resource kinds managed on a tenant and the shapes exchanged for them.
use std::fmt;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value as Json;

use verifyctl_client_utils::MalformedResponse;

mod api_client;
mod identity_source;

pub use self::api_client::ApiClient;
pub use self::api_client::ApiClientDocument;
pub use self::api_client::OverrideSettings;
pub use self::api_client::Scope;
pub use self::identity_source::AttributeMapping;
pub use self::identity_source::IdentitySource;
pub use self::identity_source::IdentitySourceDocument;
pub use self::identity_source::PostEval;
pub use self::identity_source::SourceProperty;

use crate::error::ValidationError;

/// Prefix of the `kind` attribute in resource envelopes.
pub const RESOURCE_KIND_PREFIX: &str = "IBMVerify";

/// Version of the resource envelope format.
pub const RESOURCE_API_VERSION: &str = "1.0";

/// Describe how a kind of resource is stored and addressed on a tenant.
pub trait ResourceKind {
    /// Document describing a resource of this kind.
    type Document: Clone + fmt::Debug + PartialEq + Serialize + DeserializeOwned + Send + Sync;

    /// Name of the kind, as used on the command line and in messages.
    const KIND: &'static str;

    /// Name of the kind in resource envelopes, without the [`RESOURCE_KIND_PREFIX`].
    const ENVELOPE_KIND: &'static str;

    /// Path of the collection, relative to the tenant.
    const COLLECTION_PATH: &'static str;

    /// Field the collection can be searched on to resolve names.
    const SEARCH_FIELD: &'static str;

    /// Field of search responses holding the list of matches.
    const COLLECTION_FIELD: &'static str;

    /// Entitlements an API client needs to manage resources of this kind.
    const ENTITLEMENTS: &'static [&'static str];

    /// Human facing name of the resource described by a document.
    fn name(document: &Self::Document) -> &str;

    /// Check the document has all required fields.
    fn validate(document: &Self::Document) -> Result<(), ValidationError>;

    /// Example document for users to start from.
    fn boilerplate() -> Self::Document;
}

/// Select a single resource by name or by identifier.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Lookup {
    /// Service assigned identifier.
    Id(String),

    /// Human facing name, resolved to an identifier first.
    Name(String),
}

impl fmt::Display for Lookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lookup::Id(id) => write!(f, "{}", id),
            Lookup::Name(name) => write!(f, "{}", name),
        }
    }
}

/// Confirmation returned when a resource is created.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Created {
    /// Identifier assigned by the tenant, from the response body or `Location` header.
    pub id: Option<String>,

    /// Location of the new resource, when reported.
    pub location: Option<String>,

    /// Fallback confirmation when the tenant reports nothing.
    pub message: String,
}

impl fmt::Display for Created {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.id {
            Some(id) => write!(f, "{}", id),
            None => write!(f, "{}", self.message),
        }
    }
}

/// Data fetched from the tenant along with the URL it was fetched from.
#[derive(Clone, Debug, PartialEq)]
pub struct Fetched<T> {
    /// The fetched data.
    pub data: T,

    /// URL of the request that returned the data.
    pub url: String,
}

/// Page of resources returned by a listing.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ResourceList<D> {
    /// Total number of resources matching the listing, across all pages.
    pub total: u64,

    /// Resources on this page.
    pub items: Vec<D>,
}

impl<D> ResourceList<D>
where
    D: DeserializeOwned,
{
    /// Decode a listing response holding items in the given field.
    pub fn from_response(mut response: Json, field: &str) -> Result<Self, MalformedResponse> {
        let items = match response.get_mut(field).map(Json::take) {
            Some(items @ Json::Array(_)) => items,
            Some(_) => {
                let reason = format!("field '{}' of the listing is not a list", field);
                return Err(MalformedResponse::new(reason));
            }
            None => {
                let reason = format!("listing response has no '{}' field", field);
                return Err(MalformedResponse::new(reason));
            }
        };
        let items: Vec<D> = serde_json::from_value(items).map_err(|error| {
            MalformedResponse::new(format!("unable to decode listed items: {}", error))
        })?;
        let total = response
            .get("total")
            .and_then(Json::as_u64)
            .unwrap_or(items.len() as u64);
        Ok(ResourceList { total, items })
    }
}

/// Envelope around resource documents in files and boilerplate output.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceObject<D> {
    pub kind: String,
    pub api_version: String,
    pub data: D,
}

impl<D> ResourceObject<D> {
    /// Wrap a document for the given resource kind.
    pub fn wrap<K>(data: D) -> ResourceObject<D>
    where
        K: ResourceKind<Document = D>,
    {
        ResourceObject {
            kind: envelope_kind::<K>(),
            api_version: RESOURCE_API_VERSION.to_string(),
            data,
        }
    }
}

/// Full `kind` attribute of envelopes for the given resource kind.
pub fn envelope_kind<K: ResourceKind>() -> String {
    format!("{}{}", RESOURCE_KIND_PREFIX, K::ENVELOPE_KIND)
}
