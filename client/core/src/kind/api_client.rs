//! API clients: credentials applications use to call the tenant's APIs.
use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value as Json;

use super::ResourceKind;
use crate::error::ValidationError;

/// Marker for API client resources.
#[derive(Clone, Copy, Debug)]
pub enum ApiClient {}

/// Document describing an API client.
///
/// Attributes the client does not model are kept in `attributes`
/// so documents fetched from the tenant can be sent back unchanged.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiClientDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default)]
    pub client_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    /// Permissions granted to tokens issued to the client.
    #[serde(default)]
    pub entitlements: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_filter_op: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ip_filters: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jwk_uri: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub override_settings: Option<OverrideSettings>,

    #[serde(default, flatten)]
    pub attributes: BTreeMap<String, Json>,
}

/// Restrict the scopes tokens for the client can be issued with.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverrideSettings {
    #[serde(default)]
    pub restrict_scopes: bool,

    #[serde(default)]
    pub scopes: Vec<Scope>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Scope {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ResourceKind for ApiClient {
    type Document = ApiClientDocument;

    const KIND: &'static str = "apiclient";
    const ENVELOPE_KIND: &'static str = "ApiClient";
    const COLLECTION_PATH: &'static str = "v1.0/apiclients";
    const SEARCH_FIELD: &'static str = "clientName";
    const COLLECTION_FIELD: &'static str = "apiClients";
    const ENTITLEMENTS: &'static [&'static str] = &["Manage API Clients"];

    fn name(document: &ApiClientDocument) -> &str {
        &document.client_name
    }

    fn validate(document: &ApiClientDocument) -> Result<(), ValidationError> {
        let mut violations = Vec::new();
        if document.client_name.trim().is_empty() {
            violations.push(String::from("clientName is required"));
        }
        if document.entitlements.is_empty() {
            violations.push(String::from("entitlements must list at least one entitlement"));
        }
        ValidationError::check(Self::KIND, violations)
    }

    fn boilerplate() -> ApiClientDocument {
        ApiClientDocument {
            client_name: String::from("my-api-client"),
            description: Some(String::new()),
            enabled: Some(true),
            entitlements: vec![String::from("readUsers")],
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::ApiClient;
    use super::ApiClientDocument;
    use crate::kind::ResourceKind;

    #[test]
    fn bare_document_encodes_as_given() {
        let document: ApiClientDocument =
            serde_json::from_value(json!({"clientName": "app1", "entitlements": ["read"]})).unwrap();
        let encoded = serde_json::to_value(&document).unwrap();
        assert_eq!(encoded, json!({"clientName": "app1", "entitlements": ["read"]}));
    }

    #[test]
    fn unknown_attributes_are_kept() {
        let source = json!({
            "id": "42",
            "clientName": "app1",
            "entitlements": ["read"],
            "clientSecret": "hidden",
        });
        let document: ApiClientDocument = serde_json::from_value(source.clone()).unwrap();
        assert_eq!(document.attributes["clientSecret"], "hidden");
        assert_eq!(serde_json::to_value(&document).unwrap(), source);
    }

    #[test]
    fn validate_requires_name_and_entitlements() {
        let error = ApiClient::validate(&ApiClientDocument::default()).unwrap_err();
        assert_eq!(error.violations.len(), 2);
        assert!(ApiClient::validate(&ApiClient::boilerplate()).is_ok());
    }
}
