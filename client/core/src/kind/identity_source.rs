//! Identity sources: directories and providers users authenticate against.
use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value as Json;

use super::ResourceKind;
use crate::error::ValidationError;

/// Marker for identity source resources.
#[derive(Clone, Copy, Debug)]
pub enum IdentitySource {}

/// Document describing an identity source.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentitySourceDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_type_id: Option<u32>,

    #[serde(default)]
    pub instance_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub predefined: Option<bool>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<SourceProperty>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attribute_mappings: Vec<AttributeMapping>,

    #[serde(default, flatten)]
    pub attributes: BTreeMap<String, Json>,
}

/// Configuration property of an identity source.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceProperty {
    pub key: String,

    #[serde(default)]
    pub value: String,

    /// Sensitive values are never returned by the tenant.
    #[serde(default)]
    pub sensitive: bool,
}

/// Map an attribute of the source onto a tenant attribute.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeMapping {
    pub attr_id: String,

    #[serde(default)]
    pub jitp_option: String,

    #[serde(default)]
    pub ids_attr_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_eval: Option<PostEval>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PostEval {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom: Option<String>,
}

impl ResourceKind for IdentitySource {
    type Document = IdentitySourceDocument;

    const KIND: &'static str = "identitysource";
    const ENVELOPE_KIND: &'static str = "IdentitySource";
    const COLLECTION_PATH: &'static str = "v2.0/identitysources";
    const SEARCH_FIELD: &'static str = "instanceName";
    const COLLECTION_FIELD: &'static str = "identitySources";
    const ENTITLEMENTS: &'static [&'static str] = &["Manage identity sources"];

    fn name(document: &IdentitySourceDocument) -> &str {
        &document.instance_name
    }

    fn validate(document: &IdentitySourceDocument) -> Result<(), ValidationError> {
        let mut violations = Vec::new();
        if document.instance_name.trim().is_empty() {
            violations.push(String::from("instanceName is required"));
        }
        ValidationError::check(Self::KIND, violations)
    }

    fn boilerplate() -> IdentitySourceDocument {
        IdentitySourceDocument {
            source_type_id: Some(1),
            instance_name: String::from("my-identity-source"),
            enabled: Some(true),
            properties: vec![SourceProperty {
                key: String::from("realm"),
                value: String::from("example.com"),
                sensitive: false,
            }],
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::IdentitySource;
    use super::IdentitySourceDocument;
    use crate::kind::ResourceKind;

    #[test]
    fn decode_from_tenant() {
        let document: IdentitySourceDocument = serde_json::from_value(json!({
            "id": "abc",
            "sourceTypeId": 2,
            "instanceName": "corp-ldap",
            "enabled": true,
            "properties": [{"key": "host", "value": "ldap.example.com", "sensitive": false}],
            "attributeMappings": [{"attrId": "1", "jitpOption": "", "idsAttrName": "uid"}],
        }))
        .unwrap();
        assert_eq!(IdentitySource::name(&document), "corp-ldap");
        assert_eq!(document.properties[0].key, "host");
        assert_eq!(document.attribute_mappings[0].ids_attr_name, "uid");
        assert!(document.attributes.is_empty());
    }

    #[test]
    fn validate_requires_instance_name() {
        let error = IdentitySource::validate(&IdentitySourceDocument::default()).unwrap_err();
        assert_eq!(error.violations, vec![String::from("instanceName is required")]);
        assert!(IdentitySource::validate(&IdentitySource::boilerplate()).is_ok());
    }
}
