//! Logic to load resource documents from files or standard input.
use anyhow::Context;
use anyhow::Result;
use serde_json::Value as Json;
use tokio::io::AsyncReadExt;

use verifyctl_client::kind::envelope_kind;
use verifyctl_client::ResourceKind;

use crate::errors::KindMismatch;

/// Load a YAML or JSON document for resource kind `K` from a file, or `-` for standard input.
pub async fn document<K: ResourceKind>(source: &str) -> Result<K::Document> {
    let payload = read(source).await?;
    decode::<K>(&payload).with_context(|| format!("unable to decode {} from '{source}'", K::KIND))
}

/// Read the entire source into memory.
async fn read(source: &str) -> Result<Vec<u8>> {
    let err_msg = format!("unable to read '{source}'");
    match source {
        // If the source is - read standard input till the end.
        "-" => {
            let mut data = Vec::new();
            tokio::io::stdin()
                .read_to_end(&mut data)
                .await
                .context(err_msg)?;
            Ok(data)
        }
        // Otherwise read the entire file.
        source => tokio::fs::read(source).await.context(err_msg),
    }
}

/// Decode a document, unwrapping it from a resource envelope if needed.
fn decode<K: ResourceKind>(payload: &[u8]) -> Result<K::Document> {
    let document: Json = serde_yaml::from_slice(payload)?;
    let document = unwrap_envelope::<K>(document)?;
    let document = serde_json::from_value(document)?;
    Ok(document)
}

fn unwrap_envelope<K: ResourceKind>(mut document: Json) -> Result<Json> {
    let enveloped = document.get("apiVersion").is_some() && document.get("data").is_some();
    if !enveloped {
        return Ok(document);
    }
    let expected = envelope_kind::<K>();
    match document.get("kind").and_then(Json::as_str) {
        Some(kind) if kind == expected => (),
        found => anyhow::bail!(KindMismatch {
            expected,
            found: found.unwrap_or_default().to_string(),
        }),
    }
    Ok(document.get_mut("data").map(Json::take).unwrap_or(Json::Null))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use verifyctl_client::kind::ApiClient;
    use verifyctl_client::kind::IdentitySource;

    use super::decode;
    use super::document;
    use crate::errors::KindMismatch;

    #[test]
    fn bare_yaml_document() {
        let payload = b"clientName: app1\nentitlements:\n  - read\n";
        let document = decode::<ApiClient>(payload).unwrap();
        assert_eq!(document.client_name, "app1");
        assert_eq!(document.entitlements, vec![String::from("read")]);
    }

    #[test]
    fn bare_json_document() {
        let payload = br#"{"instanceName": "corp-ldap", "sourceTypeId": 2}"#;
        let document = decode::<IdentitySource>(payload).unwrap();
        assert_eq!(document.instance_name, "corp-ldap");
        assert_eq!(document.source_type_id, Some(2));
    }

    #[test]
    fn enveloped_document() {
        let payload = concat!(
            "kind: IBMVerifyApiClient\n",
            "apiVersion: \"1.0\"\n",
            "data:\n",
            "  clientName: app1\n",
            "  entitlements: [read]\n",
        );
        let document = decode::<ApiClient>(payload.as_bytes()).unwrap();
        assert_eq!(document.client_name, "app1");
    }

    #[test]
    fn enveloped_document_of_another_kind() {
        let payload = concat!(
            "kind: IBMVerifyIdentitySource\n",
            "apiVersion: \"1.0\"\n",
            "data:\n",
            "  instanceName: corp-ldap\n",
        );
        let error = decode::<ApiClient>(payload.as_bytes()).unwrap_err();
        let error = error.downcast_ref::<KindMismatch>().unwrap();
        assert_eq!(error.expected, "IBMVerifyApiClient");
        assert_eq!(error.found, "IBMVerifyIdentitySource");
    }

    #[tokio::test]
    async fn document_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"clientName: app1\nentitlements: [read]\n")
            .unwrap();
        let path = file.path().to_str().unwrap().to_string();
        let document = document::<ApiClient>(&path).await.unwrap();
        assert_eq!(document.client_name, "app1");
    }

    #[tokio::test]
    async fn document_from_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.yaml");
        let error = document::<ApiClient>(path.to_str().unwrap())
            .await
            .unwrap_err();
        assert!(error.to_string().starts_with("unable to read"));
    }
}
