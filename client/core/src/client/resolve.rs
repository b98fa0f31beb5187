//! Resolve human facing resource names into service assigned identifiers.
use anyhow::Result;
use reqwest::Method;
use reqwest::StatusCode;
use serde_json::Value as Json;

use verifyctl_client_utils::MalformedResponse;

use super::Client;
use crate::error::AmbiguousName;
use crate::kind::ResourceKind;
use crate::ClassifiedError;
use crate::Session;

/// Where and how to search a collection for resources by name.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Search<'a> {
    /// Kind of resource searched, for error messages.
    pub kind: &'a str,

    /// Path of the collection to search.
    pub collection_path: &'a str,

    /// Field the name is matched against.
    pub filter_field: &'a str,

    /// Field of the response listing the matches.
    pub collection_field: &'a str,
}

impl Search<'static> {
    /// Search parameters for a resource kind.
    pub fn of<K: ResourceKind>() -> Search<'static> {
        Search {
            kind: K::KIND,
            collection_path: K::COLLECTION_PATH,
            filter_field: K::SEARCH_FIELD,
            collection_field: K::COLLECTION_FIELD,
        }
    }
}

impl<'a> Search<'a> {
    /// Filter expression matching resources with the given name.
    pub fn filter(&self, name: &str) -> String {
        let mut escaped = String::with_capacity(name.len());
        for c in name.chars() {
            if c == '"' || c == '\\' {
                escaped.push('\\');
            }
            escaped.push(c);
        }
        format!("{} = \"{}\"", self.filter_field, escaped)
    }
}

impl Client {
    /// Find the identifier of the only resource with the given name.
    pub async fn resolve_id(&self, session: &Session, search: &Search<'_>, name: &str) -> Result<String> {
        let filter = search.filter(name);
        let request = self.endpoint(session).request::<()>(
            Method::GET,
            search.collection_path,
            &[("search", filter.as_str())],
            None,
        )?;
        let reply = self.send(request).await?;
        let message = format!("unable to look up {} '{}'", search.kind, name);
        reply.check(StatusCode::OK, &message)?;

        let mut response: Json = reply.json()?;
        let matches = match response.get_mut(search.collection_field).map(Json::take) {
            Some(Json::Array(matches)) => matches,
            _ => {
                let reason = format!(
                    "search response has no '{}' list",
                    search.collection_field
                );
                anyhow::bail!(MalformedResponse::new(reason));
            }
        };

        match matches.as_slice() {
            [] => anyhow::bail!(ClassifiedError::not_found(name)),
            [found] => match found.get("id").and_then(Json::as_str) {
                Some(id) if !id.is_empty() => Ok(id.to_string()),
                _ => {
                    let reason = format!("{} '{}' has no usable id", search.kind, name);
                    anyhow::bail!(MalformedResponse::new(reason));
                }
            },
            matches => anyhow::bail!(AmbiguousName {
                kind: search.kind.to_string(),
                name: name.to_string(),
                matches: matches.len(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use httpmock::Method::GET;
    use httpmock::MockServer;
    use serde_json::json;

    use super::Search;
    use crate::client::tests::client;
    use crate::client::tests::session;
    use crate::error::AmbiguousName;
    use crate::kind::ApiClient;
    use crate::ClassifiedError;
    use crate::MalformedResponse;

    #[test]
    fn filter_escapes_quotes() {
        let search = Search::of::<ApiClient>();
        assert_eq!(search.filter("app1"), r#"clientName = "app1""#);
        assert_eq!(search.filter(r#"a"b\c"#), r#"clientName = "a\"b\\c""#);
    }

    #[tokio::test]
    async fn single_match() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/v1.0/apiclients")
                .query_param("search", r#"clientName = "app1""#)
                .header("authorization", "Bearer abc");
            then.status(200)
                .json_body(json!({"apiClients": [{"id": "42", "clientName": "app1"}]}));
        });
        let id = client()
            .resolve_id(&session(&server), &Search::of::<ApiClient>(), "app1")
            .await
            .unwrap();
        mock.assert();
        assert_eq!(id, "42");
    }

    #[tokio::test]
    async fn no_match() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/v1.0/apiclients");
            then.status(200).json_body(json!({"apiClients": []}));
        });
        let error = client()
            .resolve_id(&session(&server), &Search::of::<ApiClient>(), "app1")
            .await
            .unwrap_err();
        assert_eq!(
            error.downcast_ref::<ClassifiedError>(),
            Some(&ClassifiedError::not_found("app1")),
        );
    }

    #[tokio::test]
    async fn many_matches() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/v1.0/apiclients");
            then.status(200)
                .json_body(json!({"apiClients": [{"id": "1"}, {"id": "2"}]}));
        });
        let error = client()
            .resolve_id(&session(&server), &Search::of::<ApiClient>(), "app1")
            .await
            .unwrap_err();
        let error = error.downcast_ref::<AmbiguousName>().unwrap();
        assert_eq!(error.matches, 2);
        assert_eq!(error.name, "app1");
    }

    #[tokio::test]
    async fn missing_collection_field() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/v1.0/apiclients");
            then.status(200).json_body(json!({"total": 0}));
        });
        let error = client()
            .resolve_id(&session(&server), &Search::of::<ApiClient>(), "app1")
            .await
            .unwrap_err();
        assert!(error.is::<MalformedResponse>());
    }

    #[tokio::test]
    async fn match_without_id() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/v1.0/apiclients");
            then.status(200)
                .json_body(json!({"apiClients": [{"id": 42}]}));
        });
        let error = client()
            .resolve_id(&session(&server), &Search::of::<ApiClient>(), "app1")
            .await
            .unwrap_err();
        assert!(error.is::<MalformedResponse>());
    }

    #[tokio::test]
    async fn match_with_empty_id() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/v1.0/apiclients");
            then.status(200).json_body(json!({"apiClients": [{"id": ""}]}));
        });
        let error = client()
            .resolve_id(&session(&server), &Search::of::<ApiClient>(), "app1")
            .await
            .unwrap_err();
        assert!(error.is::<MalformedResponse>());
    }

    #[tokio::test]
    async fn search_failure_is_classified() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/v1.0/apiclients");
            then.status(401);
        });
        let error = client()
            .resolve_id(&session(&server), &Search::of::<ApiClient>(), "app1")
            .await
            .unwrap_err();
        assert_eq!(
            error.downcast_ref::<ClassifiedError>(),
            Some(&ClassifiedError::Unauthenticated),
        );
    }
}
