//! Build authenticated requests addressed to a tenant.
use anyhow::Context;
use anyhow::Result;
use reqwest::header::HeaderMap;
use reqwest::header::HeaderValue;
use reqwest::header::ACCEPT;
use reqwest::header::AUTHORIZATION;
use reqwest::header::CONTENT_TYPE;
use reqwest::Method;
use reqwest::Request;
use reqwest::Url;
use serde::Serialize;

use crate::error::EncodingError;
use crate::error::InvalidIdentifier;
use crate::session::Session;

const APPLICATION_JSON: &str = "application/json";

/// Address requests on behalf of a [`Session`].
///
/// Building requests performs no I/O and the same inputs always produce the same request.
#[derive(Clone, Copy, Debug)]
pub struct Endpoint<'a> {
    scheme: &'a str,
    session: &'a Session,
}

impl<'a> Endpoint<'a> {
    /// Address HTTPS requests to the session's tenant.
    pub fn new(session: &'a Session) -> Endpoint<'a> {
        Endpoint {
            scheme: "https",
            session,
        }
    }

    /// Change the URL scheme requests are made with.
    pub fn scheme(mut self, scheme: &'a str) -> Self {
        self.scheme = scheme;
        self
    }

    /// Session requests are authenticated with.
    pub fn session(&self) -> &Session {
        self.session
    }

    /// URL for a path relative to the tenant, with query parameters encoded.
    pub fn url(&self, path: &str, query: &[(&str, &str)]) -> Result<Url> {
        let path = path.trim_start_matches('/');
        let url = format!("{}://{}/{}", self.scheme, self.session.tenant, path);
        let mut url = Url::parse(&url)
            .with_context(|| format!("unable to address tenant '{}'", self.session.tenant))?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    /// URL of a single item in a collection.
    ///
    /// The identifier is always encoded as exactly one path segment.
    pub fn item_url(&self, collection: &str, id: &str) -> Result<Url> {
        if matches!(id, "" | "." | "..") {
            anyhow::bail!(InvalidIdentifier { id: id.to_string() });
        }
        let mut url = self.url(collection, &[])?;
        let tenant = &self.session.tenant;
        url.path_segments_mut()
            .map_err(|_| anyhow::anyhow!("tenant '{}' cannot be addressed by path", tenant))?
            .pop_if_empty()
            .push(id);
        Ok(url)
    }

    /// Build an authenticated request, encoding the optional body as JSON.
    pub fn request<B>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        body: Option<&B>,
    ) -> Result<Request>
    where
        B: Serialize + ?Sized,
    {
        let url = self.url(path, query)?;
        self.build(method, url, body)
    }

    /// Build an authenticated request for a single item of a collection.
    pub fn item_request<B>(
        &self,
        method: Method,
        collection: &str,
        id: &str,
        body: Option<&B>,
    ) -> Result<Request>
    where
        B: Serialize + ?Sized,
    {
        let url = self.item_url(collection, id)?;
        self.build(method, url, body)
    }

    fn build<B>(&self, method: Method, url: Url, body: Option<&B>) -> Result<Request>
    where
        B: Serialize + ?Sized,
    {
        let mut headers = HeaderMap::new();
        let mut token = HeaderValue::from_str(&format!("Bearer {}", self.session.token))
            .context("session token is not a valid header value")?;
        token.set_sensitive(true);
        headers.insert(AUTHORIZATION, token);
        headers.insert(ACCEPT, HeaderValue::from_static(APPLICATION_JSON));

        let body = match body {
            None => None,
            Some(body) => {
                let body = serde_json::to_vec(body).map_err(EncodingError)?;
                headers.insert(CONTENT_TYPE, HeaderValue::from_static(APPLICATION_JSON));
                Some(body)
            }
        };

        let mut request = Request::new(method, url);
        *request.headers_mut() = headers;
        if let Some(body) = body {
            *request.body_mut() = Some(body.into());
        }
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use reqwest::Method;
    use serde::ser::Error as _;
    use serde::Serialize;
    use serde::Serializer;
    use serde_json::json;

    use super::Endpoint;
    use crate::error::EncodingError;
    use crate::error::InvalidIdentifier;
    use crate::session::Session;
    use crate::session::SessionKind;

    fn session() -> Session {
        Session::new("t.example.com", "abc", SessionKind::Client)
    }

    #[test]
    fn get_without_body() {
        let session = session();
        let request = Endpoint::new(&session)
            .request::<()>(Method::GET, "v1.0/apiclients", &[], None)
            .unwrap();
        assert_eq!(request.method(), Method::GET);
        assert_eq!(request.url().as_str(), "https://t.example.com/v1.0/apiclients");
        assert_eq!(request.headers()["authorization"], "Bearer abc");
        assert_eq!(request.headers()["accept"], "application/json");
        assert!(request.headers().get("content-type").is_none());
        assert!(request.body().is_none());
    }

    #[test]
    fn post_encodes_body() {
        let session = session();
        let body = json!({"clientName": "app1", "entitlements": ["read"]});
        let request = Endpoint::new(&session)
            .request(Method::POST, "/v1.0/apiclients", &[], Some(&body))
            .unwrap();
        assert_eq!(request.url().as_str(), "https://t.example.com/v1.0/apiclients");
        assert_eq!(request.headers()["content-type"], "application/json");
        let sent = request.body().and_then(|body| body.as_bytes()).unwrap();
        let sent: serde_json::Value = serde_json::from_slice(sent).unwrap();
        assert_eq!(sent, body);
    }

    #[test]
    fn query_parameters_are_encoded() {
        let session = session();
        let url = Endpoint::new(&session)
            .url(
                "v1.0/apiclients",
                &[("search", "clientName = \"a&b\""), ("count", "10")],
            )
            .unwrap();
        let pairs: BTreeMap<_, _> = url.query_pairs().into_owned().collect();
        assert_eq!(pairs["search"], "clientName = \"a&b\"");
        assert_eq!(pairs["count"], "10");
        assert_eq!(url.path(), "/v1.0/apiclients");
    }

    #[test]
    fn same_inputs_same_request() {
        let session = session();
        let endpoint = Endpoint::new(&session);
        let body = json!({"a": 1});
        let one = endpoint
            .request(Method::PUT, "v1.0/apiclients/42", &[("x", "y")], Some(&body))
            .unwrap();
        let two = endpoint
            .request(Method::PUT, "v1.0/apiclients/42", &[("x", "y")], Some(&body))
            .unwrap();
        assert_eq!(one.url(), two.url());
        assert_eq!(one.headers(), two.headers());
        assert_eq!(
            one.body().and_then(|body| body.as_bytes()),
            two.body().and_then(|body| body.as_bytes()),
        );
    }

    #[test]
    fn scheme_override() {
        let session = Session::new("127.0.0.1:8080", "abc", SessionKind::User);
        let url = Endpoint::new(&session).scheme("http").url("v2.0/identitysources", &[]);
        assert_eq!(
            url.unwrap().as_str(),
            "http://127.0.0.1:8080/v2.0/identitysources"
        );
    }

    struct Unencodable;

    impl Serialize for Unencodable {
        fn serialize<S>(&self, _: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            Err(S::Error::custom("not today"))
        }
    }

    #[test]
    fn unencodable_body_is_rejected() {
        let session = session();
        let error = Endpoint::new(&session)
            .request(Method::POST, "v1.0/apiclients", &[], Some(&Unencodable))
            .unwrap_err();
        assert!(error.is::<EncodingError>());
    }

    #[test]
    fn item_id_is_one_segment() {
        let session = session();
        let request = Endpoint::new(&session)
            .item_request::<()>(
                Method::GET,
                "v2.0/identitysources",
                "../../v1.0/apiclients/42",
                None,
            )
            .unwrap();
        assert_eq!(
            request.url().as_str(),
            "https://t.example.com/v2.0/identitysources/..%2F..%2Fv1.0%2Fapiclients%2F42",
        );
        assert_eq!(request.url().path_segments().unwrap().count(), 3);
    }

    #[test]
    fn item_url_escapes_reserved_characters() {
        let session = session();
        let url = Endpoint::new(&session)
            .item_url("v1.0/apiclients/", "a b?c#d")
            .unwrap();
        assert_eq!(url.as_str(), "https://t.example.com/v1.0/apiclients/a%20b%3Fc%23d");
    }

    #[test]
    fn item_url_rejects_unaddressable_ids() {
        let session = session();
        let endpoint = Endpoint::new(&session);
        for id in ["", ".", ".."] {
            let error = endpoint.item_url("v1.0/apiclients", id).unwrap_err();
            let error = error.downcast_ref::<InvalidIdentifier>().unwrap();
            assert_eq!(error.id, id);
        }
    }
}
