//! Implement the CRUD operations for every resource kind.
use std::marker::PhantomData;

use anyhow::Context;
use anyhow::Result;
use reqwest::Method;
use reqwest::StatusCode;
use serde_json::Value as Json;

use verifyctl_client_utils::ResourceIdentifier;

use super::Client;
use super::Search;
use crate::error::ValidationError;
use crate::kind::ApiClient;
use crate::kind::Created;
use crate::kind::Fetched;
use crate::kind::IdentitySource;
use crate::kind::Lookup;
use crate::kind::ResourceKind;
use crate::kind::ResourceList;
use crate::Session;

/// Access operations on resources of kind `K`.
pub struct ResourceClient<'a, K> {
    inner: &'a Client,
    session: &'a Session,
    kind: PhantomData<K>,
}

impl Client {
    /// Resource operations on behalf of a session.
    pub fn resource<'a, K>(&'a self, session: &'a Session) -> ResourceClient<'a, K>
    where
        K: ResourceKind,
    {
        ResourceClient {
            inner: self,
            session,
            kind: PhantomData,
        }
    }

    /// API client operations on behalf of a session.
    pub fn api_clients<'a>(&'a self, session: &'a Session) -> ResourceClient<'a, ApiClient> {
        self.resource(session)
    }

    /// Identity source operations on behalf of a session.
    pub fn identity_sources<'a>(&'a self, session: &'a Session) -> ResourceClient<'a, IdentitySource> {
        self.resource(session)
    }
}

impl<'a, K> ResourceClient<'a, K>
where
    K: ResourceKind,
{
    /// Create a new resource from a document.
    pub async fn create(&self, document: &K::Document) -> Result<Created> {
        K::validate(document)?;
        let name = K::name(document);
        let request = self.inner.endpoint(self.session).request(
            Method::POST,
            K::COLLECTION_PATH,
            &[],
            Some(document),
        )?;
        let reply = self.inner.send(request).await?;
        reply
            .check(StatusCode::CREATED, &format!("unable to create the {}", K::KIND))
            .with_context(|| ResourceIdentifier::reference(K::KIND, name))?;

        let id = serde_json::from_str::<Json>(&reply.body)
            .ok()
            .and_then(|body| body.get("id").and_then(Json::as_str).map(String::from))
            .or_else(|| {
                reply
                    .location
                    .as_deref()
                    .and_then(|location| location.trim_end_matches('/').rsplit('/').next())
                    .filter(|id| !id.is_empty())
                    .map(String::from)
            });
        Ok(Created {
            id,
            location: reply.location,
            message: format!("{} created successfully", K::KIND),
        })
    }

    /// Fetch a single resource, looking it up by name or identifier.
    pub async fn get(&self, lookup: &Lookup) -> Result<Fetched<K::Document>> {
        let id = match lookup {
            Lookup::Id(id) if id.is_empty() => anyhow::bail!(ValidationError {
                kind: K::KIND,
                violations: vec![String::from("the identifier must not be empty")],
            }),
            Lookup::Id(id) => id.clone(),
            Lookup::Name(name) => self.resolve(name).await?,
        };
        let request = self.inner.endpoint(self.session).item_request::<()>(
            Method::GET,
            K::COLLECTION_PATH,
            &id,
            None,
        )?;
        let reply = self.inner.send(request).await?;
        reply
            .check(StatusCode::OK, &format!("unable to get the {}", K::KIND))
            .with_context(|| ResourceIdentifier::reference(K::KIND, lookup.to_string()))?;
        let data = reply
            .json()
            .with_context(|| ResourceIdentifier::reference(K::KIND, lookup.to_string()))?;
        Ok(Fetched {
            data,
            url: reply.url,
        })
    }

    /// List resources, optionally sorted and limited in number.
    pub async fn list(
        &self,
        sort: Option<&str>,
        count: Option<u32>,
    ) -> Result<Fetched<ResourceList<K::Document>>> {
        let count = count.map(|count| count.to_string());
        let mut query = Vec::new();
        if let Some(sort) = sort {
            query.push(("sort", sort));
        }
        if let Some(count) = count.as_deref() {
            query.push(("count", count));
        }
        let request = self.inner.endpoint(self.session).request::<()>(
            Method::GET,
            K::COLLECTION_PATH,
            &query,
            None,
        )?;
        let reply = self.inner.send(request).await?;
        reply.check(StatusCode::OK, &format!("unable to list {} resources", K::KIND))?;
        let response: Json = reply.json()?;
        let data = ResourceList::from_response(response, K::COLLECTION_FIELD)?;
        Ok(Fetched {
            data,
            url: reply.url,
        })
    }

    /// Replace an existing resource, found by the name in the document.
    pub async fn update(&self, document: &K::Document) -> Result<()> {
        K::validate(document)?;
        let name = K::name(document);
        let id = self.resolve(name).await?;
        let request = self.inner.endpoint(self.session).item_request(
            Method::PUT,
            K::COLLECTION_PATH,
            &id,
            Some(document),
        )?;
        let reply = self.inner.send(request).await?;
        reply
            .check(StatusCode::NO_CONTENT, &format!("unable to update the {}", K::KIND))
            .with_context(|| ResourceIdentifier::reference(K::KIND, name))?;
        Ok(())
    }

    /// Delete a resource by name.
    pub async fn delete(&self, name: &str) -> Result<()> {
        let id = self.resolve(name).await?;
        let request = self.inner.endpoint(self.session).item_request::<()>(
            Method::DELETE,
            K::COLLECTION_PATH,
            &id,
            None,
        )?;
        let reply = self.inner.send(request).await?;
        reply
            .check(StatusCode::NO_CONTENT, &format!("unable to delete the {}", K::KIND))
            .with_context(|| ResourceIdentifier::reference(K::KIND, name))?;
        Ok(())
    }

    async fn resolve(&self, name: &str) -> Result<String> {
        self.inner
            .resolve_id(self.session, &Search::of::<K>(), name)
            .await
            .with_context(|| ResourceIdentifier::reference(K::KIND, name))
    }
}
