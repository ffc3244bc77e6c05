//! Stateless HTTP request builder and response parser for the management API.
//!
//! # Design
//! `CmaClient` holds only the endpoint, access token and user agent and
//! carries no mutable state between calls. Each operation is split into a
//! `build_*` method that produces an `HttpRequest` and a `parse_*` method
//! that consumes an `HttpResponse`. Validation that needs no network
//! (missing version, missing ids, draft links) happens in `build_*`, so a
//! failing build never reaches the transport. Resources are only borrowed
//! while a request is built; the caller's copy is never modified.

use std::borrow::Cow;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::codec;
use crate::config::ClientConfig;
use crate::error::{CmaError, CmaResult};
use crate::http::{HttpMethod, HttpRequest, HttpResponse, HEADER_CONTENT_TYPE_ID, HEADER_ORGANIZATION, HEADER_VERSION};
use crate::model::{Appearance, CmaArray, Entry, Resource, Space};

/// Synchronous, stateless request builder for the management API.
#[derive(Debug, Clone)]
pub struct CmaClient {
    base_url: String,
    access_token: String,
    user_agent: String,
}

/// Sub-resource toggled by publish/archive operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Published,
    Archived,
}

impl State {
    fn segment(self) -> &'static str {
        match self {
            State::Published => "published",
            State::Archived => "archived",
        }
    }
}

impl CmaClient {
    pub fn new(base_url: &str, access_token: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            access_token: access_token.to_string(),
            user_agent: format!("cma-rust/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    pub fn from_config(config: &ClientConfig) -> CmaResult<Self> {
        config.validate()?;
        let mut client = Self::new(&config.endpoint, &config.access_token);
        client.user_agent = config.user_agent.clone();
        Ok(client)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // -----------------------------------------------------------------------
    // Collection resources (entries, content types)
    // -----------------------------------------------------------------------

    /// `POST` to the collection when the resource has no id, otherwise `PUT`
    /// to the id the caller picked.
    pub fn build_create<R: Resource>(&self, space_id: &str, resource: &R) -> CmaResult<HttpRequest> {
        let body = resource.to_body()?;
        let request = match resource.sys().id() {
            Some(id) => self.request(HttpMethod::Put, resource_path::<R>(space_id, id)),
            None => self.request(HttpMethod::Post, collection_path::<R>(space_id)),
        };
        self.with_body(request, &body)
    }

    /// Create an entry of the given content type.
    pub fn build_create_entry(
        &self,
        space_id: &str,
        content_type_id: &str,
        entry: &Entry,
    ) -> CmaResult<HttpRequest> {
        let mut request = self.build_create(space_id, entry)?;
        request
            .headers
            .push((HEADER_CONTENT_TYPE_ID.to_string(), content_type_id.to_string()));
        Ok(request)
    }

    pub fn build_update<R: Resource>(&self, resource: &R) -> CmaResult<HttpRequest> {
        let (space_id, id) = identity(resource, "update")?;
        let version = require_version(resource, "update")?;
        let body = resource.to_body()?;
        let request = self.request(HttpMethod::Put, resource_path::<R>(space_id, id));
        self.with_body(with_version(request, version), &body)
    }

    pub fn build_delete<R: Resource>(&self, space_id: &str, id: &str) -> HttpRequest {
        self.request(HttpMethod::Delete, resource_path::<R>(space_id, id))
    }

    pub fn build_publish<R: Resource>(&self, resource: &R) -> CmaResult<HttpRequest> {
        let (space_id, id) = identity(resource, "publish")?;
        let version = require_version(resource, "publish")?;
        let request = self.request(HttpMethod::Put, state_path::<R>(space_id, id, State::Published));
        Ok(with_version(request, version))
    }

    pub fn build_unpublish<R: Resource>(&self, resource: &R) -> CmaResult<HttpRequest> {
        let (space_id, id) = identity(resource, "unpublish")?;
        Ok(self.request(HttpMethod::Delete, state_path::<R>(space_id, id, State::Published)))
    }

    /// Archive. The version header is sent when the resource has one but is
    /// not required.
    pub fn build_archive<R: Resource>(&self, resource: &R) -> CmaResult<HttpRequest> {
        let (space_id, id) = identity(resource, "archive")?;
        let request = self.request(HttpMethod::Put, state_path::<R>(space_id, id, State::Archived));
        Ok(match resource.sys().version() {
            Some(version) => with_version(request, version),
            None => request,
        })
    }

    pub fn build_unarchive<R: Resource>(&self, resource: &R) -> CmaResult<HttpRequest> {
        let (space_id, id) = identity(resource, "unarchive")?;
        Ok(self.request(HttpMethod::Delete, state_path::<R>(space_id, id, State::Archived)))
    }

    pub fn build_fetch_one<R: Resource>(&self, space_id: &str, id: &str) -> HttpRequest {
        self.request(HttpMethod::Get, resource_path::<R>(space_id, id))
    }

    /// Query pairs are forwarded verbatim, in the order given.
    pub fn build_fetch_all<R, I, K, V>(&self, space_id: &str, query: I) -> HttpRequest
    where
        R: Resource,
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut request = self.request(HttpMethod::Get, collection_path::<R>(space_id));
        request.query = query.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        request
    }

    // -----------------------------------------------------------------------
    // Spaces
    // -----------------------------------------------------------------------

    pub fn build_fetch_spaces(&self) -> HttpRequest {
        self.request(HttpMethod::Get, "/spaces".to_string())
    }

    pub fn build_fetch_space(&self, space_id: &str) -> HttpRequest {
        self.request(HttpMethod::Get, space_path(space_id))
    }

    pub fn build_create_space(&self, space: &Space, organization_id: Option<&str>) -> CmaResult<HttpRequest> {
        if space.name.is_none() {
            return Err(CmaError::MissingAttribute("space.name"));
        }
        let body = serde_json::to_value(space).map_err(|e| CmaError::Serialization(e.to_string()))?;
        let mut request = self.with_body(self.request(HttpMethod::Post, "/spaces".to_string()), &body)?;
        if let Some(organization_id) = organization_id {
            request
                .headers
                .push((HEADER_ORGANIZATION.to_string(), organization_id.to_string()));
        }
        Ok(request)
    }

    pub fn build_delete_space(&self, space_id: &str) -> HttpRequest {
        self.request(HttpMethod::Delete, space_path(space_id))
    }

    // -----------------------------------------------------------------------
    // Appearances (editor interfaces)
    // -----------------------------------------------------------------------

    pub fn build_fetch_appearance(&self, space_id: &str, content_type_id: &str) -> HttpRequest {
        self.request(HttpMethod::Get, appearance_path(space_id, content_type_id))
    }

    pub fn build_update_appearance(&self, appearance: &Appearance) -> CmaResult<HttpRequest> {
        if appearance.title.is_none() {
            return Err(CmaError::MissingAttribute("appearance.title"));
        }
        let content_type_id = appearance
            .content_type_id
            .as_deref()
            .ok_or(CmaError::MissingAttribute("appearance.contentTypeId"))?;
        let space_id = appearance
            .sys()
            .space_id()
            .ok_or(CmaError::MissingSpaceId { operation: "update" })?;
        let version = appearance
            .version()
            .ok_or(CmaError::MissingVersion { operation: "update" })?;
        let body = serde_json::to_value(appearance).map_err(|e| CmaError::Serialization(e.to_string()))?;
        let request = self.request(HttpMethod::Put, appearance_path(space_id, content_type_id));
        self.with_body(with_version(request, version), &body)
    }

    // -----------------------------------------------------------------------
    // Parsing
    // -----------------------------------------------------------------------

    pub fn parse_resource<T: DeserializeOwned>(&self, response: HttpResponse) -> CmaResult<T> {
        check_status(&response)?;
        codec::shared().decode(&response.body)
    }

    pub fn parse_array<T: DeserializeOwned>(&self, response: HttpResponse) -> CmaResult<CmaArray<T>> {
        self.parse_resource(response)
    }

    pub fn parse_empty(&self, response: HttpResponse) -> CmaResult<()> {
        check_status(&response)
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    fn request(&self, method: HttpMethod, path: String) -> HttpRequest {
        debug!(%method, %path, "building request");
        HttpRequest {
            method,
            url: format!("{}{path}", self.base_url),
            query: Vec::new(),
            headers: vec![
                ("Authorization".to_string(), format!("Bearer {}", self.access_token)),
                ("User-Agent".to_string(), self.user_agent.clone()),
            ],
            body: None,
        }
    }

    fn with_body(&self, mut request: HttpRequest, body: &Value) -> CmaResult<HttpRequest> {
        let codec = codec::shared();
        request.body = Some(codec.encode(body)?);
        request
            .headers
            .push(("Content-Type".to_string(), codec.media_type().to_string()));
        Ok(request)
    }
}

/// Ids are percent-encoded so `/`, `?` or `#` stay inside their segment.
fn encode_id(id: &str) -> Cow<'_, str> {
    urlencoding::encode(id)
}

fn space_path(space_id: &str) -> String {
    format!("/spaces/{}", encode_id(space_id))
}

fn collection_path<R: Resource>(space_id: &str) -> String {
    format!("{}/{}", space_path(space_id), R::COLLECTION)
}

fn resource_path<R: Resource>(space_id: &str, id: &str) -> String {
    format!("{}/{}", collection_path::<R>(space_id), encode_id(id))
}

fn state_path<R: Resource>(space_id: &str, id: &str, state: State) -> String {
    format!("{}/{}", resource_path::<R>(space_id, id), state.segment())
}

fn appearance_path(space_id: &str, content_type_id: &str) -> String {
    format!(
        "{}/content_types/{}/editor_interfaces/default",
        space_path(space_id),
        encode_id(content_type_id)
    )
}

fn identity<'a, R: Resource>(resource: &'a R, operation: &'static str) -> CmaResult<(&'a str, &'a str)> {
    let sys = resource.sys();
    let id = sys.id().ok_or(CmaError::MissingId { operation })?;
    let space_id = sys.space_id().ok_or(CmaError::MissingSpaceId { operation })?;
    Ok((space_id, id))
}

fn require_version<R: Resource>(resource: &R, operation: &'static str) -> CmaResult<u64> {
    resource.sys().version().ok_or(CmaError::MissingVersion { operation })
}

fn with_version(mut request: HttpRequest, version: u64) -> HttpRequest {
    request.headers.push((HEADER_VERSION.to_string(), version.to_string()));
    request
}

/// Map non-success status codes to the appropriate `CmaError` variant.
fn check_status(response: &HttpResponse) -> CmaResult<()> {
    if response.is_success() {
        return Ok(());
    }
    if response.status == 404 {
        return Err(CmaError::NotFound { context: None });
    }
    Err(CmaError::Http {
        status: response.status,
        body: response.body.clone(),
        context: None,
    })
}
