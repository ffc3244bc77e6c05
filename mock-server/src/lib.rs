//! In-memory imitation of the content management API.
//!
//! Covers spaces, entries, content types and editor interfaces with the
//! behaviour the client depends on: bearer auth, server-assigned ids,
//! versions that start at 1 and grow by one per write, `X-Contentful-Version`
//! checks, publish/archive state in `sys`, and paged collection responses.

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::{SecondsFormat, Utc};
use serde_json::{json, Map, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::{debug, info};
use uuid::Uuid;

pub const HEADER_VERSION: &str = "x-contentful-version";
pub const HEADER_CONTENT_TYPE_ID: &str = "x-contentful-content-type";
pub const HEADER_ORGANIZATION: &str = "x-contentful-organization";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Entries,
    ContentTypes,
}

impl Collection {
    fn segment(self) -> &'static str {
        match self {
            Collection::Entries => "entries",
            Collection::ContentTypes => "content_types",
        }
    }

    fn sys_type(self) -> &'static str {
        match self {
            Collection::Entries => "Entry",
            Collection::ContentTypes => "ContentType",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flag {
    Published,
    Archived,
}

impl Flag {
    fn key(self) -> &'static str {
        match self {
            Flag::Published => "publishedVersion",
            Flag::Archived => "archivedVersion",
        }
    }
}

#[derive(Debug, Default)]
struct SpaceRecord {
    space: Value,
    entries: Vec<Value>,
    content_types: Vec<Value>,
    editor_interfaces: HashMap<String, Value>,
}

impl SpaceRecord {
    fn items(&self, collection: Collection) -> &Vec<Value> {
        match collection {
            Collection::Entries => &self.entries,
            Collection::ContentTypes => &self.content_types,
        }
    }

    fn items_mut(&mut self, collection: Collection) -> &mut Vec<Value> {
        match collection {
            Collection::Entries => &mut self.entries,
            Collection::ContentTypes => &mut self.content_types,
        }
    }

    fn find(&self, collection: Collection, id: &str) -> Option<&Value> {
        self.items(collection).iter().find(|item| sys_id(item) == Some(id))
    }

    fn find_mut(&mut self, collection: Collection, id: &str) -> Option<&mut Value> {
        self.items_mut(collection)
            .iter_mut()
            .find(|item| sys_id(item) == Some(id))
    }
}

#[derive(Debug, Default)]
pub struct Store {
    spaces: Vec<(String, SpaceRecord)>,
}

impl Store {
    fn space(&self, id: &str) -> Result<&SpaceRecord, ApiError> {
        self.spaces
            .iter()
            .find(|(space_id, _)| space_id == id)
            .map(|(_, record)| record)
            .ok_or(ApiError::not_found())
    }

    fn space_mut(&mut self, id: &str) -> Result<&mut SpaceRecord, ApiError> {
        self.spaces
            .iter_mut()
            .find(|(space_id, _)| space_id == id)
            .map(|(_, record)| record)
            .ok_or(ApiError::not_found())
    }
}

pub type Db = Arc<RwLock<Store>>;

/// Error body in the API's `{"sys": {"type": "Error", "id": ...}}` shape.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    id: &'static str,
}

impl ApiError {
    fn new(status: StatusCode, id: &'static str) -> Self {
        Self { status, id }
    }

    fn not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND, "NotFound")
    }

    fn version_mismatch() -> Self {
        Self::new(StatusCode::CONFLICT, "VersionMismatch")
    }

    fn invalid(id: &'static str) -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, id)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = json!({ "sys": { "type": "Error", "id": self.id } });
        (self.status, Json(body)).into_response()
    }
}

type ApiResult = Result<(StatusCode, Json<Value>), ApiError>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    Router::new()
        .route("/spaces", get(list_spaces).post(create_space))
        .route("/spaces/{space}", get(get_space).delete(delete_space))
        .merge(collection_routes(Collection::Entries))
        .merge(collection_routes(Collection::ContentTypes))
        .route(
            "/spaces/{space}/entries/{id}/archived",
            axum::routing::put(
                |State(db): State<Db>, Path((space, id)): Path<(String, String)>, headers: HeaderMap| async move {
                    set_flag(db, Collection::Entries, Flag::Archived, space, id, headers).await
                },
            )
            .delete(
                |State(db): State<Db>, Path((space, id)): Path<(String, String)>, headers: HeaderMap| async move {
                    clear_flag(db, Collection::Entries, Flag::Archived, space, id, headers).await
                },
            ),
        )
        .route(
            "/spaces/{space}/content_types/{id}/editor_interfaces/default",
            get(get_editor_interface).put(put_editor_interface),
        )
        .with_state(db)
}

/// List/create/get/put/delete/publish routes for one collection.
fn collection_routes(collection: Collection) -> Router<Db> {
    let base = format!("/spaces/{{space}}/{}", collection.segment());
    let item = format!("{base}/{{id}}");
    let published = format!("{item}/published");

    Router::new()
        .route(
            &base,
            get(
                move |State(db): State<Db>,
                      Path(space): Path<String>,
                      headers: HeaderMap,
                      Query(query): Query<HashMap<String, String>>| async move {
                    list_resources(db, collection, space, headers, query).await
                },
            )
            .post(
                move |State(db): State<Db>, Path(space): Path<String>, headers: HeaderMap, body: String| async move {
                    create_resource(db, collection, space, None, headers, body).await
                },
            ),
        )
        .route(
            &item,
            get(
                move |State(db): State<Db>, Path((space, id)): Path<(String, String)>, headers: HeaderMap| async move {
                    get_resource(db, collection, space, id, headers).await
                },
            )
            .put(
                move |State(db): State<Db>,
                      Path((space, id)): Path<(String, String)>,
                      headers: HeaderMap,
                      body: String| async move { put_resource(db, collection, space, id, headers, body).await },
            )
            .delete(
                move |State(db): State<Db>, Path((space, id)): Path<(String, String)>, headers: HeaderMap| async move {
                    delete_resource(db, collection, space, id, headers).await
                },
            ),
        )
        .route(
            &published,
            axum::routing::put(
                move |State(db): State<Db>, Path((space, id)): Path<(String, String)>, headers: HeaderMap| async move {
                    set_flag(db, collection, Flag::Published, space, id, headers).await
                },
            )
            .delete(
                move |State(db): State<Db>, Path((space, id)): Path<(String, String)>, headers: HeaderMap| async move {
                    clear_flag(db, collection, Flag::Published, space, id, headers).await
                },
            ),
        )
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "mock management API listening");
    }
    axum::serve(listener, app()).await
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn new_id() -> String {
    Uuid::new_v4().simple().to_string()
}

fn link(link_type: &str, id: &str) -> Value {
    json!({ "sys": { "type": "Link", "linkType": link_type, "id": id } })
}

fn sys_id(value: &Value) -> Option<&str> {
    value.get("sys")?.get("id")?.as_str()
}

fn sys_version(value: &Value) -> u64 {
    value
        .get("sys")
        .and_then(|sys| sys.get("version"))
        .and_then(Value::as_u64)
        .unwrap_or(0)
}

fn sys_mut(value: &mut Value) -> Option<&mut Map<String, Value>> {
    value.get_mut("sys")?.as_object_mut()
}

/// Bump the version and stamp `updatedAt`.
fn touch(value: &mut Value) {
    let next = sys_version(value) + 1;
    if let Some(sys) = sys_mut(value) {
        sys.insert("version".to_string(), json!(next));
        sys.insert("updatedAt".to_string(), json!(now()));
    }
}

fn authorize(headers: &HeaderMap) -> Result<(), ApiError> {
    let authorized = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("Bearer ") && v.len() > "Bearer ".len());
    if authorized {
        Ok(())
    } else {
        Err(ApiError::new(StatusCode::UNAUTHORIZED, "AccessTokenInvalid"))
    }
}

fn header<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

/// The request's `X-Contentful-Version` must match the stored version.
fn check_version(headers: &HeaderMap, current: &Value) -> Result<(), ApiError> {
    let sent = header(headers, HEADER_VERSION).and_then(|v| v.parse::<u64>().ok());
    if sent == Some(sys_version(current)) {
        Ok(())
    } else {
        Err(ApiError::version_mismatch())
    }
}

fn parse_body(body: &str) -> Result<Map<String, Value>, ApiError> {
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(map)) => Ok(map),
        _ => Err(ApiError::new(StatusCode::BAD_REQUEST, "BadRequest")),
    }
}

/// Replace every non-sys attribute of `target` with those of `body`.
fn apply_body(target: &mut Value, body: Map<String, Value>) {
    let sys = target.get("sys").cloned().unwrap_or_else(|| json!({}));
    let mut next = body;
    next.remove("sys");
    next.insert("sys".to_string(), sys);
    *target = Value::Object(next);
}

fn array(items: Vec<Value>, total: usize, skip: usize, limit: usize) -> Value {
    json!({
        "sys": { "type": "Array" },
        "total": total,
        "skip": skip,
        "limit": limit,
        "items": items
    })
}

// ---------------------------------------------------------------------------
// Spaces
// ---------------------------------------------------------------------------

async fn list_spaces(State(db): State<Db>, headers: HeaderMap) -> ApiResult {
    authorize(&headers)?;
    let store = db.read().await;
    let items: Vec<Value> = store.spaces.iter().map(|(_, r)| r.space.clone()).collect();
    let total = items.len();
    Ok((StatusCode::OK, Json(array(items, total, 0, 100))))
}

async fn create_space(State(db): State<Db>, headers: HeaderMap, body: String) -> ApiResult {
    authorize(&headers)?;
    let body = parse_body(&body)?;
    if !body.get("name").is_some_and(Value::is_string) {
        return Err(ApiError::invalid("ValidationFailed"));
    }

    let id = new_id();
    let timestamp = now();
    let mut sys = json!({
        "id": id,
        "type": "Space",
        "version": 1,
        "createdAt": timestamp,
        "updatedAt": timestamp
    });
    if let Some(organization) = header(&headers, HEADER_ORGANIZATION) {
        sys["organization"] = link("Organization", organization);
    }
    let mut space = json!({ "sys": sys });
    apply_body(&mut space, body);

    let mut store = db.write().await;
    store.spaces.push((
        id.clone(),
        SpaceRecord {
            space: space.clone(),
            ..SpaceRecord::default()
        },
    ));
    debug!(space = %id, "space created");
    Ok((StatusCode::CREATED, Json(space)))
}

async fn get_space(State(db): State<Db>, Path(space): Path<String>, headers: HeaderMap) -> ApiResult {
    authorize(&headers)?;
    let store = db.read().await;
    Ok((StatusCode::OK, Json(store.space(&space)?.space.clone())))
}

async fn delete_space(
    State(db): State<Db>,
    Path(space): Path<String>,
    headers: HeaderMap,
) -> Result<StatusCode, ApiError> {
    authorize(&headers)?;
    let mut store = db.write().await;
    let before = store.spaces.len();
    store.spaces.retain(|(id, _)| *id != space);
    if store.spaces.len() == before {
        return Err(ApiError::not_found());
    }
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Entries and content types
// ---------------------------------------------------------------------------

async fn list_resources(
    db: Db,
    collection: Collection,
    space: String,
    headers: HeaderMap,
    query: HashMap<String, String>,
) -> ApiResult {
    authorize(&headers)?;
    let skip = query.get("skip").and_then(|v| v.parse().ok()).unwrap_or(0);
    let limit = query.get("limit").and_then(|v| v.parse().ok()).unwrap_or(100);
    let content_type = query.get("content_type");

    let store = db.read().await;
    let matching: Vec<&Value> = store
        .space(&space)?
        .items(collection)
        .iter()
        .filter(|item| match (collection, content_type) {
            (Collection::Entries, Some(ct)) => {
                item["sys"]["contentType"]["sys"]["id"].as_str() == Some(ct.as_str())
            }
            _ => true,
        })
        .collect();

    let total = matching.len();
    let items = matching.into_iter().skip(skip).take(limit).cloned().collect();
    Ok((StatusCode::OK, Json(array(items, total, skip, limit))))
}

async fn create_resource(
    db: Db,
    collection: Collection,
    space: String,
    id: Option<String>,
    headers: HeaderMap,
    body: String,
) -> ApiResult {
    authorize(&headers)?;
    let body = parse_body(&body)?;
    let mut store = db.write().await;
    let record = store.space_mut(&space)?;

    let id = id.unwrap_or_else(new_id);
    let timestamp = now();
    let mut sys = json!({
        "id": id,
        "type": collection.sys_type(),
        "version": 1,
        "createdAt": timestamp,
        "updatedAt": timestamp,
        "space": link("Space", &space)
    });

    if collection == Collection::Entries {
        let content_type = header(&headers, HEADER_CONTENT_TYPE_ID)
            .ok_or(ApiError::invalid("ContentTypeNotSet"))?;
        if record.find(Collection::ContentTypes, content_type).is_none() {
            return Err(ApiError::invalid("UnknownContentType"));
        }
        sys["contentType"] = link("ContentType", content_type);
    }

    let mut resource = json!({ "sys": sys });
    apply_body(&mut resource, body);
    record.items_mut(collection).push(resource.clone());
    debug!(%space, %id, collection = collection.segment(), "resource created");
    Ok((StatusCode::CREATED, Json(resource)))
}

async fn get_resource(db: Db, collection: Collection, space: String, id: String, headers: HeaderMap) -> ApiResult {
    authorize(&headers)?;
    let store = db.read().await;
    let resource = store
        .space(&space)?
        .find(collection, &id)
        .cloned()
        .ok_or(ApiError::not_found())?;
    Ok((StatusCode::OK, Json(resource)))
}

/// `PUT` on an item creates it under the given id when absent, otherwise
/// updates it after a version check.
async fn put_resource(
    db: Db,
    collection: Collection,
    space: String,
    id: String,
    headers: HeaderMap,
    body: String,
) -> ApiResult {
    authorize(&headers)?;
    let exists = db.read().await.space(&space)?.find(collection, &id).is_some();
    if !exists {
        return create_resource(db, collection, space, Some(id), headers, body).await;
    }

    let body = parse_body(&body)?;
    let mut store = db.write().await;
    let resource = store
        .space_mut(&space)?
        .find_mut(collection, &id)
        .ok_or(ApiError::not_found())?;
    check_version(&headers, resource)?;
    apply_body(resource, body);
    touch(resource);
    Ok((StatusCode::OK, Json(resource.clone())))
}

async fn delete_resource(
    db: Db,
    collection: Collection,
    space: String,
    id: String,
    headers: HeaderMap,
) -> Result<StatusCode, ApiError> {
    authorize(&headers)?;
    let mut store = db.write().await;
    let items = store.space_mut(&space)?.items_mut(collection);
    let before = items.len();
    items.retain(|item| sys_id(item) != Some(id.as_str()));
    if items.len() == before {
        return Err(ApiError::not_found());
    }
    Ok(StatusCode::NO_CONTENT)
}

/// Publish or archive. Publishing needs a matching version header; archiving
/// checks it only when one is sent.
async fn set_flag(
    db: Db,
    collection: Collection,
    flag: Flag,
    space: String,
    id: String,
    headers: HeaderMap,
) -> ApiResult {
    authorize(&headers)?;
    let mut store = db.write().await;
    let resource = store
        .space_mut(&space)?
        .find_mut(collection, &id)
        .ok_or(ApiError::not_found())?;
    if flag == Flag::Published || header(&headers, HEADER_VERSION).is_some() {
        check_version(&headers, resource)?;
    }
    let version = sys_version(resource);
    if let Some(sys) = sys_mut(resource) {
        sys.insert(flag.key().to_string(), json!(version));
    }
    touch(resource);
    Ok((StatusCode::OK, Json(resource.clone())))
}

async fn clear_flag(
    db: Db,
    collection: Collection,
    flag: Flag,
    space: String,
    id: String,
    headers: HeaderMap,
) -> ApiResult {
    authorize(&headers)?;
    let mut store = db.write().await;
    let resource = store
        .space_mut(&space)?
        .find_mut(collection, &id)
        .ok_or(ApiError::not_found())?;
    if sys_mut(resource).and_then(|sys| sys.remove(flag.key())).is_none() {
        return Err(ApiError::new(StatusCode::BAD_REQUEST, "InvalidState"));
    }
    touch(resource);
    Ok((StatusCode::OK, Json(resource.clone())))
}

// ---------------------------------------------------------------------------
// Editor interfaces
// ---------------------------------------------------------------------------

fn default_editor_interface(space: &str, content_type: &Value, content_type_id: &str) -> Value {
    let widgets: Vec<Value> = content_type["fields"]
        .as_array()
        .map(|fields| {
            fields
                .iter()
                .filter_map(|field| field["id"].as_str())
                .map(|field_id| json!({ "id": field_id, "fieldId": field_id, "widgetId": "singleLine" }))
                .collect()
        })
        .unwrap_or_default();
    json!({
        "sys": {
            "id": "default",
            "type": "EditorInterface",
            "version": 1,
            "space": link("Space", space),
            "contentType": link("ContentType", content_type_id)
        },
        "title": content_type["name"].clone(),
        "contentTypeId": content_type_id,
        "widgets": widgets
    })
}

async fn get_editor_interface(
    State(db): State<Db>,
    Path((space, id)): Path<(String, String)>,
    headers: HeaderMap,
) -> ApiResult {
    authorize(&headers)?;
    let store = db.read().await;
    let record = store.space(&space)?;
    let content_type = record.find(Collection::ContentTypes, &id).ok_or(ApiError::not_found())?;
    let interface = record
        .editor_interfaces
        .get(&id)
        .cloned()
        .unwrap_or_else(|| default_editor_interface(&space, content_type, &id));
    Ok((StatusCode::OK, Json(interface)))
}

async fn put_editor_interface(
    State(db): State<Db>,
    Path((space, id)): Path<(String, String)>,
    headers: HeaderMap,
    body: String,
) -> ApiResult {
    authorize(&headers)?;
    let body = parse_body(&body)?;
    let mut store = db.write().await;
    let record = store.space_mut(&space)?;
    let content_type = record.find(Collection::ContentTypes, &id).ok_or(ApiError::not_found())?;
    let mut interface = record
        .editor_interfaces
        .get(&id)
        .cloned()
        .unwrap_or_else(|| default_editor_interface(&space, content_type, &id));
    check_version(&headers, &interface)?;
    apply_body(&mut interface, body);
    touch(&mut interface);
    record.editor_interfaces.insert(id, interface.clone());
    Ok((StatusCode::OK, Json(interface)))
}
