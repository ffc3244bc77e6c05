use axum::http::{self, Request, StatusCode};
use axum::routing::RouterIntoService;
use http_body_util::BodyExt;
use mock_server::app;
use serde_json::Value;
use tower::{Service, ServiceExt};

const TOKEN: &str = "Bearer test-token";

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn request(method: &str, uri: &str) -> http::request::Builder {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::AUTHORIZATION, TOKEN)
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    request(method, uri)
        .header(http::header::CONTENT_TYPE, "application/vnd.contentful.management.v1+json")
        .body(body.to_string())
        .unwrap()
}

fn empty(method: &str, uri: &str) -> Request<String> {
    request(method, uri).body(String::new()).unwrap()
}

async fn send(app: &mut RouterIntoService<String>, req: Request<String>) -> axum::response::Response {
    ServiceExt::<Request<String>>::ready(app)
        .await
        .unwrap()
        .call(req)
        .await
        .unwrap()
}

/// Create a space and return its id.
async fn create_space(app: &mut RouterIntoService<String>) -> String {
    let resp = send(app, json_request("POST", "/spaces", r#"{"name":"Blog"}"#)).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    body_json(resp).await["sys"]["id"].as_str().unwrap().to_string()
}

async fn create_content_type(app: &mut RouterIntoService<String>, space: &str, id: &str) {
    let resp = send(
        app,
        json_request(
            "PUT",
            &format!("/spaces/{space}/content_types/{id}"),
            r#"{"name":"Post","fields":[{"id":"title","name":"Title","type":"Symbol"}]}"#,
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
}

// --- auth ---

#[tokio::test]
async fn missing_token_returns_401() {
    let resp = app()
        .oneshot(Request::builder().uri("/spaces").body(String::new()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(resp).await;
    assert_eq!(body["sys"]["type"], "Error");
    assert_eq!(body["sys"]["id"], "AccessTokenInvalid");
}

// --- spaces ---

#[tokio::test]
async fn list_spaces_empty() {
    let resp = app().oneshot(empty("GET", "/spaces")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["sys"]["type"], "Array");
    assert_eq!(body["total"], 0);
    assert!(body["items"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn create_space_records_organization() {
    let resp = app()
        .oneshot(
            request("POST", "/spaces")
                .header("X-Contentful-Organization", "org1")
                .body(r#"{"name":"Docs"}"#.to_string())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let body = body_json(resp).await;
    assert_eq!(body["name"], "Docs");
    assert_eq!(body["sys"]["version"], 1);
    assert_eq!(body["sys"]["organization"]["sys"]["id"], "org1");
}

#[tokio::test]
async fn create_space_without_name_returns_422() {
    let resp = app().oneshot(json_request("POST", "/spaces", "{}")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn unknown_space_returns_404() {
    let resp = app().oneshot(empty("GET", "/spaces/nope/entries")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- entries ---

#[tokio::test]
async fn entry_create_requires_content_type_header() {
    let mut app = app().into_service();
    let space = create_space(&mut app).await;

    let resp = send(
        &mut app,
        json_request("POST", &format!("/spaces/{space}/entries"), r#"{"fields":{}}"#),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body_json(resp).await["sys"]["id"], "ContentTypeNotSet");

    let resp = send(
        &mut app,
        request("POST", &format!("/spaces/{space}/entries"))
            .header("X-Contentful-Content-Type", "missing")
            .body(r#"{"fields":{}}"#.to_string())
            .unwrap(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body_json(resp).await["sys"]["id"], "UnknownContentType");
}

#[tokio::test]
async fn malformed_body_returns_400() {
    let mut app = app().into_service();
    let space = create_space(&mut app).await;
    let resp = send(
        &mut app,
        json_request("POST", &format!("/spaces/{space}/content_types"), "not json"),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- full lifecycle ---

#[tokio::test]
async fn entry_lifecycle() {
    let mut app = app().into_service();
    let space = create_space(&mut app).await;
    create_content_type(&mut app, &space, "post").await;

    // publish the content type
    let resp = send(
        &mut app,
        request("PUT", &format!("/spaces/{space}/content_types/post/published"))
            .header("X-Contentful-Version", "1")
            .body(String::new())
            .unwrap(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let content_type = body_json(resp).await;
    assert_eq!(content_type["sys"]["publishedVersion"], 1);
    assert_eq!(content_type["sys"]["version"], 2);

    // create an entry
    let resp = send(
        &mut app,
        request("POST", &format!("/spaces/{space}/entries"))
            .header("X-Contentful-Content-Type", "post")
            .body(r#"{"fields":{"title":{"en-US":"Hello"}}}"#.to_string())
            .unwrap(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let entry = body_json(resp).await;
    let id = entry["sys"]["id"].as_str().unwrap().to_string();
    assert_eq!(entry["sys"]["type"], "Entry");
    assert_eq!(entry["sys"]["version"], 1);
    assert_eq!(entry["sys"]["contentType"]["sys"]["id"], "post");
    let item = format!("/spaces/{space}/entries/{id}");

    // update without a version is rejected
    let resp = send(&mut app, json_request("PUT", &item, r#"{"fields":{}}"#)).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(resp).await["sys"]["id"], "VersionMismatch");

    // update with the current version
    let resp = send(
        &mut app,
        request("PUT", &item)
            .header("X-Contentful-Version", "1")
            .body(r#"{"fields":{"title":{"en-US":"Updated"}}}"#.to_string())
            .unwrap(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let entry = body_json(resp).await;
    assert_eq!(entry["sys"]["version"], 2);
    assert_eq!(entry["fields"]["title"]["en-US"], "Updated");
    assert_eq!(entry["sys"]["contentType"]["sys"]["id"], "post");

    // list filtered by content type
    let resp = send(
        &mut app,
        empty("GET", &format!("/spaces/{space}/entries?content_type=post&skip=0&limit=1")),
    )
    .await;
    let page = body_json(resp).await;
    assert_eq!(page["total"], 1);
    assert_eq!(page["limit"], 1);
    assert_eq!(page["items"][0]["sys"]["id"], id.as_str());

    let resp = send(
        &mut app,
        empty("GET", &format!("/spaces/{space}/entries?content_type=other")),
    )
    .await;
    assert_eq!(body_json(resp).await["total"], 0);

    // archive without a version, then unarchive
    let resp = send(&mut app, empty("PUT", &format!("{item}/archived"))).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let entry = body_json(resp).await;
    assert_eq!(entry["sys"]["archivedVersion"], 2);
    assert_eq!(entry["sys"]["version"], 3);

    let resp = send(&mut app, empty("DELETE", &format!("{item}/archived"))).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_json(resp).await["sys"].get("archivedVersion").is_none());

    // unpublish something that was never published
    let resp = send(&mut app, empty("DELETE", &format!("{item}/published"))).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // delete
    let resp = send(&mut app, empty("DELETE", &item)).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert!(body_bytes(resp).await.is_empty());

    // get after delete — 404
    let resp = send(&mut app, empty("GET", &item)).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // delete again — 404
    let resp = send(&mut app, empty("DELETE", &item)).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn publish_requires_matching_version() {
    let mut app = app().into_service();
    let space = create_space(&mut app).await;
    create_content_type(&mut app, &space, "post").await;

    let resp = send(
        &mut app,
        empty("PUT", &format!("/spaces/{space}/content_types/post/published")),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let resp = send(
        &mut app,
        request("PUT", &format!("/spaces/{space}/content_types/post/published"))
            .header("X-Contentful-Version", "7")
            .body(String::new())
            .unwrap(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
}

// --- editor interfaces ---

#[tokio::test]
async fn editor_interface_defaults_and_updates() {
    let mut app = app().into_service();
    let space = create_space(&mut app).await;
    create_content_type(&mut app, &space, "post").await;
    let uri = format!("/spaces/{space}/content_types/post/editor_interfaces/default");

    let resp = send(&mut app, empty("GET", &uri)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let interface = body_json(resp).await;
    assert_eq!(interface["contentTypeId"], "post");
    assert_eq!(interface["sys"]["version"], 1);
    assert_eq!(interface["widgets"][0]["fieldId"], "title");

    let resp = send(
        &mut app,
        request("PUT", &uri)
            .header("X-Contentful-Version", "1")
            .body(r#"{"title":"Post","contentTypeId":"post","widgets":[{"id":"title","widgetId":"markdown"}]}"#.to_string())
            .unwrap(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let interface = body_json(resp).await;
    assert_eq!(interface["sys"]["version"], 2);
    assert_eq!(interface["widgets"][0]["widgetId"], "markdown");

    let resp = send(&mut app, empty("GET", &format!("/spaces/{space}/content_types/none/editor_interfaces/default"))).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
