//! Verify build/parse methods against JSON test vectors stored in `test-vectors/`.
//!
//! Each vector file describes inputs, expected requests, simulated responses,
//! and expected parse results. Request bodies are compared as parsed JSON,
//! not raw strings.

use cma_core::{CmaArray, CmaClient, CmaError, ContentType, Entry, HttpMethod, HttpRequest, HttpResponse};
use pretty_assertions::assert_eq;
use serde_json::Value;

const BASE_URL: &str = "http://localhost:3000";

fn client() -> CmaClient {
    CmaClient::new(BASE_URL, "token")
}

/// Parse the method string from test vectors into `HttpMethod`.
fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        "PUT" => HttpMethod::Put,
        "DELETE" => HttpMethod::Delete,
        other => panic!("unknown method: {other}"),
    }
}

fn pairs(value: &Value) -> Vec<(String, String)> {
    value
        .as_array()
        .unwrap()
        .iter()
        .map(|pair| {
            let pair = pair.as_array().unwrap();
            (pair[0].as_str().unwrap().to_string(), pair[1].as_str().unwrap().to_string())
        })
        .collect()
}

fn simulated(case: &Value) -> HttpResponse {
    let sim = &case["simulated_response"];
    HttpResponse {
        status: sim["status"].as_u64().unwrap() as u16,
        headers: Vec::new(),
        body: sim["body"].as_str().unwrap().to_string(),
    }
}

/// Check method, path, headers and body of a built request.
fn assert_request(name: &str, req: &HttpRequest, expected: &Value) {
    assert_eq!(req.method, parse_method(expected["method"].as_str().unwrap()), "{name}: method");
    assert_eq!(req.url, format!("{BASE_URL}{}", expected["path"].as_str().unwrap()), "{name}: path");

    if let Some(headers) = expected.get("headers") {
        for (header, value) in pairs(headers) {
            assert_eq!(req.header(&header), Some(value.as_str()), "{name}: header {header}");
        }
    }
    if let Some(absent) = expected.get("absent_headers") {
        for header in absent.as_array().unwrap() {
            let header = header.as_str().unwrap();
            assert!(req.header(header).is_none(), "{name}: header {header} should be absent");
        }
    }
    if let Some(query) = expected.get("query") {
        assert_eq!(req.query, pairs(query), "{name}: query");
    }

    match &expected["body"] {
        Value::Null => assert!(req.body.is_none(), "{name}: body should be None"),
        body => {
            let sent: Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
            assert_eq!(&sent, body, "{name}: body");
        }
    }
}

// ---------------------------------------------------------------------------
// Entries
// ---------------------------------------------------------------------------

fn build_entry_request(c: &CmaClient, case: &Value, entry: &Entry) -> Result<HttpRequest, CmaError> {
    match case["operation"].as_str().unwrap() {
        "create" => c.build_create_entry(
            case["space_id"].as_str().unwrap_or("s1"),
            case["content_type_id"].as_str().unwrap_or("post"),
            entry,
        ),
        "update" => c.build_update(entry),
        "publish" => c.build_publish(entry),
        "unpublish" => c.build_unpublish(entry),
        "archive" => c.build_archive(entry),
        "unarchive" => c.build_unarchive(entry),
        other => panic!("unknown operation: {other}"),
    }
}

#[test]
fn entry_test_vectors() {
    let raw = include_str!("../../test-vectors/entries.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let input: Entry = serde_json::from_value(case["input"].clone()).unwrap();

        // Verify build
        let req = build_entry_request(&c, case, &input).unwrap();
        assert_request(name, &req, &case["expected_request"]);

        // Verify parse
        let entry: Entry = c.parse_resource(simulated(case)).unwrap();
        let expected = &case["expected_result"];
        assert_eq!(entry.id(), expected["id"].as_str(), "{name}: id");
        assert_eq!(entry.version(), expected["version"].as_u64(), "{name}: version");
        if let Some(space_id) = expected.get("space_id") {
            assert_eq!(entry.space_id(), space_id.as_str(), "{name}: space");
        }
        if let Some(content_type_id) = expected.get("content_type_id") {
            assert_eq!(entry.content_type_id(), content_type_id.as_str(), "{name}: content type");
        }
        if let Some(published) = expected.get("published") {
            assert_eq!(entry.is_published(), published.as_bool().unwrap(), "{name}: published");
        }
        if let Some(archived) = expected.get("archived") {
            assert_eq!(entry.is_archived(), archived.as_bool().unwrap(), "{name}: archived");
        }

        // The input is never touched by a build.
        let again: Entry = serde_json::from_value(case["input"].clone()).unwrap();
        assert_eq!(input, again, "{name}: input unchanged");
    }
}

// ---------------------------------------------------------------------------
// Content types
// ---------------------------------------------------------------------------

#[test]
fn content_type_test_vectors() {
    let raw = include_str!("../../test-vectors/content_types.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let input: ContentType = serde_json::from_value(case["input"].clone()).unwrap();

        let req = match case["operation"].as_str().unwrap() {
            "create" => c.build_create(case["space_id"].as_str().unwrap(), &input),
            "update" => c.build_update(&input),
            other => panic!("unknown operation: {other}"),
        }
        .unwrap();
        assert_request(name, &req, &case["expected_request"]);

        let parsed: ContentType = c.parse_resource(simulated(case)).unwrap();
        let expected = &case["expected_result"];
        assert_eq!(parsed.id(), expected["id"].as_str(), "{name}: id");
        assert_eq!(parsed.version(), expected["version"].as_u64(), "{name}: version");
        let field_ids: Vec<&str> = parsed.fields().iter().map(|f| f.id.as_str()).collect();
        let expected_ids: Vec<&str> = expected["field_ids"]
            .as_array()
            .unwrap()
            .iter()
            .map(|id| id.as_str().unwrap())
            .collect();
        assert_eq!(field_ids, expected_ids, "{name}: field ids");
    }
}

// ---------------------------------------------------------------------------
// Fetch all
// ---------------------------------------------------------------------------

#[test]
fn fetch_all_test_vectors() {
    let raw = include_str!("../../test-vectors/fetch_all.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let query = pairs(&case["query"]);

        let req = c.build_fetch_all::<Entry, _, _, _>(case["space_id"].as_str().unwrap(), query);
        assert_request(name, &req, &case["expected_request"]);
        assert!(req.body.is_none(), "{name}: body should be None");

        let array: CmaArray<Entry> = c.parse_array(simulated(case)).unwrap();
        let expected = &case["expected_result"];
        assert_eq!(array.total, expected["total"].as_u64().unwrap(), "{name}: total");
        assert_eq!(array.skip, expected["skip"].as_u64().unwrap(), "{name}: skip");
        assert_eq!(array.limit, expected["limit"].as_u64().unwrap(), "{name}: limit");
        let ids: Vec<Option<&str>> = array.items.iter().map(Entry::id).collect();
        let expected_ids: Vec<Option<&str>> =
            expected["ids"].as_array().unwrap().iter().map(Value::as_str).collect();
        assert_eq!(ids, expected_ids, "{name}: ids");
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

fn error_kind(err: &CmaError) -> &'static str {
    match err {
        CmaError::MissingVersion { .. } => "MissingVersion",
        CmaError::MissingSpaceId { .. } => "MissingSpaceId",
        CmaError::MissingId { .. } => "MissingId",
        CmaError::MissingAttribute(_) => "MissingAttribute",
        CmaError::DraftLink => "DraftLink",
        CmaError::DuplicateField(_) => "DuplicateField",
        CmaError::NotFound { .. } => "NotFound",
        CmaError::Http { .. } => "Http",
        CmaError::Transport { .. } => "Transport",
        CmaError::Serialization(_) => "Serialization",
        CmaError::Deserialization(_) => "Deserialization",
        CmaError::Dispatch(_) => "Dispatch",
        CmaError::Config(_) => "Config",
    }
}

#[test]
fn local_error_test_vectors() {
    let raw = include_str!("../../test-vectors/errors.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["local"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let mut input: Entry = serde_json::from_value(case["input"].clone()).unwrap();
        if let Some(field) = case.get("draft_link_field").and_then(Value::as_str) {
            input.set_field(field, &Entry::new(), "en-US");
        }

        let err = build_entry_request(&c, case, &input).unwrap_err();
        assert_eq!(error_kind(&err), case["expected_error"].as_str().unwrap(), "{name}: kind");
        assert!(err.is_local(), "{name}: should be local");
        if let Some(message) = case.get("expected_message") {
            assert_eq!(err.to_string(), message.as_str().unwrap(), "{name}: message");
        }
    }
}

#[test]
fn response_error_test_vectors() {
    let raw = include_str!("../../test-vectors/errors.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["responses"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let response = simulated(case);
        let body = response.body.clone();

        let err = c.parse_resource::<Entry>(response).unwrap_err();
        assert_eq!(error_kind(&err), case["expected_error"].as_str().unwrap(), "{name}: kind");
        assert_eq!(
            err.status(),
            case.get("expected_status").and_then(Value::as_u64).map(|s| s as u16),
            "{name}: status"
        );
        if let CmaError::Http { body: kept, .. } = &err {
            assert_eq!(kept, &body, "{name}: body kept");
        }
        assert!(!err.is_local(), "{name}: should not be local");
    }
}
