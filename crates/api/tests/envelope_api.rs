//! Integration tests for the HTTP surface: every route answers with an
//! envelope, with HTTP 200 and the semantic status in `code`.

mod common;

use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{Request, StatusCode};
use serde_json::json;
use tower::ServiceExt;

use common::{build_test_app, get, into_json, post_json};

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

#[tokio::test]
async fn health_returns_successful_envelope() {
    let (status, json) = get(build_test_app(), "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["code"], 200);
    assert_eq!(json["message"], "ok");
    assert_eq!(json["meta"]["version"], env!("CARGO_PKG_VERSION"));
    assert!(json.get("data").is_none());
}

#[tokio::test]
async fn envelope_is_json_with_request_id() {
    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let response = build_test_app().oneshot(request).await.unwrap();

    assert_eq!(
        response.headers().get(CONTENT_TYPE).unwrap(),
        "application/json"
    );
    assert!(response.headers().contains_key("x-request-id"));
}

// ---------------------------------------------------------------------------
// Echo
// ---------------------------------------------------------------------------

#[tokio::test]
async fn echo_wraps_body_as_data() {
    let (status, json) = post_json(
        build_test_app(),
        "/api/v1/echo",
        r#"{"user_name": "ada", "tags": ["a"]}"#,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json,
        json!({"code": 200, "message": "OK", "data": {"user_name": "ada", "tags": ["a"]}})
    );
}

#[tokio::test]
async fn echo_camel_cases_keys() {
    let (_, json) = post_json(
        build_test_app(),
        "/api/v1/echo?camel=true",
        r#"{"user_info": {"first_name": "Ada"}}"#,
    )
    .await;

    assert_eq!(json["data"], json!({"userInfo": {"firstName": "Ada"}}));
}

#[tokio::test]
async fn echo_standard_list() {
    let (_, json) = post_json(build_test_app(), "/api/v1/echo?std=true&list=true", "[1,2,3]").await;

    assert_eq!(
        json,
        json!({"code": 200, "message": "OK", "data": {"list": [1, 2, 3]}})
    );
}

#[tokio::test]
async fn echo_null_body_has_no_data() {
    let (_, json) = post_json(build_test_app(), "/api/v1/echo", "null").await;

    assert_eq!(json, json!({"code": 200, "message": "OK"}));
}

#[tokio::test]
async fn malformed_json_becomes_validation_envelope() {
    let (status, json) = post_json(build_test_app(), "/api/v1/echo", "{not json").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["code"], 400);
    assert!(json["message"]
        .as_str()
        .unwrap()
        .starts_with("Failed to parse the request body as JSON"));
}

#[tokio::test]
async fn missing_content_type_becomes_415_envelope() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/echo")
        .body(Body::from("{}"))
        .unwrap();
    let (_, json) = into_json(build_test_app().oneshot(request).await.unwrap()).await;

    assert_eq!(json["code"], 415);
    assert!(!json["message"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn bad_query_becomes_400_envelope() {
    let (_, json) = post_json(build_test_app(), "/api/v1/echo?std=maybe", "{}").await;

    assert_eq!(json["code"], 400);
}

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

#[tokio::test]
async fn client_error_code_and_message_pass_through() {
    let (status, json) = get(build_test_app(), "/api/v1/status/409?message=duplicate%20name").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({"code": 409, "message": "duplicate name"}));
}

#[tokio::test]
async fn missing_message_falls_back_to_registry() {
    let (_, json) = get(build_test_app(), "/api/v1/status/404").await;

    assert_eq!(json, json!({"code": 404, "message": "Not Found"}));
}

#[tokio::test]
async fn server_error_code_passes_through() {
    let (_, json) = get(build_test_app(), "/api/v1/status/503?message=Maintenance").await;

    assert_eq!(json["code"], 503);
    assert_eq!(json["message"], "Maintenance");
    assert!(json.get("debug").is_none());
}

#[tokio::test]
async fn non_positive_code_becomes_500() {
    let (_, json) = get(build_test_app(), "/api/v1/status/-7?message=odd").await;

    assert_eq!(json["code"], 500);
}

#[tokio::test]
async fn success_code_answers_without_failure() {
    let (_, json) = get(build_test_app(), "/api/v1/status/202").await;

    assert_eq!(json, json!({"code": 202, "message": "Accepted"}));
}

#[tokio::test]
async fn non_numeric_code_is_a_path_validation_failure() {
    let (_, json) = get(build_test_app(), "/api/v1/status/abc").await;

    assert_eq!(json["code"], 400);
}

// ---------------------------------------------------------------------------
// Sequence (pagination)
// ---------------------------------------------------------------------------

#[tokio::test]
async fn sequence_lifts_pagination_into_meta() {
    let (_, json) = get(build_test_app(), "/api/v1/sequence?page=2&per_page=2&total=5").await;

    assert_eq!(
        json["data"],
        json!([
            {"position": 3, "is_even": false},
            {"position": 4, "is_even": true}
        ])
    );
    assert_eq!(
        json["meta"]["pagination"],
        json!({"current_page": 2, "from": 3, "last_page": 3, "per_page": 2, "total": 5})
    );
}

#[tokio::test]
async fn sequence_standard_format() {
    let (_, json) = get(
        build_test_app(),
        "/api/v1/sequence?page=3&per_page=2&total=5&std=true",
    )
    .await;

    assert_eq!(
        json["data"],
        json!({
            "page": {"currentPage": 3, "from": 5, "lastPage": 3, "perPage": 2, "total": 5},
            "list": [{"position": 5, "isEven": false}]
        })
    );
    assert!(json.get("meta").is_none());
}

#[tokio::test]
async fn sequence_past_the_end_is_empty() {
    let (_, json) = get(build_test_app(), "/api/v1/sequence?page=9&per_page=10&total=5").await;

    assert_eq!(json["data"], json!([]));
    assert_eq!(json["meta"]["pagination"]["from"], serde_json::Value::Null);
}

// ---------------------------------------------------------------------------
// Fallbacks
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unknown_route_returns_not_found_envelope() {
    let (status, json) = get(build_test_app(), "/api/v1/nope").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({"code": 404, "message": "Not Found"}));
}

#[tokio::test]
async fn wrong_method_returns_method_not_allowed_envelope() {
    let (_, json) = post_json(build_test_app(), "/health", "{}").await;

    assert_eq!(json, json!({"code": 405, "message": "Method Not Allowed"}));
}
