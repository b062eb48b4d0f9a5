mod common;

use axum::{Router, routing::post};
use axum_test::TestServer;
use serde_json::json;
use sqlx::PgPool;
use url_sh::api::handlers::shorten_handler;

fn shorten_server(state: url_sh::AppState) -> TestServer {
    let app = Router::new()
        .route("/v1/shorten", post(shorten_handler))
        .with_state(state);

    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn test_shorten_rejects_relative_url() {
    let (state, _rx) = common::create_offline_state();
    let server = shorten_server(state);

    let response = server
        .post("/v1/shorten")
        .json(&json!({ "url": "not-a-url" }))
        .await;

    response.assert_status_bad_request();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "validation_error");
}

#[tokio::test]
async fn test_shorten_rejects_unknown_method() {
    let (state, _rx) = common::create_offline_state();
    let server = shorten_server(state);

    let response = server
        .post("/v1/shorten")
        .json(&json!({ "url": "https://example.com", "method": "SHORTEST" }))
        .await;

    response.assert_status_bad_request();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["message"], "invalid shortening method");
}

#[tokio::test]
async fn test_shorten_rejects_too_long_url() {
    let (state, _rx) = common::create_offline_state();
    let server = shorten_server(state);

    let url = format!("https://example.com/{}", "a".repeat(common::MAX_URL_LENGTH));
    let response = server.post("/v1/shorten").json(&json!({ "url": url })).await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn test_shorten_rejects_empty_custom_alias() {
    let (state, _rx) = common::create_offline_state();
    let server = shorten_server(state);

    let response = server
        .post("/v1/shorten")
        .json(&json!({ "url": "https://example.com", "method": "CUSTOM", "custom_alias": "" }))
        .await;

    response.assert_status_bad_request();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["message"], "custom alias cannot be empty");
}

#[sqlx::test]
async fn test_shorten_random_success(pool: PgPool) {
    let (state, _rx) = common::create_test_state(pool);
    let server = shorten_server(state);

    let response = server
        .post("/v1/shorten")
        .json(&json!({ "url": "https://example.com" }))
        .await;

    assert_eq!(response.status_code(), 201);

    let json = response.json::<serde_json::Value>();
    let code = json["short_code"].as_str().unwrap();
    assert_eq!(code.len(), 8);
    assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
    assert_eq!(json["method"], "RANDOM");
    assert_eq!(json["redirect_count"], 0);
    assert_eq!(json["short_url"], format!("{}/{code}", common::BASE_URL));
}

#[sqlx::test]
async fn test_shorten_custom_alias_conflict(pool: PgPool) {
    let (state, _rx) = common::create_test_state(pool);
    let server = shorten_server(state);

    let body = json!({ "url": "https://example.com", "method": "CUSTOM", "custom_alias": "blog" });

    let first = server.post("/v1/shorten").json(&body).await;
    assert_eq!(first.status_code(), 201);
    assert_eq!(first.json::<serde_json::Value>()["short_code"], "blog");

    let second = server.post("/v1/shorten").json(&body).await;
    assert_eq!(second.status_code(), 409);
}

#[sqlx::test]
async fn test_shorten_hash_is_idempotent(pool: PgPool) {
    let (state, _rx) = common::create_test_state(pool);
    let server = shorten_server(state);

    let body = json!({ "url": "https://example.com/article", "method": "hash" });

    let first = server.post("/v1/shorten").json(&body).await;
    let second = server.post("/v1/shorten").json(&body).await;

    assert_eq!(first.status_code(), 201);
    assert_eq!(second.status_code(), 201);

    let first = first.json::<serde_json::Value>();
    let second = second.json::<serde_json::Value>();
    assert_eq!(first["id"], second["id"]);
    assert_eq!(first["short_code"], second["short_code"]);
}

#[sqlx::test]
async fn test_shorten_stores_utm_and_expiry(pool: PgPool) {
    let (state, _rx) = common::create_test_state(pool);
    let server = shorten_server(state);

    let response = server
        .post("/v1/shorten")
        .json(&json!({
            "url": "https://example.com",
            "method": "SECURE",
            "expires_at": "2030-01-01T00:00:00Z",
            "utm_source": "newsletter",
            "utm_campaign": "launch"
        }))
        .await;

    assert_eq!(response.status_code(), 201);

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["short_code"].as_str().unwrap().len(), 12);
    assert_eq!(json["utm_source"], "newsletter");
    assert_eq!(json["utm_campaign"], "launch");
    assert!(json["expires_at"].is_string());
}

#[tokio::test]
async fn test_shorten_rejects_alias_shadowed_by_route() {
    let (state, _rx) = common::create_offline_state();
    let server = shorten_server(state);

    for alias in ["health", "find", "a/b"] {
        let response = server
            .post("/v1/shorten")
            .json(&json!({
                "url": "https://example.com",
                "method": "CUSTOM",
                "custom_alias": alias,
            }))
            .await;

        response.assert_status_bad_request();
    }
}
