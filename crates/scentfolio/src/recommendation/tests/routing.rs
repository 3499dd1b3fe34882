use super::common::*;
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

use crate::recommendation::recommendation_router;

fn build_router() -> axum::Router {
    let (service, _, _) = build_service();
    recommendation_router(Arc::new(service))
}

async fn read_json_body(response: axum::response::Response) -> Value {
    let body = to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("body");
    serde_json::from_slice(&body).expect("json")
}

fn json_request(method: &str, uri: &str, user: &str, payload: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .header("x-user-id", user)
        .body(Body::from(serde_json::to_vec(payload).expect("serialize")))
        .expect("request")
}

fn empty_request(method: &str, uri: &str, user: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("x-user-id", user)
        .body(Body::empty())
        .expect("request")
}

#[tokio::test]
async fn put_preferences_roundtrips_through_get() {
    let router = build_router();
    let payload = serde_json::json!({
        "preferred_notes": ["Citrus", "Mint"],
        "disliked_notes": ["Oud"],
        "usage_contexts": ["daily"],
    });

    let response = router
        .clone()
        .oneshot(json_request("PUT", "/api/v1/preferences", "alex", &payload))
        .await
        .expect("router dispatch");
    assert_eq!(response.status(), StatusCode::OK);

    let response = router
        .oneshot(empty_request("GET", "/api/v1/preferences", "alex"))
        .await
        .expect("router dispatch");
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body.get("preferred_notes"), Some(&serde_json::json!(["Citrus", "Mint"])));
}

#[tokio::test]
async fn preferences_default_to_null_for_new_users() {
    let router = build_router();

    let response = router
        .oneshot(empty_request("GET", "/api/v1/preferences", "nobody"))
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_json_body(response).await, Value::Null);
}

#[tokio::test]
async fn post_perfume_returns_created_record() {
    let router = build_router();
    let payload = serde_json::to_value(perfume(
        "Aqua Vite",
        &["Citrus"],
        &["Mint"],
        &["Cedar"],
        "Fresh",
        Some(&["daily"]),
    ))
    .expect("serialize perfume");

    let response = router
        .oneshot(json_request("POST", "/api/v1/perfumes", "alex", &payload))
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = read_json_body(response).await;
    assert!(body.get("id").is_some());
    assert_eq!(
        body.pointer("/perfume/name").and_then(Value::as_str),
        Some("Aqua Vite")
    );
}

#[tokio::test]
async fn generate_without_preferences_is_not_found() {
    let router = build_router();

    let response = router
        .oneshot(empty_request(
            "POST",
            "/api/v1/recommendations/generate",
            "nobody",
        ))
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = read_json_body(response).await;
    assert!(body
        .get("error")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .contains("preferences"));
}

#[tokio::test]
async fn generate_flow_scores_the_whole_shelf() {
    let router = build_router();
    let preferences = serde_json::json!({
        "preferred_notes": ["Citrus", "Bergamot", "Mint"],
        "disliked_notes": ["Patchouli", "Oud"],
        "usage_contexts": ["daily", "work"],
    });
    router
        .clone()
        .oneshot(json_request("PUT", "/api/v1/preferences", "alex", &preferences))
        .await
        .expect("preferences stored");

    let entry = serde_json::to_value(perfume(
        "Aqua Vite",
        &["Citrus", "Bergamot"],
        &["Mint"],
        &["Cedar"],
        "Fresh",
        Some(&["daily", "work"]),
    ))
    .expect("serialize perfume");
    router
        .clone()
        .oneshot(json_request("POST", "/api/v1/perfumes", "alex", &entry))
        .await
        .expect("perfume stored");

    let response = router
        .clone()
        .oneshot(empty_request(
            "POST",
            "/api/v1/recommendations/generate",
            "alex",
        ))
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body.get("count").and_then(Value::as_u64), Some(1));
    let result = &body["results"][0];
    assert_eq!(result.get("verdict").and_then(Value::as_str), Some("recommend"));
    assert_eq!(result.get("score").and_then(Value::as_i64), Some(85));
    assert_eq!(result.get("rule_version").and_then(Value::as_str), Some("v1"));

    // Latest view reflects the run just generated.
    let response = router
        .oneshot(empty_request("GET", "/api/v1/recommendations", "alex"))
        .await
        .expect("router dispatch");
    assert_eq!(response.status(), StatusCode::OK);
    let listing = read_json_body(response).await;
    assert_eq!(listing.as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn import_endpoint_creates_perfumes_from_csv() {
    let router = build_router();
    let csv = "Name,Brand,Family,Mood,Top Notes,Middle Notes,Base Notes,Usage Contexts\n\
Aqua Vite,Maison Demo,Fresh,Clean,Citrus; Bergamot,Mint,Cedar,daily\n";

    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/perfumes/import")
                .header("content-type", "text/csv")
                .header("x-user-id", "alex")
                .body(Body::from(csv))
                .expect("request"),
        )
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = read_json_body(response).await;
    assert_eq!(body.get("count").and_then(Value::as_u64), Some(1));
}

#[tokio::test]
async fn import_endpoint_rejects_malformed_rows() {
    let router = build_router();
    let csv = "Name,Brand,Family,Mood,Top Notes,Middle Notes,Base Notes,Usage Contexts\n\
,Maison Demo,Fresh,Clean,Citrus,,,daily\n";

    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/perfumes/import")
                .header("content-type", "text/csv")
                .header("x-user-id", "alex")
                .body(Body::from(csv))
                .expect("request"),
        )
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn delete_perfume_returns_no_content() {
    let (service, _, _) = build_service();
    let service = Arc::new(service);
    let owner = user("alex");
    let stored = service
        .add_perfume(&owner, perfume("Bloom", &["Rose"], &[], &[], "Floral", None))
        .expect("perfume stored");
    let router = recommendation_router(service);

    let response = router
        .clone()
        .oneshot(empty_request(
            "DELETE",
            &format!("/api/v1/perfumes/{}", stored.id.0),
            "alex",
        ))
        .await
        .expect("router dispatch");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = router
        .oneshot(empty_request(
            "GET",
            &format!("/api/v1/perfumes/{}", stored.id.0),
            "alex",
        ))
        .await
        .expect("router dispatch");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn history_endpoint_lists_runs_oldest_first() {
    let (service, _, _) = build_service();
    let service = Arc::new(service);
    let owner = user("alex");
    service
        .save_preferences(&owner, profile(&["Rose"], &[], &[]))
        .expect("preferences stored");
    let stored = service
        .add_perfume(&owner, perfume("Bloom", &["Rose"], &[], &[], "Floral", None))
        .expect("perfume stored");
    service.generate(&owner).expect("first run");
    service.generate(&owner).expect("second run");

    let router = recommendation_router(service);
    let response = router
        .oneshot(empty_request(
            "GET",
            &format!("/api/v1/recommendations/{}/history", stored.id.0),
            "alex",
        ))
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    let rows = body.as_array().expect("array body");
    assert_eq!(rows.len(), 2);
}
