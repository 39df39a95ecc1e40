use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use super::common::*;
use crate::workflows::lending::router::match_router;

fn build_router(seed: bool) -> axum::Router {
    let (service, directory, _) = build_service();
    if seed {
        seed_roster(&directory);
    }
    match_router(Arc::new(service))
}

fn post_json(uri: &str, payload: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(payload.to_string()))
        .expect("request")
}

async fn read_json_body(response: axum::response::Response) -> Value {
    let body = to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

#[tokio::test]
async fn risk_endpoint_returns_an_assessment() {
    let router = build_router(false);
    let request = post_json(
        "/api/v1/lending/risk",
        json!({ "requested_amount": 1500.0, "capacity_ceiling": 1500.0 }),
    );

    let response = router.oneshot(request).await.expect("router dispatch");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload.get("score").and_then(Value::as_u64), Some(35));
    assert_eq!(payload.get("label").and_then(Value::as_str), Some("high"));
    assert_eq!(
        payload.get("recommendation").and_then(Value::as_str),
        Some("no")
    );
}

#[tokio::test]
async fn options_endpoint_lists_combos() {
    let router = build_router(true);
    let request = post_json(
        "/api/v1/lending/options",
        json!({
            "borrower_id": "user_borrower1",
            "requested_amount": 1500.0,
            "capacity_ceiling": 1500.0,
            "community": "princeton-nj",
        }),
    );

    let response = router.oneshot(request).await.expect("router dispatch");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    let combos = payload
        .get("combos")
        .and_then(Value::as_array)
        .expect("combos array");
    assert!(!combos.is_empty());
    let first = &combos[0];
    assert_eq!(first.get("id").and_then(Value::as_str), Some("c1"));
    assert!(first.get("parts").and_then(Value::as_array).is_some());
    // Internal bookkeeping never leaks into the payload.
    assert!(first.get("source_user_ids").is_none());
}

#[tokio::test]
async fn options_endpoint_answers_404_without_lenders() {
    let router = build_router(false);
    let request = post_json(
        "/api/v1/lending/options",
        json!({
            "borrower_id": "user_borrower1",
            "requested_amount": 500.0,
            "capacity_ceiling": 1500.0,
        }),
    );

    let response = router.oneshot(request).await.expect("router dispatch");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let payload = read_json_body(response).await;
    assert!(payload
        .get("error")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .contains("No lenders"));
}

#[tokio::test]
async fn options_endpoint_answers_422_when_the_pool_is_short() {
    let router = build_router(true);
    let request = post_json(
        "/api/v1/lending/options",
        json!({
            "borrower_id": "user_borrower1",
            "requested_amount": 50000.0,
            "capacity_ceiling": 1500.0,
        }),
    );

    let response = router.oneshot(request).await.expect("router dispatch");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let payload = read_json_body(response).await;
    assert!(payload
        .get("error")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .contains("capital"));
}

#[tokio::test]
async fn commit_and_fetch_round_trip() {
    let (service, directory, _) = build_service();
    seed_roster(&directory);
    let router = match_router(Arc::new(service));

    let response = router
        .clone()
        .oneshot(post_json(
            "/api/v1/lending/matches",
            json!({
                "borrower_id": "user_borrower1",
                "requested_amount": 1500.0,
                "capacity_ceiling": 1500.0,
            }),
        ))
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::CREATED);
    let receipt = read_json_body(response).await;
    let match_id = receipt
        .get("match_id")
        .and_then(Value::as_str)
        .expect("match id")
        .to_string();
    assert_eq!(
        receipt.get("total_amount").and_then(Value::as_f64),
        Some(1500.0)
    );
    assert_eq!(receipt.get("risk_score").and_then(Value::as_u64), Some(35));
    assert!(receipt.get("ai_advice").is_some());

    let response = router
        .oneshot(
            Request::builder()
                .method("GET")
                .uri(format!("/api/v1/lending/matches/{match_id}"))
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::OK);
    let fetched = read_json_body(response).await;
    assert_eq!(
        fetched.get("match_id").and_then(Value::as_str),
        Some(match_id.as_str())
    );
}

#[tokio::test]
async fn fetching_an_unknown_match_answers_404() {
    let router = build_router(false);

    let response = router
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/v1/lending/matches/match-999999")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn non_positive_amounts_answer_422() {
    let router = build_router(true);
    let request = post_json(
        "/api/v1/lending/options",
        json!({
            "borrower_id": "user_borrower1",
            "requested_amount": -10.0,
            "capacity_ceiling": 1500.0,
        }),
    );

    let response = router.oneshot(request).await.expect("router dispatch");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn decline_endpoint_returns_feedback() {
    let router = build_router(false);
    let request = post_json(
        "/api/v1/lending/decline",
        json!({ "requested_amount": 1500.0, "capacity_ceiling": 1500.0 }),
    );

    let response = router.oneshot(request).await.expect("router dispatch");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert!(payload
        .get("feedback")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .contains("Risk score"));
}
