use crate::infra::AppState;
use axum::extract::Query;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

use lendlocal::config::LendingDefaults;
use lendlocal::workflows::lending::outlook::{
    borrower_outlook, lender_outlook, BorrowerOutlook, LenderOutlook,
};
use lendlocal::workflows::lending::{
    match_router, LenderDirectory, LoanMatchingService, MatchRepository,
};

/// Dashboard fallback when a borrower has no active request amount yet.
const FALLBACK_ACTIVE_REQUEST: f64 = 200.0;

pub(crate) fn with_lending_routes<D, R>(service: Arc<LoanMatchingService<D, R>>) -> axum::Router
where
    D: LenderDirectory + 'static,
    R: MatchRepository + 'static,
{
    match_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/lending/outlook/borrower",
            axum::routing::get(borrower_outlook_endpoint),
        )
        .route(
            "/api/v1/lending/outlook/lender",
            axum::routing::get(lender_outlook_endpoint),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

#[derive(Debug, Deserialize)]
pub(crate) struct BorrowerOutlookParams {
    pub(crate) requested_amount: Option<f64>,
}

pub(crate) async fn borrower_outlook_endpoint(
    Extension(defaults): Extension<LendingDefaults>,
    Query(params): Query<BorrowerOutlookParams>,
) -> Json<BorrowerOutlook> {
    let amount = params.requested_amount.unwrap_or(FALLBACK_ACTIVE_REQUEST);
    Json(borrower_outlook(amount, defaults.bank_avg_rate))
}

#[derive(Debug, Deserialize)]
pub(crate) struct LenderOutlookParams {
    pub(crate) capital: Option<f64>,
}

pub(crate) async fn lender_outlook_endpoint(
    Extension(defaults): Extension<LendingDefaults>,
    Query(params): Query<LenderOutlookParams>,
) -> Json<LenderOutlook> {
    let capital = params
        .capital
        .unwrap_or(defaults.default_capacity_ceiling);
    Json(lender_outlook(capital))
}
