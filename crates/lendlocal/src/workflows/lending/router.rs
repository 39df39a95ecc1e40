use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{FundingRequest, MatchId};
use super::engine::MatchingError;
use super::repository::{LenderDirectory, MatchRepository};
use super::service::{LendingServiceError, LoanMatchingService};

/// Router builder exposing the matching operations over HTTP.
pub fn match_router<D, R>(service: Arc<LoanMatchingService<D, R>>) -> Router
where
    D: LenderDirectory + 'static,
    R: MatchRepository + 'static,
{
    Router::new()
        .route("/api/v1/lending/risk", post(risk_handler::<D, R>))
        .route("/api/v1/lending/options", post(options_handler::<D, R>))
        .route("/api/v1/lending/matches", post(commit_handler::<D, R>))
        .route(
            "/api/v1/lending/matches/:match_id",
            get(receipt_handler::<D, R>),
        )
        .route("/api/v1/lending/decline", post(decline_handler::<D, R>))
        .with_state(service)
}

/// A quote with no amount yet scores as a zero request; that default is
/// caller policy, the engine itself always receives an explicit value.
#[derive(Debug, Deserialize)]
pub(crate) struct RiskQuoteRequest {
    #[serde(default)]
    pub(crate) requested_amount: f64,
    pub(crate) capacity_ceiling: f64,
}

pub(crate) async fn risk_handler<D, R>(
    State(service): State<Arc<LoanMatchingService<D, R>>>,
    axum::Json(quote): axum::Json<RiskQuoteRequest>,
) -> Response
where
    D: LenderDirectory + 'static,
    R: MatchRepository + 'static,
{
    let assessment = service.quote_risk(quote.requested_amount, quote.capacity_ceiling);
    (StatusCode::OK, axum::Json(assessment)).into_response()
}

pub(crate) async fn options_handler<D, R>(
    State(service): State<Arc<LoanMatchingService<D, R>>>,
    axum::Json(request): axum::Json<FundingRequest>,
) -> Response
where
    D: LenderDirectory + 'static,
    R: MatchRepository + 'static,
{
    match service.borrow_options(&request) {
        Ok(combos) => (StatusCode::OK, axum::Json(json!({ "combos": combos }))).into_response(),
        Err(error) => service_error_response(error),
    }
}

pub(crate) async fn commit_handler<D, R>(
    State(service): State<Arc<LoanMatchingService<D, R>>>,
    axum::Json(request): axum::Json<FundingRequest>,
) -> Response
where
    D: LenderDirectory + 'static,
    R: MatchRepository + 'static,
{
    match service.commit_match(&request) {
        Ok(record) => (StatusCode::CREATED, axum::Json(record.receipt())).into_response(),
        Err(error) => service_error_response(error),
    }
}

pub(crate) async fn receipt_handler<D, R>(
    State(service): State<Arc<LoanMatchingService<D, R>>>,
    Path(match_id): Path<String>,
) -> Response
where
    D: LenderDirectory + 'static,
    R: MatchRepository + 'static,
{
    let id = MatchId(match_id);
    match service.get_match(&id) {
        Ok(record) => (StatusCode::OK, axum::Json(record.receipt())).into_response(),
        Err(LendingServiceError::Repository(super::repository::RepositoryError::NotFound)) => {
            let payload = json!({ "error": "Match not found." });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(other) => service_error_response(other),
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct DeclineRequest {
    #[serde(default)]
    pub(crate) requested_amount: f64,
    pub(crate) capacity_ceiling: f64,
}

pub(crate) async fn decline_handler<D, R>(
    State(service): State<Arc<LoanMatchingService<D, R>>>,
    axum::Json(request): axum::Json<DeclineRequest>,
) -> Response
where
    D: LenderDirectory + 'static,
    R: MatchRepository + 'static,
{
    let feedback = service.decline_guidance(request.requested_amount, request.capacity_ceiling);
    (StatusCode::OK, axum::Json(json!({ "feedback": feedback }))).into_response()
}

fn service_error_response(error: LendingServiceError) -> Response {
    match error {
        LendingServiceError::NoEligibleLenders => {
            let payload = json!({
                "error": "No lenders available in your community yet.",
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        LendingServiceError::Matching(MatchingError::InsufficientCapital) => {
            let payload = json!({
                "error": "Community pool does not have enough capital to fulfill this request.",
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        LendingServiceError::Matching(error @ MatchingError::NonPositiveAmount { .. }) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        other => {
            let payload = json!({ "error": other.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
