use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::auth::HistoryGate;
use super::domain::ScreeningSubmission;
use super::notify::PushGateway;
use super::repository::ScreeningRepository;
use super::service::ScreeningService;

const DEFAULT_HISTORY_LIMIT: usize = 100;
const SUMMARY_WINDOW: usize = 1000;

/// Shared state behind the screening endpoints.
pub struct ScreeningApi<R, G, H> {
    pub service: Arc<ScreeningService<R, G>>,
    pub history: Arc<H>,
}

impl<R, G, H> Clone for ScreeningApi<R, G, H> {
    fn clone(&self) -> Self {
        Self {
            service: self.service.clone(),
            history: self.history.clone(),
        }
    }
}

/// Router builder exposing intake, history, summary, and history-access
/// endpoints.
pub fn screening_router<R, G, H>(api: ScreeningApi<R, G, H>) -> Router
where
    R: ScreeningRepository + 'static,
    G: PushGateway + 'static,
    H: HistoryGate + 'static,
{
    Router::new()
        .route(
            "/api/v1/screenings",
            post(submit_handler::<R, G, H>).get(history_handler::<R, G, H>),
        )
        .route(
            "/api/v1/screenings/summary",
            get(summary_handler::<R, G, H>),
        )
        .route("/api/v1/history/access", post(access_handler::<R, G, H>))
        .with_state(api)
}

#[derive(Debug, Deserialize)]
pub(crate) struct HistoryParams {
    #[serde(default)]
    limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AccessRequest {
    username: String,
    password: String,
}

/// Intake endpoint. 200 on full success, 207 when a side effect partially
/// failed (the body carries per-step detail either way), 400 for an
/// unscorable questionnaire.
pub(crate) async fn submit_handler<R, G, H>(
    State(api): State<ScreeningApi<R, G, H>>,
    axum::Json(submission): axum::Json<ScreeningSubmission>,
) -> Response
where
    R: ScreeningRepository + 'static,
    G: PushGateway + 'static,
    H: HistoryGate + 'static,
{
    match api.service.submit(submission) {
        Ok(report) => {
            let status = if report.fully_succeeded() {
                StatusCode::OK
            } else {
                StatusCode::MULTI_STATUS
            };
            (status, axum::Json(report)).into_response()
        }
        Err(error) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn history_handler<R, G, H>(
    State(api): State<ScreeningApi<R, G, H>>,
    Query(params): Query<HistoryParams>,
    headers: HeaderMap,
) -> Response
where
    R: ScreeningRepository + 'static,
    G: PushGateway + 'static,
    H: HistoryGate + 'static,
{
    let authorized = bearer_token(&headers)
        .map(|token| api.history.verify(token))
        .unwrap_or(false);
    if !authorized {
        let payload = json!({ "error": "missing or invalid capability token" });
        return (StatusCode::UNAUTHORIZED, axum::Json(payload)).into_response();
    }

    let limit = params.limit.unwrap_or(DEFAULT_HISTORY_LIMIT);
    match api.service.recent(limit) {
        Ok(rows) => {
            let views: Vec<_> = rows.iter().map(|row| row.row_view()).collect();
            (StatusCode::OK, axum::Json(views)).into_response()
        }
        Err(error) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn summary_handler<R, G, H>(
    State(api): State<ScreeningApi<R, G, H>>,
) -> Response
where
    R: ScreeningRepository + 'static,
    G: PushGateway + 'static,
    H: HistoryGate + 'static,
{
    match api.service.severity_summary(SUMMARY_WINDOW) {
        Ok(distribution) => (StatusCode::OK, axum::Json(distribution)).into_response(),
        Err(error) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn access_handler<R, G, H>(
    State(api): State<ScreeningApi<R, G, H>>,
    axum::Json(request): axum::Json<AccessRequest>,
) -> Response
where
    R: ScreeningRepository + 'static,
    G: PushGateway + 'static,
    H: HistoryGate + 'static,
{
    match api.history.issue(&request.username, &request.password) {
        Some(token) => {
            let payload = json!({ "token": token.0 });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        None => {
            let payload = json!({ "error": "invalid credentials" });
            (StatusCode::UNAUTHORIZED, axum::Json(payload)).into_response()
        }
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}
