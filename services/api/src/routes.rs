use axum::body::Bytes;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use serde_json::json;
use tracing::warn;

use mindcheck::screening::notify::webhook::{self, WebhookPayload};
use mindcheck::screening::{screening_router, HistoryGate, PushGateway, ScreeningApi, ScreeningRepository};

use crate::infra::AppState;

pub(crate) fn with_screening_routes<R, G, H>(api: ScreeningApi<R, G, H>) -> axum::Router
where
    R: ScreeningRepository + 'static,
    G: PushGateway + 'static,
    H: HistoryGate + 'static,
{
    screening_router(api)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/line/webhook",
            axum::routing::post(line_webhook_endpoint),
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

/// LINE webhook receiver. Always answers 200 (LINE retries anything else)
/// and only logs what it sees; the interesting part is surfacing group ids
/// during channel setup.
pub(crate) async fn line_webhook_endpoint(
    Extension(state): Extension<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Json<serde_json::Value> {
    let signature = headers
        .get("x-line-signature")
        .and_then(|value| value.to_str().ok());

    if !state.webhook.verify(signature, &body) {
        warn!("discarding webhook call that failed verification");
        return Json(json!({ "success": true }));
    }

    match serde_json::from_slice::<WebhookPayload>(&body) {
        Ok(payload) => webhook::log_event_sources(&payload),
        Err(err) => warn!(error = %err, "webhook body is not a LINE event payload"),
    }

    Json(json!({ "success": true }))
}
