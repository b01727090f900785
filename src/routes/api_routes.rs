use axum::body::Body;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::header::{CACHE_CONTROL, CONNECTION, CONTENT_TYPE};
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::errors::AppError;
use crate::models::{ChatRequest, Roadmap, RoadmapRequest};
use crate::service::relay_service::RelayService;
use crate::service::roadmap_service::generate_roadmap;

// ── Handlers ─────────────────────────────────────────────────────────────────

/// POST `/api/ai` — forwards the message upstream and streams the reply back
/// as it arrives.
pub async fn relay_handler(
    State(svc): State<RelayService>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(request) = payload.map_err(|e| AppError::MalformedRequest { message: e.body_text() })?;

    let stream = svc.open_stream(request).await?;

    Ok((
        [
            (CONTENT_TYPE, "text/event-stream"),
            (CACHE_CONTROL, "no-cache"),
            (CONNECTION, "keep-alive"),
        ],
        Body::from_stream(stream),
    )
        .into_response())
}

/// POST `/api/roadmap` — REST: lay out the roadmap for a goal as JSON
pub async fn roadmap_handler(
    payload: Result<Json<RoadmapRequest>, JsonRejection>,
) -> Result<Json<Roadmap>, AppError> {
    let Json(request) = payload.map_err(|e| AppError::MalformedRequest { message: e.body_text() })?;
    generate_roadmap(&request.goal, request.hours_per_day).map(Json)
}

/// GET `/health`
pub async fn health_handler() -> impl IntoResponse {
    "OK"
}
