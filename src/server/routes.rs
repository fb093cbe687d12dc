//! HTTP surface of the dashboard API.
//!
//! JSON in, JSON out. Command endpoints return a confirmation message;
//! the stream endpoint pushes each published snapshot as a server-sent
//! event. Analysis failures map to an error object rather than a bare
//! status line so the dashboard can show something useful.

use std::convert::Infallible;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::routing::{get, post};
use serde::{Deserialize, Serialize};
use tokio_stream::wrappers::WatchStream;
use tokio_stream::{Stream, StreamExt};
use tracing::{info, warn};

use super::AppState;
use crate::analysis::{AnalysisReport, AnalysisRequest};
use crate::engine::snapshot::{AttackKind, LogEntry, Snapshot};
use crate::error::AnalysisError;

/// Full queryable state: latest snapshot plus the chart windows.
#[derive(Debug, Clone, Serialize)]
pub struct StateView {
    pub snapshot: Snapshot,
    pub cpu_history: Vec<f64>,
    pub entropy_history: Vec<f64>,
    pub active_attack: Option<AttackKind>,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

#[derive(Debug, Deserialize)]
struct AttackRequest {
    #[serde(rename = "type")]
    kind: AttackKind,
}

#[derive(Debug, Serialize)]
struct CommandResponse {
    message: String,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

/// Builds the dashboard router.
pub fn router(state: AppState) -> axum::Router {
    axum::Router::new()
        .route("/healthz", get(health))
        .route("/api/state", get(get_state))
        .route("/api/stream", get(stream))
        .route("/api/logs", get(get_logs))
        .route("/api/attack", post(post_attack))
        .route("/api/defense", post(post_defense))
        .route("/api/analyze", post(post_analyze))
        .with_state(state)
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn get_state(State(state): State<AppState>) -> Json<StateView> {
    Json(state.state_view())
}

async fn get_logs(State(state): State<AppState>) -> Json<Vec<LogEntry>> {
    Json(state.recent_logs())
}

/// Streams each published snapshot as an SSE `data:` line of JSON.
///
/// The watch stream yields the current snapshot immediately, so a new
/// subscriber paints without waiting for the next tick.
async fn stream(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let stream = WatchStream::new(state.subscribe()).map(|snapshot| {
        let event = match Event::default().json_data(&snapshot) {
            Ok(event) => event,
            Err(e) => {
                warn!(error = %e, "snapshot failed to serialize for SSE");
                Event::default().data("{}")
            }
        };
        Ok(event)
    });
    Sse::new(stream).keep_alive(KeepAlive::default())
}

async fn post_attack(
    State(state): State<AppState>,
    Json(request): Json<AttackRequest>,
) -> Json<CommandResponse> {
    info!(kind = %request.kind, "attack injection requested");
    Json(CommandResponse {
        message: state.inject(request.kind),
    })
}

async fn post_defense(State(state): State<AppState>) -> Json<CommandResponse> {
    info!("countermeasure requested");
    Json(CommandResponse {
        message: state.defend(),
    })
}

/// Forwards a telemetry bundle to the configured analyst.
///
/// Malformed upstream content never reaches this branch (the analyst
/// degrades it to a default report); only uplink failures do.
async fn post_analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalysisRequest>,
) -> Result<Json<AnalysisReport>, (StatusCode, Json<ErrorBody>)> {
    match state.analyst().analyze(&request).await {
        Ok(report) => {
            crate::observability::metrics::record_analysis_request("ok");
            Ok(Json(report))
        }
        Err(err) => {
            warn!(error = %err, "analysis uplink failed");
            crate::observability::metrics::record_analysis_request("error");
            let (status, details) = match &err {
                AnalysisError::UpstreamStatus { status, body } => (
                    StatusCode::BAD_GATEWAY,
                    Some(format!("upstream returned {status}: {body}")),
                ),
                AnalysisError::Uplink(_) | AnalysisError::MalformedResponse(_) => {
                    (StatusCode::INTERNAL_SERVER_ERROR, Some(err.to_string()))
                }
            };
            Err((
                status,
                Json(ErrorBody {
                    error: "AI analysis failed".to_string(),
                    details,
                }),
            ))
        }
    }
}
