//! HTTP request handlers

use super::types::{ErrorResponse, TopicListResponse};
use super::AppState;
use crate::conversation::FollowUp;
use crate::llm::Turn;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};

const LLM_CONNECTION_PROBLEM: &str = "Problem connecting to LLM. Check log for errors.";
const CAUSES_FIRST: &str = "You must request causes _before_ you request more info.";

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(list_topics))
        .route("/causes/:topic", get(request_causes))
        .route("/causes/:topic/elaborate", get(elaborate))
        .route("/causes/:topic/explain_better", get(explain_better))
        .route("/causes/:topic/wtf", get(wtf))
        .route("/causes/:topic/sat_form", get(sat_form))
        .route("/causes/:topic/full_history", get(full_history))
        .with_state(state)
}

// ============================================================
// Listing
// ============================================================

async fn list_topics(State(state): State<AppState>) -> Json<TopicListResponse> {
    Json(TopicListResponse {
        available_effects: state.registry.topics().await,
    })
}

// ============================================================
// Causes
// ============================================================

/// Always starts over: any existing conversation for the topic is replaced.
async fn request_causes(
    State(state): State<AppState>,
    Path(topic): Path<String>,
) -> Result<Json<String>, AppError> {
    tracing::info!(topic = %topic, "Causes requested");

    let handle = state.registry.reset(&topic).await;
    let mut conversation = handle.lock().await;
    let answer = conversation.request_causes().await;

    match answer {
        Some(text) if conversation.is_connected() => Ok(Json(text)),
        _ => {
            tracing::warn!(
                topic = %topic,
                configured = conversation.is_configured(),
                "Causes request failed"
            );
            Err(AppError::NotFound(LLM_CONNECTION_PROBLEM.to_string()))
        }
    }
}

// ============================================================
// Follow-ups
// ============================================================

async fn elaborate(
    State(state): State<AppState>,
    Path(topic): Path<String>,
) -> Result<Json<Option<String>>, AppError> {
    follow_up(&state, &topic, FollowUp::Elaborate).await
}

async fn explain_better(
    State(state): State<AppState>,
    Path(topic): Path<String>,
) -> Result<Json<Option<String>>, AppError> {
    follow_up(&state, &topic, FollowUp::ExplainSimpler).await
}

async fn wtf(
    State(state): State<AppState>,
    Path(topic): Path<String>,
) -> Result<Json<Option<String>>, AppError> {
    follow_up(&state, &topic, FollowUp::Challenge).await
}

async fn sat_form(
    State(state): State<AppState>,
    Path(topic): Path<String>,
) -> Result<Json<Option<String>>, AppError> {
    follow_up(&state, &topic, FollowUp::InverseForm).await
}

/// Unknown topics are an error; a disconnected conversation yields `null`.
async fn follow_up(
    state: &AppState,
    topic: &str,
    kind: FollowUp,
) -> Result<Json<Option<String>>, AppError> {
    let handle = state
        .registry
        .get(topic)
        .await
        .ok_or_else(|| AppError::NotFound(CAUSES_FIRST.to_string()))?;

    let mut conversation = handle.lock().await;
    tracing::info!(topic = %conversation.topic(), follow_up = kind.name(), "Follow-up requested");
    let answer = match kind {
        FollowUp::Elaborate => conversation.elaborate().await,
        FollowUp::ExplainSimpler => conversation.explain_simpler().await,
        FollowUp::Challenge => conversation.challenge().await,
        FollowUp::InverseForm => conversation.inverse_form().await,
    };
    Ok(Json(answer))
}

// ============================================================
// History
// ============================================================

async fn full_history(
    State(state): State<AppState>,
    Path(topic): Path<String>,
) -> Json<Vec<Turn>> {
    Json(state.registry.history(&topic).await)
}

// ============================================================
// Error Handling
// ============================================================

enum AppError {
    NotFound(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
        };

        let body = Json(ErrorResponse::new(message));
        (status, body).into_response()
    }
}
