use super::error::ApiError;
use super::state::AppState;
use crate::capture::{ReportedCaptureSource, TrackKind};
use crate::catalog::Interview;
use crate::questions::Subset;
use crate::session::{
    Completion, InterviewSession, Overview, SessionError, SessionHandle, SessionSnapshot,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct InterviewResponse {
    pub interview: Interview,
    pub overview: Overview,
}

#[derive(Debug, Deserialize)]
pub struct AnswerRequest {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct CaptureReport {
    /// Whether the browser obtained camera + microphone access
    pub granted: bool,

    /// Browser error message when access was refused
    pub reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CaptionRequest {
    pub text: String,
}

// ============================================================================
// Handlers
// ============================================================================

async fn session_handle(state: &AppState, session_id: &str) -> Result<SessionHandle, ApiError> {
    let sessions = state.sessions.read().await;
    sessions
        .get(session_id)
        .cloned()
        .ok_or_else(|| ApiError::SessionNotFound(session_id.to_string()))
}

/// GET /interviews/:interview_id
/// Interview record plus the format shown on the intro screen
pub async fn get_interview(
    State(state): State<AppState>,
    Path(interview_id): Path<String>,
) -> Result<Json<InterviewResponse>, ApiError> {
    let interview = state.catalog.find(&interview_id)?.clone();
    let overview = Overview {
        text_questions: state.questions.len_of(Subset::Text),
        video_questions: state.questions.len_of(Subset::Video),
        estimated_minutes: state.questions.estimated_minutes(),
    };

    Ok(Json(InterviewResponse {
        interview,
        overview,
    }))
}

/// POST /interviews/:interview_id/sessions
/// Open a new session on the intro screen
pub async fn create_session(
    State(state): State<AppState>,
    Path(interview_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let interview = state.catalog.find(&interview_id)?;

    let session = InterviewSession::new(
        interview,
        state.questions.clone(),
        state.session_config.clone(),
    );
    let handle = SessionHandle::spawn(session);
    let snapshot = handle.snapshot().await?;

    {
        let mut sessions = state.sessions.write().await;
        sessions.insert(handle.id().to_string(), handle);
    }

    info!(
        "Opened session {} for interview {}",
        snapshot.session_id, interview_id
    );

    Ok((StatusCode::CREATED, Json(snapshot)))
}

/// GET /sessions/:session_id
pub async fn get_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<SessionSnapshot>, ApiError> {
    let handle = session_handle(&state, &session_id).await?;
    Ok(Json(handle.snapshot().await?))
}

/// POST /sessions/:session_id/start
pub async fn start_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<SessionSnapshot>, ApiError> {
    let handle = session_handle(&state, &session_id).await?;
    Ok(Json(handle.start().await?))
}

/// POST /sessions/:session_id/answers
/// Submit the typed answer for the current text question
pub async fn submit_answer(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(req): Json<AnswerRequest>,
) -> Result<Json<SessionSnapshot>, ApiError> {
    let handle = session_handle(&state, &session_id).await?;
    Ok(Json(handle.submit(req.text).await?))
}

/// POST /sessions/:session_id/capture
/// Report the outcome of the browser's camera + microphone request
pub async fn report_capture(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(report): Json<CaptureReport>,
) -> Result<Json<SessionSnapshot>, ApiError> {
    let handle = session_handle(&state, &session_id).await?;

    let source = if report.granted {
        ReportedCaptureSource::granted()
    } else {
        ReportedCaptureSource::denied(report.reason)
    };

    let snapshot = handle
        .request_capture(Box::new(source))
        .await
        .map_err(|e| {
            warn!("Session {}: capture not granted: {}", session_id, e);
            e
        })?;

    Ok(Json(snapshot))
}

/// POST /sessions/:session_id/captions
/// Append transcribed speech to the current video answer
pub async fn add_caption(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(req): Json<CaptionRequest>,
) -> Result<Json<SessionSnapshot>, ApiError> {
    let handle = session_handle(&state, &session_id).await?;
    Ok(Json(handle.caption(req.text).await?))
}

/// POST /sessions/:session_id/advance
/// Move past the current video question
pub async fn advance(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<SessionSnapshot>, ApiError> {
    let handle = session_handle(&state, &session_id).await?;
    Ok(Json(handle.advance().await?))
}

/// POST /sessions/:session_id/tracks/:kind/toggle
pub async fn toggle_track(
    State(state): State<AppState>,
    Path((session_id, kind)): Path<(String, TrackKind)>,
) -> Result<Json<SessionSnapshot>, ApiError> {
    let handle = session_handle(&state, &session_id).await?;
    Ok(Json(handle.toggle(kind).await?))
}

/// GET /sessions/:session_id/completion
pub async fn get_completion(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<Completion>, ApiError> {
    let handle = session_handle(&state, &session_id).await?;
    match handle.completion().await? {
        Some(completion) => Ok(Json(completion)),
        None => Err(ApiError::NotCompleted(handle.interview_id().to_string())),
    }
}

/// DELETE /sessions/:session_id
/// Leave the interview; the session is torn down
pub async fn delete_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let handle = {
        let mut sessions = state.sessions.write().await;
        sessions.remove(&session_id)
    };

    let handle = handle.ok_or_else(|| ApiError::SessionNotFound(session_id.clone()))?;

    match handle.abandon().await {
        Ok(_) | Err(SessionError::Rejected(_)) => {}
        Err(e) => return Err(e.into()),
    }

    info!("Closed session {}", session_id);

    Ok(StatusCode::NO_CONTENT)
}

/// GET /health
/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
