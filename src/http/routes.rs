use super::handlers;
use super::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Create the HTTP router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Interview catalog
        .route("/interviews/:interview_id", get(handlers::get_interview))
        .route(
            "/interviews/:interview_id/sessions",
            post(handlers::create_session),
        )
        // Session control
        .route(
            "/sessions/:session_id",
            get(handlers::get_session).delete(handlers::delete_session),
        )
        .route("/sessions/:session_id/start", post(handlers::start_session))
        .route("/sessions/:session_id/answers", post(handlers::submit_answer))
        .route("/sessions/:session_id/capture", post(handlers::report_capture))
        .route("/sessions/:session_id/captions", post(handlers::add_caption))
        .route("/sessions/:session_id/advance", post(handlers::advance))
        .route(
            "/sessions/:session_id/tracks/:kind/toggle",
            post(handlers::toggle_track),
        )
        .route(
            "/sessions/:session_id/completion",
            get(handlers::get_completion),
        )
        // Browser clients talk to this API from another origin
        .layer(CorsLayer::permissive())
        // Add tracing middleware for request logging
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
