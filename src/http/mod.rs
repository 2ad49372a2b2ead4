//! HTTP API for browser-driven interviews
//!
//! This module exposes interview sessions over REST:
//! - GET /interviews/:id - Interview record and format overview
//! - POST /interviews/:id/sessions - Open a session
//! - GET /sessions/:id - Current session snapshot
//! - POST /sessions/:id/{start,answers,capture,captions,advance} - Drive the session
//! - POST /sessions/:id/tracks/:kind/toggle - Toggle camera or microphone
//! - GET /sessions/:id/completion - Answers handed over at completion
//! - DELETE /sessions/:id - Leave the interview
//! - GET /health - Health check

mod error;
mod handlers;
mod routes;
mod state;

pub use error::{ApiError, ErrorResponse};
pub use routes::create_router;
pub use state::AppState;
