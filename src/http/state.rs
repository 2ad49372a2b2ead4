use crate::catalog::{default_questions, fixture_interviews, InterviewCatalog};
use crate::questions::QuestionBank;
use crate::session::{SessionConfig, SessionHandle};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Shared application state for HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Live interview sessions (session_id → handle)
    pub sessions: Arc<RwLock<HashMap<String, SessionHandle>>>,

    pub catalog: Arc<InterviewCatalog>,

    /// Question bank every new session uses
    pub questions: Arc<QuestionBank>,

    pub session_config: SessionConfig,
}

impl AppState {
    pub fn new(catalog: InterviewCatalog, questions: QuestionBank, session_config: SessionConfig) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            catalog: Arc::new(catalog),
            questions: Arc::new(questions),
            session_config,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(
            InterviewCatalog::new(fixture_interviews()),
            QuestionBank::with_limit(default_questions(), 5, 2),
            SessionConfig::default(),
        )
    }
}
