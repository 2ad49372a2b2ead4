use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::machine::{Phase, PermissionStatus, Session, TrackState};
use super::timer::format_clock;
use crate::questions::Question;

/// A candidate's answer to one question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub question_id: String,

    /// Typed text, or the captions transcribed during a video question
    pub text: String,

    /// Seconds between the question being presented and the answer
    pub duration_secs: u64,

    pub captured_at: DateTime<Utc>,
}

/// Position within the current phase's questions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Progress {
    /// 1-based question number
    pub position: usize,
    pub total: usize,
    pub percent: f32,
}

impl Progress {
    pub fn new(position: usize, total: usize) -> Self {
        let percent = if total == 0 {
            0.0
        } else {
            position as f32 / total as f32 * 100.0
        };
        Self {
            position,
            total,
            percent,
        }
    }

    /// "Question 2 of 3"
    pub fn label(&self) -> String {
        format!("Question {} of {}", self.position, self.total)
    }
}

/// Interview format shown before starting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Overview {
    pub text_questions: usize,
    pub video_questions: usize,
    pub estimated_minutes: usize,
}

/// Read-only view of a session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub session_id: String,
    pub interview_id: String,
    pub phase: Phase,
    pub question: Option<Question>,
    pub progress: Option<Progress>,

    /// Revealed part of the current question
    pub transcript: String,
    pub speaking: bool,
    pub caption: String,

    /// Countdown seconds, video phase only
    pub remaining_secs: Option<u32>,
    /// Countdown as `m:ss`
    pub clock: Option<String>,

    pub permission: PermissionStatus,
    pub notice: Option<String>,
    pub tracks: TrackState,
    pub answers: Vec<Answer>,
    pub overview: Overview,
}

impl SessionSnapshot {
    pub fn of(session_id: &str, session: &Session) -> Self {
        let remaining_secs = session.remaining_secs();
        Self {
            session_id: session_id.to_string(),
            interview_id: session.interview_id().to_string(),
            phase: session.phase(),
            question: session.current_question().cloned(),
            progress: session.progress(),
            transcript: session.transcript().to_string(),
            speaking: session.is_speaking(),
            caption: session.caption().to_string(),
            remaining_secs,
            clock: remaining_secs.map(format_clock),
            permission: session.permission(),
            notice: session.notice().map(str::to_string),
            tracks: session.tracks(),
            answers: session.answers().to_vec(),
            overview: session.overview(),
        }
    }
}

/// Hand-off to the results view once an interview is completed
///
/// Carries the answers only; any score shown on the results view comes from
/// the interview record, not from these answers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Completion {
    pub interview_id: String,
    pub answers: Vec<Answer>,
    pub results_path: String,
}
