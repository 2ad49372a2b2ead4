//! Interview session state machine
//!
//! [`Session::apply`] is the only way session state changes. It takes the
//! session by value together with an [`Event`] and returns the next session
//! plus the [`Effect`]s the caller must carry out (start or cancel tasks,
//! release capture, hand over answers). Nothing in here touches timers or
//! devices, so every transition can be exercised without a runtime.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

use super::config::SessionConfig;
use super::snapshot::{Answer, Overview, Progress};
use super::timer::{Countdown, CountdownTick};
use crate::capture::TrackKind;
use crate::questions::{Question, QuestionBank, Subset};

/// Notice shown when camera/microphone access is refused
pub const DENIAL_NOTICE: &str = "Camera and microphone access is required for the video interview.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Phase {
    Intro,
    TextPhase,
    VideoPermission,
    VideoPhase,
    Completed,
    Abandoned,
}

impl Phase {
    pub fn is_terminal(self) -> bool {
        matches!(self, Phase::Completed | Phase::Abandoned)
    }

    /// Question subset answered in this phase
    pub fn subset(self) -> Option<Subset> {
        match self {
            Phase::TextPhase => Some(Subset::Text),
            Phase::VideoPhase => Some(Subset::Video),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionStatus {
    Unrequested,
    Granted,
    Denied,
}

/// Enabled flags of the capture tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TrackState {
    pub video: bool,
    pub audio: bool,
}

impl TrackState {
    fn get(&self, kind: TrackKind) -> bool {
        match kind {
            TrackKind::Video => self.video,
            TrackKind::Audio => self.audio,
        }
    }

    fn set(&mut self, kind: TrackKind, enabled: bool) {
        match kind {
            TrackKind::Video => self.video = enabled,
            TrackKind::Audio => self.audio = enabled,
        }
    }
}

/// Inputs to the state machine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Leave the intro screen
    Start,
    /// Typed answer for the current text question
    Submit { text: String },
    /// Host granted camera + microphone
    CaptureGranted,
    /// Host refused camera + microphone
    CaptureDenied { reason: String },
    /// Transcribed speech for the current video question
    Caption { text: String },
    /// Move past the current video question
    Advance,
    ToggleTrack(TrackKind),
    /// Candidate left the interview
    Abandon,
    RevealProgress { epoch: u64, text: String },
    RevealFinished { epoch: u64 },
    Tick { epoch: u64 },
}

/// Work the caller performs after a transition, in order
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Start revealing `text` after `delay`, replacing any running reveal
    BeginReveal {
        epoch: u64,
        text: String,
        delay: Duration,
    },
    CancelReveal,
    /// Start the countdown ticker, replacing any running one
    StartCountdown { epoch: u64 },
    StopCountdown,
    ReleaseCapture,
    SetTrack { kind: TrackKind, enabled: bool },
    /// Blocking message for the candidate
    Notice(String),
    /// Interview finished with these answers
    Completed(Vec<Answer>),
}

/// Why an event was not applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Guard {
    #[error("answer is empty")]
    EmptyAnswer,
    #[error("the question is still being asked")]
    StillSpeaking,
    #[error("not allowed during {0:?}")]
    WrongPhase(Phase),
    #[error("event from a superseded task")]
    Stale,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    Ignored(Guard),
}

impl Outcome {
    pub fn is_applied(self) -> bool {
        matches!(self, Outcome::Applied)
    }
}

/// Result of [`Session::apply`]
#[derive(Debug)]
pub struct Step {
    pub session: Session,
    pub effects: Vec<Effect>,
    pub outcome: Outcome,
}

/// One candidate's progress through an interview
#[derive(Debug, Clone)]
pub struct Session {
    interview_id: String,
    config: SessionConfig,
    bank: Arc<QuestionBank>,
    phase: Phase,
    /// Index into the current phase's question subset
    index: usize,
    answers: Vec<Answer>,
    countdown: Countdown,
    permission: PermissionStatus,
    /// Revealed part of the current question
    transcript: String,
    speaking: bool,
    /// Transcribed answer for the current video question
    caption: String,
    notice: Option<String>,
    tracks: TrackState,
    reveal_epoch: u64,
    timer_epoch: u64,
    presented_at: Option<DateTime<Utc>>,
}

impl Session {
    pub fn new(interview_id: impl Into<String>, bank: Arc<QuestionBank>, config: SessionConfig) -> Self {
        let countdown = Countdown::new(config.countdown_ceiling_secs);
        Self {
            interview_id: interview_id.into(),
            config,
            bank,
            phase: Phase::Intro,
            index: 0,
            answers: Vec::new(),
            countdown,
            permission: PermissionStatus::Unrequested,
            transcript: String::new(),
            speaking: false,
            caption: String::new(),
            notice: None,
            tracks: TrackState::default(),
            reveal_epoch: 0,
            timer_epoch: 0,
            presented_at: None,
        }
    }

    /// Apply `event` observed at `at`
    ///
    /// An ignored event leaves the session untouched and yields no effects.
    pub fn apply(mut self, event: Event, at: DateTime<Utc>) -> Step {
        let mut effects = Vec::new();
        let outcome = match self.handle(event, at, &mut effects) {
            Ok(()) => Outcome::Applied,
            Err(guard) => {
                debug!("Ignored event in {:?}: {}", self.phase, guard);
                effects.clear();
                Outcome::Ignored(guard)
            }
        };

        Step {
            session: self,
            effects,
            outcome,
        }
    }

    fn handle(&mut self, event: Event, at: DateTime<Utc>, effects: &mut Vec<Effect>) -> Result<(), Guard> {
        match event {
            Event::Start => {
                self.expect_phase(Phase::Intro)?;
                info!("Interview {} started", self.interview_id);

                if self.bank.len_of(Subset::Text) == 0 {
                    self.enter_video_permission(effects);
                } else {
                    self.phase = Phase::TextPhase;
                    self.index = 0;
                    self.present(at, Duration::ZERO, effects);
                }
            }

            Event::Submit { text } => {
                self.expect_phase(Phase::TextPhase)?;
                if self.speaking {
                    return Err(Guard::StillSpeaking);
                }
                if text.trim().is_empty() {
                    return Err(Guard::EmptyAnswer);
                }

                self.record(text, at);

                if self.index + 1 < self.bank.len_of(Subset::Text) {
                    self.index += 1;
                    self.present(at, self.config.reveal_delay, effects);
                } else {
                    self.enter_video_permission(effects);
                }
            }

            Event::CaptureGranted => {
                self.expect_phase(Phase::VideoPermission)?;
                info!("Capture granted, entering video phase");

                self.permission = PermissionStatus::Granted;
                self.notice = None;
                self.tracks = TrackState {
                    video: true,
                    audio: true,
                };
                self.phase = Phase::VideoPhase;
                self.index = 0;
                self.present(at, Duration::ZERO, effects);
            }

            Event::CaptureDenied { reason } => {
                self.expect_phase(Phase::VideoPermission)?;
                info!("Capture denied: {}", reason);

                self.permission = PermissionStatus::Denied;
                self.notice = Some(DENIAL_NOTICE.to_string());
                effects.push(Effect::Notice(DENIAL_NOTICE.to_string()));
            }

            Event::Caption { text } => {
                self.expect_phase(Phase::VideoPhase)?;
                let text = text.trim();
                if text.is_empty() {
                    return Err(Guard::EmptyAnswer);
                }

                if !self.caption.is_empty() {
                    self.caption.push(' ');
                }
                self.caption.push_str(text);
            }

            Event::Advance => {
                self.expect_phase(Phase::VideoPhase)?;
                if self.speaking {
                    return Err(Guard::StillSpeaking);
                }
                self.advance_video(at, effects);
            }

            Event::ToggleTrack(kind) => {
                self.expect_phase(Phase::VideoPhase)?;
                let enabled = !self.tracks.get(kind);
                self.tracks.set(kind, enabled);
                effects.push(Effect::SetTrack { kind, enabled });
            }

            Event::Abandon => {
                if self.phase.is_terminal() {
                    return Err(Guard::WrongPhase(self.phase));
                }
                info!("Interview {} abandoned during {:?}", self.interview_id, self.phase);

                self.phase = Phase::Abandoned;
                self.speaking = false;
                self.tracks = TrackState::default();
                effects.extend([Effect::CancelReveal, Effect::StopCountdown, Effect::ReleaseCapture]);
            }

            Event::RevealProgress { epoch, text } => {
                if epoch != self.reveal_epoch || !self.speaking {
                    return Err(Guard::Stale);
                }
                self.transcript = text;
            }

            Event::RevealFinished { epoch } => {
                if epoch != self.reveal_epoch || !self.speaking {
                    return Err(Guard::Stale);
                }
                self.speaking = false;
            }

            Event::Tick { epoch } => {
                self.expect_phase(Phase::VideoPhase)?;
                if epoch != self.timer_epoch {
                    return Err(Guard::Stale);
                }

                if let CountdownTick::Expired = self.countdown.tick() {
                    info!("Time is up for video question {}", self.index + 1);
                    self.advance_video(at, effects);
                }
            }
        }

        Ok(())
    }

    fn expect_phase(&self, phase: Phase) -> Result<(), Guard> {
        if self.phase == phase {
            Ok(())
        } else {
            Err(Guard::WrongPhase(self.phase))
        }
    }

    /// Show the current question: supersede the running reveal and, in the
    /// video phase, restart the countdown.
    fn present(&mut self, at: DateTime<Utc>, delay: Duration, effects: &mut Vec<Effect>) {
        let text = self
            .current_question()
            .map(|q| q.prompt.clone())
            .unwrap_or_default();

        self.reveal_epoch += 1;
        self.transcript.clear();
        self.caption.clear();
        self.speaking = true;
        self.presented_at = Some(at);

        effects.push(Effect::BeginReveal {
            epoch: self.reveal_epoch,
            text,
            delay,
        });

        if self.phase == Phase::VideoPhase {
            self.countdown.reset();
            self.timer_epoch += 1;
            effects.push(Effect::StartCountdown {
                epoch: self.timer_epoch,
            });
        }
    }

    fn enter_video_permission(&mut self, effects: &mut Vec<Effect>) {
        self.index = 0;
        self.transcript.clear();
        self.speaking = false;
        effects.push(Effect::CancelReveal);

        if self.bank.len_of(Subset::Video) == 0 {
            self.complete(effects);
        } else {
            self.phase = Phase::VideoPermission;
        }
    }

    fn advance_video(&mut self, at: DateTime<Utc>, effects: &mut Vec<Effect>) {
        let text = std::mem::take(&mut self.caption);
        self.record(text, at);

        if self.index + 1 < self.bank.len_of(Subset::Video) {
            self.index += 1;
            self.present(at, self.config.reveal_delay, effects);
        } else {
            self.complete(effects);
        }
    }

    fn complete(&mut self, effects: &mut Vec<Effect>) {
        info!(
            "Interview {} completed with {} answers",
            self.interview_id,
            self.answers.len()
        );

        self.phase = Phase::Completed;
        self.speaking = false;
        self.transcript.clear();
        self.tracks = TrackState::default();
        effects.extend([
            Effect::CancelReveal,
            Effect::StopCountdown,
            Effect::ReleaseCapture,
            Effect::Completed(self.answers.clone()),
        ]);
    }

    fn record(&mut self, text: String, at: DateTime<Utc>) {
        let question_id = self
            .current_question()
            .map(|q| q.id.clone())
            .unwrap_or_default();
        let duration_secs = self
            .presented_at
            .map(|started| at.signed_duration_since(started).num_seconds().max(0) as u64)
            .unwrap_or(0);

        self.answers.push(Answer {
            question_id,
            text,
            duration_secs,
            captured_at: at,
        });
    }

    pub fn interview_id(&self) -> &str {
        &self.interview_id
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn answers(&self) -> &[Answer] {
        &self.answers
    }

    /// Seconds left on the countdown; only meaningful in the video phase
    pub fn remaining_secs(&self) -> Option<u32> {
        (self.phase == Phase::VideoPhase).then(|| self.countdown.remaining())
    }

    pub fn permission(&self) -> PermissionStatus {
        self.permission
    }

    pub fn transcript(&self) -> &str {
        &self.transcript
    }

    pub fn is_speaking(&self) -> bool {
        self.speaking
    }

    pub fn caption(&self) -> &str {
        &self.caption
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn tracks(&self) -> TrackState {
        self.tracks
    }

    pub fn current_question(&self) -> Option<&Question> {
        let subset = self.phase.subset()?;
        (self.index < self.bank.len_of(subset)).then(|| self.bank.question(subset, self.index))
    }

    /// Answers recorded before the current phase's questions began
    pub fn answers_before_phase(&self) -> usize {
        match self.phase {
            Phase::VideoPhase => self.bank.len_of(Subset::Text),
            _ => 0,
        }
    }

    /// Whether a typed answer would be accepted right now
    pub fn can_submit(&self, text: &str) -> bool {
        self.phase == Phase::TextPhase && !self.speaking && !text.trim().is_empty()
    }

    /// Whether a manual advance would be accepted right now
    pub fn can_advance(&self) -> bool {
        self.phase == Phase::VideoPhase && !self.speaking
    }

    pub fn progress(&self) -> Option<Progress> {
        let subset = self.phase.subset()?;
        Some(Progress::new(self.index + 1, self.bank.len_of(subset)))
    }

    pub fn overview(&self) -> Overview {
        Overview {
            text_questions: self.bank.len_of(Subset::Text),
            video_questions: self.bank.len_of(Subset::Video),
            estimated_minutes: self.bank.estimated_minutes(),
        }
    }
}
