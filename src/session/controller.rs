use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{info, warn};

use super::config::SessionConfig;
use super::error::SessionError;
use super::machine::{Effect, Event, Guard, Outcome, Phase, Session};
use super::snapshot::{Completion, SessionSnapshot};
use super::tasks::TaskSlot;
use super::timer::spawn_ticker;
use super::transcript::spawn_reveal;
use crate::capture::{CaptureHandle, CaptureRequest, CaptureSource, TrackKind};
use crate::catalog::Interview;
use crate::questions::QuestionBank;

/// A live interview session
///
/// Owns the [`Session`] state plus everything with a lifetime attached to it:
/// the transcript reveal task, the countdown task and the capture handle.
/// Task output comes back through [`InterviewSession::next_event`] and must be
/// fed to [`InterviewSession::dispatch`].
pub struct InterviewSession {
    id: String,
    results_path: String,
    session: Session,
    capture: Option<CaptureHandle>,
    reveal_task: TaskSlot,
    countdown_task: TaskSlot,
    events_tx: mpsc::Sender<Event>,
    events_rx: mpsc::Receiver<Event>,
    completion: Option<Completion>,
}

impl InterviewSession {
    pub fn new(interview: &Interview, bank: Arc<QuestionBank>, config: SessionConfig) -> Self {
        let id = format!("session-{}", uuid::Uuid::new_v4());
        info!(
            "Creating interview session {} for {} at {}",
            id, interview.job_title, interview.company
        );

        let (events_tx, events_rx) = mpsc::channel(100);

        Self {
            id,
            results_path: interview.results_path(),
            session: Session::new(interview.id.clone(), bank, config),
            capture: None,
            reveal_task: TaskSlot::new("transcript reveal"),
            countdown_task: TaskSlot::new("countdown"),
            events_tx,
            events_rx,
            completion: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn state(&self) -> &Session {
        &self.session
    }

    pub fn phase(&self) -> Phase {
        self.session.phase()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot::of(&self.id, &self.session)
    }

    /// Apply an event now
    pub fn dispatch(&mut self, event: Event) -> Outcome {
        self.dispatch_at(event, Utc::now())
    }

    /// Apply an event observed at `at` and carry out its effects
    pub fn dispatch_at(&mut self, event: Event, at: DateTime<Utc>) -> Outcome {
        let step = self.session.clone().apply(event, at);
        self.session = step.session;

        for effect in step.effects {
            self.run_effect(effect);
        }

        step.outcome
    }

    /// Apply a user command, turning an ignored event into an error
    pub fn command(&mut self, event: Event) -> Result<(), SessionError> {
        match self.dispatch(event) {
            Outcome::Applied => Ok(()),
            Outcome::Ignored(guard) => Err(guard.into()),
        }
    }

    /// Ask `source` for camera + microphone and enter the video phase on success
    ///
    /// A denial leaves the session waiting for permission with a notice set;
    /// the caller has to ask again.
    pub async fn request_capture(&mut self, source: &mut dyn CaptureSource) -> Result<(), SessionError> {
        let phase = self.session.phase();
        if phase != Phase::VideoPermission {
            return Err(Guard::WrongPhase(phase).into());
        }

        info!("Requesting capture from {} source", source.name());

        match source.request(&CaptureRequest::default()).await {
            Ok(handle) => {
                if let Some(mut previous) = self.capture.replace(handle) {
                    previous.release();
                }
                self.command(Event::CaptureGranted)
            }
            Err(denied) => {
                self.dispatch(Event::CaptureDenied {
                    reason: denied.reason.clone(),
                });
                Err(denied.into())
            }
        }
    }

    /// Next event produced by the reveal or countdown task
    pub async fn next_event(&mut self) -> Option<Event> {
        self.events_rx.recv().await
    }

    /// Wait for the next task event and apply it
    pub async fn run_next(&mut self) -> Option<Outcome> {
        let event = self.next_event().await?;
        Some(self.dispatch(event))
    }

    /// Answers handed over on completion, if the interview has completed
    pub fn completion(&self) -> Option<&Completion> {
        self.completion.as_ref()
    }

    pub fn take_completion(&mut self) -> Option<Completion> {
        self.completion.take()
    }

    pub fn capture_active(&self) -> bool {
        self.capture.is_some()
    }

    pub fn reveal_active(&self) -> bool {
        self.reveal_task.is_active()
    }

    pub fn countdown_active(&self) -> bool {
        self.countdown_task.is_active()
    }

    /// Abandon a live session and make sure no task or device outlives it
    pub fn teardown(&mut self) {
        if !self.session.phase().is_terminal() {
            self.dispatch(Event::Abandon);
        }

        self.reveal_task.cancel();
        self.countdown_task.cancel();
        self.release_capture();
    }

    fn run_effect(&mut self, effect: Effect) {
        match effect {
            Effect::BeginReveal { epoch, text, delay } => {
                let cadence = self.session.config().reveal_cadence;
                self.reveal_task.replace(spawn_reveal(
                    epoch,
                    text,
                    cadence,
                    delay,
                    self.events_tx.clone(),
                ));
            }
            Effect::CancelReveal => self.reveal_task.cancel(),
            Effect::StartCountdown { epoch } => {
                let period = self.session.config().tick_period;
                self.countdown_task
                    .replace(spawn_ticker(epoch, period, self.events_tx.clone()));
            }
            Effect::StopCountdown => self.countdown_task.cancel(),
            Effect::ReleaseCapture => self.release_capture(),
            Effect::SetTrack { kind, enabled } => self.set_track(kind, enabled),
            Effect::Notice(message) => warn!("Session {}: {}", self.id, message),
            Effect::Completed(answers) => {
                info!(
                    "Session {} handing {} answers to {}",
                    self.id,
                    answers.len(),
                    self.results_path
                );
                self.completion = Some(Completion {
                    interview_id: self.session.interview_id().to_string(),
                    answers,
                    results_path: self.results_path.clone(),
                });
            }
        }
    }

    fn set_track(&mut self, kind: TrackKind, enabled: bool) {
        match self.capture.as_mut() {
            Some(handle) => {
                if !handle.set_enabled(kind, enabled) {
                    warn!("Capture has no {} track", kind);
                }
            }
            None => warn!("No capture to toggle {} on", kind),
        }
    }

    fn release_capture(&mut self) {
        if let Some(mut handle) = self.capture.take() {
            handle.release();
        }
    }
}

impl Drop for InterviewSession {
    fn drop(&mut self) {
        self.teardown();
    }
}
