use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info};

use super::controller::InterviewSession;
use super::error::SessionError;
use super::machine::Event;
use super::snapshot::{Completion, SessionSnapshot};
use crate::capture::{CaptureSource, TrackKind};

enum Command {
    Start,
    Submit(String),
    RequestCapture(Box<dyn CaptureSource>),
    Caption(String),
    Advance,
    Toggle(TrackKind),
    Snapshot,
    Completion,
    Abandon,
}

enum Reply {
    Snapshot(SessionSnapshot),
    Completion(Option<Completion>),
}

struct Request {
    command: Command,
    reply: oneshot::Sender<Result<Reply, SessionError>>,
}

/// Cloneable handle to an interview session running on its own task
///
/// The task owns the [`InterviewSession`] and applies commands and task events
/// one at a time. When every handle is dropped the task tears the session down.
#[derive(Clone)]
pub struct SessionHandle {
    id: String,
    interview_id: String,
    requests: mpsc::Sender<Request>,
}

impl SessionHandle {
    pub fn spawn(session: InterviewSession) -> Self {
        let id = session.id().to_string();
        let interview_id = session.state().interview_id().to_string();
        let (requests, rx) = mpsc::channel(32);

        tokio::spawn(run(session, rx));

        Self {
            id,
            interview_id,
            requests,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn interview_id(&self) -> &str {
        &self.interview_id
    }

    pub async fn start(&self) -> Result<SessionSnapshot, SessionError> {
        self.snapshot_after(Command::Start).await
    }

    pub async fn submit(&self, text: impl Into<String>) -> Result<SessionSnapshot, SessionError> {
        self.snapshot_after(Command::Submit(text.into())).await
    }

    pub async fn request_capture(
        &self,
        source: Box<dyn CaptureSource>,
    ) -> Result<SessionSnapshot, SessionError> {
        self.snapshot_after(Command::RequestCapture(source)).await
    }

    pub async fn caption(&self, text: impl Into<String>) -> Result<SessionSnapshot, SessionError> {
        self.snapshot_after(Command::Caption(text.into())).await
    }

    pub async fn advance(&self) -> Result<SessionSnapshot, SessionError> {
        self.snapshot_after(Command::Advance).await
    }

    pub async fn toggle(&self, kind: TrackKind) -> Result<SessionSnapshot, SessionError> {
        self.snapshot_after(Command::Toggle(kind)).await
    }

    pub async fn snapshot(&self) -> Result<SessionSnapshot, SessionError> {
        self.snapshot_after(Command::Snapshot).await
    }

    pub async fn abandon(&self) -> Result<SessionSnapshot, SessionError> {
        self.snapshot_after(Command::Abandon).await
    }

    /// Answers handed over at completion; `None` until the interview completes
    pub async fn completion(&self) -> Result<Option<Completion>, SessionError> {
        match self.send(Command::Completion).await? {
            Reply::Completion(completion) => Ok(completion),
            Reply::Snapshot(_) => Ok(None),
        }
    }

    async fn snapshot_after(&self, command: Command) -> Result<SessionSnapshot, SessionError> {
        match self.send(command).await? {
            Reply::Snapshot(snapshot) => Ok(snapshot),
            Reply::Completion(_) => Err(SessionError::Closed),
        }
    }

    async fn send(&self, command: Command) -> Result<Reply, SessionError> {
        let (reply, rx) = oneshot::channel();
        self.requests
            .send(Request { command, reply })
            .await
            .map_err(|_| SessionError::Closed)?;
        rx.await.map_err(|_| SessionError::Closed)?
    }
}

async fn run(mut session: InterviewSession, mut requests: mpsc::Receiver<Request>) {
    info!("Session task started: {}", session.id());

    loop {
        tokio::select! {
            request = requests.recv() => {
                let Some(Request { command, reply }) = request else {
                    break;
                };
                let result = execute(&mut session, command).await;
                if reply.send(result).is_err() {
                    debug!("Session {} caller went away before the reply", session.id());
                }
            }
            Some(event) = session.next_event() => {
                session.dispatch(event);
            }
        }
    }

    session.teardown();
    info!("Session task stopped: {}", session.id());
}

async fn execute(session: &mut InterviewSession, command: Command) -> Result<Reply, SessionError> {
    match command {
        Command::Start => session.command(Event::Start)?,
        Command::Submit(text) => session.command(Event::Submit { text })?,
        Command::RequestCapture(mut source) => session.request_capture(source.as_mut()).await?,
        Command::Caption(text) => session.command(Event::Caption { text })?,
        Command::Advance => session.command(Event::Advance)?,
        Command::Toggle(kind) => session.command(Event::ToggleTrack(kind))?,
        Command::Abandon => session.command(Event::Abandon)?,
        Command::Snapshot => {}
        Command::Completion => return Ok(Reply::Completion(session.completion().cloned())),
    }

    Ok(Reply::Snapshot(session.snapshot()))
}
