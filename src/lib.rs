pub mod capture;
pub mod catalog;
pub mod config;
pub mod http;
pub mod questions;
pub mod session;

pub use capture::{
    CaptureHandle, CaptureRequest, CaptureScript, CaptureSource, MediaTrack, PermissionDenied,
    ReportedCaptureSource, SimulatedCaptureSource, TrackKind, TrackProbe,
};
pub use catalog::{CatalogError, Interview, InterviewCatalog};
pub use config::Config;
pub use http::{create_router, AppState};
pub use questions::{Question, QuestionBank, QuestionKind, Subset};
pub use session::{
    Answer, Completion, Event, InterviewSession, Outcome, Phase, Session, SessionConfig,
    SessionError, SessionHandle, SessionSnapshot,
};
