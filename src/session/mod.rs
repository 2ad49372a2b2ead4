//! Interview session management
//!
//! This module provides the interview session abstraction:
//! - `machine`: the pure state machine (`Session::apply`)
//! - `controller`: `InterviewSession`, which runs effects (reveal and
//!   countdown tasks, capture handle)
//! - `handle`: `SessionHandle`, a session running on its own task
//! - Transcript reveal and countdown helpers

mod config;
mod controller;
mod error;
mod handle;
pub mod machine;
mod snapshot;
mod tasks;
pub mod timer;
pub mod transcript;

pub use config::SessionConfig;
pub use controller::InterviewSession;
pub use error::SessionError;
pub use handle::SessionHandle;
pub use machine::{
    Effect, Event, Guard, Outcome, PermissionStatus, Phase, Session, Step, TrackState, DENIAL_NOTICE,
};
pub use snapshot::{Answer, Completion, Overview, Progress, SessionSnapshot};
pub use timer::{format_clock, Countdown, CountdownTick};
pub use transcript::{reveal_stream, Reveal};
