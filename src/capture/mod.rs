//! Camera + microphone capture
//!
//! The host environment is reached through the [`CaptureSource`] trait. A
//! granted request yields a [`CaptureHandle`] that owns the live tracks and
//! stops them exactly once, either explicitly or on drop.

pub mod backend;
pub mod handle;
pub mod reported;
pub mod simulated;

pub use backend::{CaptureRequest, CaptureSource, MediaTrack, PermissionDenied, TrackKind};
pub use handle::CaptureHandle;
pub use reported::ReportedCaptureSource;
pub use simulated::{CaptureScript, SimulatedCaptureSource, TrackProbe};
