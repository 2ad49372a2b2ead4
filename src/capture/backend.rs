use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use super::handle::CaptureHandle;

/// Kind of media track in a capture handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackKind {
    Video,
    Audio,
}

impl fmt::Display for TrackKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrackKind::Video => write!(f, "video"),
            TrackKind::Audio => write!(f, "audio"),
        }
    }
}

/// What the session asks the host for when entering the video phase
#[derive(Debug, Clone)]
pub struct CaptureRequest {
    /// Requested frame width in pixels
    pub width: u32,
    /// Requested frame height in pixels
    pub height: u32,
    /// Whether an audio track is requested alongside video
    pub audio: bool,
}

impl Default for CaptureRequest {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            audio: true,
        }
    }
}

/// The host refused camera/microphone access
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Capture permission denied: {reason}")]
pub struct PermissionDenied {
    pub reason: String,
}

impl PermissionDenied {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// A single live media track
pub trait MediaTrack: Send {
    fn kind(&self) -> TrackKind;

    /// Mute or unmute the track without releasing it
    fn set_enabled(&mut self, enabled: bool);

    fn is_enabled(&self) -> bool;

    /// Stop the track and free the underlying device
    fn stop(&mut self) -> Result<()>;
}

/// Host-provided camera + microphone capability
///
/// Implementations:
/// - Simulated: scripted grant/deny outcomes (console runs and tests)
/// - Reported: outcome reported by a remote client that owns the devices
#[async_trait::async_trait]
pub trait CaptureSource: Send {
    /// Ask for audio + video capture
    ///
    /// Each call is one explicit request; nothing here retries.
    async fn request(&mut self, request: &CaptureRequest) -> Result<CaptureHandle, PermissionDenied>;

    /// Source name for logging
    fn name(&self) -> &str;
}
