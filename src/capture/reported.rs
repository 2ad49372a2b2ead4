use anyhow::Result;
use tracing::info;

use super::backend::{CaptureRequest, CaptureSource, MediaTrack, PermissionDenied, TrackKind};
use super::handle::CaptureHandle;

/// Capture outcome reported by a remote client
///
/// Over HTTP the browser owns the camera and microphone and tells us whether
/// access was granted. The handle's tracks only mirror that state.
#[derive(Debug, Clone)]
pub struct ReportedCaptureSource {
    granted: bool,
    reason: Option<String>,
}

impl ReportedCaptureSource {
    pub fn granted() -> Self {
        Self {
            granted: true,
            reason: None,
        }
    }

    pub fn denied(reason: Option<String>) -> Self {
        Self {
            granted: false,
            reason,
        }
    }
}

struct RemoteTrack {
    kind: TrackKind,
    enabled: bool,
}

impl MediaTrack for RemoteTrack {
    fn kind(&self) -> TrackKind {
        self.kind
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn stop(&mut self) -> Result<()> {
        self.enabled = false;
        info!("Remote {} track marked stopped", self.kind);
        Ok(())
    }
}

#[async_trait::async_trait]
impl CaptureSource for ReportedCaptureSource {
    async fn request(&mut self, request: &CaptureRequest) -> Result<CaptureHandle, PermissionDenied> {
        if !self.granted {
            let reason = self
                .reason
                .clone()
                .unwrap_or_else(|| "Client reported permission denied".to_string());
            return Err(PermissionDenied::new(reason));
        }

        let mut tracks: Vec<Box<dyn MediaTrack>> = vec![Box::new(RemoteTrack {
            kind: TrackKind::Video,
            enabled: true,
        })];
        if request.audio {
            tracks.push(Box::new(RemoteTrack {
                kind: TrackKind::Audio,
                enabled: true,
            }));
        }

        Ok(CaptureHandle::new(tracks))
    }

    fn name(&self) -> &str {
        "reported"
    }
}
