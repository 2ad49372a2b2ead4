use tracing::{info, warn};

use super::backend::{MediaTrack, TrackKind};

/// Acquired camera + microphone tracks
///
/// Tracks can be toggled independently. [`CaptureHandle::release`] stops every
/// track once; dropping an unreleased handle releases it.
pub struct CaptureHandle {
    tracks: Vec<Box<dyn MediaTrack>>,
    released: bool,
}

impl CaptureHandle {
    pub fn new(tracks: Vec<Box<dyn MediaTrack>>) -> Self {
        Self {
            tracks,
            released: false,
        }
    }

    /// Enable or disable every track of `kind`. Returns false if there is none.
    pub fn set_enabled(&mut self, kind: TrackKind, enabled: bool) -> bool {
        let mut found = false;
        for track in self.tracks.iter_mut().filter(|t| t.kind() == kind) {
            track.set_enabled(enabled);
            found = true;
        }
        if found {
            info!("Capture {} track enabled: {}", kind, enabled);
        }
        found
    }

    pub fn is_enabled(&self, kind: TrackKind) -> bool {
        self.tracks
            .iter()
            .any(|t| t.kind() == kind && t.is_enabled())
    }

    pub fn is_released(&self) -> bool {
        self.released
    }

    pub fn track_count(&self) -> usize {
        self.tracks.len()
    }

    /// Stop all tracks
    ///
    /// A track that fails to stop is logged and skipped so the rest still get
    /// stopped. Calling this again does nothing.
    pub fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;

        for track in self.tracks.iter_mut() {
            if let Err(e) = track.stop() {
                warn!("Failed to stop {} track: {}", track.kind(), e);
            }
        }

        info!("Capture released ({} tracks)", self.tracks.len());
    }
}

impl std::fmt::Debug for CaptureHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CaptureHandle")
            .field("tracks", &self.tracks.len())
            .field("released", &self.released)
            .finish()
    }
}

impl Drop for CaptureHandle {
    fn drop(&mut self) {
        if !self.released {
            warn!("Capture handle dropped while live, releasing");
            self.release();
        }
    }
}
