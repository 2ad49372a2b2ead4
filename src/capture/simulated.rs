use anyhow::{bail, Result};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::info;

use super::backend::{CaptureRequest, CaptureSource, MediaTrack, PermissionDenied, TrackKind};
use super::handle::CaptureHandle;

/// Scripted answers to capture requests
#[derive(Debug, Clone, Default)]
pub struct CaptureScript {
    /// Outcomes consumed one per request; `false` means deny
    outcomes: VecDeque<bool>,

    /// Track kind whose `stop()` fails
    failing_stop: Option<TrackKind>,
}

impl CaptureScript {
    /// Grant every request
    pub fn grant() -> Self {
        Self::default()
    }

    /// Deny the first `n` requests, then grant
    pub fn deny_first(n: usize) -> Self {
        Self {
            outcomes: std::iter::repeat(false).take(n).collect(),
            failing_stop: None,
        }
    }

    /// Make stopping tracks of `kind` fail
    pub fn with_failing_stop(mut self, kind: TrackKind) -> Self {
        self.failing_stop = Some(kind);
        self
    }

    fn next_outcome(&mut self) -> bool {
        self.outcomes.pop_front().unwrap_or(true)
    }
}

/// Counters shared between a simulated source and its tracks
#[derive(Debug, Clone, Default)]
pub struct TrackProbe {
    requests: Arc<AtomicUsize>,
    grants: Arc<AtomicUsize>,
    stops: Arc<AtomicUsize>,
    video_enabled: Arc<AtomicBool>,
    audio_enabled: Arc<AtomicBool>,
}

impl TrackProbe {
    /// Number of capture requests made
    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    /// Number of requests that produced a handle
    pub fn grants(&self) -> usize {
        self.grants.load(Ordering::SeqCst)
    }

    /// Number of `stop()` calls across all tracks, failed ones included
    pub fn stops(&self) -> usize {
        self.stops.load(Ordering::SeqCst)
    }

    pub fn is_enabled(&self, kind: TrackKind) -> bool {
        self.flag(kind).load(Ordering::SeqCst)
    }

    fn flag(&self, kind: TrackKind) -> &Arc<AtomicBool> {
        match kind {
            TrackKind::Video => &self.video_enabled,
            TrackKind::Audio => &self.audio_enabled,
        }
    }
}

struct SimulatedTrack {
    kind: TrackKind,
    enabled: bool,
    fail_stop: bool,
    probe: TrackProbe,
}

impl MediaTrack for SimulatedTrack {
    fn kind(&self) -> TrackKind {
        self.kind
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        self.probe.flag(self.kind).store(enabled, Ordering::SeqCst);
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn stop(&mut self) -> Result<()> {
        self.probe.stops.fetch_add(1, Ordering::SeqCst);
        self.set_enabled(false);
        if self.fail_stop {
            bail!("simulated {} device busy", self.kind);
        }
        Ok(())
    }
}

/// In-process capture source driven by a [`CaptureScript`]
pub struct SimulatedCaptureSource {
    script: CaptureScript,
    probe: TrackProbe,
}

impl SimulatedCaptureSource {
    pub fn new(script: CaptureScript) -> Self {
        Self {
            script,
            probe: TrackProbe::default(),
        }
    }

    pub fn probe(&self) -> TrackProbe {
        self.probe.clone()
    }

    fn track(&self, kind: TrackKind) -> Box<dyn MediaTrack> {
        let mut track = SimulatedTrack {
            kind,
            enabled: false,
            fail_stop: self.script.failing_stop == Some(kind),
            probe: self.probe.clone(),
        };
        track.set_enabled(true);
        Box::new(track)
    }
}

#[async_trait::async_trait]
impl CaptureSource for SimulatedCaptureSource {
    async fn request(&mut self, request: &CaptureRequest) -> Result<CaptureHandle, PermissionDenied> {
        self.probe.requests.fetch_add(1, Ordering::SeqCst);

        if !self.script.next_outcome() {
            info!("Simulated capture request denied");
            return Err(PermissionDenied::new("Permission denied by user"));
        }

        let mut tracks = vec![self.track(TrackKind::Video)];
        if request.audio {
            tracks.push(self.track(TrackKind::Audio));
        }

        self.probe.grants.fetch_add(1, Ordering::SeqCst);
        info!(
            "Simulated capture granted ({}x{}, audio={})",
            request.width, request.height, request.audio
        );

        Ok(CaptureHandle::new(tracks))
    }

    fn name(&self) -> &str {
        "simulated"
    }
}
