// Integration tests for capture sources and handles

use ai_interview::capture::{
    CaptureRequest, CaptureScript, CaptureSource, ReportedCaptureSource, SimulatedCaptureSource,
    TrackKind,
};

#[tokio::test]
async fn test_simulated_grant_yields_video_and_audio() {
    let mut source = SimulatedCaptureSource::new(CaptureScript::grant());
    let probe = source.probe();

    let mut handle = source.request(&CaptureRequest::default()).await.unwrap();

    assert_eq!(handle.track_count(), 2);
    assert!(handle.is_enabled(TrackKind::Video));
    assert!(handle.is_enabled(TrackKind::Audio));
    assert_eq!(probe.requests(), 1);
    assert_eq!(probe.grants(), 1);

    handle.release();
}

#[tokio::test]
async fn test_video_only_request() {
    let mut source = SimulatedCaptureSource::new(CaptureScript::grant());
    let request = CaptureRequest {
        audio: false,
        ..CaptureRequest::default()
    };

    let handle = source.request(&request).await.unwrap();

    assert_eq!(handle.track_count(), 1);
    assert!(!handle.is_enabled(TrackKind::Audio));
}

#[tokio::test]
async fn test_deny_first_then_grant() {
    let mut source = SimulatedCaptureSource::new(CaptureScript::deny_first(2));
    let probe = source.probe();
    let request = CaptureRequest::default();

    assert!(source.request(&request).await.is_err());
    assert!(source.request(&request).await.is_err());
    let handle = source.request(&request).await.unwrap();

    assert_eq!(probe.requests(), 3);
    assert_eq!(probe.grants(), 1);
    drop(handle);
}

#[tokio::test]
async fn test_toggle_tracks_independently() {
    let mut source = SimulatedCaptureSource::new(CaptureScript::grant());
    let probe = source.probe();
    let mut handle = source.request(&CaptureRequest::default()).await.unwrap();

    assert!(handle.set_enabled(TrackKind::Video, false));
    assert!(!handle.is_enabled(TrackKind::Video));
    assert!(handle.is_enabled(TrackKind::Audio));
    assert!(!probe.is_enabled(TrackKind::Video));
    assert!(probe.is_enabled(TrackKind::Audio));

    assert!(handle.set_enabled(TrackKind::Video, true));
    assert!(probe.is_enabled(TrackKind::Video));
}

#[tokio::test]
async fn test_release_is_idempotent() {
    let mut source = SimulatedCaptureSource::new(CaptureScript::grant());
    let probe = source.probe();
    let mut handle = source.request(&CaptureRequest::default()).await.unwrap();

    handle.release();
    handle.release();
    drop(handle);

    assert_eq!(probe.stops(), 2);
    assert!(!probe.is_enabled(TrackKind::Video));
    assert!(!probe.is_enabled(TrackKind::Audio));
}

#[tokio::test]
async fn test_drop_releases_live_handle() {
    let mut source = SimulatedCaptureSource::new(CaptureScript::grant());
    let probe = source.probe();

    {
        let handle = source.request(&CaptureRequest::default()).await.unwrap();
        assert!(!handle.is_released());
    }

    assert_eq!(probe.stops(), 2);
}

#[tokio::test]
async fn test_failing_stop_does_not_block_other_tracks() {
    let script = CaptureScript::grant().with_failing_stop(TrackKind::Video);
    let mut source = SimulatedCaptureSource::new(script);
    let probe = source.probe();
    let mut handle = source.request(&CaptureRequest::default()).await.unwrap();

    handle.release();

    assert!(handle.is_released());
    assert_eq!(probe.stops(), 2);
    assert!(!probe.is_enabled(TrackKind::Audio));
}

#[tokio::test]
async fn test_reported_source_denial_reason() {
    let mut source = ReportedCaptureSource::denied(Some("NotAllowedError".to_string()));
    let err = source
        .request(&CaptureRequest::default())
        .await
        .unwrap_err();
    assert_eq!(err.reason, "NotAllowedError");

    let mut source = ReportedCaptureSource::denied(None);
    let err = source
        .request(&CaptureRequest::default())
        .await
        .unwrap_err();
    assert_eq!(err.reason, "Client reported permission denied");
}

#[tokio::test]
async fn test_reported_source_grant() {
    let mut source = ReportedCaptureSource::granted();
    assert_eq!(source.name(), "reported");

    let mut handle = source.request(&CaptureRequest::default()).await.unwrap();
    assert_eq!(handle.track_count(), 2);
    assert!(handle.is_enabled(TrackKind::Video));

    handle.release();
    assert!(!handle.is_enabled(TrackKind::Video));
}
