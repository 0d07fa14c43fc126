use super::*;
use crate::error::SessionError;
use crate::media::{MediaError, MediaErrorKind};
use crate::state::{EventFilter, SessionEvent};
use crate::types::SessionState;

#[tokio::test]
async fn test_loaded_metadata_enables_controls() {
    let h = mount_with(None).await;
    let mut events = h.session.events();

    h.primary(MediaEvent::LoadedMetadata { duration: 5400.0 }).await;

    let snapshot = h.session.snapshot().await;
    assert_eq!(snapshot.state, SessionState::Paused);
    assert!(snapshot.metadata_loaded);
    assert!((snapshot.duration - 5400.0).abs() < f64::EPSILON);

    let event = events.try_recv().unwrap();
    assert!(matches!(
        event,
        SessionEvent::StateChanged {
            old: SessionState::Initializing,
            new: SessionState::Paused
        }
    ));
}

#[tokio::test]
async fn test_loaded_metadata_sanitizes_duration() {
    let h = mount_with(None).await;

    h.primary(MediaEvent::LoadedMetadata {
        duration: f64::INFINITY,
    })
    .await;

    let snapshot = h.session.snapshot().await;
    assert!(snapshot.duration.abs() < f64::EPSILON);
    assert_eq!(snapshot.state, SessionState::Paused);
}

#[tokio::test]
async fn test_time_update_clamped() {
    let h = mount_loaded(120.0).await;

    h.primary(MediaEvent::TimeUpdate { current_time: 130.0 }).await;
    assert!((h.session.snapshot().await.current_time - 120.0).abs() < f64::EPSILON);

    h.primary(MediaEvent::TimeUpdate { current_time: -4.0 }).await;
    assert!(h.session.snapshot().await.current_time.abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_position_events_published() {
    let h = mount_loaded(120.0).await;
    let mut playback = EventFilter::playback_events(h.session.event_bus());

    h.primary(MediaEvent::TimeUpdate { current_time: 42.0 }).await;

    let event = playback.recv().await.unwrap();
    assert!(matches!(
        event,
        SessionEvent::PositionUpdated { position, duration }
            if (position - 42.0).abs() < f64::EPSILON && (duration - 120.0).abs() < f64::EPSILON
    ));
}

#[tokio::test]
async fn test_external_play_pause_tracked() {
    let h = mount_loaded(120.0).await;

    // Hardware media keys act on the element directly
    h.primary(MediaEvent::Play).await;
    assert_eq!(h.session.state().await, SessionState::Playing);

    h.primary(MediaEvent::Pause).await;
    assert_eq!(h.session.state().await, SessionState::Paused);

    assert_eq!(h.fakes.primary.play_count().await, 0);
}

#[tokio::test]
async fn test_play_event_ignored_during_prompt() {
    let h = mount_with(Some(ProgressRecord::new(30.0, 120.0))).await;

    h.primary(MediaEvent::Play).await;

    assert!(h.session.snapshot().await.resume_offer().is_some());
}

#[tokio::test]
async fn test_ended_writes_completion() {
    let h = mount_loaded(120.0).await;
    h.session.toggle_play().await;
    h.primary(MediaEvent::TimeUpdate { current_time: 119.7 }).await;

    h.primary(MediaEvent::Ended).await;

    let snapshot = h.session.snapshot().await;
    assert_eq!(snapshot.state, SessionState::Ended);
    assert!((snapshot.current_time - 120.0).abs() < f64::EPSILON);

    let record = h.stored().await.unwrap();
    assert!((record.percent_complete - 100.0).abs() < f64::EPSILON);
    assert!((record.duration_seconds - 120.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_ended_is_terminal() {
    let h = mount_loaded(120.0).await;
    h.session.toggle_play().await;
    h.primary(MediaEvent::Ended).await;

    h.primary(MediaEvent::Play).await;
    h.primary(MediaEvent::TimeUpdate { current_time: 3.0 }).await;
    h.session.toggle_picture_in_picture().await;

    let snapshot = h.session.snapshot().await;
    assert_eq!(snapshot.state, SessionState::Ended);
    assert!((snapshot.current_time - 120.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_completed_session_skips_prompt_next_mount() {
    let h = mount_loaded(120.0).await;
    h.session.toggle_play().await;
    h.primary(MediaEvent::Ended).await;
    let Harness { session, store, .. } = h;
    session.unmount().await;

    let fakes = FakeSurfaces::new();
    let again = SessionBuilder::new(CONTENT_ID, fakes.surfaces(), store)
        .mount()
        .await;

    assert_eq!(again.state().await, SessionState::Initializing);
}

#[tokio::test]
async fn test_media_error_pauses_and_keeps_progress() {
    let h = mount_loaded(600.0).await;
    h.session.toggle_play().await;
    h.primary(MediaEvent::TimeUpdate { current_time: 150.0 }).await;
    let mut errors = EventFilter::error_events(h.session.event_bus());

    h.primary(MediaEvent::Error(MediaError::new(
        MediaErrorKind::Network,
        "segment request failed",
    )))
    .await;

    let snapshot = h.session.snapshot().await;
    assert_eq!(snapshot.state, SessionState::Paused);
    assert!(matches!(
        snapshot.last_error,
        Some(SessionError::Media(MediaError {
            kind: MediaErrorKind::Network,
            ..
        }))
    ));
    assert!(errors.try_recv().is_some());

    let record = h.stored().await.unwrap();
    assert!((record.percent_complete - 25.0).abs() < 1e-9);

    // The viewer can try again
    h.session.toggle_play().await;
    assert_eq!(h.session.state().await, SessionState::Playing);
}

#[tokio::test]
async fn test_media_error_at_start_writes_nothing() {
    let h = mount_loaded(600.0).await;

    h.primary(MediaEvent::Error(MediaError::new(
        MediaErrorKind::SourceNotSupported,
        "no supported source",
    )))
    .await;

    assert!(h.stored().await.is_none());
    assert_eq!(h.session.state().await, SessionState::Paused);
}

#[tokio::test]
async fn test_volume_change_from_element() {
    let h = mount_loaded(120.0).await;

    h.primary(MediaEvent::VolumeChange {
        volume: 0.25,
        muted: true,
    })
    .await;

    let snapshot = h.session.snapshot().await;
    assert!((snapshot.volume().as_f32() - 0.25).abs() < f32::EPSILON);
    assert!(snapshot.is_muted());
}

#[tokio::test]
async fn test_overlay_events_ignored_inline() {
    let h = mount_loaded(120.0).await;

    h.overlay(MediaEvent::TimeUpdate { current_time: 77.0 }).await;
    h.overlay(MediaEvent::Play).await;
    h.overlay(MediaEvent::Ended).await;

    let snapshot = h.session.snapshot().await;
    assert_eq!(snapshot.state, SessionState::Paused);
    assert!(snapshot.current_time.abs() < f64::EPSILON);
}
