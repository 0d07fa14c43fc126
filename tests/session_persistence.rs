//! Progress written by one session is offered back by the next one

use std::sync::Arc;
use std::time::Duration;

use playback_session::prelude::*;
use playback_session::state::EventFilter;
use playback_session::testing::FakeSurfaces;
use tokio_test::assert_ok;

mod common;

#[tokio::test]
async fn test_resume_across_sessions_with_file_store() -> Result<(), Box<dyn std::error::Error>> {
    common::init_logging();

    let dir = tempfile::tempdir()?;
    let path = dir.path().join("watch-progress.json");
    let config = SessionConfig::builder()
        .progress_interval(Duration::from_millis(50))
        .build();

    // First visit: watch half of the film
    {
        let store: Arc<dyn ProgressRepository> = Arc::new(FileProgressStore::open(&path).await?);
        let fakes = FakeSurfaces::new();
        let session = SessionBuilder::new(common::FIGHT_CLUB, fakes.surfaces(), store)
            .source(common::source())
            .config(config.clone())
            .mount()
            .await;
        let mut saved = EventFilter::progress_events(session.event_bus());

        session
            .handle_media_event(Surface::Primary, MediaEvent::LoadedMetadata { duration: 8340.0 })
            .await;
        session.toggle_play().await;
        session
            .handle_media_event(Surface::Primary, MediaEvent::TimeUpdate { current_time: 4170.0 })
            .await;

        let event = tokio::time::timeout(Duration::from_secs(2), saved.recv()).await?;
        assert!(matches!(event, Some(SessionEvent::ProgressSaved { .. })));

        session.unmount().await;
    }

    let content = std::fs::read_to_string(&path)?;
    tracing::info!("Stored progress: {}", content);
    assert!(content.contains("\"550\""));

    // Second visit: the prompt offers the midpoint
    let store: Arc<dyn ProgressRepository> = Arc::new(FileProgressStore::open(&path).await?);
    let fakes = FakeSurfaces::new();
    let session = common::mount(Arc::clone(&store), &fakes).await;

    let offer = session
        .snapshot()
        .await
        .resume_offer()
        .ok_or("expected a resume offer")?;
    assert!((offer.offered_time - 4170.0).abs() < 1e-6);
    assert!((offer.percent_complete - 50.0).abs() < 1e-9);

    session.resume().await;
    assert_eq!(fakes.primary.last_seek().await, Some(4170.0));
    assert_eq!(session.state().await, SessionState::Playing);

    session.unmount().await;
    Ok(())
}

#[tokio::test]
async fn test_finished_content_starts_fresh() {
    common::init_logging();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("watch-progress.json");
    let store: Arc<dyn ProgressRepository> =
        Arc::new(FileProgressStore::open(&path).await.unwrap());

    let fakes = FakeSurfaces::new();
    let session = common::mount(Arc::clone(&store), &fakes).await;
    session
        .handle_media_event(Surface::Primary, MediaEvent::LoadedMetadata { duration: 8340.0 })
        .await;
    session.toggle_play().await;
    session
        .handle_media_event(Surface::Primary, MediaEvent::Ended)
        .await;
    session.unmount().await;

    let record = store
        .get(&ContentId::from(common::FIGHT_CLUB))
        .await
        .unwrap();
    assert!(record.is_completed(95.0));

    let reopened: Arc<dyn ProgressRepository> =
        Arc::new(FileProgressStore::open(&path).await.unwrap());
    let session = common::mount(reopened, &FakeSurfaces::new()).await;
    assert_eq!(session.state().await, SessionState::Initializing);
    session.unmount().await;
}

#[tokio::test]
async fn test_corrupt_progress_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("watch-progress.json");
    std::fs::write(&path, b"{not json").unwrap();

    let result = FileProgressStore::open(&path).await;
    assert!(result.is_err());

    std::fs::write(&path, b"{}").unwrap();
    let store = assert_ok!(FileProgressStore::open(&path).await);
    assert!(store.list().await.is_empty());
}
