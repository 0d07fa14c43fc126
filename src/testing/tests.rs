use super::*;
use crate::storage::ProgressRepository;
use crate::types::{ContentId, ProgressRecord};

#[tokio::test]
async fn test_fake_element_records_calls() {
    let element = FakeMediaElement::new();

    element.play().await.unwrap();
    element.set_current_time(42.0).await;
    element.pause().await;

    assert_eq!(
        element.calls().await,
        vec![MediaCall::Play, MediaCall::SetCurrentTime(42.0), MediaCall::Pause]
    );
    assert_eq!(element.last_seek().await, Some(42.0));
    assert_eq!(element.play_count().await, 1);
}

#[tokio::test]
async fn test_fake_element_rejects_play() {
    let element = FakeMediaElement::new();
    element.set_reject_play(true);

    assert!(element.play().await.is_err());
    assert_eq!(element.play_count().await, 1);
}

#[tokio::test]
async fn test_fake_fullscreen_host() {
    let host = FakeFullscreenHost::new();
    assert!(host.request_fullscreen().await.is_ok());

    host.set_deny(true);
    assert!(host.request_fullscreen().await.is_err());
    assert!(host.exit_fullscreen().await.is_err());

    assert_eq!(host.request_count(), 2);
    assert_eq!(host.exit_count(), 1);
}

#[tokio::test]
async fn test_failing_store() {
    let store = FailingProgressStore::new();
    let id = ContentId::from(1u64);

    assert!(store.set(&id, ProgressRecord::new(10.0, 60.0)).await.is_err());
    assert!(store.get(&id).await.is_none());

    store.set_fail_writes(false);
    store.set(&id, ProgressRecord::new(10.0, 60.0)).await.unwrap();
    assert!(store.get(&id).await.is_some());
    assert_eq!(store.write_attempts(), 2);
}
