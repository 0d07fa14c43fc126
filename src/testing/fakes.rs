use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::media::{FullscreenHost, MediaElement, MediaError, MediaErrorKind};
use crate::storage::{MemoryProgressStore, ProgressRepository, StorageError};
use crate::types::{ContentId, ProgressRecord};

/// Command received by a [`FakeMediaElement`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MediaCall {
    /// `play()` was called
    Play,
    /// `pause()` was called
    Pause,
    /// `set_current_time()` was called
    SetCurrentTime(f64),
    /// `set_volume()` was called
    SetVolume(f32),
    /// `set_muted()` was called
    SetMuted(bool),
}

/// Media element that records every command
#[derive(Debug, Default)]
pub struct FakeMediaElement {
    calls: Mutex<Vec<MediaCall>>,
    reject_play: AtomicBool,
    pause_delay_us: AtomicU64,
}

impl FakeMediaElement {
    /// Create an element that accepts every command
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent `play()` calls fail like a blocked autoplay
    pub fn set_reject_play(&self, reject: bool) {
        self.reject_play.store(reject, Ordering::SeqCst);
    }

    /// Make subsequent `pause()` calls take `delay` before returning
    pub fn set_pause_delay(&self, delay: Duration) {
        let micros = u64::try_from(delay.as_micros()).unwrap_or(u64::MAX);
        self.pause_delay_us.store(micros, Ordering::SeqCst);
    }

    /// Commands received so far
    pub async fn calls(&self) -> Vec<MediaCall> {
        self.calls.lock().await.clone()
    }

    /// Last playhead position set on the element
    pub async fn last_seek(&self) -> Option<f64> {
        self.calls.lock().await.iter().rev().find_map(|c| match c {
            MediaCall::SetCurrentTime(t) => Some(*t),
            _ => None,
        })
    }

    /// Number of `play()` calls received
    pub async fn play_count(&self) -> usize {
        self.calls
            .lock()
            .await
            .iter()
            .filter(|c| matches!(c, MediaCall::Play))
            .count()
    }

    /// Forget recorded commands
    pub async fn clear(&self) {
        self.calls.lock().await.clear();
    }

    async fn record(&self, call: MediaCall) {
        self.calls.lock().await.push(call);
    }
}

#[async_trait]
impl MediaElement for FakeMediaElement {
    async fn play(&self) -> Result<(), MediaError> {
        self.record(MediaCall::Play).await;
        if self.reject_play.load(Ordering::SeqCst) {
            return Err(MediaError::new(
                MediaErrorKind::Aborted,
                "play() request was interrupted",
            ));
        }
        Ok(())
    }

    async fn pause(&self) {
        self.record(MediaCall::Pause).await;
        let delay = self.pause_delay_us.load(Ordering::SeqCst);
        if delay > 0 {
            tokio::time::sleep(Duration::from_micros(delay)).await;
        }
    }

    async fn set_current_time(&self, seconds: f64) {
        self.record(MediaCall::SetCurrentTime(seconds)).await;
    }

    async fn set_volume(&self, volume: f32) {
        self.record(MediaCall::SetVolume(volume)).await;
    }

    async fn set_muted(&self, muted: bool) {
        self.record(MediaCall::SetMuted(muted)).await;
    }
}

/// Fullscreen host that can be told to deny requests
#[derive(Debug, Default)]
pub struct FakeFullscreenHost {
    deny: AtomicBool,
    requests: AtomicUsize,
    exits: AtomicUsize,
}

impl FakeFullscreenHost {
    /// Create a host that grants every request
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent requests fail as if the user or browser refused
    pub fn set_deny(&self, deny: bool) {
        self.deny.store(deny, Ordering::SeqCst);
    }

    /// Number of fullscreen requests received
    #[must_use]
    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    /// Number of exit requests received
    #[must_use]
    pub fn exit_count(&self) -> usize {
        self.exits.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FullscreenHost for FakeFullscreenHost {
    async fn request_fullscreen(&self) -> Result<(), String> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        if self.deny.load(Ordering::SeqCst) {
            return Err("Permissions check failed".to_string());
        }
        Ok(())
    }

    async fn exit_fullscreen(&self) -> Result<(), String> {
        self.exits.fetch_add(1, Ordering::SeqCst);
        if self.deny.load(Ordering::SeqCst) {
            return Err("Document not active".to_string());
        }
        Ok(())
    }
}

/// Progress store whose writes can be switched to fail
#[derive(Debug, Default)]
pub struct FailingProgressStore {
    inner: MemoryProgressStore,
    fail_writes: AtomicBool,
    attempts: AtomicUsize,
}

impl FailingProgressStore {
    /// Create a store that fails every write
    #[must_use]
    pub fn new() -> Self {
        let store = Self::default();
        store.fail_writes.store(true, Ordering::SeqCst);
        store
    }

    /// Switch failures on or off
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of write attempts, successful or not
    #[must_use]
    pub fn write_attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProgressRepository for FailingProgressStore {
    async fn get(&self, content_id: &ContentId) -> Option<ProgressRecord> {
        self.inner.get(content_id).await
    }

    async fn set(
        &self,
        content_id: &ContentId,
        record: ProgressRecord,
    ) -> Result<(), StorageError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::NotAvailable);
        }
        self.inner.set(content_id, record).await
    }

    async fn remove(&self, content_id: &ContentId) -> Result<(), StorageError> {
        self.inner.remove(content_id).await
    }

    async fn list(&self) -> Vec<ContentId> {
        self.inner.list().await
    }
}
