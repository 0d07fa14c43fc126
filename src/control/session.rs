//! Playback session lifecycle

use std::sync::Arc;

use tokio::sync::{broadcast, watch};

use super::schedule::PeriodicTask;
use super::volume::Volume;
use crate::error::SessionError;
use crate::media::MediaSurfaces;
use crate::state::{EventBus, SessionContainer, SessionEvent};
use crate::storage::ProgressRepository;
use crate::types::{
    ContentId, MediaSource, ProgressRecord, ResumeOffer, SessionConfig, SessionSnapshot,
    SessionState,
};

/// Controller for one playback of one piece of content
///
/// Created by [`SessionBuilder::mount`], which reads prior progress once and
/// starts the progress checkpoint task. All operations swallow failures of
/// the media element, the fullscreen host and the progress store: they are
/// logged, published as [`SessionEvent::Error`] and left in the snapshot's
/// `last_error`.
///
/// # Example
///
/// ```rust,no_run
/// use std::sync::Arc;
///
/// use playback_session::storage::MemoryProgressStore;
/// use playback_session::testing::{FakeFullscreenHost, FakeMediaElement};
/// use playback_session::{MediaSource, MediaSurfaces, SessionBuilder};
///
/// # async fn example() {
/// let surfaces = MediaSurfaces::new(
///     Arc::new(FakeMediaElement::new()),
///     Arc::new(FakeMediaElement::new()),
///     Arc::new(FakeFullscreenHost::new()),
/// );
/// let store = Arc::new(MemoryProgressStore::new());
///
/// let session = SessionBuilder::new(27205u64, surfaces, store)
///     .source(MediaSource::new("https://cdn.example.com/inception.mp4", "Inception"))
///     .mount()
///     .await;
///
/// session.toggle_play().await;
/// session.unmount().await;
/// # }
/// ```
pub struct PlaybackSession {
    pub(super) inner: Arc<SessionInner>,
    checkpointer: Option<PeriodicTask>,
}

/// Shared between the public handle and the checkpoint task
pub(super) struct SessionInner {
    pub(super) content_id: ContentId,
    pub(super) source: MediaSource,
    pub(super) config: SessionConfig,
    pub(super) surfaces: MediaSurfaces,
    pub(super) store: Arc<dyn ProgressRepository>,
    pub(super) state: SessionContainer,
    pub(super) events: EventBus,
}

/// Builder for a [`PlaybackSession`]
pub struct SessionBuilder {
    content_id: ContentId,
    surfaces: MediaSurfaces,
    store: Arc<dyn ProgressRepository>,
    source: MediaSource,
    config: SessionConfig,
}

impl SessionBuilder {
    /// Start building a session for `content_id`
    pub fn new(
        content_id: impl Into<ContentId>,
        surfaces: MediaSurfaces,
        store: Arc<dyn ProgressRepository>,
    ) -> Self {
        Self {
            content_id: content_id.into(),
            surfaces,
            store,
            source: MediaSource::default(),
            config: SessionConfig::default(),
        }
    }

    /// Set the media source
    #[must_use]
    pub fn source(mut self, source: MediaSource) -> Self {
        self.source = source;
        self
    }

    /// Set the session configuration
    #[must_use]
    pub fn config(mut self, config: SessionConfig) -> Self {
        self.config = config;
        self
    }

    /// Read prior progress and start the session
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    pub async fn mount(self) -> PlaybackSession {
        PlaybackSession::mount(self).await
    }
}

impl PlaybackSession {
    async fn mount(builder: SessionBuilder) -> Self {
        let SessionBuilder {
            content_id,
            surfaces,
            store,
            source,
            config,
        } = builder;

        let volume = Volume::new(config.initial_volume);
        let mut snapshot = SessionSnapshot::new(content_id.clone(), volume, config.viewport);

        let prior = store.get(&content_id).await;
        if let Some(record) = prior.filter(|r| r.is_resumable(config.completion_threshold)) {
            // Stored duration stands in until the element reports metadata.
            snapshot.duration = record.duration_seconds;
            snapshot.state = SessionState::AwaitingResume {
                offer: ResumeOffer {
                    offered_time: record.position_secs(),
                    percent_complete: record.percent_complete,
                },
            };
        }
        let resume_offered = snapshot.resume_offer().is_some();

        for element in [&surfaces.primary, &surfaces.overlay] {
            element.set_volume(volume.as_f32()).await;
            element.set_muted(false).await;
        }

        let inner = Arc::new(SessionInner {
            content_id: content_id.clone(),
            source,
            config,
            surfaces,
            store,
            state: SessionContainer::new(snapshot),
            events: EventBus::new(),
        });

        let task_inner = Arc::clone(&inner);
        let checkpointer = PeriodicTask::spawn(
            "progress-checkpoint",
            inner.config.progress_interval,
            move || {
                let inner = Arc::clone(&task_inner);
                async move { inner.checkpoint_if_playing().await }
            },
        );

        tracing::info!(
            content_id = %content_id,
            title = %inner.source.title,
            resume_offered,
            "Playback session mounted"
        );
        inner.events.emit(SessionEvent::Mounted {
            content_id,
            resume_offered,
        });

        Self {
            inner,
            checkpointer: Some(checkpointer),
        }
    }

    /// Stop the checkpoint task and wait for it to finish
    ///
    /// No progress is written after this returns.
    pub async fn unmount(mut self) {
        if let Some(task) = self.checkpointer.take() {
            task.cancel().await;
        }
        tracing::info!(content_id = %self.inner.content_id, "Playback session unmounted");
        self.inner.events.emit(SessionEvent::Unmounted {
            content_id: self.inner.content_id.clone(),
        });
    }

    /// Content being played
    #[must_use]
    pub fn content_id(&self) -> &ContentId {
        &self.inner.content_id
    }

    /// Source supplied at mount
    #[must_use]
    pub fn source(&self) -> &MediaSource {
        &self.inner.source
    }

    /// Configuration the session runs with
    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.inner.config
    }

    /// Current snapshot
    pub async fn snapshot(&self) -> SessionSnapshot {
        self.inner.state.get().await
    }

    /// Current lifecycle state
    pub async fn state(&self) -> SessionState {
        self.inner.state.read(|s| s.state).await
    }

    /// Watch snapshot changes
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.inner.state.subscribe()
    }

    /// Receive session events
    #[must_use]
    pub fn events(&self) -> broadcast::Receiver<SessionEvent> {
        self.inner.events.subscribe()
    }

    /// Event bus, for building filters
    #[must_use]
    pub fn event_bus(&self) -> &EventBus {
        &self.inner.events
    }

    /// Whether the checkpoint task is still scheduled
    #[must_use]
    pub fn is_checkpointing(&self) -> bool {
        self.checkpointer
            .as_ref()
            .is_some_and(PeriodicTask::is_running)
    }

    /// Write the current position to the progress store right away
    pub async fn checkpoint_now(&self) {
        self.inner.checkpoint().await;
    }
}

impl SessionInner {
    /// Move to `new` if the session is still in `expected`
    ///
    /// Returns false when another event changed the state in the meantime.
    pub(super) async fn transition_from(
        &self,
        expected: SessionState,
        new: SessionState,
    ) -> bool {
        let applied = self
            .state
            .update(|s| {
                if s.state == expected {
                    s.state = new;
                    true
                } else {
                    false
                }
            })
            .await;

        if applied && expected != new {
            tracing::info!(
                content_id = %self.content_id,
                "Session state {} -> {}",
                expected.name(),
                new.name()
            );
            self.events.emit(SessionEvent::StateChanged { old: expected, new });
        }
        applied
    }

    /// Log, publish and remember a caught failure
    pub(super) async fn record_error(&self, error: SessionError) {
        tracing::warn!(content_id = %self.content_id, "{}", error);
        let stored = error.clone();
        self.state.update(|s| s.last_error = Some(stored)).await;
        self.events.emit(SessionEvent::Error { error });
    }

    /// Periodic tick: save progress only while media is advancing
    async fn checkpoint_if_playing(&self) {
        let playing = self.state.read(|s| s.state.is_playing()).await;
        if playing {
            self.checkpoint().await;
        } else {
            tracing::trace!(content_id = %self.content_id, "Checkpoint skipped, not playing");
        }
    }

    /// Save the current position if the duration is known
    ///
    /// Skipped until metadata loaded and any resume prompt was answered.
    pub(super) async fn checkpoint(&self) {
        let (position, duration, state) = self
            .state
            .read(|s| (s.current_time, s.duration, s.state))
            .await;
        if matches!(
            state,
            SessionState::Initializing | SessionState::AwaitingResume { .. }
        ) {
            tracing::debug!(
                content_id = %self.content_id,
                state = state.name(),
                "Checkpoint skipped, playback not started"
            );
            return;
        }
        if duration <= 0.0 {
            tracing::debug!(content_id = %self.content_id, "Checkpoint skipped, duration unknown");
            return;
        }
        self.save_progress(ProgressRecord::at_position(position, duration))
            .await;
    }

    /// Write a record to the store
    pub(super) async fn save_progress(&self, record: ProgressRecord) {
        match self.store.set(&self.content_id, record).await {
            Ok(()) => {
                tracing::debug!(
                    content_id = %self.content_id,
                    percent = record.percent_complete,
                    "Progress saved"
                );
                self.events.emit(SessionEvent::ProgressSaved {
                    content_id: self.content_id.clone(),
                    record,
                });
            }
            Err(e) => self.record_error(e.into()).await,
        }
    }
}

impl std::fmt::Debug for PlaybackSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaybackSession")
            .field("content_id", &self.inner.content_id)
            .field("checkpointer", &self.checkpointer)
            .finish_non_exhaustive()
    }
}
