mod media_events;
mod schedule;

use std::sync::Arc;
use std::time::Duration;

use crate::control::session::{PlaybackSession, SessionBuilder};
use crate::media::{MediaEvent, Surface};
use crate::storage::MemoryProgressStore;
use crate::testing::FakeSurfaces;
use crate::types::{ContentId, MediaSource, ProgressRecord, SessionConfig};

const CONTENT_ID: u64 = 27205;

struct Harness {
    session: PlaybackSession,
    fakes: FakeSurfaces,
    store: Arc<MemoryProgressStore>,
}

impl Harness {
    fn id() -> ContentId {
        ContentId::from(CONTENT_ID)
    }

    async fn stored(&self) -> Option<ProgressRecord> {
        use crate::storage::ProgressRepository;
        self.store.get(&Self::id()).await
    }

    async fn primary(&self, event: MediaEvent) {
        self.session.handle_media_event(Surface::Primary, event).await;
    }

    async fn overlay(&self, event: MediaEvent) {
        self.session.handle_media_event(Surface::Overlay, event).await;
    }
}

async fn mount_with(record: Option<ProgressRecord>) -> Harness {
    mount_with_config(record, SessionConfig::default()).await
}

async fn mount_with_config(record: Option<ProgressRecord>, config: SessionConfig) -> Harness {
    let store = Arc::new(MemoryProgressStore::with_records(
        record.map(|r| (Harness::id(), r)),
    ));
    let fakes = FakeSurfaces::new();
    let session = SessionBuilder::new(CONTENT_ID, fakes.surfaces(), store.clone())
        .source(MediaSource::new("https://cdn.example.com/inception.mp4", "Inception"))
        .config(config)
        .mount()
        .await;

    Harness {
        session,
        fakes,
        store,
    }
}

/// Mounted with no prior progress and metadata already loaded
async fn mount_loaded(duration: f64) -> Harness {
    let harness = mount_with(None).await;
    harness
        .primary(MediaEvent::LoadedMetadata { duration })
        .await;
    harness
}

/// Let spawned tasks run to completion of their current step
async fn settle() {
    for _ in 0..16 {
        tokio::task::yield_now().await;
    }
}

/// Move the paused clock forward and let the checkpoint task react
async fn advance(secs: u64) {
    tokio::time::advance(Duration::from_secs(secs)).await;
    settle().await;
}
