#![allow(dead_code)]

use std::sync::{Arc, Once};

use playback_session::prelude::*;
use playback_session::testing::FakeSurfaces;

static INIT: Once = Once::new();

/// Route session logs to the test output (`RUST_LOG` overrides the level)
pub fn init_logging() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .with_test_writer()
            .try_init();
    });
}

pub const FIGHT_CLUB: u64 = 550;

pub fn source() -> MediaSource {
    MediaSource::new("https://cdn.example.com/fight-club.mp4", "Fight Club")
        .with_poster("https://img.example.com/fight-club/poster.jpg")
}

pub async fn mount(
    store: Arc<dyn ProgressRepository>,
    fakes: &FakeSurfaces,
) -> PlaybackSession {
    SessionBuilder::new(FIGHT_CLUB, fakes.surfaces(), store)
        .source(source())
        .mount()
        .await
}

/// Let the checkpoint task observe a clock change
pub async fn settle() {
    for _ in 0..16 {
        tokio::task::yield_now().await;
    }
}
