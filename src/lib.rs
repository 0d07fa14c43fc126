//! # playback-session
//!
//! Playback session controller for a video player: resume prompts, periodic
//! watch-progress checkpoints, volume and fullscreen controls, and a
//! detachable picture-in-picture overlay.
//!
//! ## Features
//!
//! - Resume-or-restart prompt driven by stored progress
//! - Progress checkpoints on a fixed interval while playing
//! - Play/pause/seek/volume/mute kept in sync with the media element
//! - Fullscreen and picture-in-picture, never both at once
//! - Injected progress storage (in-memory or JSON file)
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use playback_session::prelude::*;
//! use playback_session::testing::FakeSurfaces;
//!
//! # async fn example() {
//! let fakes = FakeSurfaces::new();
//! let store = Arc::new(MemoryProgressStore::new());
//!
//! let session = SessionBuilder::new(550u64, fakes.surfaces(), store)
//!     .source(MediaSource::new("https://cdn.example.com/fight-club.mp4", "Fight Club"))
//!     .mount()
//!     .await;
//!
//! session
//!     .handle_media_event(Surface::Primary, MediaEvent::LoadedMetadata { duration: 8340.0 })
//!     .await;
//! session.toggle_play().await;
//! session.unmount().await;
//! # }
//! ```
//!
//! # Architecture
//!
//! - **Controller**: [`PlaybackSession`] owns the state machine and the
//!   checkpoint task
//! - **Seams**: [`media::MediaElement`], [`media::FullscreenHost`] and
//!   [`storage::ProgressRepository`] are implemented by the host
//! - **Observation**: snapshots through a `watch` channel, events through a
//!   broadcast [`state::EventBus`]

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

// Public modules
/// Error types
pub mod error;
/// State management
pub mod state;
/// Core types
pub mod types;

/// Testing utilities
pub mod testing;

pub mod control;
pub mod display;
pub mod media;
pub mod storage;

// Re-exports
pub use control::{PlaybackSession, SessionBuilder, Volume};
pub use error::SessionError;
pub use media::{MediaEvent, MediaSurfaces, Surface};
pub use state::{EventBus, SessionEvent};
pub use types::{
    ContentId, MediaSource, ProgressRecord, ResumeOffer, SessionConfig, SessionSnapshot,
    SessionState,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude for common imports
///
/// Convenient re-exports
pub mod prelude {
    pub use crate::storage::{FileProgressStore, MemoryProgressStore, ProgressRepository};
    pub use crate::{
        ContentId, MediaEvent, MediaSource, MediaSurfaces, PlaybackSession, ProgressRecord,
        SessionBuilder, SessionConfig, SessionError, SessionEvent, SessionState, Surface, Volume,
    };
}
