//! Media element abstraction
//!
//! The controller never talks to a concrete player. A host (a WASM shim over
//! `HTMLVideoElement`, a native decoder, or the fakes in [`crate::testing`])
//! implements [`MediaElement`] and [`FullscreenHost`] and forwards the
//! element's notifications as [`MediaEvent`]s.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

/// Native media error categories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaErrorKind {
    /// Fetching was aborted by the user agent
    Aborted,
    /// A network failure interrupted fetching
    Network,
    /// The resource could not be decoded
    Decode,
    /// The source format or URL is not supported
    SourceNotSupported,
}

impl MediaErrorKind {
    /// Check if the failure may go away when the user retries
    #[must_use]
    pub fn is_transient(self) -> bool {
        matches!(self, Self::Aborted | Self::Network)
    }
}

impl fmt::Display for MediaErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Aborted => "aborted",
            Self::Network => "network",
            Self::Decode => "decode",
            Self::SourceNotSupported => "source not supported",
        };
        f.write_str(name)
    }
}

/// Failure reported by a media element
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct MediaError {
    /// Error category
    pub kind: MediaErrorKind,
    /// Human readable detail
    pub message: String,
}

impl MediaError {
    /// Create a new media error
    pub fn new(kind: MediaErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Which rendering surface an event or command belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    /// The inline player
    Primary,
    /// The detached picture-in-picture overlay
    Overlay,
}

/// Notifications delivered by a media element, in emission order
#[derive(Debug, Clone, PartialEq)]
pub enum MediaEvent {
    /// Metadata is available
    LoadedMetadata {
        /// Total duration in seconds
        duration: f64,
    },
    /// Playback position advanced
    TimeUpdate {
        /// Current position in seconds
        current_time: f64,
    },
    /// Playback started (possibly triggered outside the controller)
    Play,
    /// Playback paused (possibly triggered outside the controller)
    Pause,
    /// A seek operation finished
    Seeked {
        /// Position the element settled on
        current_time: f64,
    },
    /// Playback reached the end of the media
    Ended,
    /// Volume or mute changed outside the controller
    VolumeChange {
        /// New volume level
        volume: f32,
        /// New mute flag
        muted: bool,
    },
    /// The document entered or left fullscreen
    FullscreenChange {
        /// Whether the player container is now fullscreen
        active: bool,
    },
    /// Loading or decoding failed
    Error(MediaError),
}

/// Commands the controller issues to a media element
#[async_trait]
pub trait MediaElement: Send + Sync {
    /// Start or resume playback
    ///
    /// # Errors
    ///
    /// Returns error if the element refuses to play (autoplay policy,
    /// missing source)
    async fn play(&self) -> Result<(), MediaError>;

    /// Pause playback
    async fn pause(&self);

    /// Move the playhead
    async fn set_current_time(&self, seconds: f64);

    /// Set output volume (0.0 - 1.0)
    async fn set_volume(&self, volume: f32);

    /// Set the mute flag
    async fn set_muted(&self, muted: bool);
}

/// Native fullscreen control for the player container
#[async_trait]
pub trait FullscreenHost: Send + Sync {
    /// Ask the host to show the player container fullscreen
    ///
    /// # Errors
    ///
    /// Returns a description of the denial if the request is refused
    async fn request_fullscreen(&self) -> Result<(), String>;

    /// Leave fullscreen
    ///
    /// # Errors
    ///
    /// Returns a description of the failure if the host refuses
    async fn exit_fullscreen(&self) -> Result<(), String>;
}

/// The elements a session drives
#[derive(Clone)]
pub struct MediaSurfaces {
    /// Inline player element
    pub primary: Arc<dyn MediaElement>,
    /// Element rendered inside the picture-in-picture overlay
    pub overlay: Arc<dyn MediaElement>,
    /// Fullscreen control for the inline player container
    pub fullscreen: Arc<dyn FullscreenHost>,
}

impl MediaSurfaces {
    /// Bundle the elements for a session
    #[must_use]
    pub fn new(
        primary: Arc<dyn MediaElement>,
        overlay: Arc<dyn MediaElement>,
        fullscreen: Arc<dyn FullscreenHost>,
    ) -> Self {
        Self {
            primary,
            overlay,
            fullscreen,
        }
    }

    /// Element for the given surface
    #[must_use]
    pub fn element(&self, surface: Surface) -> &Arc<dyn MediaElement> {
        match surface {
            Surface::Primary => &self.primary,
            Surface::Overlay => &self.overlay,
        }
    }
}

impl fmt::Debug for MediaSurfaces {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MediaSurfaces").finish_non_exhaustive()
    }
}
