use super::content::ContentId;
use super::overlay::{OverlayGeometry, Size};
use crate::control::volume::{Volume, VolumeState};
use crate::error::SessionError;
use crate::media::Surface;

/// Prompt offered when earlier progress exists
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResumeOffer {
    /// Position playback would resume from (seconds)
    pub offered_time: f64,
    /// Stored percentage the offer was derived from
    pub percent_complete: f64,
}

/// Detached overlay playback
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipOverlay {
    /// Position and size of the floating window
    pub geometry: OverlayGeometry,
    /// Whether the overlay element is playing
    pub playing: bool,
}

/// Lifecycle of a playback session
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum SessionState {
    /// Metadata not loaded yet, controls disabled
    #[default]
    Initializing,
    /// Waiting for the viewer to pick Resume or Start Over
    AwaitingResume {
        /// The pending offer
        offer: ResumeOffer,
    },
    /// Inline element is playing
    Playing,
    /// Inline element is paused
    Paused,
    /// Playback delegated to the floating overlay
    PictureInPicture {
        /// Overlay state
        overlay: PipOverlay,
    },
    /// Reached the end of the content
    Ended,
}

impl SessionState {
    /// Short name for logs and error reports
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Initializing => "Initializing",
            Self::AwaitingResume { .. } => "AwaitingResume",
            Self::Playing => "Playing",
            Self::Paused => "Paused",
            Self::PictureInPicture { .. } => "PictureInPicture",
            Self::Ended => "Ended",
        }
    }

    /// Whether media is currently advancing on any surface
    #[must_use]
    pub fn is_playing(&self) -> bool {
        match self {
            Self::Playing => true,
            Self::PictureInPicture { overlay } => overlay.playing,
            _ => false,
        }
    }

    /// Surface that receives commands and whose events are honored
    #[must_use]
    pub fn active_surface(&self) -> Surface {
        match self {
            Self::PictureInPicture { .. } => Surface::Overlay,
            _ => Surface::Primary,
        }
    }

    /// Whether play, pause, seek and picture-in-picture are available
    #[must_use]
    pub fn accepts_transport(&self) -> bool {
        matches!(
            self,
            Self::Playing | Self::Paused | Self::PictureInPicture { .. }
        )
    }
}

/// How the inline player is presented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Presentation {
    /// Inside the page layout
    #[default]
    Inline,
    /// Player container is fullscreen
    Fullscreen,
}

/// Point-in-time view of a session
#[derive(Debug, Clone)]
pub struct SessionSnapshot {
    /// Content being played
    pub content_id: ContentId,
    /// Lifecycle state
    pub state: SessionState,
    /// Position in seconds, within `[0, duration]`
    pub current_time: f64,
    /// Duration in seconds (0 until known)
    pub duration: f64,
    /// Whether the element reported metadata
    pub metadata_loaded: bool,
    /// Volume level and mute flag
    pub audio: VolumeState,
    /// Inline presentation mode
    pub presentation: Presentation,
    /// Seek target the element has not confirmed yet
    pub pending_seek: Option<f64>,
    /// Area the overlay may move within
    pub viewport: Size,
    /// Most recent caught failure
    pub last_error: Option<SessionError>,
}

impl SessionSnapshot {
    /// Snapshot for a freshly mounted session
    #[must_use]
    pub fn new(content_id: ContentId, volume: Volume, viewport: Size) -> Self {
        Self {
            content_id,
            state: SessionState::Initializing,
            current_time: 0.0,
            duration: 0.0,
            metadata_loaded: false,
            audio: VolumeState::new(volume),
            presentation: Presentation::Inline,
            pending_seek: None,
            viewport,
            last_error: None,
        }
    }

    /// Whether media is currently advancing
    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.state.is_playing()
    }

    /// Pending resume offer, if the prompt is showing
    #[must_use]
    pub fn resume_offer(&self) -> Option<ResumeOffer> {
        match self.state {
            SessionState::AwaitingResume { offer } => Some(offer),
            _ => None,
        }
    }

    /// Current volume level
    #[must_use]
    pub fn volume(&self) -> Volume {
        self.audio.volume()
    }

    /// Current mute flag
    #[must_use]
    pub fn is_muted(&self) -> bool {
        self.audio.is_muted()
    }

    /// Whether the mute icon should show (muted flag or zero volume)
    #[must_use]
    pub fn displays_muted(&self) -> bool {
        self.audio.is_muted() || self.audio.volume().is_zero()
    }

    /// Whether the overlay is open
    #[must_use]
    pub fn is_pip_active(&self) -> bool {
        matches!(self.state, SessionState::PictureInPicture { .. })
    }

    /// Whether the player container is fullscreen
    #[must_use]
    pub fn is_fullscreen(&self) -> bool {
        self.presentation == Presentation::Fullscreen
    }

    /// Watched percentage of the current position (0.0 - 100.0)
    #[must_use]
    pub fn percent_complete(&self) -> f64 {
        if self.duration <= 0.0 {
            0.0
        } else {
            (self.current_time / self.duration * 100.0).clamp(0.0, 100.0)
        }
    }

    /// Clamp a target position into `[0, duration]`
    #[must_use]
    pub fn clamp_time(&self, target: f64) -> f64 {
        if target.is_nan() {
            return 0.0;
        }
        target.clamp(0.0, self.duration.max(0.0))
    }
}
