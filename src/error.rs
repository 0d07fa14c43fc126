use thiserror::Error;

use crate::media::MediaError;
use crate::storage::StorageError;

/// Errors that can occur while driving a playback session
///
/// None of these escape the controller's public operations. They are logged,
/// published as [`SessionEvent::Error`](crate::state::SessionEvent::Error) and
/// kept as the session's `last_error`.
#[derive(Debug, Clone, Error)]
pub enum SessionError {
    // ===== Media Errors =====
    /// The media element refused to start playback
    #[error("play request rejected: {message}")]
    PlayRejected {
        /// Reason reported by the element
        message: String,
    },

    /// The media element reported a load or decode failure
    #[error("media error: {0}")]
    Media(#[from] MediaError),

    // ===== Presentation Errors =====
    /// The host denied a fullscreen request
    #[error("fullscreen request denied: {message}")]
    FullscreenDenied {
        /// Reason reported by the host
        message: String,
    },

    // ===== Storage Errors =====
    /// Progress could not be written
    #[error("progress storage error: {message}")]
    Storage {
        /// Description of the failure
        message: String,
    },
}

impl SessionError {
    /// Check if the user can reasonably retry the action that failed
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::PlayRejected { .. } | Self::FullscreenDenied { .. } | Self::Storage { .. } => {
                true
            }
            Self::Media(err) => err.kind.is_transient(),
        }
    }
}

impl From<StorageError> for SessionError {
    fn from(err: StorageError) -> Self {
        Self::Storage {
            message: err.to_string(),
        }
    }
}

/// Result type alias for session operations
pub type Result<T> = std::result::Result<T, SessionError>;
