//! In-memory stand-ins for the browser pieces a session drives
//!
//! Useful for host applications' tests as well as this crate's own.

mod fakes;
#[cfg(test)]
mod tests;

pub use fakes::{FailingProgressStore, FakeFullscreenHost, FakeMediaElement, MediaCall};

use std::sync::Arc;

use crate::media::{FullscreenHost, MediaElement, MediaSurfaces};

/// Fakes wired into a [`MediaSurfaces`], with handles kept for assertions
#[derive(Debug, Clone)]
pub struct FakeSurfaces {
    /// Inline element
    pub primary: Arc<FakeMediaElement>,
    /// Overlay element
    pub overlay: Arc<FakeMediaElement>,
    /// Fullscreen host
    pub fullscreen: Arc<FakeFullscreenHost>,
}

impl FakeSurfaces {
    /// Create accepting fakes
    #[must_use]
    pub fn new() -> Self {
        Self {
            primary: Arc::new(FakeMediaElement::new()),
            overlay: Arc::new(FakeMediaElement::new()),
            fullscreen: Arc::new(FakeFullscreenHost::new()),
        }
    }

    /// Surfaces to hand to a session
    #[must_use]
    pub fn surfaces(&self) -> MediaSurfaces {
        let primary: Arc<dyn MediaElement> = self.primary.clone();
        let overlay: Arc<dyn MediaElement> = self.overlay.clone();
        let fullscreen: Arc<dyn FullscreenHost> = self.fullscreen.clone();
        MediaSurfaces::new(primary, overlay, fullscreen)
    }
}

impl Default for FakeSurfaces {
    fn default() -> Self {
        Self::new()
    }
}
