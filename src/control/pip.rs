//! Picture-in-picture delegation
//!
//! Opening the overlay pauses the inline element and hands the position to
//! the overlay element, which keeps playing if the inline one was. Closing
//! pauses the overlay, hands the position back and leaves the session paused.

use super::session::PlaybackSession;
use crate::error::SessionError;
use crate::types::{OverlayGeometry, PipOverlay, Presentation, SessionState, Size};

impl PlaybackSession {
    /// Open or close the floating overlay
    ///
    /// Ignored until metadata has loaded, while the resume prompt is showing,
    /// and after the content ended.
    pub async fn toggle_picture_in_picture(&self) {
        let state = self.inner.state.read(|s| s.state).await;
        match state {
            SessionState::Playing | SessionState::Paused => self.open_overlay(state).await,
            SessionState::PictureInPicture { .. } => self.close_overlay().await,
            SessionState::Initializing
            | SessionState::AwaitingResume { .. }
            | SessionState::Ended => {
                tracing::debug!(state = state.name(), "toggle_picture_in_picture ignored");
            }
        }
    }

    async fn open_overlay(&self, mut from: SessionState) {
        let inner = &self.inner;

        let presentation = inner.state.read(|s| s.presentation).await;
        if presentation == Presentation::Fullscreen {
            // The overlay cannot coexist with fullscreen; leave it even if the host complains.
            if let Err(message) = inner.surfaces.fullscreen.exit_fullscreen().await {
                inner
                    .record_error(SessionError::FullscreenDenied { message })
                    .await;
            }
            inner.set_presentation(Presentation::Inline).await;
        }

        let viewport = inner.state.read(|s| s.viewport).await;
        let config = &inner.config;
        let mut geometry =
            OverlayGeometry::docked(viewport, config.overlay_size, config.overlay_margin);
        geometry.fit_within(viewport, config.overlay_min_size);

        let overlay = PipOverlay {
            geometry,
            playing: false,
        };

        // Switch surfaces before touching the inline element, so its own
        // pause notification arrives as an inactive-surface event.
        let opened = loop {
            if inner
                .transition_from(from, SessionState::PictureInPicture { overlay })
                .await
            {
                break true;
            }
            // A play/pause event landed since the state was read
            let current = inner.state.read(|s| s.state).await;
            match current {
                SessionState::Playing | SessionState::Paused if current != from => from = current,
                _ => break false,
            }
        };
        if !opened {
            tracing::debug!("Picture-in-picture not opened, state changed");
            return;
        }
        let was_playing = from == SessionState::Playing;
        let (position, audio) = inner.state.read(|s| (s.current_time, s.audio)).await;

        inner.surfaces.primary.pause().await;

        let element = &inner.surfaces.overlay;
        element.set_current_time(position).await;
        element.set_volume(audio.volume().as_f32()).await;
        element.set_muted(audio.is_muted()).await;

        tracing::info!(
            content_id = %inner.content_id,
            position,
            was_playing,
            "Picture-in-picture opened"
        );

        if was_playing {
            match element.play().await {
                Ok(()) => inner.set_overlay_playing(overlay, true).await,
                Err(e) => {
                    inner
                        .record_error(SessionError::PlayRejected {
                            message: e.to_string(),
                        })
                        .await;
                }
            }
        }
    }

    async fn close_overlay(&self) {
        let inner = &self.inner;
        inner.surfaces.overlay.pause().await;

        let (position, state) = inner.state.read(|s| (s.current_time, s.state)).await;
        if !matches!(state, SessionState::PictureInPicture { .. }) {
            return;
        }

        inner.surfaces.primary.set_current_time(position).await;
        inner.transition_from(state, SessionState::Paused).await;

        tracing::info!(
            content_id = %inner.content_id,
            position,
            "Picture-in-picture closed"
        );
    }

    /// Drag the overlay so its top-left corner lands at (`x`, `y`)
    pub async fn move_overlay(&self, x: f64, y: f64) {
        self.update_overlay(|geometry, viewport, _| geometry.move_to(x, y, viewport))
            .await;
    }

    /// Resize the overlay from its bottom-right handle
    pub async fn resize_overlay(&self, width: f64, height: f64) {
        self.update_overlay(|geometry, viewport, min| {
            geometry.resize(width, height, min, viewport);
        })
        .await;
    }

    /// Tell the session the page viewport changed size
    ///
    /// An open overlay shrinks and moves to stay visible.
    pub async fn set_viewport(&self, width: f64, height: f64) {
        let viewport = Size::new(width, height);
        self.inner.state.update(|s| s.viewport = viewport).await;
        self.update_overlay(|geometry, viewport, min| geometry.fit_within(viewport, min))
            .await;
    }

    /// Current overlay geometry, if the overlay is open
    pub async fn overlay_geometry(&self) -> Option<OverlayGeometry> {
        self.inner
            .state
            .read(|s| match s.state {
                SessionState::PictureInPicture { overlay } => Some(overlay.geometry),
                _ => None,
            })
            .await
    }

    async fn update_overlay<F>(&self, f: F)
    where
        F: FnOnce(&mut OverlayGeometry, Size, Size),
    {
        let min = self.inner.config.overlay_min_size;
        let updated = self
            .inner
            .state
            .update(|s| {
                let viewport = s.viewport;
                if let SessionState::PictureInPicture { overlay } = &mut s.state {
                    f(&mut overlay.geometry, viewport, min);
                    true
                } else {
                    false
                }
            })
            .await;

        if !updated {
            tracing::debug!("Overlay geometry change ignored, overlay closed");
        }
    }
}
