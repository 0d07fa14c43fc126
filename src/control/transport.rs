//! Play, pause, seek and the resume decision

use super::session::{PlaybackSession, SessionInner};
use crate::error::SessionError;
use crate::media::Surface;
use crate::state::SessionEvent;
use crate::types::{PipOverlay, SessionState};

impl PlaybackSession {
    /// Play if paused, pause if playing
    ///
    /// Ignored until metadata has loaded, while the resume prompt is showing,
    /// and after the content ended. In picture-in-picture the overlay element
    /// is toggled instead of the inline one.
    pub async fn toggle_play(&self) {
        let inner = &self.inner;
        let state = inner.state.read(|s| s.state).await;

        match state {
            SessionState::Playing => {
                inner.surfaces.primary.pause().await;
                inner
                    .transition_from(SessionState::Playing, SessionState::Paused)
                    .await;
            }
            SessionState::Paused => {
                inner.start_playback(SessionState::Paused).await;
            }
            SessionState::PictureInPicture { overlay } if overlay.playing => {
                inner.surfaces.overlay.pause().await;
                inner.set_overlay_playing(overlay, false).await;
            }
            SessionState::PictureInPicture { overlay } => {
                match inner.surfaces.overlay.play().await {
                    Ok(()) => inner.set_overlay_playing(overlay, true).await,
                    Err(e) => {
                        inner
                            .record_error(SessionError::PlayRejected { message: e.to_string() })
                            .await;
                    }
                }
            }
            SessionState::Initializing
            | SessionState::AwaitingResume { .. }
            | SessionState::Ended => {
                tracing::debug!(state = state.name(), "toggle_play ignored");
            }
        }
    }

    /// Answer the resume prompt with "Resume"
    ///
    /// Seeks to the offered position and starts playback.
    pub async fn resume(&self) {
        self.decide(true).await;
    }

    /// Answer the resume prompt with "Start Over"
    ///
    /// Seeks to the beginning and starts playback.
    pub async fn start_over(&self) {
        self.decide(false).await;
    }

    async fn decide(&self, resume: bool) {
        let inner = &self.inner;
        let Some(offer) = inner.state.read(|s| s.resume_offer()).await else {
            tracing::debug!("No resume prompt showing, decision ignored");
            return;
        };

        let target = if resume { offer.offered_time } else { 0.0 };
        let position = inner
            .state
            .update(|s| {
                let position = s.clamp_time(target);
                s.current_time = position;
                s.pending_seek = Some(position);
                position
            })
            .await;

        tracing::info!(
            content_id = %inner.content_id,
            resume,
            position,
            "Resume prompt answered"
        );

        inner.surfaces.primary.set_current_time(position).await;
        inner.emit_position().await;

        let awaiting = SessionState::AwaitingResume { offer };
        if inner.transition_from(awaiting, SessionState::Paused).await {
            inner.start_playback(SessionState::Paused).await;
        }
    }

    /// Move the playhead to `target` seconds
    ///
    /// The target is clamped to `[0, duration]` and shown immediately,
    /// before the element confirms the seek.
    pub async fn seek(&self, target: f64) {
        let inner = &self.inner;
        let state = inner.state.read(|s| s.state).await;
        if !state.accepts_transport() {
            tracing::debug!(state = state.name(), target, "seek ignored");
            return;
        }

        let position = inner
            .state
            .update(|s| {
                let position = s.clamp_time(target);
                s.current_time = position;
                s.pending_seek = Some(position);
                position
            })
            .await;

        inner
            .surfaces
            .element(state.active_surface())
            .set_current_time(position)
            .await;
        inner.emit_position().await;
    }

    /// Move the playhead by `offset` seconds (negative to rewind)
    pub async fn seek_relative(&self, offset: f64) {
        let current = self.inner.state.read(|s| s.current_time).await;
        self.seek(current + offset).await;
    }
}

impl SessionInner {
    /// Ask the inline element to play, moving `from` to `Playing` on success
    pub(super) async fn start_playback(&self, from: SessionState) {
        match self.surfaces.primary.play().await {
            Ok(()) => {
                self.transition_from(from, SessionState::Playing).await;
            }
            Err(e) => {
                self.record_error(SessionError::PlayRejected {
                    message: e.to_string(),
                })
                .await;
            }
        }
    }

    /// Update the overlay's play flag if the overlay is still the one given
    pub(super) async fn set_overlay_playing(&self, overlay: PipOverlay, playing: bool) {
        let expected = SessionState::PictureInPicture { overlay };
        let new = SessionState::PictureInPicture {
            overlay: PipOverlay { playing, ..overlay },
        };
        self.transition_from(expected, new).await;
    }

    pub(super) async fn emit_position(&self) {
        let (position, duration) = self.state.read(|s| (s.current_time, s.duration)).await;
        self.events
            .emit(SessionEvent::PositionUpdated { position, duration });
    }

    pub(super) fn surface_name(surface: Surface) -> &'static str {
        match surface {
            Surface::Primary => "primary",
            Surface::Overlay => "overlay",
        }
    }
}
