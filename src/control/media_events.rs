//! Media element event handling

use super::session::{PlaybackSession, SessionInner};
use super::volume::Volume;
use crate::error::SessionError;
use crate::media::{MediaError, MediaEvent, Surface};
use crate::state::SessionEvent;
use crate::types::{Presentation, ProgressRecord, SessionState};

/// How far a reported seek position may land from the requested target
const SEEK_TOLERANCE_SECS: f64 = 0.5;

impl PlaybackSession {
    /// Feed a notification from one of the media elements
    ///
    /// Events are applied in the order they arrive. Events from the surface
    /// that is not currently in charge (the inline element while the overlay
    /// is open, or the overlay after it closed) are dropped.
    pub async fn handle_media_event(&self, surface: Surface, event: MediaEvent) {
        let inner = &self.inner;
        let active = inner.state.read(|s| s.state.active_surface()).await;
        if surface != active {
            tracing::debug!(
                surface = SessionInner::surface_name(surface),
                ?event,
                "Event from inactive surface dropped"
            );
            return;
        }

        match event {
            MediaEvent::LoadedMetadata { duration } => inner.on_loaded_metadata(duration).await,
            MediaEvent::TimeUpdate { current_time } => inner.on_time_update(current_time).await,
            MediaEvent::Seeked { current_time } => inner.on_seeked(current_time).await,
            MediaEvent::Play => inner.on_play_state(true).await,
            MediaEvent::Pause => inner.on_play_state(false).await,
            MediaEvent::Ended => inner.on_ended().await,
            MediaEvent::VolumeChange { volume, muted } => {
                let volume = Volume::new(volume);
                inner.state.update(|s| s.audio.sync(volume, muted)).await;
                inner.events.emit(SessionEvent::VolumeChanged {
                    volume: volume.as_f32(),
                });
                inner.events.emit(SessionEvent::MuteChanged { muted });
            }
            MediaEvent::FullscreenChange { active } => {
                let presentation = if active {
                    Presentation::Fullscreen
                } else {
                    Presentation::Inline
                };
                inner.set_presentation(presentation).await;
            }
            MediaEvent::Error(error) => inner.on_media_error(error).await,
        }
    }
}

impl SessionInner {
    async fn on_loaded_metadata(&self, duration: f64) {
        let duration = if duration.is_finite() {
            duration.max(0.0)
        } else {
            0.0
        };

        let previous = self
            .state
            .update(|s| {
                s.duration = duration;
                s.metadata_loaded = true;
                s.current_time = s.clamp_time(s.current_time);
                s.state
            })
            .await;

        tracing::debug!(content_id = %self.content_id, duration, "Metadata loaded");

        if previous == SessionState::Initializing {
            self.transition_from(SessionState::Initializing, SessionState::Paused)
                .await;
        }
        self.emit_position().await;
    }

    async fn on_time_update(&self, current_time: f64) {
        let applied = self
            .state
            .update(|s| {
                if s.pending_seek.is_some() || s.state == SessionState::Ended {
                    false
                } else {
                    s.current_time = s.clamp_time(current_time);
                    true
                }
            })
            .await;

        if applied {
            self.emit_position().await;
        }
    }

    /// Settle the pending seek once the element reports landing on it
    ///
    /// A `Seeked` for an older target leaves the newer one pending.
    async fn on_seeked(&self, current_time: f64) {
        let settled = self
            .state
            .update(|s| {
                let reported = s.clamp_time(current_time);
                match s.pending_seek {
                    Some(target) if (reported - target).abs() > SEEK_TOLERANCE_SECS => false,
                    _ => {
                        s.pending_seek = None;
                        s.current_time = reported;
                        true
                    }
                }
            })
            .await;

        if settled {
            self.emit_position().await;
        } else {
            tracing::debug!(current_time, "Seeked for a superseded target ignored");
        }
    }

    /// Keep the state in step with play/pause triggered outside the controller
    async fn on_play_state(&self, playing: bool) {
        let state = self.state.read(|s| s.state).await;
        match (state, playing) {
            (SessionState::Paused, true) => {
                self.transition_from(state, SessionState::Playing).await;
            }
            (SessionState::Playing, false) => {
                self.transition_from(state, SessionState::Paused).await;
            }
            (SessionState::PictureInPicture { overlay }, _) if overlay.playing != playing => {
                self.set_overlay_playing(overlay, playing).await;
            }
            _ => {
                tracing::trace!(state = state.name(), playing, "Play state event ignored");
            }
        }
    }

    async fn on_ended(&self) {
        let (old, duration) = self
            .state
            .update(|s| {
                let old = std::mem::replace(&mut s.state, SessionState::Ended);
                s.pending_seek = None;
                s.current_time = s.duration;
                (old, s.duration)
            })
            .await;

        if old == SessionState::Ended {
            return;
        }

        tracing::info!(
            content_id = %self.content_id,
            "Session state {} -> {}",
            old.name(),
            SessionState::Ended.name()
        );
        self.events.emit(SessionEvent::StateChanged {
            old,
            new: SessionState::Ended,
        });
        self.emit_position().await;
        self.save_progress(ProgressRecord::completed(duration)).await;
    }

    /// Keep what was watched, stop, and wait for the user to try again
    async fn on_media_error(&self, error: MediaError) {
        self.record_error(SessionError::Media(error)).await;

        let (position, state) = self.state.read(|s| (s.current_time, s.state)).await;
        if position > 0.0 {
            self.checkpoint().await;
        }

        match state {
            SessionState::Playing => {
                self.transition_from(state, SessionState::Paused).await;
            }
            SessionState::PictureInPicture { overlay } if overlay.playing => {
                self.set_overlay_playing(overlay, false).await;
            }
            _ => {}
        }
    }
}
