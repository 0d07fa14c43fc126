//! Volume, mute and fullscreen

use super::session::PlaybackSession;
use super::volume::Volume;
use crate::error::SessionError;
use crate::state::SessionEvent;
use crate::types::Presentation;

impl PlaybackSession {
    /// Set the volume level (clamped to `0.0 - 1.0`)
    ///
    /// A level of zero shows as muted without touching the mute flag.
    pub async fn set_volume(&self, level: f32) {
        let volume = Volume::new(level);
        self.inner.state.update(|s| s.audio.set(volume)).await;

        for element in [&self.inner.surfaces.primary, &self.inner.surfaces.overlay] {
            element.set_volume(volume.as_f32()).await;
        }
        self.inner.events.emit(SessionEvent::VolumeChanged {
            volume: volume.as_f32(),
        });
    }

    /// Step the volume up or down by `delta`
    pub async fn adjust_volume(&self, delta: f32) {
        let current = self.inner.state.read(|s| s.audio.volume()).await;
        self.set_volume(current.as_f32() + delta).await;
    }

    /// Flip the mute flag
    ///
    /// Unmuting at zero volume brings back the last audible level.
    pub async fn toggle_mute(&self) {
        let (before, after, muted) = self
            .inner
            .state
            .update(|s| {
                let before = s.audio.volume();
                let muted = s.audio.toggle_mute();
                (before, s.audio.volume(), muted)
            })
            .await;

        for element in [&self.inner.surfaces.primary, &self.inner.surfaces.overlay] {
            element.set_muted(muted).await;
            if after != before {
                element.set_volume(after.as_f32()).await;
            }
        }

        tracing::debug!(muted, volume = after.as_f32(), "Mute toggled");
        self.inner.events.emit(SessionEvent::MuteChanged { muted });
        if after != before {
            self.inner.events.emit(SessionEvent::VolumeChanged {
                volume: after.as_f32(),
            });
        }
    }

    /// Enter or leave native fullscreen on the player container
    ///
    /// Ignored while picture-in-picture is open. A denied request is logged
    /// and leaves the presentation unchanged.
    pub async fn toggle_fullscreen(&self) {
        let inner = &self.inner;
        let (pip, presentation) = inner
            .state
            .read(|s| (s.is_pip_active(), s.presentation))
            .await;

        if pip {
            tracing::debug!("toggle_fullscreen ignored while picture-in-picture is open");
            return;
        }

        let (result, target) = match presentation {
            Presentation::Inline => (
                inner.surfaces.fullscreen.request_fullscreen().await,
                Presentation::Fullscreen,
            ),
            Presentation::Fullscreen => (
                inner.surfaces.fullscreen.exit_fullscreen().await,
                Presentation::Inline,
            ),
        };

        match result {
            Ok(()) => inner.set_presentation(target).await,
            Err(message) => {
                inner
                    .record_error(SessionError::FullscreenDenied { message })
                    .await;
            }
        }
    }
}

impl super::session::SessionInner {
    pub(super) async fn set_presentation(&self, presentation: Presentation) {
        let old = self
            .state
            .update(|s| std::mem::replace(&mut s.presentation, presentation))
            .await;
        if old != presentation {
            tracing::debug!(?presentation, "Presentation changed");
            self.events
                .emit(SessionEvent::PresentationChanged { presentation });
        }
    }
}
