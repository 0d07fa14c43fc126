//! Volume and mute handling

/// Volume level (0.0 = silent, 1.0 = max)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Volume(f32);

impl Volume {
    /// Minimum volume (silent)
    pub const MIN: Self = Self(0.0);
    /// Maximum volume
    pub const MAX: Self = Self(1.0);
    /// Default volume, matching a fresh media element
    pub const DEFAULT: Self = Self::MAX;

    /// Create a new volume level
    ///
    /// NaN is treated as silent.
    #[must_use]
    pub fn new(level: f32) -> Self {
        if level.is_nan() {
            Self::MIN
        } else {
            Self(level.clamp(0.0, 1.0))
        }
    }

    /// Get as f32 (0.0 - 1.0)
    #[must_use]
    pub fn as_f32(&self) -> f32 {
        self.0
    }

    /// Get as percentage (0 - 100)
    #[must_use]
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "Volume percentage fits in u8"
    )]
    pub fn as_percent(&self) -> u8 {
        (self.0 * 100.0).round() as u8
    }

    /// Create from percentage
    #[must_use]
    pub fn from_percent(percent: u8) -> Self {
        Self::new(f32::from(percent) / 100.0)
    }

    /// Check if effectively silent
    #[must_use]
    pub fn is_silent(&self) -> bool {
        self.0 < 0.001
    }

    /// Check if exactly zero
    ///
    /// Mute handling remembers every level above this, however quiet.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0 <= 0.0
    }

    /// Check if at maximum
    #[must_use]
    pub fn is_max(&self) -> bool {
        self.0 >= 0.999
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl From<f32> for Volume {
    fn from(v: f32) -> Self {
        Self::new(v)
    }
}

/// Volume and mute flag of one player
///
/// The mute flag is independent of the level, as on a native media element.
/// Muting never touches the level, so muting and unmuting again restores it
/// exactly. Unmuting while the level sits at zero brings back the last
/// audible level instead of staying silent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VolumeState {
    volume: Volume,
    muted: bool,
    last_audible: Volume,
}

impl VolumeState {
    /// Create a state at the given level, unmuted
    #[must_use]
    pub fn new(volume: Volume) -> Self {
        Self {
            volume,
            muted: false,
            last_audible: if volume.is_zero() {
                Volume::DEFAULT
            } else {
                volume
            },
        }
    }

    /// Current level
    #[must_use]
    pub fn volume(&self) -> Volume {
        self.volume
    }

    /// Current mute flag
    #[must_use]
    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Level unmute falls back to when the current level is zero
    #[must_use]
    pub fn last_audible(&self) -> Volume {
        self.last_audible
    }

    /// Set the level without changing the mute flag
    pub fn set(&mut self, volume: Volume) {
        self.volume = volume;
        if !volume.is_zero() {
            self.last_audible = volume;
        }
    }

    /// Flip the mute flag, returning the new flag
    pub fn toggle_mute(&mut self) -> bool {
        if self.muted {
            self.muted = false;
            if self.volume.is_zero() {
                self.volume = self.last_audible;
            }
        } else {
            self.muted = true;
        }
        self.muted
    }

    /// Adopt values reported by the element
    pub fn sync(&mut self, volume: Volume, muted: bool) {
        self.set(volume);
        self.muted = muted;
    }
}

impl Default for VolumeState {
    fn default() -> Self {
        Self::new(Volume::DEFAULT)
    }
}
