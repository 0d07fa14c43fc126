use std::time::Duration;

use super::overlay::Size;

/// Configuration for playback session behavior
#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    /// Interval between progress checkpoints while playing (default: 5 seconds)
    pub progress_interval: Duration,

    /// Percentage at or above which content counts as watched (default: 95.0)
    pub completion_threshold: f64,

    /// Volume applied at mount (default: 1.0)
    pub initial_volume: f32,

    /// Area the picture-in-picture overlay may move within (default: 1280x720)
    pub viewport: Size,

    /// Initial overlay size (default: 320x180)
    pub overlay_size: Size,

    /// Smallest size the overlay can be resized to (default: 200x112)
    pub overlay_min_size: Size,

    /// Gap kept between the overlay and the viewport edge when it opens (default: 16)
    pub overlay_margin: f64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            progress_interval: Duration::from_secs(5),
            completion_threshold: 95.0,
            initial_volume: 1.0,
            viewport: Size::new(1280.0, 720.0),
            overlay_size: Size::new(320.0, 180.0),
            overlay_min_size: Size::new(200.0, 112.0),
            overlay_margin: 16.0,
        }
    }
}

impl SessionConfig {
    /// Create a new config builder
    #[must_use]
    pub fn builder() -> SessionConfigBuilder {
        SessionConfigBuilder::default()
    }
}

/// Builder for `SessionConfig`
#[derive(Debug, Clone, Default)]
pub struct SessionConfigBuilder {
    config: SessionConfig,
}

impl SessionConfigBuilder {
    /// Set the progress checkpoint interval
    #[must_use]
    pub fn progress_interval(mut self, interval: Duration) -> Self {
        self.config.progress_interval = interval;
        self
    }

    /// Set the completion threshold in percent
    #[must_use]
    pub fn completion_threshold(mut self, percent: f64) -> Self {
        self.config.completion_threshold = percent.clamp(0.0, 100.0);
        self
    }

    /// Set the volume applied at mount
    #[must_use]
    pub fn initial_volume(mut self, volume: f32) -> Self {
        self.config.initial_volume = volume.clamp(0.0, 1.0);
        self
    }

    /// Set the viewport the overlay lives in
    #[must_use]
    pub fn viewport(mut self, width: f64, height: f64) -> Self {
        self.config.viewport = Size::new(width, height);
        self
    }

    /// Set the initial overlay size
    #[must_use]
    pub fn overlay_size(mut self, width: f64, height: f64) -> Self {
        self.config.overlay_size = Size::new(width, height);
        self
    }

    /// Set the minimum overlay size
    #[must_use]
    pub fn overlay_min_size(mut self, width: f64, height: f64) -> Self {
        self.config.overlay_min_size = Size::new(width, height);
        self
    }

    /// Set the overlay margin
    #[must_use]
    pub fn overlay_margin(mut self, margin: f64) -> Self {
        self.config.overlay_margin = margin.max(0.0);
        self
    }

    /// Build the configuration
    #[must_use]
    pub fn build(self) -> SessionConfig {
        self.config
    }
}
