use serde::{Deserialize, Serialize};

/// Stored watch progress for one piece of content
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProgressRecord {
    /// Percentage watched (0.0 - 100.0)
    pub percent_complete: f64,
    /// Last known total duration in seconds
    pub duration_seconds: f64,
}

impl ProgressRecord {
    /// Create a record, clamping the percentage into range
    #[must_use]
    pub fn new(percent_complete: f64, duration_seconds: f64) -> Self {
        let percent_complete = if percent_complete.is_finite() {
            percent_complete.clamp(0.0, 100.0)
        } else {
            0.0
        };
        Self {
            percent_complete,
            duration_seconds: if duration_seconds.is_finite() {
                duration_seconds.max(0.0)
            } else {
                0.0
            },
        }
    }

    /// Record for a position within a known duration
    #[must_use]
    pub fn at_position(position: f64, duration: f64) -> Self {
        if duration <= 0.0 || !duration.is_finite() {
            return Self::new(0.0, 0.0);
        }
        Self::new(position / duration * 100.0, duration)
    }

    /// Record for content watched to the end
    #[must_use]
    pub fn completed(duration_seconds: f64) -> Self {
        Self::new(100.0, duration_seconds)
    }

    /// Check if the content counts as watched
    #[must_use]
    pub fn is_completed(&self, threshold: f64) -> bool {
        self.percent_complete >= threshold
    }

    /// Check if a resume prompt should be offered
    #[must_use]
    pub fn is_resumable(&self, threshold: f64) -> bool {
        self.percent_complete > 0.0 && !self.is_completed(threshold)
    }

    /// Position in seconds this record corresponds to
    #[must_use]
    pub fn position_secs(&self) -> f64 {
        self.percent_complete * self.duration_seconds / 100.0
    }
}
