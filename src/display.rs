//! Time labels for the player controls

use crate::types::SessionSnapshot;

/// Format seconds as `m:ss`, or `h:mm:ss` from one hour up
///
/// Negative and non-finite values show as `0:00`.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "value is finite, non-negative and floored"
)]
pub fn format_timestamp(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };

    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;

    if hours > 0 {
        format!("{hours}:{minutes:02}:{secs:02}")
    } else {
        format!("{minutes}:{secs:02}")
    }
}

/// `elapsed / total` label for the scrubber
#[must_use]
pub fn progress_label(snapshot: &SessionSnapshot) -> String {
    format!(
        "{} / {}",
        format_timestamp(snapshot.current_time),
        format_timestamp(snapshot.duration)
    )
}

/// Text for the resume prompt button, e.g. `Resume from 1:23:05`
#[must_use]
pub fn resume_label(snapshot: &SessionSnapshot) -> Option<String> {
    snapshot
        .resume_offer()
        .map(|offer| format!("Resume from {}", format_timestamp(offer.offered_time)))
}
