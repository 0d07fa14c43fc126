//! Playback session control

mod controls;
mod media_events;
mod pip;
pub mod schedule;
pub mod session;
mod transport;
pub mod volume;

#[cfg(test)]
mod tests;

pub use schedule::PeriodicTask;
pub use session::{PlaybackSession, SessionBuilder};
pub use volume::{Volume, VolumeState};
