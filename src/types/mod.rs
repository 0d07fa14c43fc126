//! Core types module

mod config;
mod content;
mod overlay;
mod progress;
mod state;


pub use config::{SessionConfig, SessionConfigBuilder};
pub use content::{ContentId, MediaSource};
pub use overlay::{OverlayGeometry, Point, Size};
pub use progress::ProgressRecord;
pub use state::{PipOverlay, Presentation, ResumeOffer, SessionSnapshot, SessionState};
