//! State management and events

mod container;
mod events;

pub use container::SessionContainer;
pub use events::{EventBus, EventFilter, SessionEvent};
