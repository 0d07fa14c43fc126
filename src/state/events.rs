//! Event bus for session events

use tokio::sync::broadcast;

use crate::error::SessionError;
use crate::types::{ContentId, Presentation, ProgressRecord, SessionState};

/// Session events
#[derive(Debug, Clone)]
pub enum SessionEvent {
    // Lifecycle events
    /// Session mounted and read prior progress
    Mounted {
        /// Content being played
        content_id: ContentId,
        /// Whether a resume prompt is showing
        resume_offered: bool,
    },
    /// Session torn down
    Unmounted {
        /// Content that was playing
        content_id: ContentId,
    },

    // Playback events
    /// Lifecycle state changed
    StateChanged {
        /// Old state
        old: SessionState,
        /// New state
        new: SessionState,
    },
    /// Position updated
    PositionUpdated {
        /// New position
        position: f64,
        /// Duration
        duration: f64,
    },

    // Volume events
    /// Volume changed
    VolumeChanged {
        /// New volume level
        volume: f32,
    },
    /// Mute state changed
    MuteChanged {
        /// New mute state
        muted: bool,
    },

    // Presentation events
    /// Fullscreen entered or left
    PresentationChanged {
        /// New presentation
        presentation: Presentation,
    },

    // Persistence events
    /// Progress was written to the store
    ProgressSaved {
        /// Content the record belongs to
        content_id: ContentId,
        /// Record written
        record: ProgressRecord,
    },

    // Error events
    /// A failure was caught and swallowed
    Error {
        /// The failure
        error: SessionError,
    },
}

/// Event bus for distributing events
#[derive(Debug)]
pub struct EventBus {
    /// Broadcast sender
    tx: broadcast::Sender<SessionEvent>,
}

impl EventBus {
    /// Create a new event bus
    #[must_use]
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(100);
        Self { tx }
    }

    /// Subscribe to events
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.tx.subscribe()
    }

    /// Emit an event
    pub fn emit(&self, event: SessionEvent) {
        // Ignore error if no receivers
        let _ = self.tx.send(event);
    }

    /// Get subscriber count
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Event filter for selective subscription
pub struct EventFilter {
    rx: broadcast::Receiver<SessionEvent>,
    filter: Box<dyn Fn(&SessionEvent) -> bool + Send>,
}

impl EventFilter {
    /// Create a filtered event receiver
    pub fn new<F>(bus: &EventBus, filter: F) -> Self
    where
        F: Fn(&SessionEvent) -> bool + Send + 'static,
    {
        Self {
            rx: bus.subscribe(),
            filter: Box::new(filter),
        }
    }

    /// Receive next matching event
    pub async fn recv(&mut self) -> Option<SessionEvent> {
        loop {
            match self.rx.recv().await {
                Ok(event) if (self.filter)(&event) => return Some(event),
                Ok(_) | Err(broadcast::error::RecvError::Lagged(_)) => {}
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }

    /// Take the next matching event without waiting
    pub fn try_recv(&mut self) -> Option<SessionEvent> {
        loop {
            match self.rx.try_recv() {
                Ok(event) if (self.filter)(&event) => return Some(event),
                Ok(_) | Err(broadcast::error::TryRecvError::Lagged(_)) => {}
                Err(_) => return None,
            }
        }
    }
}

/// Helper functions for common filters
impl EventFilter {
    /// Filter for playback events only
    #[must_use]
    pub fn playback_events(bus: &EventBus) -> Self {
        Self::new(bus, |e| {
            matches!(
                e,
                SessionEvent::StateChanged { .. } | SessionEvent::PositionUpdated { .. }
            )
        })
    }

    /// Filter for progress writes only
    #[must_use]
    pub fn progress_events(bus: &EventBus) -> Self {
        Self::new(bus, |e| matches!(e, SessionEvent::ProgressSaved { .. }))
    }

    /// Filter for error events only
    #[must_use]
    pub fn error_events(bus: &EventBus) -> Self {
        Self::new(bus, |e| matches!(e, SessionEvent::Error { .. }))
    }
}
