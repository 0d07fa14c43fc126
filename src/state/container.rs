//! Centralized session state

use tokio::sync::{RwLock, watch};

use crate::types::SessionSnapshot;

/// Session snapshot with change notifications
pub struct SessionContainer {
    /// Current state
    state: RwLock<SessionSnapshot>,
    /// State change sender
    tx: watch::Sender<SessionSnapshot>,
    /// State change receiver (clone for subscribers)
    rx: watch::Receiver<SessionSnapshot>,
}

impl SessionContainer {
    /// Create a new state container
    #[must_use]
    pub fn new(initial: SessionSnapshot) -> Self {
        let (tx, rx) = watch::channel(initial.clone());
        Self {
            state: RwLock::new(initial),
            tx,
            rx,
        }
    }

    /// Get current state
    pub async fn get(&self) -> SessionSnapshot {
        self.state.read().await.clone()
    }

    /// Read a single value without cloning the whole snapshot
    pub async fn read<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&SessionSnapshot) -> R,
    {
        f(&*self.state.read().await)
    }

    /// Subscribe to state changes
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.rx.clone()
    }

    /// Update state with a function, returning what the function returns
    pub async fn update<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut SessionSnapshot) -> R,
    {
        let mut state = self.state.write().await;
        let result = f(&mut state);
        let _ = self.tx.send(state.clone());
        result
    }
}
