//! Store
//!
//! Owns the `RootState`. All writes go through `dispatch`, which runs the
//! reducer under the write lock so no two writes interleave, then publishes
//! the action to subscribers.

use super::actions::Action;
use super::root::RootState;
use super::slice::Ticket;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::{broadcast, RwLock};
use tracing::trace;

const EVENT_CAPACITY: usize = 256;

/// Serialized state container
#[derive(Debug)]
pub struct Store {
    state: RwLock<RootState>,
    events: broadcast::Sender<Action>,
    tickets: AtomicU64,
}

impl Default for Store {
    fn default() -> Self {
        Self::new(RootState::default())
    }
}

impl Store {
    /// Store starting from `initial`
    pub fn new(initial: RootState) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            state: RwLock::new(initial),
            events,
            tickets: AtomicU64::new(0),
        }
    }

    /// Allocate a ticket newer than every ticket handed out so far
    pub fn next_ticket(&self) -> Ticket {
        Ticket::new(self.tickets.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Apply `action` and notify subscribers
    pub async fn dispatch(&self, action: Action) {
        let event = (self.events.receiver_count() > 0).then(|| action.clone());
        trace!(?action, "Dispatching");
        let mut state = self.state.write().await;
        state.reduce(action);
        // Published under the lock so subscribers see reducer order
        if let Some(event) = event {
            // Receivers may have gone away in between; nothing to do then
            let _ = self.events.send(event);
        }
    }

    /// Clear every entity slice, ignoring requests still in flight
    ///
    /// Returns the fence: requests with an older ticket no longer apply.
    pub async fn reset(&self) -> Ticket {
        let fence = self.next_ticket();
        self.dispatch(Action::Reset(fence)).await;
        fence
    }

    /// Copy of the current state
    pub async fn snapshot(&self) -> RootState {
        self.state.read().await.clone()
    }

    /// Read the current state without copying it
    pub async fn read<R>(&self, f: impl FnOnce(&RootState) -> R) -> R {
        let state = self.state.read().await;
        f(&state)
    }

    /// Receive every action dispatched from now on
    pub fn subscribe(&self) -> broadcast::Receiver<Action> {
        self.events.subscribe()
    }
}
