//! Synchronous notification channels.
//!
//! The grid state store publishes on two `UpdateChannel`s: one for visually
//! relevant changes and one for every semantic change. Listeners run in-line
//! with the mutating call, in registration order.

use crate::game::types::GridUpdate;

pub type Listener = Box<dyn FnMut(&GridUpdate)>;

/// Handle returned by `subscribe`, used to unsubscribe later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

#[derive(Default)]
pub struct UpdateChannel {
    listeners: Vec<(SubscriptionId, Listener)>,
    next_id: u64,
}

impl UpdateChannel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&GridUpdate) + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns false if the id was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    pub fn broadcast(&mut self, update: &GridUpdate) {
        for (_, listener) in self.listeners.iter_mut() {
            listener(update);
        }
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl std::fmt::Debug for UpdateChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpdateChannel")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
