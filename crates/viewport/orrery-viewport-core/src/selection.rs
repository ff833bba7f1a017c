//! Selection notifications and their subscribers.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "ids", rename_all = "snake_case")]
pub enum SelectionEvent<Id> {
    /// A click landed on an entity.
    Selected(Id),
    /// Marquee selection; may be empty.
    MultiSelected(Vec<Id>),
    /// The entity under the pointer changed (`None` when it left all entities).
    Hovered(Option<Id>),
    /// A click landed on empty space.
    Cleared,
}

/// Handle returned by [`SelectionObservers::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    #[inline]
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

pub type SelectionCallback<Id> = Box<dyn FnMut(&SelectionEvent<Id>)>;

/// Subscribers notified in subscription order.
pub struct SelectionObservers<Id> {
    next_id: u64,
    observers: IndexMap<SubscriptionId, SelectionCallback<Id>>,
}

impl<Id> Default for SelectionObservers<Id> {
    fn default() -> Self {
        Self {
            next_id: 0,
            observers: IndexMap::new(),
        }
    }
}

impl<Id> SelectionObservers<Id> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&SelectionEvent<Id>) + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.observers.insert(id, Box::new(callback));
        id
    }

    /// Returns whether `id` was subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.shift_remove(&id).is_some()
    }

    pub fn emit(&mut self, event: &SelectionEvent<Id>) {
        for callback in self.observers.values_mut() {
            callback(event);
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.observers.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    pub fn clear(&mut self) {
        self.observers.clear();
    }
}

impl<Id> std::fmt::Debug for SelectionObservers<Id> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectionObservers")
            .field("subscribers", &self.observers.len())
            .finish()
    }
}
