//! Single-writer state container for a picker instance.
//!
//! All mutation flows through [`Store::dispatch`]: an [`Action`] is folded
//! over the current snapshot by the pure reducers in [`reducer`], the result
//! replaces the snapshot, and every subscribed listener is notified. Listeners
//! receive no payload; they pull the fresh snapshot through [`Store::state`]
//! when they run.
//!
//! The store also owns the [`IdSource`] counters so that entity ids are
//! assigned exactly once, at reduction time, and never reused within a
//! session even after removals.

pub mod actions;
pub mod reducer;
pub mod state;

pub use actions::Action;
pub use reducer::reduce;
pub use state::State;

use std::fmt;

/// Monotonic id counters for the three collections.
///
/// Counters start at zero and pre-increment, so the first assigned id of each
/// collection is 1. They advance independently of collection length: removal
/// is a soft-delete and frees nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdSource {
    next_item: u64,
    next_choice: u64,
    next_group: u64,
}

impl IdSource {
    /// Returns the next item id.
    pub fn next_item_id(&mut self) -> u64 {
        self.next_item += 1;
        self.next_item
    }

    /// Returns the next choice id.
    pub fn next_choice_id(&mut self) -> u64 {
        self.next_choice += 1;
        self.next_choice
    }

    /// Returns the next group id.
    pub fn next_group_id(&mut self) -> u64 {
        self.next_group += 1;
        self.next_group
    }
}

/// Holds the current [`State`] and the listeners observing it.
///
/// # Example
///
/// ```
/// use tagbox::store::{actions, Store};
///
/// let mut store = Store::new();
/// store.dispatch(actions::add_item("rust".to_string(), None, None));
/// assert_eq!(store.state().item_values(), vec!["rust".to_string()]);
/// ```
#[derive(Default)]
pub struct Store {
    state: State,
    ids: IdSource,
    listeners: Vec<Box<dyn FnMut()>>,
}

impl Store {
    /// Creates an empty store with fresh id counters and no listeners.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies an action and notifies every listener.
    ///
    /// Listeners run synchronously after the snapshot swap, in subscription
    /// order. Dispatch is not reentrant: a listener must not dispatch from
    /// inside its callback.
    pub fn dispatch(&mut self, action: Action) {
        tracing::trace!(action = ?action, "dispatching");
        self.state = reduce(&self.state, &action, &mut self.ids);
        for listener in &mut self.listeners {
            listener();
        }
    }

    /// Returns the current snapshot.
    ///
    /// Cloning a [`State`] copies three `Arc` handles, not the collections,
    /// so snapshots are cheap to take and to hold across renders.
    #[must_use]
    pub fn state(&self) -> State {
        self.state.clone()
    }

    /// Registers a listener invoked after every dispatch.
    pub fn subscribe(&mut self, listener: Box<dyn FnMut()>) {
        self.listeners.push(listener);
    }
}

impl fmt::Debug for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("state", &self.state)
            .field("ids", &self.ids)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}
