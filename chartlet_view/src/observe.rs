// Copyright 2026 the Chartlet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Synchronous observer lists.
//!
//! Mutable map entities (viewport, overlays, collections) notify interested
//! parties through a plain callback list rather than through any UI binding
//! system. Callbacks run synchronously on the mutating thread, in
//! registration order, before the mutator returns; by the time a callback
//! runs the new state is fully applied and safe to read through whatever
//! shared handle the observer holds.

use core::fmt;
use smallvec::SmallVec;

/// Handle identifying a registered observer, used to unsubscribe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

/// An ordered list of observers for events of type `E`.
///
/// Events are passed by value to every registered callback, so `E` is
/// expected to be a small `Clone` type (a flags mask, an enum with an index).
pub struct Observers<E> {
    entries: SmallVec<[(ObserverId, Box<dyn FnMut(E)>); 2]>,
    next_id: u64,
}

impl<E: Clone> Default for Observers<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> fmt::Debug for Observers<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observers")
            .field("len", &self.entries.len())
            .field("next_id", &self.next_id)
            .finish()
    }
}

impl<E: Clone> Observers<E> {
    /// Creates an empty observer list.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: SmallVec::new(),
            next_id: 0,
        }
    }

    /// Registers a callback and returns its handle.
    pub fn subscribe(&mut self, callback: impl FnMut(E) + 'static) -> ObserverId {
        let id = ObserverId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, Box::new(callback)));
        id
    }

    /// Removes a previously registered callback.
    ///
    /// Returns `false` if the handle is unknown (already removed).
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        match self.entries.iter().position(|(entry_id, _)| *entry_id == id) {
            Some(index) => {
                self.entries.remove(index);
                true
            }
            None => false,
        }
    }

    /// Delivers an event to every observer, in registration order.
    pub fn notify(&mut self, event: E) {
        for (_, callback) in &mut self.entries {
            callback(event.clone());
        }
    }

    /// Number of registered observers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no observers are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn notify_runs_callbacks_in_registration_order() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut observers = Observers::new();

        let first = Rc::clone(&seen);
        observers.subscribe(move |event: u32| first.borrow_mut().push((1, event)));
        let second = Rc::clone(&seen);
        observers.subscribe(move |event: u32| second.borrow_mut().push((2, event)));

        observers.notify(7);
        assert_eq!(*seen.borrow(), vec![(1, 7), (2, 7)]);
    }

    #[test]
    fn unsubscribe_stops_delivery() {
        let count = Rc::new(RefCell::new(0));
        let mut observers = Observers::new();

        let counter = Rc::clone(&count);
        let id = observers.subscribe(move |_: u32| *counter.borrow_mut() += 1);

        observers.notify(0);
        assert!(observers.unsubscribe(id));
        observers.notify(0);

        assert_eq!(*count.borrow(), 1);
        assert!(!observers.unsubscribe(id));
    }
}
