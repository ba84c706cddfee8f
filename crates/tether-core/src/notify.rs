#![forbid(unsafe_code)]

//! Subscriber lists with RAII unsubscription.
//!
//! A [`Notifier<E>`] holds a list of weakly-referenced callbacks; the strong
//! half of each callback lives inside the [`Subscription`] returned from
//! [`Notifier::subscribe`]. Dropping the subscription is the only way to
//! unsubscribe: the callback's allocation dies and the notifier prunes the
//! dead entry lazily during the next emission.
//!
//! # Invariants
//!
//! 1. After a `Subscription` is dropped, its callback never fires again.
//! 2. Subscribers are notified in registration order.
//! 3. `emit` tolerates subscribe/unsubscribe from inside a callback;
//!    callbacks added during an emission are not invoked by that emission.

use std::any::Any;
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use tracing::trace;

struct Slot<E> {
    callback: Box<dyn Fn(&E)>,
}

/// A single-threaded subscriber list.
pub struct Notifier<E> {
    slots: RefCell<Vec<Weak<Slot<E>>>>,
}

impl<E: 'static> Notifier<E> {
    /// Create an empty notifier.
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: RefCell::new(Vec::new()),
        }
    }

    /// Subscribe a callback. The callback fires on every [`emit`](Self::emit)
    /// until the returned [`Subscription`] is dropped.
    #[must_use = "dropping the Subscription unsubscribes immediately"]
    pub fn subscribe(&self, callback: impl Fn(&E) + 'static) -> Subscription {
        let slot = Rc::new(Slot {
            callback: Box::new(callback),
        });
        self.slots.borrow_mut().push(Rc::downgrade(&slot));
        Subscription { _slot: slot }
    }

    /// Emit an event to all live subscribers, in registration order.
    pub fn emit(&self, event: &E) {
        // Snapshot so callbacks may subscribe/unsubscribe reentrantly.
        let snapshot: Vec<Weak<Slot<E>>> = self.slots.borrow().clone();
        let mut dead = 0usize;
        for weak in &snapshot {
            match weak.upgrade() {
                Some(slot) => (slot.callback)(event),
                None => dead += 1,
            }
        }
        if dead > 0 {
            self.prune();
            trace!(pruned = dead, "dropped dead subscribers during emit");
        }
    }

    /// Number of live subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.slots
            .borrow()
            .iter()
            .filter(|weak| weak.strong_count() > 0)
            .count()
    }

    fn prune(&self) {
        self.slots
            .borrow_mut()
            .retain(|weak| weak.strong_count() > 0);
    }
}

impl<E: 'static> Default for Notifier<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> fmt::Debug for Notifier<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Notifier")
            .field("slots", &self.slots.borrow().len())
            .finish()
    }
}

/// RAII guard for a single subscription.
///
/// Holds the callback alive; dropping the guard deactivates it before the
/// next emission.
pub struct Subscription {
    _slot: Rc<dyn Any>,
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").finish()
    }
}
