#![forbid(unsafe_code)]

//! Per-instance change emitter with RAII subscriptions.
//!
//! # Design
//!
//! [`ChangeEmitter<S>`] keeps an ordered list of `(new, prev)` listeners in
//! shared storage (`Rc<RefCell<..>>`). Each [`Subscription`] holds a weak
//! back-reference plus the listener's id, so unsubscribing never keeps the
//! emitter alive and outliving the emitter is harmless.
//!
//! `emit` snapshots the listener list before calling anything and releases
//! its borrow for the duration of the fan-out. Consequently:
//!
//! - listeners may subscribe, unsubscribe, or re-emit from inside a callback;
//! - a listener removed mid-cycle still runs in that cycle if it was in the
//!   snapshot;
//! - a listener added mid-cycle first runs on the next emit.
//!
//! # Failure Modes
//!
//! - **Listener panic**: propagates out of `emit`; listeners after the
//!   panicking one are skipped for that cycle. The emitter itself stays
//!   usable since no borrow is held across callbacks.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// A change listener, called with `(new, prev)`.
type Listener<S> = Rc<dyn Fn(&S, &S)>;

struct ListenerSet<S> {
    next_id: u64,
    /// Registration order is notification order.
    entries: Vec<(u64, Listener<S>)>,
}

/// Type-erased removal so [`Subscription`] need not carry `S`.
trait Detach {
    fn detach_listener(&self, id: u64) -> bool;
}

impl<S> Detach for RefCell<ListenerSet<S>> {
    fn detach_listener(&self, id: u64) -> bool {
        let removed = {
            let mut set = self.borrow_mut();
            set.entries
                .iter()
                .position(|(entry_id, _)| *entry_id == id)
                .map(|idx| set.entries.remove(idx))
        };
        // The listener (and anything it captured) drops here, outside the borrow.
        removed.is_some()
    }
}

/// An ordered set of `(new, prev)` listeners.
///
/// Cloning a `ChangeEmitter` creates a new handle to the **same** listener
/// set.
pub struct ChangeEmitter<S> {
    inner: Rc<RefCell<ListenerSet<S>>>,
}

impl<S> Clone for ChangeEmitter<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<S: 'static> Default for ChangeEmitter<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> std::fmt::Debug for ChangeEmitter<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangeEmitter")
            .field("listener_count", &self.inner.borrow().entries.len())
            .finish()
    }
}

impl<S: 'static> ChangeEmitter<S> {
    /// Create an emitter with no listeners.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(ListenerSet {
                next_id: 0,
                entries: Vec::new(),
            })),
        }
    }

    /// Register a listener. It is called on every later [`emit`](Self::emit)
    /// until the returned [`Subscription`] is unsubscribed or dropped.
    ///
    /// Registering the same closure twice yields two independent listeners.
    pub fn on(&self, listener: impl Fn(&S, &S) + 'static) -> Subscription {
        let id = {
            let mut set = self.inner.borrow_mut();
            let id = set.next_id;
            set.next_id += 1;
            let listener: Listener<S> = Rc::new(listener);
            set.entries.push((id, listener));
            id
        };
        let weak: Weak<RefCell<ListenerSet<S>>> = Rc::downgrade(&self.inner);
        let registry: Weak<dyn Detach> = weak;
        Subscription {
            registry: Some(registry),
            id,
        }
    }

    /// Call every registered listener once, in registration order, with
    /// `(new, prev)`. Returns the number of listeners called.
    pub fn emit(&self, new: &S, prev: &S) -> usize {
        let snapshot: Vec<Listener<S>> = self
            .inner
            .borrow()
            .entries
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();
        for listener in &snapshot {
            listener(new, prev);
        }
        snapshot.len()
    }

    /// Number of registered listeners.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.borrow().entries.len()
    }

    /// Whether no listeners are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Handle for a registered listener.
///
/// Dropping the `Subscription` (or calling [`unsubscribe`](Self::unsubscribe))
/// removes the listener. Call [`detach`](Self::detach) to keep the listener
/// registered for as long as its emitter lives.
#[must_use = "dropping a Subscription unsubscribes its listener immediately"]
pub struct Subscription {
    registry: Option<Weak<dyn Detach>>,
    id: u64,
}

impl Subscription {
    /// Remove the listener. Returns `true` if it was still registered.
    pub fn unsubscribe(mut self) -> bool {
        self.remove()
    }

    /// Give up the handle without removing the listener.
    pub fn detach(mut self) {
        self.registry = None;
    }

    fn remove(&mut self) -> bool {
        self.registry
            .take()
            .and_then(|registry| registry.upgrade())
            .is_some_and(|registry| registry.detach_listener(self.id))
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.remove();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}
