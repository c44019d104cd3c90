#![forbid(unsafe_code)]

//! Observable value container with identity-checked updates.
//!
//! # Design
//!
//! [`Store<S>`] holds one value of type `S` in shared storage
//! (`Rc<RefCell<..>>`) next to its own [`ChangeEmitter`]. Every notifying
//! write goes through one path:
//!
//! 1. resolve the next value (literal, or updater applied to the current one);
//! 2. if it is the [same](Identity::same) value as the current one, stop;
//! 3. otherwise commit it, bump the version, and call every listener with
//!    `(new, prev)` in subscription order before returning.
//!
//! # Performance
//!
//! | Operation          | Complexity                 |
//! |--------------------|----------------------------|
//! | `get_state()`      | O(1) + `S::clone`          |
//! | `set_state()`      | O(L) where L = listeners   |
//! | `set_state_with()` | O(L) + `S::clone` + updater |
//! | `subscribe()`      | O(1) amortized             |
//!
//! # Failure Modes
//!
//! - **Updater panic**: propagates to the caller; the state is untouched.
//! - **Listener panic**: propagates to the caller; the state is already
//!   committed and listeners after the panicking one are not called for that
//!   write.
//! - **Re-entrant set**: a listener may call `set_state` on the same store.
//!   The nested write completes, including its whole notification cycle,
//!   before the outer cycle moves on to its next listener. No borrow is held
//!   while listeners or updaters run.
//! - **Silent drift**: [`Store::set_state_silent`] skips notification, so
//!   listeners may have last seen a value that is no longer current.

use std::cell::RefCell;
use std::rc::Rc;

use nanostore_core::Identity;
use tracing::trace;

use super::emitter::{ChangeEmitter, Subscription};
use crate::config::StoreConfig;

/// The next value for a store: a literal replacement or a transform of the
/// current value.
pub enum SetStateAction<S> {
    /// Replace the state with this value.
    Replace(S),
    /// Compute the next state from the current one.
    Transform(Box<dyn FnOnce(&S) -> S>),
}

impl<S> SetStateAction<S> {
    /// Wrap an updater function.
    pub fn transform(f: impl FnOnce(&S) -> S + 'static) -> Self {
        Self::Transform(Box::new(f))
    }
}

impl<S> From<S> for SetStateAction<S> {
    fn from(value: S) -> Self {
        Self::Replace(value)
    }
}

impl<S: std::fmt::Debug> std::fmt::Debug for SetStateAction<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Replace(value) => f.debug_tuple("Replace").field(value).finish(),
            Self::Transform(_) => f.debug_tuple("Transform").finish_non_exhaustive(),
        }
    }
}

struct StateSlot<S> {
    state: S,
    /// Bumped once per notifying change; silent writes leave it alone.
    version: u64,
}

/// An observable value container.
///
/// Cloning a `Store` creates a new handle to the **same** state and listener
/// set; this is how listeners get hold of the store they observe.
///
/// # Invariants
///
/// 1. Writing a value that is the same as the current one (by [`Identity`])
///    changes nothing and notifies nobody.
/// 2. Listeners are notified in subscription order, synchronously, once per
///    committed change.
/// 3. `version` increases by exactly 1 per notifying change.
pub struct Store<S> {
    slot: Rc<RefCell<StateSlot<S>>>,
    emitter: ChangeEmitter<S>,
    config: Rc<StoreConfig>,
}

impl<S> Clone for Store<S> {
    fn clone(&self) -> Self {
        Self {
            slot: Rc::clone(&self.slot),
            emitter: self.emitter.clone(),
            config: Rc::clone(&self.config),
        }
    }
}

impl<S: std::fmt::Debug> std::fmt::Debug for Store<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let slot = self.slot.borrow();
        f.debug_struct("Store")
            .field("label", &self.config.label)
            .field("state", &slot.state)
            .field("version", &slot.version)
            .field("emitter", &self.emitter)
            .finish()
    }
}

impl<S: Identity + Clone + 'static> Store<S> {
    /// Create a store holding `initial`, with default config.
    #[must_use]
    pub fn new(initial: S) -> Self {
        Self::with_config(initial, StoreConfig::default())
    }

    /// Create a store holding `initial`.
    #[must_use]
    pub fn with_config(initial: S, config: StoreConfig) -> Self {
        Self {
            slot: Rc::new(RefCell::new(StateSlot {
                state: initial,
                version: 0,
            })),
            emitter: ChangeEmitter::new(),
            config: Rc::new(config),
        }
    }

    /// Get the current state.
    ///
    /// For shared-handle states (`Rc`, `Arc`) the result is the same value
    /// the store holds, not a deep copy.
    #[must_use]
    pub fn get_state(&self) -> S {
        self.slot.borrow().state.clone()
    }

    /// Access the current state by reference.
    ///
    /// # Panics
    ///
    /// Panics if `f` writes to this store.
    pub fn with_state<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        f(&self.slot.borrow().state)
    }

    /// Subscribe to changes. `listener` is called with `(new, prev)` after
    /// every notifying write until the returned [`Subscription`] is dropped
    /// or unsubscribed.
    pub fn subscribe(&self, listener: impl Fn(&S, &S) + 'static) -> Subscription {
        let sub = self.emitter.on(listener);
        if self.config.enable_logging {
            trace!(
                store = %self.config.label,
                listeners = self.emitter.len(),
                "listener subscribed"
            );
        }
        sub
    }

    /// Replace the state with `next` and notify listeners, unless `next` is
    /// the same value as the current state.
    pub fn set_state(&self, next: S) {
        self.commit(next);
    }

    /// Replace the state with `updater(current)` and notify listeners, unless
    /// the result is the same value as the current state.
    ///
    /// The updater runs without any borrow of the store held, so it may read
    /// the store. It should not write to it.
    pub fn set_state_with(&self, updater: impl FnOnce(&S) -> S) {
        let current = self.get_state();
        let next = updater(&current);
        drop(current);
        self.commit(next);
    }

    /// Apply a [`SetStateAction`].
    pub fn dispatch(&self, action: SetStateAction<S>) {
        match action {
            SetStateAction::Replace(next) => self.set_state(next),
            SetStateAction::Transform(updater) => self.set_state_with(updater),
        }
    }

    /// Like [`set_state_with`](Self::set_state_with) with a fallible updater.
    ///
    /// # Errors
    ///
    /// Returns the updater's error unchanged; the state is left untouched and
    /// no listener is called.
    pub fn try_set_state_with<E>(&self, updater: impl FnOnce(&S) -> Result<S, E>) -> Result<(), E> {
        let current = self.get_state();
        let next = updater(&current)?;
        drop(current);
        self.commit(next);
        Ok(())
    }

    /// Replace the state **without** the identity check and **without**
    /// notifying anyone.
    ///
    /// This deliberately bypasses the store's change contract: the version is
    /// not bumped and listeners keep whatever value they last saw. Use it for
    /// initialization or to skip a render cycle; keeping listeners consistent
    /// afterwards is the caller's job.
    pub fn set_state_silent(&self, next: S) {
        let prev = std::mem::replace(&mut self.slot.borrow_mut().state, next);
        // Dropped outside the borrow: `prev`'s destructor may read the store.
        drop(prev);
        if self.config.enable_logging {
            trace!(store = %self.config.label, "state replaced silently");
        }
    }

    /// Number of notifying changes so far.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.slot.borrow().version
    }

    /// Number of registered listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.emitter.len()
    }

    /// This store's configuration.
    #[must_use]
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Commit `next` and notify. Returns `false` on the identity short circuit.
    fn commit(&self, next: S) -> bool {
        let (prev, version) = {
            let mut slot = self.slot.borrow_mut();
            if next.same(&slot.state) {
                return false;
            }
            let prev = std::mem::replace(&mut slot.state, next.clone());
            slot.version += 1;
            (prev, slot.version)
        };
        if self.config.enable_logging {
            trace!(
                store = %self.config.label,
                version,
                listeners = self.emitter.len(),
                "state changed"
            );
        }
        self.emitter.emit(&next, &prev);
        true
    }
}
