#![forbid(unsafe_code)]

//! Observable state for nanostore.
//!
//! This module provides the change-tracking primitives:
//!
//! - [`Store`]: a shared, identity-checked value container that notifies
//!   listeners with `(new, prev)` on every change.
//! - [`ChangeEmitter`]: the per-store listener set behind [`Store::subscribe`].
//! - [`Subscription`]: RAII guard that unsubscribes on drop.
//! - [`FormStore`]: a `Store` over a [`FormData`] record with field edits,
//!   input-event binding, and reset.
//!
//! # Architecture
//!
//! `Store<S>` uses `Rc<RefCell<..>>` for single-threaded shared ownership; it
//! is neither `Send` nor `Sync`. Each store owns its emitter, so listener sets
//! are never shared between stores. `FormStore` wraps a `Store` rather than
//! extending it and routes every edit through `Store::set_state_with`.
//!
//! # Invariants
//!
//! 1. Writing a value that is the same as the current one is a no-op.
//! 2. Listeners are notified synchronously, in subscription order.
//! 3. A write made from inside a listener is fully delivered before the outer
//!    notification continues.
//! 4. Dropping a [`Subscription`] removes its listener before the next
//!    notification cycle.

pub mod emitter;
pub mod form;
pub mod store;

pub use emitter::{ChangeEmitter, Subscription};
pub use form::{FormData, FormStore};
pub use store::{SetStateAction, Store};
