#![forbid(unsafe_code)]

//! Observable state container with a form-record editor on top.
//!
//! # Role in nanostore
//! `nanostore` owns state. A [`Store`] holds exactly one value, replaces it
//! through a single update path, and synchronously tells its listeners about
//! every change as `(new, prev)`. A [`FormStore`] is a store over a
//! string-keyed record that adds per-field edits, input-event binding, and
//! reset-to-initial, all funnelled through that same update path.
//!
//! # Primary responsibilities
//! - **Store**: identity-checked replacement, updater functions, silent writes.
//! - **ChangeEmitter**: per-instance, in-order listener fan-out.
//! - **FormStore**: copy-on-write field edits over [`FormData`].
//!
//! # How it fits in the system
//! Identity comparison and the input event model live in `nanostore-core`
//! and are re-exported here so most users only depend on this crate.

pub mod config;
pub mod error;
pub mod reactive;

pub use config::StoreConfig;
pub use error::FormError;
pub use nanostore_core::{ControlKind, Identity, InputChangeEvent, InputTarget};
pub use reactive::{ChangeEmitter, FormData, FormStore, SetStateAction, Store, Subscription};
