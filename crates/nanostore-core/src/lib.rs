#![forbid(unsafe_code)]

//! Core: identity comparison and input-change events.
//!
//! # Role in nanostore
//! `nanostore-core` is the shared vocabulary. It defines what it means for two
//! state values to be "the same" ([`Identity`]) and the shape of the input
//! events a form editor consumes ([`InputChangeEvent`]).
//!
//! # How it fits in the system
//! The store crate (`nanostore`) is generic over any `S: Identity` and
//! consumes `InputChangeEvent` values in its record editor. Nothing here
//! allocates listeners or holds state.

pub mod event;
pub mod identity;

pub use event::{ControlKind, InputChangeEvent, InputTarget};
pub use identity::Identity;
