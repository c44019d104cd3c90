#![forbid(unsafe_code)]

//! Identity comparison for state values.
//!
//! A store decides whether a write is a no-op by asking whether the next value
//! is the *same* value as the current one. "Same" here is identity, not deep
//! equality:
//!
//! - Shared handles ([`Rc`], [`Arc`]) are the same iff they point at the same
//!   allocation. Two separately built records with equal contents are
//!   different values.
//! - Primitives carry no reference identity, so they compare by value. This
//!   includes IEEE semantics for floats: `NaN` is never the same as itself and
//!   `0.0` is the same as `-0.0`.
//!
//! # Invariants
//! 1. `a.same(&a)` holds for every value except float `NaN`.
//! 2. `same` never inspects the pointee of a shared handle.
//! 3. Cloning an `Rc`/`Arc` yields a value that is the same as the original.

use std::rc::Rc;
use std::sync::Arc;

/// Identity comparison used by stores to short-circuit redundant writes.
pub trait Identity {
    /// Returns `true` if `self` and `other` are the same value by identity.
    fn same(&self, other: &Self) -> bool;
}

impl<T: ?Sized> Identity for Rc<T> {
    #[inline]
    fn same(&self, other: &Self) -> bool {
        Rc::ptr_eq(self, other)
    }
}

impl<T: ?Sized> Identity for Arc<T> {
    #[inline]
    fn same(&self, other: &Self) -> bool {
        Arc::ptr_eq(self, other)
    }
}

impl<T: Identity> Identity for Option<T> {
    fn same(&self, other: &Self) -> bool {
        match (self, other) {
            (Some(a), Some(b)) => a.same(b),
            (None, None) => true,
            _ => false,
        }
    }
}

macro_rules! identity_by_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Identity for $ty {
                #[inline]
                fn same(&self, other: &Self) -> bool {
                    self == other
                }
            }
        )*
    };
}

identity_by_value!(
    (),
    bool,
    char,
    u8,
    u16,
    u32,
    u64,
    u128,
    usize,
    i8,
    i16,
    i32,
    i64,
    i128,
    isize,
    f32,
    f64,
    String,
    &'static str,
);
