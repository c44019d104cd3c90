#![forbid(unsafe_code)]

//! Form record editing on top of [`Store`].
//!
//! [`FormStore<V>`] is a [`Store`] whose state is a shared, immutable
//! [`FormData<V>`] record. It adds field edits, input-event binding, and
//! reset-to-initial, each of which is a plain state replacement through the
//! store's single update path (identity check, then notification).
//!
//! # Usage
//!
//! ```
//! use nanostore::{FormStore, InputChangeEvent};
//! use std::rc::Rc;
//!
//! let form: FormStore<Rc<str>> = FormStore::new(
//!     [("email", Rc::from("")), ("name", Rc::from(""))].into_iter().collect(),
//! );
//!
//! form.handle_change(&InputChangeEvent::new("email", "a@b.c"));
//! assert_eq!(form.value("email").as_deref(), Some("a@b.c"));
//!
//! form.reset();
//! assert!(form.is_pristine());
//! ```
//!
//! # Invariants
//!
//! 1. Field edits never mutate a record in place: a changed field yields a
//!    new record that shares every other field value with the previous one.
//! 2. Writing a field value that is the same as the current one (by
//!    [`Identity`]) is a no-op.
//! 3. The initial record is captured once and never modified; `reset` restores
//!    that exact record.

use std::rc::Rc;

use indexmap::IndexMap;
use nanostore_core::{Identity, InputChangeEvent};
use tracing::{debug, trace};

use super::emitter::Subscription;
use super::store::Store;
use crate::config::StoreConfig;
use crate::error::FormError;

// ---------------------------------------------------------------------------
// FormData
// ---------------------------------------------------------------------------

/// A string-keyed record of field values, in insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormData<V> {
    fields: IndexMap<String, V>,
}

impl<V> Default for FormData<V> {
    fn default() -> Self {
        Self {
            fields: IndexMap::new(),
        }
    }
}

impl<V> FormData<V> {
    /// Create an empty record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a field (builder style).
    #[must_use]
    pub fn field(mut self, key: impl Into<String>, value: V) -> Self {
        self.fields.insert(key.into(), value);
        self
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&V> {
        self.fields.get(key)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Field names in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<V: Clone> FormData<V> {
    /// A shallow copy of this record with `key` set to `value`.
    ///
    /// An existing field keeps its position; a new field is appended.
    #[must_use]
    pub fn with_field(&self, key: impl Into<String>, value: V) -> Self {
        let mut fields = self.fields.clone();
        fields.insert(key.into(), value);
        Self { fields }
    }
}

impl<K: Into<String>, V> FromIterator<(K, V)> for FormData<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

impl<'a, V> IntoIterator for &'a FormData<V> {
    type Item = (&'a String, &'a V);
    type IntoIter = indexmap::map::Iter<'a, String, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

// ---------------------------------------------------------------------------
// FormStore
// ---------------------------------------------------------------------------

/// A [`Store`] over a [`FormData`] record, with field-level editing.
///
/// Cloning a `FormStore` creates a new handle to the **same** state,
/// listeners, and initial record.
pub struct FormStore<V> {
    store: Store<Rc<FormData<V>>>,
    initial: Rc<FormData<V>>,
}

impl<V> Clone for FormStore<V> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            initial: Rc::clone(&self.initial),
        }
    }
}

impl<V: std::fmt::Debug> std::fmt::Debug for FormStore<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormStore")
            .field("store", &self.store)
            .field("initial", &self.initial)
            .finish()
    }
}

impl<V: Identity + Clone + 'static> FormStore<V> {
    /// Create an editor whose initial and current state is `initial`.
    #[must_use]
    pub fn new(initial: FormData<V>) -> Self {
        Self::from_shared(Rc::new(initial), StoreConfig::default())
    }

    #[must_use]
    pub fn with_config(initial: FormData<V>, config: StoreConfig) -> Self {
        Self::from_shared(Rc::new(initial), config)
    }

    /// Create an editor from an already shared record. `reset` restores this
    /// exact `Rc`.
    #[must_use]
    pub fn from_shared(initial: Rc<FormData<V>>, config: StoreConfig) -> Self {
        Self {
            store: Store::with_config(Rc::clone(&initial), config),
            initial,
        }
    }

    /// The record captured at construction.
    #[must_use]
    pub fn initial_state(&self) -> Rc<FormData<V>> {
        Rc::clone(&self.initial)
    }

    #[must_use]
    pub fn get_state(&self) -> Rc<FormData<V>> {
        self.store.get_state()
    }

    /// Current value of one field.
    #[must_use]
    pub fn value(&self, key: &str) -> Option<V> {
        self.store.with_state(|state| state.get(key).cloned())
    }

    /// Whether the current record is the initial record (by identity).
    #[must_use]
    pub fn is_pristine(&self) -> bool {
        self.store.with_state(|state| state.same(&self.initial))
    }

    /// See [`Store::subscribe`].
    pub fn subscribe(
        &self,
        listener: impl Fn(&Rc<FormData<V>>, &Rc<FormData<V>>) + 'static,
    ) -> Subscription {
        self.store.subscribe(listener)
    }

    /// See [`Store::set_state`].
    pub fn set_state(&self, next: Rc<FormData<V>>) {
        self.store.set_state(next);
    }

    /// See [`Store::set_state_with`].
    pub fn set_state_with(&self, updater: impl FnOnce(&Rc<FormData<V>>) -> Rc<FormData<V>>) {
        self.store.set_state_with(updater);
    }

    #[must_use]
    pub fn version(&self) -> u64 {
        self.store.version()
    }

    /// The underlying store, including [`Store::set_state_silent`].
    #[must_use]
    pub fn store(&self) -> &Store<Rc<FormData<V>>> {
        &self.store
    }

    /// Set one field.
    ///
    /// If the field already holds the same value, nothing happens. Otherwise
    /// the state becomes a new record with only `key` changed and listeners
    /// are notified. Fields not yet in the record are added.
    pub fn set_value(&self, key: impl Into<String>, value: V) {
        let key = key.into();
        self.store.set_state_with(move |state| {
            if state.get(&key).is_some_and(|current| current.same(&value)) {
                Rc::clone(state)
            } else {
                Rc::new(state.with_field(key, value))
            }
        });
    }

    /// Like [`set_value`](Self::set_value), but only for fields already in
    /// the record.
    ///
    /// # Errors
    ///
    /// [`FormError::UnknownField`] if `key` is not a field of the current
    /// record; the state is left untouched.
    pub fn try_set_value(&self, key: &str, value: V) -> Result<(), FormError> {
        if !self.store.with_state(|state| state.contains_key(key)) {
            return Err(FormError::UnknownField(key.to_owned()));
        }
        self.set_value(key, value);
        Ok(())
    }

    /// Restore the initial record. A no-op if it is already current.
    pub fn reset(&self) {
        if self.store.config().enable_logging {
            debug!(
                store = %self.store.config().label,
                pristine = self.is_pristine(),
                "form reset"
            );
        }
        self.store.set_state(Rc::clone(&self.initial));
    }
}

impl<V: Identity + Clone + From<String> + std::borrow::Borrow<str> + 'static> FormStore<V> {
    /// Apply an input-change event: the current target's `name` selects the
    /// field and its `value` becomes the field's new value.
    ///
    /// Events whose value matches the field's current text are no-ops, even
    /// for pointer-identity values such as `Rc<str>`. Events without a current
    /// target are ignored.
    pub fn handle_change(&self, event: &InputChangeEvent) {
        match event.current_target() {
            Some(target) if self.field_text_is(&target.name, &target.value) => {}
            Some(target) => self.set_value(target.name.as_str(), V::from(target.value.clone())),
            None => {
                if self.store.config().enable_logging {
                    trace!(
                        store = %self.store.config().label,
                        "change event without target ignored"
                    );
                }
            }
        }
    }

    /// Like [`handle_change`](Self::handle_change), but strict.
    ///
    /// # Errors
    ///
    /// [`FormError::MissingTarget`] if the event has no current target, or
    /// [`FormError::UnknownField`] if the target names a field not in the
    /// record.
    pub fn try_handle_change(&self, event: &InputChangeEvent) -> Result<(), FormError> {
        let target = event.current_target().ok_or(FormError::MissingTarget)?;
        if self.field_text_is(&target.name, &target.value) {
            return Ok(());
        }
        self.try_set_value(&target.name, V::from(target.value.clone()))
    }

    fn field_text_is(&self, key: &str, text: &str) -> bool {
        self.store.with_state(|state| {
            state
                .get(key)
                .is_some_and(|current| std::borrow::Borrow::<str>::borrow(current) == text)
        })
    }

    /// A change handler bound to this editor, ready to register with whatever
    /// dispatches input events.
    pub fn change_handler(&self) -> impl Fn(&InputChangeEvent) + 'static {
        let form = self.clone();
        move |event| form.handle_change(event)
    }
}
