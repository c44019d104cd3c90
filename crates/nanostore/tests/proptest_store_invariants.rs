//! Property-based invariant tests for `Store` and `FormStore`.
//!
//! **Store:**
//! 1. Version equals the number of writes that changed the value.
//! 2. Each notification's `prev` is the previous notification's `new`.
//! 3. The final state is the last value written.
//! 4. Re-writing the current value never notifies.
//!
//! **FormStore:**
//! 5. `set_value` leaves every other field identity-equal to its prior value.
//! 6. `reset` after any edit sequence restores the initial record by identity.

use nanostore::{FormData, FormStore, Identity, Store};
use proptest::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;

// ── Strategies ────────────────────────────────────────────────────────────

fn writes_strategy(max_len: usize) -> impl Strategy<Value = Vec<u8>> {
    proptest::collection::vec(0u8..4, 0..=max_len)
}

fn record_strategy() -> impl Strategy<Value = Vec<(String, String)>> {
    proptest::collection::btree_map("[a-e]", "[a-z]{0,3}", 1..=5)
        .prop_map(|fields| fields.into_iter().collect())
}

fn edits_strategy() -> impl Strategy<Value = Vec<(usize, String)>> {
    proptest::collection::vec((0usize..8, "[a-z]{0,3}"), 0..=12)
}

fn build_form(fields: &[(String, String)]) -> FormStore<Rc<str>> {
    FormStore::new(
        fields
            .iter()
            .map(|(k, v)| (k.clone(), Rc::<str>::from(v.as_str())))
            .collect(),
    )
}

// ── Store ─────────────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn version_counts_changes(writes in writes_strategy(32)) {
        let store = Store::new(0u8);
        let mut expected = 0u64;
        let mut current = 0u8;
        for w in &writes {
            if *w != current {
                expected += 1;
                current = *w;
            }
            store.set_state(*w);
        }
        prop_assert_eq!(store.version(), expected);
        prop_assert_eq!(store.get_state(), current);
    }

    #[test]
    fn notifications_form_a_chain(writes in writes_strategy(32)) {
        let store = Store::new(0u8);
        let log = Rc::new(RefCell::new(Vec::new()));
        let log_clone = Rc::clone(&log);
        let _sub = store.subscribe(move |new: &u8, prev: &u8| {
            log_clone.borrow_mut().push((*new, *prev));
        });

        for w in &writes {
            store.set_state_with(|_| *w);
        }

        let log = log.borrow();
        let mut last = 0u8;
        for (new, prev) in log.iter() {
            prop_assert_eq!(*prev, last);
            prop_assert_ne!(*new, *prev);
            last = *new;
        }
        prop_assert_eq!(log.len() as u64, store.version());
    }

    #[test]
    fn rewriting_current_value_never_notifies(writes in writes_strategy(16)) {
        let store = Store::new(Rc::new(0u8));
        let calls = Rc::new(RefCell::new(0u32));
        let calls_clone = Rc::clone(&calls);
        let _sub = store.subscribe(move |_, _| *calls_clone.borrow_mut() += 1);

        for w in &writes {
            store.set_state(Rc::new(*w));
            let before = *calls.borrow();
            store.set_state(store.get_state());
            store.set_state_with(Rc::clone);
            prop_assert_eq!(*calls.borrow(), before);
        }
    }
}

// ── FormStore ─────────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn set_value_isolates_sibling_fields(
        fields in record_strategy(),
        pick in 0usize..8,
        value in "[a-z]{0,3}",
    ) {
        let form = build_form(&fields);
        let key = fields[pick % fields.len()].0.clone();
        let before: Rc<FormData<Rc<str>>> = form.get_state();

        form.set_value(key.as_str(), Rc::from(value.as_str()));

        let after = form.get_state();
        for (name, old) in before.iter() {
            if name != key {
                prop_assert!(after.get(name).unwrap().same(old));
            }
        }
        prop_assert_eq!(after.get(&key).map(|v| v.to_string()), Some(value));
        prop_assert_eq!(after.len(), before.len());
    }

    #[test]
    fn reset_restores_initial_identity(
        fields in record_strategy(),
        edits in edits_strategy(),
    ) {
        let form = build_form(&fields);
        let initial = form.initial_state();
        for (idx, value) in &edits {
            let key = fields[idx % fields.len()].0.as_str();
            form.set_value(key, Rc::from(value.as_str()));
        }

        form.reset();
        prop_assert!(form.get_state().same(&initial));
        prop_assert!(form.is_pristine());
        prop_assert_eq!(initial.len(), fields.len());
    }
}
