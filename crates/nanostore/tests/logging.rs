//! Log output of stores, captured with a scoped `tracing-subscriber`.

use nanostore::{FormData, FormStore, Store, StoreConfig};
use std::io;
use std::sync::{Arc, Mutex};
use tracing_subscriber::fmt::MakeWriter;

#[derive(Clone, Default)]
struct SharedBuf(Arc<Mutex<Vec<u8>>>);

impl SharedBuf {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for SharedBuf {
    type Writer = SharedBuf;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

fn capture(f: impl FnOnce()) -> String {
    let buf = SharedBuf::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(buf.clone())
        .with_max_level(tracing::Level::TRACE)
        .with_ansi(false)
        .finish();
    tracing::subscriber::with_default(subscriber, f);
    buf.contents()
}

#[test]
fn state_changes_are_traced_with_label() {
    let out = capture(|| {
        let store = Store::with_config(1, StoreConfig::labeled("counter"));
        let _sub = store.subscribe(|_, _| {});
        store.set_state(2);
        store.set_state_silent(3);
    });
    assert!(out.contains("listener subscribed"), "{out}");
    assert!(out.contains("state changed"), "{out}");
    assert!(out.contains("state replaced silently"), "{out}");
    assert!(out.contains("counter"), "{out}");
}

#[test]
fn noop_write_is_not_traced() {
    let out = capture(|| {
        let store = Store::new(1);
        store.set_state(1);
    });
    assert!(!out.contains("state changed"), "{out}");
}

#[test]
fn form_reset_is_logged() {
    let out = capture(|| {
        let form = FormStore::with_config(
            FormData::new().field("a", 1),
            StoreConfig::labeled("signup"),
        );
        form.set_value("a", 2);
        form.reset();
    });
    assert!(out.contains("form reset"), "{out}");
    assert!(out.contains("signup"), "{out}");
}

#[test]
fn logging_can_be_disabled() {
    let out = capture(|| {
        let store = Store::with_config(1, StoreConfig::default().with_logging(false));
        let _sub = store.subscribe(|_, _| {});
        store.set_state(2);
        store.set_state_silent(3);
    });
    assert!(out.is_empty(), "{out}");
}
