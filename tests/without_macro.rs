//! Integration tests demonstrating a process-wide shim WITHOUT the macro, over a
//! host written outside this crate.
//!
//! This shows the manual composition root: a static shim wrapping a custom
//! `EventHost`. It is what `define_listener_shim!` generates, spelled out.
//!
//! NOTE: All tests use #[serial] because they share the same static shim (SHIM).
//! Running them in parallel would cause interference and non-deterministic failures.

use listener_registry::{
    EventHost, Listener, ListenerOptions, ListenerShim, RegistryEvent,
};
use serial_test::serial;
use std::collections::HashMap;
use std::sync::{Arc, LazyLock, Mutex};

// ============================================================================
// A custom host
// ============================================================================

/// A window-like target with a flat listener table keyed by event type.
#[derive(Default)]
struct Window {
    handlers: Mutex<HashMap<String, Vec<(Listener, bool)>>>,
}

impl Window {
    fn fire(&self, event_type: &str) {
        let handlers: Vec<Listener> = self
            .handlers
            .lock()
            .unwrap()
            .get(event_type)
            .map(|list| list.iter().map(|(l, _)| l.clone()).collect())
            .unwrap_or_default();
        for handler in handlers {
            handler.call(&listener_registry::Event::new(event_type));
        }
    }

    fn count(&self, event_type: &str) -> usize {
        self.handlers
            .lock()
            .unwrap()
            .get(event_type)
            .map_or(0, Vec::len)
    }
}

#[derive(Debug)]
struct WindowError;

impl std::fmt::Display for WindowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "window error")
    }
}

impl std::error::Error for WindowError {}

#[derive(Default)]
struct WindowHost;

impl EventHost for WindowHost {
    type Target = Window;
    type Error = WindowError;

    fn add_event_listener(
        &self,
        target: &Arc<Window>,
        event_type: &str,
        listener: &Listener,
        options: ListenerOptions,
    ) -> Result<(), WindowError> {
        let mut handlers = target.handlers.lock().unwrap();
        let list = handlers.entry(event_type.to_string()).or_default();
        if !list
            .iter()
            .any(|(l, capture)| l == listener && *capture == options.capture)
        {
            list.push((listener.clone(), options.capture));
        }
        Ok(())
    }

    fn remove_event_listener(
        &self,
        target: &Arc<Window>,
        event_type: &str,
        listener: &Listener,
        options: ListenerOptions,
    ) -> Result<(), WindowError> {
        if let Some(list) = target.handlers.lock().unwrap().get_mut(event_type) {
            list.retain(|(l, capture)| !(l == listener && *capture == options.capture));
        }
        Ok(())
    }
}

// ============================================================================
// Manual composition root (Without Macro)
// ============================================================================

/// The static shim every test shares
static SHIM: LazyLock<ListenerShim<WindowHost>> =
    LazyLock::new(|| ListenerShim::new(WindowHost));

// ============================================================================
// Tests Using Manual Implementation
// ============================================================================

#[test]
#[serial]
fn test_attach_and_bulk_remove() {
    SHIM.clear();
    let window = Arc::new(Window::default());

    let resize_a = Listener::new(|_| {});
    let resize_b = Listener::new(|_| {});
    SHIM.add_event_listener(&window, "resize", &resize_a, ListenerOptions::default())
        .unwrap();
    SHIM.add_event_listener(&window, "resize", &resize_b, ListenerOptions::default())
        .unwrap();
    assert_eq!(window.count("resize"), 2);

    assert_eq!(SHIM.remove_all_listeners(&window, "resize").unwrap(), 2);
    assert_eq!(window.count("resize"), 0);
    assert!(!SHIM.is_tracked(&window));
}

#[test]
#[serial]
fn test_listeners_fire_through_host() {
    use std::sync::atomic::{AtomicUsize, Ordering};

    SHIM.clear();
    let window = Arc::new(Window::default());
    let hits = Arc::new(AtomicUsize::new(0));
    let hits_clone = Arc::clone(&hits);
    let on_focus = Listener::new(move |_| {
        hits_clone.fetch_add(1, Ordering::SeqCst);
    });

    SHIM.add_event_listener(&window, "focus", &on_focus, ListenerOptions::default())
        .unwrap();
    window.fire("focus");
    SHIM.remove_event_listener(&window, "focus", &on_focus, ListenerOptions::default())
        .unwrap();
    window.fire("focus");

    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[test]
#[serial]
fn test_bypassing_the_shim_desynchronizes() {
    SHIM.clear();
    let window = Arc::new(Window::default());
    let tracked = Listener::new(|_| {});
    let untracked = Listener::new(|_| {});

    SHIM.add_event_listener(&window, "scroll", &tracked, ListenerOptions::default())
        .unwrap();
    // straight to the host: the registry never hears about it
    SHIM.host()
        .add_event_listener(&window, "scroll", &untracked, ListenerOptions::default())
        .unwrap();

    assert_eq!(SHIM.remove_all_listeners(&window, "scroll").unwrap(), 1);
    assert_eq!(window.count("scroll"), 1);
}

#[test]
#[serial]
fn test_with_tracing() {
    use std::sync::atomic::{AtomicUsize, Ordering};

    SHIM.clear();
    let window = Arc::new(Window::default());

    // Counter for trace events
    let event_count = Arc::new(AtomicUsize::new(0));
    let event_count_clone = Arc::clone(&event_count);

    SHIM.set_trace_callback(move |event| {
        if !matches!(event, RegistryEvent::Clear {}) {
            event_count_clone.fetch_add(1, Ordering::SeqCst);
        }
    });

    let listener = Listener::new(|_| {});
    SHIM.add_event_listener(&window, "blur", &listener, ListenerOptions::default())
        .unwrap(); // +1 event
    SHIM.remove_all_listeners(&window, "blur").unwrap(); // +2 events

    assert_eq!(event_count.load(Ordering::SeqCst), 3);

    SHIM.clear_trace_callback();
}

#[test]
#[serial]
fn test_clear_keeps_host_listeners() {
    SHIM.clear();
    let window = Arc::new(Window::default());
    let listener = Listener::new(|_| {});

    SHIM.add_event_listener(&window, "load", &listener, ListenerOptions::default())
        .unwrap();
    SHIM.clear();

    assert_eq!(SHIM.tracked_targets(), 0);
    assert_eq!(window.count("load"), 1);
}
