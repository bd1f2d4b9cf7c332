//! Listener, event and option types shared by hosts and the shim.
//!
//! A [`Listener`] is a shared callable with pointer identity: clones of one
//! listener compare equal, two separately created listeners never do, even if
//! they wrap the same function. This is the identity the host uses to match a
//! detach against an earlier attach, and the identity the registry tracks.

use std::cell::Cell;
use std::fmt;
use std::sync::Arc;

/// Closure type for event listeners.
pub type ListenerFn = dyn Fn(&Event) + Send + Sync;

/// An event delivered to listeners during dispatch.
#[derive(Debug)]
pub struct Event {
    event_type: String,
    default_prevented: Cell<bool>,
}

impl Event {
    /// Create an event of the given type.
    pub fn new(event_type: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            default_prevented: Cell::new(false),
        }
    }

    /// The event type, e.g. `"click"` or `"contextmenu"`.
    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    /// Cancel the host's default action for this event.
    pub fn prevent_default(&self) {
        self.default_prevented.set(true);
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented.get()
    }
}

/// A callable registered against a target for one event type.
///
/// # Examples
///
/// ```rust
/// use listener_registry::{Event, Listener};
///
/// let listener = Listener::new(|event| println!("got {}", event.event_type()));
/// let same = listener.clone();
/// let other = Listener::new(|_| {});
///
/// assert_eq!(listener, same);
/// assert_ne!(listener, other);
/// listener.call(&Event::new("click"));
/// ```
#[derive(Clone)]
pub struct Listener(Arc<ListenerFn>);

impl Listener {
    pub fn new(callback: impl Fn(&Event) + Send + Sync + 'static) -> Self {
        Self(Arc::new(callback))
    }

    /// Invoke the listener with `event`.
    pub fn call(&self, event: &Event) {
        (self.0)(event)
    }

    /// Whether `self` and `other` are the same listener.
    pub fn ptr_eq(&self, other: &Listener) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    fn addr(&self) -> *const () {
        Arc::as_ptr(&self.0) as *const ()
    }
}

impl PartialEq for Listener {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for Listener {}

impl fmt::Debug for Listener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Listener({:p})", self.addr())
    }
}

/// Options passed alongside a listener on attach and detach.
///
/// Only `capture` takes part in registration identity: attaching the same
/// listener for the same type twice with the same `capture` flag is a single
/// registration, whatever `passive` says.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ListenerOptions {
    pub capture: bool,
    pub passive: bool,
}

impl ListenerOptions {
    /// Options for a capture-phase listener.
    pub fn capture() -> Self {
        Self {
            capture: true,
            ..Self::default()
        }
    }

    /// Options for a passive listener.
    pub fn passive() -> Self {
        Self {
            passive: true,
            ..Self::default()
        }
    }

    /// Whether a registration made with `self` is matched by `other`.
    pub fn same_registration(&self, other: &ListenerOptions) -> bool {
        self.capture == other.capture
    }
}

/// A listener together with the options it was attached with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedListener {
    pub listener: Listener,
    pub options: ListenerOptions,
}

impl TrackedListener {
    pub fn new(listener: Listener, options: ListenerOptions) -> Self {
        Self { listener, options }
    }

    /// Whether this entry is the registration identified by `listener` and `options`.
    pub fn matches(&self, listener: &Listener, options: &ListenerOptions) -> bool {
        self.listener.ptr_eq(listener) && self.options.same_registration(options)
    }
}

// -------------------------------------------------------------------------------------------------
// Tests
// -------------------------------------------------------------------------------------------------
