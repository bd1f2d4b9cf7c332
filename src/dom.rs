//! In-memory reference host with document-object-model listener semantics.
//!
//! - Attaching a registration that already exists (same type, same listener,
//!   same `capture` flag) is ignored.
//! - Detaching a registration that does not exist is ignored.
//! - Dispatch calls matching listeners in registration order. It works from a
//!   snapshot, so a listener added during dispatch waits for the next one, and
//!   a listener removed during dispatch is skipped.
//!
//! The host has no way to list its listeners from the outside; that is what
//! [`ListenerShim`](crate::ListenerShim) adds.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc, Mutex, MutexGuard,
};

use crate::{Event, EventHost, Listener, ListenerError, ListenerOptions};

struct NativeListener {
    event_type: String,
    listener: Listener,
    options: ListenerOptions,
    removed: Arc<AtomicBool>,
}

impl NativeListener {
    fn matches(&self, event_type: &str, listener: &Listener, options: &ListenerOptions) -> bool {
        self.event_type == event_type
            && self.listener.ptr_eq(listener)
            && self.options.same_registration(options)
    }
}

/// An observable target owning its native listener table.
pub struct Element {
    tag: String,
    listeners: Mutex<Vec<NativeListener>>,
    disposed: AtomicBool,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            tag: tag.into(),
            listeners: Mutex::new(Vec::new()),
            disposed: AtomicBool::new(false),
        })
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    fn table(&self) -> MutexGuard<'_, Vec<NativeListener>> {
        self.listeners.lock().unwrap_or_else(|p| p.into_inner())
    }

    fn attach(
        &self,
        event_type: &str,
        listener: &Listener,
        options: ListenerOptions,
    ) -> Result<(), ListenerError> {
        if event_type.is_empty() {
            return Err(ListenerError::EmptyEventType);
        }
        if self.is_disposed() {
            return Err(ListenerError::TargetDisposed {
                tag: self.tag.clone(),
            });
        }

        let mut table = self.table();
        if table
            .iter()
            .any(|native| native.matches(event_type, listener, &options))
        {
            return Ok(());
        }
        table.push(NativeListener {
            event_type: event_type.to_string(),
            listener: listener.clone(),
            options,
            removed: Arc::new(AtomicBool::new(false)),
        });
        Ok(())
    }

    fn detach(
        &self,
        event_type: &str,
        listener: &Listener,
        options: ListenerOptions,
    ) -> Result<(), ListenerError> {
        if event_type.is_empty() {
            return Err(ListenerError::EmptyEventType);
        }

        let mut table = self.table();
        if let Some(position) = table
            .iter()
            .position(|native| native.matches(event_type, listener, &options))
        {
            let native = table.remove(position);
            native.removed.store(true, Ordering::SeqCst);
        }
        Ok(())
    }

    /// Dispatch `event` to the listeners attached for its type.
    ///
    /// Returns `false` if a listener called [`Event::prevent_default`].
    pub fn dispatch_event(&self, event: &Event) -> bool {
        let snapshot: Vec<(Listener, Arc<AtomicBool>)> = self
            .table()
            .iter()
            .filter(|native| native.event_type == event.event_type())
            .map(|native| (native.listener.clone(), native.removed.clone()))
            .collect();

        for (listener, removed) in snapshot {
            if !removed.load(Ordering::SeqCst) {
                listener.call(event);
            }
        }
        !event.default_prevented()
    }

    /// Number of native registrations for `event_type`.
    pub fn listener_count(&self, event_type: &str) -> usize {
        self.table()
            .iter()
            .filter(|native| native.event_type == event_type)
            .count()
    }

    /// Drop every native listener and refuse further attaches.
    pub fn dispose(&self) {
        self.disposed.store(true, Ordering::SeqCst);
        for native in self.table().drain(..) {
            native.removed.store(true, Ordering::SeqCst);
        }
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::SeqCst)
    }
}

impl std::fmt::Debug for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Element")
            .field("tag", &self.tag)
            .field("listeners", &self.table().len())
            .finish()
    }
}

/// An ordered collection of elements with tag lookup.
#[derive(Debug, Default)]
pub struct Document {
    elements: Mutex<Vec<Arc<Element>>>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    fn elements(&self) -> MutexGuard<'_, Vec<Arc<Element>>> {
        self.elements.lock().unwrap_or_else(|p| p.into_inner())
    }

    pub fn append_child(&self, element: Arc<Element>) {
        self.elements().push(element);
    }

    /// Remove `element` from the document. Returns `false` if it was not a child.
    pub fn remove_child(&self, element: &Arc<Element>) -> bool {
        let mut elements = self.elements();
        let before = elements.len();
        elements.retain(|child| !Arc::ptr_eq(child, element));
        elements.len() != before
    }

    /// First element with the given tag, in document order.
    pub fn query_selector(&self, tag: &str) -> Option<Arc<Element>> {
        self.elements()
            .iter()
            .find(|element| element.tag() == tag)
            .cloned()
    }
}

/// The native attach and detach primitives for [`Element`] targets.
#[derive(Debug, Default, Clone, Copy)]
pub struct NativeHost;

impl EventHost for NativeHost {
    type Target = Element;
    type Error = ListenerError;

    fn add_event_listener(
        &self,
        target: &Arc<Element>,
        event_type: &str,
        listener: &Listener,
        options: ListenerOptions,
    ) -> Result<(), ListenerError> {
        target.attach(event_type, listener, options)
    }

    fn remove_event_listener(
        &self,
        target: &Arc<Element>,
        event_type: &str,
        listener: &Listener,
        options: ListenerOptions,
    ) -> Result<(), ListenerError> {
        target.detach(event_type, listener, options)
    }
}
