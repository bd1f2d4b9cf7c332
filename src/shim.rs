//! Decorator over a host that mirrors every attach and detach into a
//! [`ListenerRegistry`].
//!
//! [`ListenerShim`] implements [`EventHost`] itself, so callers attach and detach
//! through it exactly as they would through the host. Each call goes to the
//! inner host first; the registry is only updated when the host accepted it.
//!
//! On top of the host primitives the shim offers
//! [`remove_all_listeners`](ListenerShim::remove_all_listeners), which the host
//! cannot express because it has no way to enumerate its listeners.
//!
//! # Integration contract
//!
//! The registry only knows what went through the shim. Code that attaches or
//! detaches on the inner host directly leaves the registry out of date, and
//! bulk removal will then miss (or re-detach) those listeners.
//!
//! # Examples
//!
//! ```
//! use listener_registry::{Element, EventHost, Listener, ListenerOptions, ListenerShim, NativeHost};
//!
//! let shim = ListenerShim::new(NativeHost);
//! let surface = Element::new("flutter-view");
//!
//! let first = Listener::new(|e| e.prevent_default());
//! let second = Listener::new(|_| {});
//! shim.add_event_listener(&surface, "contextmenu", &first, ListenerOptions::default()).unwrap();
//! shim.add_event_listener(&surface, "contextmenu", &second, ListenerOptions::capture()).unwrap();
//!
//! assert_eq!(shim.remove_all_listeners(&surface, "contextmenu").unwrap(), 2);
//! assert_eq!(surface.listener_count("contextmenu"), 0);
//! ```

use std::sync::{Arc, Mutex};

use crate::{
    EventHost, Listener, ListenerOptions, ListenerRegistry, RegistryEvent, TrackedListener,
};

/// Type alias for the user-supplied tracing callback.
///
/// The callback receives a reference to a `RegistryEvent` after every shim
/// operation. It must be thread-safe because a shim may be a shared static.
pub type TraceCallback = dyn Fn(&RegistryEvent) + Send + Sync + 'static;

/// Event host decorator keeping a shadow registry of attached listeners.
pub struct ListenerShim<H: EventHost> {
    host: H,
    registry: ListenerRegistry<H::Target>,
    trace: Mutex<Option<Arc<TraceCallback>>>,
}

impl<H: EventHost> ListenerShim<H> {
    /// Wrap `host` with an empty registry.
    pub fn new(host: H) -> Self {
        Self {
            host,
            registry: ListenerRegistry::new(),
            trace: Mutex::new(None),
        }
    }

    /// The wrapped host.
    ///
    /// Attaching or detaching on it directly bypasses the registry.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// The shadow registry, for inspection.
    pub fn registry(&self) -> &ListenerRegistry<H::Target> {
        &self.registry
    }

    // -------------------------------------------------------------------------------------------------
    // Tracing
    // -------------------------------------------------------------------------------------------------

    /// Set a tracing callback for shim operations.
    ///
    /// The callback is invoked after the operation completed, with no lock held,
    /// so it may call back into the shim.
    pub fn set_trace_callback(&self, callback: impl Fn(&RegistryEvent) + Send + Sync + 'static) {
        let mut guard = self.trace.lock().unwrap_or_else(|p| p.into_inner());
        *guard = Some(Arc::new(callback));
    }

    /// Clear the tracing callback.
    pub fn clear_trace_callback(&self) {
        let mut guard = self.trace.lock().unwrap_or_else(|p| p.into_inner());
        *guard = None;
    }

    fn emit_event(&self, event: RegistryEvent) {
        #[cfg(feature = "tracing")]
        tracing::debug!(target: "listener_registry", %event, "registry event");

        let callback = self
            .trace
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .clone();
        if let Some(callback) = callback {
            callback(&event);
        }
    }

    // -------------------------------------------------------------------------------------------------
    // Derived operations
    // -------------------------------------------------------------------------------------------------

    /// Detach every listener of `event_type` currently tracked on `target`.
    ///
    /// Listeners are detached through the host in attach order, each with the
    /// options it was attached with. The list is snapshotted first, so a listener
    /// attached while the removal runs stays attached and tracked.
    ///
    /// Returns how many listeners were detached. Nothing tracked is not an error
    /// and returns `Ok(0)`.
    ///
    /// # Errors
    ///
    /// The first host error stops the removal and is returned unchanged. Listeners
    /// not yet detached at that point remain tracked.
    pub fn remove_all_listeners(
        &self,
        target: &Arc<H::Target>,
        event_type: &str,
    ) -> Result<usize, H::Error> {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!("remove_all_listeners", event_type).entered();

        let snapshot = self.registry.listeners(target, event_type);
        for tracked in &snapshot {
            self.remove_event_listener(target, event_type, &tracked.listener, tracked.options)?;
        }

        self.emit_event(RegistryEvent::DetachAll {
            event_type: event_type.to_string(),
            removed: snapshot.len(),
        });
        Ok(snapshot.len())
    }

    /// Snapshot of the listeners tracked for `event_type` on `target`, in attach order.
    pub fn listeners(&self, target: &Arc<H::Target>, event_type: &str) -> Vec<TrackedListener> {
        self.registry.listeners(target, event_type)
    }

    /// Event types with at least one tracked listener on `target`.
    pub fn event_types(&self, target: &Arc<H::Target>) -> Vec<String> {
        self.registry.event_types(target)
    }

    /// Whether any listener is tracked for `target`.
    pub fn is_tracked(&self, target: &Arc<H::Target>) -> bool {
        self.registry.is_tracked(target)
    }

    /// Number of targets with at least one tracked listener.
    pub fn tracked_targets(&self) -> usize {
        self.registry.len()
    }

    /// Disposal hook: drop the registry entry for `target` without touching the host.
    pub fn forget_target(&self, target: &Arc<H::Target>) -> bool {
        let found = self.registry.forget_target(target);
        self.emit_event(RegistryEvent::ForgetTarget { found });
        found
    }

    /// Drop all bookkeeping. The host keeps its listeners.
    #[doc(hidden)]
    pub fn clear(&self) {
        self.registry.clear();
        self.emit_event(RegistryEvent::Clear {});
    }
}

impl<H: EventHost + Default> Default for ListenerShim<H> {
    fn default() -> Self {
        Self::new(H::default())
    }
}

impl<H: EventHost> EventHost for ListenerShim<H> {
    type Target = H::Target;
    type Error = H::Error;

    fn add_event_listener(
        &self,
        target: &Arc<Self::Target>,
        event_type: &str,
        listener: &Listener,
        options: ListenerOptions,
    ) -> Result<(), Self::Error> {
        self.host
            .add_event_listener(target, event_type, listener, options)?;

        let recorded = self.registry.record(target, event_type, listener, options);
        self.emit_event(RegistryEvent::Attach {
            event_type: event_type.to_string(),
            recorded,
        });
        Ok(())
    }

    fn remove_event_listener(
        &self,
        target: &Arc<Self::Target>,
        event_type: &str,
        listener: &Listener,
        options: ListenerOptions,
    ) -> Result<(), Self::Error> {
        self.host
            .remove_event_listener(target, event_type, listener, options)?;

        let found = self.registry.forget(target, event_type, listener, options);
        self.emit_event(RegistryEvent::Detach {
            event_type: event_type.to_string(),
            found,
        });
        Ok(())
    }
}

// -------------------------------------------------------------------------------------------------
// Tests
// -------------------------------------------------------------------------------------------------
