//! Macros for creating process-wide listener shims.
//!
//! A shim is plain state and can be owned by any composition root. When the
//! application wants one shared shim for the whole process, this macro builds it
//! as a lazily initialized static behind a set of free functions.

/// Creates a process-wide [`ListenerShim`](crate::ListenerShim) with a single macro invocation.
///
/// The macro generates a module containing:
/// - A lazily initialized static shim wrapping `<$host>::default()` (hidden)
/// - Free functions mirroring the shim's operations
///
/// The host type is resolved relative to the module enclosing the invocation, so
/// inside a function body pass a full path.
///
/// # Examples
///
/// ```rust
/// use listener_registry::{define_listener_shim, Element, Listener, ListenerOptions};
///
/// define_listener_shim!(page, listener_registry::NativeHost);
///
/// let surface = Element::new("flutter-view");
/// let handler = Listener::new(|e| e.prevent_default());
///
/// page::add_event_listener(&surface, "contextmenu", &handler, ListenerOptions::default()).unwrap();
/// assert_eq!(page::listeners(&surface, "contextmenu").len(), 1);
///
/// page::remove_all_listeners(&surface, "contextmenu").unwrap();
/// assert!(page::listeners(&surface, "contextmenu").is_empty());
/// ```
///
/// # Multiple Shims
///
/// Every invocation has its own registry:
///
/// ```rust
/// use listener_registry::{define_listener_shim, Element, Listener, ListenerOptions};
///
/// define_listener_shim!(main_page, listener_registry::NativeHost);
/// define_listener_shim!(popup, listener_registry::NativeHost);
///
/// let el = Element::new("div");
/// main_page::add_event_listener(&el, "click", &Listener::new(|_| {}), ListenerOptions::default())
///     .unwrap();
///
/// assert_eq!(main_page::listeners(&el, "click").len(), 1);
/// assert!(popup::listeners(&el, "click").is_empty());
/// ```
#[macro_export]
macro_rules! define_listener_shim {
    ($name:ident, $host:ty) => {
        pub mod $name {
            #[allow(unused_imports)]
            use super::*;
            use std::sync::{Arc, LazyLock};

            type Host = $host;
            type Target = <Host as $crate::EventHost>::Target;
            type Error = <Host as $crate::EventHost>::Error;

            // Shim instance (module-private)
            static SHIM: LazyLock<$crate::ListenerShim<Host>> =
                LazyLock::new(|| $crate::ListenerShim::new(<Host as Default>::default()));

            /// The shared shim behind this module's free functions.
            pub fn shim() -> &'static $crate::ListenerShim<Host> {
                &SHIM
            }

            /// Attach a listener through the shim.
            pub fn add_event_listener(
                target: &Arc<Target>,
                event_type: &str,
                listener: &$crate::Listener,
                options: $crate::ListenerOptions,
            ) -> Result<(), Error> {
                use $crate::EventHost;
                SHIM.add_event_listener(target, event_type, listener, options)
            }

            /// Detach a listener through the shim.
            pub fn remove_event_listener(
                target: &Arc<Target>,
                event_type: &str,
                listener: &$crate::Listener,
                options: $crate::ListenerOptions,
            ) -> Result<(), Error> {
                use $crate::EventHost;
                SHIM.remove_event_listener(target, event_type, listener, options)
            }

            /// Detach every tracked listener of `event_type` from `target`.
            pub fn remove_all_listeners(
                target: &Arc<Target>,
                event_type: &str,
            ) -> Result<usize, Error> {
                SHIM.remove_all_listeners(target, event_type)
            }

            /// Snapshot of the listeners tracked for `event_type` on `target`.
            pub fn listeners(
                target: &Arc<Target>,
                event_type: &str,
            ) -> Vec<$crate::TrackedListener> {
                SHIM.listeners(target, event_type)
            }

            /// Set a tracing callback for shim operations.
            pub fn set_trace_callback(
                callback: impl Fn(&$crate::RegistryEvent) + Send + Sync + 'static,
            ) {
                SHIM.set_trace_callback(callback)
            }

            /// Clear the tracing callback.
            pub fn clear_trace_callback() {
                SHIM.clear_trace_callback()
            }
        }
    };
}
