//! Strip third-party context-menu handlers from the render surface.
//!
//! The rendering layer attaches its own `contextmenu` handlers to the surface
//! element. Before the application installs its own right-click handling, all of
//! them have to go, and the host cannot enumerate them. The shim can.

use std::sync::Arc;

use crate::{Document, EventHost, ListenerError, ListenerShim, NativeHost};

/// Native context-menu (right click) event type.
pub const CONTEXT_MENU: &str = "contextmenu";

/// Tag of the application's primary interactive surface.
pub const RENDER_SURFACE_TAG: &str = "flutter-view";

/// Detach every context-menu listener tracked on `target`.
pub fn remove_context_menu_handlers<H: EventHost>(
    shim: &ListenerShim<H>,
    target: &Arc<H::Target>,
) -> Result<usize, H::Error> {
    shim.remove_all_listeners(target, CONTEXT_MENU)
}

/// Detach every context-menu listener from the document's render surface.
///
/// A document without a render surface is left alone and `Ok(0)` is returned.
///
/// # Examples
///
/// ```
/// use listener_registry::{
///     remove_existing_context_menu_handlers, Document, Element, Event, EventHost, Listener,
///     ListenerOptions, ListenerShim, NativeHost, CONTEXT_MENU, RENDER_SURFACE_TAG,
/// };
///
/// let shim = ListenerShim::new(NativeHost);
/// let document = Document::new();
/// let surface = Element::new(RENDER_SURFACE_TAG);
/// document.append_child(surface.clone());
///
/// let blocker = Listener::new(|e| e.prevent_default());
/// shim.add_event_listener(&surface, CONTEXT_MENU, &blocker, ListenerOptions::default()).unwrap();
/// assert!(!surface.dispatch_event(&Event::new(CONTEXT_MENU)));
///
/// assert_eq!(remove_existing_context_menu_handlers(&shim, &document).unwrap(), 1);
/// assert!(surface.dispatch_event(&Event::new(CONTEXT_MENU)));
/// ```
pub fn remove_existing_context_menu_handlers(
    shim: &ListenerShim<NativeHost>,
    document: &Document,
) -> Result<usize, ListenerError> {
    let Some(surface) = document.query_selector(RENDER_SURFACE_TAG) else {
        #[cfg(feature = "tracing")]
        tracing::debug!(tag = RENDER_SURFACE_TAG, "render surface not found");
        return Ok(0);
    };
    remove_context_menu_handlers(shim, &surface)
}
