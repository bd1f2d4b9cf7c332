//! # Listener Registry
//!
//! A shadow registry for event listeners attached through a host's native
//! attach/detach primitives, with bulk removal by (target, event type).
//!
//! Host event systems modelled on the document object model let you attach and
//! detach a listener you hold a reference to, but offer no way to list the
//! listeners on a target, let alone remove all listeners of one type. This crate
//! wraps the host in a [`ListenerShim`] that forwards every call unchanged and
//! mirrors it into a [`ListenerRegistry`], from which
//! [`ListenerShim::remove_all_listeners`] is derived.
//!
//! ## Quick Start
//!
//! ```rust
//! use listener_registry::{Element, Event, EventHost, Listener, ListenerOptions, ListenerShim, NativeHost};
//!
//! let shim = ListenerShim::new(NativeHost);
//! let canvas = Element::new("flutter-view");
//!
//! let a = Listener::new(|e| e.prevent_default());
//! let b = Listener::new(|e| e.prevent_default());
//! shim.add_event_listener(&canvas, "contextmenu", &a, ListenerOptions::default()).unwrap();
//! shim.add_event_listener(&canvas, "contextmenu", &b, ListenerOptions::default()).unwrap();
//!
//! shim.remove_all_listeners(&canvas, "contextmenu").unwrap();
//! assert!(canvas.dispatch_event(&Event::new("contextmenu")));
//! ```
//!
//! ## Features
//!
//! - **Transparent**: [`ListenerShim`] implements the same [`EventHost`] trait as the host it wraps
//! - **Weak-keyed**: tracking a target never keeps it alive
//! - **Self-pruning**: empty type lists and empty targets are dropped eagerly
//! - **Tracing support**: optional callback receiving a [`RegistryEvent`] per operation,
//!   plus `tracing` spans and events behind the `tracing` feature
//!
//! ## Main Items
//!
//! - [`EventHost`] - The attach/detach capability interface
//! - [`ListenerShim`] - Host decorator with bulk removal
//! - [`ListenerRegistry`] - The shadow registry
//! - [`remove_existing_context_menu_handlers`] - Strip context-menu handlers from the render surface
//! - [`define_listener_shim!`] - A process-wide shim behind free functions

mod context_menu;
mod dom;
mod event_host;
mod listener;
mod macros;
mod registry;
mod registry_error;
mod registry_event;
mod shim;

pub use context_menu::{
    remove_context_menu_handlers, remove_existing_context_menu_handlers, CONTEXT_MENU,
    RENDER_SURFACE_TAG,
};
pub use dom::{Document, Element, NativeHost};
pub use event_host::EventHost;
pub use listener::{Event, Listener, ListenerFn, ListenerOptions, TrackedListener};
pub use registry::ListenerRegistry;
pub use registry_error::ListenerError;
pub use registry_event::RegistryEvent;
pub use shim::{ListenerShim, TraceCallback};
