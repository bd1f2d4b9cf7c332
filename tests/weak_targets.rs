//! Integration tests for target liveness: tracking a target must not keep it alive.

use listener_registry::{
    remove_existing_context_menu_handlers, Document, Element, EventHost, Listener,
    ListenerOptions, ListenerShim, NativeHost, CONTEXT_MENU, RENDER_SURFACE_TAG,
};
use std::sync::Arc;

#[test]
fn test_dropped_target_is_released() {
    let shim = ListenerShim::new(NativeHost);
    let el = Element::new("div");
    let weak = Arc::downgrade(&el);

    shim.add_event_listener(&el, "click", &Listener::new(|_| {}), ListenerOptions::default())
        .unwrap();
    assert_eq!(shim.tracked_targets(), 1);

    drop(el);

    assert!(weak.upgrade().is_none());
    assert_eq!(shim.tracked_targets(), 0);
    assert_eq!(shim.registry().prune(), 1);
}

#[test]
fn test_unrelated_targets_survive_a_sweep() {
    let shim = ListenerShim::new(NativeHost);
    let keep = Element::new("nav");
    let f = Listener::new(|_| {});

    shim.add_event_listener(&keep, "click", &f, ListenerOptions::default())
        .unwrap();
    for _ in 0..8 {
        let transient = Element::new("span");
        shim.add_event_listener(&transient, "click", &f, ListenerOptions::default())
            .unwrap();
    }

    // the next new target sweeps the dead ones
    let fresh = Element::new("main");
    shim.add_event_listener(&fresh, "click", &f, ListenerOptions::default())
        .unwrap();

    assert_eq!(shim.registry().prune(), 0);
    assert_eq!(shim.tracked_targets(), 2);
    assert_eq!(shim.listeners(&keep, "click").len(), 1);
}

#[test]
fn test_replaced_render_surface() {
    let shim = ListenerShim::new(NativeHost);
    let document = Document::new();
    let blocker = Listener::new(|e| e.prevent_default());

    let old_surface = Element::new(RENDER_SURFACE_TAG);
    document.append_child(old_surface.clone());
    shim.add_event_listener(&old_surface, CONTEXT_MENU, &blocker, ListenerOptions::default())
        .unwrap();

    // the rendering layer tears down its surface and mounts a new one
    assert!(document.remove_child(&old_surface));
    old_surface.dispose();
    assert!(shim.forget_target(&old_surface));
    drop(old_surface);

    let new_surface = Element::new(RENDER_SURFACE_TAG);
    document.append_child(new_surface.clone());
    shim.add_event_listener(&new_surface, CONTEXT_MENU, &blocker, ListenerOptions::default())
        .unwrap();

    assert_eq!(remove_existing_context_menu_handlers(&shim, &document).unwrap(), 1);
    assert_eq!(shim.tracked_targets(), 0);
    assert_eq!(new_surface.listener_count(CONTEXT_MENU), 0);
}

#[test]
fn test_disposed_target_rejects_attach() {
    let shim = ListenerShim::new(NativeHost);
    let el = Element::new("canvas");
    el.dispose();

    let result = shim.add_event_listener(&el, "click", &Listener::new(|_| {}), ListenerOptions::default());

    assert!(result.is_err());
    assert!(!shim.is_tracked(&el));
}
