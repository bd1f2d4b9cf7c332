//! Shadow registry of listeners attached to observable targets.
//!
//! The registry maps a target to its per-type listener lists:
//!
//! ```text
//! target -> event type -> [listener, listener, ...]   (attach order)
//! ```
//!
//! Targets are keyed by the address of their `Arc` allocation and held only
//! through a `Weak` back-reference, so tracking a target never keeps it alive.
//! Once the last strong reference is dropped the entry is stale: every query
//! treats it as absent, and the next sweep drops it together with the listener
//! handles it holds.
//!
//! Empty lists and empty per-target maps are removed eagerly, so the registry
//! never holds an entry for a target with zero listeners.
//!
//! # Examples
//!
//! ```
//! use listener_registry::{Listener, ListenerOptions, ListenerRegistry};
//! use std::sync::Arc;
//!
//! let registry: ListenerRegistry<String> = ListenerRegistry::new();
//! let target = Arc::new("button".to_string());
//! let listener = Listener::new(|_| {});
//!
//! assert!(registry.record(&target, "click", &listener, ListenerOptions::default()));
//! assert!(!registry.record(&target, "click", &listener, ListenerOptions::default()));
//! assert_eq!(registry.listeners(&target, "click").len(), 1);
//!
//! assert!(registry.forget(&target, "click", &listener, ListenerOptions::default()));
//! assert!(!registry.is_tracked(&target));
//! ```

use std::{
    collections::{BTreeMap, HashMap},
    fmt,
    sync::{Arc, Mutex, MutexGuard, Weak},
};

use crate::{Listener, ListenerOptions, TrackedListener};

/// Identity of a target: the address of its `Arc` allocation.
type TargetKey = usize;

fn target_key<T: ?Sized>(target: &Arc<T>) -> TargetKey {
    Arc::as_ptr(target) as *const () as usize
}

/// Per-target bookkeeping.
struct TargetEntry<T: ?Sized> {
    target: Weak<T>,
    types: BTreeMap<String, Vec<TrackedListener>>,
}

impl<T: ?Sized> TargetEntry<T> {
    fn new(target: &Arc<T>) -> Self {
        Self {
            target: Arc::downgrade(target),
            types: BTreeMap::new(),
        }
    }

    fn is_stale(&self) -> bool {
        self.target.strong_count() == 0
    }
}

/// Weak-keyed registry of listeners per (target, event type).
pub struct ListenerRegistry<T: ?Sized> {
    entries: Mutex<HashMap<TargetKey, TargetEntry<T>>>,
}

impl<T: ?Sized> ListenerRegistry<T> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Bookkeeping never fails, so a poisoned lock is recovered.
    fn lock(&self) -> MutexGuard<'_, HashMap<TargetKey, TargetEntry<T>>> {
        self.entries.lock().unwrap_or_else(|p| p.into_inner())
    }

    /// Record a registration.
    ///
    /// Returns `false` if the same registration (listener identity and `capture`
    /// flag) was already tracked for this target and type.
    pub fn record(
        &self,
        target: &Arc<T>,
        event_type: &str,
        listener: &Listener,
        options: ListenerOptions,
    ) -> bool {
        let key = target_key(target);
        let mut entries = self.lock();

        let live = entries.get(&key).is_some_and(|entry| !entry.is_stale());
        if !live {
            // A new per-target entry is a good moment to drop dead ones, including
            // one that may sit at this very address.
            entries.retain(|_, entry| !entry.is_stale());
        }

        let entry = entries
            .entry(key)
            .or_insert_with(|| TargetEntry::new(target));
        let list = entry.types.entry(event_type.to_string()).or_default();
        if list.iter().any(|tracked| tracked.matches(listener, &options)) {
            return false;
        }
        list.push(TrackedListener::new(listener.clone(), options));
        true
    }

    /// Forget a registration.
    ///
    /// Returns `false` if it was not tracked. Removing the last listener of a type
    /// drops the type; removing the last type drops the target.
    pub fn forget(
        &self,
        target: &Arc<T>,
        event_type: &str,
        listener: &Listener,
        options: ListenerOptions,
    ) -> bool {
        let key = target_key(target);
        let mut entries = self.lock();

        let Some(entry) = entries.get_mut(&key) else {
            return false;
        };
        if entry.is_stale() {
            entries.remove(&key);
            return false;
        }

        let Some(list) = entry.types.get_mut(event_type) else {
            return false;
        };
        let Some(position) = list
            .iter()
            .position(|tracked| tracked.matches(listener, &options))
        else {
            return false;
        };

        list.remove(position);
        if list.is_empty() {
            entry.types.remove(event_type);
        }
        if entry.types.is_empty() {
            entries.remove(&key);
        }
        true
    }

    /// Snapshot of the listeners tracked for `event_type` on `target`, in attach order.
    pub fn listeners(&self, target: &Arc<T>, event_type: &str) -> Vec<TrackedListener> {
        self.lock()
            .get(&target_key(target))
            .filter(|entry| !entry.is_stale())
            .and_then(|entry| entry.types.get(event_type))
            .cloned()
            .unwrap_or_default()
    }

    /// Whether `listener` is tracked for `event_type` on `target` under any options.
    pub fn contains(&self, target: &Arc<T>, event_type: &str, listener: &Listener) -> bool {
        self.lock()
            .get(&target_key(target))
            .filter(|entry| !entry.is_stale())
            .and_then(|entry| entry.types.get(event_type))
            .is_some_and(|list| list.iter().any(|t| t.listener.ptr_eq(listener)))
    }

    /// Event types with at least one tracked listener on `target`, sorted.
    pub fn event_types(&self, target: &Arc<T>) -> Vec<String> {
        self.lock()
            .get(&target_key(target))
            .filter(|entry| !entry.is_stale())
            .map(|entry| entry.types.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Whether the registry holds any listener for `target`.
    pub fn is_tracked(&self, target: &Arc<T>) -> bool {
        self.lock()
            .get(&target_key(target))
            .is_some_and(|entry| !entry.is_stale())
    }

    /// Number of live tracked targets.
    pub fn len(&self) -> usize {
        self.lock().values().filter(|entry| !entry.is_stale()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every entry for `target` without touching the host.
    ///
    /// Meant for hosts that dispose targets explicitly. Returns `false` if the
    /// target was not tracked.
    pub fn forget_target(&self, target: &Arc<T>) -> bool {
        self.lock()
            .remove(&target_key(target))
            .is_some_and(|entry| !entry.is_stale())
    }

    /// Drop entries whose target is gone. Returns how many were dropped.
    pub fn prune(&self) -> usize {
        let mut entries = self.lock();
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_stale());
        before - entries.len()
    }

    /// Drop everything. Intended for tests; the host is not touched.
    #[doc(hidden)]
    pub fn clear(&self) {
        self.lock().clear();
    }
}

impl<T: ?Sized> Default for ListenerRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> fmt::Debug for ListenerRegistry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entries = self.lock();
        f.debug_struct("ListenerRegistry")
            .field("targets", &entries.len())
            .finish()
    }
}

// -------------------------------------------------------------------------------------------------
// Tests
// -------------------------------------------------------------------------------------------------
