//! The capability interface of a host event system.
//!
//! A host owns the authoritative dispatch tables. It exposes exactly two
//! primitives, attach and detach, and offers no way to enumerate what is
//! attached. [`ListenerShim`](crate::ListenerShim) implements this same trait
//! over an inner host, so it can be injected wherever a host is expected.

use std::sync::Arc;

use crate::{Listener, ListenerOptions};

/// Attach and detach primitives of a host event system.
pub trait EventHost {
    /// The observable target type. Targets are shared and owned by the host
    /// application; implementors only ever borrow them.
    type Target: ?Sized + Send + Sync + 'static;

    /// Error raised by the host for an invalid call.
    type Error: std::error::Error;

    /// Attach `listener` to `target` for events of `event_type`.
    ///
    /// Attaching a registration that is already present is a no-op.
    fn add_event_listener(
        &self,
        target: &Arc<Self::Target>,
        event_type: &str,
        listener: &Listener,
        options: ListenerOptions,
    ) -> Result<(), Self::Error>;

    /// Detach `listener` from `target` for events of `event_type`.
    ///
    /// Detaching a registration that is not present is a no-op.
    fn remove_event_listener(
        &self,
        target: &Arc<Self::Target>,
        event_type: &str,
        listener: &Listener,
        options: ListenerOptions,
    ) -> Result<(), Self::Error>;
}
