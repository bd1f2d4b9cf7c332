/// Events emitted by a [`ListenerShim`](crate::ListenerShim) during operations.
///
/// These events are passed to the tracing callback set via `set_trace_callback`.
/// The `Clone` derive allows callbacks to store or forward events if needed.
///
/// # Examples
///
/// ```rust
/// use listener_registry::RegistryEvent;
///
/// let event = RegistryEvent::Attach {
///     event_type: "click".to_string(),
///     recorded: true,
/// };
/// assert_eq!(event.to_string(), "attach { event_type: click, recorded: true }");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryEvent {
    /// A listener was attached through the shim.
    Attach {
        /// The event type the listener was attached for
        event_type: String,
        /// Whether the registry gained an entry (`false` for a duplicate attach)
        recorded: bool,
    },

    /// A listener was detached through the shim.
    Detach {
        /// The event type the listener was detached from
        event_type: String,
        /// Whether the registry was tracking the listener
        found: bool,
    },

    /// Every listener of one type was detached from a target.
    DetachAll {
        event_type: String,
        /// Number of listeners removed
        removed: usize,
    },

    /// A target was dropped from the registry through the disposal hook.
    ForgetTarget {
        found: bool,
    },

    /// The registry was cleared.
    Clear {},
}

impl std::fmt::Display for RegistryEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegistryEvent::Attach {
                event_type,
                recorded,
            } => {
                write!(
                    f,
                    "attach {{ event_type: {}, recorded: {} }}",
                    event_type, recorded
                )
            }
            RegistryEvent::Detach { event_type, found } => {
                write!(f, "detach {{ event_type: {}, found: {} }}", event_type, found)
            }
            RegistryEvent::DetachAll {
                event_type,
                removed,
            } => {
                write!(
                    f,
                    "detach_all {{ event_type: {}, removed: {} }}",
                    event_type, removed
                )
            }
            RegistryEvent::ForgetTarget { found } => {
                write!(f, "forget_target {{ found: {} }}", found)
            }
            RegistryEvent::Clear {} => write!(f, "Clearing the Registry"),
        }
    }
}
