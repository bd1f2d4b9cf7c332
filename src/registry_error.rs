use thiserror::Error;

/// Errors raised by the in-memory reference host.
///
/// The shim itself never produces errors: it returns whatever its inner host
/// returns, unchanged.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ListenerError {
    #[error("Event type must not be empty")]
    EmptyEventType,
    #[error("Target <{tag}> has been disposed")]
    TargetDisposed { tag: String },
}
