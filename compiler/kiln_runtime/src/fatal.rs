//! Contract violations.
//!
//! Out-of-range slot or argument access and exceeding the recursion limit
//! mean the embedder broke an invariant. The runtime never recovers from
//! these.

/// Log at `error` level and panic.
#[cold]
#[track_caller]
pub fn contract_violation(message: &str) -> ! {
    tracing::error!(message, "contract violation");
    panic!("contract violation: {message}")
}
