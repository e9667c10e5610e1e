//! Stack growth for recursive parse and evaluation.
//!
//! Sub-expressions, list literals and function bodies re-enter the parser and
//! evaluator. The recursion limit configured on the context is the intended
//! stop; this guard keeps the native stack from running out first.

/// Keep at least this much stack before recursing (100KB).
const RED_ZONE: usize = 100 * 1024;

/// Grow by this much when below the red zone (1MB).
const STACK_PER_RECURSION: usize = 1024 * 1024;

#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub(crate) fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

/// WASM manages its own stack.
#[inline]
#[cfg(target_arch = "wasm32")]
pub(crate) fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
