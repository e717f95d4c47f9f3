//! Stack growth guard for recursive tree walks.
//!
//! Evaluation, optimization, printing and stage bridging all recurse once per
//! tree level. Wrapping each level in [`ensure_sufficient_stack`] keeps a
//! legitimately deep tree from overflowing the native stack. It does not
//! bound the work: hosts accepting untrusted trees still cap their depth
//! before handing them to the core.
//!
//! - **Native targets**: grows the stack on demand through `stacker`.
//! - **WASM targets**: plain passthrough.

/// Remaining stack below which a new segment is allocated (128KB).
const RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated stack segment (2MB).
const GROWTH: usize = 2 * 1024 * 1024;

/// Run `f`, first growing the stack if less than the red zone remains.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, GROWTH, f)
}

/// WASM manages its own stack.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
