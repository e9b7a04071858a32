//! Stack growth for deeply recursive walks.
//!
//! Two places in Tessel recurse proportionally to user input rather than to
//! code size: the dependency walker (one frame per nested type reference)
//! and the runtime codecs (one frame per nested JSON value). A linked list
//! of ten thousand nodes is a perfectly valid payload, so both wrap their
//! recursive step in [`ensure_sufficient_stack`].
//!
//! On native targets the stack is grown on demand through `stacker`; on
//! `wasm32` the closure is called directly.

/// Remaining stack below which a new segment is allocated (128KB).
const RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated stack segment (2MB).
const SEGMENT_SIZE: usize = 2 * 1024 * 1024;

/// Run `f`, first growing the stack if less than the red zone remains.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

/// `wasm32` manages its own stack; call through.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

#[cfg(test)]
mod tests;
