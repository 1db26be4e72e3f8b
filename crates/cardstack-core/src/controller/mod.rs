//! The stack controller: index bookkeeping and advance sequencing.
//!
//! An advance (accept or reject) runs two independent strands:
//!
//! - the outgoing item's exit, finished when the surface reports its
//!   transition end (or the exit watchdog fires), which hides the item
//!   behind the window and releases the animation guard;
//! - one deferred task per window slot, which moves the next items up one
//!   level, optionally through a pre-animation first.
//!
//! Only the exit strand gates the next advance.

mod advance;
mod signals;
mod types;

#[cfg(test)]
mod tests;

pub use types::*;
