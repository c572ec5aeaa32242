//! Streaming Reply Assembly
//!
//! The backend streams an assistant reply as a run of `token` frames closed by
//! a `done` frame. [`StreamAssembler`] is the small explicit state object that
//! folds those fragments into cumulative text:
//!
//! ```text
//!   token("He")  ──▶ Started("He")
//!   token("llo") ──▶ Updated("Hello")
//!   done         ──▶ Finished        (buffer dropped)
//!   reconnect    ──▶ reset()         (silent; partial text discarded)
//! ```
//!
//! Consumers always receive the whole text so far, so a renderer can replace
//! what it displays instead of appending deltas.

mod assembler;

pub use assembler::{StreamAssembler, StreamSignal};
