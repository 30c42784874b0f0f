//! Transition engine over a device profile.
//!
//! The engine is the imperative shell around the pure core: lookup,
//! guard evaluation and effect preparation are pure, and only a fully
//! approved transition touches state, log and storage.

pub mod machine;
pub mod transition;

pub use machine::Engine;
pub use transition::{Committed, EngineState, TransitionError};
