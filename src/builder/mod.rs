//! Builder API for automata and engines.
//!
//! [`AutomatonBuilder`] assembles and validates a transition table;
//! [`EngineBuilder`] wires a device profile, storage and configuration
//! into a running [`Engine`](crate::engine::Engine).
//!
//! # Example
//!
//! ```
//! use brewfsm::builder::{AutomatonBuilder, BuildError};
//!
//! let automaton = AutomatonBuilder::new()
//!     .state("q0", "IDLE", "")
//!     .state("q1", "BUSY", "")
//!     .symbols(["GO", "STOP"])
//!     .transition("q0", "GO", "q1")
//!     .transition("q1", "STOP", "q0")
//!     .start("q0")
//!     .build()?;
//!
//! assert_eq!(automaton.table().len(), 2);
//! # Ok::<(), BuildError>(())
//! ```

pub mod automaton;
pub mod error;
pub mod machine;

pub use automaton::AutomatonBuilder;
pub use error::BuildError;
pub use machine::EngineBuilder;
