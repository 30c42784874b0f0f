//! Brewfsm: a data-driven deterministic automaton for coffee dispensers
//!
//! Brewfsm keeps the "pure core, imperative shell" split. The automaton,
//! guards and auxiliary effects are plain values evaluated without side
//! effects; the [`Engine`] is the shell that commits approved transitions,
//! appends them to a bounded event log and persists that log through an
//! injected [`Storage`].
//!
//! # Core Concepts
//!
//! - **Automaton**: states, alphabet, transition table, start and
//!   accepting states, validated once at construction
//! - **Device profile**: an automaton plus its guard policy, symbol
//!   effects and item catalog
//! - **Event log**: bounded durable history plus a small recent cache
//! - **Statistics**: counters derived from the durable log
//!
//! # Example
//!
//! ```rust
//! use brewfsm::device::{self, symbols};
//! use brewfsm::{Engine, MemoryStorage, Params, TransitionError};
//!
//! let mut engine = Engine::open(device::vendor()?, MemoryStorage::new())?;
//!
//! engine.apply(symbols::INSERT_COIN, &Params::coin(10))?;
//! let short = engine.apply(symbols::SELECT, &Params::item("latte"));
//! assert!(matches!(short, Err(TransitionError::GuardRejected(_))));
//!
//! engine.apply(symbols::INSERT_COIN, &Params::coin(20))?;
//! engine.apply(symbols::SELECT, &Params::item("latte"))?;
//! let brewed = engine.apply(symbols::BREW, &Params::none())?;
//!
//! assert!(brewed.is_accepting());
//! assert_eq!(engine.auxiliary().balance, 5);
//! assert_eq!(engine.statistics().revenue, 25);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod builder;
pub mod checkpoint;
pub mod config;
pub mod core;
pub mod device;
pub mod engine;
pub mod event_log;
pub mod export;
pub mod stats;
pub mod storage;

// Re-export commonly used types
pub use builder::{AutomatonBuilder, BuildError, EngineBuilder};
pub use checkpoint::{Checkpoint, CheckpointError};
pub use config::EngineConfig;
pub use core::{
    Automaton, AutomatonSpec, Auxiliary, GuardPolicy, LogEntry, Params, StateId, Symbol,
};
pub use device::DeviceProfile;
pub use engine::{Committed, Engine, EngineState, TransitionError};
pub use event_log::EventLog;
pub use export::{ExportError, ExportFormat, Summary};
pub use stats::Statistics;
pub use storage::{FileStorage, MemoryStorage, PersistenceError, Storage, StorageError};
