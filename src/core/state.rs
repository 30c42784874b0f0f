//! State and symbol identifiers for the automaton.
//!
//! States and symbols are opaque identifiers. They carry no behavior on
//! their own; everything a state "means" (its display name, whether it is
//! accepting) comes from the [`Automaton`](super::Automaton) that defines it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Reserved pseudo-symbol used by engine resets.
///
/// It never appears in an alphabet and is exempt from table lookup and
/// guard evaluation.
pub const RESET_SYMBOL: &str = "RESET";

/// Opaque identifier of an automaton state.
///
/// # Example
///
/// ```rust
/// use brewfsm::core::StateId;
///
/// let idle = StateId::new("q0");
/// assert_eq!(idle.as_str(), "q0");
/// assert_eq!(idle.to_string(), "q0");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateId(String);

impl StateId {
    /// Create a state identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the identifier text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StateId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Opaque identifier of an input symbol.
///
/// # Example
///
/// ```rust
/// use brewfsm::core::Symbol;
///
/// let start = Symbol::new("START");
/// assert!(!start.is_reset());
/// assert!(Symbol::reset().is_reset());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Symbol(String);

impl Symbol {
    /// Create a symbol.
    pub fn new(symbol: impl Into<String>) -> Self {
        Self(symbol.into())
    }

    /// The reserved reset pseudo-symbol.
    pub fn reset() -> Self {
        Self::new(RESET_SYMBOL)
    }

    /// Check whether this is the reserved reset pseudo-symbol.
    pub fn is_reset(&self) -> bool {
        self.0 == RESET_SYMBOL
    }

    /// Borrow the symbol text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Symbol {
    fn from(symbol: &str) -> Self {
        Self::new(symbol)
    }
}

/// Definition of a single state: identifier plus display metadata.
///
/// Immutable once the automaton is built.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateDef {
    /// Identifier used in the transition table
    pub id: StateId,
    /// Display name, e.g. `IDLE`
    pub name: String,
    /// Human readable description of what the device is doing
    #[serde(default)]
    pub description: String,
}

impl StateDef {
    pub fn new(id: impl Into<String>, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: StateId::new(id),
            name: name.into(),
            description: description.into(),
        }
    }
}
