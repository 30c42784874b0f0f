//! Transition results and errors.

use crate::core::{Auxiliary, DenialReason, InputError, LogEntry, StateId, Symbol};
use crate::storage::PersistenceError;
use serde::{Deserialize, Serialize};

/// Mutable part of an engine: where it is and what it carries.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineState {
    pub current: StateId,
    pub auxiliary: Auxiliary,
}

impl EngineState {
    /// State at `start` with a default payload.
    pub fn initial(start: &StateId) -> Self {
        Self {
            current: start.clone(),
            auxiliary: Auxiliary::default(),
        }
    }
}

/// Errors that can occur during transitions.
///
/// None of them is fatal and none changes the engine: the state and
/// auxiliary payload after a failed call equal those before it.
#[derive(Debug, thiserror::Error)]
pub enum TransitionError {
    #[error("Invalid transition: δ({state}, {symbol}) is undefined")]
    UndefinedTransition { state: StateId, symbol: Symbol },

    #[error("Transition rejected: {0}")]
    GuardRejected(DenialReason),

    #[error("Invalid input: {0}")]
    InvalidInput(#[from] InputError),
}

impl TransitionError {
    /// Human readable reason for transient display.
    pub fn reason(&self) -> String {
        self.to_string()
    }
}

/// A committed transition.
#[derive(Debug)]
pub struct Committed {
    /// The entry appended to the log
    pub entry: LogEntry,
    /// Set when the entry is only held in memory
    pub persistence_warning: Option<PersistenceError>,
}

impl Committed {
    pub fn to_state(&self) -> &StateId {
        &self.entry.to_state
    }

    pub fn is_accepting(&self) -> bool {
        self.entry.is_accept_state
    }

    pub fn is_persisted(&self) -> bool {
        self.persistence_warning.is_none()
    }
}
