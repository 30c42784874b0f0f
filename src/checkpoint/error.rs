//! Checkpoint error types.

use crate::core::DenialReason;
use thiserror::Error;

/// Errors that can occur during checkpoint operations
#[derive(Debug, Error)]
pub enum CheckpointError {
    /// Serialization to JSON or binary format failed
    #[error("Serialization failed: {0}")]
    SerializationFailed(String),

    /// Deserialization from JSON or binary format failed
    #[error("Deserialization failed: {0}")]
    DeserializationFailed(String),

    /// Checkpoint was written by an incompatible format version
    #[error("Unsupported checkpoint version {found}, supported: {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// Checkpoint belongs to a different device
    #[error("Checkpoint was taken on device '{found}', expected '{expected}'")]
    DeviceMismatch { found: String, expected: String },

    /// Checkpoint refers to a state the automaton does not define
    #[error("Checkpoint state '{0}' is not defined by the automaton")]
    UnknownState(String),

    /// Checkpoint selects an item the device does not sell
    #[error("Checkpoint selects '{0}', which is not in the catalog")]
    UnknownItem(String),

    /// Checkpoint state is only entered through a selection, but none is recorded
    #[error("Checkpoint state '{state}' requires a selected item")]
    MissingSelection { state: String },

    /// Checkpoint payload would have been refused by the guard on the way in
    #[error("Checkpoint state '{state}' is unreachable with this payload: {reason}")]
    UnreachablePayload { state: String, reason: DenialReason },
}
