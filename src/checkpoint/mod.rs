//! Checkpoint and resume for engine state.
//!
//! The event log survives restarts through its storage; the engine's
//! current state and auxiliary payload do not. A [`Checkpoint`] captures
//! them so a device can resume where it stopped. Checkpoints are written
//! as pretty JSON for inspection or bincode for compactness.

use crate::core::{AuxEffect, Auxiliary, GuardDecision, Params, StateId};
use crate::device::DeviceProfile;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod error;

pub use error::CheckpointError;

/// Version identifier for checkpoint format
pub const CHECKPOINT_VERSION: u32 = 1;

/// Serializable snapshot of an engine.
/// Does NOT include the log (it is persisted separately) or the profile.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checkpoint {
    /// Checkpoint format version
    pub version: u32,

    /// Unique checkpoint identifier
    pub id: String,

    /// When checkpoint was created
    pub timestamp: DateTime<Utc>,

    /// Name of the device profile the engine ran
    pub device: String,

    /// Current state of the engine
    pub current_state: StateId,

    /// Auxiliary payload at checkpoint time
    pub auxiliary: Auxiliary,
}

impl Checkpoint {
    pub(crate) fn capture(device: &str, current_state: &StateId, auxiliary: &Auxiliary) -> Self {
        Self {
            version: CHECKPOINT_VERSION,
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            device: device.to_string(),
            current_state: current_state.clone(),
            auxiliary: auxiliary.clone(),
        }
    }

    pub fn to_json(&self) -> Result<String, CheckpointError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, CheckpointError> {
        serde_json::from_str(json).map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))
    }

    pub fn to_binary(&self) -> Result<Vec<u8>, CheckpointError> {
        bincode::serialize(self).map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    pub fn from_binary(bytes: &[u8]) -> Result<Self, CheckpointError> {
        bincode::deserialize(bytes)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))
    }

    /// Check that this checkpoint can be resumed on `profile`.
    ///
    /// Beyond the version, device and state, the payload must be one the
    /// device could have reached: a selected item must be in the catalog,
    /// and a state entered only through selections needs a selection the
    /// guard would approve.
    pub fn validate_for(&self, profile: &DeviceProfile) -> Result<(), CheckpointError> {
        if self.version != CHECKPOINT_VERSION {
            return Err(CheckpointError::UnsupportedVersion {
                found: self.version,
                supported: CHECKPOINT_VERSION,
            });
        }
        if self.device != profile.name() {
            return Err(CheckpointError::DeviceMismatch {
                found: self.device.clone(),
                expected: profile.name().to_string(),
            });
        }
        let automaton = profile.automaton();
        if !automaton.contains(&self.current_state) {
            return Err(CheckpointError::UnknownState(
                self.current_state.to_string(),
            ));
        }
        if let Some(item) = &self.auxiliary.selected_item {
            if profile.catalog().get(item).is_none() {
                return Err(CheckpointError::UnknownItem(item.clone()));
            }
        }

        let entering: Vec<_> = automaton
            .table()
            .entries()
            .iter()
            .filter(|entry| entry.to == self.current_state)
            .collect();
        let selection_only = !entering.is_empty()
            && entering.iter().all(|entry| {
                profile.effects().effect_for(&entry.symbol) == AuxEffect::RecordSelection
            });
        if !selection_only {
            return Ok(());
        }

        if self.auxiliary.selected_item.is_none() {
            return Err(CheckpointError::MissingSelection {
                state: self.current_state.to_string(),
            });
        }
        let mut denial = None;
        for entry in entering {
            match profile
                .guard()
                .evaluate(&entry.symbol, &Params::none(), &self.auxiliary)
            {
                GuardDecision::Approved => return Ok(()),
                GuardDecision::Denied(reason) => denial = denial.or(Some(reason)),
            }
        }
        match denial {
            Some(reason) => Err(CheckpointError::UnreachablePayload {
                state: self.current_state.to_string(),
                reason,
            }),
            None => Ok(()),
        }
    }
}
