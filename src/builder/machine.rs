//! Builder for constructing engines.

use crate::builder::error::BuildError;
use crate::checkpoint::Checkpoint;
use crate::config::EngineConfig;
use crate::device::DeviceProfile;
use crate::engine::{Engine, EngineState};
use crate::event_log::EventLog;
use crate::storage::Storage;
use tracing::{info, warn};

/// Builder for constructing engines with a fluent API.
pub struct EngineBuilder<St: Storage> {
    profile: DeviceProfile,
    storage: St,
    config: EngineConfig,
    checkpoint: Option<Checkpoint>,
}

impl<St: Storage> EngineBuilder<St> {
    /// Create a new builder for `profile` persisting into `storage`.
    pub fn new(profile: DeviceProfile, storage: St) -> Self {
        Self {
            profile,
            storage,
            config: EngineConfig::default(),
            checkpoint: None,
        }
    }

    /// Replace the default configuration.
    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Start from a checkpoint instead of the start state.
    pub fn resume_from(mut self, checkpoint: Checkpoint) -> Self {
        self.checkpoint = Some(checkpoint);
        self
    }

    /// Build the engine.
    ///
    /// Fails on an invalid configuration or a checkpoint that does not
    /// belong to this profile. A persisted log that cannot be read is not
    /// fatal; see [`Engine::load_warning`].
    pub fn build(self) -> Result<Engine<St>, BuildError> {
        self.config.validate()?;

        let state = match self.checkpoint {
            Some(checkpoint) => {
                checkpoint.validate_for(&self.profile)?;
                info!(
                    device = %checkpoint.device,
                    checkpoint = %checkpoint.id,
                    state = %checkpoint.current_state,
                    "resuming from checkpoint"
                );
                EngineState {
                    current: checkpoint.current_state,
                    auxiliary: checkpoint.auxiliary,
                }
            }
            None => EngineState::initial(self.profile.automaton().start()),
        };

        let (log, load_warning) = EventLog::load(self.storage, self.config);
        if let Some(e) = &load_warning {
            warn!(error = %e, "starting with a partially loaded log");
        }

        Ok(Engine::from_parts(self.profile, state, log, load_warning))
    }
}
