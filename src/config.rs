//! Engine configuration.

use crate::builder::BuildError;
use serde::{Deserialize, Serialize};

/// Default capacity of the durable log.
pub const DEFAULT_DURABLE_CAPACITY: usize = 100;

/// Default capacity of the in-memory recent cache.
pub const DEFAULT_RECENT_CAPACITY: usize = 20;

/// Event log capacities and storage keys.
///
/// Every field has a default, so a partial JSON document is enough:
///
/// ```rust
/// use brewfsm::EngineConfig;
///
/// let config: EngineConfig = serde_json::from_str(r#"{"durableCapacity": 50}"#).unwrap();
/// assert_eq!(config.durable_capacity, 50);
/// assert_eq!(config.recent_capacity, 20);
/// assert_eq!(config.durable_key, "coffeeDFA_db");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    /// Maximum entries kept in the durable log
    pub durable_capacity: usize,
    /// Maximum entries kept in the recent cache
    pub recent_capacity: usize,
    /// Storage key of the durable log
    pub durable_key: String,
    /// Storage key of the recent cache
    pub recent_key: String,
    /// Storage key of the sequence mark kept across `clear`
    pub sequence_key: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            durable_capacity: DEFAULT_DURABLE_CAPACITY,
            recent_capacity: DEFAULT_RECENT_CAPACITY,
            durable_key: "coffeeDFA_db".to_string(),
            recent_key: "coffeeDFA_log".to_string(),
            sequence_key: "coffeeDFA_seq".to_string(),
        }
    }
}

impl EngineConfig {
    /// Reject configurations the event log cannot honor.
    pub fn validate(&self) -> Result<(), BuildError> {
        if self.durable_capacity == 0 {
            return Err(BuildError::InvalidConfig(
                "durable capacity must be at least 1".to_string(),
            ));
        }
        if self.recent_capacity == 0 {
            return Err(BuildError::InvalidConfig(
                "recent capacity must be at least 1".to_string(),
            ));
        }
        if self.durable_key.is_empty() || self.recent_key.is_empty() || self.sequence_key.is_empty()
        {
            return Err(BuildError::InvalidConfig(
                "storage keys must not be empty".to_string(),
            ));
        }
        if self.durable_key == self.recent_key {
            return Err(BuildError::InvalidConfig(format!(
                "durable and recent logs share the key '{}'",
                self.durable_key
            )));
        }
        if self.sequence_key == self.durable_key || self.sequence_key == self.recent_key {
            return Err(BuildError::InvalidConfig(format!(
                "sequence mark shares the key '{}' with a log",
                self.sequence_key
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.durable_capacity, 100);
        assert_eq!(config.recent_capacity, 20);
    }

    #[test]
    fn zero_capacity_is_rejected() {
        let config = EngineConfig {
            durable_capacity: 0,
            ..EngineConfig::default()
        };
        assert!(matches!(config.validate(), Err(BuildError::InvalidConfig(_))));

        let config = EngineConfig {
            recent_capacity: 0,
            ..EngineConfig::default()
        };
        assert!(matches!(config.validate(), Err(BuildError::InvalidConfig(_))));
    }

    #[test]
    fn shared_keys_are_rejected() {
        let config = EngineConfig {
            recent_key: "coffeeDFA_db".to_string(),
            ..EngineConfig::default()
        };
        assert!(matches!(config.validate(), Err(BuildError::InvalidConfig(_))));

        let config = EngineConfig {
            sequence_key: "coffeeDFA_log".to_string(),
            ..EngineConfig::default()
        };
        assert!(matches!(config.validate(), Err(BuildError::InvalidConfig(_))));
    }
}
