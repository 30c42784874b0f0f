//! Bounded, persisted event log.
//!
//! Two views of the same append stream are kept:
//! - the durable log, up to `durable_capacity` entries, oldest evicted
//!   first;
//! - the recent cache, up to `recent_capacity` entries, used for quick
//!   "latest transitions" listings.
//!
//! Both are written to storage as JSON arrays in chronological order after
//! every append. Storage failures never lose the in-memory copy; they are
//! returned to the caller.

use crate::config::EngineConfig;
use crate::core::LogEntry;
use crate::storage::{PersistenceError, Storage};
use std::collections::VecDeque;
use tracing::{debug, warn};

/// Result of [`EventLog::append`].
#[derive(Debug)]
pub struct Appended {
    /// Entry pushed out of the durable log to respect its capacity
    pub evicted: Option<LogEntry>,
    /// Set when the log could not be persisted
    pub persistence: Option<PersistenceError>,
}

/// Append-only log backed by a [`Storage`].
#[derive(Debug)]
pub struct EventLog<St: Storage> {
    storage: St,
    config: EngineConfig,
    durable: VecDeque<LogEntry>,
    recent: VecDeque<LogEntry>,
    next_sequence: u64,
}

impl<St: Storage> EventLog<St> {
    /// Load both persisted lists, keeping the most recent entries of each
    /// up to its capacity.
    ///
    /// A missing key is an empty list. An unreadable or corrupt key is
    /// reported and treated as empty.
    pub fn load(storage: St, config: EngineConfig) -> (Self, Option<PersistenceError>) {
        let mut warning = None;

        let durable = read_list(&storage, &config.durable_key, config.durable_capacity)
            .unwrap_or_else(|e| {
                warn!(key = %config.durable_key, error = %e, "durable log not loaded");
                if warning.is_none() {
                    warning = Some(e);
                }
                VecDeque::new()
            });
        let recent = read_list(&storage, &config.recent_key, config.recent_capacity)
            .unwrap_or_else(|e| {
                warn!(key = %config.recent_key, error = %e, "recent cache not loaded");
                if warning.is_none() {
                    warning = Some(e);
                }
                VecDeque::new()
            });

        let mark = read_mark(&storage, &config.sequence_key).unwrap_or_else(|e| {
            warn!(key = %config.sequence_key, error = %e, "sequence mark not loaded");
            if warning.is_none() {
                warning = Some(e);
            }
            1
        });
        let next_sequence = durable
            .iter()
            .chain(recent.iter())
            .map(|entry| entry.sequence + 1)
            .fold(mark.max(1), u64::max);

        debug!(
            durable = durable.len(),
            recent = recent.len(),
            next_sequence,
            "event log loaded"
        );

        let log = Self {
            storage,
            config,
            durable,
            recent,
            next_sequence,
        };
        (log, warning)
    }

    /// Sequence number the next appended entry should carry.
    pub fn next_sequence(&self) -> u64 {
        self.next_sequence
    }

    /// Append `entry` to both views, evict past capacity, then persist.
    pub fn append(&mut self, entry: LogEntry) -> Appended {
        self.next_sequence = self.next_sequence.max(entry.sequence + 1);

        self.durable.push_back(entry.clone());
        let evicted = if self.durable.len() > self.config.durable_capacity {
            self.durable.pop_front()
        } else {
            None
        };

        self.recent.push_back(entry);
        if self.recent.len() > self.config.recent_capacity {
            self.recent.pop_front();
        }

        let persistence = self.persist().err();
        if let Some(e) = &persistence {
            warn!(error = %e, "event log kept in memory only");
        }

        Appended {
            evicted,
            persistence,
        }
    }

    /// The `n` most recent entries, newest first. Bounded by the recent
    /// cache capacity.
    pub fn recent(&self, n: usize) -> Vec<&LogEntry> {
        self.recent.iter().rev().take(n).collect()
    }

    /// Durable entries in chronological order.
    pub fn entries(&self) -> &VecDeque<LogEntry> {
        &self.durable
    }

    pub fn last(&self) -> Option<&LogEntry> {
        self.durable.back()
    }

    pub fn len(&self) -> usize {
        self.durable.len()
    }

    pub fn is_empty(&self) -> bool {
        self.durable.is_empty()
    }

    /// Size in bytes of the durable log as persisted.
    pub fn encoded_size(&self) -> usize {
        serde_json::to_vec(&self.durable)
            .map(|bytes| bytes.len())
            .unwrap_or(0)
    }

    /// Empty both views and both storage keys.
    ///
    /// The next sequence number is saved first so numbering continues
    /// after a reload. Either everything is cleared or nothing is: if the
    /// second key cannot be removed, the first is written back and the
    /// in-memory entries are kept.
    pub fn clear(&mut self) -> Result<(), PersistenceError> {
        let durable_key = self.config.durable_key.clone();
        let recent_key = self.config.recent_key.clone();

        write_mark(
            &mut self.storage,
            &self.config.sequence_key,
            self.next_sequence,
        )?;

        let backup = serde_json::to_vec(&self.durable).map_err(|source| {
            PersistenceError::Encode {
                key: durable_key.clone(),
                source,
            }
        })?;

        self.storage
            .remove(&durable_key)
            .map_err(|source| PersistenceError::Storage {
                key: durable_key.clone(),
                source,
            })?;

        if let Err(source) = self.storage.remove(&recent_key) {
            if let Err(restore) = self.storage.save(&durable_key, &backup) {
                warn!(key = %durable_key, error = %restore, "could not restore durable log");
            }
            return Err(PersistenceError::Storage {
                key: recent_key,
                source,
            });
        }

        self.durable.clear();
        self.recent.clear();
        debug!("event log cleared");
        Ok(())
    }

    pub fn storage(&self) -> &St {
        &self.storage
    }

    pub fn into_storage(self) -> St {
        self.storage
    }

    fn persist(&mut self) -> Result<(), PersistenceError> {
        let durable = write_list(
            &mut self.storage,
            &self.config.durable_key,
            &self.durable,
        );
        let recent = write_list(&mut self.storage, &self.config.recent_key, &self.recent);
        durable.and(recent)
    }
}

fn read_list<St: Storage>(
    storage: &St,
    key: &str,
    capacity: usize,
) -> Result<VecDeque<LogEntry>, PersistenceError> {
    let bytes = storage
        .load(key)
        .map_err(|source| PersistenceError::Storage {
            key: key.to_string(),
            source,
        })?;
    let Some(bytes) = bytes else {
        return Ok(VecDeque::new());
    };

    let mut entries: VecDeque<LogEntry> =
        serde_json::from_slice(&bytes).map_err(|source| PersistenceError::Decode {
            key: key.to_string(),
            source,
        })?;
    while entries.len() > capacity {
        entries.pop_front();
    }
    Ok(entries)
}

fn read_mark<St: Storage>(storage: &St, key: &str) -> Result<u64, PersistenceError> {
    let bytes = storage
        .load(key)
        .map_err(|source| PersistenceError::Storage {
            key: key.to_string(),
            source,
        })?;
    match bytes {
        Some(bytes) => serde_json::from_slice(&bytes).map_err(|source| PersistenceError::Decode {
            key: key.to_string(),
            source,
        }),
        None => Ok(1),
    }
}

fn write_mark<St: Storage>(storage: &mut St, key: &str, mark: u64) -> Result<(), PersistenceError> {
    let bytes = serde_json::to_vec(&mark).map_err(|source| PersistenceError::Encode {
        key: key.to_string(),
        source,
    })?;
    storage
        .save(key, &bytes)
        .map_err(|source| PersistenceError::Storage {
            key: key.to_string(),
            source,
        })
}

fn write_list<St: Storage>(
    storage: &mut St,
    key: &str,
    entries: &VecDeque<LogEntry>,
) -> Result<(), PersistenceError> {
    let bytes = serde_json::to_vec(entries).map_err(|source| PersistenceError::Encode {
        key: key.to_string(),
        source,
    })?;
    storage
        .save(key, &bytes)
        .map_err(|source| PersistenceError::Storage {
            key: key.to_string(),
            source,
        })
}
