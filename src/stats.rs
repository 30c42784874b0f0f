//! Statistics derived from the event log.
//!
//! [`Statistics::compute`] is the source of truth: it scans the log and
//! never keeps state of its own. The engine also maintains a running copy
//! through [`Statistics::record`] and [`Statistics::forget`] for cheap
//! display; the two must always agree.

use crate::core::{EntryKind, LogEntry};
use serde::{Deserialize, Serialize};

/// Counters over the transitions in a log.
///
/// Only [`EntryKind::Transition`] entries are counted; resets are system
/// entries and leave every counter unchanged.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    /// Committed table transitions
    pub total_transitions: u64,
    /// Transitions that landed in an accepting state
    pub accept_hits: u64,
    /// Sum of amounts charged
    pub revenue: u64,
}

impl Statistics {
    /// Derive statistics from scratch.
    ///
    /// ```rust
    /// use brewfsm::Statistics;
    ///
    /// assert_eq!(Statistics::compute([]), Statistics::default());
    /// ```
    pub fn compute<'a>(entries: impl IntoIterator<Item = &'a LogEntry>) -> Self {
        entries.into_iter().fold(Self::default(), |mut stats, entry| {
            stats.record(entry);
            stats
        })
    }

    /// Account for a newly appended entry.
    pub fn record(&mut self, entry: &LogEntry) {
        if entry.kind != EntryKind::Transition {
            return;
        }
        self.total_transitions += 1;
        if entry.is_accept_state {
            self.accept_hits += 1;
        }
        self.revenue = self.revenue.saturating_add(entry.charged);
    }

    /// Undo [`record`](Self::record) for an entry leaving the log.
    pub fn forget(&mut self, entry: &LogEntry) {
        if entry.kind != EntryKind::Transition {
            return;
        }
        self.total_transitions = self.total_transitions.saturating_sub(1);
        if entry.is_accept_state {
            self.accept_hits = self.accept_hits.saturating_sub(1);
        }
        self.revenue = self.revenue.saturating_sub(entry.charged);
    }
}
