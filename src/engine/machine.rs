//! The transition engine.

use crate::builder::{BuildError, EngineBuilder};
use crate::checkpoint::Checkpoint;
use crate::core::{
    Automaton, Auxiliary, EntryKind, GuardDecision, LogEntry, Params, StateId, Symbol,
};
use crate::device::DeviceProfile;
use crate::engine::transition::{Committed, EngineState, TransitionError};
use crate::event_log::EventLog;
use crate::export::{ExportError, ExportFormat, Report, Summary, JSON_RECENT_ENTRIES};
use crate::stats::Statistics;
use crate::storage::{PersistenceError, Storage};
use chrono::Utc;
use tracing::debug;

/// A device profile driven over a persisted event log.
///
/// Every call either commits completely (new state, new auxiliary, one
/// log entry, updated statistics) or returns an error and changes
/// nothing.
#[derive(Debug)]
pub struct Engine<St: Storage> {
    profile: DeviceProfile,
    state: EngineState,
    log: EventLog<St>,
    stats: Statistics,
    load_warning: Option<PersistenceError>,
}

impl<St: Storage> Engine<St> {
    /// Engine at the profile's start state with the default configuration.
    pub fn open(profile: DeviceProfile, storage: St) -> Result<Self, BuildError> {
        EngineBuilder::new(profile, storage).build()
    }

    pub(crate) fn from_parts(
        profile: DeviceProfile,
        state: EngineState,
        log: EventLog<St>,
        load_warning: Option<PersistenceError>,
    ) -> Self {
        let stats = Statistics::compute(log.entries());
        Self {
            profile,
            state,
            log,
            stats,
            load_warning,
        }
    }

    /// Apply one input symbol.
    ///
    /// Lookup runs first, then the guard, then the auxiliary effect is
    /// prepared. Only when all three succeed is anything changed.
    pub fn apply(
        &mut self,
        symbol: impl Into<Symbol>,
        params: &Params,
    ) -> Result<Committed, TransitionError> {
        let symbol = symbol.into();
        let automaton = self.profile.automaton();

        let to = automaton
            .lookup(&self.state.current, &symbol)
            .ok_or_else(|| TransitionError::UndefinedTransition {
                state: self.state.current.clone(),
                symbol: symbol.clone(),
            })?
            .clone();

        if let GuardDecision::Denied(reason) =
            self.profile
                .guard()
                .evaluate(&symbol, params, &self.state.auxiliary)
        {
            debug!(state = %self.state.current, %symbol, %reason, "guard denied transition");
            return Err(TransitionError::GuardRejected(reason));
        }

        let prepared = self.profile.effects().effect_for(&symbol).prepare(
            &self.state.auxiliary,
            params,
            self.profile.catalog(),
        )?;

        let from = std::mem::replace(&mut self.state.current, to);
        self.state.auxiliary = prepared.auxiliary;

        Ok(self.record(EntryKind::Transition, from, symbol, prepared.charged))
    }

    /// Force the start state with a default payload, bypassing the table
    /// and the guard. Logged as a system entry.
    pub fn reset(&mut self) -> Committed {
        let start = self.profile.automaton().start().clone();
        let from = std::mem::replace(&mut self.state.current, start);
        self.state.auxiliary = Auxiliary::default();
        self.record(EntryKind::System, from, Symbol::reset(), 0)
    }

    /// Empty the log and its storage. State and auxiliary are kept.
    pub fn clear(&mut self) -> Result<(), PersistenceError> {
        self.log.clear()?;
        self.stats = Statistics::default();
        Ok(())
    }

    fn record(&mut self, kind: EntryKind, from: StateId, symbol: Symbol, charged: u64) -> Committed {
        let automaton = self.profile.automaton();
        let to = &self.state.current;
        let entry = LogEntry {
            sequence: self.log.next_sequence(),
            timestamp: Utc::now(),
            kind,
            from_state_name: automaton.state_name(&from).to_string(),
            from_state: from,
            symbol,
            to_state: to.clone(),
            to_state_name: automaton.state_name(to).to_string(),
            auxiliary: self.state.auxiliary.clone(),
            charged,
            is_accept_state: automaton.is_accepting(to),
        };

        debug!(sequence = entry.sequence, transition = %entry.arrow(), "transition committed");

        let appended = self.log.append(entry.clone());
        self.stats.record(&entry);
        if let Some(evicted) = &appended.evicted {
            self.stats.forget(evicted);
        }

        Committed {
            entry,
            persistence_warning: appended.persistence,
        }
    }

    /// The `n` most recent entries, newest first.
    pub fn recent(&self, n: usize) -> Vec<&LogEntry> {
        self.log.recent(n)
    }

    pub fn statistics(&self) -> Statistics {
        self.stats
    }

    pub fn state(&self) -> &EngineState {
        &self.state
    }

    pub fn current_state(&self) -> &StateId {
        &self.state.current
    }

    pub fn auxiliary(&self) -> &Auxiliary {
        &self.state.auxiliary
    }

    pub fn log(&self) -> &EventLog<St> {
        &self.log
    }

    pub fn profile(&self) -> &DeviceProfile {
        &self.profile
    }

    pub fn automaton(&self) -> &Automaton {
        self.profile.automaton()
    }

    /// Problem met while loading the persisted log, if any.
    pub fn load_warning(&self) -> Option<&PersistenceError> {
        self.load_warning.as_ref()
    }

    pub fn storage(&self) -> &St {
        self.log.storage()
    }

    pub fn into_storage(self) -> St {
        self.log.into_storage()
    }

    /// Snapshot of the current state and auxiliary payload.
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint::capture(
            self.profile.name(),
            &self.state.current,
            &self.state.auxiliary,
        )
    }

    pub fn export(&self, format: ExportFormat) -> Result<String, ExportError> {
        Report {
            device: self.profile.name(),
            automaton: self.profile.automaton(),
            catalog: self.profile.catalog(),
            state: &self.state,
            statistics: self.stats,
            entries: self.log.entries(),
            recent: self.log.recent(JSON_RECENT_ENTRIES),
            generated_at: Utc::now(),
        }
        .render(format)
    }

    pub fn summary(&self) -> Summary {
        Summary {
            entries: self.log.len(),
            current_state: self.state.current.clone(),
            current_state_name: self.automaton().state_name(&self.state.current).to_string(),
            statistics: self.stats,
            storage_bytes: self.log.encoded_size(),
        }
    }
}
