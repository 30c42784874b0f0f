//! Partial transition function δ: Q × Σ → Q.

use super::state::{StateId, Symbol};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One row of the transition table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionEntry {
    pub from: StateId,
    pub symbol: Symbol,
    pub to: StateId,
}

impl TransitionEntry {
    pub fn new(from: impl Into<String>, symbol: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: StateId::new(from),
            symbol: Symbol::new(symbol),
            to: StateId::new(to),
        }
    }
}

/// Immutable lookup table built from validated entries.
///
/// Not every `(state, symbol)` pair is defined; a missing pair is an
/// undefined transition, not an error of the table.
#[derive(Clone, Debug, Default)]
pub struct TransitionTable {
    rows: BTreeMap<StateId, BTreeMap<Symbol, StateId>>,
    entries: Vec<TransitionEntry>,
}

impl TransitionTable {
    /// Build the table. Callers must have rejected duplicate
    /// `(from, symbol)` pairs already; a later entry would shadow an
    /// earlier one.
    pub(crate) fn from_entries(entries: Vec<TransitionEntry>) -> Self {
        let mut rows: BTreeMap<StateId, BTreeMap<Symbol, StateId>> = BTreeMap::new();
        for entry in &entries {
            rows.entry(entry.from.clone())
                .or_default()
                .insert(entry.symbol.clone(), entry.to.clone());
        }
        Self { rows, entries }
    }

    /// Look up δ(state, symbol).
    pub fn lookup(&self, state: &StateId, symbol: &Symbol) -> Option<&StateId> {
        self.rows.get(state)?.get(symbol)
    }

    /// Symbols with a defined transition out of `state`, in symbol order.
    pub fn symbols_from(&self, state: &StateId) -> Vec<&Symbol> {
        self.rows
            .get(state)
            .map(|row| row.keys().collect())
            .unwrap_or_default()
    }

    /// Entries in definition order.
    pub fn entries(&self) -> &[TransitionEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
