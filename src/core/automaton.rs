//! Static automaton definition M = (Q, Σ, δ, q₀, F).
//!
//! An [`Automaton`] can only be obtained through validation, so every
//! value of the type satisfies its invariants: the start and accepting
//! states exist, every table entry refers to known states and symbols,
//! and each `(state, symbol)` pair has at most one target.

use super::state::{StateDef, StateId, Symbol};
use super::table::{TransitionEntry, TransitionTable};
use crate::builder::BuildError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::fmt;
use stillwater::validation::Validation;
use thiserror::Error;

/// Serializable description of an automaton, before validation.
///
/// # Example
///
/// ```rust
/// use brewfsm::core::{Automaton, AutomatonSpec, StateDef, Symbol, StateId, TransitionEntry};
///
/// let spec = AutomatonSpec {
///     states: vec![
///         StateDef::new("q0", "IDLE", ""),
///         StateDef::new("q1", "DONE", ""),
///     ],
///     alphabet: vec![Symbol::new("GO")],
///     transitions: vec![TransitionEntry::new("q0", "GO", "q1")],
///     start: StateId::new("q0"),
///     accepting: vec![StateId::new("q1")],
/// };
///
/// let automaton = Automaton::new(spec).unwrap();
/// assert!(automaton.is_accepting(&StateId::new("q1")));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutomatonSpec {
    pub states: Vec<StateDef>,
    pub alphabet: Vec<Symbol>,
    pub transitions: Vec<TransitionEntry>,
    pub start: StateId,
    #[serde(default)]
    pub accepting: Vec<StateId>,
}

/// A single broken invariant found while validating an [`AutomatonSpec`].
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SpecViolation {
    #[error("automaton has no states")]
    NoStates,

    #[error("state '{0}' is defined more than once")]
    DuplicateState(StateId),

    #[error("symbol '{0}' is defined more than once")]
    DuplicateSymbol(Symbol),

    #[error("symbol '{0}' is reserved and cannot be part of the alphabet")]
    ReservedSymbol(Symbol),

    #[error("start state '{0}' is not a defined state")]
    UnknownStart(StateId),

    #[error("accepting state '{0}' is not a defined state")]
    UnknownAccepting(StateId),

    #[error("transition δ({from}, {symbol}) starts from an undefined state")]
    UnknownSource { from: StateId, symbol: Symbol },

    #[error("transition δ({from}, {symbol}) targets undefined state '{to}'")]
    UnknownTarget {
        from: StateId,
        symbol: Symbol,
        to: StateId,
    },

    #[error("transition δ({from}, {symbol}) uses a symbol outside the alphabet")]
    UnknownSymbol { from: StateId, symbol: Symbol },

    #[error("transition δ({from}, {symbol}) is defined more than once")]
    Nondeterministic { from: StateId, symbol: Symbol },
}

type Check = Validation<(), Vec<SpecViolation>>;

fn require(ok: bool, violation: impl FnOnce() -> SpecViolation) -> Check {
    if ok {
        Validation::Success(())
    } else {
        Validation::Failure(vec![violation()])
    }
}

/// Check every invariant, accumulating all violations instead of
/// stopping at the first.
pub fn validate(spec: &AutomatonSpec) -> Result<(), Vec<SpecViolation>> {
    let mut checks: Vec<Check> = Vec::new();
    checks.push(require(!spec.states.is_empty(), || SpecViolation::NoStates));

    let mut states = HashSet::new();
    for def in &spec.states {
        let fresh = states.insert(&def.id);
        checks.push(require(fresh, || SpecViolation::DuplicateState(def.id.clone())));
    }

    let mut alphabet = HashSet::new();
    for symbol in &spec.alphabet {
        let fresh = alphabet.insert(symbol);
        checks.push(require(fresh, || SpecViolation::DuplicateSymbol(symbol.clone())));
        checks.push(require(!symbol.is_reset(), || {
            SpecViolation::ReservedSymbol(symbol.clone())
        }));
    }

    checks.push(require(states.contains(&spec.start), || {
        SpecViolation::UnknownStart(spec.start.clone())
    }));
    for state in &spec.accepting {
        checks.push(require(states.contains(state), || {
            SpecViolation::UnknownAccepting(state.clone())
        }));
    }

    let mut pairs = HashSet::new();
    for entry in &spec.transitions {
        checks.push(require(states.contains(&entry.from), || {
            SpecViolation::UnknownSource {
                from: entry.from.clone(),
                symbol: entry.symbol.clone(),
            }
        }));
        checks.push(require(states.contains(&entry.to), || {
            SpecViolation::UnknownTarget {
                from: entry.from.clone(),
                symbol: entry.symbol.clone(),
                to: entry.to.clone(),
            }
        }));
        checks.push(require(alphabet.contains(&entry.symbol), || {
            SpecViolation::UnknownSymbol {
                from: entry.from.clone(),
                symbol: entry.symbol.clone(),
            }
        }));
        let fresh = pairs.insert((&entry.from, &entry.symbol));
        checks.push(require(fresh, || SpecViolation::Nondeterministic {
            from: entry.from.clone(),
            symbol: entry.symbol.clone(),
        }));
    }

    match Validation::all_vec(checks) {
        Validation::Success(_) => Ok(()),
        Validation::Failure(violations) => Err(violations),
    }
}

/// Validated, immutable automaton.
#[derive(Clone, Debug)]
pub struct Automaton {
    states: Vec<StateDef>,
    alphabet: Vec<Symbol>,
    table: TransitionTable,
    start: StateId,
    accepting: BTreeSet<StateId>,
}

impl Automaton {
    /// Validate `spec` and build the automaton.
    ///
    /// Returns [`BuildError::MalformedSpec`] listing every violation when
    /// `spec` is inconsistent. Nothing is repaired.
    pub fn new(spec: AutomatonSpec) -> Result<Self, BuildError> {
        validate(&spec).map_err(|violations| BuildError::MalformedSpec { violations })?;

        Ok(Self {
            states: spec.states,
            alphabet: spec.alphabet,
            table: TransitionTable::from_entries(spec.transitions),
            start: spec.start,
            accepting: spec.accepting.into_iter().collect(),
        })
    }

    /// Parse a JSON [`AutomatonSpec`] and validate it.
    pub fn from_json(json: &str) -> Result<Self, BuildError> {
        let spec: AutomatonSpec =
            serde_json::from_str(json).map_err(|e| BuildError::Parse(e.to_string()))?;
        Self::new(spec)
    }

    /// δ(state, symbol), or `None` when the pair is undefined.
    pub fn lookup(&self, state: &StateId, symbol: &Symbol) -> Option<&StateId> {
        self.table.lookup(state, symbol)
    }

    /// Whether `state` belongs to F.
    pub fn is_accepting(&self, state: &StateId) -> bool {
        self.accepting.contains(state)
    }

    pub fn contains(&self, state: &StateId) -> bool {
        self.state(state).is_some()
    }

    /// Definition of `state`, if it exists.
    pub fn state(&self, state: &StateId) -> Option<&StateDef> {
        self.states.iter().find(|def| &def.id == state)
    }

    /// Display name of `state`, falling back to the raw identifier.
    pub fn state_name<'a>(&'a self, state: &'a StateId) -> &'a str {
        self.state(state)
            .map(|def| def.name.as_str())
            .unwrap_or_else(|| state.as_str())
    }

    pub fn states(&self) -> &[StateDef] {
        &self.states
    }

    pub fn alphabet(&self) -> &[Symbol] {
        &self.alphabet
    }

    pub fn start(&self) -> &StateId {
        &self.start
    }

    pub fn accepting(&self) -> impl Iterator<Item = &StateId> {
        self.accepting.iter()
    }

    pub fn table(&self) -> &TransitionTable {
        &self.table
    }

    /// Convert back into the serializable form.
    pub fn to_spec(&self) -> AutomatonSpec {
        AutomatonSpec {
            states: self.states.clone(),
            alphabet: self.alphabet.clone(),
            transitions: self.table.entries().to_vec(),
            start: self.start.clone(),
            accepting: self.accepting.iter().cloned().collect(),
        }
    }

    /// Formal definition M = (Q, Σ, δ, q₀, F) as text.
    pub fn describe(&self) -> String {
        Definition(self).to_string()
    }
}

struct Definition<'a>(&'a Automaton);

impl fmt::Display for Definition<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let automaton = self.0;
        writeln!(f, "M = (Q, Σ, δ, q₀, F)\n")?;

        let states: Vec<String> = automaton
            .states
            .iter()
            .map(|def| format!("{} ({})", def.id, def.name))
            .collect();
        writeln!(f, "Q = {{{}}}", states.join(", "))?;

        let alphabet: Vec<&str> = automaton.alphabet.iter().map(Symbol::as_str).collect();
        writeln!(f, "Σ = {{{}}}", alphabet.join(", "))?;

        writeln!(
            f,
            "q₀ = {} ({})",
            automaton.start,
            automaton.state_name(&automaton.start)
        )?;

        let accepting: Vec<String> = automaton
            .accepting
            .iter()
            .map(|id| format!("{} ({})", id, automaton.state_name(id)))
            .collect();
        writeln!(f, "F = {{{}}}", accepting.join(", "))?;

        writeln!(f, "\nδ: Q × Σ → Q")?;
        for entry in automaton.table.entries() {
            writeln!(f, "δ({}, {}) = {}", entry.from, entry.symbol, entry.to)?;
        }
        Ok(())
    }
}
