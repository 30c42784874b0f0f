//! Builder for constructing automata.

use crate::builder::error::BuildError;
use crate::core::{Automaton, AutomatonSpec, StateDef, StateId, Symbol, TransitionEntry};

/// Builder for constructing automata with a fluent API.
#[derive(Clone, Debug, Default)]
pub struct AutomatonBuilder {
    states: Vec<StateDef>,
    alphabet: Vec<Symbol>,
    transitions: Vec<TransitionEntry>,
    start: Option<StateId>,
    accepting: Vec<StateId>,
}

impl AutomatonBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a state.
    pub fn state(
        mut self,
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        self.states.push(StateDef::new(id, name, description));
        self
    }

    /// Add a symbol to the alphabet.
    pub fn symbol(mut self, symbol: impl Into<String>) -> Self {
        self.alphabet.push(Symbol::new(symbol));
        self
    }

    /// Add several symbols at once.
    pub fn symbols<I, S>(mut self, symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.alphabet.extend(symbols.into_iter().map(Symbol::new));
        self
    }

    /// Add δ(from, symbol) = to.
    pub fn transition(
        mut self,
        from: impl Into<String>,
        symbol: impl Into<String>,
        to: impl Into<String>,
    ) -> Self {
        self.transitions
            .push(TransitionEntry::new(from, symbol, to));
        self
    }

    /// Set the start state (required).
    pub fn start(mut self, state: impl Into<String>) -> Self {
        self.start = Some(StateId::new(state));
        self
    }

    /// Mark a state as accepting.
    pub fn accepting(mut self, state: impl Into<String>) -> Self {
        self.accepting.push(StateId::new(state));
        self
    }

    /// Build and validate the automaton.
    pub fn build(self) -> Result<Automaton, BuildError> {
        let start = self.start.ok_or(BuildError::MissingStart)?;

        Automaton::new(AutomatonSpec {
            states: self.states,
            alphabet: self.alphabet,
            transitions: self.transitions,
            start,
            accepting: self.accepting,
        })
    }
}
