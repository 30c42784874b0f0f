//! Core automaton types and logic.
//!
//! This module contains the pure part of the device:
//! - State and symbol identifiers
//! - The validated automaton and its transition table
//! - Guard policies that gate transitions
//! - The auxiliary payload and the effects symbols have on it
//!
//! Nothing here performs I/O or keeps mutable state; the engine owns all
//! mutation.

mod automaton;
mod auxiliary;
mod guard;
mod history;
mod state;
mod table;

pub use automaton::{validate, Automaton, AutomatonSpec, SpecViolation};
pub use auxiliary::{
    AuxEffect, Auxiliary, Catalog, EffectTable, InputError, Item, Params, Prepared,
};
pub use guard::{AlwaysApprove, BalanceGuard, DenialReason, GuardDecision, GuardPolicy};
pub use history::{EntryKind, LogEntry};
pub use state::{StateDef, StateId, Symbol, RESET_SYMBOL};
pub use table::{TransitionEntry, TransitionTable};
