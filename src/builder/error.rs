//! Build errors for automata and engines.

use crate::checkpoint::CheckpointError;
use crate::core::SpecViolation;
use thiserror::Error;

fn list(violations: &[SpecViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Errors that can occur when building automata and engines.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Start state not specified. Call .start(state) before .build()")]
    MissingStart,

    #[error("Malformed automaton spec: {}", list(.violations))]
    MalformedSpec { violations: Vec<SpecViolation> },

    #[error("Could not parse automaton spec: {0}")]
    Parse(String),

    #[error("Invalid engine configuration: {0}")]
    InvalidConfig(String),

    #[error("Cannot resume from checkpoint: {0}")]
    Checkpoint(#[from] CheckpointError),
}
