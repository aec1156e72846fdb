use thiserror::Error;

use crate::nfa::StateNumber;

/// A malformed automaton value, detected before any construction runs.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("an automaton needs at least one state")]
    EmptyAutomaton,

    #[error("state {state} is out of range, the automaton has {state_count} states")]
    StateOutOfRange {
        state: StateNumber,
        state_count: usize,
    },

    #[error("transition on a symbol that is not part of the alphabet")]
    UnknownSymbol,

    /// The symbol at `index` already occurs earlier in the alphabet.
    #[error("alphabet symbol at position {index} is a duplicate")]
    DuplicateSymbol { index: usize },

    #[error("state {state} has {found} transitions, expected one per symbol ({expected})")]
    RowWidth {
        state: StateNumber,
        expected: usize,
        found: usize,
    },
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid automaton: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("powerset construction exceeded the limit of {limit} states")]
    StateLimitExceeded { limit: usize },

    #[error("invalid options: {0}")]
    InvalidOptions(String),
}
