//! Powerset construction of DFAs from NFAs with epsilon transitions, and table-filling
//! minimization of the result.

pub mod automaton;
pub mod dfa;
pub mod error;
pub mod minimize;
pub mod nfa;
pub mod options;
pub mod pipeline;
pub mod table;

pub use automaton::Automaton;
pub use dfa::DFA;
pub use error::{ConfigurationError, Error};
pub use minimize::MinimizedDFA;
pub use nfa::{NFABuilder, StateNumber, StateSet, Symbol, NFA};
pub use options::Options;
pub use pipeline::{convert, Conversion};
