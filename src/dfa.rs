use std::hash::Hash;

use bit_vec::BitVec;

use crate::automaton::{Automaton, AUTO_START};
use crate::error::ConfigurationError;
use crate::minimize::{minimize, MinimizedDFA};
use crate::nfa::{StateNumber, StateSet};

pub const DFA_START: StateNumber = AUTO_START;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DFAState {
    /// The set of NFA states this DFA state stands for.
    pub identity: StateSet,
    /// Alphabet index -> target state, one entry per symbol. `None` is the stuck state.
    pub transitions: Box<[Option<StateNumber>]>,
}

impl DFAState {
    pub fn new(identity: StateSet, transitions: Box<[Option<StateNumber>]>) -> Self {
        DFAState {
            identity: identity,
            transitions: transitions,
        }
    }
}

/// A deterministic automaton. State 0 is the start state and every state has exactly one
/// transition per alphabet symbol, either to a state or to the implicit stuck state (`None`),
/// which is non-accepting and never left.
#[derive(Clone, Debug)]
pub struct DFA<Input> {
    alphabet: Vec<Input>,
    states: Box<[DFAState]>,
    finals: BitVec,
}

impl<Input> DFA<Input> {
    pub(crate) fn new(alphabet: Vec<Input>, states: Box<[DFAState]>, finals: BitVec) -> Self {
        DFA {
            alphabet: alphabet,
            states: states,
            finals: finals,
        }
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn alphabet(&self) -> &[Input] {
        &self.alphabet
    }

    pub fn states(&self) -> &[DFAState] {
        &self.states
    }

    pub fn identity(&self, state: StateNumber) -> &StateSet {
        &self.states[state].identity
    }

    /// The row of `state`, indexed like the alphabet.
    pub fn transitions(&self, state: StateNumber) -> &[Option<StateNumber>] {
        &self.states[state].transitions
    }

    #[inline]
    pub fn transition(&self, state: StateNumber, symbol: usize) -> Option<StateNumber> {
        self.states[state].transitions[symbol]
    }

    #[inline]
    pub fn is_final(&self, state: StateNumber) -> bool {
        self.finals.get(state).unwrap_or(false)
    }

    /// Accepting states in ascending order.
    pub fn finals(&self) -> impl Iterator<Item = StateNumber> + '_ {
        self.finals
            .iter()
            .enumerate()
            .filter_map(|(st, fin)| if fin { Some(st) } else { None })
    }

    pub fn minimize(&self) -> MinimizedDFA<Input>
        where Input: Clone
    {
        minimize(self)
    }
}

impl<Input: Eq + Hash + Clone> DFA<Input> {
    /// Builds a DFA from a dense transition table, one row per state and one column per symbol.
    /// State `i` gets the identity `{i}`.
    pub fn from_table<A, F>(alphabet: A,
                            rows: Vec<Vec<StateNumber>>,
                            accepting: F)
                            -> Result<Self, ConfigurationError>
        where A: IntoIterator<Item = Input>,
              F: IntoIterator<Item = StateNumber>
    {
        let rows: Vec<Vec<Option<StateNumber>>> = rows
            .into_iter()
            .map(|row| row.into_iter().map(Some).collect())
            .collect();
        Self::from_partial_table(alphabet, rows, accepting)
    }

    /// Like [`from_table`](Self::from_table), `None` entries go to the stuck state.
    pub fn from_partial_table<A, F>(alphabet: A,
                                    rows: Vec<Vec<Option<StateNumber>>>,
                                    accepting: F)
                                    -> Result<Self, ConfigurationError>
        where A: IntoIterator<Item = Input>,
              F: IntoIterator<Item = StateNumber>
    {
        let alphabet: Vec<Input> = alphabet.into_iter().collect();
        for (idx, input) in alphabet.iter().enumerate() {
            if alphabet[..idx].contains(input) {
                return Err(ConfigurationError::DuplicateSymbol { index: idx });
            }
        }
        let state_count = rows.len();
        if state_count == 0 {
            return Err(ConfigurationError::EmptyAutomaton);
        }
        let out_of_range = |state| {
            ConfigurationError::StateOutOfRange {
                state: state,
                state_count: state_count,
            }
        };

        let mut states = Vec::with_capacity(state_count);
        for (num, row) in rows.into_iter().enumerate() {
            if row.len() != alphabet.len() {
                return Err(ConfigurationError::RowWidth {
                    state: num,
                    expected: alphabet.len(),
                    found: row.len(),
                });
            }
            if let Some(to) = row.iter().filter_map(|&to| to).find(|&to| to >= state_count) {
                return Err(out_of_range(to));
            }
            states.push(DFAState::new(Some(num).into_iter().collect(), row.into_boxed_slice()));
        }

        let mut finals = BitVec::from_elem(state_count, false);
        for state in accepting {
            if state >= state_count {
                return Err(out_of_range(state));
            }
            finals.set(state, true);
        }

        Ok(DFA::new(alphabet, states.into_boxed_slice(), finals))
    }

    pub fn apply<I: AsRef<[Input]>>(&self, input: I) -> bool {
        self.accepts(input.as_ref())
    }
}

impl<Input: Eq> Automaton<Input> for DFA<Input> {
    type State = Option<StateNumber>;

    #[inline]
    fn start_state(&self) -> Self::State {
        Some(DFA_START)
    }

    #[inline]
    fn next_state(&self, state: &Self::State, input: &Input) -> Self::State {
        let state = (*state)?;
        let symbol = self.alphabet.iter().position(|s| s == input)?;
        self.transition(state, symbol)
    }

    #[inline]
    fn is_accepting(&self, state: &Self::State) -> bool {
        state.map_or(false, |st| self.is_final(st))
    }
}
