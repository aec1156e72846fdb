use std::collections::BTreeSet;
use std::collections::HashMap;
use std::collections::VecDeque;
use std::hash::Hash;

use bit_set::BitSet;
use bit_vec::BitVec;

use crate::automaton::{Automaton, AUTO_START};
use crate::dfa::{DFAState, DFA};
use crate::error::{ConfigurationError, Error};
use crate::table::StateTable;

pub type StateNumber = usize;
/// A set of NFA states in canonical (sorted, duplicate free) form.
pub type StateSet = BTreeSet<StateNumber>;

/// A transition label: a symbol of the alphabet or the silent epsilon move.
#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum Symbol<Input> {
    Epsilon,
    Input(Input),
}

#[derive(Clone, Debug)]
struct NFAState {
    epsilons: StateSet,
    // alphabet index -> targets
    transitions: Box<[StateSet]>,
}

impl NFAState {
    fn new(symbols: usize) -> Self {
        NFAState {
            epsilons: StateSet::new(),
            transitions: vec![StateSet::new(); symbols].into_boxed_slice(),
        }
    }
}

/// A validated nondeterministic finite automaton with epsilon transitions.
///
/// Values can only be obtained through [`NFABuilder::build`], so every state number stored in
/// here is known to be in range.
#[derive(Clone, Debug)]
pub struct NFA<Input> {
    alphabet: Vec<Input>,
    symbol_index: HashMap<Input, usize>,
    states: Vec<NFAState>,
    initial: StateNumber,
    finals: BitVec,
}

impl<Input: Eq + Hash + Clone> NFA<Input> {
    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    pub fn alphabet(&self) -> &[Input] {
        &self.alphabet
    }

    pub fn initial(&self) -> StateNumber {
        self.initial
    }

    pub fn is_final(&self, state: StateNumber) -> bool {
        self.finals.get(state).unwrap_or(false)
    }

    pub fn finals(&self) -> impl Iterator<Item = StateNumber> + '_ {
        self.finals
            .iter()
            .enumerate()
            .filter_map(|(st, fin)| if fin { Some(st) } else { None })
    }

    /// The targets of `state` on `symbol`. Empty when there is no such transition.
    pub fn targets(&self, state: StateNumber, symbol: &Symbol<Input>) -> Option<&StateSet> {
        let st = self.states.get(state)?;
        match *symbol {
            Symbol::Epsilon => Some(&st.epsilons),
            Symbol::Input(ref input) => {
                let &idx = self.symbol_index.get(input)?;
                Some(&st.transitions[idx])
            }
        }
    }

    /// The smallest set containing `seed` that is closed under epsilon transitions.
    pub fn epsilon_closure<I>(&self, seed: I) -> Result<StateSet, ConfigurationError>
        where I: IntoIterator<Item = StateNumber>
    {
        let seed: Vec<StateNumber> = seed.into_iter().collect();
        if let Some(&state) = seed.iter().find(|&&st| st >= self.states.len()) {
            return Err(ConfigurationError::StateOutOfRange {
                state: state,
                state_count: self.states.len(),
            });
        }
        Ok(self.closure(seed))
    }

    // Worklist traversal, `seed` must be in range.
    fn closure<I>(&self, seed: I) -> StateSet
        where I: IntoIterator<Item = StateNumber>
    {
        let mut visited = BitSet::with_capacity(self.states.len());
        let mut worklist = Vec::new();
        for st in seed {
            if visited.insert(st) {
                worklist.push(st);
            }
        }
        while let Some(st) = worklist.pop() {
            for &next in &self.states[st].epsilons {
                if visited.insert(next) {
                    worklist.push(next);
                }
            }
        }
        visited.iter().collect()
    }

    /// Union of the `symbol` successors (by alphabet index) of every state in `states`.
    fn _next_states(&self, states: &StateSet, symbol: usize) -> StateSet {
        let mut nxt_states = StateSet::new();
        for &st in states {
            nxt_states.extend(&self.states[st].transitions[symbol]);
        }
        nxt_states
    }

    fn any_final(&self, states: &StateSet) -> bool {
        states.iter().any(|&st| self.is_final(st))
    }

    /// Simulates the NFA on `input`, returns whether it ends in an accepting state.
    pub fn apply<I: AsRef<[Input]>>(&self, input: I) -> bool {
        self.accepts(input.as_ref())
    }

    /// Subset construction. DFA state 0 is the epsilon closure of the initial state.
    ///
    /// Moving to the empty set of NFA states is recorded as `None` in the DFA, no state is created
    /// for it.
    pub fn powerset_construction(&self) -> DFA<Input> {
        match self._powerset_construction(None) {
            Ok(dfa) => dfa,
            Err(_) => unreachable!("unbounded powerset construction cannot fail"),
        }
    }

    /// Like [`powerset_construction`](Self::powerset_construction), but gives up once the DFA
    /// would need more than `limit` states.
    pub fn powerset_construction_bounded(&self, limit: usize) -> Result<DFA<Input>, Error> {
        self._powerset_construction(Some(limit))
    }

    fn _powerset_construction(&self, limit: Option<usize>) -> Result<DFA<Input>, Error> {
        let symbols = self.alphabet.len();

        let mut table = StateTable::new();
        let start = self.closure(Some(self.initial));
        log::debug!("Initial DFA state is the closure {:?}", start);
        let (start_num, _) = table.lookup_or_insert(start);
        debug_assert_eq!(start_num, AUTO_START);
        if limit == Some(0) {
            return Err(Error::StateLimitExceeded { limit: 0 });
        }

        let mut transitions: Vec<Box<[Option<StateNumber>]>> = Vec::new();
        let mut worklist = VecDeque::new();
        worklist.push_back(start_num);

        while let Some(cur_num) = worklist.pop_front() {
            let mut row = Vec::with_capacity(symbols);
            for symbol in 0..symbols {
                let nxt_states = {
                    let cur_states = table.identity(cur_num);
                    self.closure(self._next_states(cur_states, symbol))
                };
                // No successor at all, the stuck state is left implicit.
                if nxt_states.is_empty() {
                    row.push(None);
                    continue;
                }
                let (nxt_num, is_new) = table.lookup_or_insert(nxt_states);
                if is_new {
                    if let Some(limit) = limit {
                        if table.len() > limit {
                            log::debug!("Powerset construction stopped at {} states", limit);
                            return Err(Error::StateLimitExceeded { limit: limit });
                        }
                    }
                    log::trace!("New DFA state {}: {:?}", nxt_num, table.identity(nxt_num));
                    worklist.push_back(nxt_num);
                }
                row.push(Some(nxt_num));
            }
            // Breadth first with in-order numbering, rows are completed in index order.
            debug_assert_eq!(transitions.len(), cur_num);
            transitions.push(row.into_boxed_slice());
        }

        let identities = table.into_identities();
        let mut finals = BitVec::from_elem(identities.len(), false);
        for (num, identity) in identities.iter().enumerate() {
            if self.any_final(identity) {
                finals.set(num, true);
            }
        }

        let states: Vec<DFAState> = identities
            .into_iter()
            .zip(transitions)
            .map(|(identity, transitions)| DFAState::new(identity, transitions))
            .collect();

        log::debug!("Powerset construction produced {} DFA states", states.len());

        Ok(DFA::new(self.alphabet.clone(), states.into_boxed_slice(), finals))
    }
}

impl<Input: Eq + Hash + Clone> Automaton<Input> for NFA<Input> {
    type State = StateSet;

    #[inline]
    fn start_state(&self) -> Self::State {
        self.closure(Some(self.initial))
    }

    #[inline]
    fn next_state(&self, states: &Self::State, symbol: &Input) -> Self::State {
        match self.symbol_index.get(symbol) {
            Some(&idx) => self.closure(self._next_states(states, idx)),
            None => StateSet::new(),
        }
    }

    #[inline]
    fn is_accepting(&self, states: &Self::State) -> bool {
        self.any_final(states)
    }
}

/// Collects the parts of an NFA and validates them into an [`NFA`].
///
/// Nothing is checked until [`build`](Self::build), so the builder accepts whatever an input
/// format hands it.
#[derive(Clone, Debug)]
pub struct NFABuilder<Input> {
    state_count: usize,
    alphabet: Vec<Input>,
    initial: StateNumber,
    edges: Vec<(StateNumber, Symbol<Input>, StateNumber)>,
    finals: Vec<StateNumber>,
}

impl<Input: Eq + Hash + Clone> NFABuilder<Input> {
    /// The initial state defaults to 0.
    pub fn new<A: IntoIterator<Item = Input>>(state_count: usize, alphabet: A) -> Self {
        NFABuilder {
            state_count: state_count,
            alphabet: alphabet.into_iter().collect(),
            initial: AUTO_START,
            edges: Vec::new(),
            finals: Vec::new(),
        }
    }

    pub fn initial(&mut self, state: StateNumber) -> &mut Self {
        self.initial = state;
        self
    }

    pub fn edge(&mut self, from: StateNumber, on: Symbol<Input>, to: StateNumber) -> &mut Self {
        self.edges.push((from, on, to));
        self
    }

    pub fn epsilon(&mut self, from: StateNumber, to: StateNumber) -> &mut Self {
        self.edge(from, Symbol::Epsilon, to)
    }

    pub fn edges<T>(&mut self, from: StateNumber, on: Symbol<Input>, to: T) -> &mut Self
        where T: IntoIterator<Item = StateNumber>
    {
        for to in to {
            self.edges.push((from, on.clone(), to));
        }
        self
    }

    pub fn final_state(&mut self, state: StateNumber) -> &mut Self {
        self.finals.push(state);
        self
    }

    pub fn build(&self) -> Result<NFA<Input>, ConfigurationError> {
        if self.state_count == 0 {
            return Err(ConfigurationError::EmptyAutomaton);
        }
        let in_range = |state: StateNumber| {
            if state < self.state_count {
                Ok(state)
            } else {
                Err(ConfigurationError::StateOutOfRange {
                    state: state,
                    state_count: self.state_count,
                })
            }
        };

        let mut symbol_index = HashMap::with_capacity(self.alphabet.len());
        for (idx, input) in self.alphabet.iter().enumerate() {
            if symbol_index.insert(input.clone(), idx).is_some() {
                return Err(ConfigurationError::DuplicateSymbol { index: idx });
            }
        }

        let initial = in_range(self.initial)?;

        let mut states = vec![NFAState::new(self.alphabet.len()); self.state_count];
        for &(from, ref on, to) in &self.edges {
            let from = in_range(from)?;
            let to = in_range(to)?;
            match *on {
                Symbol::Epsilon => {
                    states[from].epsilons.insert(to);
                }
                Symbol::Input(ref input) => {
                    let &idx = symbol_index
                        .get(input)
                        .ok_or(ConfigurationError::UnknownSymbol)?;
                    states[from].transitions[idx].insert(to);
                }
            }
        }

        let mut finals = BitVec::from_elem(self.state_count, false);
        for &state in &self.finals {
            finals.set(in_range(state)?, true);
        }

        Ok(NFA {
            alphabet: self.alphabet.clone(),
            symbol_index: symbol_index,
            states: states,
            initial: initial,
            finals: finals,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(states: &[StateNumber]) -> StateSet {
        states.iter().cloned().collect()
    }

    // 0 -e-> 1 -e-> 2 -e-> 0, 2 -a-> 3
    fn epsilon_cycle() -> NFA<char> {
        NFABuilder::new(4, vec!['a'])
            .epsilon(0, 1)
            .epsilon(1, 2)
            .epsilon(2, 0)
            .edge(2, Symbol::Input('a'), 3)
            .final_state(3)
            .build()
            .unwrap()
    }

    #[test]
    fn closure_follows_cycles() {
        let nfa = epsilon_cycle();
        assert_eq!(nfa.epsilon_closure(vec![1]).unwrap(), set(&[0, 1, 2]));
        assert_eq!(nfa.epsilon_closure(vec![3]).unwrap(), set(&[3]));
    }

    #[test]
    fn closure_of_nothing_is_empty() {
        let nfa = epsilon_cycle();
        assert!(nfa.epsilon_closure(vec![]).unwrap().is_empty());
    }

    #[test]
    fn closure_ignores_seed_order_and_duplicates() {
        let nfa = epsilon_cycle();
        assert_eq!(
            nfa.epsilon_closure(vec![3, 2, 3]).unwrap(),
            nfa.epsilon_closure(vec![2, 3]).unwrap()
        );
    }

    #[test]
    fn closure_rejects_unknown_state() {
        let nfa = epsilon_cycle();
        assert_eq!(
            nfa.epsilon_closure(vec![0, 4]),
            Err(ConfigurationError::StateOutOfRange { state: 4, state_count: 4 })
        );
    }

    #[test]
    fn builder_rejects_out_of_range_edge() {
        let err = NFABuilder::new(2, vec!['a'])
            .edge(0, Symbol::Input('a'), 2)
            .build()
            .unwrap_err();
        assert_eq!(err, ConfigurationError::StateOutOfRange { state: 2, state_count: 2 });
    }

    #[test]
    fn builder_rejects_unknown_symbol() {
        let err = NFABuilder::new(2, vec!['a'])
            .edge(0, Symbol::Input('b'), 1)
            .build()
            .unwrap_err();
        assert_eq!(err, ConfigurationError::UnknownSymbol);
    }

    #[test]
    fn builder_rejects_duplicate_symbol() {
        let err = NFABuilder::new(1, vec!['a', 'b', 'a']).build().unwrap_err();
        assert_eq!(err, ConfigurationError::DuplicateSymbol { index: 2 });
    }

    #[test]
    fn builder_rejects_bad_initial_and_final() {
        assert!(NFABuilder::new(1, vec!['a']).initial(1).build().is_err());
        assert!(NFABuilder::new(1, vec!['a']).final_state(3).build().is_err());
        assert_eq!(
            NFABuilder::<char>::new(0, vec![]).build().unwrap_err(),
            ConfigurationError::EmptyAutomaton
        );
    }

    #[test]
    fn targets_of_missing_transition_are_empty() {
        let nfa = epsilon_cycle();
        assert!(nfa.targets(0, &Symbol::Input('a')).unwrap().is_empty());
        assert_eq!(nfa.targets(2, &Symbol::Input('a')), Some(&set(&[3])));
        assert_eq!(nfa.targets(0, &Symbol::Input('z')), None);
    }

    #[test]
    fn powerset_construction_of_epsilon_cycle() {
        let dfa = epsilon_cycle().powerset_construction();
        assert_eq!(dfa.len(), 2);
        assert_eq!(dfa.identity(0), &set(&[0, 1, 2]));
        assert_eq!(dfa.identity(1), &set(&[3]));
        assert_eq!(dfa.transitions(0), &[Some(1)][..]);
        assert_eq!(dfa.transitions(1), &[None][..]);
        assert_eq!(dfa.finals().collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn bounded_construction_fails_without_partial_result() {
        let nfa = epsilon_cycle();
        match nfa.powerset_construction_bounded(1) {
            Err(Error::StateLimitExceeded { limit }) => assert_eq!(limit, 1),
            other => panic!("unexpected {:?}", other.map(|dfa| dfa.len())),
        }
        assert_eq!(nfa.powerset_construction_bounded(2).unwrap().len(), 2);
    }

    #[test]
    fn apply_simulates() {
        let nfa = epsilon_cycle();
        assert!(nfa.apply(['a']));
        assert!(!nfa.apply(['a', 'a']));
        assert!(!nfa.apply(Vec::<char>::new()));
        assert!(!nfa.apply(['z']));
    }
}
