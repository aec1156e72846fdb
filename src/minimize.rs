use std::hash::Hash;

use bit_vec::BitVec;

use crate::automaton::{Automaton, AUTO_START};
use crate::dfa::DFA;
use crate::nfa::StateNumber;

const UNASSIGNED: usize = ::std::usize::MAX;

/// Table of unordered state pairs `{i, j}` with `i != j`, marking the pairs known to be
/// distinguishable.
struct PairTable {
    marks: BitVec,
}

impl PairTable {
    fn new(states: usize) -> Self {
        PairTable {
            marks: BitVec::from_elem(states * states.saturating_sub(1) / 2, false),
        }
    }

    #[inline]
    fn index(i: StateNumber, j: StateNumber) -> usize {
        let (lo, hi) = if i < j { (i, j) } else { (j, i) };
        hi * (hi - 1) / 2 + lo
    }

    /// A state is never distinguishable from itself.
    #[inline]
    fn is_marked(&self, i: StateNumber, j: StateNumber) -> bool {
        i != j && self.marks.get(Self::index(i, j)).unwrap_or(false)
    }

    #[inline]
    fn mark(&mut self, i: StateNumber, j: StateNumber) {
        self.marks.set(Self::index(i, j), true);
    }
}

/// The result of minimizing a [`DFA`]: the equivalence classes of its states and the automaton
/// over those classes.
///
/// Classes are numbered by their lowest member, so class 0 contains the start state and a DFA
/// without equivalent states maps every state to its own index.
#[derive(Clone, Debug)]
pub struct MinimizedDFA<Input> {
    alphabet: Vec<Input>,
    // original state -> class
    class_of: Box<[usize]>,
    // class -> lowest original member
    representatives: Box<[StateNumber]>,
    // class -> alphabet index -> class, `None` is the stuck state
    transitions: Box<[Box<[Option<usize>]>]>,
    finals: BitVec,
}

impl<Input> MinimizedDFA<Input> {
    pub fn class_count(&self) -> usize {
        self.transitions.len()
    }

    pub fn alphabet(&self) -> &[Input] {
        &self.alphabet
    }

    pub fn class_of(&self, state: StateNumber) -> usize {
        self.class_of[state]
    }

    /// Original state -> class, indexed by original state.
    pub fn class_assignment(&self) -> &[usize] {
        &self.class_of
    }

    pub fn representative(&self, class: usize) -> StateNumber {
        self.representatives[class]
    }

    pub fn transitions(&self, class: usize) -> &[Option<usize>] {
        &self.transitions[class]
    }

    #[inline]
    pub fn transition(&self, class: usize, symbol: usize) -> Option<usize> {
        self.transitions[class][symbol]
    }

    #[inline]
    pub fn is_final(&self, class: usize) -> bool {
        self.finals.get(class).unwrap_or(false)
    }

    pub fn accepting_classes(&self) -> impl Iterator<Item = usize> + '_ {
        self.finals
            .iter()
            .enumerate()
            .filter_map(|(cl, fin)| if fin { Some(cl) } else { None })
    }
}

impl<Input: Eq + Hash + Clone> MinimizedDFA<Input> {
    pub fn apply<I: AsRef<[Input]>>(&self, input: I) -> bool {
        self.accepts(input.as_ref())
    }
}

impl<Input: Eq> Automaton<Input> for MinimizedDFA<Input> {
    type State = Option<usize>;

    #[inline]
    fn start_state(&self) -> Self::State {
        Some(AUTO_START)
    }

    #[inline]
    fn next_state(&self, class: &Self::State, input: &Input) -> Self::State {
        let class = (*class)?;
        let symbol = self.alphabet.iter().position(|s| s == input)?;
        self.transition(class, symbol)
    }

    #[inline]
    fn is_accepting(&self, class: &Self::State) -> bool {
        class.map_or(false, |cl| self.is_final(cl))
    }
}

/// Table-filling minimization.
///
/// Expects every state of `dfa` to be reachable from the start state, which holds for anything
/// produced by powerset construction. Unreachable states are not removed.
///
/// The stuck state takes part in the refinement as an extra state numbered `dfa.len()`. States
/// equivalent to it form an ordinary class, otherwise it stays implicit in the result as well.
pub fn minimize<Input: Clone>(dfa: &DFA<Input>) -> MinimizedDFA<Input> {
    let states = dfa.len();
    let symbols = dfa.alphabet().len();
    let stuck = states;

    let is_final = |st: StateNumber| st != stuck && dfa.is_final(st);
    let target = |st: StateNumber, symbol: usize| {
        if st == stuck {
            stuck
        } else {
            dfa.transition(st, symbol).unwrap_or(stuck)
        }
    };

    let mut distinct = PairTable::new(states + 1);
    for j in 1..(states + 1) {
        for i in 0..j {
            if is_final(i) != is_final(j) {
                distinct.mark(i, j);
            }
        }
    }

    // Refine until a full pass marks nothing new. Marks only ever get added, so this takes at
    // most one pass per pair.
    let mut passes = 0;
    loop {
        passes += 1;
        let mut changed = false;
        for j in 1..(states + 1) {
            for i in 0..j {
                if distinct.is_marked(i, j) {
                    continue;
                }
                let split = (0..symbols).any(|a| distinct.is_marked(target(i, a), target(j, a)));
                if split {
                    distinct.mark(i, j);
                    changed = true;
                }
            }
        }
        log::trace!("Refinement pass {} changed: {}", passes, changed);
        if !changed {
            break;
        }
    }

    // Classes are only opened at real states, the stuck state can join one but not start one.
    let mut class_of = vec![UNASSIGNED; states + 1];
    let mut representatives = Vec::new();
    for i in 0..states {
        if class_of[i] != UNASSIGNED {
            continue;
        }
        let class = representatives.len();
        representatives.push(i);
        class_of[i] = class;
        for j in (i + 1)..(states + 1) {
            if class_of[j] == UNASSIGNED && !distinct.is_marked(i, j) {
                class_of[j] = class;
            }
        }
    }
    let stuck_class = match class_of.pop() {
        Some(UNASSIGNED) | None => None,
        Some(class) => Some(class),
    };

    let mut finals = BitVec::from_elem(representatives.len(), false);
    let transitions: Vec<Box<[Option<usize>]>> = representatives
        .iter()
        .enumerate()
        .map(|(class, &rep)| {
            finals.set(class, dfa.is_final(rep));
            dfa.transitions(rep)
                .iter()
                .map(|&to| to.map_or(stuck_class, |to| Some(class_of[to])))
                .collect::<Vec<_>>()
                .into_boxed_slice()
        })
        .collect();

    log::debug!("Minimized {} DFA states into {} classes after {} passes",
                states,
                representatives.len(),
                passes);

    MinimizedDFA {
        alphabet: dfa.alphabet().to_vec(),
        class_of: class_of.into_boxed_slice(),
        representatives: representatives.into_boxed_slice(),
        transitions: transitions.into_boxed_slice(),
        finals: finals,
    }
}
