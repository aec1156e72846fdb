use std::fmt::Debug;

/// Every automaton in this crate starts in state 0.
pub const AUTO_START: usize = 0;

/// Step-by-step simulation of an automaton over a word.
///
/// Deterministic automata use `Option<StateNumber>` as their state, where `None` means the input
/// left the alphabet. The NFA uses the (epsilon closed) set of states it is in.
pub trait Automaton<Input> {
    type State: Debug;

    fn start_state(&self) -> Self::State;

    fn next_state(&self, state: &Self::State, input: &Input) -> Self::State;

    fn is_accepting(&self, state: &Self::State) -> bool;

    /// Runs the automaton over the whole word and reports whether it ends in an accepting state.
    fn accepts(&self, input: &[Input]) -> bool
        where Self: Sized
    {
        let state = input
            .iter()
            .fold(self.start_state(), |state, symbol| self.next_state(&state, symbol));
        self.is_accepting(&state)
    }

    fn trace<'i, 'a>(&'a self, input: &'i [Input]) -> Trace<'i, 'a, Input, Self>
        where Self: Sized
    {
        Trace {
            aut: self,
            input: input,
            offset: 0,
            state: Some(self.start_state()),
        }
    }
}

/// An iterator over the states visited while reading a word.
///
/// The start state is yielded first, then one state per input symbol.
#[derive(Debug)]
pub struct Trace<'i, 'a, Input: 'i, A: 'a + Automaton<Input>> {
    aut: &'a A,
    input: &'i [Input],
    offset: usize,
    state: Option<A::State>,
}

impl<'i, 'a, Input, A: Automaton<Input>> Iterator for Trace<'i, 'a, Input, A> {
    type Item = A::State;

    fn next(&mut self) -> Option<Self::Item> {
        let state = self.state.take()?;
        if self.offset < self.input.len() {
            self.state = Some(self.aut.next_state(&state, &self.input[self.offset]));
            self.offset += 1;
        }
        Some(state)
    }
}
