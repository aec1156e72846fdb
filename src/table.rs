use std::collections::HashMap;

use crate::nfa::{StateNumber, StateSet};

/// Numbers the sets of NFA states discovered during powerset construction.
///
/// Sets are keyed by value in canonical form, so a set reached along two different paths (or
/// built in a different order) gets the same number.
#[derive(Clone, Debug, Default)]
pub struct StateTable {
    numbers: HashMap<StateSet, StateNumber>,
    identities: Vec<StateSet>,
}

impl StateTable {
    pub fn new() -> Self {
        StateTable::default()
    }

    /// Returns the number of `identity` and whether it was just allocated.
    pub fn lookup_or_insert(&mut self, identity: StateSet) -> (StateNumber, bool) {
        if let Some(&num) = self.numbers.get(&identity) {
            return (num, false);
        }
        let num = self.identities.len();
        self.numbers.insert(identity.clone(), num);
        self.identities.push(identity);
        (num, true)
    }

    pub fn get(&self, identity: &StateSet) -> Option<StateNumber> {
        self.numbers.get(identity).cloned()
    }

    /// Panics if `num` was never handed out.
    pub fn identity(&self, num: StateNumber) -> &StateSet {
        &self.identities[num]
    }

    pub fn len(&self) -> usize {
        self.identities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.identities.is_empty()
    }

    /// The identities by number.
    pub fn into_identities(self) -> Vec<StateSet> {
        self.identities
    }
}
