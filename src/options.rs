use crate::error::Error;

const DEFAULT_MAX_DFA_STATES: Option<usize> = None;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// The maximum number of DFA states powerset construction may create before giving up.
    /// `None` lets the construction run to completion, which can take up to `2^n` states for an
    /// NFA with `n` states.
    pub max_dfa_states: Option<usize>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            max_dfa_states: DEFAULT_MAX_DFA_STATES,
        }
    }
}

impl Options {
    pub fn with_max_dfa_states(mut self, limit: usize) -> Self {
        self.max_dfa_states = Some(limit);
        self
    }

    pub fn validate(&self) -> Result<(), Error> {
        match self.max_dfa_states {
            Some(0) => Err(Error::InvalidOptions(
                "max_dfa_states must allow at least the start state".to_string(),
            )),
            _ => Ok(()),
        }
    }
}
