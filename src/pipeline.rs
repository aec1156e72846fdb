use std::hash::Hash;

use crate::dfa::DFA;
use crate::error::Error;
use crate::minimize::MinimizedDFA;
use crate::nfa::NFA;
use crate::options::Options;

/// Both automata produced from one NFA.
#[derive(Clone, Debug)]
pub struct Conversion<Input> {
    /// The DFA from powerset construction, states numbered in discovery order.
    pub dfa: DFA<Input>,
    pub minimized: MinimizedDFA<Input>,
}

/// Runs powerset construction and then minimization on `nfa`.
pub fn convert<Input>(nfa: &NFA<Input>, options: &Options) -> Result<Conversion<Input>, Error>
    where Input: Eq + Hash + Clone
{
    options.validate()?;

    let dfa = match options.max_dfa_states {
        Some(limit) => nfa.powerset_construction_bounded(limit)?,
        None => nfa.powerset_construction(),
    };
    let minimized = dfa.minimize();

    log::info!("Converted NFA with {} states into a DFA with {} states, {} after minimization",
               nfa.state_count(),
               dfa.len(),
               minimized.class_count());

    Ok(Conversion {
        dfa: dfa,
        minimized: minimized,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nfa::{NFABuilder, Symbol};

    fn ends_in_a() -> NFA<char> {
        NFABuilder::new(2, vec!['a', 'b'])
            .edges(0, Symbol::Input('a'), vec![0, 1])
            .edge(0, Symbol::Input('b'), 0)
            .final_state(1)
            .build()
            .unwrap()
    }

    #[test]
    fn convert_produces_both_automata() {
        let conversion = convert(&ends_in_a(), &Options::default()).unwrap();
        assert_eq!(conversion.dfa.len(), 2);
        assert_eq!(conversion.minimized.class_count(), 2);
        assert!(conversion.minimized.apply(['b', 'a']));
        assert!(!conversion.minimized.apply(['a', 'b']));
    }

    #[test]
    fn convert_honours_state_limit() {
        let options = Options::default().with_max_dfa_states(1);
        match convert(&ends_in_a(), &options) {
            Err(Error::StateLimitExceeded { limit: 1 }) => {}
            other => panic!("unexpected {:?}", other.map(|c| c.dfa.len())),
        }
    }

    #[test]
    fn convert_rejects_zero_limit() {
        let options = Options::default().with_max_dfa_states(0);
        assert!(matches!(convert(&ends_in_a(), &options), Err(Error::InvalidOptions(_))));
    }
}
