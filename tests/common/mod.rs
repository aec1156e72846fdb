#![allow(dead_code)]

use powerset::{StateNumber, DFA};

pub const ALPHABET: [char; 2] = ['a', 'b'];

pub fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Every word over `alphabet` of length at most `max_len`, shortest first.
pub fn words(alphabet: &[char], max_len: usize) -> Vec<Vec<char>> {
    let mut all = vec![Vec::new()];
    let mut last = vec![Vec::new()];
    for _ in 0..max_len {
        let mut next = Vec::new();
        for word in &last {
            for &c in alphabet {
                let mut longer: Vec<char> = word.clone();
                longer.push(c);
                next.push(longer);
            }
        }
        all.extend(next.iter().cloned());
        last = next;
    }
    all
}

/// Runs `dfa` on `word` starting in `state` instead of the start state.
pub fn accepts_from(dfa: &DFA<char>, state: StateNumber, word: &[char]) -> bool {
    let mut cur = Some(state);
    for c in word {
        let symbol = dfa.alphabet().iter().position(|s| s == c);
        cur = match (cur, symbol) {
            (Some(st), Some(symbol)) => dfa.transition(st, symbol),
            _ => None,
        };
    }
    cur.map_or(false, |st| dfa.is_final(st))
}
