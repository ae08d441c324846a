//! Exhaustive enumeration of read vectors and wildcard-aware matching.
//!
//! The target machine has no wildcard conditions, so every symbolic rule is
//! expanded into one concrete rule per possible read vector.

use tmc_types::{Pattern, Read, Symbol, TAPE_COUNT};

/// All `2^n` vectors of length `n` over {Blank, Mark}, in lexicographic
/// order with Blank before Mark.
pub fn all_combinations_n(n: usize) -> Vec<Vec<Symbol>> {
    if n == 0 {
        return vec![Vec::new()];
    }
    let tails = all_combinations_n(n - 1);
    Symbol::ALL
        .iter()
        .flat_map(|&head| {
            tails.iter().map(move |tail| {
                let mut v = Vec::with_capacity(n);
                v.push(head);
                v.extend_from_slice(tail);
                v
            })
        })
        .collect()
}

/// Every read vector of the machine, in the same order as [`all_combinations_n`].
pub fn all_combinations() -> Vec<Read> {
    (0..1usize << TAPE_COUNT)
        .map(|bits| {
            std::array::from_fn(|slot| {
                if (bits >> (TAPE_COUNT - 1 - slot)) & 1 == 1 {
                    Symbol::Mark
                } else {
                    Symbol::Blank
                }
            })
        })
        .collect()
}

/// True if every non-wildcard slot of `pattern` equals the slot read.
pub fn matches(read: &Read, pattern: &Pattern) -> bool {
    read.iter()
        .zip(&pattern.0)
        .all(|(symbol, slot)| slot.map_or(true, |want| want == *symbol))
}

/// Index of the first pattern (in declaration order) that matches `read`.
pub fn first_match(read: &Read, patterns: &[Pattern]) -> Option<usize> {
    patterns.iter().position(|p| matches(read, p))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tmc_types::Tape;

    use Symbol::{Blank, Mark};

    #[test]
    fn test_all_combinations_n_counts() {
        assert_eq!(all_combinations_n(0), vec![Vec::<Symbol>::new()]);
        assert_eq!(all_combinations_n(1), vec![vec![Blank], vec![Mark]]);
        assert_eq!(all_combinations_n(4).len(), 16);
    }

    #[test]
    fn test_all_combinations_agrees_with_n() {
        let fixed: Vec<Vec<Symbol>> = all_combinations().iter().map(|r| r.to_vec()).collect();
        assert_eq!(fixed, all_combinations_n(TAPE_COUNT));
        assert_eq!(all_combinations()[0], [Blank; TAPE_COUNT]);
        assert_eq!(all_combinations()[1], [Blank, Blank, Mark]);
    }

    #[test]
    fn test_matches_wildcards() {
        let t2 = Tape::new(2).unwrap();
        let p = Pattern::ANY.with(t2, Mark);
        assert!(matches(&[Blank, Mark, Blank], &p));
        assert!(matches(&[Mark, Mark, Mark], &p));
        assert!(!matches(&[Mark, Blank, Mark], &p));
        assert!(all_combinations().iter().all(|r| matches(r, &Pattern::ANY)));
    }

    #[test]
    fn test_first_match_priority() {
        let t1 = Tape::new(1).unwrap();
        let t2 = Tape::new(2).unwrap();
        let patterns = [
            Pattern::ANY.with(t1, Mark).with(t2, Mark),
            Pattern::ANY.with(t1, Mark),
        ];
        assert_eq!(first_match(&[Mark, Mark, Blank], &patterns), Some(0));
        assert_eq!(first_match(&[Mark, Blank, Blank], &patterns), Some(1));
        assert_eq!(first_match(&[Blank, Mark, Blank], &patterns), None);
    }
}
