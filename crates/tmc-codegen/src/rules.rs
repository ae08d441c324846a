//! Rule-builder primitives.
//!
//! Each primitive emits one rule per read vector for its source state, so a
//! state built by a single primitive call is total by construction.

use tmc_types::{Action, CompileError, CompileResult, Pattern, Rule, State};

use crate::enumerate::{all_combinations, first_match, matches};

/// `any`: apply `intent` whatever is under the heads, then go to `to`.
pub fn unconditional(from: &State, intent: &Action, to: &State) -> Vec<Rule> {
    all_combinations()
        .into_iter()
        .map(|read| Rule {
            from: from.clone(),
            read,
            to: to.clone(),
            step: intent.resolve(&read),
        })
        .collect()
}

/// `if_else`: pure test, go to `to_true` if `pattern` matches, else `to_false`.
pub fn branch2(from: &State, pattern: &Pattern, to_true: &State, to_false: &State) -> Vec<Rule> {
    all_combinations()
        .into_iter()
        .map(|read| Rule {
            from: from.clone(),
            read,
            to: if matches(&read, pattern) {
                to_true.clone()
            } else {
                to_false.clone()
            },
            step: Action::KEEP.resolve(&read),
        })
        .collect()
}

/// `multiway`: pure test dispatching on the first matching arm, in
/// declaration order, falling through to `default`.
pub fn branch_n(
    from: &State,
    arms: &[(Pattern, State)],
    default: &State,
) -> CompileResult<Vec<Rule>> {
    if arms.is_empty() {
        return Err(CompileError::IllFormedBranch {
            state: from.to_string(),
        });
    }

    let patterns: Vec<Pattern> = arms.iter().map(|(p, _)| *p).collect();
    Ok(all_combinations()
        .into_iter()
        .map(|read| {
            let to = match first_match(&read, &patterns) {
                Some(i) => arms[i].1.clone(),
                None => default.clone(),
            };
            Rule {
                from: from.clone(),
                read,
                to,
                step: Action::KEEP.resolve(&read),
            }
        })
        .collect())
}
