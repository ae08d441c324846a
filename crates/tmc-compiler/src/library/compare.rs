use serde::{Deserialize, Serialize};

use tmc_codegen::vector::{cond, erase, left, right};
use tmc_codegen::{Context, Subroutine, SubroutineBuilder};
use tmc_types::{q, rt, CompileResult, State, Symbol, Tape};

use super::words::{copy, erase_word};

/// The three ways out of [`cmp`], in return-placeholder order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Comparison {
    /// Lower word shorter than the upper one: `rt0`.
    Less,
    /// Same length: `rt1`.
    Equal,
    /// Lower word longer than the upper one: `rt2`.
    Greater,
}

impl Comparison {
    pub const ALL: [Comparison; 3] = [Comparison::Less, Comparison::Equal, Comparison::Greater];

    /// Position of this outcome among `cmp`'s return placeholders.
    pub fn index(self) -> usize {
        match self {
            Self::Less => 0,
            Self::Equal => 1,
            Self::Greater => 2,
        }
    }

    /// Continuation list for `expand`, in placeholder order.
    pub fn continuations(less: State, equal: State, greater: State) -> [State; 3] {
        [less, equal, greater]
    }
}

/// Three-way compare of the two top words of `tape`, `[.., a, b]`.
///
/// `b` is moved to `tmp`, then both words are erased mark by mark from the
/// right in lock-step. Whichever runs out first decides the outcome. Both
/// words are gone on every exit.
pub fn cmp(ctx: &mut Context, tape: Tape, tmp: Tape) -> CompileResult<Subroutine> {
    use Symbol::{Blank, Mark};

    let both = [tape, tmp];
    let arms = [
        (cond(&[Mark, Mark], &both)?, q(5)),
        (cond(&[Blank, Mark], &both)?, q(6)),
        (cond(&[Mark, Blank], &both)?, q(7)),
    ];
    let upper_out = copy(ctx, tape, tmp)?;
    let pop_upper = erase_word(tape);
    let rest_of_tmp = erase_word(tmp);
    let rest_of_tape = erase_word(tape);

    let mut sub = SubroutineBuilder::new(format!("cmp({}, {})", tape.number(), tmp.number()), 3);
    sub.expand(ctx, q(0), &upper_out, &[q(1)])?
        .expand(ctx, q(1), &pop_upper, &[q(2)])?
        .any(q(2), left(tape), q(3))
        .any(q(3), left(tmp), q(4))
        .multiway(q(4), &arms, rt(Comparison::Equal.index()))?
        .any(q(5), erase(tape), q(8))
        .any(q(8), erase(tmp), q(2))
        // `tape` ran out first
        .any(q(6), right(tmp), q(9))
        .expand(ctx, q(9), &rest_of_tmp, &[rt(Comparison::Less.index())])?
        // `tmp` ran out first
        .any(q(7), right(tape), q(10))
        .expand(ctx, q(10), &rest_of_tape, &[rt(Comparison::Greater.index())])?;
    Ok(sub.build())
}
