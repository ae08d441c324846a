//! Repeated-addition multiplication and repeated-multiplication powers.

use tmc_codegen::vector::{erase, left, right, symbol_at, write};
use tmc_codegen::{Context, Subroutine, SubroutineBuilder};
use tmc_types::{q, rt, CompileResult, Symbol, Tape};

use super::distinct;
use super::words::{copy, erase_word, sum};

/// `[.., a, b]` on `tape` becomes `[.., a · b]`.
///
/// `b` is moved to `iter` as the loop counter and `a` to `cnst` as the
/// addend. Starting from an empty word, `a` is pushed and summed in once per
/// mark taken off the counter. Both scratch tapes end as they began.
pub fn multiply(ctx: &mut Context, tape: Tape, iter: Tape, cnst: Tape) -> CompileResult<Subroutine> {
    distinct("multiply", &[tape, iter, cnst])?;
    let counter_in = copy(ctx, tape, iter)?;
    let pop_counter = erase_word(tape);
    let addend_in = copy(ctx, tape, cnst)?;
    let pop_addend = erase_word(tape);
    let addend_out = copy(ctx, cnst, tape)?;
    let accumulate = sum(ctx, tape)?;
    let drop_addend = erase_word(cnst);

    let mut sub = SubroutineBuilder::new(
        format!("multiply({}, {}, {})", tape.number(), iter.number(), cnst.number()),
        1,
    );
    sub.expand(ctx, q(0), &counter_in, &[q(1)])?
        .expand(ctx, q(1), &pop_counter, &[q(2)])?
        .expand(ctx, q(2), &addend_in, &[q(3)])?
        .expand(ctx, q(3), &pop_addend, &[q(4)])?
        .any(q(4), right(tape), q(5))
        .any(q(5), left(iter), q(6))
        .if_else(q(6), symbol_at(Symbol::Mark, iter), q(7), q(10))
        .any(q(7), erase(iter), q(8))
        .expand(ctx, q(8), &addend_out, &[q(9)])?
        .expand(ctx, q(9), &accumulate, &[q(5)])?
        .expand(ctx, q(10), &drop_addend, &[rt(0)])?;
    Ok(sub.build())
}

/// `[.., b, e]` on `tape` becomes `[.., b ^ e]`.
///
/// `e` is moved to `iter` and consumed one mark per round; `b` is parked on
/// `cnst`. The accumulator starts at 1 and is multiplied by `b` each round.
pub fn exp(ctx: &mut Context, tape: Tape, iter: Tape, cnst: Tape) -> CompileResult<Subroutine> {
    distinct("exp", &[tape, iter, cnst])?;
    let exponent_in = copy(ctx, tape, iter)?;
    let pop_exponent = erase_word(tape);
    let base_in = copy(ctx, tape, cnst)?;
    let pop_base = erase_word(tape);
    let base_out = copy(ctx, cnst, tape)?;
    let times = multiply(ctx, tape, iter, cnst)?;
    let drop_base = erase_word(cnst);

    let mut sub = SubroutineBuilder::new(
        format!("exp({}, {}, {})", tape.number(), iter.number(), cnst.number()),
        1,
    );
    sub.expand(ctx, q(0), &exponent_in, &[q(1)])?
        .expand(ctx, q(1), &pop_exponent, &[q(2)])?
        .expand(ctx, q(2), &base_in, &[q(3)])?
        .expand(ctx, q(3), &pop_base, &[q(4)])?
        // seed the accumulator with 1
        .any(q(4), right(tape), q(5))
        .any(q(5), write(Symbol::Mark, tape), q(6))
        .any(q(6), right(tape), q(7))
        .any(q(7), left(iter), q(8))
        .if_else(q(8), symbol_at(Symbol::Mark, iter), q(9), q(12))
        .any(q(9), erase(iter), q(10))
        .expand(ctx, q(10), &base_out, &[q(11)])?
        .expand(ctx, q(11), &times, &[q(7)])?
        .expand(ctx, q(12), &drop_base, &[rt(0)])?;
    Ok(sub.build())
}
