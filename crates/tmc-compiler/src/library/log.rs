//! Integer logarithm by exponent search.

use tmc_codegen::vector::{erase, left, right, write};
use tmc_codegen::{Context, Subroutine, SubroutineBuilder};
use tmc_types::{q, rt, CompileResult, Symbol, Tape};

use super::arith::exp;
use super::compare::{cmp, Comparison};
use super::distinct;
use super::navigation::{next, previous};
use super::words::{copy, erase_word, literal};

/// Label where the exponent search starts, once `cnst` holds `[v, b]`.
const SEARCH: u32 = 10;

/// floor(log2 v) for the value `v` on top of `tape`.
///
/// On exit `iter` holds the result, `tape` and `cnst` are blank. For `v = 0`
/// the result is 0.
pub fn log2(ctx: &mut Context, tape: Tape, iter: Tape, cnst: Tape) -> CompileResult<Subroutine> {
    distinct("log2", &[tape, iter, cnst])?;
    let value_out = copy(ctx, tape, cnst)?;
    let pop_value = erase_word(tape);
    let base = literal(cnst, 2);

    let mut sub = SubroutineBuilder::new(
        format!("log2({}, {}, {})", tape.number(), iter.number(), cnst.number()),
        1,
    );
    sub.expand(ctx, q(0), &value_out, &[q(1)])?
        .expand(ctx, q(1), &pop_value, &[q(2)])?
        .expand(ctx, q(2), &base, &[q(SEARCH)])?;
    search(ctx, &mut sub, tape, iter, cnst)?;
    Ok(sub.build())
}

/// floor(log_b v) for `[.., b, v]` on `tape`.
///
/// Same exit contract as [`log2`]; the base is read from the word beneath
/// the value instead of being fixed.
pub fn log(ctx: &mut Context, tape: Tape, iter: Tape, cnst: Tape) -> CompileResult<Subroutine> {
    distinct("log", &[tape, iter, cnst])?;
    let value_out = copy(ctx, tape, cnst)?;
    let pop_value = erase_word(tape);
    let base_out = copy(ctx, tape, cnst)?;
    let pop_base = erase_word(tape);

    let mut sub = SubroutineBuilder::new(
        format!("log({}, {}, {})", tape.number(), iter.number(), cnst.number()),
        1,
    );
    sub.expand(ctx, q(0), &value_out, &[q(1)])?
        .expand(ctx, q(1), &pop_value, &[q(2)])?
        .expand(ctx, q(2), &base_out, &[q(3)])?
        .expand(ctx, q(3), &pop_base, &[q(SEARCH)])?;
    search(ctx, &mut sub, tape, iter, cnst)?;
    Ok(sub.build())
}

/// Exponent search shared by [`log2`] and [`log`].
///
/// Entered at `q10` with `cnst = [v, b]`, `tape` empty and `iter` holding the
/// candidate exponent `e` (initially empty). Each round pushes `b^e` and `v`
/// onto `tape` and compares them: below `v` bumps `e` and retries, equal
/// stops, above backs `e` off by one and stops. Finally `[v, b]` is dropped.
fn search(
    ctx: &mut Context,
    sub: &mut SubroutineBuilder,
    tape: Tape,
    iter: Tape,
    cnst: Tape,
) -> CompileResult<()> {
    let base_out = copy(ctx, cnst, tape)?;
    let exponent_out = copy(ctx, iter, tape)?;
    let power = exp(ctx, tape, iter, cnst)?;
    let below_base = previous(cnst);
    let value_out = copy(ctx, cnst, tape)?;
    let above_value = next(cnst);
    let compare = cmp(ctx, tape, cnst)?;
    let drop_base = erase_word(cnst);
    let drop_value = erase_word(cnst);

    let outcomes = Comparison::continuations(q(17), q(20), q(18));
    sub.expand(ctx, q(SEARCH), &base_out, &[q(11)])?
        .expand(ctx, q(11), &exponent_out, &[q(12)])?
        .expand(ctx, q(12), &power, &[q(13)])?
        .expand(ctx, q(13), &below_base, &[q(14)])?
        .expand(ctx, q(14), &value_out, &[q(15)])?
        .expand(ctx, q(15), &above_value, &[q(16)])?
        .expand(ctx, q(16), &compare, &outcomes)?
        // b^e < v: try e + 1
        .any(q(17), write(Symbol::Mark, iter), q(19))
        .any(q(19), right(iter), q(SEARCH))
        // b^e > v: the answer is e - 1
        .any(q(18), left(iter), q(21))
        .any(q(21), erase(iter), q(20))
        .expand(ctx, q(20), &drop_base, &[q(22)])?
        .expand(ctx, q(22), &drop_value, &[rt(0)])?;
    Ok(())
}
