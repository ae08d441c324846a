//! Word-level stack operations: push a copy, pop, push a constant, add.

use tmc_codegen::vector::{erase, left, right, symbol_at, write};
use tmc_codegen::{Context, Subroutine, SubroutineBuilder};
use tmc_types::{q, rt, Action, CompileResult, Symbol, Tape};

use super::distinct;
use super::navigation::{next, previous};

/// Push a copy of the top word of `src` onto `dst`.
///
/// Marks are read right to left from `src` and appended left to right on
/// `dst`, after one separator blank. `src`'s head ends where it started.
pub fn copy(ctx: &mut Context, src: Tape, dst: Tape) -> CompileResult<Subroutine> {
    distinct("copy", &[src, dst])?;
    let restore = next(src);

    let mut sub = SubroutineBuilder::new(format!("copy({}, {})", src.number(), dst.number()), 1);
    sub.any(q(0), right(dst), q(1))
        .any(q(1), left(src), q(2))
        .if_else(q(2), symbol_at(Symbol::Mark, src), q(3), q(6))
        .any(q(3), write(Symbol::Mark, dst), q(4))
        .any(q(4), right(dst), q(5))
        .any(q(5), Action::KEEP, q(1))
        .expand(ctx, q(6), &restore, &[rt(0)])?;
    Ok(sub.build())
}

/// Pop the top word of `tape`: erase marks leftwards up to the first blank.
///
/// On a blank tape this only moves the head one cell left, so running it
/// again is harmless.
pub fn erase_word(tape: Tape) -> Subroutine {
    let mut sub = SubroutineBuilder::new(format!("erase_word({})", tape.number()), 1);
    sub.any(q(0), left(tape), q(1))
        .if_else(q(1), symbol_at(Symbol::Mark, tape), q(2), rt(0))
        .any(q(2), erase(tape), q(3))
        .any(q(3), left(tape), q(1));
    sub.build()
}

/// Push the constant `value` onto `tape`.
pub fn literal(tape: Tape, value: u32) -> Subroutine {
    let mut sub = SubroutineBuilder::new(format!("literal({}, {value})", tape.number()), 1);
    let after_separator = if value == 0 { rt(0) } else { q(1) };
    sub.any(q(0), right(tape), after_separator);
    for i in 0..value {
        let write_at = q(2 * i + 1);
        let advance = q(2 * i + 2);
        let then = if i + 1 == value { rt(0) } else { q(2 * i + 3) };
        sub.any(write_at, write(Symbol::Mark, tape), advance.clone())
            .any(advance, right(tape), then);
    }
    sub.build()
}

/// Add the top word of `tape` into the word beneath it.
///
/// The last mark of the top word moves into the separator blank, joining the
/// two words. An empty top word needs no mark moved: the single step left
/// already lands on the separator, which is the new top boundary.
pub fn sum(ctx: &mut Context, tape: Tape) -> CompileResult<Subroutine> {
    let back = previous(tape);
    let forth = next(tape);

    let mut sub = SubroutineBuilder::new(format!("sum({})", tape.number()), 1);
    sub.any(q(0), left(tape), q(1))
        .if_else(q(1), symbol_at(Symbol::Mark, tape), q(2), rt(0))
        .any(q(2), erase(tape), q(3))
        .expand(ctx, q(3), &back, &[q(4)])?
        .any(q(4), write(Symbol::Mark, tape), q(5))
        .expand(ctx, q(5), &forth, &[rt(0)])?;
    Ok(sub.build())
}
