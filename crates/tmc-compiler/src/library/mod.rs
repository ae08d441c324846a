//! Arithmetic subroutine library.
//!
//! # Tape discipline
//!
//! Every tape is used as a stack of unary words. A word of value `n` is `n`
//! consecutive marks; words are separated by one blank; the head rests on
//! the cell just past the top word. Under this discipline:
//!
//! | Routine      | Effect                                                      |
//! |--------------|-------------------------------------------------------------|
//! | `copy`       | push the top of `src` onto `dst`                            |
//! | `erase_word` | pop the top word                                            |
//! | `literal`    | push a constant                                             |
//! | `sum`        | `[.., a, b]` → `[.., a + b]`                                |
//! | `multiply`   | `[.., a, b]` → `[.., a · b]`                                |
//! | `exp`        | `[.., b, e]` → `[.., b ^ e]`                                |
//! | `cmp`        | `[.., a, b]` → `[..]`, leaving through less/equal/greater   |
//! | `log2`       | `[v]` → blank; `iter` receives floor(log2 v)                |
//!
//! Scratch tapes are restored to the shape they had on entry.

mod arith;
mod compare;
mod log;
mod navigation;
mod words;

pub use arith::{exp, multiply};
pub use compare::{cmp, Comparison};
pub use log::{log, log2};
pub use navigation::{ctrl_move, next, previous};
pub use words::{copy, erase_word, literal, sum};

use tmc_types::{CompileError, CompileResult, Tape};

/// The conventional tape roles: operand, counter, and scratch.
pub fn standard_tapes() -> CompileResult<(Tape, Tape, Tape)> {
    Ok((Tape::new(1)?, Tape::new(2)?, Tape::new(3)?))
}

/// Routines that move words between tapes need each role on its own tape.
fn distinct(routine: &str, tapes: &[Tape]) -> CompileResult<()> {
    for (i, tape) in tapes.iter().enumerate() {
        if tapes[..i].contains(tape) {
            return Err(CompileError::IllFormedPattern(format!(
                "{routine} uses {tape} for two roles"
            )));
        }
    }
    Ok(())
}
