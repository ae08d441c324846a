//! Vector algebra: condition and action vectors that name only the tapes
//! they care about. Every other slot is a wildcard (conditions) or
//! keep/stay (actions).

use tmc_types::{Action, CompileError, CompileResult, Direction, Pattern, Symbol, Tape};

/// Condition requiring `symbols[i]` on `tapes[i]`, wildcard elsewhere.
///
/// Fails if the lists differ in length or a tape is named twice.
pub fn cond(symbols: &[Symbol], tapes: &[Tape]) -> CompileResult<Pattern> {
    if symbols.len() != tapes.len() {
        return Err(CompileError::IllFormedPattern(format!(
            "{} symbol(s) for {} tape(s)",
            symbols.len(),
            tapes.len()
        )));
    }

    let mut pattern = Pattern::ANY;
    for (i, (&symbol, &tape)) in symbols.iter().zip(tapes).enumerate() {
        if tapes[..i].contains(&tape) {
            return Err(CompileError::IllFormedPattern(format!(
                "{tape} named twice in one condition"
            )));
        }
        pattern = pattern.with(tape, symbol);
    }
    Ok(pattern)
}

/// Condition requiring `symbol` on `tape` only.
pub fn symbol_at(symbol: Symbol, tape: Tape) -> Pattern {
    Pattern::ANY.with(tape, symbol)
}

/// Move the head of `tape` one cell in `direction`.
pub fn move_(direction: Direction, tape: Tape) -> Action {
    Action::KEEP.with_move(tape, direction)
}

pub fn left(tape: Tape) -> Action {
    move_(Direction::Left, tape)
}

pub fn right(tape: Tape) -> Action {
    move_(Direction::Right, tape)
}

/// Write `symbol` under the head of `tape` without moving.
pub fn write(symbol: Symbol, tape: Tape) -> Action {
    Action::KEEP.with_write(tape, symbol)
}

pub fn erase(tape: Tape) -> Action {
    write(Symbol::Blank, tape)
}
