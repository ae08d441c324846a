use tmc_codegen::vector::{move_, symbol_at};
use tmc_codegen::{Subroutine, SubroutineBuilder};
use tmc_types::{q, rt, Direction, Symbol, Tape};

/// Step at least once in `direction`, keep stepping over marks, and stop on
/// the first blank.
///
/// Used to hop a head across a word to the boundary cell on its far side.
pub fn ctrl_move(direction: Direction, tape: Tape) -> Subroutine {
    let mut sub = SubroutineBuilder::new(format!("ctrl_move({direction}, {})", tape.number()), 1);
    sub.any(q(0), move_(direction, tape), q(1))
        .if_else(q(1), symbol_at(Symbol::Mark, tape), q(2), rt(0))
        .any(q(2), move_(direction, tape), q(1));
    sub.build()
}

pub fn previous(tape: Tape) -> Subroutine {
    ctrl_move(Direction::Left, tape)
}

pub fn next(tape: Tape) -> Subroutine {
    ctrl_move(Direction::Right, tape)
}
