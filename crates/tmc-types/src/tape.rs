use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{CompileError, CompileResult};

/// Number of tapes of the target machine.
///
/// Fixed at compile time; every vector in the table has this many slots.
pub const TAPE_COUNT: usize = 3;

/// A tape symbol: blank or the unary mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Symbol {
    Blank,
    Mark,
}

impl Symbol {
    /// Both symbols, in enumeration order.
    pub const ALL: [Symbol; 2] = [Symbol::Blank, Symbol::Mark];

    /// The literal token used in the textual table.
    pub fn token(self) -> char {
        match self {
            Self::Blank => '_',
            Self::Mark => 'I',
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token())
    }
}

/// Head movement after a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Left,
    Right,
    Stay,
}

impl Direction {
    /// The literal token used in the textual table.
    pub fn token(self) -> char {
        match self {
            Self::Left => '<',
            Self::Right => '>',
            Self::Stay => '-',
        }
    }

    /// Signed head offset.
    pub fn offset(self) -> i64 {
        match self {
            Self::Left => -1,
            Self::Right => 1,
            Self::Stay => 0,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token())
    }
}

/// A 1-based tape index in `[1, TAPE_COUNT]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct Tape(u8);

impl Tape {
    /// Validate a 1-based tape number.
    pub fn new(number: usize) -> CompileResult<Self> {
        if (1..=TAPE_COUNT).contains(&number) {
            Ok(Self(number as u8))
        } else {
            Err(CompileError::IllFormedPattern(format!(
                "tape {number} out of range 1..={TAPE_COUNT}"
            )))
        }
    }

    /// The 1-based tape number.
    pub fn number(self) -> usize {
        self.0 as usize
    }

    /// The 0-based slot of this tape inside a vector.
    pub fn slot(self) -> usize {
        self.0 as usize - 1
    }

    /// Every tape of the machine in order.
    pub fn all() -> impl Iterator<Item = Tape> {
        (1..=TAPE_COUNT).map(|n| Tape(n as u8))
    }
}

impl TryFrom<usize> for Tape {
    type Error = CompileError;

    fn try_from(number: usize) -> CompileResult<Self> {
        Tape::new(number)
    }
}

impl From<Tape> for usize {
    fn from(tape: Tape) -> usize {
        tape.number()
    }
}

impl fmt::Display for Tape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tape {}", self.0)
    }
}
