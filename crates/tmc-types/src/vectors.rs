//! Condition and action vectors.
//!
//! A condition vector ([`Pattern`]) holds one slot per tape, each either a
//! concrete [`Symbol`] or a wildcard. An action vector ([`Action`]) holds a
//! write slot per tape (a symbol, or *keep*) followed by a move slot per tape.
//! The target machine has no native wildcards, so every symbolic vector is
//! resolved against a concrete [`Read`] before it lands in the table.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::tape::{Direction, Symbol, Tape, TAPE_COUNT};
use crate::{CompileError, CompileResult};

/// A concrete read vector: the symbols under every head.
pub type Read = [Symbol; TAPE_COUNT];

// ══════════════════════════════════════════════════════════════════════════════
// Pattern
// ══════════════════════════════════════════════════════════════════════════════

/// A condition vector. `None` is the wildcard slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pattern(pub [Option<Symbol>; TAPE_COUNT]);

impl Pattern {
    /// The all-wildcard pattern; matches every read vector.
    pub const ANY: Pattern = Pattern([None; TAPE_COUNT]);

    /// Build a pattern from an explicit slot list.
    ///
    /// The slice must have exactly [`TAPE_COUNT`] slots.
    pub fn from_slice(slots: &[Option<Symbol>]) -> CompileResult<Self> {
        let slots: [Option<Symbol>; TAPE_COUNT] = slots.try_into().map_err(|_| {
            CompileError::IllFormedPattern(format!(
                "condition has {} slot(s), expected {TAPE_COUNT}",
                slots.len()
            ))
        })?;
        Ok(Self(slots))
    }

    /// Require `symbol` under the head of `tape`.
    pub fn with(mut self, tape: Tape, symbol: Symbol) -> Self {
        self.0[tape.slot()] = Some(symbol);
        self
    }

    /// The requirement for `tape`, if any.
    pub fn get(&self, tape: Tape) -> Option<Symbol> {
        self.0[tape.slot()]
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for slot in &self.0 {
            match slot {
                Some(symbol) => write!(f, "{symbol}")?,
                None => write!(f, "*")?,
            }
        }
        Ok(())
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Action
// ══════════════════════════════════════════════════════════════════════════════

/// A symbolic action vector. A `None` write slot keeps the symbol that was read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Action {
    pub write: [Option<Symbol>; TAPE_COUNT],
    pub moves: [Direction; TAPE_COUNT],
}

impl Action {
    /// The identity action: keep every symbol, move no head.
    pub const KEEP: Action = Action {
        write: [None; TAPE_COUNT],
        moves: [Direction::Stay; TAPE_COUNT],
    };

    /// Build an action from explicit write and move slot lists.
    pub fn from_slices(write: &[Option<Symbol>], moves: &[Direction]) -> CompileResult<Self> {
        let ill_formed = |what: &str, len: usize| {
            CompileError::IllFormedPattern(format!(
                "action has {len} {what} slot(s), expected {TAPE_COUNT}"
            ))
        };
        Ok(Self {
            write: write
                .try_into()
                .map_err(|_| ill_formed("write", write.len()))?,
            moves: moves
                .try_into()
                .map_err(|_| ill_formed("move", moves.len()))?,
        })
    }

    /// Write `symbol` on `tape`.
    pub fn with_write(mut self, tape: Tape, symbol: Symbol) -> Self {
        self.write[tape.slot()] = Some(symbol);
        self
    }

    /// Move the head of `tape` in `direction`.
    pub fn with_move(mut self, tape: Tape, direction: Direction) -> Self {
        self.moves[tape.slot()] = direction;
        self
    }

    /// Replace every keep slot with the symbol actually read.
    pub fn resolve(&self, read: &Read) -> Step {
        let mut write = *read;
        for (slot, intent) in write.iter_mut().zip(self.write) {
            if let Some(symbol) = intent {
                *slot = symbol;
            }
        }
        Step {
            write,
            moves: self.moves,
        }
    }

    /// True if this action neither writes nor moves.
    pub fn is_identity(&self) -> bool {
        *self == Self::KEEP
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for slot in &self.write {
            match slot {
                Some(symbol) => write!(f, "{symbol}")?,
                None => write!(f, "*")?,
            }
        }
        for direction in &self.moves {
            write!(f, "{direction}")?;
        }
        Ok(())
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Step
// ══════════════════════════════════════════════════════════════════════════════

/// A concrete action: what gets written on every tape and where every head goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Step {
    pub write: [Symbol; TAPE_COUNT],
    pub moves: [Direction; TAPE_COUNT],
}

impl Step {
    /// True if applying this step after reading `read` changes nothing.
    pub fn is_identity_for(&self, read: &Read) -> bool {
        self.write == *read && self.moves.iter().all(|m| *m == Direction::Stay)
    }
}
