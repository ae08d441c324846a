//! Shared types for the TMC compiler.
//!
//! This crate defines the tape alphabet, condition/action vectors, state
//! labels, rules, the assembled [`Program`], and the error types used across
//! all compiler stages.

mod error;
mod program;
mod state;
mod tape;
mod vectors;

pub use error::{CompileError, ErrorCategory, ErrorCode};
pub use program::{Program, Rule, TransitionTable, READS_PER_STATE};
pub use state::{q, rt, State};
pub use tape::{Direction, Symbol, Tape, TAPE_COUNT};
pub use vectors::{Action, Pattern, Read, Step};

/// Result type used throughout the TMC compiler.
pub type CompileResult<T> = std::result::Result<T, CompileError>;
