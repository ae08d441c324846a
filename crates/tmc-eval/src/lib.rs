//! TMC reference simulator.
//!
//! Executes an emitted transition table one rule per step. The compiler
//! never runs its output; this crate exists so test suites can check that
//! what was emitted computes what it claims to.

pub mod error;
pub mod machine;

pub use error::{EvalError, EvalResult};
pub use machine::{Machine, TapeState, DEFAULT_FUEL};
