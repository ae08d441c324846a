//! Runtime error types for the TMC simulator.

use thiserror::Error;

/// Simulation failure. Every one of these points at a defect in the table
/// under test, not in the simulator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    /// The state has rules, but none for what is under the heads.
    #[error("no rule for state {state} reading {read}")]
    MissingRule { state: String, read: String },

    /// The step budget ran out before the machine halted.
    #[error("fuel exhausted after {steps} steps in state {state}")]
    FuelExhausted { steps: u64, state: String },

    /// The machine halted somewhere other than the accept state.
    #[error("halted in state {state}, expected {accept}")]
    Rejected { state: String, accept: String },
}

/// Result alias for simulator operations.
pub type EvalResult<T> = Result<T, EvalError>;
