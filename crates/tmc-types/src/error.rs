use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Error category, determined by error code range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorCategory {
    /// Malformed condition/action vectors and branch declarations.
    Shape,
    /// Misuse of subroutines at an expansion site.
    Expansion,
}

/// Numeric error code (E100–E299).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ErrorCode(pub u16);

impl ErrorCode {
    // ── Shape errors (E100–E199) ──
    pub const ILL_FORMED_PATTERN: Self = Self(100);
    pub const ILL_FORMED_BRANCH: Self = Self(101);

    // ── Expansion errors (E200–E299) ──
    pub const EMPTY_SUBROUTINE: Self = Self(200);
    pub const ARITY_MISMATCH: Self = Self(201);

    /// Get the category for this error code.
    pub fn category(self) -> ErrorCategory {
        match self.0 {
            100..=199 => ErrorCategory::Shape,
            _ => ErrorCategory::Expansion,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{}", self.0)
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Shape => write!(f, "shape"),
            Self::Expansion => write!(f, "expansion"),
        }
    }
}

/// Structural errors raised while generating a transition table.
///
/// All of them are fatal to the enclosing assembly.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    /// A condition or action vector does not fit the machine's tapes.
    #[error("ill-formed pattern: {0}")]
    IllFormedPattern(String),

    /// A multi-way branch was declared without any arm.
    #[error("ill-formed branch in state {state}: at least one arm is required")]
    IllFormedBranch { state: String },

    /// `expand` was asked to inline a subroutine it cannot return from.
    #[error("empty subroutine `{name}`: {reason}")]
    EmptySubroutine { name: String, reason: &'static str },

    /// The number of continuations does not match the declared returns.
    #[error("subroutine `{name}` declares {expected} return(s) but was given {found} continuation(s)")]
    ArityMismatch {
        name: String,
        expected: usize,
        found: usize,
    },
}

impl CompileError {
    /// The stable error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::IllFormedPattern(_) => ErrorCode::ILL_FORMED_PATTERN,
            Self::IllFormedBranch { .. } => ErrorCode::ILL_FORMED_BRANCH,
            Self::EmptySubroutine { .. } => ErrorCode::EMPTY_SUBROUTINE,
            Self::ArityMismatch { .. } => ErrorCode::ARITY_MISMATCH,
        }
    }

    /// The category of this error, derived from its code.
    pub fn category(&self) -> ErrorCategory {
        self.code().category()
    }
}
