//! TMC compiler: assembles library subroutines into flat transition tables.
//!
//! ```text
//! library routine → expand (hygienic inlining) → program assembler → Program
//! ```
//!
//! A [`Program`] renders as the textual table with `to_string()` and as
//! JSON through serde.

pub mod assembler;
pub mod library;

use serde::{Deserialize, Serialize};

pub use assembler::{program, ACCEPT_STATE, INIT_STATE};
pub use tmc_codegen::{Context, Subroutine};
use tmc_types::{CompileResult, ErrorCategory, ErrorCode, Program};

/// Build a top-level routine with a fresh [`Context`] and assemble it.
///
/// `build` receives the context every expansion of this compilation draws
/// its sites from.
pub fn compile<F>(name: &str, param_count: u32, build: F) -> CompileResult<Program>
where
    F: FnOnce(&mut Context) -> CompileResult<Subroutine>,
{
    let mut ctx = Context::new();
    let body = build(&mut ctx)?;
    program(&mut ctx, name, &body, param_count)
}

/// Structured outcome of a compilation, for tooling that wants JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompileReport {
    pub success: bool,
    pub name: String,
    /// SHA-256 of the textual table.
    pub digest: Option<String>,
    pub rule_count: usize,
    pub state_count: usize,
    /// The textual table.
    pub table: Option<String>,
    pub error: Option<ErrorReport>,
}

/// A compile error flattened for JSON output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorReport {
    pub code: ErrorCode,
    pub category: ErrorCategory,
    pub message: String,
}

/// Like [`compile`], but never fails: errors are reported inside the result.
pub fn compile_to_report<F>(name: &str, param_count: u32, build: F) -> CompileReport
where
    F: FnOnce(&mut Context) -> CompileResult<Subroutine>,
{
    match compile(name, param_count, build) {
        Ok(program) => CompileReport {
            success: true,
            name: name.to_string(),
            digest: Some(program.digest()),
            rule_count: program.rules.len(),
            state_count: program.states().len(),
            table: Some(program.to_string()),
            error: None,
        },
        Err(e) => CompileReport {
            success: false,
            name: name.to_string(),
            digest: None,
            rule_count: 0,
            state_count: 0,
            table: None,
            error: Some(ErrorReport {
                code: e.code(),
                category: e.category(),
                message: e.to_string(),
            }),
        },
    }
}

impl CompileReport {
    /// Serialize to a JSON string.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
