//! TMC rule generator: turns symbolic subroutine bodies into concrete rules.
//!
//! # Layers
//!
//! - [`vector`]: condition/action vectors naming only the tapes they touch
//! - [`enumerate`]: every read vector, and wildcard-aware matching
//! - [`rules`]: `any` / `if_else` / `multiway`, each emitting one rule per
//!   read vector so the emitted state is total
//! - [`hygiene`]: [`expand`], which inlines a [`Subroutine`] at a call site
//!   with fresh state labels drawn from a [`Context`]
//! - [`subroutine`]: the [`Subroutine`] value and its builder

pub mod enumerate;
pub mod hygiene;
pub mod rules;
pub mod subroutine;
pub mod vector;

pub use hygiene::{expand, Context};
pub use rules::{branch2, branch_n, unconditional};
pub use subroutine::{Subroutine, SubroutineBuilder};
