//! State labels.
//!
//! Subroutine bodies are written against a reserved local alphabet:
//! `q0, q1, …` for their own states and `rt, rt1, …` for the places they
//! return to. Inlining a body wraps each of its local labels in an
//! [`State::Inlined`] layer carrying the expansion's site number, so labels
//! from different call sites can never meet.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A state label of the generated machine.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum State {
    /// A hand-written label, rendered `q{n}`.
    Local(u32),
    /// The n-th return placeholder, rendered `rt` for n = 0 and `rt{n}` otherwise.
    Return(usize),
    /// A label inlined by the expansion numbered `site`, rendered `s{site}{inner}`.
    Inlined(u32, Box<State>),
}

/// Shorthand for [`State::Local`].
pub fn q(n: u32) -> State {
    State::Local(n)
}

/// Shorthand for [`State::Return`].
pub fn rt(n: usize) -> State {
    State::Return(n)
}

impl State {
    /// True for labels that belong to the local alphabet of a body
    /// (including labels inlined into it).
    pub fn is_local(&self) -> bool {
        match self {
            Self::Local(_) => true,
            Self::Return(_) => false,
            Self::Inlined(_, inner) => inner.is_local(),
        }
    }

    /// Expansion sites this label is nested under, outermost first.
    pub fn sites(&self) -> Vec<u32> {
        let mut sites = Vec::new();
        let mut cursor = self;
        while let Self::Inlined(site, inner) = cursor {
            sites.push(*site);
            cursor = inner;
        }
        sites
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local(n) => write!(f, "q{n}"),
            Self::Return(0) => write!(f, "rt"),
            Self::Return(n) => write!(f, "rt{n}"),
            Self::Inlined(site, inner) => write!(f, "s{site}{inner}"),
        }
    }
}
