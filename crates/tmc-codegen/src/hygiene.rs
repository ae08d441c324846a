//! Hygienic subroutine expansion.
//!
//! A subroutine body is written once against the local alphabet
//! (`q0, q1, …`, `rt, rt1, …`). [`expand`] inlines a structural copy of it
//! at a call site:
//!
//! 1. an identity transition leads from the caller's state into the copy's entry;
//! 2. every local label is wrapped with a site number drawn from the
//!    [`Context`], which never hands out the same number twice;
//! 3. every return placeholder is replaced by the caller's continuation at
//!    the same position.
//!
//! Labels already inlined into the body are wrapped again, so uniqueness
//! holds across any nesting depth.

use tmc_types::{Action, CompileError, CompileResult, Rule, State};
use tracing::trace;

use crate::rules::unconditional;
use crate::subroutine::Subroutine;

// ══════════════════════════════════════════════════════════════════════════════
// Context
// ══════════════════════════════════════════════════════════════════════════════

/// Compilation context: the source of fresh expansion sites.
///
/// One context spans one compilation. Sites increase monotonically and are
/// never reused, which is what keeps the states of two expansions apart.
#[derive(Debug, Default)]
pub struct Context {
    next_site: u32,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next expansion site.
    pub fn fresh_site(&mut self) -> u32 {
        let site = self.next_site;
        self.next_site += 1;
        site
    }

    /// Number of sites handed out so far.
    pub fn sites_used(&self) -> u32 {
        self.next_site
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Expansion
// ══════════════════════════════════════════════════════════════════════════════

/// Inline `body` at `from`, binding its returns to `continuations` in order.
pub fn expand(
    ctx: &mut Context,
    from: &State,
    body: &Subroutine,
    continuations: &[State],
) -> CompileResult<Vec<Rule>> {
    if body.returns() == 0 {
        return Err(CompileError::EmptySubroutine {
            name: body.name().to_string(),
            reason: "it declares no return placeholder",
        });
    }
    if body.rules().is_empty() {
        return Err(CompileError::EmptySubroutine {
            name: body.name().to_string(),
            reason: "it has no rules",
        });
    }
    let arity_mismatch = || CompileError::ArityMismatch {
        name: body.name().to_string(),
        expected: body.returns(),
        found: continuations.len(),
    };
    if continuations.len() != body.returns() {
        return Err(arity_mismatch());
    }

    let site = ctx.fresh_site();
    trace!(
        site,
        subroutine = body.name(),
        rules = body.rules().len(),
        "expanding subroutine"
    );

    let rename = |state: &State| -> CompileResult<State> {
        match state {
            State::Return(i) => continuations.get(*i).cloned().ok_or_else(arity_mismatch),
            local => Ok(State::Inlined(site, Box::new(local.clone()))),
        }
    };

    let mut rules = unconditional(from, &Action::KEEP, &rename(body.entry())?);
    rules.reserve(body.rules().len());
    for rule in body.rules() {
        rules.push(Rule {
            from: rename(&rule.from)?,
            read: rule.read,
            to: rename(&rule.to)?,
            step: rule.step,
        });
    }
    Ok(rules)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::subroutine::SubroutineBuilder;
    use crate::vector::right;
    use tmc_types::{q, rt, ErrorCode, Tape, READS_PER_STATE};

    fn stepper() -> Subroutine {
        let t1 = Tape::new(1).unwrap();
        let mut sub = SubroutineBuilder::new("stepper", 1);
        sub.any(q(0), right(t1), q(1)).any(q(1), right(t1), rt(0));
        sub.build()
    }

    #[test]
    fn test_context_sites_are_monotonic() {
        let mut ctx = Context::new();
        assert_eq!(ctx.fresh_site(), 0);
        assert_eq!(ctx.fresh_site(), 1);
        assert_eq!(ctx.sites_used(), 2);
    }

    #[test]
    fn test_expand_renames_and_binds() {
        let mut ctx = Context::new();
        let rules = expand(&mut ctx, &q(9), &stepper(), &[q(10)]).unwrap();
        assert_eq!(rules.len(), 3 * READS_PER_STATE);

        let entry = State::Inlined(0, Box::new(q(0)));
        assert!(rules[..READS_PER_STATE]
            .iter()
            .all(|r| r.from == q(9) && r.to == entry && r.step.is_identity_for(&r.read)));
        assert!(rules.iter().any(|r| r.to == q(10)));
        assert!(rules.iter().all(|r| r.to != rt(0) && r.from != rt(0)));
    }

    #[test]
    fn test_expand_twice_is_disjoint() {
        let mut ctx = Context::new();
        let body = stepper();
        let first = expand(&mut ctx, &q(0), &body, &[q(1)]).unwrap();
        let second = expand(&mut ctx, &q(1), &body, &[q(2)]).unwrap();
        let first_states: std::collections::BTreeSet<_> =
            first.iter().map(|r| &r.from).filter(|s| s.is_local() && !s.sites().is_empty()).collect();
        assert!(second.iter().all(|r| !first_states.contains(&r.from)));
    }

    #[test]
    fn test_expand_arity_mismatch() {
        let mut ctx = Context::new();
        let err = expand(&mut ctx, &q(0), &stepper(), &[q(1), q(2)]).unwrap_err();
        assert_eq!(err.code(), ErrorCode::ARITY_MISMATCH);
        let err = expand(&mut ctx, &q(0), &stepper(), &[]).unwrap_err();
        assert_eq!(err.code(), ErrorCode::ARITY_MISMATCH);
    }

    #[test]
    fn test_expand_rejects_empty_subroutine() {
        let mut ctx = Context::new();
        let no_returns = SubroutineBuilder::new("sink", 0).build();
        let err = expand(&mut ctx, &q(0), &no_returns, &[]).unwrap_err();
        assert_eq!(err.code(), ErrorCode::EMPTY_SUBROUTINE);

        let no_rules = SubroutineBuilder::new("hollow", 1).build();
        let err = expand(&mut ctx, &q(0), &no_rules, &[q(1)]).unwrap_err();
        assert_eq!(err.code(), ErrorCode::EMPTY_SUBROUTINE);
        assert_eq!(ctx.sites_used(), 0);
    }
}
