//! Subroutine values and the builder used to author them.

use serde::Serialize;
use std::collections::BTreeSet;

use tmc_types::{q, Action, CompileResult, Pattern, Rule, State};
use tracing::debug;

use crate::hygiene::{expand, Context};
use crate::rules::{branch2, branch_n, unconditional};

/// A reusable block of rules over the local alphabet.
///
/// Entry is always `q0`. The body may leave through any of its `returns`
/// placeholders `rt0 … rt{returns-1}` (`rt0` renders as `rt`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Subroutine {
    name: String,
    entry: State,
    returns: usize,
    rules: Vec<Rule>,
}

impl Subroutine {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn entry(&self) -> &State {
        &self.entry
    }

    /// Number of declared return placeholders.
    pub fn returns(&self) -> usize {
        self.returns
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn into_rules(self) -> Vec<Rule> {
        self.rules
    }

    /// Every state mentioned by the body, including its return placeholders.
    pub fn states(&self) -> BTreeSet<&State> {
        self.rules.iter().flat_map(|r| [&r.from, &r.to]).collect()
    }
}

/// Accumulates the rules of one subroutine body.
///
/// The generation methods mirror the primitives in [`crate::rules`]:
/// `any` is [`unconditional`], `if_else` is [`branch2`], `multiway` is
/// [`branch_n`], and `expand` inlines another subroutine.
#[derive(Debug)]
pub struct SubroutineBuilder {
    name: String,
    returns: usize,
    rules: Vec<Rule>,
}

impl SubroutineBuilder {
    pub fn new(name: impl Into<String>, returns: usize) -> Self {
        Self {
            name: name.into(),
            returns,
            rules: Vec::new(),
        }
    }

    pub fn any(&mut self, from: State, intent: Action, to: State) -> &mut Self {
        self.rules.extend(unconditional(&from, &intent, &to));
        self
    }

    pub fn if_else(
        &mut self,
        from: State,
        pattern: Pattern,
        to_true: State,
        to_false: State,
    ) -> &mut Self {
        self.rules
            .extend(branch2(&from, &pattern, &to_true, &to_false));
        self
    }

    pub fn multiway(
        &mut self,
        from: State,
        arms: &[(Pattern, State)],
        default: State,
    ) -> CompileResult<&mut Self> {
        self.rules.extend(branch_n(&from, arms, &default)?);
        Ok(self)
    }

    pub fn expand(
        &mut self,
        ctx: &mut Context,
        from: State,
        body: &Subroutine,
        continuations: &[State],
    ) -> CompileResult<&mut Self> {
        self.rules
            .extend(expand(ctx, &from, body, continuations)?);
        Ok(self)
    }

    pub fn build(self) -> Subroutine {
        debug!(
            subroutine = %self.name,
            rules = self.rules.len(),
            returns = self.returns,
            "built subroutine"
        );
        Subroutine {
            name: self.name,
            entry: q(0),
            returns: self.returns,
            rules: self.rules,
        }
    }
}
