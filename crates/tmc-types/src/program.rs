//! Rules, transition tables, and the assembled program.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::state::State;
use crate::tape::TAPE_COUNT;
use crate::vectors::{Read, Step};

/// Number of distinct read vectors a total state must cover.
pub const READS_PER_STATE: usize = 1 << TAPE_COUNT;

/// One concrete transition: `(from, read) → (to, step)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rule {
    pub from: State,
    pub read: Read,
    pub to: State,
    pub step: Step,
}

impl Rule {
    /// The lookup key of this rule.
    pub fn key(&self) -> (&State, &Read) {
        (&self.from, &self.read)
    }
}

/// Renders the two-line table entry, without the trailing blank line.
impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.from)?;
        for symbol in &self.read {
            write!(f, ", {symbol}")?;
        }
        writeln!(f)?;
        write!(f, "{}", self.to)?;
        for symbol in &self.step.write {
            write!(f, ", {symbol}")?;
        }
        for direction in &self.step.moves {
            write!(f, ", {direction}")?;
        }
        Ok(())
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// TransitionTable
// ══════════════════════════════════════════════════════════════════════════════

/// Keyed view of a rule list. Later rules shadow earlier ones with the same key.
#[derive(Debug, Clone, Default)]
pub struct TransitionTable {
    entries: BTreeMap<(State, Read), (State, Step)>,
}

impl TransitionTable {
    /// Index `rules` in order; the last rule for a key wins.
    pub fn from_rules<'a>(rules: impl IntoIterator<Item = &'a Rule>) -> Self {
        let mut entries = BTreeMap::new();
        for rule in rules {
            entries.insert(
                (rule.from.clone(), rule.read),
                (rule.to.clone(), rule.step),
            );
        }
        Self { entries }
    }

    /// Look up the transition for `state` reading `read`.
    pub fn get(&self, state: &State, read: &Read) -> Option<&(State, Step)> {
        self.entries.get(&(state.clone(), *read))
    }

    /// True if `state` has at least one outgoing rule.
    pub fn has_state(&self, state: &State) -> bool {
        self.entries
            .range((state.clone(), [crate::Symbol::Blank; TAPE_COUNT])..)
            .next()
            .is_some_and(|((from, _), _)| from == state)
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Program
// ══════════════════════════════════════════════════════════════════════════════

/// The assembled machine: the sole output artifact of a compilation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Program {
    pub name: String,
    pub init: State,
    pub accept: State,
    pub rules: Vec<Rule>,
}

impl Program {
    /// Keyed transition table (last rule wins on duplicate keys).
    pub fn table(&self) -> TransitionTable {
        TransitionTable::from_rules(&self.rules)
    }

    /// Every state that appears on the left-hand side of a rule.
    pub fn source_states(&self) -> BTreeSet<&State> {
        self.rules.iter().map(|r| &r.from).collect()
    }

    /// Every state mentioned anywhere in the table.
    pub fn states(&self) -> BTreeSet<&State> {
        self.rules
            .iter()
            .flat_map(|r| [&r.from, &r.to])
            .chain([&self.init, &self.accept])
            .collect()
    }

    /// Keys emitted more than once. A non-empty result means one generation
    /// pass silently shadowed another.
    pub fn shadowed_keys(&self) -> Vec<(State, Read)> {
        let mut seen = BTreeSet::new();
        let mut shadowed = Vec::new();
        for rule in &self.rules {
            if !seen.insert(rule.key()) {
                shadowed.push((rule.from.clone(), rule.read));
            }
        }
        shadowed
    }

    /// Source states that do not cover all [`READS_PER_STATE`] read vectors.
    pub fn partial_states(&self) -> Vec<&State> {
        let mut reads: BTreeMap<&State, BTreeSet<&Read>> = BTreeMap::new();
        for rule in &self.rules {
            reads.entry(&rule.from).or_default().insert(&rule.read);
        }
        reads
            .into_iter()
            .filter(|(_, covered)| covered.len() != READS_PER_STATE)
            .map(|(state, _)| state)
            .collect()
    }

    /// SHA-256 of the textual table, lowercase hex.
    pub fn digest(&self) -> String {
        let hash = Sha256::digest(self.to_string().as_bytes());
        format!("{hash:x}")
    }
}

/// Renders the textual transition table: a header, then one two-line entry
/// per rule, entries separated by blank lines.
impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "name: {}", self.name)?;
        writeln!(f, "init: {}", self.init)?;
        writeln!(f, "accept: {}", self.accept)?;
        for rule in &self.rules {
            writeln!(f)?;
            writeln!(f, "{rule}")?;
        }
        Ok(())
    }
}
