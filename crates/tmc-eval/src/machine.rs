//! Multi-tape machine state and the step loop.

use std::collections::BTreeSet;

use tmc_types::{Program, Read, State, Symbol, Tape, TransitionTable, TAPE_COUNT};
use tracing::debug;

use crate::error::{EvalError, EvalResult};

/// Default step budget for [`Machine::run`].
pub const DEFAULT_FUEL: u64 = 1_000_000;

// ══════════════════════════════════════════════════════════════════════════════
// TapeState
// ══════════════════════════════════════════════════════════════════════════════

/// One unbounded tape. Only marked cells are stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TapeState {
    marks: BTreeSet<i64>,
    head: i64,
}

impl TapeState {
    /// Symbol under the head.
    pub fn read(&self) -> Symbol {
        self.symbol_at(self.head)
    }

    pub fn symbol_at(&self, cell: i64) -> Symbol {
        if self.marks.contains(&cell) {
            Symbol::Mark
        } else {
            Symbol::Blank
        }
    }

    fn write(&mut self, symbol: Symbol) {
        match symbol {
            Symbol::Mark => self.marks.insert(self.head),
            Symbol::Blank => self.marks.remove(&self.head),
        };
    }

    pub fn head(&self) -> i64 {
        self.head
    }

    pub fn is_blank(&self) -> bool {
        self.marks.is_empty()
    }

    /// Lengths of the maximal runs of marks, left to right.
    pub fn words(&self) -> Vec<usize> {
        let mut words = Vec::new();
        let mut previous: Option<i64> = None;
        for &cell in &self.marks {
            if previous == Some(cell - 1) {
                if let Some(len) = words.last_mut() {
                    *len += 1;
                }
            } else {
                words.push(1);
            }
            previous = Some(cell);
        }
        words
    }

    /// Lay out `words` in unary from cell 0, one blank between words,
    /// and park the head on the cell just past the last word.
    pub fn load_stack(&mut self, words: &[usize]) {
        self.marks.clear();
        let mut cell = 0i64;
        for (i, &len) in words.iter().enumerate() {
            if i > 0 {
                cell += 1;
            }
            for _ in 0..len {
                self.marks.insert(cell);
                cell += 1;
            }
        }
        self.head = cell;
    }

    /// Lay out `words` like [`load_stack`](Self::load_stack) but leave the
    /// head on cell 0, the way a raw input tape starts.
    pub fn load_input(&mut self, words: &[usize]) {
        self.load_stack(words);
        self.head = 0;
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Machine
// ══════════════════════════════════════════════════════════════════════════════

/// A running machine: tapes, current state, and a step counter.
#[derive(Debug, Clone)]
pub struct Machine {
    tapes: [TapeState; TAPE_COUNT],
    state: State,
    steps: u64,
}

impl Machine {
    /// A machine in `init` with every tape blank and every head on cell 0.
    pub fn new(init: State) -> Self {
        Self {
            tapes: Default::default(),
            state: init,
            steps: 0,
        }
    }

    pub fn tape(&self, tape: Tape) -> &TapeState {
        &self.tapes[tape.slot()]
    }

    pub fn tape_mut(&mut self, tape: Tape) -> &mut TapeState {
        &mut self.tapes[tape.slot()]
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// What every head currently reads.
    pub fn read(&self) -> Read {
        std::array::from_fn(|slot| self.tapes[slot].read())
    }

    /// Apply one rule. Returns `false` once the current state has no rules
    /// at all, which is how the machine halts.
    pub fn step(&mut self, table: &TransitionTable) -> EvalResult<bool> {
        if !table.has_state(&self.state) {
            return Ok(false);
        }
        let read = self.read();
        let (to, step) = table
            .get(&self.state, &read)
            .ok_or_else(|| EvalError::MissingRule {
                state: self.state.to_string(),
                read: read.iter().map(|s| s.token()).collect(),
            })?;

        for (tape, (&symbol, &direction)) in
            self.tapes.iter_mut().zip(step.write.iter().zip(&step.moves))
        {
            tape.write(symbol);
            tape.head += direction.offset();
        }
        self.state = to.clone();
        self.steps += 1;
        Ok(true)
    }

    /// Run until the machine halts or `fuel` steps have been taken.
    pub fn run(&mut self, table: &TransitionTable, fuel: u64) -> EvalResult<&State> {
        let budget = self.steps + fuel;
        while self.step(table)? {
            if self.steps >= budget && table.has_state(&self.state) {
                return Err(EvalError::FuelExhausted {
                    steps: self.steps,
                    state: self.state.to_string(),
                });
            }
        }
        debug!(state = %self.state, steps = self.steps, "machine halted");
        Ok(&self.state)
    }

    /// Load `input` on tape 1 (head on cell 0), run `program`, and require
    /// it to halt in its accept state.
    pub fn run_program(program: &Program, input: &[usize]) -> EvalResult<Machine> {
        let mut machine = Machine::new(program.init.clone());
        if let Some(first) = Tape::all().next() {
            machine.tape_mut(first).load_input(input);
        }
        machine.run(&program.table(), DEFAULT_FUEL)?;
        if machine.state != program.accept {
            return Err(EvalError::Rejected {
                state: machine.state.to_string(),
                accept: program.accept.to_string(),
            });
        }
        Ok(machine)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tmc_types::{q, rt, Direction, Rule, Step};

    fn tape(n: usize) -> Tape {
        Tape::new(n).unwrap()
    }

    #[test]
    fn test_load_stack_layout() {
        let mut t = TapeState::default();
        t.load_stack(&[2, 3]);
        assert_eq!(t.words(), vec![2, 3]);
        assert_eq!(t.head(), 6);
        assert_eq!(t.symbol_at(2), Symbol::Blank);
        t.load_input(&[1]);
        assert_eq!(t.head(), 0);
        assert_eq!(t.read(), Symbol::Mark);
    }

    #[test]
    fn test_words_of_blank_tape() {
        assert!(TapeState::default().words().is_empty());
        assert!(TapeState::default().is_blank());
    }

    /// q0 walks tape 1 right over marks, then halts in rt.
    fn walker() -> Vec<Rule> {
        let mut rules = Vec::new();
        for read in [
            [Symbol::Blank; TAPE_COUNT],
            [Symbol::Blank, Symbol::Blank, Symbol::Mark],
            [Symbol::Blank, Symbol::Mark, Symbol::Blank],
            [Symbol::Blank, Symbol::Mark, Symbol::Mark],
            [Symbol::Mark, Symbol::Blank, Symbol::Blank],
            [Symbol::Mark, Symbol::Blank, Symbol::Mark],
            [Symbol::Mark, Symbol::Mark, Symbol::Blank],
            [Symbol::Mark, Symbol::Mark, Symbol::Mark],
        ] {
            let on_mark = read[0] == Symbol::Mark;
            rules.push(Rule {
                from: q(0),
                read,
                to: if on_mark { q(0) } else { rt(0) },
                step: Step {
                    write: read,
                    moves: [
                        if on_mark { Direction::Right } else { Direction::Stay },
                        Direction::Stay,
                        Direction::Stay,
                    ],
                },
            });
        }
        rules
    }

    #[test]
    fn test_run_until_halt() {
        let table = TransitionTable::from_rules(&walker());
        let mut m = Machine::new(q(0));
        m.tape_mut(tape(1)).load_input(&[4]);
        assert_eq!(m.run(&table, DEFAULT_FUEL).unwrap(), &rt(0));
        assert_eq!(m.tape(tape(1)).head(), 4);
        assert_eq!(m.steps(), 5);
    }

    #[test]
    fn test_fuel_exhausted() {
        let table = TransitionTable::from_rules(&walker());
        let mut m = Machine::new(q(0));
        m.tape_mut(tape(1)).load_input(&[10]);
        let err = m.run(&table, 3).unwrap_err();
        assert!(matches!(err, EvalError::FuelExhausted { steps: 3, .. }));
    }

    #[test]
    fn test_missing_rule() {
        let rules: Vec<Rule> = walker().into_iter().skip(1).collect();
        let table = TransitionTable::from_rules(&rules);
        let mut m = Machine::new(q(0));
        let err = m.run(&table, DEFAULT_FUEL).unwrap_err();
        assert_eq!(
            err,
            EvalError::MissingRule {
                state: "q0".into(),
                read: "___".into()
            }
        );
    }
}
