//! End-to-end tests: compile whole programs, check the emitted table's
//! structure, and run it on the reference simulator.

use tmc_compiler::library::{self, cmp, log, log2};
use tmc_compiler::{compile, compile_to_report, CompileReport, ACCEPT_STATE, INIT_STATE};
use tmc_eval::{EvalError, Machine};
use tmc_types::{CompileResult, ErrorCategory, ErrorCode, Program, Tape, READS_PER_STATE};

// ══════════════════════════════════════════════════════════════════════════════
// Helpers
// ══════════════════════════════════════════════════════════════════════════════

fn tape(n: usize) -> Tape {
    Tape::new(n).unwrap()
}

fn log2_program() -> CompileResult<Program> {
    compile("log2", 1, |ctx| {
        let (t1, t2, t3) = library::standard_tapes()?;
        log2(ctx, t1, t2, t3)
    })
}

fn log_program() -> CompileResult<Program> {
    compile("log", 2, |ctx| {
        let (t1, t2, t3) = library::standard_tapes()?;
        log(ctx, t1, t2, t3)
    })
}

/// Run `program` on `input` and return the words left on tape 2.
fn result_of(program: &Program, input: &[usize]) -> Vec<usize> {
    let machine = Machine::run_program(program, input)
        .unwrap_or_else(|e| panic!("{} on {input:?}: {e}", program.name));
    machine.tape(tape(2)).words()
}

fn floor_log(base: usize, value: usize) -> usize {
    let mut power = 1;
    let mut e = 0;
    while power * base <= value {
        power *= base;
        e += 1;
    }
    e
}

fn unary(n: usize) -> Vec<usize> {
    if n == 0 {
        Vec::new()
    } else {
        vec![n]
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// log2 end to end
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn log2_of_eight_is_three() {
    let program = log2_program().unwrap();
    let machine = Machine::run_program(&program, &[8]).unwrap();
    assert_eq!(machine.tape(tape(2)).words(), vec![3]);
    assert!(machine.tape(tape(1)).is_blank());
    assert!(machine.tape(tape(3)).is_blank());
}

#[test]
fn log2_rounds_down() {
    let program = log2_program().unwrap();
    assert_eq!(result_of(&program, &[7]), vec![2]);
    assert_eq!(result_of(&program, &[9]), vec![3]);
    assert_eq!(result_of(&program, &[16]), vec![4]);
}

#[test]
fn log2_of_one_and_zero_leave_an_empty_result() {
    let program = log2_program().unwrap();
    assert!(result_of(&program, &[1]).is_empty());
    assert!(result_of(&program, &[0]).is_empty());
}

#[test]
fn log2_matches_arithmetic_for_small_values() {
    let program = log2_program().unwrap();
    for v in 1..=20 {
        assert_eq!(result_of(&program, &[v]), unary(floor_log(2, v)), "log2 {v}");
    }
}

#[test]
fn log_reads_its_base_from_the_input() {
    let program = log_program().unwrap();
    assert_eq!(result_of(&program, &[3, 27]), vec![3]);
    assert_eq!(result_of(&program, &[3, 26]), vec![2]);
    assert_eq!(result_of(&program, &[2, 8]), vec![3]);
    assert!(result_of(&program, &[5, 4]).is_empty());
}

// ══════════════════════════════════════════════════════════════════════════════
// Table structure
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn program_has_one_init_and_one_accept() {
    let program = log2_program().unwrap();
    assert_eq!(program.init.to_string(), INIT_STATE);
    assert_eq!(program.accept.to_string(), ACCEPT_STATE);

    let sources = program.source_states();
    assert!(sources.contains(&program.init));
    assert!(!sources.contains(&program.accept));
    assert!(program.rules.iter().any(|r| r.to == program.accept));
}

#[test]
fn every_source_state_is_total_and_no_key_repeats() {
    for program in [log2_program().unwrap(), log_program().unwrap()] {
        assert!(program.shadowed_keys().is_empty(), "{}", program.name);
        assert!(program.partial_states().is_empty(), "{}", program.name);
        assert_eq!(
            program.rules.len(),
            program.source_states().len() * READS_PER_STATE
        );
    }
}

#[test]
fn only_the_accept_state_is_a_return_label() {
    let program = log2_program().unwrap();
    for state in program.states() {
        assert!(
            state.is_local() || *state == program.accept,
            "leftover placeholder {state}"
        );
    }
}

#[test]
fn text_format_has_header_then_two_line_entries() {
    let program = log2_program().unwrap();
    let text = program.to_string();
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("name: log2"));
    assert_eq!(lines.next(), Some("init: q0"));
    assert_eq!(lines.next(), Some("accept: rt"));

    let body: Vec<&str> = lines.collect();
    assert_eq!(body.len(), program.rules.len() * 3);
    for entry in body.chunks(3) {
        assert_eq!(entry[0], "");
        assert_eq!(entry[1].split(", ").count(), 4);
        assert_eq!(entry[2].split(", ").count(), 7);
    }
}

#[test]
fn program_round_trips_through_json() {
    let program = log2_program().unwrap();
    let json = serde_json::to_string(&program).unwrap();
    let back: Program = serde_json::from_str(&json).unwrap();
    assert_eq!(back, program);
    assert_eq!(back.digest(), program.digest());
}

// ══════════════════════════════════════════════════════════════════════════════
// Errors and reports
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn multi_exit_body_cannot_be_a_program() {
    let err = compile("cmp", 2, |ctx| cmp(ctx, tape(1), tape(2))).unwrap_err();
    assert_eq!(err.code(), ErrorCode::ARITY_MISMATCH);
    assert_eq!(err.category(), ErrorCategory::Expansion);
}

#[test]
fn shared_tape_roles_are_rejected() {
    let err = compile("log2", 1, |ctx| log2(ctx, tape(1), tape(1), tape(3))).unwrap_err();
    assert_eq!(err.code(), ErrorCode::ILL_FORMED_PATTERN);
}

#[test]
fn report_carries_table_and_digest() {
    let report = compile_to_report("log2", 1, |ctx| {
        let (t1, t2, t3) = library::standard_tapes()?;
        log2(ctx, t1, t2, t3)
    });
    let program = log2_program().unwrap();
    assert!(report.success);
    assert!(report.error.is_none());
    assert_eq!(report.digest, Some(program.digest()));
    assert_eq!(report.table, Some(program.to_string()));
    assert_eq!(report.rule_count, program.rules.len());
    assert_eq!(report.state_count, program.states().len());

    let json = report.to_json().unwrap();
    let back: CompileReport = serde_json::from_str(&json).unwrap();
    assert_eq!(back.digest, report.digest);
}

#[test]
fn report_flattens_errors() {
    let report = compile_to_report("cmp", 2, |ctx| cmp(ctx, tape(1), tape(2)));
    assert!(!report.success);
    assert!(report.table.is_none());
    let error = report.error.as_ref().unwrap();
    assert_eq!(error.code, ErrorCode::ARITY_MISMATCH);
    assert_eq!(error.category, ErrorCategory::Expansion);

    let json = report.to_json().unwrap();
    assert!(json.contains("\"success\":false"));
    assert!(json.contains("\"code\":201"));
    assert!(json.contains("\"category\":\"expansion\""));
}

#[test]
fn truncated_table_gets_stuck() {
    let mut program = log2_program().unwrap();
    let last = program.rules.len() - READS_PER_STATE;
    program.rules.truncate(last);
    let err = Machine::run_program(&program, &[8]).unwrap_err();
    assert!(matches!(
        err,
        EvalError::Rejected { .. } | EvalError::MissingRule { .. }
    ));
}
