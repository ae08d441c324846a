//! Program assembler: wraps a top-level subroutine into a complete machine.

use tmc_codegen::{Context, Subroutine, SubroutineBuilder};
use tmc_types::{q, rt, CompileResult, Program, Tape};
use tracing::debug;

use crate::library::next;

/// Name of the initial state of every assembled program.
pub const INIT_STATE: &str = "q0";
/// Name of the accept state of every assembled program.
pub const ACCEPT_STATE: &str = "rt";

/// Assemble `body` into a program named `name`.
///
/// The input arrives on tape 1 with the head on its first cell. One prologue
/// step per parameter hops the head past one input word, so `body` starts
/// with all `param_count` words stacked below the head. `body`'s single
/// return is bound to the accept state, which has no outgoing rules.
pub fn program(
    ctx: &mut Context,
    name: &str,
    body: &Subroutine,
    param_count: u32,
) -> CompileResult<Program> {
    let input = Tape::new(1)?;
    let skip_word = next(input);

    let mut main = SubroutineBuilder::new(name, 1);
    for i in 0..param_count {
        main.expand(ctx, q(i), &skip_word, &[q(i + 1)])?;
    }
    main.expand(ctx, q(param_count), body, &[rt(0)])?;

    let rules = main.build().into_rules();
    debug!(
        program = name,
        rules = rules.len(),
        sites = ctx.sites_used(),
        "assembled program"
    );
    Ok(Program {
        name: name.to_string(),
        init: q(0),
        accept: rt(0),
        rules,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::erase_word;

    #[test]
    fn test_header_states() {
        let mut ctx = Context::new();
        let body = erase_word(Tape::new(2).unwrap());
        let program = program(&mut ctx, "pop", &body, 1).unwrap();
        assert_eq!(program.init.to_string(), INIT_STATE);
        assert_eq!(program.accept.to_string(), ACCEPT_STATE);
        assert!(program.to_string().starts_with("name: pop\ninit: q0\naccept: rt\n"));
    }

    #[test]
    fn test_body_must_return_once() {
        let mut ctx = Context::new();
        let body = crate::library::cmp(&mut ctx, Tape::new(1).unwrap(), Tape::new(2).unwrap())
            .unwrap();
        let err = program(&mut ctx, "cmp", &body, 2).unwrap_err();
        assert_eq!(err.code(), tmc_types::ErrorCode::ARITY_MISMATCH);
    }
}
