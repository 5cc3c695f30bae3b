//! The four-stage translation pipeline.
//!
//! Each stage is a pure function over its input and fails fast: as soon as
//! one stage reports a diagnostic, downstream stages never run.

use crate::analyzer::analyze;
use crate::ast::TokenKind;
use crate::diagnostics::{Diagnostic, ErrorCode};
use crate::emitter::emit;
use crate::lexer::tokenize;
use crate::parser::parse;

/// Translates SimpleScript source text into a Go program.
///
/// Returns the emitted program, or every diagnostic of the first stage that
/// rejected it.
pub fn compile_source(source: &str) -> Result<String, Vec<Diagnostic>> {
    let tokens = tokenize(source);

    // The lexer is total; rejecting malformed input is the driver's job.
    let lex_errors: Vec<Diagnostic> = tokens
        .iter()
        .filter(|t| t.kind == TokenKind::Invalid)
        .map(|t| {
            Diagnostic::error(
                ErrorCode::SyntaxError,
                t,
                format!("unexpected character '{}'", t.lexeme),
            )
        })
        .collect();

    if !lex_errors.is_empty() {
        return Err(lex_errors);
    }

    let (program, parse_errors) = parse(tokens);
    if !parse_errors.is_empty() {
        return Err(parse_errors);
    }

    let semantic_errors = analyze(&program);
    if !semantic_errors.is_empty() {
        return Err(semantic_errors);
    }

    Ok(emit(&program))
}
