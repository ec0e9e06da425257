//! Lexer for normalized expressions
//!
//! Tokenizes a normalized expression string into a flat token list using
//! the Logos library. Runs after the normalizer, so the input is already
//! canonical (explicit `*` for implicit multiplication, no arrow marker).

pub mod tokens;

pub use tokens::{Token, TokenKind};

use logos::Logos;

use crate::common::Span;
use crate::error::EvalError;

/// Lex an expression into tokens.
///
/// Fails with [`EvalError::UnexpectedCharacter`] at the first character
/// that matches no token pattern; the error carries the offending text and
/// its position for display.
pub fn lex(source: &str) -> Result<Vec<Token>, EvalError> {
    let mut tokens = Vec::new();
    let mut lexer = TokenKind::lexer(source);

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        let kind = match result {
            Ok(kind) => kind,
            Err(_) => {
                return Err(EvalError::UnexpectedCharacter {
                    found: source[span.clone()].to_string(),
                    span: Span::new(span.start, span.end).into(),
                });
            }
        };

        tokens.push(Token {
            kind,
            span: Span::new(span.start, span.end),
            text: source[span].to_string(),
        });
    }

    Ok(tokens)
}
