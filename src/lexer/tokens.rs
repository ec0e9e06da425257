//! Token definitions for the expression grammar.

use logos::Logos;

use crate::common::Span;

/// Token kinds produced by the lexer.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n]+")]
pub enum TokenKind {
    /// Numeric literal: digits with optional fraction and exponent suffix.
    #[regex(r"([0-9]+\.?[0-9]*|\.[0-9]+)([eE][+-]?[0-9]+)?")]
    Number,

    /// Unit, constant or function name. Besides letters this admits the
    /// symbols that appear in unit spellings: `°`, `µ`/`μ`, `Ω`, `Δ`, `_`.
    #[regex(r"[A-Za-z°µμΩΔ_][A-Za-z0-9°µμΩΔ_]*")]
    Ident,

    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("^")]
    Caret,
    #[token(",")]
    Comma,
}

/// A token with its kind, span and source text.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
    pub text: String,
}
