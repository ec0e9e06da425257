//! Evaluation Error Diagnostics
//!
//! Every failure mode of the engine is a variant here. All errors are
//! terminal for the single call: the engine holds no mutable state, so a
//! failed evaluation never affects the next one.

use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

/// Errors produced by the normalizer/tokenizer/parser/evaluator pipeline.
#[derive(Debug, Error, Diagnostic)]
pub enum EvalError {
    /// A character outside the recognized grammar.
    #[error("Unexpected character `{found}`")]
    #[diagnostic(
        code(E0001),
        help("Expressions may contain numbers, unit names, `+ - * / ^`, parentheses and `->`.")
    )]
    UnexpectedCharacter {
        found: String,
        #[label("not recognized here")]
        span: SourceSpan,
    },

    /// Unbalanced grouping.
    #[error("Mismatched parentheses")]
    #[diagnostic(
        code(E0002),
        help("Every `(` needs a matching `)` and vice versa.")
    )]
    MismatchedParentheses,

    /// Identifier matched no unit, constant or function, even after
    /// metric-prefix stripping.
    #[error("Unknown unit or name `{name}`")]
    #[diagnostic(
        code(E0003),
        help("Unit names are matched case-insensitively; metric prefixes (k, m, µ, ...) only apply to prefixable units.")
    )]
    UnresolvedUnit {
        name: String,
        #[label("not a known unit, constant or function")]
        span: SourceSpan,
    },

    /// Exponent operand carries a nonzero dimension.
    #[error("Exponent must be dimensionless, found `{dimension}`")]
    #[diagnostic(
        code(E0004),
        help("Raising to a dimensioned power is not meaningful; drop the unit from the exponent.")
    )]
    NonScalarExponent { dimension: String },

    /// Postfix evaluation did not reduce to exactly one operand.
    #[error("Malformed expression: {reason}")]
    #[diagnostic(code(E0005))]
    MalformedExpression { reason: String },

    /// Absolute temperature scale combined with arithmetic.
    #[error("Absolute temperature scales cannot be used in arithmetic")]
    #[diagnostic(
        code(E0006),
        help("Use kelvin (K) for temperature math, or the difference units deltaC / deltaF.\nPlain conversions like `32 °F -> °C` are fine.")
    )]
    IncompatibleTemperatureArithmetic,

    /// Explicit target unit's dimension does not match the computed one.
    #[error("Incompatible dimensions: result is `{found}`, target is `{expected}`")]
    #[diagnostic(code(E0007))]
    IncompatibleDimensions {
        found: String,
        expected: String,
        #[help]
        suggestion: Option<String>,
    },

    /// Function applied to a dimensioned argument.
    #[error("Function `{function}` requires dimensionless arguments, found `{dimension}`")]
    #[diagnostic(
        code(E0008),
        help("Convert the argument to a pure number before applying the function.")
    )]
    DimensionedFunctionArgument { function: String, dimension: String },
}
