//! Dimensioned Postfix Evaluator
//!
//! Executes the postfix token sequence as a stack machine over
//! `Quantity` values and orchestrates the full pipeline: normalize, lex,
//! convert to postfix, evaluate, then reconcile with the target unit (or
//! auto-select one). A parallel composition stack tracks the unit spelling
//! of every intermediate so the result can be presented as a unit fraction.
//!
//! The engine is a pure function of the input string; there is no state
//! between calls beyond the static unit/prefix/function tables.

use serde::Serialize;

use crate::error::EvalError;
use crate::format::{auto_candidates, format_value, suggested_unit};
use crate::lexer::{lex, Token, TokenKind};
use crate::normalize::{normalize, Normalized};
use crate::parser::{to_postfix, BinOp, PostfixItem};
use crate::symbols::{lookup_constant, lookup_function};
use crate::units::convert::{between_scales, from_kelvin, to_kelvin};
use crate::units::{resolve, Dimension, Quantity, ResolvedUnit, TemperatureKind};

/// A successful evaluation, ready for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    /// Formatted numeric value in the output unit.
    pub value: String,
    /// Output unit spelling; empty for dimensionless results.
    pub unit: String,
    /// Explanatory steps, one per pipeline stage.
    pub steps: Vec<String>,
    /// Unit-power terms above the fraction bar, as typed.
    pub unit_numerator: Vec<String>,
    /// Unit-power terms below the fraction bar.
    pub unit_denominator: Vec<String>,
}

/// The unit portion of an expression, decomposed for fraction display.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UnitComposition {
    pub numerator: Vec<String>,
    pub denominator: Vec<String>,
}

/// Evaluate a raw expression string.
///
/// This is the primary entry point: the caller supplies free-form text,
/// optionally with a `-> unit` target, and receives either a formatted
/// result or a descriptive error.
pub fn evaluate(expression: &str) -> Result<Evaluation, EvalError> {
    tracing::debug!(expression, "evaluating");
    let norm = normalize(expression);
    let tokens = lex(&norm.expr)?;

    let mut steps = vec![match &norm.target {
        Some(target) => format!("normalized: {} -> {}", norm.expr, target),
        None => format!("normalized: {}", norm.expr),
    }];

    // Absolute scales never enter the linear stack machine.
    if first_absolute(&tokens).is_some() {
        return eval_absolute_conversion(&norm, &tokens, steps);
    }

    let postfix = to_postfix(&tokens)?;
    let (quantity, comp) = eval_postfix(&postfix, Mode::Expression)?;
    let composition = comp.render();
    tracing::trace!(value = quantity.value, dim = %quantity.dim, "reduced to SI quantity");

    if quantity.dim.is_dimensionless() {
        steps.push(format!("value: {}", format_value(quantity.value)));
    } else {
        steps.push(format!(
            "in SI base units: {} {}",
            format_value(quantity.value),
            quantity.dim
        ));
    }

    match &norm.target {
        Some(target) => {
            let target_tokens = lex(target)?;
            if let Some(absolute) = first_absolute(&target_tokens) {
                // `-> °C` is fine for a temperature-dimensioned result;
                // a compound target mixing an absolute scale is arithmetic.
                if target_tokens.len() == 1 {
                    if !quantity.dim.approx_eq(&Dimension::TEMPERATURE) {
                        return Err(dimension_mismatch(&quantity.dim, &Dimension::TEMPERATURE));
                    }
                    let out = from_kelvin(quantity.value, absolute.def);
                    steps.push(format!(
                        "affine conversion K -> {}: {}",
                        absolute.def.symbol,
                        format_value(out)
                    ));
                    return Ok(Evaluation {
                        value: format_value(out),
                        unit: absolute.def.symbol.to_string(),
                        steps,
                        unit_numerator: composition.numerator,
                        unit_denominator: composition.denominator,
                    });
                }
                return Err(EvalError::IncompatibleTemperatureArithmetic);
            }

            let target_quantity = unit_quantity(&target_tokens)?;
            if !target_quantity.dim.approx_eq(&quantity.dim) {
                return Err(dimension_mismatch(&quantity.dim, &target_quantity.dim));
            }
            let out = quantity.value / target_quantity.value;
            steps.push(format!("converted to {}: {}", target, format_value(out)));
            Ok(Evaluation {
                value: format_value(out),
                unit: target.clone(),
                steps,
                unit_numerator: composition.numerator,
                unit_denominator: composition.denominator,
            })
        }
        None => {
            let (value, unit) = auto_select(&quantity)?;
            if unit.is_empty() {
                steps.push(format!("dimensionless result: {value}"));
            } else {
                steps.push(format!("auto-selected unit {unit}: {value}"));
            }
            Ok(Evaluation {
                value,
                unit,
                steps,
                unit_numerator: composition.numerator,
                unit_denominator: composition.denominator,
            })
        }
    }
}

/// Decompose the unit portion of an expression into numerator/denominator
/// unit-power terms, without formatting a numeric result.
pub fn strip_units(expression: &str) -> Result<UnitComposition, EvalError> {
    let norm = normalize(expression);
    let tokens = lex(&norm.expr)?;
    let postfix = to_postfix(&tokens)?;
    let (_, comp) = eval_postfix(&postfix, Mode::Expression)?;
    Ok(comp.render())
}

// ============================================================================
// POSTFIX STACK MACHINE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    /// Full expressions: literals, constants, functions, units.
    Expression,
    /// Target-unit expressions: units only, literals only as exponents.
    TargetUnit,
}

fn eval_postfix(items: &[PostfixItem], mode: Mode) -> Result<(Quantity, Comp), EvalError> {
    let mut values: Vec<Quantity> = Vec::new();
    let mut comps: Vec<Comp> = Vec::new();

    for item in items {
        match item {
            PostfixItem::Number(v) => {
                values.push(Quantity::dimensionless(*v));
                comps.push(Comp::default());
            }

            PostfixItem::Ident { text, span } => {
                if mode == Mode::Expression {
                    if let Some(constant) = lookup_constant(text) {
                        values.push(Quantity::dimensionless(constant));
                        comps.push(Comp::default());
                        continue;
                    }
                }
                let resolved = resolve(text).ok_or_else(|| EvalError::UnresolvedUnit {
                    name: text.clone(),
                    span: (*span).into(),
                })?;
                values.push(Quantity::new(resolved.factor, resolved.def.dimension));
                comps.push(Comp::unit(text));
            }

            PostfixItem::Op(op) => {
                let b = pop_operand(&mut values)?;
                let a = pop_operand(&mut values)?;
                let cb = comps.pop().unwrap_or_default();
                let ca = comps.pop().unwrap_or_default();
                match op {
                    BinOp::Add | BinOp::Sub => {
                        if !a.dim.approx_eq(&b.dim) {
                            return Err(EvalError::IncompatibleDimensions {
                                found: b.dim.to_string(),
                                expected: a.dim.to_string(),
                                suggestion: None,
                            });
                        }
                        let value = if *op == BinOp::Add {
                            a.value + b.value
                        } else {
                            a.value - b.value
                        };
                        values.push(Quantity::new(value, a.dim));
                        comps.push(ca);
                    }
                    BinOp::Mul => {
                        values.push(a.mul(&b));
                        comps.push(ca.merge_mul(cb));
                    }
                    BinOp::Div => {
                        values.push(a.div(&b));
                        comps.push(ca.merge_div(cb));
                    }
                    BinOp::Pow => {
                        if !b.dim.is_dimensionless() {
                            return Err(EvalError::NonScalarExponent {
                                dimension: b.dim.to_string(),
                            });
                        }
                        values.push(a.powf(b.value));
                        comps.push(ca.pow(b.value));
                    }
                }
            }

            PostfixItem::Neg => {
                let a = pop_operand(&mut values)?;
                values.push(Quantity::new(-a.value, a.dim));
            }

            PostfixItem::Call { name, args, span } => {
                if mode == Mode::TargetUnit {
                    return Err(EvalError::MalformedExpression {
                        reason: format!("function call `{name}` in a target unit"),
                    });
                }
                let function = lookup_function(name).ok_or_else(|| EvalError::UnresolvedUnit {
                    name: name.clone(),
                    span: (*span).into(),
                })?;
                if *args != function.arity {
                    return Err(EvalError::MalformedExpression {
                        reason: format!(
                            "`{name}` takes {} argument(s), found {args}",
                            function.arity
                        ),
                    });
                }
                let mut argv = vec![0.0; *args];
                for slot in argv.iter_mut().rev() {
                    let arg = pop_operand(&mut values)?;
                    comps.pop();
                    if !arg.dim.is_dimensionless() {
                        return Err(EvalError::DimensionedFunctionArgument {
                            function: name.clone(),
                            dimension: arg.dim.to_string(),
                        });
                    }
                    *slot = arg.value;
                }
                values.push(Quantity::dimensionless((function.apply)(&argv)));
                comps.push(Comp::default());
            }
        }
    }

    if values.len() != 1 {
        return Err(EvalError::MalformedExpression {
            reason: format!("expression reduced to {} values instead of one", values.len()),
        });
    }
    Ok((values.pop().unwrap(), comps.pop().unwrap_or_default()))
}

fn pop_operand(values: &mut Vec<Quantity>) -> Result<Quantity, EvalError> {
    values.pop().ok_or_else(|| EvalError::MalformedExpression {
        reason: "operator is missing an operand".to_string(),
    })
}

// ============================================================================
// TARGET UNITS
// ============================================================================

/// Evaluate a target-unit expression from pre-lexed tokens. Yields a
/// quantity whose value is the target's SI factor and whose dimension must
/// match the left-hand result.
fn unit_quantity(tokens: &[Token]) -> Result<Quantity, EvalError> {
    if tokens.is_empty() {
        return Err(EvalError::MalformedExpression {
            reason: "empty target unit".to_string(),
        });
    }
    check_target_literals(tokens)?;
    let postfix = to_postfix(tokens)?;
    let (quantity, _) = eval_postfix(&postfix, Mode::TargetUnit)?;
    Ok(quantity)
}

/// Evaluate a unit spelling such as `km/h` or `m^2` to its SI factor.
pub(crate) fn unit_expression(source: &str) -> Result<Quantity, EvalError> {
    unit_quantity(&lex(source)?)
}

/// Bare numeric literals are rejected in target units; a literal is legal
/// only as a `^` exponent (optionally negated).
fn check_target_literals(tokens: &[Token]) -> Result<(), EvalError> {
    for (i, token) in tokens.iter().enumerate() {
        if token.kind != TokenKind::Number {
            continue;
        }
        let after_caret = i >= 1 && tokens[i - 1].kind == TokenKind::Caret;
        let after_negated_caret = i >= 2
            && tokens[i - 1].kind == TokenKind::Minus
            && tokens[i - 2].kind == TokenKind::Caret;
        if !(after_caret || after_negated_caret) {
            return Err(EvalError::MalformedExpression {
                reason: "target unit must not contain bare numbers".to_string(),
            });
        }
    }
    Ok(())
}

fn dimension_mismatch(found: &Dimension, expected: &Dimension) -> EvalError {
    EvalError::IncompatibleDimensions {
        found: found.to_string(),
        expected: expected.to_string(),
        suggestion: suggested_unit(found)
            .map(|unit| format!("the result can be expressed in `{unit}`")),
    }
}

// ============================================================================
// AUTO-UNIT SELECTION
// ============================================================================

/// Pick a human-friendly unit for an SI quantity: first ranked candidate
/// whose magnitude lands in [0.1, 1000), else the first candidate, else
/// the bare SI value.
fn auto_select(quantity: &Quantity) -> Result<(String, String), EvalError> {
    if quantity.dim.is_dimensionless() {
        return Ok((format_value(quantity.value), String::new()));
    }

    if let Some(row) = auto_candidates(&quantity.dim) {
        for candidate in row.candidates {
            let target = unit_expression(candidate)?;
            let magnitude = quantity.value / target.value;
            if (0.1..1000.0).contains(&magnitude.abs()) {
                return Ok((format_value(magnitude), candidate.to_string()));
            }
        }
        let first = row.candidates[0];
        let target = unit_expression(first)?;
        return Ok((format_value(quantity.value / target.value), first.to_string()));
    }

    Ok((format_value(quantity.value), String::new()))
}

// ============================================================================
// ABSOLUTE TEMPERATURE SCALES
// ============================================================================

/// First token resolving to an absolute temperature scale, if any.
fn first_absolute(tokens: &[Token]) -> Option<ResolvedUnit> {
    tokens
        .iter()
        .filter(|t| t.kind == TokenKind::Ident)
        .filter_map(|t| resolve(&t.text))
        .find(|r| r.def.temperature == TemperatureKind::Absolute)
}

/// Handle expressions containing an absolute temperature scale. Only pure
/// conversions are accepted: `<number> <scale>` (or the bare scale), with
/// at most a single-scale target. Everything else is arithmetic on an
/// affine scale and is rejected.
fn eval_absolute_conversion(
    norm: &Normalized,
    tokens: &[Token],
    mut steps: Vec<String>,
) -> Result<Evaluation, EvalError> {
    let (value, source) = match tokens {
        [unit] if unit.kind == TokenKind::Ident => (1.0, unit),
        [number, star, unit]
            if number.kind == TokenKind::Number
                && star.kind == TokenKind::Star
                && unit.kind == TokenKind::Ident =>
        {
            let value: f64 =
                number
                    .text
                    .parse()
                    .map_err(|_| EvalError::MalformedExpression {
                        reason: format!("invalid numeric literal `{}`", number.text),
                    })?;
            (value, unit)
        }
        _ => return Err(EvalError::IncompatibleTemperatureArithmetic),
    };
    let source = match resolve(&source.text) {
        Some(r) if r.def.temperature == TemperatureKind::Absolute => r,
        _ => return Err(EvalError::IncompatibleTemperatureArithmetic),
    };

    let numerator = vec![source.def.symbol.to_string()];

    match &norm.target {
        None => {
            let kelvin = to_kelvin(value, source.def);
            steps.push(format!(
                "affine conversion {} -> K: {}",
                source.def.symbol,
                format_value(kelvin)
            ));
            Ok(Evaluation {
                value: format_value(kelvin),
                unit: "K".to_string(),
                steps,
                unit_numerator: numerator,
                unit_denominator: Vec::new(),
            })
        }
        Some(target) => {
            let target_tokens = lex(target)?;

            if let [token] = target_tokens.as_slice() {
                if token.kind == TokenKind::Ident {
                    if let Some(t) = resolve(&token.text) {
                        if t.def.temperature == TemperatureKind::Absolute {
                            let out = between_scales(value, source.def, t.def);
                            steps.push(format!(
                                "affine conversion {} -> {}: {}",
                                source.def.symbol,
                                t.def.symbol,
                                format_value(out)
                            ));
                            return Ok(Evaluation {
                                value: format_value(out),
                                unit: t.def.symbol.to_string(),
                                steps,
                                unit_numerator: numerator,
                                unit_denominator: Vec::new(),
                            });
                        }
                    }
                }
            }

            if first_absolute(&target_tokens).is_some() {
                return Err(EvalError::IncompatibleTemperatureArithmetic);
            }

            // Linear targets (K, deltaC, compound spellings) go through
            // kelvin.
            let kelvin = to_kelvin(value, source.def);
            let target_quantity = unit_quantity(&target_tokens)?;
            if !target_quantity.dim.approx_eq(&Dimension::TEMPERATURE) {
                return Err(dimension_mismatch(
                    &Dimension::TEMPERATURE,
                    &target_quantity.dim,
                ));
            }
            let out = kelvin / target_quantity.value;
            steps.push(format!("converted to {}: {}", target, format_value(out)));
            Ok(Evaluation {
                value: format_value(out),
                unit: target.clone(),
                steps,
                unit_numerator: numerator,
                unit_denominator: Vec::new(),
            })
        }
    }
}

// ============================================================================
// UNIT COMPOSITION TRACKING
// ============================================================================

#[derive(Debug, Clone)]
struct Term {
    symbol: String,
    exp: f64,
}

/// Unit-power terms of one intermediate value, kept as a fraction.
#[derive(Debug, Clone, Default)]
struct Comp {
    num: Vec<Term>,
    den: Vec<Term>,
}

impl Comp {
    fn unit(symbol: &str) -> Self {
        Comp {
            num: vec![Term {
                symbol: symbol.to_string(),
                exp: 1.0,
            }],
            den: Vec::new(),
        }
    }

    fn merge_mul(mut self, other: Comp) -> Comp {
        self.num.extend(other.num);
        self.den.extend(other.den);
        self
    }

    fn merge_div(mut self, other: Comp) -> Comp {
        self.num.extend(other.den);
        self.den.extend(other.num);
        self
    }

    fn pow(mut self, n: f64) -> Comp {
        for term in self.num.iter_mut().chain(self.den.iter_mut()) {
            term.exp *= n;
        }
        self.rebalance()
    }

    /// Move negative powers across the fraction bar and drop zero powers.
    fn rebalance(self) -> Comp {
        const EPS: f64 = 1e-12;
        let mut num = Vec::new();
        let mut den = Vec::new();
        for term in self.num {
            if term.exp > EPS {
                num.push(term);
            } else if term.exp < -EPS {
                den.push(Term {
                    symbol: term.symbol,
                    exp: -term.exp,
                });
            }
        }
        for term in self.den {
            if term.exp > EPS {
                den.push(term);
            } else if term.exp < -EPS {
                num.push(Term {
                    symbol: term.symbol,
                    exp: -term.exp,
                });
            }
        }
        Comp { num, den }
    }

    fn render(self) -> UnitComposition {
        fn show(term: &Term) -> String {
            if (term.exp - 1.0).abs() <= 1e-12 {
                term.symbol.clone()
            } else if (term.exp - term.exp.round()).abs() <= 1e-9 {
                format!("{}^{}", term.symbol, term.exp.round() as i64)
            } else {
                format!("{}^{}", term.symbol, term.exp)
            }
        }

        UnitComposition {
            numerator: self.num.iter().map(show).collect(),
            denominator: self.den.iter().map(show).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_arithmetic() {
        let result = evaluate("2 + 3 * 4").unwrap();
        assert_eq!(result.value, "14");
        assert_eq!(result.unit, "");
    }

    #[test]
    fn test_unit_conversion() {
        let result = evaluate("3.5 ft/s -> km/h").unwrap();
        assert_eq!(result.value, "3.84048");
        assert_eq!(result.unit, "km/h");
        assert_eq!(result.unit_numerator, vec!["ft"]);
        assert_eq!(result.unit_denominator, vec!["s"]);
    }

    #[test]
    fn test_affine_fahrenheit_to_celsius() {
        let result = evaluate("32 °F -> °C").unwrap();
        assert_eq!(result.value, "0");
        assert_eq!(result.unit, "°C");
    }

    #[test]
    fn test_delta_temperature_is_linear() {
        let result = evaluate("10 deltaC -> K").unwrap();
        assert_eq!(result.value, "10");
        assert_eq!(result.unit, "K");
    }

    #[test]
    fn test_pressure_conversion() {
        let result = evaluate("500 kPa -> atm").unwrap();
        assert_eq!(result.value, "4.93462");
        assert_eq!(result.unit, "atm");
    }

    #[test]
    fn test_dimension_mismatch() {
        let err = evaluate("5 kg -> m").unwrap_err();
        assert!(matches!(err, EvalError::IncompatibleDimensions { .. }));
    }

    #[test]
    fn test_non_scalar_exponent() {
        let err = evaluate("2^(3 m)").unwrap_err();
        assert!(matches!(err, EvalError::NonScalarExponent { .. }));
    }

    #[test]
    fn test_temperature_arithmetic_rejected() {
        let err = evaluate("20 °C + 5 °C").unwrap_err();
        assert!(matches!(
            err,
            EvalError::IncompatibleTemperatureArithmetic
        ));

        let err = evaluate("2 * 30 °F").unwrap_err();
        assert!(matches!(
            err,
            EvalError::IncompatibleTemperatureArithmetic
        ));
    }

    #[test]
    fn test_kelvin_arithmetic_allowed() {
        let result = evaluate("300 K + 10 deltaC -> K").unwrap();
        assert_eq!(result.value, "310");
    }

    #[test]
    fn test_absolute_target_needs_temperature_dimension() {
        let err = evaluate("5 m -> °C").unwrap_err();
        assert!(matches!(err, EvalError::IncompatibleDimensions { .. }));
    }

    #[test]
    fn test_kelvin_to_celsius_affine_target() {
        let result = evaluate("300 K -> °C").unwrap();
        assert_eq!(result.value, "26.85");
        assert_eq!(result.unit, "°C");
    }

    #[test]
    fn test_auto_unit_selection() {
        let result = evaluate("3 m * 2 m").unwrap();
        assert_eq!(result.value, "6");
        assert_eq!(result.unit, "m^2");

        // 0.003 m is out of [0.1, 1000) in meters; centimeters are the
        // first ranked candidate that fits.
        let result = evaluate("0.003 m").unwrap();
        assert_eq!(result.unit, "cm");
        assert_eq!(result.value, "0.3");
    }

    #[test]
    fn test_functions_and_constants() {
        let result = evaluate("sin(pi/2)").unwrap();
        assert_eq!(result.value, "1");

        let result = evaluate("sqrt(16) + abs(-4)").unwrap();
        assert_eq!(result.value, "8");
    }

    #[test]
    fn test_function_rejects_dimensioned_argument() {
        let err = evaluate("sin(3 m)").unwrap_err();
        assert!(matches!(err, EvalError::DimensionedFunctionArgument { .. }));
    }

    #[test]
    fn test_unresolved_unit() {
        let err = evaluate("5 blorp").unwrap_err();
        assert!(matches!(err, EvalError::UnresolvedUnit { .. }));
    }

    #[test]
    fn test_target_rejects_bare_numbers() {
        let err = evaluate("5 m -> 2").unwrap_err();
        assert!(matches!(err, EvalError::MalformedExpression { .. }));

        // Exponents are fine.
        let result = evaluate("6 m^2 -> m^2").unwrap();
        assert_eq!(result.value, "6");
    }

    #[test]
    fn test_strip_units() {
        let comp = strip_units("9.8 m/s^2").unwrap();
        assert_eq!(comp.numerator, vec!["m"]);
        assert_eq!(comp.denominator, vec!["s^2"]);

        let comp = strip_units("3 kg*m/s^2").unwrap();
        assert_eq!(comp.numerator, vec!["kg", "m"]);
        assert_eq!(comp.denominator, vec!["s^2"]);
    }

    #[test]
    fn test_negative_exponent_composition() {
        let comp = strip_units("5 m*s^-1").unwrap();
        assert_eq!(comp.numerator, vec!["m"]);
        assert_eq!(comp.denominator, vec!["s"]);
    }

    #[test]
    fn test_empty_expression() {
        let err = evaluate("").unwrap_err();
        assert!(matches!(err, EvalError::MalformedExpression { .. }));
    }
}
