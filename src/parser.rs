//! Infix -> Postfix Conversion (Shunting-Yard)
//!
//! Reorders the token stream into postfix (Reverse Polish) form using an
//! operator stack. Precedence, high to low: `^` (right-associative), unary
//! minus, `*` `/`, `+` `-` (all left-associative). Function calls become a
//! dedicated postfix item carrying the argument count; implicit
//! multiplication between adjacent operand-like tokens that survived
//! tokenization distinctly is materialized here.

use crate::common::Span;
use crate::error::EvalError;
use crate::lexer::{Token, TokenKind};
use crate::symbols::lookup_function;

/// Binary operators in postfix output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl BinOp {
    fn precedence(self) -> u8 {
        match self {
            BinOp::Add | BinOp::Sub => 1,
            BinOp::Mul | BinOp::Div => 2,
            BinOp::Pow => 4,
        }
    }

    fn right_associative(self) -> bool {
        matches!(self, BinOp::Pow)
    }
}

/// One item of the postfix program.
#[derive(Debug, Clone, PartialEq)]
pub enum PostfixItem {
    Number(f64),
    /// Unresolved identifier: unit, constant, or anything else the
    /// evaluator will reject.
    Ident { text: String, span: Span },
    Op(BinOp),
    /// Unary negation.
    Neg,
    /// Function call with resolved argument count.
    Call {
        name: String,
        args: usize,
        span: Span,
    },
}

enum StackOp {
    Bin(BinOp),
    Neg,
    LParen,
    Call {
        name: String,
        args: usize,
        span: Span,
    },
}

/// Convert a token stream to postfix order.
pub fn to_postfix(tokens: &[Token]) -> Result<Vec<PostfixItem>, EvalError> {
    let mut output: Vec<PostfixItem> = Vec::new();
    let mut stack: Vec<StackOp> = Vec::new();
    // True when the previous token completed an operand, so a binary
    // operator (or implicit multiplication) may follow.
    let mut prev_operand = false;

    let mut i = 0;
    while i < tokens.len() {
        let token = &tokens[i];
        match token.kind {
            TokenKind::Number => {
                if prev_operand {
                    push_binary(BinOp::Mul, &mut stack, &mut output);
                }
                let value: f64 = token.text.parse().map_err(|_| {
                    EvalError::MalformedExpression {
                        reason: format!("invalid numeric literal `{}`", token.text),
                    }
                })?;
                output.push(PostfixItem::Number(value));
                prev_operand = true;
            }

            TokenKind::Ident => {
                if prev_operand {
                    push_binary(BinOp::Mul, &mut stack, &mut output);
                }
                let is_call = tokens.get(i + 1).map(|t| t.kind) == Some(TokenKind::LParen)
                    && lookup_function(&token.text).is_some();
                if is_call {
                    stack.push(StackOp::Call {
                        name: token.text.clone(),
                        args: 1,
                        span: token.span,
                    });
                    stack.push(StackOp::LParen);
                    i += 1; // consume the `(` as part of the call
                    prev_operand = false;
                } else {
                    output.push(PostfixItem::Ident {
                        text: token.text.clone(),
                        span: token.span,
                    });
                    prev_operand = true;
                }
            }

            TokenKind::LParen => {
                if prev_operand {
                    push_binary(BinOp::Mul, &mut stack, &mut output);
                }
                stack.push(StackOp::LParen);
                prev_operand = false;
            }

            TokenKind::RParen => {
                loop {
                    match stack.pop() {
                        Some(StackOp::Bin(op)) => output.push(PostfixItem::Op(op)),
                        Some(StackOp::Neg) => output.push(PostfixItem::Neg),
                        Some(StackOp::LParen) => break,
                        Some(StackOp::Call { .. }) | None => {
                            return Err(EvalError::MismatchedParentheses);
                        }
                    }
                }
                if matches!(stack.last(), Some(StackOp::Call { .. })) {
                    if let Some(StackOp::Call { name, args, span }) = stack.pop() {
                        output.push(PostfixItem::Call { name, args, span });
                    }
                }
                prev_operand = true;
            }

            TokenKind::Comma => {
                loop {
                    if matches!(stack.last(), Some(StackOp::LParen)) {
                        break;
                    }
                    match stack.pop() {
                        Some(StackOp::Bin(op)) => output.push(PostfixItem::Op(op)),
                        Some(StackOp::Neg) => output.push(PostfixItem::Neg),
                        _ => {
                            return Err(EvalError::MalformedExpression {
                                reason: "`,` outside of a function call".to_string(),
                            });
                        }
                    }
                }
                // The item beneath the `(` must be the call this comma
                // belongs to.
                let n = stack.len();
                match stack.get_mut(n.wrapping_sub(2)) {
                    Some(StackOp::Call { args, .. }) => *args += 1,
                    _ => {
                        return Err(EvalError::MalformedExpression {
                            reason: "`,` outside of a function call".to_string(),
                        });
                    }
                }
                prev_operand = false;
            }

            TokenKind::Plus | TokenKind::Minus if !prev_operand => {
                // Unary sign. `+` is a no-op; `-` negates.
                if token.kind == TokenKind::Minus {
                    stack.push(StackOp::Neg);
                }
            }

            TokenKind::Plus => {
                push_binary(BinOp::Add, &mut stack, &mut output);
                prev_operand = false;
            }
            TokenKind::Minus => {
                push_binary(BinOp::Sub, &mut stack, &mut output);
                prev_operand = false;
            }
            TokenKind::Star => {
                push_binary(BinOp::Mul, &mut stack, &mut output);
                prev_operand = false;
            }
            TokenKind::Slash => {
                push_binary(BinOp::Div, &mut stack, &mut output);
                prev_operand = false;
            }
            TokenKind::Caret => {
                push_binary(BinOp::Pow, &mut stack, &mut output);
                prev_operand = false;
            }
        }
        i += 1;
    }

    while let Some(op) = stack.pop() {
        match op {
            StackOp::Bin(op) => output.push(PostfixItem::Op(op)),
            StackOp::Neg => output.push(PostfixItem::Neg),
            StackOp::LParen | StackOp::Call { .. } => {
                return Err(EvalError::MismatchedParentheses);
            }
        }
    }

    Ok(output)
}

/// Pop operators that bind at least as tightly (per associativity), then
/// push the new one.
fn push_binary(op: BinOp, stack: &mut Vec<StackOp>, output: &mut Vec<PostfixItem>) {
    let prec = op.precedence();
    loop {
        let pop = match stack.last() {
            Some(StackOp::Bin(top)) => {
                top.precedence() > prec || (top.precedence() == prec && !op.right_associative())
            }
            // Unary minus binds tighter than `*` and `/`, looser than `^`.
            Some(StackOp::Neg) => prec < BinOp::Pow.precedence(),
            _ => false,
        };
        if !pop {
            break;
        }
        match stack.pop() {
            Some(StackOp::Bin(top)) => output.push(PostfixItem::Op(top)),
            Some(StackOp::Neg) => output.push(PostfixItem::Neg),
            _ => unreachable!(),
        }
    }
    stack.push(StackOp::Bin(op));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::lex;

    fn postfix(src: &str) -> Vec<PostfixItem> {
        to_postfix(&lex(src).unwrap()).unwrap()
    }

    fn render(items: &[PostfixItem]) -> String {
        items
            .iter()
            .map(|item| match item {
                PostfixItem::Number(v) => format!("{v}"),
                PostfixItem::Ident { text, .. } => text.clone(),
                PostfixItem::Op(BinOp::Add) => "+".into(),
                PostfixItem::Op(BinOp::Sub) => "-".into(),
                PostfixItem::Op(BinOp::Mul) => "*".into(),
                PostfixItem::Op(BinOp::Div) => "/".into(),
                PostfixItem::Op(BinOp::Pow) => "^".into(),
                PostfixItem::Neg => "neg".into(),
                PostfixItem::Call { name, args, .. } => format!("{name}/{args}"),
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    #[test]
    fn test_precedence() {
        assert_eq!(render(&postfix("2+3*4")), "2 3 4 * +");
        assert_eq!(render(&postfix("2*3+4")), "2 3 * 4 +");
        assert_eq!(render(&postfix("(2+3)*4")), "2 3 + 4 *");
    }

    #[test]
    fn test_pow_right_associative() {
        assert_eq!(render(&postfix("2^3^2")), "2 3 2 ^ ^");
    }

    #[test]
    fn test_mul_div_left_associative() {
        assert_eq!(render(&postfix("8/4/2")), "8 4 / 2 /");
    }

    #[test]
    fn test_units_and_division() {
        assert_eq!(render(&postfix("3.5*ft/s")), "3.5 ft * s /");
    }

    #[test]
    fn test_unary_minus() {
        assert_eq!(render(&postfix("-3")), "3 neg");
        assert_eq!(render(&postfix("2*-3")), "2 3 neg *");
        assert_eq!(render(&postfix("-2+3")), "2 neg 3 +");
    }

    #[test]
    fn test_function_call() {
        assert_eq!(render(&postfix("sin(2)")), "2 sin/1");
        assert_eq!(render(&postfix("atan2(1,2)")), "1 2 atan2/2");
        assert_eq!(render(&postfix("sin(2)+1")), "2 sin/1 1 +");
    }

    #[test]
    fn test_implicit_multiplication_materialized() {
        // Adjacent operands that reached the parser distinctly.
        assert_eq!(render(&postfix("2 m")), "2 m *");
        assert_eq!(render(&postfix("(2)(3)")), "2 3 *");
    }

    #[test]
    fn test_mismatched_parens() {
        let err = to_postfix(&lex("(2+3").unwrap()).unwrap_err();
        assert!(matches!(err, EvalError::MismatchedParentheses));

        let err = to_postfix(&lex("2+3)").unwrap()).unwrap_err();
        assert!(matches!(err, EvalError::MismatchedParentheses));
    }

    #[test]
    fn test_stray_comma() {
        let err = to_postfix(&lex("1,2").unwrap()).unwrap_err();
        assert!(matches!(err, EvalError::MalformedExpression { .. }));
    }
}
