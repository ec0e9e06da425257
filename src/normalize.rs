//! Input Normalizer
//!
//! Rewrites free-form human input into the strict grammar the lexer
//! consumes: Unicode arithmetic glyphs become ASCII operators, the word
//! `to` becomes the `->` target marker, whitespace is dropped, and
//! implicit multiplication is made explicit (`2m` -> `2*m`,
//! `3(4)` -> `3*(4)`, `)(` -> `)*(`).
//!
//! Normalization is total: any input maps to a normalized string, even if
//! later stages reject it. It is also idempotent; re-normalizing an
//! already-normalized string changes nothing.

use crate::symbols::lookup_function;

/// A normalized expression, split at the target-unit arrow if one was
/// present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalized {
    /// The left-hand expression, canonical form.
    pub expr: String,
    /// The target-unit expression after `->`, canonical form.
    pub target: Option<String>,
}

/// Normalize raw user input.
pub fn normalize(input: &str) -> Normalized {
    let replaced = replace_glyphs(input);
    let (left, target) = split_target(&replaced);

    Normalized {
        expr: canonicalize(left),
        target: target.map(canonicalize),
    }
}

/// Replace Unicode arithmetic glyphs and the natural-language `to` with
/// their canonical spellings.
fn replace_glyphs(input: &str) -> String {
    let s = input
        .replace('×', "*")
        .replace('·', "*")
        .replace('÷', "/")
        .replace('→', "->");

    // Word-level pass: a standalone `to` is the target marker.
    s.split_whitespace()
        .map(|word| {
            if word.eq_ignore_ascii_case("to") {
                "->"
            } else {
                word
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Split at the first `->`, if any.
fn split_target(input: &str) -> (&str, Option<&str>) {
    match input.split_once("->") {
        Some((left, right)) => (left, Some(right)),
        None => (input, None),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ChunkKind {
    Number,
    Ident,
    Open,
    Close,
    Op,
    Other,
}

/// Collapse whitespace and insert explicit `*` between adjacent
/// operand-like chunks.
///
/// A chunk that ends an operand (number, identifier, `)`) followed by a
/// chunk that starts one (number, identifier, `(`) implies multiplication,
/// with one exception: a known function name directly before `(` is a
/// call, not a product.
fn canonicalize(src: &str) -> String {
    let chars: Vec<char> = src.chars().collect();
    let mut out = String::with_capacity(src.len());
    let mut prev: Option<ChunkKind> = None;
    let mut prev_ident = String::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if c.is_whitespace() {
            i += 1;
            continue;
        }

        let (chunk, kind) = if c.is_ascii_digit() || c == '.' {
            scan_number(&chars, &mut i)
        } else if is_ident_start(c) {
            scan_ident(&chars, &mut i)
        } else {
            i += 1;
            let kind = match c {
                '(' => ChunkKind::Open,
                ')' => ChunkKind::Close,
                '+' | '-' | '*' | '/' | '^' | ',' => ChunkKind::Op,
                _ => ChunkKind::Other,
            };
            (c.to_string(), kind)
        };

        let starts_operand = matches!(
            kind,
            ChunkKind::Number | ChunkKind::Ident | ChunkKind::Open
        );
        let ends_operand = matches!(
            prev,
            Some(ChunkKind::Number) | Some(ChunkKind::Ident) | Some(ChunkKind::Close)
        );
        if starts_operand && ends_operand {
            let is_call = kind == ChunkKind::Open
                && prev == Some(ChunkKind::Ident)
                && lookup_function(&prev_ident).is_some();
            if !is_call {
                out.push('*');
            }
        }

        if kind == ChunkKind::Ident {
            prev_ident.clear();
            prev_ident.push_str(&chunk);
        }
        out.push_str(&chunk);
        prev = Some(kind);
    }

    out
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || matches!(c, '°' | 'µ' | 'μ' | 'Ω' | 'Δ' | '_')
}

fn is_ident_continue(c: char) -> bool {
    is_ident_start(c) || c.is_ascii_digit()
}

/// Consume a number chunk: digits and dots, then an exponent suffix if and
/// only if it is complete (`e`/`E`, optional sign, at least one digit).
fn scan_number(chars: &[char], i: &mut usize) -> (String, ChunkKind) {
    let mut chunk = String::new();
    while *i < chars.len() && (chars[*i].is_ascii_digit() || chars[*i] == '.') {
        chunk.push(chars[*i]);
        *i += 1;
    }

    if *i < chars.len() && matches!(chars[*i], 'e' | 'E') {
        let mut j = *i + 1;
        if j < chars.len() && matches!(chars[j], '+' | '-') {
            j += 1;
        }
        if j < chars.len() && chars[j].is_ascii_digit() {
            while *i < j {
                chunk.push(chars[*i]);
                *i += 1;
            }
            while *i < chars.len() && chars[*i].is_ascii_digit() {
                chunk.push(chars[*i]);
                *i += 1;
            }
        }
    }

    (chunk, ChunkKind::Number)
}

fn scan_ident(chars: &[char], i: &mut usize) -> (String, ChunkKind) {
    let mut chunk = String::new();
    while *i < chars.len() && is_ident_continue(chars[*i]) {
        chunk.push(chars[*i]);
        *i += 1;
    }
    (chunk, ChunkKind::Ident)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_implicit_multiplication() {
        assert_eq!(normalize("2m").expr, "2*m");
        assert_eq!(normalize("3(4)").expr, "3*(4)");
        assert_eq!(normalize("(1)(2)").expr, "(1)*(2)");
        assert_eq!(normalize("2 m 3").expr, "2*m*3");
    }

    #[test]
    fn test_glyph_replacement() {
        assert_eq!(normalize("2 × 3 ÷ 4").expr, "2*3/4");
        assert_eq!(normalize("5·m").expr, "5*m");
    }

    #[test]
    fn test_target_split() {
        let n = normalize("3.5 ft/s -> km/h");
        assert_eq!(n.expr, "3.5*ft/s");
        assert_eq!(n.target.as_deref(), Some("km/h"));

        let n = normalize("5 m to ft");
        assert_eq!(n.expr, "5*m");
        assert_eq!(n.target.as_deref(), Some("ft"));

        let n = normalize("100 °C → °F");
        assert_eq!(n.target.as_deref(), Some("°F"));
    }

    #[test]
    fn test_no_target() {
        let n = normalize("2 + 2");
        assert_eq!(n.expr, "2+2");
        assert_eq!(n.target, None);
    }

    #[test]
    fn test_function_call_not_multiplied() {
        assert_eq!(normalize("sin(2)").expr, "sin(2)");
        assert_eq!(normalize("2 sin(3)").expr, "2*sin(3)");
        // Unknown identifiers before `(` are products, not calls.
        assert_eq!(normalize("m(2)").expr, "m*(2)");
    }

    #[test]
    fn test_scientific_notation_preserved() {
        assert_eq!(normalize("1.5e-3 m").expr, "1.5e-3*m");
        assert_eq!(normalize("2e3").expr, "2e3");
        // A bare `e` after digits is the constant, not an exponent.
        assert_eq!(normalize("2e").expr, "2*e");
    }

    #[test]
    fn test_idempotent() {
        for input in [
            "3.5 ft/s",
            "2m",
            "sin(2*pi)",
            "1.5e-3 m^2",
            "(2+3)(4+5)",
            "32 °F",
        ] {
            let once = normalize(input).expr;
            let twice = normalize(&once).expr;
            assert_eq!(once, twice, "normalization of {input:?} not idempotent");
        }
    }

    #[test]
    fn test_total_on_junk() {
        // Unknown characters pass through; later stages reject them.
        assert_eq!(normalize("2 # 3").expr, "2#3");
    }
}
