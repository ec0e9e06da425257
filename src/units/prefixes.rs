//! SI Metric Prefixes
//!
//! Ordered longest-symbol-first so that prefix stripping tries `da` before
//! `d`; the three spellings of micro (`µ`, `μ`, `u`) share one multiplier.
//! Prefix matching is case-sensitive (`m` is milli, `M` is mega).

/// A metric prefix symbol and its multiplier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prefix {
    pub symbol: &'static str,
    pub multiplier: f64,
}

/// All recognized prefixes, yotta down to femto.
///
/// Order matters: callers iterate front-to-back, so multi-character symbols
/// must precede their single-character prefixes.
pub static PREFIXES: &[Prefix] = &[
    Prefix { symbol: "da", multiplier: 1e1 },
    Prefix { symbol: "Y", multiplier: 1e24 },
    Prefix { symbol: "Z", multiplier: 1e21 },
    Prefix { symbol: "E", multiplier: 1e18 },
    Prefix { symbol: "P", multiplier: 1e15 },
    Prefix { symbol: "T", multiplier: 1e12 },
    Prefix { symbol: "G", multiplier: 1e9 },
    Prefix { symbol: "M", multiplier: 1e6 },
    Prefix { symbol: "k", multiplier: 1e3 },
    Prefix { symbol: "h", multiplier: 1e2 },
    Prefix { symbol: "d", multiplier: 1e-1 },
    Prefix { symbol: "c", multiplier: 1e-2 },
    Prefix { symbol: "m", multiplier: 1e-3 },
    Prefix { symbol: "µ", multiplier: 1e-6 },
    Prefix { symbol: "μ", multiplier: 1e-6 },
    Prefix { symbol: "u", multiplier: 1e-6 },
    Prefix { symbol: "n", multiplier: 1e-9 },
    Prefix { symbol: "p", multiplier: 1e-12 },
    Prefix { symbol: "f", multiplier: 1e-15 },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deka_before_deci() {
        let da_pos = PREFIXES.iter().position(|p| p.symbol == "da").unwrap();
        let d_pos = PREFIXES.iter().position(|p| p.symbol == "d").unwrap();
        assert!(da_pos < d_pos);
    }

    #[test]
    fn test_micro_spellings() {
        for symbol in ["µ", "μ", "u"] {
            let p = PREFIXES.iter().find(|p| p.symbol == symbol).unwrap();
            assert_eq!(p.multiplier, 1e-6);
        }
    }

    #[test]
    fn test_multi_char_symbols_first() {
        // Front-to-back matching must never shadow a longer symbol.
        for (i, p) in PREFIXES.iter().enumerate() {
            for q in &PREFIXES[i + 1..] {
                assert!(
                    !q.symbol.starts_with(p.symbol) || p.symbol == q.symbol,
                    "{} shadows {}",
                    p.symbol,
                    q.symbol
                );
            }
        }
    }
}
