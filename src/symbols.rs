//! Symbol Table: Functions and Constants
//!
//! The tokenizer/shunting-yard core is parameterized by this table rather
//! than hard-coding names into the parser. Functions are pure numeric
//! implementations with a fixed arity; there is no dynamic code execution
//! anywhere in the engine.

/// A named pure function over dimensionless values.
pub struct Function {
    pub name: &'static str,
    pub arity: usize,
    pub apply: fn(&[f64]) -> f64,
}

/// All callable functions.
pub static FUNCTIONS: &[Function] = &[
    Function { name: "sin", arity: 1, apply: |a| a[0].sin() },
    Function { name: "cos", arity: 1, apply: |a| a[0].cos() },
    Function { name: "tan", arity: 1, apply: |a| a[0].tan() },
    Function { name: "asin", arity: 1, apply: |a| a[0].asin() },
    Function { name: "acos", arity: 1, apply: |a| a[0].acos() },
    Function { name: "atan", arity: 1, apply: |a| a[0].atan() },
    Function { name: "sqrt", arity: 1, apply: |a| a[0].sqrt() },
    Function { name: "cbrt", arity: 1, apply: |a| a[0].cbrt() },
    Function { name: "ln", arity: 1, apply: |a| a[0].ln() },
    Function { name: "log", arity: 1, apply: |a| a[0].log10() },
    Function { name: "log2", arity: 1, apply: |a| a[0].log2() },
    Function { name: "exp", arity: 1, apply: |a| a[0].exp() },
    Function { name: "abs", arity: 1, apply: |a| a[0].abs() },
    Function { name: "floor", arity: 1, apply: |a| a[0].floor() },
    Function { name: "ceil", arity: 1, apply: |a| a[0].ceil() },
    Function { name: "round", arity: 1, apply: |a| a[0].round() },
    Function { name: "atan2", arity: 2, apply: |a| a[0].atan2(a[1]) },
    Function { name: "min", arity: 2, apply: |a| a[0].min(a[1]) },
    Function { name: "max", arity: 2, apply: |a| a[0].max(a[1]) },
];

/// Named mathematical constants.
pub static CONSTANTS: &[(&str, f64)] = &[
    ("pi", std::f64::consts::PI),
    ("tau", std::f64::consts::TAU),
    ("e", std::f64::consts::E),
];

/// Case-insensitive function lookup.
pub fn lookup_function(name: &str) -> Option<&'static Function> {
    FUNCTIONS.iter().find(|f| f.name.eq_ignore_ascii_case(name))
}

/// Case-insensitive constant lookup.
pub fn lookup_constant(name: &str) -> Option<f64> {
    CONSTANTS
        .iter()
        .find(|(n, _)| n.eq_ignore_ascii_case(name))
        .map(|(_, v)| *v)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        assert!(lookup_function("sqrt").is_some());
        assert!(lookup_function("SIN").is_some());
        assert!(lookup_function("nope").is_none());

        assert_eq!(lookup_constant("pi"), Some(std::f64::consts::PI));
        assert_eq!(lookup_constant("E"), Some(std::f64::consts::E));
        assert_eq!(lookup_constant("phi"), None);
    }

    #[test]
    fn test_arity_two() {
        let atan2 = lookup_function("atan2").unwrap();
        assert_eq!(atan2.arity, 2);
        assert!(((atan2.apply)(&[1.0, 1.0]) - std::f64::consts::FRAC_PI_4).abs() < 1e-12);
    }
}
