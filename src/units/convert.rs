//! Affine Temperature Conversion
//!
//! Absolute temperature scales (°C, °F) need an additive offset on top of
//! the linear `to_si` factor, so they bypass the evaluator's multiplicative
//! path: a value goes to kelvin through `to_kelvin`, then to the target
//! scale through `from_kelvin`.

use super::catalog::UnitDef;

/// Value on an absolute scale -> kelvin.
pub fn to_kelvin(value: f64, unit: &UnitDef) -> f64 {
    value * unit.to_si + unit.affine_offset
}

/// Kelvin -> value on an absolute scale.
pub fn from_kelvin(kelvin: f64, unit: &UnitDef) -> f64 {
    (kelvin - unit.affine_offset) / unit.to_si
}

/// Direct conversion between two named absolute scales.
///
/// Uses the textbook formulas instead of routing through kelvin, so exact
/// anchor points stay exact (`32 °F` is `0 °C`, not `2.8e-14 °C`).
pub fn between_scales(value: f64, from: &UnitDef, to: &UnitDef) -> f64 {
    match (from.symbol, to.symbol) {
        (a, b) if a == b => value,
        ("°C", "°F") => value * 9.0 / 5.0 + 32.0,
        ("°F", "°C") => (value - 32.0) * 5.0 / 9.0,
        _ => from_kelvin(to_kelvin(value, from), to),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::catalog::resolve;

    #[test]
    fn test_celsius_kelvin() {
        let c = resolve("°C").unwrap().def;
        assert!((to_kelvin(0.0, c) - 273.15).abs() < 1e-9);
        assert!((to_kelvin(100.0, c) - 373.15).abs() < 1e-9);
        assert!((from_kelvin(273.15, c)).abs() < 1e-9);
    }

    #[test]
    fn test_fahrenheit_celsius() {
        let f = resolve("°F").unwrap().def;
        let c = resolve("°C").unwrap().def;

        // 32 °F = 0 °C
        assert!(from_kelvin(to_kelvin(32.0, f), c).abs() < 1e-9);
        // 212 °F = 100 °C
        assert!((from_kelvin(to_kelvin(212.0, f), c) - 100.0).abs() < 1e-9);
        // -40 is the crossing point
        assert!((from_kelvin(to_kelvin(-40.0, f), c) + 40.0).abs() < 1e-9);
    }

    #[test]
    fn test_between_scales_exact() {
        let f = resolve("°F").unwrap().def;
        let c = resolve("°C").unwrap().def;

        assert_eq!(between_scales(32.0, f, c), 0.0);
        assert_eq!(between_scales(0.0, c, f), 32.0);
        assert_eq!(between_scales(100.0, c, c), 100.0);
    }

    #[test]
    fn test_round_trip() {
        let f = resolve("°F").unwrap().def;
        let v = 98.6;
        assert!((from_kelvin(to_kelvin(v, f), f) - v).abs() < 1e-9);
    }
}
