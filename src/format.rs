//! Result Formatting and Auto-Unit Candidates
//!
//! Number rendering (6 significant digits, trailing zeros trimmed) and the
//! ranked per-dimension table the evaluator consults when no explicit
//! target unit was given: the first candidate whose magnitude lands in
//! `[0.1, 1000)` wins, otherwise the first candidate in the row.

use crate::units::Dimension;

/// Significant digits shown in results.
const DISPLAY_DIGITS: i32 = 6;

/// Render a value with `DISPLAY_DIGITS` significant digits.
pub fn format_value(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if !value.is_finite() {
        return format!("{value}");
    }

    let magnitude = value.abs().log10().floor() as i32;
    let factor = 10f64.powi(DISPLAY_DIGITS - 1 - magnitude);
    let rounded = (value * factor).round() / factor;
    format!("{rounded}")
}

/// One row of the auto-unit table: a dimension and its ranked candidates.
///
/// Candidates are unit expressions resolved through the engine's own
/// target-unit pipeline, so compound spellings like `km/h` are fine.
pub struct AutoEntry {
    pub dim: Dimension,
    pub candidates: &'static [&'static str],
}

pub static AUTO_UNITS: &[AutoEntry] = &[
    AutoEntry { dim: Dimension::LENGTH, candidates: &["m", "km", "cm", "mm", "µm", "nm"] },
    AutoEntry { dim: Dimension::MASS, candidates: &["kg", "g", "mg", "µg", "t"] },
    AutoEntry { dim: Dimension::TIME, candidates: &["s", "ms", "µs", "ns", "min", "h", "day"] },
    AutoEntry { dim: Dimension::CURRENT, candidates: &["A", "mA", "kA"] },
    AutoEntry { dim: Dimension::TEMPERATURE, candidates: &["K"] },
    AutoEntry { dim: Dimension::AMOUNT, candidates: &["mol", "mmol"] },
    AutoEntry { dim: Dimension::LUMINOSITY, candidates: &["cd"] },
    AutoEntry { dim: Dimension::AREA, candidates: &["m^2", "cm^2", "km^2", "ha"] },
    AutoEntry { dim: Dimension::VOLUME, candidates: &["m^3", "L", "mL"] },
    AutoEntry { dim: Dimension::VELOCITY, candidates: &["m/s", "km/h"] },
    AutoEntry { dim: Dimension::ACCELERATION, candidates: &["m/s^2"] },
    AutoEntry { dim: Dimension::FORCE, candidates: &["N", "kN", "mN"] },
    AutoEntry { dim: Dimension::ENERGY, candidates: &["J", "kJ", "MJ", "kWh", "eV"] },
    AutoEntry { dim: Dimension::POWER, candidates: &["W", "kW", "MW", "mW"] },
    AutoEntry { dim: Dimension::PRESSURE, candidates: &["Pa", "kPa", "MPa", "bar"] },
    AutoEntry { dim: Dimension::FREQUENCY, candidates: &["Hz", "kHz", "MHz", "GHz"] },
    AutoEntry { dim: Dimension::CHARGE, candidates: &["C", "mC"] },
    AutoEntry { dim: Dimension::VOLTAGE, candidates: &["V", "kV", "mV"] },
    AutoEntry { dim: Dimension::RESISTANCE, candidates: &["Ω", "kΩ", "MΩ"] },
];

/// Find the candidate row for a dimension.
pub fn auto_candidates(dim: &Dimension) -> Option<&'static AutoEntry> {
    AUTO_UNITS.iter().find(|entry| entry.dim.approx_eq(dim))
}

/// The highest-ranked unit spelling for a dimension, used as a hint in
/// dimension-mismatch errors.
pub fn suggested_unit(dim: &Dimension) -> Option<&'static str> {
    auto_candidates(dim).and_then(|entry| entry.candidates.first().copied())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(0.0), "0");
        assert_eq!(format_value(3.8404800000000003), "3.84048");
        assert_eq!(format_value(4.934616086109549), "4.93462");
        assert_eq!(format_value(1000.0), "1000");
        assert_eq!(format_value(0.1), "0.1");
        assert_eq!(format_value(-2.5), "-2.5");
        assert_eq!(format_value(10.0), "10");
    }

    #[test]
    fn test_auto_candidates() {
        let row = auto_candidates(&Dimension::VELOCITY).unwrap();
        assert_eq!(row.candidates[0], "m/s");

        let unknown = Dimension::new(5.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0);
        assert!(auto_candidates(&unknown).is_none());
    }

    #[test]
    fn test_suggested_unit() {
        assert_eq!(suggested_unit(&Dimension::MASS), Some("kg"));
        assert_eq!(suggested_unit(&Dimension::PRESSURE), Some("Pa"));
    }
}
