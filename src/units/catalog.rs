//! Unit Catalog and Lookup
//!
//! The static table of known units plus the resolution algorithm: exact
//! case-insensitive alias match first, then metric-prefix stripping for
//! units flagged `allows_prefix` (trying longer prefix symbols before
//! shorter ones). `to_si` converts one unit into the SI-coherent unit of
//! the same dimension by multiplication only; absolute temperature scales
//! additionally carry a kelvin offset and are special-cased by the
//! evaluator's affine conversion path.

use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;

use super::dimension::Dimension;
use super::prefixes::PREFIXES;

/// How a unit relates to temperature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemperatureKind {
    /// Not a temperature unit, or kelvin (linear, safe in arithmetic).
    None,
    /// An absolute scale with an offset (°C, °F). Forbidden in arithmetic.
    Absolute,
    /// A temperature difference (deltaC, deltaF). Linear, safe in arithmetic.
    Delta,
}

/// One entry in the unit table.
#[derive(Debug)]
pub struct UnitDef {
    /// All accepted spellings, matched case-insensitively.
    pub aliases: &'static [&'static str],
    /// Canonical display symbol.
    pub symbol: &'static str,
    pub dimension: Dimension,
    /// Multiplicative factor into the SI-coherent unit of this dimension.
    pub to_si: f64,
    /// Whether metric prefixes (k, m, µ, ...) may be attached.
    pub allows_prefix: bool,
    pub temperature: TemperatureKind,
    /// Kelvin offset for absolute scales: K = value * to_si + affine_offset.
    pub affine_offset: f64,
}

impl UnitDef {
    const fn linear(
        aliases: &'static [&'static str],
        symbol: &'static str,
        dimension: Dimension,
        to_si: f64,
        allows_prefix: bool,
    ) -> Self {
        Self {
            aliases,
            symbol,
            dimension,
            to_si,
            allows_prefix,
            temperature: TemperatureKind::None,
            affine_offset: 0.0,
        }
    }

    const fn temperature(
        aliases: &'static [&'static str],
        symbol: &'static str,
        to_si: f64,
        kind: TemperatureKind,
        affine_offset: f64,
    ) -> Self {
        Self {
            aliases,
            symbol,
            dimension: Dimension::TEMPERATURE,
            to_si,
            allows_prefix: false,
            temperature: kind,
            affine_offset,
        }
    }
}

/// All known units.
pub static UNITS: &[UnitDef] = &[
    // Length
    UnitDef::linear(&["m", "meter", "meters", "metre", "metres"], "m", Dimension::LENGTH, 1.0, true),
    UnitDef::linear(&["in", "inch", "inches"], "in", Dimension::LENGTH, 0.0254, false),
    UnitDef::linear(&["ft", "foot", "feet"], "ft", Dimension::LENGTH, 0.3048, false),
    UnitDef::linear(&["yd", "yard", "yards"], "yd", Dimension::LENGTH, 0.9144, false),
    UnitDef::linear(&["mi", "mile", "miles"], "mi", Dimension::LENGTH, 1609.344, false),
    UnitDef::linear(&["nmi"], "nmi", Dimension::LENGTH, 1852.0, false),
    // Mass (SI-coherent base is the kilogram; gram scales accordingly)
    UnitDef::linear(&["kg", "kilogram", "kilograms"], "kg", Dimension::MASS, 1.0, false),
    UnitDef::linear(&["g", "gram", "grams"], "g", Dimension::MASS, 1e-3, true),
    UnitDef::linear(&["t", "tonne", "tonnes"], "t", Dimension::MASS, 1e3, false),
    UnitDef::linear(&["lb", "lbs", "pound", "pounds"], "lb", Dimension::MASS, 0.45359237, false),
    UnitDef::linear(&["oz", "ounce", "ounces"], "oz", Dimension::MASS, 0.028349523125, false),
    // Time
    UnitDef::linear(&["s", "sec", "second", "seconds"], "s", Dimension::TIME, 1.0, true),
    UnitDef::linear(&["min", "minute", "minutes"], "min", Dimension::TIME, 60.0, false),
    UnitDef::linear(&["h", "hr", "hour", "hours"], "h", Dimension::TIME, 3600.0, false),
    UnitDef::linear(&["day", "days"], "day", Dimension::TIME, 86400.0, false),
    UnitDef::linear(&["week", "weeks"], "week", Dimension::TIME, 604800.0, false),
    // Electric current
    UnitDef::linear(&["A", "amp", "amps", "ampere", "amperes"], "A", Dimension::CURRENT, 1.0, true),
    // Temperature. Kelvin is linear; °C/°F are absolute affine scales;
    // deltaC/deltaF are plain differences.
    UnitDef::linear(&["K", "kelvin"], "K", Dimension::TEMPERATURE, 1.0, true),
    UnitDef::temperature(
        &["°C", "degC", "celsius"],
        "°C",
        1.0,
        TemperatureKind::Absolute,
        273.15,
    ),
    UnitDef::temperature(
        &["°F", "degF", "fahrenheit"],
        "°F",
        5.0 / 9.0,
        TemperatureKind::Absolute,
        // 0 °F = 459.67 °F-degrees below freezing-of-brine... in kelvin:
        // K = (F + 459.67) * 5/9 = F * 5/9 + 255.372...
        255.37222222222223,
    ),
    UnitDef::temperature(&["deltaC", "ΔC"], "deltaC", 1.0, TemperatureKind::Delta, 0.0),
    UnitDef::temperature(&["deltaF", "ΔF"], "deltaF", 5.0 / 9.0, TemperatureKind::Delta, 0.0),
    // Amount of substance
    UnitDef::linear(&["mol", "mole", "moles"], "mol", Dimension::AMOUNT, 1.0, true),
    // Luminous intensity
    UnitDef::linear(&["cd", "candela"], "cd", Dimension::LUMINOSITY, 1.0, true),
    // Volume
    UnitDef::linear(&["L", "l", "liter", "liters", "litre", "litres"], "L", Dimension::VOLUME, 1e-3, true),
    UnitDef::linear(&["gal", "gallon", "gallons"], "gal", Dimension::VOLUME, 3.785411784e-3, false),
    // Area
    UnitDef::linear(&["ha", "hectare", "hectares"], "ha", Dimension::AREA, 1e4, false),
    UnitDef::linear(&["acre", "acres"], "acre", Dimension::AREA, 4046.8564224, false),
    // Velocity
    UnitDef::linear(&["mph"], "mph", Dimension::VELOCITY, 0.44704, false),
    // No `kn` alias: it would shadow `kN` (kilonewton) under
    // case-insensitive matching.
    UnitDef::linear(&["knot", "knots"], "knot", Dimension::VELOCITY, 1852.0 / 3600.0, false),
    // Frequency
    UnitDef::linear(&["Hz", "hertz"], "Hz", Dimension::FREQUENCY, 1.0, true),
    // Force
    UnitDef::linear(&["N", "newton", "newtons"], "N", Dimension::FORCE, 1.0, true),
    // Pressure
    UnitDef::linear(&["Pa", "pascal", "pascals"], "Pa", Dimension::PRESSURE, 1.0, true),
    UnitDef::linear(&["bar"], "bar", Dimension::PRESSURE, 1e5, true),
    UnitDef::linear(&["atm", "atmosphere", "atmospheres"], "atm", Dimension::PRESSURE, 101325.0, false),
    UnitDef::linear(&["psi"], "psi", Dimension::PRESSURE, 6894.757293168, false),
    UnitDef::linear(&["mmHg", "torr"], "mmHg", Dimension::PRESSURE, 133.322387415, false),
    // Energy
    UnitDef::linear(&["J", "joule", "joules"], "J", Dimension::ENERGY, 1.0, true),
    UnitDef::linear(&["cal", "calorie", "calories"], "cal", Dimension::ENERGY, 4.184, true),
    UnitDef::linear(&["Wh"], "Wh", Dimension::ENERGY, 3600.0, true),
    UnitDef::linear(&["eV"], "eV", Dimension::ENERGY, 1.602176634e-19, true),
    // Power
    UnitDef::linear(&["W", "watt", "watts"], "W", Dimension::POWER, 1.0, true),
    UnitDef::linear(&["hp", "horsepower"], "hp", Dimension::POWER, 745.6998715822702, false),
    // Electromagnetism
    UnitDef::linear(&["C", "coulomb", "coulombs"], "C", Dimension::CHARGE, 1.0, true),
    UnitDef::linear(&["V", "volt", "volts"], "V", Dimension::VOLTAGE, 1.0, true),
    UnitDef::linear(&["Ω", "ohm", "ohms"], "Ω", Dimension::RESISTANCE, 1.0, true),
    // Angle (dimensionless by SI convention)
    UnitDef::linear(&["rad", "radian", "radians"], "rad", Dimension::DIMENSIONLESS, 1.0, false),
    UnitDef::linear(&["deg", "°", "degree", "degrees"], "°", Dimension::DIMENSIONLESS, std::f64::consts::PI / 180.0, false),
];

/// Case-folded alias -> index into `UNITS`.
static ALIAS_INDEX: Lazy<FxHashMap<String, usize>> = Lazy::new(|| {
    let mut index = FxHashMap::default();
    for (i, unit) in UNITS.iter().enumerate() {
        for alias in unit.aliases {
            index.insert(alias.to_lowercase(), i);
        }
    }
    index
});

/// A successful unit lookup: the matched definition and its effective
/// SI factor (the unit's `to_si` times any metric-prefix multiplier).
#[derive(Debug, Clone, Copy)]
pub struct ResolvedUnit {
    pub def: &'static UnitDef,
    pub factor: f64,
}

/// Resolve an identifier against the unit table.
///
/// Exact case-insensitive alias match wins; only when that fails is
/// metric-prefix stripping attempted, front-to-back through the prefix
/// table (longest symbols first) against prefixable units. Prefix symbols
/// themselves match case-sensitively.
pub fn resolve(name: &str) -> Option<ResolvedUnit> {
    if let Some(&i) = ALIAS_INDEX.get(&name.to_lowercase()) {
        let def = &UNITS[i];
        return Some(ResolvedUnit {
            def,
            factor: def.to_si,
        });
    }

    for prefix in PREFIXES {
        if let Some(rest) = name.strip_prefix(prefix.symbol) {
            if rest.is_empty() {
                continue;
            }
            if let Some(&i) = ALIAS_INDEX.get(&rest.to_lowercase()) {
                let def = &UNITS[i];
                if def.allows_prefix {
                    return Some(ResolvedUnit {
                        def,
                        factor: def.to_si * prefix.multiplier,
                    });
                }
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match() {
        let m = resolve("m").unwrap();
        assert!(m.def.dimension.approx_eq(&Dimension::LENGTH));
        assert_eq!(m.factor, 1.0);

        // Case-insensitive
        let ft = resolve("FT").unwrap();
        assert_eq!(ft.factor, 0.3048);
    }

    #[test]
    fn test_prefix_match() {
        let km = resolve("km").unwrap();
        assert_eq!(km.factor, 1e3);
        assert!(km.def.dimension.approx_eq(&Dimension::LENGTH));

        let kpa = resolve("kPa").unwrap();
        assert_eq!(kpa.factor, 1e3);
        assert!(kpa.def.dimension.approx_eq(&Dimension::PRESSURE));

        let ug = resolve("µg").unwrap();
        assert!((ug.factor - 1e-9).abs() < 1e-24);
    }

    #[test]
    fn test_exact_beats_prefix() {
        // "min" must resolve to minutes, not milli-inch.
        let min = resolve("min").unwrap();
        assert_eq!(min.factor, 60.0);
        assert!(min.def.dimension.approx_eq(&Dimension::TIME));

        // "kg" is an exact alias even though k+g would also resolve.
        let kg = resolve("kg").unwrap();
        assert_eq!(kg.factor, 1.0);
    }

    #[test]
    fn test_deka_vs_deci() {
        // "dam" is deka+meter (10 m), not deci+anything.
        let dam = resolve("dam").unwrap();
        assert_eq!(dam.factor, 10.0);
    }

    #[test]
    fn test_prefix_requires_flag() {
        // Feet are not metric-prefixable.
        assert!(resolve("kft").is_none());
    }

    #[test]
    fn test_unknown() {
        assert!(resolve("florble").is_none());
        assert!(resolve("k").is_none());
    }

    #[test]
    fn test_temperature_kinds() {
        assert_eq!(resolve("K").unwrap().def.temperature, TemperatureKind::None);
        assert_eq!(
            resolve("°C").unwrap().def.temperature,
            TemperatureKind::Absolute
        );
        assert_eq!(
            resolve("degF").unwrap().def.temperature,
            TemperatureKind::Absolute
        );
        assert_eq!(
            resolve("deltaC").unwrap().def.temperature,
            TemperatureKind::Delta
        );
    }

    #[test]
    fn test_fahrenheit_scale() {
        let f = resolve("°F").unwrap();
        // 32 °F should land exactly at the freezing point of water.
        let kelvin = 32.0 * f.def.to_si + f.def.affine_offset;
        assert!((kelvin - 273.15).abs() < 1e-9);
    }
}
