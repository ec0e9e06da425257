//! Dimensional analysis over the 7 SI base quantities
//!
//! Every quantity flowing through the evaluator carries a dimension vector:
//! the exponents of length, mass, time, electric current, thermodynamic
//! temperature, amount of substance and luminous intensity.
//!
//! Exponents are `f64` because `^` may raise a unit to a fractional power
//! (`m^0.5`); equality is therefore checked within a tolerance rather than
//! bit-for-bit.

use std::fmt;

/// Per-component tolerance for dimension equality.
pub const DIM_EPSILON: f64 = 1e-12;

/// Exponents of the 7 SI base quantities.
///
/// Derived dimensions are products of powers:
/// - Velocity = L T⁻¹
/// - Force = M L T⁻²
/// - Pressure = M L⁻¹ T⁻²
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Dimension {
    /// Length exponent [L] - meter
    pub length: f64,
    /// Mass exponent [M] - kilogram
    pub mass: f64,
    /// Time exponent [T] - second
    pub time: f64,
    /// Electric current exponent [I] - ampere
    pub current: f64,
    /// Temperature exponent [Θ] - kelvin
    pub temperature: f64,
    /// Amount of substance exponent [N] - mole
    pub amount: f64,
    /// Luminous intensity exponent [J] - candela
    pub luminosity: f64,
}

impl Dimension {
    // ==========================================================================
    // Base Dimensions
    // ==========================================================================

    /// Dimensionless (pure number)
    pub const DIMENSIONLESS: Self = Self::new(0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0);

    /// Length [L] - meter
    pub const LENGTH: Self = Self::new(1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0);

    /// Mass [M] - kilogram
    pub const MASS: Self = Self::new(0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0);

    /// Time [T] - second
    pub const TIME: Self = Self::new(0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0);

    /// Electric current [I] - ampere
    pub const CURRENT: Self = Self::new(0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0);

    /// Temperature [Θ] - kelvin
    pub const TEMPERATURE: Self = Self::new(0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0);

    /// Amount of substance [N] - mole
    pub const AMOUNT: Self = Self::new(0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0);

    /// Luminous intensity [J] - candela
    pub const LUMINOSITY: Self = Self::new(0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0);

    // ==========================================================================
    // Common Derived Dimensions
    // ==========================================================================

    /// Area [L²]
    pub const AREA: Self = Self::new(2.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0);

    /// Volume [L³]
    pub const VOLUME: Self = Self::new(3.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0);

    /// Velocity [L T⁻¹]
    pub const VELOCITY: Self = Self::new(1.0, 0.0, -1.0, 0.0, 0.0, 0.0, 0.0);

    /// Acceleration [L T⁻²]
    pub const ACCELERATION: Self = Self::new(1.0, 0.0, -2.0, 0.0, 0.0, 0.0, 0.0);

    /// Force [M L T⁻²] - newton
    pub const FORCE: Self = Self::new(1.0, 1.0, -2.0, 0.0, 0.0, 0.0, 0.0);

    /// Energy [M L² T⁻²] - joule
    pub const ENERGY: Self = Self::new(2.0, 1.0, -2.0, 0.0, 0.0, 0.0, 0.0);

    /// Power [M L² T⁻³] - watt
    pub const POWER: Self = Self::new(2.0, 1.0, -3.0, 0.0, 0.0, 0.0, 0.0);

    /// Pressure [M L⁻¹ T⁻²] - pascal
    pub const PRESSURE: Self = Self::new(-1.0, 1.0, -2.0, 0.0, 0.0, 0.0, 0.0);

    /// Frequency [T⁻¹] - hertz
    pub const FREQUENCY: Self = Self::new(0.0, 0.0, -1.0, 0.0, 0.0, 0.0, 0.0);

    /// Electric charge [I T] - coulomb
    pub const CHARGE: Self = Self::new(0.0, 0.0, 1.0, 1.0, 0.0, 0.0, 0.0);

    /// Voltage [M L² T⁻³ I⁻¹] - volt
    pub const VOLTAGE: Self = Self::new(2.0, 1.0, -3.0, -1.0, 0.0, 0.0, 0.0);

    /// Resistance [M L² T⁻³ I⁻²] - ohm
    pub const RESISTANCE: Self = Self::new(2.0, 1.0, -3.0, -2.0, 0.0, 0.0, 0.0);

    // ==========================================================================
    // Constructor
    // ==========================================================================

    /// Create a new dimension with given exponents
    pub const fn new(
        length: f64,
        mass: f64,
        time: f64,
        current: f64,
        temperature: f64,
        amount: f64,
        luminosity: f64,
    ) -> Self {
        Self {
            length,
            mass,
            time,
            current,
            temperature,
            amount,
            luminosity,
        }
    }

    // ==========================================================================
    // Operations
    // ==========================================================================

    /// Multiply dimensions (add exponents)
    ///
    /// Used when multiplying quantities: [A] × [B] = [A × B]
    pub fn mul(&self, other: &Dimension) -> Dimension {
        Dimension {
            length: self.length + other.length,
            mass: self.mass + other.mass,
            time: self.time + other.time,
            current: self.current + other.current,
            temperature: self.temperature + other.temperature,
            amount: self.amount + other.amount,
            luminosity: self.luminosity + other.luminosity,
        }
    }

    /// Divide dimensions (subtract exponents)
    ///
    /// Used when dividing quantities: [A] / [B] = [A / B]
    pub fn div(&self, other: &Dimension) -> Dimension {
        Dimension {
            length: self.length - other.length,
            mass: self.mass - other.mass,
            time: self.time - other.time,
            current: self.current - other.current,
            temperature: self.temperature - other.temperature,
            amount: self.amount - other.amount,
            luminosity: self.luminosity - other.luminosity,
        }
    }

    /// Reciprocal (negate all exponents)
    ///
    /// [1/A] = [A]⁻¹
    pub fn recip(&self) -> Dimension {
        self.pow(-1.0)
    }

    /// Raise to a power (scale all exponents)
    ///
    /// [A]ⁿ - `n` may be fractional, e.g. a square root halves the exponents.
    pub fn pow(&self, n: f64) -> Dimension {
        Dimension {
            length: self.length * n,
            mass: self.mass * n,
            time: self.time * n,
            current: self.current * n,
            temperature: self.temperature * n,
            amount: self.amount * n,
            luminosity: self.luminosity * n,
        }
    }

    // ==========================================================================
    // Predicates
    // ==========================================================================

    /// Check if dimensionless (all exponents zero within tolerance)
    pub fn is_dimensionless(&self) -> bool {
        self.approx_eq(&Self::DIMENSIONLESS)
    }

    /// Check equality within `DIM_EPSILON` per component
    pub fn approx_eq(&self, other: &Dimension) -> bool {
        (self.length - other.length).abs() <= DIM_EPSILON
            && (self.mass - other.mass).abs() <= DIM_EPSILON
            && (self.time - other.time).abs() <= DIM_EPSILON
            && (self.current - other.current).abs() <= DIM_EPSILON
            && (self.temperature - other.temperature).abs() <= DIM_EPSILON
            && (self.amount - other.amount).abs() <= DIM_EPSILON
            && (self.luminosity - other.luminosity).abs() <= DIM_EPSILON
    }
}

/// Format one exponent as a `^n` suffix, omitting `^1`.
fn exponent_suffix(e: f64) -> String {
    if (e - 1.0).abs() <= DIM_EPSILON {
        String::new()
    } else if (e - e.round()).abs() <= 1e-9 {
        format!("^{}", e.round() as i64)
    } else {
        format!("^{}", e)
    }
}

impl fmt::Display for Dimension {
    /// Human-readable SI-symbol signature, e.g. `m·s^-1` or `kg·m^-1·s^-2`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_dimensionless() {
            return write!(f, "1");
        }

        let components = [
            ("kg", self.mass),
            ("m", self.length),
            ("s", self.time),
            ("A", self.current),
            ("K", self.temperature),
            ("mol", self.amount),
            ("cd", self.luminosity),
        ];

        let mut parts: Vec<String> = Vec::new();
        for (symbol, exp) in components {
            if exp.abs() > DIM_EPSILON {
                parts.push(format!("{}{}", symbol, exponent_suffix(exp)));
            }
        }

        write!(f, "{}", parts.join("·"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimension_mul() {
        // Force = Mass × Acceleration = M × L T⁻² = M L T⁻²
        let force = Dimension::MASS.mul(&Dimension::ACCELERATION);
        assert!(force.approx_eq(&Dimension::FORCE));
    }

    #[test]
    fn test_dimension_div() {
        // Velocity = Length / Time = L / T = L T⁻¹
        let velocity = Dimension::LENGTH.div(&Dimension::TIME);
        assert!(velocity.approx_eq(&Dimension::VELOCITY));
    }

    #[test]
    fn test_pow() {
        // L³ = L^3
        let volume = Dimension::LENGTH.pow(3.0);
        assert!(volume.approx_eq(&Dimension::VOLUME));

        // Fractional: sqrt(L²) = L
        let length = Dimension::AREA.pow(0.5);
        assert!(length.approx_eq(&Dimension::LENGTH));
    }

    #[test]
    fn test_recip() {
        // 1/T = T⁻¹ = Frequency
        let freq = Dimension::TIME.recip();
        assert!(freq.approx_eq(&Dimension::FREQUENCY));
    }

    #[test]
    fn test_dimensionless() {
        assert!(Dimension::DIMENSIONLESS.is_dimensionless());
        assert!(!Dimension::MASS.is_dimensionless());

        // Cancellation yields dimensionless
        let ratio = Dimension::MASS.div(&Dimension::MASS);
        assert!(ratio.is_dimensionless());
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Dimension::VELOCITY), "m·s^-1");
        assert_eq!(format!("{}", Dimension::FORCE), "kg·m·s^-2");
        assert_eq!(format!("{}", Dimension::PRESSURE), "kg·m^-1·s^-2");
        assert_eq!(format!("{}", Dimension::DIMENSIONLESS), "1");
    }

    #[test]
    fn test_tolerance() {
        let almost = Dimension::new(1.0 + 1e-13, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0);
        assert!(almost.approx_eq(&Dimension::LENGTH));

        let off = Dimension::new(1.0 + 1e-9, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0);
        assert!(!off.approx_eq(&Dimension::LENGTH));
    }
}
