//! The Quantity Type: Numeric Value with a Runtime Dimension
//!
//! `Quantity` is the transient value the postfix evaluator pushes and pops:
//! an SI-coherent numeric value paired with its dimension vector. It has no
//! persistent identity; one evaluation call creates and discards all of them.

use super::dimension::Dimension;

/// A numeric value in SI-coherent units plus its dimension vector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quantity {
    pub value: f64,
    pub dim: Dimension,
}

impl Quantity {
    pub fn new(value: f64, dim: Dimension) -> Self {
        Self { value, dim }
    }

    /// A pure number (all-zero dimension vector).
    pub fn dimensionless(value: f64) -> Self {
        Self {
            value,
            dim: Dimension::DIMENSIONLESS,
        }
    }

    /// Multiply quantities: values multiply, dimension exponents add.
    pub fn mul(&self, other: &Quantity) -> Quantity {
        Quantity {
            value: self.value * other.value,
            dim: self.dim.mul(&other.dim),
        }
    }

    /// Divide quantities: values divide, dimension exponents subtract.
    pub fn div(&self, other: &Quantity) -> Quantity {
        Quantity {
            value: self.value / other.value,
            dim: self.dim.div(&other.dim),
        }
    }

    /// Raise to a dimensionless power: value is exponentiated, dimension
    /// exponents are scaled. The caller must have checked that the exponent
    /// quantity itself is dimensionless.
    pub fn powf(&self, exponent: f64) -> Quantity {
        Quantity {
            value: self.value.powf(exponent),
            dim: self.dim.pow(exponent),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mul_div() {
        let distance = Quantity::new(10.0, Dimension::LENGTH);
        let time = Quantity::new(2.0, Dimension::TIME);

        let velocity = distance.div(&time);
        assert_eq!(velocity.value, 5.0);
        assert!(velocity.dim.approx_eq(&Dimension::VELOCITY));

        let back = velocity.mul(&time);
        assert_eq!(back.value, 10.0);
        assert!(back.dim.approx_eq(&Dimension::LENGTH));
    }

    #[test]
    fn test_powf() {
        let side = Quantity::new(3.0, Dimension::LENGTH);
        let area = side.powf(2.0);
        assert_eq!(area.value, 9.0);
        assert!(area.dim.approx_eq(&Dimension::AREA));
    }
}
