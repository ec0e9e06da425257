//! Units of Measure
//!
//! Runtime dimensional analysis for the expression engine: the 7-component
//! SI dimension vector, the transient `Quantity` value type, the static
//! unit catalog with metric-prefix resolution, and affine temperature
//! conversion.

pub mod catalog;
pub mod convert;
pub mod dimension;
pub mod prefixes;
pub mod quantity;

pub use catalog::{resolve, ResolvedUnit, TemperatureKind, UnitDef, UNITS};
pub use dimension::Dimension;
pub use prefixes::{Prefix, PREFIXES};
pub use quantity::Quantity;
