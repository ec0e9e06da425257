//! ucalc: a unit-aware expression engine
//!
//! A hand-rolled tokenizer, shunting-yard infix-to-postfix converter and
//! dimensioned postfix evaluator: expressions mix numbers, units, metric
//! prefixes, functions and constants, and results come back in an explicit
//! target unit (`-> km/h`) or an automatically chosen human-friendly one.
//!
//! The pipeline is synchronous and pure: a call takes a string and returns
//! a formatted result or a diagnostic error, with no state shared between
//! calls beyond the static unit/prefix/function tables. It is safe to call
//! from multiple threads.
//!
//! # Example
//!
//! ```
//! let result = ucalc::evaluate("3.5 ft/s -> km/h").unwrap();
//! assert_eq!(result.value, "3.84048");
//! assert_eq!(result.unit, "km/h");
//! ```

pub mod common;
pub mod error;
pub mod eval;
pub mod format;
pub mod history;
pub mod lexer;
pub mod normalize;
pub mod parser;
pub mod symbols;
pub mod units;

pub use error::EvalError;
pub use eval::{evaluate, strip_units, Evaluation, UnitComposition};
pub use history::{History, HistoryEntry};
pub use normalize::{normalize, Normalized};
pub use units::{Dimension, Quantity};
