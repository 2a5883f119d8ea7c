// Numeric literal extraction and unit canonicalization for raw spec strings.
// Pure functions over static rule data: safe to call from any thread.

pub mod canonicalizer;
pub mod error;
pub mod extractor;
pub mod rules;
pub mod types;

pub use canonicalizer::{canonicalize, try_canonicalize};
pub use error::ConversionError;
pub use extractor::extract_number;
pub use rules::{rule_for, rules, variables, ConversionRule, UnitPolicy, UnitToken};
pub use types::{CanonicalNumber, CanonicalValue, NumberKind};
