use serde::Serialize;
use std::fmt;

/// Whether a canonical value is stored as a whole number or a float
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NumberKind {
    Float,
    Integer,
}

/// Numeric value expressed in the canonical unit of its field
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CanonicalNumber {
    Float(f64),
    /// Truncated toward zero (cylinder counts, rpm values)
    Integer(i64),
}

impl CanonicalNumber {
    pub fn as_f64(&self) -> f64 {
        match self {
            CanonicalNumber::Float(v) => *v,
            CanonicalNumber::Integer(v) => *v as f64,
        }
    }
}

impl fmt::Display for CanonicalNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CanonicalNumber::Float(v) => write!(f, "{}", v),
            CanonicalNumber::Integer(v) => write!(f, "{}", v),
        }
    }
}

/// Result of canonicalizing a raw attribute string
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CanonicalValue {
    /// Numeric storage field (e.g. "rated_power_net_kw")
    pub field: &'static str,
    pub value: CanonicalNumber,
    /// Canonical unit symbol for display, empty for dimensionless fields
    #[serde(skip)]
    pub unit: &'static str,
}

impl fmt::Display for CanonicalValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.unit.is_empty() {
            write!(f, "{}", self.value)
        } else {
            write!(f, "{} {}", self.value, self.unit)
        }
    }
}
