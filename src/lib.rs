pub mod config;
pub mod query;
pub mod record;
pub mod schema;
pub mod units;

pub use units::{canonicalize, extract_number, CanonicalNumber, CanonicalValue};
