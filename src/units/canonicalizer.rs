use crate::units::error::ConversionError;
use crate::units::extractor::extract_number;
use crate::units::rules::{rule_for, UnitPolicy};
use crate::units::types::{CanonicalNumber, CanonicalValue, NumberKind};

/// Convert a raw attribute string to its canonical numeric field.
///
/// Returns `None` when no number is found, the variable has no rule, or no
/// recognized unit appears in the string. The caller keeps the raw text in
/// every case.
pub fn canonicalize(variable_name: &str, raw: &str) -> Option<CanonicalValue> {
    match try_canonicalize(variable_name, raw) {
        Ok(value) => Some(value),
        Err(e) => {
            log::debug!("No canonical value: {}", e);
            None
        }
    }
}

/// Same as [`canonicalize`], but reports why no value was produced
pub fn try_canonicalize(variable_name: &str, raw: &str) -> Result<CanonicalValue, ConversionError> {
    // Nothing variable-specific runs without a number
    let number = extract_number(raw).ok_or_else(|| ConversionError::NoNumber(raw.to_string()))?;

    let rule = rule_for(variable_name)
        .ok_or_else(|| ConversionError::UnknownVariable(variable_name.to_string()))?;

    let value = match rule.policy {
        UnitPolicy::PassThrough(NumberKind::Integer) => CanonicalNumber::Integer(number.trunc() as i64),
        UnitPolicy::PassThrough(NumberKind::Float) => CanonicalNumber::Float(number),
        UnitPolicy::Tokens(tokens) => {
            let lowered = raw.to_lowercase();
            let token = tokens.iter().find(|t| t.matches(&lowered)).ok_or_else(|| {
                ConversionError::UnrecognizedUnit {
                    variable: variable_name.to_string(),
                    raw: raw.to_string(),
                }
            })?;
            log::debug!(
                "{}: '{}' matched {:?} (x{})",
                variable_name,
                raw,
                token.any_of,
                token.factor
            );
            CanonicalNumber::Float(number * token.factor)
        }
    };

    Ok(CanonicalValue {
        field: rule.field,
        value,
        unit: rule.unit,
    })
}
