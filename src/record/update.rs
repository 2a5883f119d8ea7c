use crate::record::error::RecordError;
use crate::record::models::{FieldValue, TractorRecord};
use crate::schema::{Category, SchemaRegistry};
use crate::units::{canonicalize, CanonicalValue};

/// Raw strings meaning "the extractor did not find the value"
pub const DEFAULT_NOT_FOUND_MARKERS: &[&str] = &["N/A"];

#[derive(Debug, Clone, PartialEq)]
pub enum UpdateOutcome {
    /// The extractor reported no value, record untouched
    NotFound,
    /// Raw string stored, plus the canonical number when one was produced
    Stored {
        raw_field: String,
        canonical: Option<CanonicalValue>,
    },
}

pub fn is_not_found<S: AsRef<str>>(raw: &str, markers: &[S]) -> bool {
    let trimmed = raw.trim();
    trimmed.is_empty() || markers.iter().any(|m| m.as_ref().eq_ignore_ascii_case(trimmed))
}

/// Store an extracted value on a record: the raw string under its variable
/// name and, when it canonicalizes, the number under the numeric field.
pub fn apply_extraction<S: AsRef<str>>(
    record: &mut TractorRecord,
    schema: &SchemaRegistry,
    variable_name: &str,
    raw: &str,
    not_found_markers: &[S],
) -> Result<UpdateOutcome, RecordError> {
    if is_not_found(raw, not_found_markers) {
        log::debug!("{}: no value for '{}'", record.id, variable_name);
        return Ok(UpdateOutcome::NotFound);
    }

    if schema
        .field(variable_name)
        .is_some_and(|f| f.category == Category::Identification)
    {
        return Err(RecordError::IdentityField(variable_name.to_string()));
    }

    if !schema.is_text(variable_name) {
        return Err(RecordError::UnknownVariable(variable_name.to_string()));
    }

    log::debug!("{}: {} = '{}'", record.id, variable_name, raw);
    record.set(variable_name, FieldValue::Text(raw.to_string()));

    let canonical = match canonicalize(variable_name, raw) {
        Some(c) if schema.contains(c.field) => {
            log::debug!("{}: {} = {}", record.id, c.field, c.value);
            record.set_canonical(&c);
            Some(c)
        }
        Some(c) => {
            log::warn!(
                "Conversion produced field '{}' which is not in the tractor schema",
                c.field
            );
            None
        }
        None => None,
    };

    Ok(UpdateOutcome::Stored {
        raw_field: variable_name.to_string(),
        canonical,
    })
}
