use crate::record::models::{FieldValue, TractorRecord};
use crate::record::validation::ValidationResult;
use crate::schema::registry::{FieldKind, SchemaRegistry};
use crate::units::rules;

pub struct SchemaValidator<'a> {
    registry: &'a SchemaRegistry,
}

impl<'a> SchemaValidator<'a> {
    pub fn new(registry: &'a SchemaRegistry) -> Self {
        Self { registry }
    }

    pub fn validate_record(&self, record: &TractorRecord) -> ValidationResult {
        let mut result = ValidationResult::new();

        if record.model.trim().is_empty() {
            result.add_error("Model name is empty".to_string(), Some(record.id.clone()));
        }

        for (name, value) in &record.values {
            let location = Some(format!("{}/{}", record.id, name));

            let field = match self.registry.field(name) {
                Some(f) => f,
                None => {
                    result.add_warning(format!("Unknown field '{}'", name), location);
                    continue;
                }
            };

            if !kind_accepts(field.kind, value) {
                result.add_error(
                    format!(
                        "Field '{}' expects {} but holds {}",
                        name,
                        field.kind,
                        value.kind_name()
                    ),
                    location,
                );
            }
        }

        // Canonical numbers without the raw string they came from
        for rule in rules() {
            if record.values.contains_key(rule.field) && !record.values.contains_key(rule.variable) {
                result.add_warning(
                    format!(
                        "Numeric field '{}' is set but its source '{}' is missing",
                        rule.field, rule.variable
                    ),
                    Some(format!("{}/{}", record.id, rule.field)),
                );
            }
        }

        result
    }
}

fn kind_accepts(kind: FieldKind, value: &FieldValue) -> bool {
    matches!(
        (kind, value),
        (FieldKind::Text, FieldValue::Text(_))
            | (FieldKind::Float, FieldValue::Float(_))
            | (FieldKind::Float, FieldValue::Integer(_))
            | (FieldKind::Integer, FieldValue::Integer(_))
            | (FieldKind::Boolean, FieldValue::Boolean(_))
    )
}
