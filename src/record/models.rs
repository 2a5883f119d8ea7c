use crate::units::{CanonicalNumber, CanonicalValue};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// A single stored column value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Boolean(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

impl FieldValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Float(v) => Some(*v),
            FieldValue::Integer(v) => Some(*v as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            FieldValue::Boolean(_) => "boolean",
            FieldValue::Integer(_) => "integer",
            FieldValue::Float(_) => "float",
            FieldValue::Text(_) => "text",
        }
    }
}

impl From<CanonicalNumber> for FieldValue {
    fn from(n: CanonicalNumber) -> Self {
        match n {
            CanonicalNumber::Float(v) => FieldValue::Float(v),
            CanonicalNumber::Integer(v) => FieldValue::Integer(v),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Boolean(b) => write!(f, "{}", b),
            FieldValue::Integer(v) => write!(f, "{}", v),
            FieldValue::Float(v) => write!(f, "{}", v),
            FieldValue::Text(s) => write!(f, "{}", s),
        }
    }
}

/// One tractor model with its raw and canonical spec values
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TractorRecord {
    // File-derived ID (from filename: "8r-370.toml" -> "8r-370")
    pub id: String,
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    // Raw strings under the variable name, canonical numbers under the
    // rule's output field, plus directly typed attributes
    pub values: BTreeMap<String, FieldValue>,
}

impl TractorRecord {
    pub fn new(id: &str, model: &str, company: Option<String>) -> Self {
        Self {
            id: id.to_string(),
            model: model.to_string(),
            company,
            values: BTreeMap::new(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.values.get(name)
    }

    pub fn set(&mut self, name: &str, value: FieldValue) {
        self.values.insert(name.to_string(), value);
    }

    pub fn set_canonical(&mut self, canonical: &CanonicalValue) {
        self.set(canonical.field, canonical.value.into());
    }

    pub fn company_display(&self) -> &str {
        self.company.as_deref().unwrap_or("-")
    }
}

/// All records loaded from one catalog directory
#[derive(Debug, Clone, Default, Serialize)]
pub struct Catalog {
    pub records: Vec<TractorRecord>,
}

impl Catalog {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::canonicalize;

    #[test]
    fn test_set_canonical_keeps_number_kind() {
        let mut record = TractorRecord::new("t", "T", None);
        record.set_canonical(&canonicalize("rated_rpm", "2100 rpm").unwrap());
        record.set_canonical(&canonicalize("pressure", "210 bar").unwrap());

        assert_eq!(record.get("rated_rpm_num"), Some(&FieldValue::Integer(2100)));
        assert_eq!(record.get("pressure_bar"), Some(&FieldValue::Float(210.0)));
    }

    #[test]
    fn test_serializes_values_flat() {
        let mut record = TractorRecord::new("t", "T", Some("Acme".to_string()));
        record.set("drive_type", FieldValue::Text("4WD".to_string()));
        record.set("differential_lock", FieldValue::Boolean(true));

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["values"]["drive_type"], "4WD");
        assert_eq!(json["values"]["differential_lock"], true);
        assert_eq!(json["company"], "Acme");
    }
}
