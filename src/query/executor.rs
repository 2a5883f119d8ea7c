use crate::query::parser::{Filter, FilterOperator, ParseError};
use crate::record::models::{Catalog, FieldValue, TractorRecord};
use crate::schema::{FieldKind, SchemaRegistry};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum QueryError {
    #[error("Unknown field '{0}'")]
    UnknownField(String),
    #[error("Invalid value '{value}' for {field}: expected {expected}")]
    InvalidOperand {
        field: String,
        value: String,
        expected: FieldKind,
    },
    #[error("Operator '{operator}' cannot be applied to {kind} field '{field}'")]
    UnsupportedOperator {
        field: String,
        operator: FilterOperator,
        kind: FieldKind,
    },
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),
}

// Filter fields that read another column first when it is set
const COALESCED_FIELDS: &[(&str, &[&str])] = &[("height_m", &["height_rops_m", "height_m"])];

#[derive(Debug, Clone, PartialEq)]
enum Operand {
    Number(f64),
    Text(String),
    Bool(bool),
}

/// A filter checked against the schema, with its operand already typed
#[derive(Debug, Clone)]
struct CompiledFilter {
    field: String,
    operator: FilterOperator,
    operand: Operand,
}

pub struct CatalogQuery<'a> {
    catalog: &'a Catalog,
    schema: &'a SchemaRegistry,
}

impl<'a> CatalogQuery<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self {
            catalog,
            schema: SchemaRegistry::tractor(),
        }
    }

    /// Records matching every filter, in catalog order
    pub fn filter(&self, filters: &[Filter]) -> Result<Vec<&'a TractorRecord>, QueryError> {
        let compiled = filters
            .iter()
            .map(|f| self.compile(f))
            .collect::<Result<Vec<_>, _>>()?;

        let matches: Vec<&TractorRecord> = self
            .catalog
            .records
            .iter()
            .filter(|record| compiled.iter().all(|f| matches_filter(record, f)))
            .collect();

        log::info!(
            "{} of {} records matched {} filters",
            matches.len(),
            self.catalog.records.len(),
            compiled.len()
        );
        Ok(matches)
    }

    fn compile(&self, filter: &Filter) -> Result<CompiledFilter, QueryError> {
        let kind = match filter.field.as_str() {
            "model" | "company" => FieldKind::Text,
            name => {
                self.schema
                    .field(name)
                    .ok_or_else(|| QueryError::UnknownField(name.to_string()))?
                    .kind
            }
        };

        let unsupported = || QueryError::UnsupportedOperator {
            field: filter.field.clone(),
            operator: filter.operator,
            kind,
        };
        let invalid = || QueryError::InvalidOperand {
            field: filter.field.clone(),
            value: filter.value.clone(),
            expected: kind,
        };

        let operand = match kind {
            FieldKind::Float | FieldKind::Integer => {
                if filter.operator == FilterOperator::Contains {
                    return Err(unsupported());
                }
                Operand::Number(filter.value.parse::<f64>().map_err(|_| invalid())?)
            }
            FieldKind::Boolean => {
                if !matches!(filter.operator, FilterOperator::Equals | FilterOperator::NotEquals) {
                    return Err(unsupported());
                }
                Operand::Bool(filter.value.to_lowercase().parse::<bool>().map_err(|_| invalid())?)
            }
            FieldKind::Text => {
                if filter.operator.is_ordering() {
                    return Err(unsupported());
                }
                Operand::Text(filter.value.clone())
            }
        };

        Ok(CompiledFilter {
            field: filter.field.clone(),
            operator: filter.operator,
            operand,
        })
    }
}

enum Resolved<'r> {
    Value(&'r FieldValue),
    Str(&'r str),
}

fn resolve<'r>(record: &'r TractorRecord, field: &str) -> Option<Resolved<'r>> {
    match field {
        "model" => return Some(Resolved::Str(&record.model)),
        "company" => return record.company.as_deref().map(Resolved::Str),
        _ => {}
    }

    if let Some((_, chain)) = COALESCED_FIELDS.iter().find(|(name, _)| *name == field) {
        return chain
            .iter()
            .find_map(|name| record.get(name))
            .map(Resolved::Value);
    }

    record.get(field).map(Resolved::Value)
}

// A missing value never matches, including for '!='
fn matches_filter(record: &TractorRecord, filter: &CompiledFilter) -> bool {
    let resolved = match resolve(record, &filter.field) {
        Some(r) => r,
        None => return false,
    };

    match (&filter.operand, resolved) {
        (Operand::Number(bound), Resolved::Value(v)) => match v.as_f64() {
            Some(actual) => compare_numeric(actual, *bound, filter.operator),
            None => false,
        },
        (Operand::Bool(expected), Resolved::Value(v)) => match v.as_bool() {
            Some(actual) => match filter.operator {
                FilterOperator::Equals => actual == *expected,
                FilterOperator::NotEquals => actual != *expected,
                _ => false,
            },
            None => false,
        },
        (Operand::Text(expected), Resolved::Str(actual)) => {
            matches_text(actual, expected, filter.operator)
        }
        (Operand::Text(expected), Resolved::Value(v)) => match v.as_str() {
            Some(actual) => matches_text(actual, expected, filter.operator),
            None => false,
        },
        _ => false,
    }
}

fn compare_numeric(actual: f64, bound: f64, operator: FilterOperator) -> bool {
    match operator {
        FilterOperator::Equals => actual == bound,
        FilterOperator::NotEquals => actual != bound,
        FilterOperator::GreaterThan => actual > bound,
        FilterOperator::LessThan => actual < bound,
        FilterOperator::GreaterThanOrEqual => actual >= bound,
        FilterOperator::LessThanOrEqual => actual <= bound,
        FilterOperator::Contains => false,
    }
}

fn matches_text(actual: &str, expected: &str, operator: FilterOperator) -> bool {
    match operator {
        FilterOperator::Equals => actual == expected,
        FilterOperator::NotEquals => actual != expected,
        FilterOperator::Contains => actual.to_lowercase().contains(&expected.to_lowercase()),
        _ => false,
    }
}
