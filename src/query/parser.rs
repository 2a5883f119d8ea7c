use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOperator {
    Equals,
    NotEquals,
    GreaterThan,
    LessThan,
    GreaterThanOrEqual,
    LessThanOrEqual,
    // Case-insensitive substring match on text fields
    Contains,
}

impl FilterOperator {
    // Two-character operators first so ">=" is not read as ">"
    const SYMBOLS: [(&'static str, FilterOperator); 7] = [
        (">=", FilterOperator::GreaterThanOrEqual),
        ("<=", FilterOperator::LessThanOrEqual),
        ("!=", FilterOperator::NotEquals),
        (">", FilterOperator::GreaterThan),
        ("<", FilterOperator::LessThan),
        ("=", FilterOperator::Equals),
        ("~", FilterOperator::Contains),
    ];

    pub fn symbol(&self) -> &'static str {
        Self::SYMBOLS
            .iter()
            .find(|(_, op)| op == self)
            .map(|(s, _)| *s)
            .unwrap_or("?")
    }

    pub fn is_ordering(&self) -> bool {
        matches!(
            self,
            FilterOperator::GreaterThan
                | FilterOperator::LessThan
                | FilterOperator::GreaterThanOrEqual
                | FilterOperator::LessThanOrEqual
        )
    }
}

impl fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// One `<field><op><value>` condition, e.g. `rated_power_net_kw>=150`
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub field: String,
    pub operator: FilterOperator,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Filter expression cannot be empty")]
    EmptyExpression,
    #[error("No operator in '{0}' (expected one of >=, <=, !=, >, <, =, ~)")]
    MissingOperator(String),
    #[error("Invalid operator in '{0}'")]
    InvalidOperator(String),
    #[error("Missing field name in '{0}'")]
    EmptyField(String),
    #[error("Missing value in '{0}'")]
    EmptyValue(String),
}

pub fn parse_filter(expr: &str) -> Result<Filter, ParseError> {
    let trimmed = expr.trim();
    if trimmed.is_empty() {
        return Err(ParseError::EmptyExpression);
    }

    let op_start = trimmed
        .find(|c: char| matches!(c, '<' | '>' | '=' | '!' | '~'))
        .ok_or_else(|| ParseError::MissingOperator(trimmed.to_string()))?;

    let (field, rest) = trimmed.split_at(op_start);
    let field = field.trim();
    if field.is_empty() {
        return Err(ParseError::EmptyField(trimmed.to_string()));
    }

    let (symbol, operator) = FilterOperator::SYMBOLS
        .iter()
        .find(|(symbol, _)| rest.starts_with(symbol))
        .ok_or_else(|| ParseError::InvalidOperator(trimmed.to_string()))?;

    let value = rest[symbol.len()..].trim();
    if value.is_empty() {
        return Err(ParseError::EmptyValue(trimmed.to_string()));
    }

    Ok(Filter {
        field: field.to_string(),
        operator: *operator,
        value: value.to_string(),
    })
}

/// Parse several expressions, stopping at the first error
pub fn parse_filters<S: AsRef<str>>(exprs: &[S]) -> Result<Vec<Filter>, ParseError> {
    exprs.iter().map(|e| parse_filter(e.as_ref())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_range_bounds() {
        let f = parse_filter("rated_power_net_kw>=150").unwrap();
        assert_eq!(f.field, "rated_power_net_kw");
        assert_eq!(f.operator, FilterOperator::GreaterThanOrEqual);
        assert_eq!(f.value, "150");

        let f = parse_filter("shipping_weight_kg < 9000.5").unwrap();
        assert_eq!(f.operator, FilterOperator::LessThan);
        assert_eq!(f.value, "9000.5");
    }

    #[test]
    fn test_parse_text_operators() {
        let f = parse_filter("company~deere").unwrap();
        assert_eq!(f.operator, FilterOperator::Contains);

        let f = parse_filter("drive_type = 4WD").unwrap();
        assert_eq!(f.operator, FilterOperator::Equals);
        assert_eq!(f.value, "4WD");

        let f = parse_filter("rear_type!=Category II").unwrap();
        assert_eq!(f.operator, FilterOperator::NotEquals);
        assert_eq!(f.value, "Category II");
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(parse_filter("  "), Err(ParseError::EmptyExpression));
        assert!(matches!(parse_filter("torque_nm"), Err(ParseError::MissingOperator(_))));
        assert!(matches!(parse_filter(">=5"), Err(ParseError::EmptyField(_))));
        assert!(matches!(parse_filter("torque_nm>="), Err(ParseError::EmptyValue(_))));
        assert!(matches!(parse_filter("torque_nm!5"), Err(ParseError::InvalidOperator(_))));
    }

    #[test]
    fn test_parse_many() {
        let filters = parse_filters(&["pressure_bar>=200", "company~fendt"]).unwrap();
        assert_eq!(filters.len(), 2);
        assert!(parse_filters(&["pressure_bar>=200", "oops"]).is_err());
    }

    #[test]
    fn test_operator_symbols() {
        assert_eq!(FilterOperator::LessThanOrEqual.to_string(), "<=");
        assert!(FilterOperator::GreaterThan.is_ordering());
        assert!(!FilterOperator::Contains.is_ordering());
    }
}
