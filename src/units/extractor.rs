use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// First number-like run: a digit followed by digits, commas and periods
    /// Examples: "108.6 hp" -> "108.6", "1,200 lbs" -> "1,200", "9.0L" -> "9.0"
    static ref NUMBER_PATTERN: Regex = Regex::new(r"[0-9][0-9.,]*").unwrap();
}

/// Extract the first numeric literal from a string.
///
/// Separators are disambiguated as follows:
/// - both `,` and `.` present: commas are thousands separators (`"1,200.50"` -> 1200.5)
/// - only `,` present: comma is the decimal marker (`"108,6"` -> 108.6)
/// - several `.` left: all but the last are dropped (`"1.200.50"` -> 1200.5)
///
/// Returns `None` for empty input, input without digits, or a literal that
/// still does not parse after cleanup.
pub fn extract_number(text: &str) -> Option<f64> {
    if text.is_empty() {
        return None;
    }

    let literal = NUMBER_PATTERN.find(text)?.as_str();
    let cleaned = normalize_separators(literal);

    match cleaned.parse::<f64>() {
        Ok(value) => Some(value),
        Err(_) => {
            log::warn!("Could not convert '{}' to a number", literal);
            None
        }
    }
}

fn normalize_separators(literal: &str) -> String {
    let has_comma = literal.contains(',');
    let has_period = literal.contains('.');

    let mut cleaned = if has_comma && has_period {
        literal.replace(',', "")
    } else if has_comma {
        literal.replace(',', ".")
    } else {
        literal.to_string()
    };

    // Last period is the decimal marker
    if cleaned.matches('.').count() > 1 {
        if let Some(last) = cleaned.rfind('.') {
            let (integral, fraction) = cleaned.split_at(last);
            cleaned = format!("{}{}", integral.replace('.', ""), fraction);
        }
    }

    cleaned
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(actual: Option<f64>, expected: f64) -> bool {
        matches!(actual, Some(v) if (v - expected).abs() < 1e-9)
    }

    #[test]
    fn test_plain_numbers() {
        assert!(approx(extract_number("108.6 hp"), 108.6));
        assert!(approx(extract_number("370 HP"), 370.0));
        assert!(approx(extract_number("9.0L"), 9.0));
        assert!(approx(extract_number("Rated power: 275 kW"), 275.0));
    }

    #[test]
    fn test_us_thousands_separator() {
        assert!(approx(extract_number("1,200.50"), 1200.5));
        assert!(approx(extract_number("1,200,000.5 lbs"), 1_200_000.5));
    }

    #[test]
    fn test_eu_decimal_comma() {
        assert!(approx(extract_number("108,6"), 108.6));
        assert!(approx(extract_number("2,75 m"), 2.75));
    }

    #[test]
    fn test_comma_only_thousands_reads_as_decimal() {
        // Commas alone are always decimal markers, then extra periods collapse
        assert!(approx(extract_number("1,200 lbs"), 1.2));
        assert!(approx(extract_number("1,200,000"), 1200.0));
    }

    #[test]
    fn test_multiple_periods_keep_last_as_decimal() {
        assert!(approx(extract_number("1.200.50"), 1200.5));
        assert!(approx(extract_number("1.200.000"), 1200.0));
        // A single period stays a decimal marker
        assert!(approx(extract_number("1.200"), 1.2));
    }

    #[test]
    fn test_first_number_wins() {
        assert!(approx(extract_number("6 cylinders, 9.0 L"), 6.0));
        assert!(approx(extract_number("17.5:1"), 17.5));
    }

    #[test]
    fn test_trailing_period_is_accepted() {
        assert!(approx(extract_number("Net power 108."), 108.0));
        assert!(approx(extract_number("end of sentence 108.6."), 1086.0));
    }

    #[test]
    fn test_absent_cases() {
        assert_eq!(extract_number(""), None);
        assert_eq!(extract_number("no numbers here"), None);
        assert_eq!(extract_number("..,"), None);
        assert_eq!(extract_number("N/A"), None);
    }

    #[test]
    fn test_leading_punctuation_is_skipped() {
        assert!(approx(extract_number(".5 L"), 5.0));
    }
}
