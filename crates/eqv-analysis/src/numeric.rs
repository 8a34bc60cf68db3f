//! Numeric cell parsing.

/// Parse a cell to a finite `f64`.
///
/// Surrounding whitespace is ignored. Blank cells, text, and values that
/// parse to NaN or infinity return `None`.
pub fn parse_numeric(value: &str) -> Option<f64> {
    let trimmed = value.trim();

    if trimmed.is_empty() {
        return None;
    }

    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Check if a cell holds a finite number.
pub fn is_numeric(value: &str) -> bool {
    parse_numeric(value).is_some()
}

/// Returns true for an empty or whitespace-only cell.
pub(crate) fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_values() {
        assert_eq!(parse_numeric("123"), Some(123.0));
        assert_eq!(parse_numeric("-0.5"), Some(-0.5));
        assert_eq!(parse_numeric("  12.5  "), Some(12.5));
    }

    #[test]
    fn test_scientific_notation() {
        assert_eq!(parse_numeric("1.23e5"), Some(123000.0));
        assert_eq!(parse_numeric("1.5E-3"), Some(0.0015));
    }

    #[test]
    fn test_rejects_text_and_blank() {
        assert_eq!(parse_numeric(""), None);
        assert_eq!(parse_numeric("   "), None);
        assert_eq!(parse_numeric("abc"), None);
        assert_eq!(parse_numeric("12.34.56"), None);
        assert_eq!(parse_numeric("1,234"), None);
    }

    #[test]
    fn test_rejects_non_finite() {
        assert_eq!(parse_numeric("nan"), None);
        assert_eq!(parse_numeric("inf"), None);
        assert_eq!(parse_numeric("-infinity"), None);
        assert_eq!(parse_numeric("1e400"), None);
    }

    #[test]
    fn test_is_numeric() {
        assert!(is_numeric("45.67"));
        assert!(!is_numeric("Pump-1"));
    }
}
