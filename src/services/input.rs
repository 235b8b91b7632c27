//! Input guards applied before values reach the ledger
//!
//! Cell text loses exponent markers and minus signs, and anything that still
//! does not parse, or is too large to hold, becomes zero. Names for new rows and groups must not be
//! blank.

use crate::error::{BudgetError, BudgetResult};
use crate::models::Money;

/// Characters a cell editor never accepts
pub const REJECTED_CHARS: [char; 3] = ['e', 'E', '-'];

/// Maximum length of a group or subcategory name
pub const MAX_NAME_LEN: usize = 50;

/// Whether a typed character may enter a numeric cell
pub fn accepts_numeric_char(c: char) -> bool {
    !REJECTED_CHARS.contains(&c)
}

/// Strip exponent markers and minus signs, e.g. from pasted text
pub fn sanitize_numeric_input(text: &str) -> String {
    text.chars().filter(|c| accepts_numeric_char(*c)).collect()
}

/// Turn raw cell text into a value; unparseable text yields zero
pub fn parse_cell_value(text: &str) -> Money {
    let cleaned = sanitize_numeric_input(text);
    if cleaned.trim().is_empty() {
        return Money::zero();
    }
    Money::parse(&cleaned).unwrap_or_else(|e| {
        tracing::debug!(input = text, error = %e, "coercing unparseable cell input to zero");
        Money::zero()
    })
}

/// Trim a proposed name and reject it when blank or too long
pub fn validate_name(name: &str) -> BudgetResult<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(BudgetError::Validation("Name cannot be empty".into()));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(BudgetError::Validation(format!(
            "Name too long (max {} chars)",
            MAX_NAME_LEN
        )));
    }
    Ok(name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_strips_exponent_and_minus() {
        assert_eq!(sanitize_numeric_input("-1e5"), "15");
        assert_eq!(sanitize_numeric_input("12.5E-3"), "12.53");
        assert_eq!(sanitize_numeric_input("250"), "250");
    }

    #[test]
    fn test_parse_cell_value() {
        assert_eq!(parse_cell_value("1000"), Money::from_units(1000));
        assert_eq!(parse_cell_value("12.75"), Money::from_cents(1275));
        assert_eq!(parse_cell_value("-40"), Money::from_units(40));
    }

    #[test]
    fn test_unparseable_becomes_zero() {
        assert_eq!(parse_cell_value(""), Money::zero());
        assert_eq!(parse_cell_value("abc"), Money::zero());
        assert_eq!(parse_cell_value("1.2.3"), Money::zero());
        assert_eq!(parse_cell_value("e"), Money::zero());
    }

    #[test]
    fn test_out_of_range_becomes_zero() {
        assert_eq!(parse_cell_value("90000000000000000"), Money::zero());
        assert_eq!(parse_cell_value("1000000000000"), Money::zero());
        assert_eq!(
            parse_cell_value("999999999999"),
            Money::from_units(999_999_999_999)
        );
    }

    #[test]
    fn test_accepts_numeric_char() {
        assert!(accepts_numeric_char('7'));
        assert!(accepts_numeric_char('.'));
        assert!(!accepts_numeric_char('e'));
        assert!(!accepts_numeric_char('-'));
    }

    #[test]
    fn test_validate_name() {
        assert_eq!(validate_name("  Rent ").unwrap(), "Rent");
        assert!(validate_name("   ").unwrap_err().is_validation());
        assert!(validate_name(&"x".repeat(51)).is_err());
    }
}
