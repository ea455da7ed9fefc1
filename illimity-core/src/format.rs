//! Formatters turning captured substrings into ledger values.
//!
//! Amounts follow Italian notation (`1.500,00`) and are returned in YNAB
//! milliunits: the value times 1000, as an integer.

use crate::error::{EngineError, Result};
use crate::notification::IsoDate;

const MILLIUNITS_PER_UNIT: i64 = 1000;
const FRACTION_DIGITS: usize = 3;

/// Parse `50,00` / `1.500,00` / `1.500.000,00` into milliunits.
///
/// Rounds to the nearest milliunit, halves going up.
pub fn format_amount(raw: &str) -> Result<i64> {
    let malformed = || EngineError::MalformedAmount(raw.to_string());
    let value = raw.trim();

    let (int_part, frac_part) = match value.split_once(',') {
        Some((int_part, frac_part)) => (int_part, frac_part),
        None => (value, ""),
    };
    if frac_part.contains(',') || (value.contains(',') && frac_part.is_empty()) {
        return Err(malformed());
    }
    if !frac_part.chars().all(|c| c.is_ascii_digit()) {
        return Err(malformed());
    }

    let units = parse_grouped_integer(int_part).ok_or_else(malformed)?;

    let digits: Vec<i64> = frac_part
        .chars()
        .filter_map(|c| c.to_digit(10).map(i64::from))
        .collect();
    let mut fraction = 0i64;
    for i in 0..FRACTION_DIGITS {
        fraction = fraction * 10 + digits.get(i).copied().unwrap_or(0);
    }
    if digits.get(FRACTION_DIGITS).is_some_and(|d| *d >= 5) {
        fraction += 1;
    }

    units
        .checked_mul(MILLIUNITS_PER_UNIT)
        .and_then(|v| v.checked_add(fraction))
        .ok_or_else(malformed)
}

/// Same as [`format_amount`], negated: money leaving the account.
pub fn format_outflow(raw: &str) -> Result<i64> {
    format_amount(raw).map(|v| -v)
}

/// Integer part with optional dot thousands separators.
fn parse_grouped_integer(s: &str) -> Option<i64> {
    if s.is_empty() {
        return None;
    }

    let groups: Vec<&str> = s.split('.').collect();
    let (head, tail) = groups.split_first()?;
    if head.is_empty() || !head.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    if !tail.is_empty() && head.len() > 3 {
        return None;
    }
    if tail
        .iter()
        .any(|g| g.len() != 3 || !g.chars().all(|c| c.is_ascii_digit()))
    {
        return None;
    }

    groups.concat().parse().ok()
}

/// Convert from DD/MM/YYYY to YYYY-MM-DD. Day and month are not range-checked.
pub fn format_date(raw: &str) -> Result<IsoDate> {
    let parts: Vec<&str> = raw.trim().split('/').collect();
    match parts.as_slice() {
        [day, month, year] if !day.is_empty() && !month.is_empty() && !year.is_empty() => {
            Ok(IsoDate::new(format!("{year}-{month}-{day}")))
        }
        _ => Err(EngineError::MalformedDate(raw.to_string())),
    }
}

/// Trim surrounding whitespace; inner spacing and case are kept.
pub fn format_payee(raw: &str) -> String {
    raw.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_without_separators() {
        assert_eq!(format_amount("50,00").unwrap(), 50_000);
        assert_eq!(format_outflow("50,00").unwrap(), -50_000);
        assert_eq!(format_amount("75,50").unwrap(), 75_500);
    }

    #[test]
    fn test_amount_with_thousand_groups() {
        assert_eq!(format_amount("1.500,00").unwrap(), 1_500_000);
        assert_eq!(format_amount("1.500.000,00").unwrap(), 1_500_000_000);
        assert_eq!(format_outflow("12.345,67").unwrap(), -12_345_670);
    }

    #[test]
    fn test_amount_rounds_to_nearest_milliunit() {
        assert_eq!(format_amount("0,0004").unwrap(), 0);
        assert_eq!(format_amount("0,0005").unwrap(), 1);
        assert_eq!(format_amount("1,2").unwrap(), 1_200);
    }

    #[test]
    fn test_amount_integer_only() {
        assert_eq!(format_amount("50").unwrap(), 50_000);
    }

    #[test]
    fn test_malformed_amounts() {
        for raw in ["", "abc", "1.50,00", "1500.000,00", "1,00,00", "50,", ",50", "1..000,00"] {
            assert!(
                matches!(format_amount(raw), Err(EngineError::MalformedAmount(_))),
                "expected malformed: {raw:?}"
            );
        }
    }

    #[test]
    fn test_amount_overflow_is_malformed() {
        assert!(format_amount("99999999999999999999,00").is_err());
    }

    #[test]
    fn test_date_reorders_parts() {
        assert_eq!(format_date("15/03/2024").unwrap().as_str(), "2024-03-15");
    }

    #[test]
    fn test_date_is_not_calendar_checked() {
        assert_eq!(format_date("31/04/2024").unwrap().as_str(), "2024-04-31");
    }

    #[test]
    fn test_date_wrong_shape() {
        assert!(matches!(format_date("2024-03-15"), Err(EngineError::MalformedDate(_))));
    }

    #[test]
    fn test_payee_only_trims_edges() {
        assert_eq!(format_payee("  AMAZON EU  S.A R.L \t"), "AMAZON EU  S.A R.L");
    }
}
