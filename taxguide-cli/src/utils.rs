use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::{Decimal, RoundingStrategy};
use taxguide_core::calculations::common::{group_thousands, rate_as_percent};
use thiserror::Error;

/// Digits grouped in threes by commas, with optional sign and fraction.
static GROUPED_AMOUNT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?\d{1,3}(,\d{3})+(\.\d+)?$").expect("grouped amount pattern is valid")
});

/// Error returned when a string cannot be parsed as a [`Decimal`].
#[derive(Debug, Error)]
pub enum ParseDecimalError {
    #[error("invalid amount '{input}': misplaced thousands separator")]
    Grouping { input: String },

    #[error("invalid amount '{input}': {source}")]
    Number {
        input: String,
        #[source]
        source: rust_decimal::Error,
    },
}

/// Normalizes input for decimal parsing: trims whitespace and removes commas (thousands separator).
fn normalize_decimal_input(s: &str) -> String {
    s.trim().replace(',', "")
}

/// Parses a string into a [`Decimal`].
///
/// Handles comma as thousands separator (e.g. `"1,234.56"`), but only in
/// groups of three. Empty or whitespace-only input is treated as 0.
pub fn parse_decimal(s: &str) -> Result<Decimal, ParseDecimalError> {
    let trimmed = s.trim();
    if trimmed.contains(',') && !GROUPED_AMOUNT.is_match(trimmed) {
        tracing::debug!(input = %s, "rejected thousands grouping");
        return Err(ParseDecimalError::Grouping {
            input: s.to_string(),
        });
    }

    let normalized = normalize_decimal_input(s);
    if normalized.is_empty() {
        return Ok(Decimal::ZERO);
    }
    normalized.parse().map_err(|e| {
        tracing::debug!(input = %s, "invalid decimal: {}", e);
        ParseDecimalError::Number {
            input: s.to_string(),
            source: e,
        }
    })
}

/// Parses a string into an optional [`Decimal`].
///
/// Returns `Ok(None)` for empty or whitespace-only input.
pub fn parse_optional_decimal(s: &str) -> Result<Option<Decimal>, ParseDecimalError> {
    if s.trim().is_empty() {
        return Ok(None);
    }
    parse_decimal(s).map(Some)
}

/// Formats an amount as whole naira with thousands separators.
///
/// `1200000.5` becomes `₦1,200,001`; negative amounts keep their sign in front.
pub fn format_naira(amount: Decimal) -> String {
    let whole = amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    if whole.is_sign_negative() && !whole.is_zero() {
        format!("-₦{}", group_thousands(whole.abs()))
    } else {
        format!("₦{}", group_thousands(whole.abs()))
    }
}

/// Formats a percentage already scaled to 0-100 with two decimals.
pub fn format_percent(percent: Decimal) -> String {
    format!("{:.2}%", percent)
}

/// Formats a fractional rate (`0.15`) as a trimmed percentage (`15%`).
pub fn format_rate(rate: Decimal) -> String {
    format!("{}%", rate_as_percent(rate))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn parse_decimal_accepts_comma_thousands_separator() {
        assert_eq!(parse_decimal("1,234.56").unwrap(), dec!(1234.56));
        assert_eq!(parse_decimal("1,200,000").unwrap(), dec!(1200000));
    }

    #[test]
    fn parse_decimal_rejects_misplaced_commas() {
        assert!(matches!(
            parse_decimal("12,00,000"),
            Err(ParseDecimalError::Grouping { .. })
        ));
        assert!(matches!(
            parse_decimal("1,2"),
            Err(ParseDecimalError::Grouping { .. })
        ));
    }

    #[test]
    fn parse_decimal_trim_whitespace() {
        assert_eq!(parse_decimal("  123.45  ").unwrap(), dec!(123.45));
    }

    #[test]
    fn parse_decimal_empty_treated_as_zero() {
        assert_eq!(parse_decimal("").unwrap(), Decimal::ZERO);
        assert_eq!(parse_decimal("   ").unwrap(), Decimal::ZERO);
    }

    #[test]
    fn parse_decimal_keeps_negative_sign() {
        assert_eq!(parse_decimal("-5,000").unwrap(), dec!(-5000));
    }

    #[test]
    fn parse_decimal_invalid_returns_error() {
        assert!(matches!(
            parse_decimal("abc"),
            Err(ParseDecimalError::Number { .. })
        ));
    }

    #[test]
    fn parse_optional_decimal_handles_comma_and_empty() {
        assert_eq!(parse_optional_decimal("1,234.56").unwrap(), Some(dec!(1234.56)));
        assert_eq!(parse_optional_decimal("").unwrap(), None);
        assert!(parse_optional_decimal("x").is_err());
    }

    #[test]
    fn format_naira_groups_and_rounds() {
        assert_eq!(format_naira(dec!(1200000)), "₦1,200,000");
        assert_eq!(format_naira(dec!(0.15)), "₦0");
        assert_eq!(format_naira(dec!(999.5)), "₦1,000");
        assert_eq!(format_naira(dec!(-78000)), "-₦78,000");
    }

    #[test]
    fn format_rates() {
        assert_eq!(format_percent(dec!(17.89)), "17.89%");
        assert_eq!(format_percent(dec!(5)), "5.00%");
        assert_eq!(format_rate(dec!(0.15)), "15%");
        assert_eq!(format_rate(dec!(0.025)), "2.5%");
    }
}
