//! Common utility functions for tax calculations.
//!
//! This module provides shared functionality used by the bracket walker,
//! the relief calculator and the company classifier: rounding, percentage
//! arithmetic and the digit grouping used in default bracket labels.

use rust_decimal::{Decimal, RoundingStrategy};

const ONE_HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// This follows standard financial rounding conventions where values at exactly
/// 0.005 are rounded up to 0.01 (away from zero).
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use taxguide_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(123.454)), dec!(123.45));
/// assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
/// assert_eq!(round_half_up(dec!(-123.455)), dec!(-123.46)); // Away from zero
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Returns the maximum of two decimal values.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use taxguide_core::calculations::common::max;
///
/// assert_eq!(max(dec!(100.00), dec!(200.00)), dec!(200.00));
/// assert_eq!(max(dec!(-100.00), dec!(-200.00)), dec!(-100.00));
/// ```
pub fn max(
    a: Decimal,
    b: Decimal,
) -> Decimal {
    if a > b { a } else { b }
}

/// Applies a percentage (e.g. `8` for 8%) to an amount.
///
/// The percentage is scaled down first, so any `percent` in `[0, 100]` keeps
/// the result within `amount` and cannot overflow.
pub fn percent_of(
    amount: Decimal,
    percent: Decimal,
) -> Decimal {
    amount * (percent / ONE_HUNDRED)
}

/// Tax as a percentage of a base, rounded to two places.
///
/// Returns zero when the base is zero so callers never divide by zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use taxguide_core::calculations::common::effective_rate;
///
/// assert_eq!(effective_rate(dec!(60000), dec!(1200000)), dec!(5.00));
/// assert_eq!(effective_rate(dec!(0), dec!(0)), dec!(0));
/// ```
pub fn effective_rate(
    tax: Decimal,
    base: Decimal,
) -> Decimal {
    if base.is_zero() {
        return Decimal::ZERO;
    }
    round_half_up(tax / base * ONE_HUNDRED)
}

/// Converts a fractional rate into a trimmed percentage (`0.15` -> `15`).
pub fn rate_as_percent(rate: Decimal) -> Decimal {
    (rate * ONE_HUNDRED).normalize()
}

/// Formats a value with comma thousands separators, dropping trailing zeros.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use taxguide_core::calculations::common::group_thousands;
///
/// assert_eq!(group_thousands(dec!(1600000)), "1,600,000");
/// assert_eq!(group_thousands(dec!(2500.50)), "2,500.5");
/// ```
pub fn group_thousands(value: Decimal) -> String {
    let text = value.normalize().to_string();
    let (sign, unsigned) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.as_str()),
    };
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (i, digit) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    match fraction {
        Some(fraction) => format!("{sign}{grouped}.{fraction}"),
        None => format!("{sign}{grouped}"),
    }
}
