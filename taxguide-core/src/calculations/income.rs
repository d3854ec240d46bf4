//! Income period helpers.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::{TaxEngineError, ensure_non_negative};

const MONTHS_PER_YEAR: Decimal = dec!(12);

/// Converts a monthly income into an annual one.
///
/// # Errors
///
/// Returns [`TaxEngineError::NegativeAmount`] for a negative amount and
/// [`TaxEngineError::AmountTooLarge`] when the annual figure does not fit.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use taxguide_core::calculations::annualize_monthly;
///
/// assert_eq!(annualize_monthly(dec!(100000)).unwrap(), dec!(1200000));
/// ```
pub fn annualize_monthly(monthly: Decimal) -> Result<Decimal, TaxEngineError> {
    let monthly = ensure_non_negative("monthly income", monthly)?;
    monthly
        .checked_mul(MONTHS_PER_YEAR)
        .ok_or(TaxEngineError::AmountTooLarge {
            field: "annual income",
        })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn annualize_monthly_multiplies_by_twelve() {
        assert_eq!(annualize_monthly(dec!(0)).unwrap(), dec!(0));
        assert_eq!(annualize_monthly(dec!(250000.50)).unwrap(), dec!(3000006));
    }

    #[test]
    fn annualize_monthly_rejects_negative() {
        let result = annualize_monthly(dec!(-10));

        assert_eq!(
            result,
            Err(TaxEngineError::NegativeAmount {
                field: "monthly income",
                value: dec!(-10),
            })
        );
    }

    #[test]
    fn annualize_monthly_reports_overflow_as_error() {
        assert_eq!(
            annualize_monthly(Decimal::MAX),
            Err(TaxEngineError::AmountTooLarge {
                field: "annual income",
            })
        );
    }
}
