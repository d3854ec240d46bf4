use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{TaxEngineError, ensure_fraction, ensure_non_negative_constant};

/// Reliefs a taxpayer claims against gross income.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReliefInputs {
    /// Pension contribution as a percentage of gross income (`8` for 8%).
    #[serde(default)]
    pub pension_rate: Decimal,

    /// Mortgage interest paid in the year. Amounts above the configured cap
    /// are clamped to the cap rather than rejected.
    #[serde(default)]
    pub mortgage_interest: Decimal,

    /// Number of dependents in education.
    #[serde(default)]
    pub dependents_in_education: u32,

    /// Whether the taxpayer contributes to the housing fund.
    #[serde(default)]
    pub housing_fund_contributor: bool,
}

/// Relief constants for one legislative version.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use taxguide_core::ReliefConfig;
///
/// let config = ReliefConfig {
///     max_pension_rate: dec!(20),
///     mortgage_interest_cap: dec!(500000),
///     education_allowance_per_dependent: dec!(2500),
///     max_dependents: 4,
///     housing_fund_rate: dec!(0.025),
///     cra_floor: dec!(200000),
///     cra_floor_rate: dec!(0.01),
///     cra_additional_rate: dec!(0.20),
/// };
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReliefConfig {
    /// Highest accepted pension rate, as a percentage.
    pub max_pension_rate: Decimal,

    /// Ceiling on deductible mortgage interest.
    pub mortgage_interest_cap: Decimal,

    /// Fixed allowance granted for each dependent in education.
    pub education_allowance_per_dependent: Decimal,

    /// Highest accepted number of dependents in education.
    pub max_dependents: u32,

    /// Housing-fund contribution as a fraction of gross income.
    pub housing_fund_rate: Decimal,

    /// Fixed floor of the consolidated relief allowance.
    pub cra_floor: Decimal,

    /// Fraction of gross income compared against the floor.
    pub cra_floor_rate: Decimal,

    /// Fraction of gross income always added on top.
    pub cra_additional_rate: Decimal,
}

impl ReliefConfig {
    /// Validates the relief constants.
    ///
    /// # Errors
    ///
    /// Returns [`TaxEngineError`] if:
    /// - `max_pension_rate` is not in [0, 100]
    /// - any cap, allowance or floor is negative
    /// - `housing_fund_rate`, `cra_floor_rate` or `cra_additional_rate` is not in [0, 1]
    pub fn validate(&self) -> Result<(), TaxEngineError> {
        if self.max_pension_rate < Decimal::ZERO || self.max_pension_rate > Decimal::ONE_HUNDRED {
            return Err(TaxEngineError::RateOutOfRange {
                field: "max pension rate (percent / 100)",
                value: self.max_pension_rate / Decimal::ONE_HUNDRED,
            });
        }
        ensure_non_negative_constant("mortgage interest cap", self.mortgage_interest_cap)?;
        ensure_non_negative_constant(
            "education allowance per dependent",
            self.education_allowance_per_dependent,
        )?;
        ensure_non_negative_constant("CRA floor", self.cra_floor)?;
        ensure_fraction("housing fund rate", self.housing_fund_rate)?;
        ensure_fraction("CRA floor rate", self.cra_floor_rate)?;
        ensure_fraction("CRA additional rate", self.cra_additional_rate)?;
        Ok(())
    }
}

/// Amount of each relief granted, plus their sum.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReliefBreakdown {
    pub pension: Decimal,
    pub mortgage: Decimal,
    pub education: Decimal,
    pub housing_fund: Decimal,
    /// Consolidated relief allowance.
    pub consolidated: Decimal,
    pub total: Decimal,
}
