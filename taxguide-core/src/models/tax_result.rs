use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::calculations::common::round_half_up;
use crate::models::ReliefBreakdown;

const MONTHS_PER_YEAR: Decimal = dec!(12);

/// Tax owed within a single bracket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketContribution {
    pub label: String,
    /// Marginal rate of the bracket, as a fraction.
    pub rate: Decimal,
    /// Portion of taxable income that fell into this bracket.
    pub taxable_amount: Decimal,
    pub tax: Decimal,
}

/// Outcome of a personal income tax calculation.
///
/// Produced fresh by every call and never mutated by the engine afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxResult {
    pub gross_income: Decimal,
    /// Income the brackets were applied to (gross less reliefs, floored at 0).
    pub taxable_income: Decimal,
    pub total_tax: Decimal,
    /// Total tax as a percentage of gross income; zero for zero income.
    pub effective_rate: Decimal,
    pub net_income: Decimal,
    /// One entry per bracket that absorbed a positive amount, in ascending order.
    pub breakdown: Vec<BracketContribution>,
    /// Present when the tax was computed after reliefs.
    pub reliefs: Option<ReliefBreakdown>,
}

impl TaxResult {
    /// Total reliefs granted, zero when no reliefs were applied.
    pub fn total_reliefs(&self) -> Decimal {
        self.reliefs
            .as_ref()
            .map(|r| r.total)
            .unwrap_or(Decimal::ZERO)
    }

    /// Annual tax spread over twelve months.
    pub fn monthly_tax(&self) -> Decimal {
        round_half_up(self.total_tax / MONTHS_PER_YEAR)
    }

    /// Annual net income spread over twelve months.
    pub fn monthly_net_income(&self) -> Decimal {
        round_half_up(self.net_income / MONTHS_PER_YEAR)
    }

    /// Sum of the amounts absorbed by each bracket in the breakdown.
    pub fn covered_amount(&self) -> Decimal {
        self.breakdown.iter().map(|c| c.taxable_amount).sum()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn result() -> TaxResult {
        TaxResult {
            gross_income: dec!(1200000),
            taxable_income: dec!(1200000),
            total_tax: dec!(60000),
            effective_rate: dec!(5.00),
            net_income: dec!(1140000),
            breakdown: vec![
                BracketContribution {
                    label: "First 800,000 (tax-free)".to_string(),
                    rate: dec!(0),
                    taxable_amount: dec!(800000),
                    tax: dec!(0),
                },
                BracketContribution {
                    label: "800,001 - 1,600,000 @ 15%".to_string(),
                    rate: dec!(0.15),
                    taxable_amount: dec!(400000),
                    tax: dec!(60000),
                },
            ],
            reliefs: None,
        }
    }

    #[test]
    fn monthly_figures_divide_by_twelve() {
        let result = result();

        assert_eq!(result.monthly_tax(), dec!(5000));
        assert_eq!(result.monthly_net_income(), dec!(95000));
    }

    #[test]
    fn covered_amount_sums_breakdown() {
        assert_eq!(result().covered_amount(), dec!(1200000));
    }

    #[test]
    fn total_reliefs_is_zero_without_reliefs() {
        assert_eq!(result().total_reliefs(), dec!(0));
    }
}
