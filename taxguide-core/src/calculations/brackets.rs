//! Progressive bracket walk.
//!
//! The walker keeps a running remainder, starting at the taxable amount, and
//! visits brackets in ascending order. Each bracket absorbs
//! `min(remaining, width)` where `width = upper - lower + 1` (the opening
//! bracket, whose lower bound is zero, absorbs exactly `upper`). The absorbed
//! amount is taxed at the bracket's marginal rate and the walk stops as soon
//! as nothing remains.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use taxguide_core::calculations::BracketWalker;
//! use taxguide_core::presets;
//!
//! let config = presets::reform_2025();
//! let walker = BracketWalker::new(&config.schedule);
//!
//! // 100,000 a month: the first 800,000 is tax-free, the next 400,000 is taxed at 15%.
//! let result = walker.calculate(dec!(1200000)).unwrap();
//!
//! assert_eq!(result.total_tax, dec!(60000));
//! assert_eq!(result.effective_rate, dec!(5.00));
//! assert_eq!(result.breakdown.len(), 2);
//! ```

use rust_decimal::Decimal;
use tracing::{debug, trace};

use crate::calculations::common::{effective_rate, round_half_up};
use crate::error::{TaxEngineError, ensure_non_negative};
use crate::models::{BracketContribution, BracketSchedule, ReliefBreakdown, TaxBracket, TaxResult};

/// Per-bracket contributions and their total, before any result shaping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct BracketWalk {
    pub contributions: Vec<BracketContribution>,
    pub total_tax: Decimal,
}

/// Calculator that applies a bracket schedule to a taxable amount.
///
/// The walker borrows an already validated schedule; validation happens when
/// the schedule is built or when [`TaxEngine`](crate::TaxEngine) is created.
#[derive(Debug, Clone, Copy)]
pub struct BracketWalker<'a> {
    schedule: &'a BracketSchedule,
}

impl<'a> BracketWalker<'a> {
    pub fn new(schedule: &'a BracketSchedule) -> Self {
        Self { schedule }
    }

    /// Computes the tax on `taxable_amount` with no reliefs applied.
    ///
    /// The effective rate is measured against `taxable_amount` itself.
    ///
    /// # Errors
    ///
    /// Returns [`TaxEngineError::NegativeAmount`] for a negative amount.
    /// Callers are expected to clamp to zero before asking.
    pub fn calculate(
        &self,
        taxable_amount: Decimal,
    ) -> Result<TaxResult, TaxEngineError> {
        let taxable_amount = ensure_non_negative("taxable amount", taxable_amount)?;
        let walk = self.walk(taxable_amount);
        Ok(self.to_result(taxable_amount, taxable_amount, walk, None))
    }

    /// Walks the schedule and collects per-bracket contributions.
    ///
    /// `taxable_amount` must already be non-negative.
    pub(crate) fn walk(
        &self,
        taxable_amount: Decimal,
    ) -> BracketWalk {
        let mut remaining = taxable_amount;
        let mut total_tax = Decimal::ZERO;
        let mut contributions = Vec::new();

        for bracket in self.schedule.brackets() {
            if remaining <= Decimal::ZERO {
                break;
            }

            let absorbed = Self::absorbed_amount(bracket, remaining);
            let tax = round_half_up(absorbed * bracket.rate);
            trace!(
                bracket = %bracket.display_label(),
                absorbed = %absorbed,
                tax = %tax,
                "bracket consumed"
            );

            if absorbed > Decimal::ZERO {
                contributions.push(BracketContribution {
                    label: bracket.display_label(),
                    rate: bracket.rate,
                    taxable_amount: absorbed,
                    tax,
                });
            }

            total_tax += tax;
            remaining -= absorbed;
        }

        debug!(
            schedule = %self.schedule.name,
            taxable_amount = %taxable_amount,
            total_tax = %total_tax,
            brackets_used = contributions.len(),
            "bracket walk complete"
        );

        BracketWalk {
            contributions,
            total_tax,
        }
    }

    /// Shapes a walk into a [`TaxResult`], measuring the effective rate
    /// against `gross_income`.
    pub(crate) fn to_result(
        &self,
        gross_income: Decimal,
        taxable_income: Decimal,
        walk: BracketWalk,
        reliefs: Option<ReliefBreakdown>,
    ) -> TaxResult {
        TaxResult {
            gross_income,
            taxable_income,
            total_tax: walk.total_tax,
            effective_rate: effective_rate(walk.total_tax, gross_income),
            net_income: gross_income - walk.total_tax,
            breakdown: walk.contributions,
            reliefs,
        }
    }

    /// Amount of `remaining` that falls into `bracket`.
    fn absorbed_amount(
        bracket: &TaxBracket,
        remaining: Decimal,
    ) -> Decimal {
        match bracket.width() {
            Some(width) => remaining.min(width),
            None => remaining,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn reform_schedule() -> BracketSchedule {
        BracketSchedule::new(
            "reform-2025",
            vec![
                TaxBracket::new(dec!(0), Some(dec!(800000)), dec!(0)),
                TaxBracket::new(dec!(800001), Some(dec!(1600000)), dec!(0.15)),
                TaxBracket::new(dec!(1600001), Some(dec!(3200000)), dec!(0.19)),
                TaxBracket::new(dec!(3200001), Some(dec!(6400000)), dec!(0.21)),
                TaxBracket::new(dec!(6400001), Some(dec!(50000000)), dec!(0.24)),
                TaxBracket::new(dec!(50000001), None, dec!(0.25)),
            ],
        )
        .unwrap()
    }

    fn flat_schedule() -> BracketSchedule {
        BracketSchedule::new("flat", vec![TaxBracket::new(dec!(0), None, dec!(0.10))]).unwrap()
    }

    // =========================================================================
    // zero and invalid input
    // =========================================================================

    #[test]
    fn calculate_returns_zero_for_zero_income() {
        let schedule = reform_schedule();
        let walker = BracketWalker::new(&schedule);

        let result = walker.calculate(dec!(0)).unwrap();

        assert_eq!(result.total_tax, dec!(0));
        assert_eq!(result.effective_rate, dec!(0));
        assert!(result.breakdown.is_empty());
    }

    #[test]
    fn calculate_rejects_negative_income() {
        let schedule = reform_schedule();
        let walker = BracketWalker::new(&schedule);

        let result = walker.calculate(dec!(-1));

        assert_eq!(
            result,
            Err(TaxEngineError::NegativeAmount {
                field: "taxable amount",
                value: dec!(-1),
            })
        );
    }

    // =========================================================================
    // bracket boundaries
    // =========================================================================

    #[test]
    fn calculate_top_of_tax_free_band_owes_nothing() {
        let schedule = reform_schedule();
        let walker = BracketWalker::new(&schedule);

        let result = walker.calculate(dec!(800000)).unwrap();

        assert_eq!(result.total_tax, dec!(0));
        assert_eq!(result.breakdown.len(), 1);
        assert_eq!(result.breakdown[0].label, "First 800,000 (tax-free)");
        assert_eq!(result.breakdown[0].taxable_amount, dec!(800000));
        assert_eq!(result.breakdown[0].tax, dec!(0));
    }

    #[test]
    fn calculate_first_unit_above_tax_free_band() {
        let schedule = reform_schedule();
        let walker = BracketWalker::new(&schedule);

        let result = walker.calculate(dec!(800001)).unwrap();

        // One unit taxed at 15%
        assert_eq!(result.total_tax, dec!(0.15));
        assert_eq!(result.breakdown.len(), 2);
        assert_eq!(result.breakdown[1].taxable_amount, dec!(1));
    }

    #[test]
    fn calculate_second_bracket() {
        let schedule = reform_schedule();
        let walker = BracketWalker::new(&schedule);

        let result = walker.calculate(dec!(1200000)).unwrap();

        // 0 + 400,000 * 0.15
        assert_eq!(result.total_tax, dec!(60000));
        assert_eq!(result.net_income, dec!(1140000));
    }

    #[test]
    fn calculate_fifth_bracket() {
        let schedule = reform_schedule();
        let walker = BracketWalker::new(&schedule);

        let result = walker.calculate(dec!(7200000)).unwrap();

        // 0 + 120,000 + 304,000 + 672,000 + 192,000
        assert_eq!(result.total_tax, dec!(1288000));
        let taxes: Vec<Decimal> = result.breakdown.iter().map(|c| c.tax).collect();
        assert_eq!(
            taxes,
            vec![dec!(0), dec!(120000), dec!(304000), dec!(672000), dec!(192000)]
        );
        assert_eq!(result.effective_rate, dec!(17.89));
    }

    #[test]
    fn calculate_top_bracket() {
        let schedule = reform_schedule();
        let walker = BracketWalker::new(&schedule);

        let result = walker.calculate(dec!(60000000)).unwrap();

        // 120,000 + 304,000 + 672,000 + 43,600,000 * 0.24 + 10,000,000 * 0.25
        assert_eq!(result.total_tax, dec!(14060000));
        assert_eq!(result.breakdown.len(), 6);
        assert_eq!(result.breakdown[5].label, "Above 50,000,000 @ 25%");
        assert_eq!(result.breakdown[5].taxable_amount, dec!(10000000));
    }

    #[test]
    fn calculate_fractional_amount_rounds_half_up() {
        let schedule = reform_schedule();
        let walker = BracketWalker::new(&schedule);

        let result = walker.calculate(dec!(800000.50)).unwrap();

        // 0.50 * 0.15 = 0.075 -> 0.08
        assert_eq!(result.total_tax, dec!(0.08));
    }

    #[test]
    fn calculate_breakdown_covers_whole_amount() {
        let schedule = reform_schedule();
        let walker = BracketWalker::new(&schedule);

        let result = walker.calculate(dec!(7200000)).unwrap();

        assert_eq!(result.covered_amount(), dec!(7200000));
    }

    #[test]
    fn calculate_single_unbounded_bracket() {
        let schedule = flat_schedule();
        let walker = BracketWalker::new(&schedule);

        let result = walker.calculate(dec!(1000)).unwrap();

        assert_eq!(result.total_tax, dec!(100));
        assert_eq!(result.effective_rate, dec!(10));
        assert_eq!(result.breakdown[0].label, "Above 0 @ 10%");
    }

    #[test]
    fn calculate_has_no_reliefs() {
        let schedule = reform_schedule();
        let walker = BracketWalker::new(&schedule);

        let result = walker.calculate(dec!(5000000)).unwrap();

        assert_eq!(result.reliefs, None);
        assert_eq!(result.taxable_income, result.gross_income);
    }
}
