//! Relief-adjusted personal income tax.
//!
//! Reliefs are subtracted from gross income before the bracket walk. All five
//! reliefs are computed from gross income independently and summed; none
//! compounds on another.
//!
//! | Step | Relief | Amount |
//! |------|--------|--------|
//! | 1 | Pension | gross × pension rate / 100 |
//! | 2 | Mortgage interest | min(interest paid, cap) |
//! | 3 | Education | dependents × allowance per dependent |
//! | 4 | Housing fund | gross × housing-fund rate, if contributing |
//! | 5 | Consolidated relief allowance | max(floor, gross × floor rate) + gross × additional rate |
//!
//! Taxable income is `max(0, gross - total relief)`. The effective rate of the
//! resulting [`TaxResult`] is measured against gross income.
//!
//! # Input handling
//!
//! Mortgage interest above the cap is clamped. Every other out-of-range input
//! (negative gross, negative interest, pension rate above the maximum,
//! dependents above the maximum) is rejected with an
//! [`ErrorKind::InvalidArgument`](crate::ErrorKind) error.

use rust_decimal::Decimal;
use tracing::debug;

use crate::calculations::brackets::BracketWalker;
use crate::calculations::common::{max, percent_of, round_half_up};
use crate::error::{TaxEngineError, ensure_non_negative};
use crate::models::{BracketSchedule, ReliefBreakdown, ReliefConfig, ReliefInputs, TaxResult};

/// Calculator for tax after reliefs.
#[derive(Debug, Clone, Copy)]
pub struct ReliefCalculator<'a> {
    schedule: &'a BracketSchedule,
    config: &'a ReliefConfig,
}

impl<'a> ReliefCalculator<'a> {
    pub fn new(
        schedule: &'a BracketSchedule,
        config: &'a ReliefConfig,
    ) -> Self {
        Self { schedule, config }
    }

    /// Computes tax on gross income after reliefs.
    ///
    /// # Errors
    ///
    /// See [`ReliefCalculator::compute_reliefs`].
    pub fn calculate(
        &self,
        gross_income: Decimal,
        inputs: &ReliefInputs,
    ) -> Result<TaxResult, TaxEngineError> {
        let reliefs = self.compute_reliefs(gross_income, inputs)?;
        let taxable_income = self.taxable_income(gross_income, reliefs.total);

        let walker = BracketWalker::new(self.schedule);
        let walk = walker.walk(taxable_income);
        Ok(walker.to_result(gross_income, taxable_income, walk, Some(reliefs)))
    }

    /// Computes each relief and their total without applying the brackets.
    ///
    /// # Errors
    ///
    /// Returns [`TaxEngineError`] if:
    /// - `gross_income` or `mortgage_interest` is negative
    /// - `pension_rate` is outside `[0, max_pension_rate]`
    /// - `dependents_in_education` exceeds `max_dependents`
    /// - a relief or their sum does not fit in a decimal
    pub fn compute_reliefs(
        &self,
        gross_income: Decimal,
        inputs: &ReliefInputs,
    ) -> Result<ReliefBreakdown, TaxEngineError> {
        self.check_inputs(gross_income, inputs)?;

        let pension = self.pension_relief(gross_income, inputs.pension_rate);
        let mortgage = self.mortgage_relief(inputs.mortgage_interest);
        let education = self.education_relief(inputs.dependents_in_education)?;
        let housing_fund = self.housing_fund_relief(gross_income, inputs.housing_fund_contributor);
        let consolidated = self.consolidated_relief_allowance(gross_income)?;
        let total = [mortgage, education, housing_fund, consolidated]
            .into_iter()
            .try_fold(pension, Decimal::checked_add)
            .ok_or(TaxEngineError::AmountTooLarge {
                field: "total relief",
            })?;

        debug!(
            gross_income = %gross_income,
            pension = %pension,
            mortgage = %mortgage,
            education = %education,
            housing_fund = %housing_fund,
            consolidated = %consolidated,
            total = %total,
            "reliefs computed"
        );

        Ok(ReliefBreakdown {
            pension,
            mortgage,
            education,
            housing_fund,
            consolidated,
            total,
        })
    }

    fn check_inputs(
        &self,
        gross_income: Decimal,
        inputs: &ReliefInputs,
    ) -> Result<(), TaxEngineError> {
        ensure_non_negative("gross income", gross_income)?;
        ensure_non_negative("mortgage interest", inputs.mortgage_interest)?;

        if inputs.pension_rate < Decimal::ZERO || inputs.pension_rate > self.config.max_pension_rate
        {
            return Err(TaxEngineError::PensionRateOutOfRange {
                value: inputs.pension_rate,
                max: self.config.max_pension_rate,
            });
        }
        if inputs.dependents_in_education > self.config.max_dependents {
            return Err(TaxEngineError::TooManyDependents {
                value: inputs.dependents_in_education,
                max: self.config.max_dependents,
            });
        }
        Ok(())
    }

    /// Step 1: pension contribution.
    fn pension_relief(
        &self,
        gross_income: Decimal,
        pension_rate: Decimal,
    ) -> Decimal {
        round_half_up(percent_of(gross_income, pension_rate))
    }

    /// Step 2: mortgage interest, clamped to the cap.
    fn mortgage_relief(
        &self,
        mortgage_interest: Decimal,
    ) -> Decimal {
        round_half_up(mortgage_interest.min(self.config.mortgage_interest_cap))
    }

    /// Step 3: fixed allowance per dependent in education.
    fn education_relief(
        &self,
        dependents: u32,
    ) -> Result<Decimal, TaxEngineError> {
        Decimal::from(dependents)
            .checked_mul(self.config.education_allowance_per_dependent)
            .map(round_half_up)
            .ok_or(TaxEngineError::AmountTooLarge {
                field: "education relief",
            })
    }

    /// Step 4: housing-fund contribution.
    fn housing_fund_relief(
        &self,
        gross_income: Decimal,
        contributor: bool,
    ) -> Decimal {
        if !contributor {
            return Decimal::ZERO;
        }
        round_half_up(gross_income * self.config.housing_fund_rate)
    }

    /// Step 5: consolidated relief allowance.
    fn consolidated_relief_allowance(
        &self,
        gross_income: Decimal,
    ) -> Result<Decimal, TaxEngineError> {
        let floor = max(
            self.config.cra_floor,
            gross_income * self.config.cra_floor_rate,
        );
        floor
            .checked_add(gross_income * self.config.cra_additional_rate)
            .map(round_half_up)
            .ok_or(TaxEngineError::AmountTooLarge {
                field: "consolidated relief allowance",
            })
    }

    /// Gross income less reliefs, never negative.
    fn taxable_income(
        &self,
        gross_income: Decimal,
        total_reliefs: Decimal,
    ) -> Decimal {
        max(gross_income - total_reliefs, Decimal::ZERO)
    }
}
