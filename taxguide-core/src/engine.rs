//! Entry point bundling the three calculations over one constant set.

use rust_decimal::Decimal;

use crate::calculations::{BracketWalker, CompanyClassifier, ReliefCalculator};
use crate::error::TaxEngineError;
use crate::models::{CompanyTaxResult, EntityTier, ReliefBreakdown, ReliefInputs, TaxConfig, TaxResult};

/// Tax engine bound to a validated [`TaxConfig`].
///
/// The engine holds no state beyond the borrowed configuration, so one
/// instance can serve any number of calls from any number of threads.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use taxguide_core::{TaxEngine, presets};
///
/// let config = presets::reform_2025();
/// let engine = TaxEngine::new(&config).unwrap();
///
/// let result = engine.compute_bracket_tax(dec!(7200000)).unwrap();
/// assert_eq!(result.total_tax, dec!(1288000));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TaxEngine<'a> {
    config: &'a TaxConfig,
}

impl<'a> TaxEngine<'a> {
    /// Validates `config` and binds an engine to it.
    ///
    /// # Errors
    ///
    /// Returns an [`ErrorKind::InvalidConfiguration`](crate::ErrorKind) error
    /// if the bracket table, relief constants or company thresholds are
    /// inconsistent.
    pub fn new(config: &'a TaxConfig) -> Result<Self, TaxEngineError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &'a TaxConfig {
        self.config
    }

    /// Applies the bracket table directly to `taxable_amount`.
    pub fn compute_bracket_tax(
        &self,
        taxable_amount: Decimal,
    ) -> Result<TaxResult, TaxEngineError> {
        BracketWalker::new(&self.config.schedule).calculate(taxable_amount)
    }

    /// Computes the reliefs granted on `gross_income`.
    pub fn compute_reliefs(
        &self,
        gross_income: Decimal,
        inputs: &ReliefInputs,
    ) -> Result<ReliefBreakdown, TaxEngineError> {
        self.relief_calculator().compute_reliefs(gross_income, inputs)
    }

    /// Subtracts reliefs from `gross_income` and applies the bracket table.
    pub fn compute_relief_adjusted_tax(
        &self,
        gross_income: Decimal,
        inputs: &ReliefInputs,
    ) -> Result<TaxResult, TaxEngineError> {
        self.relief_calculator().calculate(gross_income, inputs)
    }

    pub fn classify_company(
        &self,
        turnover: Decimal,
        fixed_assets: Option<Decimal>,
    ) -> Result<EntityTier, TaxEngineError> {
        CompanyClassifier::new(&self.config.company).classify(turnover, fixed_assets)
    }

    pub fn classify_and_tax_company(
        &self,
        turnover: Decimal,
        profit: Decimal,
    ) -> Result<CompanyTaxResult, TaxEngineError> {
        CompanyClassifier::new(&self.config.company).classify_and_tax(turnover, profit)
    }

    pub fn classify_and_tax_company_with_assets(
        &self,
        turnover: Decimal,
        fixed_assets: Decimal,
        profit: Decimal,
    ) -> Result<CompanyTaxResult, TaxEngineError> {
        CompanyClassifier::new(&self.config.company).classify_and_tax_with_assets(
            turnover,
            fixed_assets,
            profit,
        )
    }

    fn relief_calculator(&self) -> ReliefCalculator<'a> {
        ReliefCalculator::new(&self.config.schedule, &self.config.relief)
    }
}
