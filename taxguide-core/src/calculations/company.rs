//! Two-tier company classification and corporate tax.
//!
//! A company is small when its turnover is at or below the configured
//! threshold and, under the dual policy, its fixed assets are also at or below
//! theirs. Small companies owe no corporate tax and no development levy. Large
//! companies pay the flat corporate rate plus the levy, both on profit.

use rust_decimal::Decimal;
use tracing::debug;

use crate::calculations::common::{effective_rate, round_half_up};
use crate::error::{TaxEngineError, ensure_non_negative};
use crate::models::{CompanyTaxResult, CompanyTierConfig, EntityTier, ThresholdPolicy};

/// Classifier for company size tiers.
#[derive(Debug, Clone, Copy)]
pub struct CompanyClassifier<'a> {
    config: &'a CompanyTierConfig,
}

impl<'a> CompanyClassifier<'a> {
    pub fn new(config: &'a CompanyTierConfig) -> Self {
        Self { config }
    }

    /// Selects the tier for a company.
    ///
    /// `fixed_assets` is ignored under the turnover-only policy.
    ///
    /// # Errors
    ///
    /// Returns [`TaxEngineError`] if:
    /// - `turnover` or `fixed_assets` is negative
    /// - the policy tests fixed assets and `fixed_assets` is `None`
    pub fn classify(
        &self,
        turnover: Decimal,
        fixed_assets: Option<Decimal>,
    ) -> Result<EntityTier, TaxEngineError> {
        ensure_non_negative("turnover", turnover)?;
        if let Some(assets) = fixed_assets {
            ensure_non_negative("fixed assets", assets)?;
        }

        let small = match &self.config.policy {
            ThresholdPolicy::TurnoverOnly { turnover_threshold } => turnover <= *turnover_threshold,
            ThresholdPolicy::TurnoverAndAssets {
                turnover_threshold,
                fixed_asset_threshold,
            } => {
                let assets = fixed_assets.ok_or(TaxEngineError::MissingFixedAssets)?;
                turnover <= *turnover_threshold && assets <= *fixed_asset_threshold
            }
        };

        let tier = if small {
            EntityTier::Small
        } else {
            EntityTier::Large
        };
        debug!(
            turnover = %turnover,
            fixed_assets = ?fixed_assets,
            tier = %tier,
            "company classified"
        );
        Ok(tier)
    }

    /// Classifies on turnover alone and computes the tax on `profit`.
    ///
    /// # Errors
    ///
    /// Fails with [`TaxEngineError::MissingFixedAssets`] under the dual
    /// policy; use [`CompanyClassifier::classify_and_tax_with_assets`] there.
    pub fn classify_and_tax(
        &self,
        turnover: Decimal,
        profit: Decimal,
    ) -> Result<CompanyTaxResult, TaxEngineError> {
        self.tax_for(turnover, None, profit)
    }

    /// Classifies on turnover and fixed assets and computes the tax on `profit`.
    pub fn classify_and_tax_with_assets(
        &self,
        turnover: Decimal,
        fixed_assets: Decimal,
        profit: Decimal,
    ) -> Result<CompanyTaxResult, TaxEngineError> {
        self.tax_for(turnover, Some(fixed_assets), profit)
    }

    fn tax_for(
        &self,
        turnover: Decimal,
        fixed_assets: Option<Decimal>,
        profit: Decimal,
    ) -> Result<CompanyTaxResult, TaxEngineError> {
        let profit = ensure_non_negative("profit", profit)?;
        let tier = self.classify(turnover, fixed_assets)?;

        let (cit_rate, levy_rate) = match tier {
            EntityTier::Small => (Decimal::ZERO, Decimal::ZERO),
            EntityTier::Large => (
                self.config.large_cit_rate,
                self.config.development_levy_rate,
            ),
        };

        let cit = round_half_up(profit * cit_rate);
        let development_levy = round_half_up(profit * levy_rate);
        let total_tax = cit
            .checked_add(development_levy)
            .ok_or(TaxEngineError::AmountTooLarge {
                field: "company tax",
            })?;

        Ok(CompanyTaxResult {
            tier,
            cit_rate,
            cit,
            development_levy,
            total_tax,
            effective_rate: effective_rate(total_tax, profit),
        })
    }
}
