use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{TaxEngineError, ensure_fraction, ensure_non_negative_constant};

/// Company size tier used to select the corporate rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityTier {
    Small,
    Large,
}

impl EntityTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Large => "large",
        }
    }
}

impl fmt::Display for EntityTier {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a company qualifies for the small tier.
///
/// Both comparisons are inclusive: a turnover exactly at the threshold is
/// small.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "kebab-case")]
pub enum ThresholdPolicy {
    /// Small when turnover is at or below the threshold.
    TurnoverOnly { turnover_threshold: Decimal },

    /// Small when turnover and fixed assets are both at or below their thresholds.
    TurnoverAndAssets {
        turnover_threshold: Decimal,
        fixed_asset_threshold: Decimal,
    },
}

impl ThresholdPolicy {
    pub fn turnover_threshold(&self) -> Decimal {
        match self {
            Self::TurnoverOnly { turnover_threshold }
            | Self::TurnoverAndAssets {
                turnover_threshold, ..
            } => *turnover_threshold,
        }
    }

    pub fn fixed_asset_threshold(&self) -> Option<Decimal> {
        match self {
            Self::TurnoverOnly { .. } => None,
            Self::TurnoverAndAssets {
                fixed_asset_threshold,
                ..
            } => Some(*fixed_asset_threshold),
        }
    }

    /// Whether classification needs a fixed-asset figure.
    pub fn requires_fixed_assets(&self) -> bool {
        self.fixed_asset_threshold().is_some()
    }
}

/// Company tax constants for one legislative version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyTierConfig {
    #[serde(flatten)]
    pub policy: ThresholdPolicy,

    /// Corporate income tax rate for the large tier, as a fraction.
    pub large_cit_rate: Decimal,

    /// Development levy rate on profit for the large tier, as a fraction.
    pub development_levy_rate: Decimal,
}

impl CompanyTierConfig {
    /// Validates thresholds and rates.
    pub fn validate(&self) -> Result<(), TaxEngineError> {
        ensure_non_negative_constant("turnover threshold", self.policy.turnover_threshold())?;
        if let Some(assets) = self.policy.fixed_asset_threshold() {
            ensure_non_negative_constant("fixed asset threshold", assets)?;
        }
        ensure_fraction("large-company CIT rate", self.large_cit_rate)?;
        ensure_fraction("development levy rate", self.development_levy_rate)?;
        Ok(())
    }
}

/// Corporate tax owed by one company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyTaxResult {
    pub tier: EntityTier,
    /// Applied corporate rate as a fraction (zero for small companies).
    pub cit_rate: Decimal,
    pub cit: Decimal,
    pub development_levy: Decimal,
    pub total_tax: Decimal,
    /// Total tax as a percentage of profit.
    pub effective_rate: Decimal,
}
