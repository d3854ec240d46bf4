//! Side-by-side comparison of two constant sets for the same taxpayer.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::engine::TaxEngine;
use crate::error::TaxEngineError;
use crate::models::{ReliefInputs, TaxConfig, TaxResult};

/// Relief-adjusted tax under an old and a new regime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegimeComparison {
    pub old_regime: String,
    pub new_regime: String,
    pub old: TaxResult,
    pub new: TaxResult,
    /// `new.total_tax - old.total_tax`; negative when the new regime is cheaper.
    pub difference: Decimal,
}

impl RegimeComparison {
    /// Tax saved by moving to the new regime, zero if it costs more.
    pub fn savings(&self) -> Decimal {
        (-self.difference).max(Decimal::ZERO)
    }

    pub fn new_regime_is_cheaper(&self) -> bool {
        self.difference < Decimal::ZERO
    }
}

/// Computes relief-adjusted tax on `gross_income` under both configurations.
///
/// # Errors
///
/// Fails if either configuration is invalid or the inputs are rejected by
/// either one.
pub fn compare_regimes(
    old: &TaxConfig,
    new: &TaxConfig,
    gross_income: Decimal,
    inputs: &ReliefInputs,
) -> Result<RegimeComparison, TaxEngineError> {
    let old_result = TaxEngine::new(old)?.compute_relief_adjusted_tax(gross_income, inputs)?;
    let new_result = TaxEngine::new(new)?.compute_relief_adjusted_tax(gross_income, inputs)?;
    let difference = new_result.total_tax - old_result.total_tax;

    debug!(
        old_regime = %old.name,
        new_regime = %new.name,
        gross_income = %gross_income,
        difference = %difference,
        "regimes compared"
    );

    Ok(RegimeComparison {
        old_regime: old.name.clone(),
        new_regime: new.name.clone(),
        old: old_result,
        new: new_result,
        difference,
    })
}
