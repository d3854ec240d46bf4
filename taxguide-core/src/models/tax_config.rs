use serde::{Deserialize, Serialize};

use crate::error::TaxEngineError;
use crate::models::{BracketSchedule, CompanyTierConfig, ReliefConfig};

/// A complete constant set for one legislative version.
///
/// Bracket table, relief constants and company thresholds travel together so
/// that a legislative change is a data update. Deployments pick one set by
/// name through [`ScheduleRegistry`](crate::ScheduleRegistry).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxConfig {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub schedule: BracketSchedule,
    pub relief: ReliefConfig,
    pub company: CompanyTierConfig,
}

impl TaxConfig {
    /// Validates every part of the configuration.
    pub fn validate(&self) -> Result<(), TaxEngineError> {
        self.schedule.validate()?;
        self.relief.validate()?;
        self.company.validate()?;
        Ok(())
    }
}
