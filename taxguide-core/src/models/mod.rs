mod company;
mod relief;
mod tax_bracket;
mod tax_config;
mod tax_result;

pub use company::{CompanyTaxResult, CompanyTierConfig, EntityTier, ThresholdPolicy};
pub use relief::{ReliefBreakdown, ReliefConfig, ReliefInputs};
pub use tax_bracket::{BracketSchedule, TaxBracket};
pub use tax_config::TaxConfig;
pub use tax_result::{BracketContribution, TaxResult};
