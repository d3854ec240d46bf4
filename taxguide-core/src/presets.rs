//! Built-in constant sets.
//!
//! Amounts are in naira. The mortgage interest cap has no statutory figure in
//! either regime; both presets use the same illustrative ceiling.

use rust_decimal_macros::dec;

use crate::models::{
    BracketSchedule, CompanyTierConfig, ReliefConfig, TaxBracket, TaxConfig, ThresholdPolicy,
};

pub const REFORM_2025: &str = "reform-2025";
pub const PRE_REFORM: &str = "pre-reform";

/// The 2025 reform: an 800,000 tax-free band, then 15% to 25%.
///
/// Companies are small when turnover is at most ₦50m and fixed assets at
/// most ₦250m; large companies pay 30% CIT plus a 4% development levy.
pub fn reform_2025() -> TaxConfig {
    TaxConfig {
        name: REFORM_2025.to_string(),
        description: Some("Nigeria Tax Act 2025 personal and company rates".to_string()),
        schedule: BracketSchedule {
            name: REFORM_2025.to_string(),
            brackets: vec![
                TaxBracket::new(dec!(0), Some(dec!(800000)), dec!(0)),
                TaxBracket::new(dec!(800001), Some(dec!(1600000)), dec!(0.15)),
                TaxBracket::new(dec!(1600001), Some(dec!(3200000)), dec!(0.19)),
                TaxBracket::new(dec!(3200001), Some(dec!(6400000)), dec!(0.21)),
                TaxBracket::new(dec!(6400001), Some(dec!(50000000)), dec!(0.24)),
                TaxBracket::new(dec!(50000001), None, dec!(0.25)),
            ],
        },
        relief: standard_relief(),
        company: CompanyTierConfig {
            policy: ThresholdPolicy::TurnoverAndAssets {
                turnover_threshold: dec!(50000000),
                fixed_asset_threshold: dec!(250000000),
            },
            large_cit_rate: dec!(0.30),
            development_levy_rate: dec!(0.04),
        },
    }
}

/// The regime in force before the reform: 7% to 24% from the first naira.
///
/// Companies with turnover up to ₦25m are small; the rest pay 30% CIT and
/// no development levy.
///
/// The company figures are approximate between ₦25m and ₦100m turnover. That
/// regime had a medium tier taxed at 20%, which this two-tier model charges
/// at the full 30%.
pub fn pre_reform() -> TaxConfig {
    TaxConfig {
        name: PRE_REFORM.to_string(),
        description: Some("Personal Income Tax Act rates before the 2025 reform".to_string()),
        schedule: BracketSchedule {
            name: PRE_REFORM.to_string(),
            brackets: vec![
                TaxBracket::new(dec!(0), Some(dec!(300000)), dec!(0.07)),
                TaxBracket::new(dec!(300001), Some(dec!(600000)), dec!(0.11)),
                TaxBracket::new(dec!(600001), Some(dec!(1100000)), dec!(0.15)),
                TaxBracket::new(dec!(1100001), Some(dec!(1600000)), dec!(0.19)),
                TaxBracket::new(dec!(1600001), Some(dec!(3200000)), dec!(0.21)),
                TaxBracket::new(dec!(3200001), None, dec!(0.24)),
            ],
        },
        relief: standard_relief(),
        company: CompanyTierConfig {
            policy: ThresholdPolicy::TurnoverOnly {
                turnover_threshold: dec!(25000000),
            },
            large_cit_rate: dec!(0.30),
            development_levy_rate: dec!(0),
        },
    }
}

/// Every built-in preset, newest first.
pub fn all() -> Vec<TaxConfig> {
    vec![reform_2025(), pre_reform()]
}

fn standard_relief() -> ReliefConfig {
    ReliefConfig {
        max_pension_rate: dec!(20),
        mortgage_interest_cap: dec!(500000),
        education_allowance_per_dependent: dec!(2500),
        max_dependents: 4,
        housing_fund_rate: dec!(0.025),
        cra_floor: dec!(200000),
        cra_floor_rate: dec!(0.01),
        cra_additional_rate: dec!(0.20),
    }
}
