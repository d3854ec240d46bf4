//! Subcommand implementations. Each one collects its numbers, calls the
//! engine and renders the result in the requested format.

use std::path::Path;

use anyhow::{Context, Result, bail};
use rust_decimal::Decimal;
use serde::Serialize;
use taxguide_core::{
    ReliefInputs, ScheduleRegistry, TaxConfig, TaxEngine, TaxResult, annualize_monthly,
    compare_regimes,
};
use taxguide_data::ConfigFileLoader;
use tracing::{debug, info};

use crate::csv_loader::{self, BatchEntry};
use crate::output::{OutputFormat, json, table};

/// Tax computed for one row of a batch file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchOutcome {
    pub label: String,
    pub result: TaxResult,
}

/// Builds the registry of built-in presets plus an optional configuration
/// file, and returns the name of the configuration to use.
pub fn build_registry(
    preset: &str,
    config_path: Option<&Path>,
) -> Result<(ScheduleRegistry, String)> {
    let mut registry = ScheduleRegistry::with_presets();
    let active = match config_path {
        Some(path) => ConfigFileLoader::register_path(&mut registry, path)
            .with_context(|| format!("Failed to load configuration: {}", path.display()))?,
        None => preset.to_string(),
    };
    Ok((registry, active))
}

/// Looks up a configuration by name with a helpful error.
pub fn select_config<'a>(
    registry: &'a ScheduleRegistry,
    name: &str,
) -> Result<&'a TaxConfig> {
    registry.get(name).with_context(|| {
        format!(
            "unknown tax configuration '{name}'; available: {:?}",
            registry.available()
        )
    })
}

/// Turns a monthly figure into an annual one when `monthly` is set.
pub fn annual_income(
    income: Decimal,
    monthly: bool,
) -> Result<Decimal> {
    if monthly {
        return Ok(annualize_monthly(income)?);
    }
    Ok(income)
}

fn emit_tax_result(
    result: &TaxResult,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Table => print!("{}", table::TaxTable(result)),
        OutputFormat::Json => json::print(result)?,
    }
    Ok(())
}

pub fn personal(
    engine: &TaxEngine<'_>,
    income: Decimal,
    monthly: bool,
    format: OutputFormat,
) -> Result<()> {
    let income = annual_income(income, monthly)?;
    let result = engine
        .compute_bracket_tax(income)
        .context("Cannot compute personal income tax")?;
    emit_tax_result(&result, format)
}

pub fn relief(
    engine: &TaxEngine<'_>,
    income: Decimal,
    monthly: bool,
    inputs: &ReliefInputs,
    format: OutputFormat,
) -> Result<()> {
    let income = annual_income(income, monthly)?;
    let result = engine
        .compute_relief_adjusted_tax(income, inputs)
        .context("Cannot compute tax after reliefs")?;
    emit_tax_result(&result, format)
}

/// Fails early when the active configuration classifies companies by fixed
/// assets but none were given.
pub fn check_company_args(
    config: &TaxConfig,
    fixed_assets: Option<Decimal>,
) -> Result<()> {
    if fixed_assets.is_none() && config.company.policy.requires_fixed_assets() {
        bail!(
            "'{}' also tests fixed assets to find small companies; pass --fixed-assets",
            config.name
        );
    }
    Ok(())
}

pub fn company(
    engine: &TaxEngine<'_>,
    turnover: Decimal,
    profit: Decimal,
    fixed_assets: Option<Decimal>,
    format: OutputFormat,
) -> Result<()> {
    check_company_args(engine.config(), fixed_assets)?;
    let result = match fixed_assets {
        Some(assets) => engine.classify_and_tax_company_with_assets(turnover, assets, profit),
        None => engine.classify_and_tax_company(turnover, profit),
    }
    .context("Cannot compute company tax")?;

    match format {
        OutputFormat::Table => print!("{}", table::CompanyTable(&result)),
        OutputFormat::Json => json::print(&result)?,
    }
    Ok(())
}

pub fn compare(
    old: &TaxConfig,
    new: &TaxConfig,
    income: Decimal,
    monthly: bool,
    inputs: &ReliefInputs,
    format: OutputFormat,
) -> Result<()> {
    let income = annual_income(income, monthly)?;
    let comparison = compare_regimes(old, new, income, inputs)
        .with_context(|| format!("Cannot compare '{}' with '{}'", old.name, new.name))?;

    match format {
        OutputFormat::Table => print!("{}", table::ComparisonTable(&comparison)),
        OutputFormat::Json => json::print(&comparison)?,
    }
    Ok(())
}

/// Computes relief-adjusted tax for every entry, stopping at the first
/// rejected row.
pub fn run_batch(
    engine: &TaxEngine<'_>,
    entries: Vec<BatchEntry>,
) -> Result<Vec<BatchOutcome>> {
    entries
        .into_iter()
        .enumerate()
        .map(|(idx, entry)| {
            let result = engine
                .compute_relief_adjusted_tax(entry.gross_income, &entry.reliefs)
                .with_context(|| format!("row {} ({})", idx + 1, entry.label))?;
            debug!(label = %entry.label, total_tax = %result.total_tax, "batch row computed");
            Ok(BatchOutcome {
                label: entry.label,
                result,
            })
        })
        .collect()
}

pub fn batch(
    engine: &TaxEngine<'_>,
    path: &Path,
    format: OutputFormat,
) -> Result<()> {
    let entries = csv_loader::load_from_file(path)
        .with_context(|| format!("Failed to load batch file: {}", path.display()))?;
    info!(rows = entries.len(), path = %path.display(), "batch file loaded");

    let outcomes = run_batch(engine, entries)?;
    match format {
        OutputFormat::Table => print!("{}", table::BatchTable(&outcomes)),
        OutputFormat::Json => json::print(&outcomes)?,
    }
    Ok(())
}

pub fn brackets(
    config: &TaxConfig,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Table => print!("{}", table::ScheduleTable(&config.schedule)),
        OutputFormat::Json => json::print(&config.schedule)?,
    }
    Ok(())
}

pub fn presets(
    registry: &ScheduleRegistry,
    active: &str,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Table => print!("{}", table::PresetList { registry, active }),
        OutputFormat::Json => json::print(&registry.available())?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use taxguide_core::presets;

    use super::*;

    #[test]
    fn annual_income_multiplies_monthly_figures() {
        assert_eq!(annual_income(dec!(100000), true).unwrap(), dec!(1200000));
        assert_eq!(annual_income(dec!(100000), false).unwrap(), dec!(100000));
        assert!(annual_income(dec!(-1), true).is_err());
        assert!(annual_income(Decimal::MAX, true).is_err());
    }

    #[test]
    fn build_registry_defaults_to_preset() {
        let (registry, active) = build_registry("pre-reform", None).unwrap();

        assert_eq!(active, "pre-reform");
        assert!(select_config(&registry, &active).is_ok());
    }

    #[test]
    fn select_config_lists_available_on_miss() {
        let registry = ScheduleRegistry::with_presets();

        let err = select_config(&registry, "2030").unwrap_err();

        assert!(err.to_string().contains("unknown tax configuration '2030'"));
        assert!(err.to_string().contains("reform-2025"));
    }

    #[test]
    fn check_company_args_asks_for_fixed_assets() {
        let reform = presets::reform_2025();
        let pre = presets::pre_reform();

        let err = check_company_args(&reform, None).unwrap_err();

        assert!(err.to_string().contains("pass --fixed-assets"));
        assert!(check_company_args(&reform, Some(dec!(1000000))).is_ok());
        assert!(check_company_args(&pre, None).is_ok());
    }

    #[test]
    fn run_batch_keeps_file_order() {
        let config = presets::reform_2025();
        let engine = TaxEngine::new(&config).unwrap();
        let entries = vec![
            BatchEntry {
                label: "a".to_string(),
                gross_income: dec!(1200000),
                reliefs: ReliefInputs::default(),
            },
            BatchEntry {
                label: "b".to_string(),
                gross_income: dec!(9000000),
                reliefs: ReliefInputs::default(),
            },
        ];

        let outcomes = run_batch(&engine, entries).unwrap();

        let labels: Vec<&str> = outcomes.iter().map(|o| o.label.as_str()).collect();
        assert_eq!(labels, vec!["a", "b"]);
        assert_eq!(outcomes[0].result.total_tax, dec!(0));
    }

    #[test]
    fn run_batch_names_rejected_row() {
        let config = presets::reform_2025();
        let engine = TaxEngine::new(&config).unwrap();
        let entries = vec![
            BatchEntry {
                label: "fine".to_string(),
                gross_income: dec!(1000000),
                reliefs: ReliefInputs::default(),
            },
            BatchEntry {
                label: "greedy".to_string(),
                gross_income: dec!(1000000),
                reliefs: ReliefInputs {
                    dependents_in_education: 7,
                    ..ReliefInputs::default()
                },
            },
        ];

        let err = run_batch(&engine, entries).unwrap_err();

        assert_eq!(err.to_string(), "row 2 (greedy)");
    }
}
