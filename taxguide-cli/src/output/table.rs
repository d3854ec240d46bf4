use std::fmt;

use taxguide_core::{
    BracketSchedule, CompanyTaxResult, EntityTier, RegimeComparison, ReliefBreakdown,
    ScheduleRegistry, TaxResult,
};

use crate::commands::BatchOutcome;
use crate::utils::{format_naira, format_percent, format_rate};

const LABEL_WIDTH: usize = 22;
const AMOUNT_WIDTH: usize = 16;

fn row(
    f: &mut fmt::Formatter<'_>,
    label: &str,
    value: &str,
) -> fmt::Result {
    writeln!(f, "  {label:<LABEL_WIDTH$}{value:>AMOUNT_WIDTH$}")
}

/// Annual and monthly figures plus the per-bracket breakdown.
pub struct TaxTable<'a>(pub &'a TaxResult);

impl fmt::Display for TaxTable<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let result = self.0;

        row(f, "Gross income", &format_naira(result.gross_income))?;
        if let Some(reliefs) = &result.reliefs {
            write!(f, "{}", ReliefRows(reliefs))?;
        }
        row(f, "Taxable income", &format_naira(result.taxable_income))?;
        row(f, "Tax payable", &format_naira(result.total_tax))?;
        row(f, "  per month", &format_naira(result.monthly_tax()))?;
        row(f, "Effective rate", &format_percent(result.effective_rate))?;
        row(f, "Net income", &format_naira(result.net_income))?;
        row(f, "  per month", &format_naira(result.monthly_net_income()))?;

        if result.breakdown.is_empty() {
            return Ok(());
        }

        let label_width = result
            .breakdown
            .iter()
            .map(|c| c.label.chars().count())
            .max()
            .unwrap_or(10);

        writeln!(f)?;
        writeln!(
            f,
            "  {:<label_width$}  {:>AMOUNT_WIDTH$}  {:>AMOUNT_WIDTH$}",
            "Bracket", "Taxed amount", "Tax"
        )?;
        for contribution in &result.breakdown {
            writeln!(
                f,
                "  {:<label_width$}  {:>AMOUNT_WIDTH$}  {:>AMOUNT_WIDTH$}",
                contribution.label,
                format_naira(contribution.taxable_amount),
                format_naira(contribution.tax),
            )?;
        }
        Ok(())
    }
}

struct ReliefRows<'a>(&'a ReliefBreakdown);

impl fmt::Display for ReliefRows<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let reliefs = self.0;
        let lines = [
            ("  Pension", reliefs.pension),
            ("  Mortgage interest", reliefs.mortgage),
            ("  Education", reliefs.education),
            ("  Housing fund", reliefs.housing_fund),
            ("  CRA", reliefs.consolidated),
        ];

        for (label, amount) in lines {
            if !amount.is_zero() {
                row(f, label, &format_naira(amount))?;
            }
        }
        row(f, "Total reliefs", &format_naira(reliefs.total))
    }
}

pub struct CompanyTable<'a>(pub &'a CompanyTaxResult);

impl fmt::Display for CompanyTable<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let result = self.0;
        let tier = match result.tier {
            EntityTier::Small => "Small company",
            EntityTier::Large => "Large company",
        };

        row(f, "Classification", tier)?;
        row(f, "CIT rate", &format_rate(result.cit_rate))?;
        row(f, "Company income tax", &format_naira(result.cit))?;
        row(f, "Development levy", &format_naira(result.development_levy))?;
        row(f, "Total tax", &format_naira(result.total_tax))?;
        row(f, "Effective rate", &format_percent(result.effective_rate))
    }
}

pub struct ComparisonTable<'a>(pub &'a RegimeComparison);

impl fmt::Display for ComparisonTable<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let comparison = self.0;
        let (old, new) = (&comparison.old, &comparison.new);

        writeln!(
            f,
            "  {:<LABEL_WIDTH$}{:>AMOUNT_WIDTH$}{:>AMOUNT_WIDTH$}",
            "", comparison.old_regime, comparison.new_regime
        )?;
        let lines = [
            ("Total reliefs", old.total_reliefs(), new.total_reliefs()),
            ("Taxable income", old.taxable_income, new.taxable_income),
            ("Annual tax", old.total_tax, new.total_tax),
            ("Monthly tax", old.monthly_tax(), new.monthly_tax()),
            ("Net income", old.net_income, new.net_income),
        ];
        for (label, old_value, new_value) in lines {
            writeln!(
                f,
                "  {label:<LABEL_WIDTH$}{:>AMOUNT_WIDTH$}{:>AMOUNT_WIDTH$}",
                format_naira(old_value),
                format_naira(new_value),
            )?;
        }
        writeln!(
            f,
            "  {:<LABEL_WIDTH$}{:>AMOUNT_WIDTH$}{:>AMOUNT_WIDTH$}",
            "Effective rate",
            format_percent(old.effective_rate),
            format_percent(new.effective_rate),
        )?;

        writeln!(f)?;
        if comparison.new_regime_is_cheaper() {
            writeln!(
                f,
                "  You save {} a year under {}.",
                format_naira(comparison.savings()),
                comparison.new_regime
            )
        } else if comparison.difference.is_zero() {
            writeln!(f, "  Your tax is unchanged.")
        } else {
            writeln!(
                f,
                "  You pay {} more a year under {}.",
                format_naira(comparison.difference),
                comparison.new_regime
            )
        }
    }
}

pub struct ScheduleTable<'a>(pub &'a BracketSchedule);

impl fmt::Display for ScheduleTable<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let schedule = self.0;
        writeln!(f, "{} ({} brackets)", schedule.name, schedule.brackets().len())?;
        for bracket in schedule.brackets() {
            writeln!(f, "  {}", bracket.display_label())?;
        }
        writeln!(f, "Top marginal rate: {}", format_rate(schedule.top_rate()))
    }
}

/// Registered configuration names, marking the active one.
pub struct PresetList<'a> {
    pub registry: &'a ScheduleRegistry,
    pub active: &'a str,
}

impl fmt::Display for PresetList<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        for name in self.registry.available() {
            let marker = if name == self.active { "*" } else { " " };
            let description = self
                .registry
                .get(name)
                .and_then(|c| c.description.as_deref())
                .unwrap_or("");
            writeln!(f, "{marker} {name:<16} {description}")?;
        }
        Ok(())
    }
}

pub struct BatchTable<'a>(pub &'a [BatchOutcome]);

impl fmt::Display for BatchTable<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let label_width = self
            .0
            .iter()
            .map(|o| o.label.chars().count())
            .max()
            .unwrap_or(5)
            .max(5);

        writeln!(
            f,
            "{:<label_width$}  {:>AMOUNT_WIDTH$}  {:>AMOUNT_WIDTH$}  {:>AMOUNT_WIDTH$}  {:>9}",
            "Label", "Gross income", "Taxable income", "Tax", "Rate"
        )?;
        for outcome in self.0 {
            let result = &outcome.result;
            writeln!(
                f,
                "{:<label_width$}  {:>AMOUNT_WIDTH$}  {:>AMOUNT_WIDTH$}  {:>AMOUNT_WIDTH$}  {:>9}",
                outcome.label,
                format_naira(result.gross_income),
                format_naira(result.taxable_income),
                format_naira(result.total_tax),
                format_percent(result.effective_rate),
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use taxguide_core::{ReliefInputs, TaxEngine, compare_regimes, presets};

    use super::*;

    #[test]
    fn tax_table_lists_brackets() {
        let config = presets::reform_2025();
        let engine = TaxEngine::new(&config).unwrap();
        let result = engine.compute_bracket_tax(dec!(1200000)).unwrap();

        let text = TaxTable(&result).to_string();

        assert!(text.contains("₦1,200,000"));
        assert!(text.contains("₦60,000"));
        assert!(text.contains("5.00%"));
        assert!(text.contains("First 800,000 (tax-free)"));
        assert!(text.contains("800,001 - 1,600,000 @ 15%"));
        assert!(!text.contains("Total reliefs"));
    }

    #[test]
    fn tax_table_shows_non_zero_reliefs() {
        let config = presets::reform_2025();
        let engine = TaxEngine::new(&config).unwrap();
        let result = engine
            .compute_relief_adjusted_tax(dec!(2000000), &ReliefInputs::default())
            .unwrap();

        let text = TaxTable(&result).to_string();

        assert!(text.contains("CRA"));
        assert!(text.contains("Total reliefs"));
        assert!(!text.contains("Pension"));
    }

    #[test]
    fn company_table_names_tier() {
        let result = CompanyTaxResult {
            tier: EntityTier::Small,
            cit_rate: dec!(0),
            cit: dec!(0),
            development_levy: dec!(0),
            total_tax: dec!(0),
            effective_rate: dec!(0),
        };

        let text = CompanyTable(&result).to_string();

        assert!(text.contains("Small company"));
        assert!(text.contains("0.00%"));
    }

    #[test]
    fn comparison_table_reports_savings() {
        let comparison = compare_regimes(
            &presets::pre_reform(),
            &presets::reform_2025(),
            dec!(1200000),
            &ReliefInputs::default(),
        )
        .unwrap();

        let text = ComparisonTable(&comparison).to_string();

        assert!(text.contains("You save ₦78,000 a year under reform-2025."));
        assert!(text.contains("Total reliefs"));
        assert!(text.contains("₦440,000"));
    }

    #[test]
    fn schedule_table_lists_brackets_and_top_rate() {
        let config = presets::pre_reform();

        let text = ScheduleTable(&config.schedule).to_string();

        assert_eq!(text.lines().count(), 8);
        assert_eq!(text.lines().next(), Some("pre-reform (6 brackets)"));
        assert_eq!(text.lines().last(), Some("Top marginal rate: 24%"));
    }

    #[test]
    fn preset_list_marks_active() {
        let registry = ScheduleRegistry::with_presets();

        let text = PresetList {
            registry: &registry,
            active: "reform-2025",
        }
        .to_string();

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("  pre-reform"));
        assert!(lines[1].starts_with("* reform-2025"));
    }
}
