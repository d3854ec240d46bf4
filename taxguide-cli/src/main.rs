use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;
use taxguide_core::{ReliefInputs, TaxEngine, presets};
use taxguide_cli::commands::{self, build_registry, select_config};
use taxguide_cli::logging;
use taxguide_cli::output::OutputFormat;
use taxguide_cli::utils::parse_decimal;
use tracing::{debug, info};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Progressive tax calculator for the 2025 tax reform.
///
/// Computes personal income tax (with or without reliefs) and company tax
/// under a built-in preset or a TOML configuration file.
#[derive(Debug, Parser)]
#[command(name = "taxguide", version)]
struct Cli {
    /// Built-in tax configuration to use.
    #[arg(long, global = true, default_value = presets::REFORM_2025)]
    preset: String,

    /// TOML tax configuration file; overrides --preset.
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Output format.
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    output: OutputFormat,

    /// Log level or filter directive (defaults to RUST_LOG, then warn).
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Also append log records to this file.
    #[arg(long, global = true, value_name = "PATH")]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Personal income tax on an amount, with no reliefs
    Personal(IncomeArgs),
    /// Personal income tax after pension, mortgage, education, housing-fund and CRA reliefs
    Relief {
        #[command(flatten)]
        income: IncomeArgs,
        #[command(flatten)]
        reliefs: ReliefArgs,
    },
    /// Company classification, income tax and development levy
    Company {
        /// Annual turnover
        #[arg(long, value_parser = parse_decimal)]
        turnover: Decimal,

        /// Taxable profit
        #[arg(long, value_parser = parse_decimal)]
        profit: Decimal,

        /// Fixed asset value (required when the small-company test includes assets)
        #[arg(long, value_parser = parse_decimal)]
        fixed_assets: Option<Decimal>,
    },
    /// Tax after reliefs under an older configuration and the active one
    Compare {
        #[command(flatten)]
        income: IncomeArgs,
        #[command(flatten)]
        reliefs: ReliefArgs,

        /// Configuration to compare against.
        #[arg(long, default_value = presets::PRE_REFORM)]
        old: String,
    },
    /// Tax after reliefs for every row of a CSV file
    Batch {
        /// Path to the batch CSV file
        #[arg(short, long)]
        file: PathBuf,
    },
    /// Print the active bracket table
    Brackets,
    /// List the available tax configurations
    Presets,
}

#[derive(Debug, Args)]
struct IncomeArgs {
    /// Gross income; thousands separators are accepted (1,200,000)
    #[arg(long, value_parser = parse_decimal)]
    income: Decimal,

    /// Treat --income as a monthly figure
    #[arg(long)]
    monthly: bool,
}

#[derive(Debug, Args)]
struct ReliefArgs {
    /// Pension contribution as a percentage of gross income
    #[arg(long, value_parser = parse_decimal, default_value = "0")]
    pension_rate: Decimal,

    /// Mortgage interest paid in the year
    #[arg(long, value_parser = parse_decimal, default_value = "0")]
    mortgage_interest: Decimal,

    /// Dependents in education
    #[arg(long, default_value_t = 0)]
    dependents: u32,

    /// Contributes to the National Housing Fund
    #[arg(long)]
    housing_fund: bool,
}

impl From<ReliefArgs> for ReliefInputs {
    fn from(args: ReliefArgs) -> Self {
        ReliefInputs {
            pension_rate: args.pension_rate,
            mortgage_interest: args.mortgage_interest,
            dependents_in_education: args.dependents,
            housing_fund_contributor: args.housing_fund,
        }
    }
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    logging::init_logging(cli.log_level.as_deref())?;
    if let Some(path) = &cli.log_file {
        logging::enable_file_logging(path)?;
    }

    let (registry, active) = build_registry(&cli.preset, cli.config.as_deref())?;
    let config = select_config(&registry, &active)?;
    let engine = TaxEngine::new(config)
        .with_context(|| format!("Invalid tax configuration '{active}'"))?;
    info!(config = %active, "tax configuration selected");
    debug!(command = ?cli.command, "dispatching");

    let format = cli.output;
    match cli.command {
        Command::Personal(income) => {
            commands::personal(&engine, income.income, income.monthly, format)
        }
        Command::Relief { income, reliefs } => commands::relief(
            &engine,
            income.income,
            income.monthly,
            &reliefs.into(),
            format,
        ),
        Command::Company {
            turnover,
            profit,
            fixed_assets,
        } => commands::company(&engine, turnover, profit, fixed_assets, format),
        Command::Compare {
            income,
            reliefs,
            old,
        } => {
            let old = select_config(&registry, &old)?;
            commands::compare(
                old,
                config,
                income.income,
                income.monthly,
                &reliefs.into(),
                format,
            )
        }
        Command::Batch { file } => commands::batch(&engine, &file, format),
        Command::Brackets => commands::brackets(config, format),
        Command::Presets => commands::presets(&registry, &active, format),
    }
}
