use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use taxguide_core::BracketSchedule;
use taxguide_data::{ConfigFileLoader, ScheduleCsvLoader};

/// Validate a bracket table and print its brackets.
///
/// Reads either a full TOML configuration (`--config`) or a CSV bracket
/// table (`--csv`). The CSV file should have the following columns:
/// - schedule: Name of the schedule (e.g., reform-2025)
/// - lower_bound: Lowest income in the bracket
/// - upper_bound: Highest income in the bracket (empty for unbounded)
/// - rate: The marginal tax rate as a decimal (e.g., 0.15)
/// - label: Optional display label
#[derive(Parser, Debug)]
#[command(name = "taxguide-schedule")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to a TOML tax configuration
    #[arg(short, long, conflicts_with = "csv")]
    config: Option<PathBuf>,

    /// Path to a CSV file containing bracket tables
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Only print the named schedule from the CSV file
    #[arg(short, long, requires = "csv")]
    schedule: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let schedules = match (&args.config, &args.csv) {
        (Some(path), _) => {
            let config = ConfigFileLoader::load_path(path)
                .with_context(|| format!("Failed to load configuration: {}", path.display()))?;
            println!("Configuration '{}' is valid.", config.name);
            vec![config.schedule]
        }
        (None, Some(path)) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open: {}", path.display()))?;
            match &args.schedule {
                Some(name) => vec![
                    ScheduleCsvLoader::load_one(file, name)
                        .with_context(|| format!("Failed to load schedule '{name}'"))?,
                ],
                None => ScheduleCsvLoader::load_all(file)
                    .with_context(|| format!("Failed to parse CSV: {}", path.display()))?,
            }
        }
        (None, None) => bail!("one of --config or --csv is required"),
    };

    for schedule in &schedules {
        print_schedule(schedule);
    }

    Ok(())
}

fn print_schedule(schedule: &BracketSchedule) {
    println!();
    println!("{} ({} brackets)", schedule.name, schedule.brackets().len());
    for bracket in schedule.brackets() {
        println!("  {}", bracket.display_label());
    }
}
