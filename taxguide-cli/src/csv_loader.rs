//! CSV loader for batch personal income tax input.
//!
//! ## CSV Format
//!
//! Column order does **not** matter (headers are matched by name). All header
//! names are case-sensitive and must match exactly. Amounts may use commas as
//! thousands separators.
//!
//! | Column | Required | Type | Notes |
//! |---------------------|----------|---------|------------------------------------------|
//! | `label` | yes | string | Free text identifying the taxpayer |
//! | `gross_income` | yes | decimal | Annual, e.g. `7,200,000` |
//! | `pension_rate` | no | decimal | Percentage, `8` for 8%; empty for 0 |
//! | `mortgage_interest` | no | decimal | Empty for 0 |
//! | `dependents` | no | integer | Dependents in education; empty for 0 |
//! | `housing_fund` | no | flag | `yes`/`no`, `true`/`false`, `1`/`0` |
//!
//! ### Minimal example
//!
//! ```csv
//! label,gross_income
//! Ada,1200000
//! ```
//!
//! ### Full example
//!
//! ```csv
//! label,gross_income,pension_rate,mortgage_interest,dependents,housing_fund
//! Ada,"5,000,000",8,600000,2,yes
//! Bayo,7200000,,,,no
//! ```
use rust_decimal::Decimal;
use serde::Deserialize;
use taxguide_core::ReliefInputs;

use crate::utils::{ParseDecimalError, parse_decimal, parse_optional_decimal};

// ---------------------------------------------------------------------------
// Serde-compatible row that mirrors the CSV layout exactly
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct CsvRow {
    label: String,
    gross_income: String,
    #[serde(default)]
    pension_rate: Option<String>,
    #[serde(default)]
    mortgage_interest: Option<String>,
    #[serde(default)]
    dependents: Option<u32>,
    #[serde(default)]
    housing_fund: Option<String>,
}

/// One taxpayer from a batch file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchEntry {
    pub label: String,
    pub gross_income: Decimal,
    pub reliefs: ReliefInputs,
}

// ---------------------------------------------------------------------------
// Public error type
// ---------------------------------------------------------------------------

/// Errors that can occur while loading or converting CSV data.
#[derive(Debug, thiserror::Error)]
pub enum BatchLoadError {
    /// The underlying CSV deserialisation failed (bad structure, missing
    /// required column, type mismatch, etc.).
    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),

    /// An amount cell could not be parsed. `row` is 1-based (header = row 0).
    #[error("invalid {field} on row {row}: {source}")]
    InvalidAmount {
        field: &'static str,
        row: usize,
        #[source]
        source: ParseDecimalError,
    },

    /// A `housing_fund` cell contained a value that is not a recognised flag.
    #[error("unrecognised housing_fund flag '{value}' on row {row}")]
    InvalidFlag { value: String, row: usize },

    #[error("cannot read batch file: {0}")]
    Io(#[from] std::io::Error),
}

// ---------------------------------------------------------------------------
// Core loader
// ---------------------------------------------------------------------------

fn parse_flag(
    value: Option<String>,
    row_number: usize,
) -> Result<bool, BatchLoadError> {
    let Some(value) = value else {
        return Ok(false);
    };
    match value.trim().to_lowercase().as_str() {
        "" | "no" | "n" | "false" | "0" => Ok(false),
        "yes" | "y" | "true" | "1" => Ok(true),
        _ => Err(BatchLoadError::InvalidFlag {
            value,
            row: row_number,
        }),
    }
}

fn parse_amount(
    field: &'static str,
    value: Option<&str>,
    row_number: usize,
) -> Result<Decimal, BatchLoadError> {
    let parsed = match value {
        Some(value) => parse_optional_decimal(value),
        None => Ok(None),
    };
    parsed
        .map(|amount| amount.unwrap_or(Decimal::ZERO))
        .map_err(|source| BatchLoadError::InvalidAmount {
            field,
            row: row_number,
            source,
        })
}

/// Convert a single CSV row into a [`BatchEntry`].
///
/// row_number is 1-based (for error messages).
fn convert_row(
    row: CsvRow,
    row_number: usize,
) -> Result<BatchEntry, BatchLoadError> {
    let gross_income =
        parse_decimal(&row.gross_income).map_err(|source| BatchLoadError::InvalidAmount {
            field: "gross_income",
            row: row_number,
            source,
        })?;

    let reliefs = ReliefInputs {
        pension_rate: parse_amount("pension_rate", row.pension_rate.as_deref(), row_number)?,
        mortgage_interest: parse_amount(
            "mortgage_interest",
            row.mortgage_interest.as_deref(),
            row_number,
        )?,
        dependents_in_education: row.dependents.unwrap_or(0),
        housing_fund_contributor: parse_flag(row.housing_fund, row_number)?,
    };

    Ok(BatchEntry {
        label: row.label,
        gross_income,
        reliefs,
    })
}

/// Parse CSV text (the full file contents as a &str) and return the batch
/// entries in file order.
///
/// # Errors
///
/// * [BatchLoadError::Parse] – if the CSV is structurally invalid or a
///   required column is missing.
/// * [BatchLoadError::InvalidAmount] – if an amount cell is not a number.
/// * [BatchLoadError::InvalidFlag] – if a `housing_fund` cell is not a flag.
pub fn load_from_str(input: &str) -> Result<Vec<BatchEntry>, BatchLoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All) // tolerate whitespace around values
        .flexible(false) // strict column count
        .from_reader(input.as_bytes());

    reader
        .deserialize::<CsvRow>()
        .enumerate()
        .map(|(idx, result)| {
            let row = result?;
            let row_number = idx + 1; // 1-based for user-facing messages
            convert_row(row, row_number)
        })
        .collect()
}

/// Convenience wrapper: read a file from disk and delegate to [load_from_str].
pub fn load_from_file(path: &std::path::Path) -> Result<Vec<BatchEntry>, BatchLoadError> {
    let contents = std::fs::read_to_string(path)?;
    load_from_str(&contents)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
