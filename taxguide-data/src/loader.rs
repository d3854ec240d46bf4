use std::io::Read;

use rust_decimal::Decimal;
use serde::Deserialize;
use taxguide_core::{BracketSchedule, TaxBracket};
use tracing::debug;

use crate::error::ConfigLoadError;

/// A single record from a bracket table CSV file.
///
/// - `schedule`: Name of the schedule the bracket belongs to (e.g. `reform-2025`)
/// - `lower_bound`: Lowest income in the bracket
/// - `upper_bound`: Highest income in the bracket (empty for unbounded)
/// - `rate`: The marginal tax rate as a decimal (e.g., 0.15 for 15%)
/// - `label`: Display label (empty for the default label)
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BracketRecord {
    pub schedule: String,
    pub lower_bound: Decimal,
    #[serde(deserialize_with = "deserialize_optional_decimal")]
    pub upper_bound: Option<Decimal>,
    pub rate: Decimal,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub label: Option<String>,
}

impl BracketRecord {
    fn to_bracket(&self) -> TaxBracket {
        let bracket = TaxBracket::new(self.lower_bound, self.upper_bound, self.rate);
        match &self.label {
            Some(label) => bracket.with_label(label.clone()),
            None => bracket,
        }
    }
}

fn deserialize_optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s
            .trim()
            .parse::<Decimal>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    Ok(s.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()))
}

/// Loader for bracket tables stored as CSV.
///
/// One file may hold several schedules; rows are grouped by their
/// `schedule` column in the order each schedule first appears, and rows
/// within a schedule keep their file order.
pub struct ScheduleCsvLoader;

impl ScheduleCsvLoader {
    /// Parse bracket records from a CSV reader.
    ///
    /// The reader can be any type that implements `Read`, such as a file or a
    /// string slice.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<BracketRecord>, ConfigLoadError> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: BracketRecord = result?;
            records.push(record);
        }

        Ok(records)
    }

    /// Group records into validated schedules.
    ///
    /// # Errors
    ///
    /// [`ConfigLoadError::InvalidSchedule`] names the first schedule that
    /// breaks the partition rules.
    pub fn group(records: &[BracketRecord]) -> Result<Vec<BracketSchedule>, ConfigLoadError> {
        let mut groups: Vec<(String, Vec<TaxBracket>)> = Vec::new();

        for record in records {
            match groups.iter_mut().find(|(name, _)| *name == record.schedule) {
                Some((_, brackets)) => brackets.push(record.to_bracket()),
                None => groups.push((record.schedule.clone(), vec![record.to_bracket()])),
            }
        }

        groups
            .into_iter()
            .map(|(name, brackets)| {
                debug!(schedule = %name, brackets = brackets.len(), "schedule parsed");
                BracketSchedule::new(name.clone(), brackets)
                    .map_err(|source| ConfigLoadError::InvalidSchedule { name, source })
            })
            .collect()
    }

    /// Parse and group every schedule in the reader.
    pub fn load_all<R: Read>(reader: R) -> Result<Vec<BracketSchedule>, ConfigLoadError> {
        let records = Self::parse(reader)?;
        Self::group(&records)
    }

    /// Parse the reader and return the schedule called `name`.
    ///
    /// # Errors
    ///
    /// [`ConfigLoadError::UnknownSchedule`] if no row carries that name.
    pub fn load_one<R: Read>(
        reader: R,
        name: &str,
    ) -> Result<BracketSchedule, ConfigLoadError> {
        let schedules = Self::load_all(reader)?;
        let available: Vec<String> = schedules.iter().map(|s| s.name.clone()).collect();

        schedules
            .into_iter()
            .find(|s| s.name == name)
            .ok_or_else(|| ConfigLoadError::UnknownSchedule {
                name: name.to_string(),
                available,
            })
    }
}
