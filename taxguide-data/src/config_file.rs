use std::fs;
use std::path::Path;

use taxguide_core::{ScheduleRegistry, TaxConfig};
use tracing::{debug, info};

use crate::error::ConfigLoadError;

/// Loader for complete tax configurations stored as TOML.
///
/// ```toml
/// name = "reform-2025"
///
/// [[schedule.brackets]]
/// lower_bound = 0
/// upper_bound = 800000
/// rate = 0
///
/// [[schedule.brackets]]
/// lower_bound = 800001
/// rate = 0.15
///
/// [relief]
/// max_pension_rate = 20
/// # ...
///
/// [company]
/// policy = "turnover-only"
/// turnover_threshold = 50000000
/// large_cit_rate = 0.30
/// development_levy_rate = 0.04
/// ```
///
/// Decimal values may be written as TOML numbers or strings (`"0.15"`).
/// A schedule without a `name` takes the configuration's name.
pub struct ConfigFileLoader;

impl ConfigFileLoader {
    /// Parse and validate a configuration from TOML text.
    pub fn parse_str(text: &str) -> Result<TaxConfig, ConfigLoadError> {
        let mut config: TaxConfig = toml::from_str(text)?;
        if config.schedule.name.is_empty() {
            config.schedule.name = config.name.clone();
        }
        config.validate()?;

        debug!(
            name = %config.name,
            brackets = config.schedule.brackets().len(),
            "configuration parsed"
        );
        Ok(config)
    }

    /// Read, parse and validate a configuration file.
    pub fn load_path(path: &Path) -> Result<TaxConfig, ConfigLoadError> {
        let text = fs::read_to_string(path)?;
        let config = Self::parse_str(&text)?;
        info!(path = %path.display(), name = %config.name, "configuration loaded");
        Ok(config)
    }

    /// Load a configuration file into `registry`, returning its name.
    pub fn register_path(
        registry: &mut ScheduleRegistry,
        path: &Path,
    ) -> Result<String, ConfigLoadError> {
        let config = Self::load_path(path)?;
        let name = config.name.clone();
        registry.register(config)?;
        Ok(name)
    }
}
