use std::collections::HashMap;

use tracing::debug;

use crate::error::TaxEngineError;
use crate::models::TaxConfig;
use crate::presets;

/// Registry of validated [`TaxConfig`] constant sets, keyed by name.
///
/// Which legislative version is authoritative is a deployment decision. A
/// caller fills the registry once at startup, then looks configurations up
/// by name.
///
/// Typical lifetime:
/// 1. Create with `ScheduleRegistry::with_presets()` or `ScheduleRegistry::new()`.
/// 2. Call `register` for any configuration loaded from disk.
/// 3. Call `get` to pick the configuration an engine should use.
#[derive(Debug, Clone, Default)]
pub struct ScheduleRegistry {
    configs: HashMap<String, TaxConfig>,
}

impl ScheduleRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding every built-in preset.
    pub fn with_presets() -> Self {
        let mut registry = Self::new();
        for config in presets::all() {
            registry.configs.insert(config.name.clone(), config);
        }
        registry
    }

    /// Validate and register a configuration.
    ///
    /// A configuration with the same name is silently replaced.
    ///
    /// # Errors
    ///
    /// Returns the validation error; the registry is left unchanged.
    pub fn register(
        &mut self,
        config: TaxConfig,
    ) -> Result<(), TaxEngineError> {
        config.validate()?;
        debug!(name = %config.name, "tax configuration registered");
        self.configs.insert(config.name.clone(), config);
        Ok(())
    }

    pub fn get(
        &self,
        name: &str,
    ) -> Option<&TaxConfig> {
        self.configs.get(name)
    }

    /// Names of every registered configuration, sorted alphabetically.
    pub fn available(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.configs.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
