//! Loading tax engine configuration from CSV bracket tables and TOML files.

mod config_file;
mod error;
mod loader;

pub use config_file::ConfigFileLoader;
pub use error::ConfigLoadError;
pub use loader::{BracketRecord, ScheduleCsvLoader};
