pub mod calculations;
pub mod engine;
pub mod error;
pub mod models;
pub mod presets;
pub mod registry;

pub use calculations::{RegimeComparison, annualize_monthly, compare_regimes};
pub use engine::TaxEngine;
pub use error::{ErrorKind, TaxEngineError};
pub use models::*;
pub use registry::ScheduleRegistry;
