pub mod commands;
pub mod csv_loader;
pub mod logging;
pub mod output;
pub mod utils;
