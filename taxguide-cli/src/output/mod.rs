//! Rendering engine results for the terminal.

pub mod json;
pub mod table;

use clap::ValueEnum;

/// How results are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Aligned, human-readable tables with naira amounts.
    #[default]
    Table,
    /// Pretty-printed JSON with exact decimal amounts.
    Json,
}
