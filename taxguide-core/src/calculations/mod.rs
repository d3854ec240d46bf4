//! Calculation modules for personal and company tax.
//!
//! Each calculator borrows the part of a [`TaxConfig`](crate::TaxConfig) it
//! needs and is otherwise stateless.

pub mod brackets;
pub mod common;
pub mod company;
pub mod comparison;
pub mod income;
pub mod relief;

pub use brackets::BracketWalker;
pub use company::CompanyClassifier;
pub use comparison::{RegimeComparison, compare_regimes};
pub use income::annualize_monthly;
pub use relief::ReliefCalculator;
