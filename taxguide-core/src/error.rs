//! Error type shared by every engine operation.
//!
//! Errors fall into two kinds. [`ErrorKind::InvalidArgument`] is raised by
//! the calculation entry points when a caller passes a value outside its
//! documented range. [`ErrorKind::InvalidConfiguration`] is raised once, when
//! a constant set is validated, and means the configuration itself is unusable.

use rust_decimal::Decimal;
use thiserror::Error;

/// Broad classification of a [`TaxEngineError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A runtime input (income, turnover, relief figure) was out of range.
    InvalidArgument,
    /// A bracket table or constant set violated its invariants.
    InvalidConfiguration,
}

/// Errors that can occur while validating configuration or computing tax.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TaxEngineError {
    /// A monetary input was negative.
    #[error("{field} must be non-negative, got {value}")]
    NegativeAmount { field: &'static str, value: Decimal },

    /// The pension contribution rate (a percentage) was outside `[0, max]`.
    #[error("pension rate must be between 0 and {max}%, got {value}%")]
    PensionRateOutOfRange { value: Decimal, max: Decimal },

    /// More dependents in education than the configured cap.
    #[error("dependents in education must be at most {max}, got {value}")]
    TooManyDependents { value: u32, max: u32 },

    /// A computed amount does not fit in a decimal.
    #[error("{field} is too large to compute")]
    AmountTooLarge { field: &'static str },

    /// The dual-threshold company policy needs a fixed-asset figure.
    #[error("fixed asset value is required when the small-company test includes assets")]
    MissingFixedAssets,

    /// A bracket schedule with no brackets.
    #[error("bracket schedule '{0}' has no brackets")]
    EmptySchedule(String),

    /// The first bracket must start at zero.
    #[error("first bracket must start at 0, got {0}")]
    FirstBracketNotAtZero(Decimal),

    /// A bracket does not start one unit after the previous one ends.
    #[error("bracket {index} must start at {expected}, got {found}")]
    BracketGap {
        index: usize,
        expected: Decimal,
        found: Decimal,
    },

    /// A bounded bracket whose upper bound leaves it with no width.
    #[error("bracket {index} has upper bound {upper} that does not exceed its lower bound {lower}")]
    EmptyBracket {
        index: usize,
        lower: Decimal,
        upper: Decimal,
    },

    /// An unbounded bracket appears before the end of the schedule.
    #[error("only the last bracket may be unbounded, but bracket {0} is")]
    UnboundedBracketNotLast(usize),

    /// The last bracket has an upper bound.
    #[error("last bracket must be unbounded")]
    MissingUnboundedBracket,

    /// A rate expressed as a fraction was outside `[0, 1]`.
    #[error("{field} must be between 0 and 1, got {value}")]
    RateOutOfRange { field: &'static str, value: Decimal },

    /// A configured threshold, cap or allowance was negative.
    #[error("{field} must be non-negative, got {value}")]
    NegativeConstant { field: &'static str, value: Decimal },
}

impl TaxEngineError {
    /// Returns which family this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NegativeAmount { .. }
            | Self::PensionRateOutOfRange { .. }
            | Self::TooManyDependents { .. }
            | Self::AmountTooLarge { .. }
            | Self::MissingFixedAssets => ErrorKind::InvalidArgument,
            Self::EmptySchedule(_)
            | Self::FirstBracketNotAtZero(_)
            | Self::BracketGap { .. }
            | Self::EmptyBracket { .. }
            | Self::UnboundedBracketNotLast(_)
            | Self::MissingUnboundedBracket
            | Self::RateOutOfRange { .. }
            | Self::NegativeConstant { .. } => ErrorKind::InvalidConfiguration,
        }
    }
}

/// Rejects a negative monetary input.
pub(crate) fn ensure_non_negative(
    field: &'static str,
    value: Decimal,
) -> Result<Decimal, TaxEngineError> {
    if value < Decimal::ZERO {
        return Err(TaxEngineError::NegativeAmount { field, value });
    }
    Ok(value)
}

/// Rejects a negative configured constant.
pub(crate) fn ensure_non_negative_constant(
    field: &'static str,
    value: Decimal,
) -> Result<(), TaxEngineError> {
    if value < Decimal::ZERO {
        return Err(TaxEngineError::NegativeConstant { field, value });
    }
    Ok(())
}

/// Rejects a fractional rate outside `[0, 1]`.
pub(crate) fn ensure_fraction(
    field: &'static str,
    value: Decimal,
) -> Result<(), TaxEngineError> {
    if value < Decimal::ZERO || value > Decimal::ONE {
        return Err(TaxEngineError::RateOutOfRange { field, value });
    }
    Ok(())
}
