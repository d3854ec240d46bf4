use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::{group_thousands, rate_as_percent};
use crate::error::{TaxEngineError, ensure_fraction};

/// A contiguous income range taxed at a single marginal rate.
///
/// Bounds are inclusive on both ends. A lower bound of zero marks the start
/// of income, so a bracket `[0, 800000]` absorbs exactly 800,000 units and
/// the next bracket starts at 800,001.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub lower_bound: Decimal,
    /// `None` for the top, unbounded bracket.
    #[serde(default)]
    pub upper_bound: Option<Decimal>,
    /// Marginal rate as a fraction (`0.15` for 15%).
    pub rate: Decimal,
    /// Display label; a default is derived from the bounds when absent.
    #[serde(default)]
    pub label: Option<String>,
}

impl TaxBracket {
    pub fn new(
        lower_bound: Decimal,
        upper_bound: Option<Decimal>,
        rate: Decimal,
    ) -> Self {
        Self {
            lower_bound,
            upper_bound,
            rate,
            label: None,
        }
    }

    pub fn with_label(
        mut self,
        label: impl Into<String>,
    ) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Number of income units this bracket can absorb, `None` when unbounded.
    pub fn width(&self) -> Option<Decimal> {
        self.upper_bound.map(|upper| {
            if self.lower_bound.is_zero() {
                upper
            } else {
                upper - self.lower_bound + Decimal::ONE
            }
        })
    }

    pub fn is_unbounded(&self) -> bool {
        self.upper_bound.is_none()
    }

    /// The configured label, or one derived from the bounds and rate.
    pub fn display_label(&self) -> String {
        if let Some(label) = &self.label {
            return label.clone();
        }

        let lower = group_thousands(self.lower_bound);
        if self.rate.is_zero() {
            return match self.upper_bound {
                Some(upper) if self.lower_bound.is_zero() => {
                    format!("First {} (tax-free)", group_thousands(upper))
                }
                Some(upper) => format!("{lower} - {} (tax-free)", group_thousands(upper)),
                None => format!("Above {} (tax-free)", self.below_lower()),
            };
        }

        let percent = rate_as_percent(self.rate);
        match self.upper_bound {
            Some(upper) => format!("{lower} - {} @ {percent}%", group_thousands(upper)),
            None => format!("Above {} @ {percent}%", self.below_lower()),
        }
    }

    fn below_lower(&self) -> String {
        if self.lower_bound.is_zero() {
            return group_thousands(Decimal::ZERO);
        }
        group_thousands(self.lower_bound - Decimal::ONE)
    }
}

/// An ordered, gapless partition of the non-negative amounts into brackets.
///
/// Construct through [`BracketSchedule::new`] to have the invariants checked,
/// or deserialize and call [`BracketSchedule::validate`] before use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketSchedule {
    #[serde(default)]
    pub name: String,
    pub brackets: Vec<TaxBracket>,
}

impl BracketSchedule {
    /// Builds a schedule and validates it.
    ///
    /// # Errors
    ///
    /// Returns an [`ErrorKind::InvalidConfiguration`](crate::ErrorKind) error
    /// if the brackets are not a gapless ascending partition ending in a
    /// single unbounded bracket.
    pub fn new(
        name: impl Into<String>,
        brackets: Vec<TaxBracket>,
    ) -> Result<Self, TaxEngineError> {
        let schedule = Self {
            name: name.into(),
            brackets,
        };
        schedule.validate()?;
        Ok(schedule)
    }

    /// Checks the partition invariants.
    ///
    /// - at least one bracket, the first starting at zero;
    /// - each lower bound is the previous upper bound plus one;
    /// - every bounded bracket has a positive width;
    /// - exactly one unbounded bracket, and it is the last;
    /// - every rate lies in `[0, 1]`.
    pub fn validate(&self) -> Result<(), TaxEngineError> {
        let Some(first) = self.brackets.first() else {
            return Err(TaxEngineError::EmptySchedule(self.name.clone()));
        };
        if !first.lower_bound.is_zero() {
            return Err(TaxEngineError::FirstBracketNotAtZero(first.lower_bound));
        }

        let last_index = self.brackets.len() - 1;
        let mut expected_lower = Decimal::ZERO;
        for (index, bracket) in self.brackets.iter().enumerate() {
            ensure_fraction("bracket rate", bracket.rate)?;

            if bracket.lower_bound != expected_lower {
                return Err(TaxEngineError::BracketGap {
                    index,
                    expected: expected_lower,
                    found: bracket.lower_bound,
                });
            }

            match bracket.upper_bound {
                Some(upper) => {
                    if bracket.width().is_some_and(|w| w <= Decimal::ZERO) {
                        return Err(TaxEngineError::EmptyBracket {
                            index,
                            lower: bracket.lower_bound,
                            upper,
                        });
                    }
                    if index == last_index {
                        return Err(TaxEngineError::MissingUnboundedBracket);
                    }
                    expected_lower = upper + Decimal::ONE;
                }
                None if index != last_index => {
                    return Err(TaxEngineError::UnboundedBracketNotLast(index));
                }
                None => {}
            }
        }

        Ok(())
    }

    pub fn brackets(&self) -> &[TaxBracket] {
        &self.brackets
    }

    /// The highest marginal rate in the schedule.
    pub fn top_rate(&self) -> Decimal {
        self.brackets
            .iter()
            .map(|b| b.rate)
            .max()
            .unwrap_or(Decimal::ZERO)
    }
}
