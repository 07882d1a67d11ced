//! Inclusive/exclusive range checks over a numeric magnitude.
//!
//! One engine serves numbers, string lengths (unit "characters"), and date
//! epoch-millisecond projections. Bound updates are validate-then-commit:
//! an inconsistent pair is rejected before any state changes.

use crate::core::error::{ConfigError, ValidationError};

/// One end of a range: a threshold plus its inclusivity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bound {
    pub value: f64,
    pub inclusive: bool,
}

impl Bound {
    #[must_use]
    pub fn new(value: f64, inclusive: bool) -> Self {
        Self { value, inclusive }
    }

    /// An inclusive bound, the default for a bare threshold.
    #[must_use]
    pub fn inclusive(value: f64) -> Self {
        Self::new(value, true)
    }

    #[must_use]
    pub fn exclusive(value: f64) -> Self {
        Self::new(value, false)
    }
}

impl From<f64> for Bound {
    fn from(value: f64) -> Self {
        Bound::inclusive(value)
    }
}

impl From<i32> for Bound {
    fn from(value: i32) -> Self {
        Bound::inclusive(f64::from(value))
    }
}

impl From<usize> for Bound {
    fn from(value: usize) -> Self {
        Bound::inclusive(value as f64)
    }
}

impl From<(f64, bool)> for Bound {
    fn from((value, inclusive): (f64, bool)) -> Self {
        Bound::new(value, inclusive)
    }
}

/// An optional min/max pair with an optional unit label for messages.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Range {
    min: Option<Bound>,
    max: Option<Bound>,
    units: Option<&'static str>,
}

impl Range {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A range whose messages name a unit of measurement.
    #[must_use]
    pub fn with_units(units: &'static str) -> Self {
        Self {
            units: Some(units),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn min(&self) -> Option<Bound> {
        self.min
    }

    #[must_use]
    pub fn max(&self) -> Option<Bound> {
        self.max
    }

    /// Sets the minimum bound, re-validating consistency against the
    /// current maximum. On error the range is left unchanged.
    pub fn set_min(&mut self, bound: impl Into<Bound>) -> Result<(), ConfigError> {
        let candidate = Some(bound.into());
        Self::consistent(candidate, self.max)?;
        self.min = candidate;
        Ok(())
    }

    /// Sets the maximum bound, re-validating consistency against the
    /// current minimum. On error the range is left unchanged.
    pub fn set_max(&mut self, bound: impl Into<Bound>) -> Result<(), ConfigError> {
        let candidate = Some(bound.into());
        Self::consistent(self.min, candidate)?;
        self.max = candidate;
        Ok(())
    }

    fn consistent(min: Option<Bound>, max: Option<Bound>) -> Result<(), ConfigError> {
        let (Some(min), Some(max)) = (min, max) else {
            return Ok(());
        };

        if min.value == max.value {
            if !(min.inclusive && max.inclusive) {
                return Err(ConfigError::ExclusiveEqualBounds);
            }
            return Ok(());
        }

        if min.value > max.value {
            return Err(ConfigError::InvertedRange);
        }

        Ok(())
    }

    /// Checks `value` against the configured bounds.
    ///
    /// Equal inclusive bounds demand the exact value; otherwise min and max
    /// are tested independently, `>=`/`>` and `<=`/`<` per inclusivity.
    pub fn test(&self, value: f64) -> Result<(), ValidationError> {
        let currently = format!(" (currently {value})");

        if let (Some(min), Some(max)) = (self.min, self.max)
            && min.value == max.value
        {
            // Consistency guarantees both bounds are inclusive here.
            if value == min.value {
                return Ok(());
            }
            let target = min.value;
            return Err(ValidationError::Range(match self.units {
                Some(units) => format!("Please enter {target} {units}{currently}"),
                None => format!("Please enter {target}"),
            }));
        }

        if let Some(min) = self.min {
            let threshold = min.value;
            if min.inclusive {
                if value < threshold {
                    return Err(ValidationError::Range(match self.units {
                        Some(units) => {
                            format!("Please enter at least {threshold} {units}{currently}")
                        }
                        None => {
                            format!("Please enter a value that is at least {threshold}{currently}")
                        }
                    }));
                }
            } else if value <= threshold {
                return Err(ValidationError::Range(match self.units {
                    Some(units) => {
                        format!("Please enter more than {threshold} {units}{currently}")
                    }
                    None => {
                        format!("Please enter a value that is more than {threshold}{currently}")
                    }
                }));
            }
        }

        if let Some(max) = self.max {
            let threshold = max.value;
            if max.inclusive {
                if value > threshold {
                    return Err(ValidationError::Range(match self.units {
                        Some(units) => {
                            format!("Please enter {threshold} {units} or less{currently}")
                        }
                        None => {
                            format!("Please enter a value that is {threshold} or less{currently}")
                        }
                    }));
                }
            } else if value >= threshold {
                return Err(ValidationError::Range(match self.units {
                    Some(units) => format!("Please enter less than {threshold} {units}"),
                    None => format!("Please enter a value that is less than {threshold}"),
                }));
            }
        }

        Ok(())
    }
}
