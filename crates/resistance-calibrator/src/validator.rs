//! Acceptance range for divider readings.
//!
//! Outside roughly 50 Ω to 2 MΩ the divider pins the ADC near one rail and
//! the reading carries no usable signal. Rejection is reported as data, never
//! as an error.

use measurement_core::ConfigurationError;
use serde::{Deserialize, Serialize};

pub const MIN_VALID_RESISTANCE_OHMS: f64 = 50.0;
pub const MAX_VALID_RESISTANCE_OHMS: f64 = 2_000_000.0;

/// Closed interval `[min_ohms, max_ohms]` of trustworthy readings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RangeValidatorConfig")]
pub struct RangeValidator {
    min_ohms: f64,
    max_ohms: f64,
}

#[derive(Debug, Deserialize)]
struct RangeValidatorConfig {
    min_ohms: f64,
    max_ohms: f64,
}

impl TryFrom<RangeValidatorConfig> for RangeValidator {
    type Error = ConfigurationError;

    fn try_from(config: RangeValidatorConfig) -> Result<Self, Self::Error> {
        Self::new(config.min_ohms, config.max_ohms)
    }
}

impl Default for RangeValidator {
    fn default() -> Self {
        Self {
            min_ohms: MIN_VALID_RESISTANCE_OHMS,
            max_ohms: MAX_VALID_RESISTANCE_OHMS,
        }
    }
}

impl RangeValidator {
    pub fn new(min_ohms: f64, max_ohms: f64) -> Result<Self, ConfigurationError> {
        let ordered = min_ohms.is_finite()
            && max_ohms.is_finite()
            && 0.0 <= min_ohms
            && min_ohms < max_ohms;
        if !ordered {
            return Err(ConfigurationError::InvalidRange {
                min: min_ohms,
                max: max_ohms,
            });
        }
        Ok(Self { min_ohms, max_ohms })
    }

    pub fn min_ohms(&self) -> f64 {
        self.min_ohms
    }

    pub fn max_ohms(&self) -> f64 {
        self.max_ohms
    }

    /// Both bounds are inclusive; NaN is never valid.
    #[inline]
    pub fn is_valid(&self, resistance: f64) -> bool {
        resistance >= self.min_ohms && resistance <= self.max_ohms
    }
}

/// Check `resistance` against the default 50 Ω – 2 MΩ band.
pub fn is_valid(resistance: f64) -> bool {
    RangeValidator::default().is_valid(resistance)
}
