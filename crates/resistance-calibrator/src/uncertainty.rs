//! Uncertainty Estimation Module
//!
//! Combines the two independent error sources of a divider reading by
//! root-sum-of-squares:
//! - ADC quantization: one code step referred back to the measured
//!   resistance, `(vref / max_code) * 100 / R` percent
//! - component tolerance of the resistor under test, a fixed 1 %

use measurement_core::{CalibrationProfile, MeasurementError};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Rated precision of the resistor under test (%)
pub const COMPONENT_TOLERANCE_PERCENT: f64 = 1.0;

/// Breakdown of a total uncertainty into its two sources, all in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UncertaintyDecomposition {
    /// Quantization step referred to the resistance
    pub adc_percent: f64,
    /// Resistor tolerance
    pub component_percent: f64,
    /// RSS of the two
    pub total_percent: f64,
}

impl UncertaintyDecomposition {
    pub fn new(adc_percent: f64, component_percent: f64) -> Self {
        let total_percent = adc_percent.hypot(component_percent);

        Self {
            adc_percent,
            component_percent,
            total_percent,
        }
    }

    /// True for low resistances where the ADC step outweighs the tolerance.
    pub fn is_quantization_dominated(&self) -> bool {
        self.adc_percent > self.component_percent
    }
}

/// Stateless estimator over a shared profile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UncertaintyEstimator {
    component_percent: f64,
}

impl Default for UncertaintyEstimator {
    fn default() -> Self {
        Self::new()
    }
}

impl UncertaintyEstimator {
    pub fn new() -> Self {
        Self {
            component_percent: COMPONENT_TOLERANCE_PERCENT,
        }
    }

    /// ADC quantization term in percent. Undefined for `resistance <= 0`.
    pub fn adc_percent(
        &self,
        resistance: f64,
        profile: &CalibrationProfile,
    ) -> Result<f64, MeasurementError> {
        if resistance.is_nan() || resistance <= 0.0 {
            return Err(MeasurementError::UndefinedUncertainty(resistance));
        }
        Ok(profile.lsb_volts() * 100.0 / resistance)
    }

    pub fn decompose(
        &self,
        resistance: f64,
        profile: &CalibrationProfile,
    ) -> Result<UncertaintyDecomposition, MeasurementError> {
        let adc = self.adc_percent(resistance, profile)?;
        Ok(UncertaintyDecomposition::new(adc, self.component_percent))
    }

    /// Total uncertainty in percent.
    ///
    /// `num_samples` does not reduce the estimate; no 1/√N averaging term is
    /// applied.
    pub fn estimate_percent(
        &self,
        resistance: f64,
        num_samples: u32,
        profile: &CalibrationProfile,
    ) -> Result<f64, MeasurementError> {
        let decomposition = self.decompose(resistance, profile)?;
        trace!(
            resistance,
            num_samples,
            adc_percent = decomposition.adc_percent,
            total_percent = decomposition.total_percent,
            "uncertainty estimated"
        );
        Ok(decomposition.total_percent)
    }
}

pub fn adc_uncertainty_percent(
    resistance: f64,
    profile: &CalibrationProfile,
) -> Result<f64, MeasurementError> {
    UncertaintyEstimator::new().adc_percent(resistance, profile)
}

pub fn estimate_uncertainty_percent(
    resistance: f64,
    num_samples: u32,
    profile: &CalibrationProfile,
) -> Result<f64, MeasurementError> {
    UncertaintyEstimator::new().estimate_percent(resistance, num_samples, profile)
}
