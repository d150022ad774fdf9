//! Measurement pipeline
//!
//! raw resistance → correction → (corrected value, range check, uncertainty).
//! Per-sample edge cases are folded into the returned record so the caller's
//! sampling loop never has to handle an error.

use measurement_core::{
    CalibrationProfile, ConfigurationError, MeasurementQuality, MeasurementResult, SampleSummary,
};
use tracing::{debug, warn};

use crate::correction::CorrectionModel;
use crate::uncertainty::UncertaintyEstimator;
use crate::validator::RangeValidator;

/// Shareable, read-only measurement pipeline for one calibration profile.
#[derive(Debug, Clone)]
pub struct ResistanceMeter {
    profile: CalibrationProfile,
    correction: CorrectionModel,
    validator: RangeValidator,
    estimator: UncertaintyEstimator,
}

impl ResistanceMeter {
    pub fn new(profile: CalibrationProfile) -> Result<Self, ConfigurationError> {
        Self::with_validator(profile, RangeValidator::default())
    }

    pub fn with_validator(
        profile: CalibrationProfile,
        validator: RangeValidator,
    ) -> Result<Self, ConfigurationError> {
        let correction = CorrectionModel::from_profile(&profile)?;
        Ok(Self {
            profile,
            correction,
            validator,
            estimator: UncertaintyEstimator::new(),
        })
    }

    pub fn profile(&self) -> &CalibrationProfile {
        &self.profile
    }

    /// Measure one raw reading that was averaged from `num_samples` samples.
    pub fn measure(&self, raw_resistance: f64, num_samples: u32) -> MeasurementResult {
        let corrected_resistance = self.correction.apply(raw_resistance);
        let is_valid = self.validator.is_valid(corrected_resistance);

        let uncertainty_percent = match self.estimator.estimate_percent(
            corrected_resistance,
            num_samples,
            &self.profile,
        ) {
            Ok(pct) => Some(pct),
            Err(e) => {
                warn!(raw_resistance, "{e}");
                None
            }
        };

        let quality = MeasurementQuality::grade(is_valid, uncertainty_percent, 1.0);
        debug!(
            raw_resistance,
            corrected_resistance,
            is_valid,
            ?uncertainty_percent,
            quality = quality.as_str(),
            "resistance measured"
        );

        MeasurementResult {
            raw_resistance,
            corrected_resistance,
            is_valid,
            uncertainty_percent,
            quality,
            samples: num_samples as usize,
            total_samples: num_samples as usize,
        }
    }

    /// Reduce a batch of raw readings to their mean and measure that.
    pub fn measure_samples(&self, readings: &[f64]) -> MeasurementResult {
        let Some(summary) = SampleSummary::from_readings(readings) else {
            warn!(total = readings.len(), "no usable samples in batch");
            return MeasurementResult {
                raw_resistance: 0.0,
                corrected_resistance: 0.0,
                is_valid: false,
                uncertainty_percent: None,
                quality: MeasurementQuality::Poor,
                samples: 0,
                total_samples: readings.len(),
            };
        };

        let usable = u32::try_from(summary.usable).unwrap_or(u32::MAX);
        let mut result = self.measure(summary.mean, usable);
        result.samples = summary.usable;
        result.total_samples = summary.total;
        result.quality = MeasurementQuality::grade(
            result.is_valid,
            result.uncertainty_percent,
            summary.usable_ratio(),
        );
        debug!(
            mean = summary.mean,
            std_dev = summary.std_dev,
            usable = summary.usable,
            total = summary.total,
            "batch reduced"
        );
        result
    }
}
