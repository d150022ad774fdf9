//! Resistance correction
//!
//! Applies the multiplicative correction factor fitted by the offline
//! calibration sweep to raw resistance estimates.

use measurement_core::{validate_factor, CalibrationProfile, ConfigurationError};
use serde::{Deserialize, Serialize};

/// Linear correction `corrected = raw * factor`.
///
/// With the factory factor of 1.0 this is the identity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CorrectionModelConfig")]
pub struct CorrectionModel {
    factor: f64,
}

#[derive(Debug, Deserialize)]
struct CorrectionModelConfig {
    factor: f64,
}

impl TryFrom<CorrectionModelConfig> for CorrectionModel {
    type Error = ConfigurationError;

    fn try_from(config: CorrectionModelConfig) -> Result<Self, Self::Error> {
        Self::new(config.factor)
    }
}

impl Default for CorrectionModel {
    fn default() -> Self {
        Self { factor: 1.0 }
    }
}

impl CorrectionModel {
    /// Build a model for `factor`; zero, negative and non-finite factors are
    /// configuration errors.
    pub fn new(factor: f64) -> Result<Self, ConfigurationError> {
        let factor = validate_factor("resistance_correction_factor", factor)?;
        Ok(Self { factor })
    }

    pub fn from_profile(profile: &CalibrationProfile) -> Result<Self, ConfigurationError> {
        Self::new(profile.resistance_correction_factor())
    }

    pub fn factor(&self) -> f64 {
        self.factor
    }

    #[inline]
    pub fn apply(&self, raw_resistance: f64) -> f64 {
        raw_resistance * self.factor
    }
}

/// Correct `raw_resistance` with the profile's resistance factor.
pub fn apply_correction(
    raw_resistance: f64,
    profile: &CalibrationProfile,
) -> Result<f64, ConfigurationError> {
    Ok(CorrectionModel::from_profile(profile)?.apply(raw_resistance))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_unit_factor_is_identity() {
        let profile = CalibrationProfile::default();
        for r in [0.5, 50.0, 1000.0, 10000.0, 47000.0, 1.9e6] {
            assert_eq!(apply_correction(r, &profile).unwrap(), r);
        }
    }

    #[test]
    fn test_linearity() {
        for factor in [0.5, 0.97, 1.0, 1.013, 2.0] {
            let model = CorrectionModel::new(factor).unwrap();
            for r in [50.0, 4700.0, 22000.0] {
                assert_relative_eq!(model.apply(r), r * factor);
            }
        }
    }

    #[test]
    fn test_profile_factor_is_used() {
        let profile = CalibrationProfile::default()
            .with_resistance_correction_factor(1.05)
            .unwrap();
        assert_relative_eq!(apply_correction(10000.0, &profile).unwrap(), 10500.0);
    }

    #[test]
    fn test_rejects_invalid_factor() {
        for factor in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let err = CorrectionModel::new(factor).unwrap_err();
            assert!(matches!(err, ConfigurationError::InvalidCalibrationFactor { .. }));
        }
    }

    #[test]
    fn test_deserialize_rejects_invalid_factor() {
        let model: CorrectionModel = serde_json::from_str(r#"{"factor":1.02}"#).unwrap();
        assert_relative_eq!(model.apply(1000.0), 1020.0);

        for json in [r#"{"factor":-2.0}"#, r#"{"factor":0.0}"#] {
            let err = serde_json::from_str::<CorrectionModel>(json).unwrap_err();
            assert!(err.to_string().contains("Invalid calibration factor"));
        }
    }
}
