//! Calibration profile
//!
//! Immutable description of the ADC front end and the correction factors
//! derived for it. A profile is validated once when it is built and is then
//! shared read-only by every measurement.

use serde::{Deserialize, Serialize};

use crate::ConfigurationError;

/// ESP32 reference voltage (V)
pub const DEFAULT_VOLTAGE_REFERENCE: f64 = 3.3;
/// 12-bit ADC full-scale code
pub const DEFAULT_ADC_MAX_CODE: u32 = 4095;
/// Resistors swept by the offline calibration procedure (Ω)
pub const DEFAULT_CALIBRATION_RESISTORS: [f64; 5] =
    [1000.0, 4700.0, 10000.0, 22000.0, 47000.0];

/// Electrical characteristics and correction parameters of one instrument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CalibrationProfileConfig")]
pub struct CalibrationProfile {
    voltage_reference: f64,
    adc_max_code: u32,
    voltage_correction_factor: f64,
    resistance_correction_factor: f64,
    known_calibration_resistors: Vec<f64>,
}

/// Unvalidated profile fields, as read from a config file or the wire.
#[derive(Debug, Clone, Deserialize)]
pub struct CalibrationProfileConfig {
    pub voltage_reference: f64,
    pub adc_max_code: u32,
    pub voltage_correction_factor: f64,
    pub resistance_correction_factor: f64,
    pub known_calibration_resistors: Vec<f64>,
}

impl TryFrom<CalibrationProfileConfig> for CalibrationProfile {
    type Error = ConfigurationError;

    fn try_from(config: CalibrationProfileConfig) -> Result<Self, Self::Error> {
        Self::new(
            config.voltage_reference,
            config.adc_max_code,
            config.voltage_correction_factor,
            config.resistance_correction_factor,
            config.known_calibration_resistors,
        )
    }
}

/// Check that a multiplicative correction factor is usable.
pub fn validate_factor(name: &'static str, value: f64) -> Result<f64, ConfigurationError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ConfigurationError::InvalidCalibrationFactor { name, value })
    }
}

impl CalibrationProfile {
    pub fn new(
        voltage_reference: f64,
        adc_max_code: u32,
        voltage_correction_factor: f64,
        resistance_correction_factor: f64,
        known_calibration_resistors: Vec<f64>,
    ) -> Result<Self, ConfigurationError> {
        if !(voltage_reference.is_finite() && voltage_reference > 0.0) {
            return Err(ConfigurationError::InvalidVoltageReference(voltage_reference));
        }
        if adc_max_code == 0 {
            return Err(ConfigurationError::InvalidAdcMaxCode(adc_max_code));
        }
        validate_factor("voltage_correction_factor", voltage_correction_factor)?;
        validate_factor("resistance_correction_factor", resistance_correction_factor)?;

        if known_calibration_resistors.is_empty() {
            return Err(ConfigurationError::NoCalibrationResistors);
        }
        if let Some((index, &value)) = known_calibration_resistors
            .iter()
            .enumerate()
            .find(|(_, r)| !(r.is_finite() && **r > 0.0))
        {
            return Err(ConfigurationError::InvalidCalibrationResistor { index, value });
        }

        Ok(Self {
            voltage_reference,
            adc_max_code,
            voltage_correction_factor,
            resistance_correction_factor,
            known_calibration_resistors,
        })
    }

    /// Factory profile: ESP32 12-bit ADC on a 3.3 V reference, no correction.
    pub fn esp32_12bit() -> Self {
        Self {
            voltage_reference: DEFAULT_VOLTAGE_REFERENCE,
            adc_max_code: DEFAULT_ADC_MAX_CODE,
            voltage_correction_factor: 1.0,
            resistance_correction_factor: 1.0,
            known_calibration_resistors: DEFAULT_CALIBRATION_RESISTORS.to_vec(),
        }
    }

    /// Copy of this profile carrying a resistance factor fitted by the
    /// external calibration procedure.
    pub fn with_resistance_correction_factor(
        &self,
        factor: f64,
    ) -> Result<Self, ConfigurationError> {
        validate_factor("resistance_correction_factor", factor)?;
        Ok(Self {
            resistance_correction_factor: factor,
            ..self.clone()
        })
    }

    pub fn voltage_reference(&self) -> f64 {
        self.voltage_reference
    }

    pub fn adc_max_code(&self) -> u32 {
        self.adc_max_code
    }

    pub fn voltage_correction_factor(&self) -> f64 {
        self.voltage_correction_factor
    }

    pub fn resistance_correction_factor(&self) -> f64 {
        self.resistance_correction_factor
    }

    pub fn known_calibration_resistors(&self) -> &[f64] {
        &self.known_calibration_resistors
    }

    /// Voltage of one ADC code step.
    pub fn lsb_volts(&self) -> f64 {
        self.voltage_reference / self.adc_max_code as f64
    }
}

impl Default for CalibrationProfile {
    fn default() -> Self {
        Self::esp32_12bit()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_factory_profile() {
        let profile = CalibrationProfile::default();
        assert_relative_eq!(profile.voltage_reference(), 3.3);
        assert_eq!(profile.adc_max_code(), 4095);
        assert_relative_eq!(profile.resistance_correction_factor(), 1.0);
        assert_eq!(profile.known_calibration_resistors().len(), 5);
        assert_relative_eq!(profile.lsb_volts(), 3.3 / 4095.0);
    }

    #[test]
    fn test_rejects_non_positive_factors() {
        let err = CalibrationProfile::new(3.3, 4095, 1.0, 0.0, vec![1000.0]).unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::InvalidCalibrationFactor {
                name: "resistance_correction_factor",
                value: 0.0
            }
        );

        let err = CalibrationProfile::new(3.3, 4095, -1.0, 1.0, vec![1000.0]).unwrap_err();
        assert!(matches!(
            err,
            ConfigurationError::InvalidCalibrationFactor { name: "voltage_correction_factor", .. }
        ));

        assert!(CalibrationProfile::new(3.3, 4095, 1.0, f64::NAN, vec![1000.0]).is_err());
    }

    #[test]
    fn test_rejects_bad_electrical_parameters() {
        assert_eq!(
            CalibrationProfile::new(0.0, 4095, 1.0, 1.0, vec![1000.0]).unwrap_err(),
            ConfigurationError::InvalidVoltageReference(0.0)
        );
        assert_eq!(
            CalibrationProfile::new(3.3, 0, 1.0, 1.0, vec![1000.0]).unwrap_err(),
            ConfigurationError::InvalidAdcMaxCode(0)
        );
    }

    #[test]
    fn test_rejects_bad_calibration_resistors() {
        assert_eq!(
            CalibrationProfile::new(3.3, 4095, 1.0, 1.0, vec![]).unwrap_err(),
            ConfigurationError::NoCalibrationResistors
        );
        assert_eq!(
            CalibrationProfile::new(3.3, 4095, 1.0, 1.0, vec![1000.0, -5.0]).unwrap_err(),
            ConfigurationError::InvalidCalibrationResistor { index: 1, value: -5.0 }
        );
    }

    #[test]
    fn test_with_resistance_correction_factor() {
        let base = CalibrationProfile::default();
        let fitted = base.with_resistance_correction_factor(1.02).unwrap();
        assert_relative_eq!(fitted.resistance_correction_factor(), 1.02);
        // base profile is unchanged
        assert_relative_eq!(base.resistance_correction_factor(), 1.0);
        assert!(base.with_resistance_correction_factor(-0.5).is_err());
    }

    #[test]
    fn test_deserialize_validates() {
        let json = r#"{
            "voltage_reference": 3.3,
            "adc_max_code": 4095,
            "voltage_correction_factor": 1.0,
            "resistance_correction_factor": 0.98,
            "known_calibration_resistors": [1000.0, 4700.0]
        }"#;
        let profile: CalibrationProfile = serde_json::from_str(json).unwrap();
        assert_relative_eq!(profile.resistance_correction_factor(), 0.98);

        let bad = json.replace("0.98", "-0.98");
        assert!(serde_json::from_str::<CalibrationProfile>(&bad).is_err());
    }

    #[test]
    fn test_serialize_roundtrip_keeps_fields() {
        let profile = CalibrationProfile::default();
        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["adc_max_code"], 4095);
        assert_eq!(json["known_calibration_resistors"][2], 10000.0);
    }
}
