use measurement_core::{MeasurementQuality, MeasurementResult};
use serde::Serialize;

/// Record handed to the lab session layer, one per measurement.
#[derive(Debug, Clone, Serialize)]
pub struct MeasurementReport {
    #[serde(rename = "type")]
    pub kind: &'static str,
    /// Corrected resistance (Ω)
    pub resistance: f64,
    pub raw_resistance: f64,
    /// ± Ω
    pub uncertainty: Option<f64>,
    pub uncertainty_percent: Option<f64>,
    pub quality: MeasurementQuality,
    pub samples: usize,
    pub total_samples: usize,
    pub valid: bool,
}

impl From<&MeasurementResult> for MeasurementReport {
    fn from(result: &MeasurementResult) -> Self {
        Self {
            kind: "resistance_measurement",
            resistance: result.corrected_resistance,
            raw_resistance: result.raw_resistance,
            uncertainty: result.uncertainty_ohms(),
            uncertainty_percent: result.uncertainty_percent,
            quality: result.quality,
            samples: result.samples,
            total_samples: result.total_samples,
            valid: result.is_valid,
        }
    }
}
