use serde::{Deserialize, Serialize};

/// Uncertainty at or below this grades a reading as good (%)
pub const GOOD_UNCERTAINTY_PERCENT: f64 = 2.0;
/// Uncertainty at or below this grades a reading as fair (%)
pub const FAIR_UNCERTAINTY_PERCENT: f64 = 5.0;
/// Below this share of usable samples a batch is graded poor
pub const MIN_USABLE_SAMPLE_RATIO: f64 = 0.5;

/// Quality grade reported alongside each measurement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeasurementQuality {
    Good,
    Fair,
    Poor,
}

impl MeasurementQuality {
    pub fn grade(is_valid: bool, uncertainty_percent: Option<f64>, usable_ratio: f64) -> Self {
        if !is_valid || usable_ratio < MIN_USABLE_SAMPLE_RATIO {
            return MeasurementQuality::Poor;
        }
        match uncertainty_percent {
            Some(u) if u <= GOOD_UNCERTAINTY_PERCENT => MeasurementQuality::Good,
            Some(u) if u <= FAIR_UNCERTAINTY_PERCENT => MeasurementQuality::Fair,
            _ => MeasurementQuality::Poor,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MeasurementQuality::Good => "good",
            MeasurementQuality::Fair => "fair",
            MeasurementQuality::Poor => "poor",
        }
    }
}

/// One reportable resistance measurement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementResult {
    /// Resistance computed by the divider driver before correction (Ω)
    pub raw_resistance: f64,
    /// raw × resistance correction factor (Ω)
    pub corrected_resistance: f64,
    /// Inside the trustworthy band of the divider
    pub is_valid: bool,
    /// Combined uncertainty; `None` when undefined for this input
    pub uncertainty_percent: Option<f64>,
    pub quality: MeasurementQuality,
    /// Usable samples behind this value
    pub samples: usize,
    /// Samples collected
    pub total_samples: usize,
}

impl MeasurementResult {
    /// Absolute uncertainty (± Ω).
    pub fn uncertainty_ohms(&self) -> Option<f64> {
        self.uncertainty_percent
            .map(|pct| self.corrected_resistance * pct / 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_quality_grading() {
        assert_eq!(MeasurementQuality::grade(true, Some(1.0), 1.0), MeasurementQuality::Good);
        assert_eq!(MeasurementQuality::grade(true, Some(2.0), 1.0), MeasurementQuality::Good);
        assert_eq!(MeasurementQuality::grade(true, Some(3.5), 1.0), MeasurementQuality::Fair);
        assert_eq!(MeasurementQuality::grade(true, Some(7.0), 1.0), MeasurementQuality::Poor);
        assert_eq!(MeasurementQuality::grade(true, None, 1.0), MeasurementQuality::Poor);
    }

    #[test]
    fn test_invalid_or_sparse_is_poor() {
        assert_eq!(MeasurementQuality::grade(false, Some(1.0), 1.0), MeasurementQuality::Poor);
        assert_eq!(MeasurementQuality::grade(true, Some(1.0), 0.4), MeasurementQuality::Poor);
        assert_eq!(MeasurementQuality::grade(true, Some(1.0), 0.5), MeasurementQuality::Good);
    }

    #[test]
    fn test_uncertainty_ohms() {
        let result = MeasurementResult {
            raw_resistance: 10000.0,
            corrected_resistance: 10000.0,
            is_valid: true,
            uncertainty_percent: Some(1.0),
            quality: MeasurementQuality::Good,
            samples: 1,
            total_samples: 1,
        };
        assert_relative_eq!(result.uncertainty_ohms().unwrap(), 100.0);

        let undefined = MeasurementResult {
            uncertainty_percent: None,
            ..result
        };
        assert!(undefined.uncertainty_ohms().is_none());
    }

    #[test]
    fn test_quality_serializes_lowercase() {
        let json = serde_json::to_string(&MeasurementQuality::Fair).unwrap();
        assert_eq!(json, "\"fair\"");
        assert_eq!(MeasurementQuality::Poor.as_str(), "poor");
    }
}
