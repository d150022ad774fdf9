//! Sample statistics for batches of raw resistance readings.
//!
//! The sampling loop collects several readings per measurement; some of them
//! are garbage (disconnected probe, ADC glitch). These helpers reduce a batch
//! to one representative value and keep count of what was thrown away.

use serde::{Deserialize, Serialize};

/// Compute the mean of a data slice.
pub fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    data.iter().sum::<f64>() / data.len() as f64
}

/// Compute sample standard deviation.
pub fn std_dev(data: &[f64]) -> f64 {
    std_dev_about(data, mean(data))
}

/// Sample standard deviation around an already computed mean `m`.
fn std_dev_about(data: &[f64], m: f64) -> f64 {
    if data.len() < 2 {
        return 0.0;
    }
    let sum_sq: f64 = data.iter().map(|x| (x - m).powi(2)).sum();
    (sum_sq / (data.len() - 1) as f64).sqrt()
}

/// Reduction of a batch of raw readings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SampleSummary {
    /// Mean of the usable readings (Ω)
    pub mean: f64,
    /// Sample standard deviation of the usable readings (Ω)
    pub std_dev: f64,
    /// Readings that were finite and > 0
    pub usable: usize,
    /// Readings collected
    pub total: usize,
}

impl SampleSummary {
    /// Summarize `readings`, dropping non-finite and non-positive values.
    /// Returns `None` when nothing usable remains.
    pub fn from_readings(readings: &[f64]) -> Option<Self> {
        let usable: Vec<f64> = readings
            .iter()
            .copied()
            .filter(|r| r.is_finite() && *r > 0.0)
            .collect();

        if usable.is_empty() {
            return None;
        }

        let m = mean(&usable);
        Some(Self {
            mean: m,
            std_dev: std_dev_about(&usable, m),
            usable: usable.len(),
            total: readings.len(),
        })
    }

    /// Fraction of collected readings that were usable (0.0 to 1.0).
    pub fn usable_ratio(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.usable as f64 / self.total as f64
    }
}
