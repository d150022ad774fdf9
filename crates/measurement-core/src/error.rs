use thiserror::Error;

/// Problems with the calibration profile itself. Raised while the profile is
/// being built, so a bad configuration stops the instrument at boot.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    #[error("Invalid calibration factor: {name} = {value} (must be finite and > 0)")]
    InvalidCalibrationFactor { name: &'static str, value: f64 },

    #[error("Invalid voltage reference: {0} V (must be finite and > 0)")]
    InvalidVoltageReference(f64),

    #[error("Invalid ADC max code: {0} (must be > 0)")]
    InvalidAdcMaxCode(u32),

    #[error("No calibration resistors configured")]
    NoCalibrationResistors,

    #[error("Invalid calibration resistor at index {index}: {value} Ω")]
    InvalidCalibrationResistor { index: usize, value: f64 },

    #[error("Invalid acceptance range: [{min}, {max}] Ω")]
    InvalidRange { min: f64, max: f64 },
}

/// Per-sample numeric edge cases. Callers absorb these locally; they never
/// stop the sampling loop.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum MeasurementError {
    #[error("Uncertainty undefined for resistance {0} Ω")]
    UndefinedUncertainty(f64),
}
