//! Resistance Calibrator
//!
//! Turns a raw resistance reading from the voltage-divider driver into a
//! reportable measurement: linear correction, range validation and an
//! RSS uncertainty estimate combining ADC quantization with component
//! tolerance.

pub mod correction;
pub mod meter;
pub mod uncertainty;
pub mod validator;

pub use correction::{apply_correction, CorrectionModel};
pub use meter::ResistanceMeter;
pub use uncertainty::{
    adc_uncertainty_percent, estimate_uncertainty_percent, UncertaintyDecomposition,
    UncertaintyEstimator, COMPONENT_TOLERANCE_PERCENT,
};
pub use validator::{
    is_valid, RangeValidator, MAX_VALID_RESISTANCE_OHMS, MIN_VALID_RESISTANCE_OHMS,
};
