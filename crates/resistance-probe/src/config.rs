use anyhow::{Context, Result};
use measurement_core::{
    CalibrationProfile, DEFAULT_ADC_MAX_CODE, DEFAULT_CALIBRATION_RESISTORS,
    DEFAULT_VOLTAGE_REFERENCE,
};
use std::env;
use std::str::FromStr;

const DEFAULT_NUM_SAMPLES: u32 = 10;

#[derive(Debug, Clone)]
pub struct ProbeConfig {
    pub profile: CalibrationProfile,
    /// Samples the divider driver averages per reading
    pub num_samples: u32,
}

impl ProbeConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Build from any key lookup; missing keys fall back to the factory
    /// profile. An invalid profile is an error here, before any reading is
    /// taken.
    pub fn from_vars<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let voltage_reference =
            parse_or(&lookup, "ADC_VOLTAGE_REFERENCE", DEFAULT_VOLTAGE_REFERENCE)?;
        let adc_max_code = parse_or(&lookup, "ADC_MAX_CODE", DEFAULT_ADC_MAX_CODE)?;
        let voltage_correction_factor = parse_or(&lookup, "VOLTAGE_CORRECTION_FACTOR", 1.0)?;
        let resistance_correction_factor =
            parse_or(&lookup, "RESISTANCE_CORRECTION_FACTOR", 1.0)?;
        let num_samples = parse_or(&lookup, "PROBE_NUM_SAMPLES", DEFAULT_NUM_SAMPLES)?;

        let known_calibration_resistors = match lookup("CALIBRATION_RESISTORS") {
            Some(list) => list
                .split(',')
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .map(|s| {
                    s.parse::<f64>().with_context(|| {
                        format!("CALIBRATION_RESISTORS entry {s:?} is not a number")
                    })
                })
                .collect::<Result<Vec<_>>>()?,
            None => DEFAULT_CALIBRATION_RESISTORS.to_vec(),
        };

        let profile = CalibrationProfile::new(
            voltage_reference,
            adc_max_code,
            voltage_correction_factor,
            resistance_correction_factor,
            known_calibration_resistors,
        )
        .context("invalid calibration profile")?;

        Ok(Self {
            profile,
            num_samples,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key}={raw:?} is not valid")),
        None => Ok(default),
    }
}
