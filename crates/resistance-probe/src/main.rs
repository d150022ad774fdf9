//! resistance-probe: run raw divider readings through the calibration core
//! and print one JSON measurement record per line.
//!
//! Usage:
//!   cargo run -p resistance-probe -- 10000 4700 30
//!   cargo run -p resistance-probe -- --samples 64 22000
//!   cargo run -p resistance-probe -- --batch 9990 10010 10004 0
//!
//! The profile comes from the environment (or `.env`), see `config.rs`.

use anyhow::{bail, Context, Result};
use resistance_calibrator::ResistanceMeter;

mod config;
mod report;

use config::ProbeConfig;
use report::MeasurementReport;

#[derive(Debug, Default, PartialEq)]
struct ProbeArgs {
    samples: Option<u32>,
    batch: bool,
    readings: Vec<f64>,
}

fn parse_args(args: &[String]) -> Result<ProbeArgs> {
    let mut parsed = ProbeArgs::default();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--batch" => parsed.batch = true,
            "--samples" => {
                let value = iter.next().context("--samples needs a value")?;
                parsed.samples = Some(
                    value
                        .parse()
                        .with_context(|| format!("--samples {value:?} is not a count"))?,
                );
            }
            other => parsed.readings.push(
                other
                    .parse()
                    .with_context(|| format!("{other:?} is not a resistance in ohms"))?,
            ),
        }
    }

    if parsed.readings.is_empty() {
        bail!("no readings given");
    }
    Ok(parsed)
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json_logging = std::env::var("RUST_LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    // stdout carries the records
    if json_logging {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let args = parse_args(&args)?;

    let config = ProbeConfig::from_env()?;
    let profile = &config.profile;
    tracing::info!(
        "Profile loaded: {} V reference, max code {}, resistance factor {}",
        profile.voltage_reference(),
        profile.adc_max_code(),
        profile.resistance_correction_factor()
    );

    let meter = ResistanceMeter::new(config.profile.clone())?;
    let num_samples = args.samples.unwrap_or(config.num_samples);

    let results = if args.batch {
        vec![meter.measure_samples(&args.readings)]
    } else {
        args.readings
            .iter()
            .map(|&raw| meter.measure(raw, num_samples))
            .collect()
    };

    for result in &results {
        if !result.is_valid {
            tracing::warn!(
                "{:.2} Ω is outside the trustworthy range",
                result.corrected_resistance
            );
        }
        println!("{}", serde_json::to_string(&MeasurementReport::from(result))?);
    }

    Ok(())
}
