// Credit assessment CLI
//
// Reads the collector exports from DATA_DIR, runs the full assessment and
// prints the report as JSON.
// Usage: DATA_DIR=data cargo run --features cli --bin assess_credit

use agroscore_rust::credit::FarmApplication;
use agroscore_rust::data::{
    default_soil_profile, load_forecast_readings, load_soil_profile, load_weather_samples,
};
use agroscore_rust::weather::{group_forecast, simulate_history};
use agroscore_rust::{AssessmentRequest, CreditScorer, ScorerConfig};
use anyhow::{bail, Context};
use serde_json::json;
use std::fs;
use std::path::Path;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    // Initialize tracing (structured logging)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "agroscore_rust=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let data_dir = std::env::var("DATA_DIR").unwrap_or_else(|_| "data".to_string());
    let data_dir = Path::new(&data_dir);
    tracing::info!("DATA_DIR: {:?}", data_dir);

    let config = ScorerConfig::from_env()?;
    let scorer = CreditScorer::new(config)?;

    // Soil
    let soil_path = data_dir.join("soil_by_depth.csv");
    let soil_profile = if soil_path.exists() {
        load_soil_profile(&soil_path)?
    } else {
        tracing::warn!("{:?} not found, using default soil profile", soil_path);
        default_soil_profile()
    };

    // Current weather (first row)
    let current_path = data_dir.join("current_weather.csv");
    let current = match load_weather_samples(&current_path)?.into_iter().next() {
        Some(sample) => sample,
        None => bail!("{:?} has no rows", current_path),
    };

    // Forecast
    let forecast_path = data_dir.join("forecast.csv");
    let forecast = if forecast_path.exists() {
        group_forecast(&load_forecast_readings(&forecast_path)?)
    } else {
        tracing::warn!("{:?} not found, assessing without forecast", forecast_path);
        Vec::new()
    };

    // Historical weather
    let historical_path = data_dir.join("historical_weather.csv");
    let historical = if historical_path.exists() {
        load_weather_samples(&historical_path)?
    } else {
        tracing::warn!("{:?} not found, simulating history from current weather", historical_path);
        simulate_history(&current, &mut rand::thread_rng())
    };

    let request = AssessmentRequest {
        soil_profile,
        historical,
        current,
        forecast,
    };
    let report = scorer.assess(&request).context("Assessment failed")?;

    // Optional loan application
    let application_path = data_dir.join("application.json");
    let application = if application_path.exists() {
        let contents = fs::read_to_string(&application_path)
            .with_context(|| format!("Failed to read application: {:?}", application_path))?;
        let application: FarmApplication = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse application: {:?}", application_path))?;
        Some(scorer.score_application(&application).context("Application scoring failed")?)
    } else {
        None
    };

    let output = json!({
        "report": report,
        "application": application,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}
