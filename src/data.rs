//! Data Loading
//!
//! Reads the tabular exports produced by the soil and weather collectors
//! using Polars. CSV by default, Parquet when the file extension says so.
//!
//! Soil profiles are long format, one measurement per row:
//!
//! ```text
//! depth,property,value
//! 0-5cm,ph,6.4
//! 0-5cm,organicCarbon,1.8
//! ```

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, NaiveDate};
use polars::prelude::*;
use std::path::Path;
use tracing::{debug, warn};

use crate::soil::{Depth, SoilMeasurements, SoilProfile, SoilProperty};
use crate::weather::{ForecastReading, WeatherSample};

/// Read a CSV or Parquet file into a DataFrame
fn read_table(path: &Path) -> Result<DataFrame> {
    let is_parquet = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("parquet"));

    if is_parquet {
        LazyFrame::scan_parquet(path, Default::default())
            .with_context(|| format!("Failed to scan parquet: {:?}", path))?
            .collect()
            .with_context(|| format!("Failed to load parquet: {:?}", path))
    } else {
        CsvReadOptions::default()
            .with_has_header(true)
            .try_into_reader_with_file_path(Some(path.to_path_buf()))
            .with_context(|| format!("Failed to create CSV reader: {:?}", path))?
            .finish()
            .with_context(|| format!("Failed to load CSV: {:?}", path))
    }
}

fn string_column(df: &DataFrame, name: &str) -> Result<StringChunked> {
    let column = df
        .column(name)
        .with_context(|| format!("Column '{}' not found", name))?
        .cast(&DataType::String)
        .with_context(|| format!("Column '{}' is not string-like", name))?;
    Ok(column.str()?.clone())
}

/// Integer columns (e.g. humidity written as `72`) are widened to f64
fn float_column(df: &DataFrame, name: &str) -> Result<Float64Chunked> {
    let column = df
        .column(name)
        .with_context(|| format!("Column '{}' not found", name))?
        .cast(&DataType::Float64)
        .with_context(|| format!("Column '{}' is not numeric", name))?;
    Ok(column.f64()?.clone())
}

fn required<T>(value: Option<T>, column: &str, row: usize) -> Result<T> {
    value.ok_or_else(|| anyhow!("Missing '{}' at row {}", column, row))
}

// ============================================================================
// Soil
// ============================================================================

/// Load a long-format soil profile (`depth`, `property`, `value`)
///
/// Unknown depth labels are an error. Unknown property names and null values
/// are skipped with a warning.
pub fn load_soil_profile(path: &Path) -> Result<SoilProfile> {
    let df = read_table(path)?;
    let depths = string_column(&df, "depth")?;
    let properties = string_column(&df, "property")?;
    let values = float_column(&df, "value")?;

    let mut profile = SoilProfile::new();
    let mut skipped = 0usize;

    for idx in 0..df.height() {
        let depth_label = required(depths.get(idx), "depth", idx)?;
        let depth: Depth = depth_label
            .parse()
            .with_context(|| format!("Invalid depth at row {} of {:?}", idx, path))?;

        let Some(name) = properties.get(idx) else {
            skipped += 1;
            continue;
        };
        let property = match name.parse::<SoilProperty>() {
            Ok(property) => property,
            Err(_) => {
                warn!(property = name, row = idx, "Skipping unknown soil property");
                skipped += 1;
                continue;
            }
        };
        let Some(value) = values.get(idx) else {
            warn!(property = name, depth = depth.label(), "Skipping null soil value");
            skipped += 1;
            continue;
        };

        profile.entry(depth).or_default().insert(property, value);
    }

    debug!(depths = profile.len(), rows = df.height(), skipped, "Loaded soil profile");
    Ok(profile)
}

/// Fallback profile used when no soil export is available
///
/// Same loam-like values at every depth band.
pub fn default_soil_profile() -> SoilProfile {
    let measurements: SoilMeasurements = [
        (SoilProperty::Ph, 7.0),
        (SoilProperty::OrganicCarbon, 2.0),
        (SoilProperty::Nitrogen, 0.2),
        (SoilProperty::Cec, 15.0),
        (SoilProperty::Ecec, 12.0),
        (SoilProperty::Sand, 40.0),
        (SoilProperty::Silt, 35.0),
        (SoilProperty::Clay, 25.0),
        (SoilProperty::BulkDensity, 1.3),
    ]
    .into_iter()
    .collect();

    Depth::ALL
        .iter()
        .map(|&depth| (depth, measurements.clone()))
        .collect()
}

// ============================================================================
// Weather
// ============================================================================

struct WeatherColumns {
    temperature: Float64Chunked,
    humidity: Float64Chunked,
    wind_speed: Float64Chunked,
    conditions: StringChunked,
}

impl WeatherColumns {
    fn read(df: &DataFrame) -> Result<Self> {
        Ok(Self {
            temperature: float_column(df, "temperature")?,
            humidity: float_column(df, "humidity")?,
            wind_speed: float_column(df, "wind_speed")?,
            conditions: string_column(df, "conditions")?,
        })
    }

    fn row(&self, idx: usize) -> Result<(f64, f64, f64, &str)> {
        Ok((
            required(self.temperature.get(idx), "temperature", idx)?,
            required(self.humidity.get(idx), "humidity", idx)?,
            required(self.wind_speed.get(idx), "wind_speed", idx)?,
            self.conditions.get(idx).unwrap_or(""),
        ))
    }
}

/// Load daily weather samples (`date` as YYYY-MM-DD)
pub fn load_weather_samples(path: &Path) -> Result<Vec<WeatherSample>> {
    let df = read_table(path)?;
    let dates = string_column(&df, "date")?;
    let columns = WeatherColumns::read(&df)?;

    let samples = (0..df.height())
        .map(|idx| {
            let raw = required(dates.get(idx), "date", idx)?;
            let date = NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
                .with_context(|| format!("Invalid date '{}' at row {}", raw, idx))?;
            let (temperature, humidity, wind_speed, conditions) = columns.row(idx)?;
            Ok(WeatherSample::new(date, temperature, humidity, wind_speed, conditions))
        })
        .collect::<Result<Vec<_>>>()
        .with_context(|| format!("Failed to load weather samples: {:?}", path))?;

    debug!(samples = samples.len(), "Loaded weather samples");
    Ok(samples)
}

/// Load sub-daily forecast readings (`timestamp` as RFC 3339)
pub fn load_forecast_readings(path: &Path) -> Result<Vec<ForecastReading>> {
    let df = read_table(path)?;
    let timestamps = string_column(&df, "timestamp")?;
    let columns = WeatherColumns::read(&df)?;

    let readings = (0..df.height())
        .map(|idx| {
            let raw = required(timestamps.get(idx), "timestamp", idx)?;
            let timestamp = DateTime::parse_from_rfc3339(raw.trim())
                .with_context(|| format!("Invalid timestamp '{}' at row {}", raw, idx))?;
            let (temperature, humidity, wind_speed, conditions) = columns.row(idx)?;
            Ok(ForecastReading {
                timestamp,
                temperature,
                humidity,
                wind_speed,
                conditions: conditions.to_string(),
            })
        })
        .collect::<Result<Vec<_>>>()
        .with_context(|| format!("Failed to load forecast readings: {:?}", path))?;

    if readings.is_empty() {
        warn!("Forecast file {:?} has no readings", path);
    }
    debug!(readings = readings.len(), "Loaded forecast readings");
    Ok(readings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write(dir: &tempfile::TempDir, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_load_soil_profile() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            &dir,
            "soil.csv",
            "depth,property,value\n\
             0-5cm,ph,6.4\n\
             0-5cm,organicCarbon,1.8\n\
             0-5cm,mystery,3.0\n\
             15-30cm,ph,6.9\n\
             15-30cm,clay,\n",
        );

        let profile = load_soil_profile(&path).unwrap();
        assert_eq!(profile.len(), 2);
        assert_eq!(profile[&Depth::Cm0To5].len(), 2);
        assert_eq!(profile[&Depth::Cm0To5][&SoilProperty::OrganicCarbon], 1.8);
        assert_eq!(profile[&Depth::Cm15To30].len(), 1);
    }

    #[test]
    fn test_unknown_depth_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "soil.csv", "depth,property,value\n30-60cm,ph,6.4\n");
        assert!(load_soil_profile(&path).is_err());
    }

    #[test]
    fn test_integer_values_widened() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "soil.csv", "depth,property,value\n0-5cm,cec,15\n0-5cm,sand,40\n");
        let profile = load_soil_profile(&path).unwrap();
        assert_eq!(profile[&Depth::Cm0To5][&SoilProperty::Cec], 15.0);
    }

    #[test]
    fn test_load_weather_samples() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            &dir,
            "weather.csv",
            "date,temperature,humidity,wind_speed,conditions\n\
             2024-06-01,31.5,70,3.2,clear sky\n\
             2024-06-02,29.0,82,4.1,light rain\n",
        );

        let samples = load_weather_samples(&path).unwrap();
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].date, NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        assert_eq!(samples[0].humidity, 70.0);
        assert_eq!(samples[1].conditions, "light rain");
    }

    #[test]
    fn test_bad_date_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            &dir,
            "weather.csv",
            "date,temperature,humidity,wind_speed,conditions\n06/01/2024,31.5,70,3.2,clear sky\n",
        );
        assert!(load_weather_samples(&path).is_err());
    }

    #[test]
    fn test_load_forecast_readings() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            &dir,
            "forecast.csv",
            "timestamp,temperature,humidity,wind_speed,conditions\n\
             2024-06-03T06:00:00+05:30,26.0,80,2.0,light rain\n\
             2024-06-03T09:00:00+05:30,28.0,75,2.5,light rain\n",
        );

        let readings = load_forecast_readings(&path).unwrap();
        assert_eq!(readings.len(), 2);
        assert_eq!(readings[0].timestamp.offset().local_minus_utc(), 5 * 3600 + 1800);
    }

    #[test]
    fn test_header_only_forecast_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "forecast.csv", "timestamp,temperature,humidity,wind_speed,conditions\n");
        assert!(load_forecast_readings(&path).unwrap().is_empty());
    }

    #[test]
    fn test_load_soil_profile_parquet() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("soil.parquet");
        let mut df = df!(
            "depth" => ["0-5cm", "0-5cm", "100-200cm"],
            "property" => ["ph", "clay", "ph"],
            "value" => [6.4, 22.0, 7.1],
        )
        .unwrap();
        let mut file = fs::File::create(&path).unwrap();
        ParquetWriter::new(&mut file).finish(&mut df).unwrap();

        let profile = load_soil_profile(&path).unwrap();
        assert_eq!(profile.len(), 2);
        assert_eq!(profile[&Depth::Cm0To5][&SoilProperty::Clay], 22.0);
        assert_eq!(profile[&Depth::Cm100To200][&SoilProperty::Ph], 7.1);
    }

    #[test]
    fn test_default_profile_covers_every_depth() {
        let profile = default_soil_profile();
        assert_eq!(profile.len(), Depth::ALL.len());
        for measurements in profile.values() {
            assert_eq!(measurements[&SoilProperty::Ph], 7.0);
            assert_eq!(measurements.len(), 9);
        }
    }
}
