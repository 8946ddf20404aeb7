//! Output formatting and persistence for search results.
//!
//! Supports pretty-printing, JSON logging, CSV append of the daily series,
//! and writing the map layer as GeoJSON.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use csv::WriterBuilder;
use serde::Serialize;
use std::fs::OpenOptions;
use std::path::Path;
use tracing::{debug, info};

use crate::forecast::DailyAggregate;
use crate::map::MapView;
use crate::weather::WeatherSummary;

/// One CSV row: a single day's average for a city.
#[derive(Debug, Serialize)]
pub struct DailyRecord<'a> {
    pub fetched_at: DateTime<Utc>,
    pub city: &'a str,
    pub date: &'a str,
    pub average_temperature_celsius: f64,
}

/// Logs a summary using Rust's debug pretty-print format.
pub fn print_pretty(summary: &WeatherSummary, daily: &[DailyAggregate]) {
    debug!("{:#?}", summary);
    for day in daily {
        info!(date = %day.date, avg_celsius = day.average_temperature_celsius, "Daily average");
    }
}

/// Logs the summary and daily series as pretty-printed JSON.
pub fn print_json(summary: &WeatherSummary, daily: &[DailyAggregate]) -> Result<()> {
    let value = serde_json::json!({ "weather": summary, "daily": daily });
    info!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

/// Appends one row per day to a CSV file.
///
/// Creates the file with headers if it does not already exist.
pub fn append_daily(path: &str, city: &str, daily: &[DailyAggregate]) -> Result<()> {
    let file_exists = Path::new(path).exists();
    debug!(path, file_exists, rows = daily.len(), "Appending CSV records");

    let file = OpenOptions::new().append(true).create(true).open(path)?;

    let mut writer = WriterBuilder::new()
        .has_headers(!file_exists) // header only on a fresh file
        .from_writer(file);

    let fetched_at = Utc::now();
    for day in daily {
        writer.serialize(DailyRecord {
            fetched_at,
            city,
            date: &day.date,
            average_temperature_celsius: day.average_temperature_celsius,
        })?;
    }
    writer.flush()?;

    Ok(())
}

/// Writes the map layer as a GeoJSON `FeatureCollection`.
pub fn write_geojson(path: &str, map: &MapView) -> Result<()> {
    let body = serde_json::to_string_pretty(&map.to_geojson())?;
    std::fs::write(path, body).with_context(|| format!("failed to write GeoJSON to '{path}'"))?;
    info!(path, markers = map.markers().len(), "Map layer written");
    Ok(())
}
