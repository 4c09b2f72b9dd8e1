//! Materialises per-sample rows for download, as CSV or JSON.
//!
//! Rows carry the raw sensors, the derived indices (empty/null when
//! undefined), the hourly precipitation rate with its provenance label, and
//! the condition flags. The CSV header order is part of the contract.

use crate::sampling::SampleCollection;
use crate::settings::Settings;
use crate::thresholds::flag_conditions;
use serde::Serialize;
use std::fmt::Write as _;
use thiserror::Error;

/// Column order of the CSV export.
const CSV_HEADER: &str = "timestamp_local,year,doy,lat,lon,temp_c,rh_pct,wind_ms,heat_index_c,wind_chill_c,precip_mm_per_h,precip_source,very_hot,very_cold,very_windy,very_wet,any_adverse";

/// Output encoding of the export operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to encode export rows as JSON")]
    Json(#[from] serde_json::Error),
}

/// One exported sample row.
#[derive(Debug, Clone, Serialize)]
pub struct ExportRow {
    pub timestamp_local: String,
    pub year: i32,
    pub doy: u32,
    pub lat: f64,
    pub lon: f64,
    pub temp_c: f64,
    pub rh_pct: f64,
    pub wind_ms: f64,
    pub heat_index_c: Option<f64>,
    pub wind_chill_c: Option<f64>,
    pub precip_mm_per_h: f64,
    pub precip_source: &'static str,
    pub very_hot: bool,
    pub very_cold: bool,
    pub very_windy: bool,
    pub very_wet: bool,
    pub any_adverse: bool,
}

/// Flattens a collection into export rows, evaluating the flags with the
/// given settings.
pub fn export_rows(collection: &SampleCollection, settings: &Settings) -> Vec<ExportRow> {
    collection
        .samples
        .iter()
        .map(|sample| {
            let flags = flag_conditions(sample, settings);
            ExportRow {
                timestamp_local: sample.ts_local.format("%Y-%m-%dT%H:%M:%S").to_string(),
                year: sample.year,
                doy: sample.doy,
                lat: sample.latitude,
                lon: sample.longitude,
                temp_c: sample.temperature_c,
                rh_pct: sample.relative_humidity,
                wind_ms: sample.wind_speed_ms,
                heat_index_c: sample.heat_index_c,
                wind_chill_c: sample.wind_chill_c,
                precip_mm_per_h: sample.hourly_precip_rate(),
                precip_source: sample.precip_source.label(),
                very_hot: flags.very_hot,
                very_cold: flags.very_cold,
                very_windy: flags.very_windy,
                very_wet: flags.very_wet,
                any_adverse: flags.any_flagged(),
            }
        })
        .collect()
}

/// Renders rows as CSV with the deterministic header; missing indices become
/// empty fields.
pub fn to_csv(rows: &[ExportRow]) -> String {
    let mut out = String::with_capacity(64 + rows.len() * 128);
    out.push_str(CSV_HEADER);
    out.push('\n');

    for row in rows {
        let _ = writeln!(
            out,
            "{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{}",
            row.timestamp_local,
            row.year,
            row.doy,
            row.lat,
            row.lon,
            row.temp_c,
            row.rh_pct,
            row.wind_ms,
            optional_field(row.heat_index_c),
            optional_field(row.wind_chill_c),
            row.precip_mm_per_h,
            row.precip_source,
            row.very_hot,
            row.very_cold,
            row.very_windy,
            row.very_wet,
            row.any_adverse,
        );
    }
    out
}

/// Renders rows as a pretty-printed JSON array with the same field set.
pub fn to_json(rows: &[ExportRow]) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(rows)?)
}

fn optional_field(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}
