//! Data conversion utilities for photo metadata
//!
//! Contains the angle and time conversions needed to turn raw EXIF values
//! into a comparable [`GeoSample`](crate::GeoSample), plus result formatting.

use crate::error::{SpeedError, SpeedResult};
use crate::types::Dms;
use chrono::NaiveDateTime;

/// EXIF `DateTimeOriginal` layout
pub const EXIF_DATETIME_FORMAT: &str = "%Y:%m:%d %H:%M:%S";

/// Hemisphere reference that keeps a latitude positive
pub const NORTH: &str = "N";

/// Hemisphere reference that keeps a longitude positive
pub const EAST: &str = "E";

/// Convert a degrees/minutes/seconds triple to decimal degrees
pub fn to_decimal_degrees(dms: Dms) -> f64 {
    dms.degrees + (dms.minutes / 60.0) + (dms.seconds / 3600.0)
}

/// Negate `value` unless `reference` is the hemisphere that counts as positive
pub fn apply_hemisphere(value: f64, reference: &str, positive_reference: &str) -> f64 {
    if reference == positive_reference {
        value
    } else {
        -value
    }
}

/// Signed latitude from a DMS triple and its N/S reference
pub fn convert_latitude(dms: Dms, reference: &str) -> f64 {
    apply_hemisphere(to_decimal_degrees(dms), reference, NORTH)
}

/// Signed longitude from a DMS triple and its E/W reference
pub fn convert_longitude(dms: Dms, reference: &str) -> f64 {
    apply_hemisphere(to_decimal_degrees(dms), reference, EAST)
}

/// Parse an EXIF capture time into seconds since 1970-01-01T00:00:00
///
/// The camera clock carries no time zone, so the value is treated as naive.
/// Only differences between two results are meaningful.
pub fn timestamp_to_epoch_seconds(value: &str) -> SpeedResult<f64> {
    // EXIF ASCII values are NUL padded on some cameras
    let trimmed = value.trim_end_matches('\0').trim();
    let datetime = NaiveDateTime::parse_from_str(trimmed, EXIF_DATETIME_FORMAT).map_err(|e| {
        SpeedError::InvalidTimestamp {
            value: value.to_string(),
            reason: e.to_string(),
        }
    })?;

    Ok(datetime.and_utc().timestamp_millis() as f64 / 1000.0)
}

/// Format a speed for the result file (5 decimal places)
pub fn format_speed_kmps(speed_kmps: f64) -> String {
    format!("{speed_kmps:.5}")
}
