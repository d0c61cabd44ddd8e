//! Sample extraction from decoded metadata
//!
//! Turns a [`MetadataRecord`] into a [`GeoSample`]. A record lacking any of the
//! four GPS fields yields an error rather than a sample, so a previous
//! position is never silently reused.

use crate::conversion::{convert_latitude, convert_longitude, timestamp_to_epoch_seconds};
use crate::error::{SpeedError, SpeedResult};
use crate::types::{GeoSample, MetadataRecord};

/// Normalize a decoded record into a sample
pub fn extract_sample(record: &MetadataRecord) -> SpeedResult<GeoSample> {
    let (lat, lat_ref, lon, lon_ref) = match (
        record.gps_latitude,
        record.gps_latitude_ref.as_deref(),
        record.gps_longitude,
        record.gps_longitude_ref.as_deref(),
    ) {
        (Some(lat), Some(lat_ref), Some(lon), Some(lon_ref)) => (lat, lat_ref, lon, lon_ref),
        _ => {
            return Err(SpeedError::MissingGeolocation {
                missing: record.missing_geolocation(),
            })
        }
    };

    let timestamp_s = match record.datetime_original.as_deref() {
        Some(value) => timestamp_to_epoch_seconds(value)?,
        None => return Err(SpeedError::MissingTimestamp),
    };

    Ok(GeoSample::new(
        timestamp_s,
        convert_latitude(lat, lat_ref),
        convert_longitude(lon, lon_ref),
    ))
}
