#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Geographic position in signed decimal degrees
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GeoPoint {
    pub latitude_deg: f64,
    pub longitude_deg: f64,
}

impl GeoPoint {
    pub fn new(latitude_deg: f64, longitude_deg: f64) -> Self {
        Self {
            latitude_deg,
            longitude_deg,
        }
    }

    /// Great-circle distance to `other` at ISS altitude, in kilometers
    pub fn distance_km(&self, other: &GeoPoint) -> f64 {
        crate::distance::distance_km(
            self.longitude_deg,
            self.latitude_deg,
            other.longitude_deg,
            other.latitude_deg,
        )
    }
}

/// One normalized observation taken from a photo's metadata
///
/// `timestamp_s` counts seconds since 1970-01-01T00:00:00 and is only
/// meaningful for differencing against another sample.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GeoSample {
    pub timestamp_s: f64,
    pub latitude_deg: f64,
    pub longitude_deg: f64,
}

impl GeoSample {
    pub fn new(timestamp_s: f64, latitude_deg: f64, longitude_deg: f64) -> Self {
        Self {
            timestamp_s,
            latitude_deg,
            longitude_deg,
        }
    }

    pub fn point(&self) -> GeoPoint {
        GeoPoint::new(self.latitude_deg, self.longitude_deg)
    }
}

/// Angle as degrees, minutes and seconds (the EXIF GPS rational triple)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Dms {
    pub degrees: f64,
    pub minutes: f64,
    pub seconds: f64,
}

impl Dms {
    pub fn new(degrees: f64, minutes: f64, seconds: f64) -> Self {
        Self {
            degrees,
            minutes,
            seconds,
        }
    }
}

impl From<(f64, f64, f64)> for Dms {
    fn from((degrees, minutes, seconds): (f64, f64, f64)) -> Self {
        Self::new(degrees, minutes, seconds)
    }
}
