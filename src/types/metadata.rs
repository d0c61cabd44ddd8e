use crate::types::gps::Dms;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Names of the metadata fields the extractor consumes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MetadataField {
    /// Capture time (EXIF `DateTimeOriginal`)
    DateTimeOriginal,
    GpsLatitude,
    GpsLatitudeRef,
    GpsLongitude,
    GpsLongitudeRef,
}

impl MetadataField {
    pub const GEOLOCATION: [MetadataField; 4] = [
        MetadataField::GpsLatitude,
        MetadataField::GpsLatitudeRef,
        MetadataField::GpsLongitude,
        MetadataField::GpsLongitudeRef,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            MetadataField::DateTimeOriginal => "datetime_original",
            MetadataField::GpsLatitude => "gps_latitude",
            MetadataField::GpsLatitudeRef => "gps_latitude_ref",
            MetadataField::GpsLongitude => "gps_longitude",
            MetadataField::GpsLongitudeRef => "gps_longitude_ref",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "datetime_original" => Some(MetadataField::DateTimeOriginal),
            "gps_latitude" => Some(MetadataField::GpsLatitude),
            "gps_latitude_ref" => Some(MetadataField::GpsLatitudeRef),
            "gps_longitude" => Some(MetadataField::GpsLongitude),
            "gps_longitude_ref" => Some(MetadataField::GpsLongitudeRef),
            _ => None,
        }
    }
}

impl fmt::Display for MetadataField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single decoded metadata value
#[derive(Debug, Clone, PartialEq)]
pub enum MetadataValue<'a> {
    /// Timestamp or hemisphere reference
    Text(&'a str),
    /// Latitude or longitude magnitude
    Angle(Dms),
}

/// Already-decoded image metadata
///
/// Every field is optional because cameras (and the test fixtures) may
/// omit any of them; [`crate::extract_sample`] decides what is required.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MetadataRecord {
    /// Capture time, `YYYY:MM:DD HH:MM:SS`
    pub datetime_original: Option<String>,
    pub gps_latitude: Option<Dms>,
    /// `N` or `S`
    pub gps_latitude_ref: Option<String>,
    pub gps_longitude: Option<Dms>,
    /// `E` or `W`
    pub gps_longitude_ref: Option<String>,
}

impl MetadataRecord {
    pub fn get(&self, field: MetadataField) -> Option<MetadataValue<'_>> {
        match field {
            MetadataField::DateTimeOriginal => {
                self.datetime_original.as_deref().map(MetadataValue::Text)
            }
            MetadataField::GpsLatitude => self.gps_latitude.map(MetadataValue::Angle),
            MetadataField::GpsLatitudeRef => {
                self.gps_latitude_ref.as_deref().map(MetadataValue::Text)
            }
            MetadataField::GpsLongitude => self.gps_longitude.map(MetadataValue::Angle),
            MetadataField::GpsLongitudeRef => {
                self.gps_longitude_ref.as_deref().map(MetadataValue::Text)
            }
        }
    }

    /// Look a field up by its snake_case name
    pub fn get_by_name(&self, name: &str) -> Option<MetadataValue<'_>> {
        MetadataField::from_name(name).and_then(|field| self.get(field))
    }

    pub fn has(&self, field: MetadataField) -> bool {
        self.get(field).is_some()
    }

    /// Geolocation fields that are absent, in a stable order
    pub fn missing_geolocation(&self) -> Vec<MetadataField> {
        MetadataField::GEOLOCATION
            .iter()
            .copied()
            .filter(|field| !self.has(*field))
            .collect()
    }
}
