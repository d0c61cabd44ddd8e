//! Integration tests for EXIF decoding and sample extraction
//!
//! Fixture photos are generated on the fly (see `common`), then read back
//! through the public decoder.

mod common;

use common::{record_at, write_photo};
use iss_speed::{
    extract_sample, Dms, ExifDecoder, MetadataField, MetadataRecord, MetadataSource, SpeedError,
};
use tempfile::TempDir;

#[test]
fn test_decode_roundtrips_fixture_fields() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("photo_232.jpg");

    // GPS Latitude 48 deg 12' 26.30" N, GPS Longitude 19 deg 38' 33.20" E
    let written = MetadataRecord {
        datetime_original: Some("2022:05:05 12:00:00".to_string()),
        gps_latitude: Some(Dms::new(48.0, 12.0, 26.3)),
        gps_latitude_ref: Some("N".to_string()),
        gps_longitude: Some(Dms::new(19.0, 38.0, 33.2)),
        gps_longitude_ref: Some("E".to_string()),
    };
    write_photo(&path, &written);

    let decoded = ExifDecoder::new().decode(&path).expect("Failed to decode fixture");
    assert_eq!(decoded.datetime_original.as_deref(), Some("2022:05:05 12:00:00"));
    assert_eq!(decoded.gps_latitude_ref.as_deref(), Some("N"));
    assert_eq!(decoded.gps_longitude_ref.as_deref(), Some("E"));

    let lat = decoded.gps_latitude.expect("latitude should be decoded");
    assert_eq!(lat.degrees, 48.0);
    assert_eq!(lat.minutes, 12.0);
    assert!((lat.seconds - 26.3).abs() < 1e-9);

    let sample = extract_sample(&decoded).expect("complete record should extract");
    assert!((sample.latitude_deg - 48.2073055).abs() < 1e-6);
    assert!((sample.longitude_deg - 19.6425555).abs() < 1e-6);
    assert_eq!(sample.timestamp_s, 1_651_752_000.0);
}

#[test]
fn test_decode_southern_western_fixture() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("andromeda_0025.jpg");
    write_photo(&path, &record_at(0, -49.8513892, -69.50729155));

    let decoded = ExifDecoder::new().decode(&path).unwrap();
    let sample = extract_sample(&decoded).unwrap();
    assert!((sample.latitude_deg + 49.8513892).abs() < 1e-6);
    assert!((sample.longitude_deg + 69.50729155).abs() < 1e-6);
}

#[test]
fn test_missing_gps_fields_fail_extraction() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("no_gps.jpg");

    let mut record = record_at(0, 10.0, 10.0);
    record.gps_latitude = None;
    record.gps_longitude_ref = None;
    write_photo(&path, &record);

    let decoded = ExifDecoder::new().decode(&path).unwrap();
    assert!(decoded.has(MetadataField::DateTimeOriginal));
    assert!(!decoded.has(MetadataField::GpsLatitude));

    assert_eq!(
        extract_sample(&decoded),
        Err(SpeedError::MissingGeolocation {
            missing: vec![MetadataField::GpsLatitude, MetadataField::GpsLongitudeRef],
        })
    );
}

#[test]
fn test_decode_rejects_non_images() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("notes.jpg");
    std::fs::write(&path, "not a photo").unwrap();

    let err = ExifDecoder::new().decode(&path).unwrap_err();
    assert!(format!("{err:#}").contains("notes.jpg"));
}
