//! Fixture photos for integration tests
//!
//! Builds minimal JPEG files whose APP1 segment carries the EXIF fields the
//! decoder reads. No image data is needed for metadata extraction.

#![allow(dead_code)]

use exif::experimental::Writer;
use exif::{Field, In, Rational, Tag, Value};
use iss_speed::{Dms, MetadataRecord};
use std::io::Cursor;
use std::path::{Path, PathBuf};

fn rational(value: f64) -> Rational {
    Rational {
        num: (value * 10_000.0).round() as u32,
        denom: 10_000,
    }
}

fn ascii(tag: Tag, text: &str) -> Field {
    Field {
        tag,
        ifd_num: In::PRIMARY,
        value: Value::Ascii(vec![text.as_bytes().to_vec()]),
    }
}

fn dms(tag: Tag, angle: Dms) -> Field {
    Field {
        tag,
        ifd_num: In::PRIMARY,
        value: Value::Rational(vec![
            rational(angle.degrees),
            rational(angle.minutes),
            rational(angle.seconds),
        ]),
    }
}

/// JPEG bytes carrying the given metadata
pub fn exif_jpeg(record: &MetadataRecord) -> Vec<u8> {
    let mut fields = vec![ascii(Tag::ImageDescription, "iss_speed test fixture")];
    if let Some(time) = &record.datetime_original {
        fields.push(ascii(Tag::DateTimeOriginal, time));
    }
    if let Some(lat) = record.gps_latitude {
        fields.push(dms(Tag::GPSLatitude, lat));
    }
    if let Some(lat_ref) = &record.gps_latitude_ref {
        fields.push(ascii(Tag::GPSLatitudeRef, lat_ref));
    }
    if let Some(lon) = record.gps_longitude {
        fields.push(dms(Tag::GPSLongitude, lon));
    }
    if let Some(lon_ref) = &record.gps_longitude_ref {
        fields.push(ascii(Tag::GPSLongitudeRef, lon_ref));
    }

    let mut writer = Writer::new();
    for field in &fields {
        writer.push_field(field);
    }
    let mut tiff = Cursor::new(Vec::new());
    writer.write(&mut tiff, false).expect("Failed to encode EXIF");
    let tiff = tiff.into_inner();

    // SOI, APP1 "Exif\0\0" + TIFF, EOI
    let mut jpeg = vec![0xFF, 0xD8, 0xFF, 0xE1];
    let segment_len = u16::try_from(2 + 6 + tiff.len()).expect("EXIF segment too large");
    jpeg.extend_from_slice(&segment_len.to_be_bytes());
    jpeg.extend_from_slice(b"Exif\0\0");
    jpeg.extend_from_slice(&tiff);
    jpeg.extend_from_slice(&[0xFF, 0xD9]);
    jpeg
}

pub fn write_photo(path: &Path, record: &MetadataRecord) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create fixture directory");
    }
    std::fs::write(path, exif_jpeg(record)).expect("Failed to write fixture photo");
}

/// Metadata for a photo taken `seconds` after 2022-05-05 12:00:00 at the given position
pub fn record_at(seconds: u32, lat_deg: f64, lon_deg: f64) -> MetadataRecord {
    let (lat_ref, lon_ref) = (
        if lat_deg < 0.0 { "S" } else { "N" },
        if lon_deg < 0.0 { "W" } else { "E" },
    );
    MetadataRecord {
        datetime_original: Some(format!(
            "2022:05:05 {:02}:{:02}:{:02}",
            12 + seconds / 3600,
            (seconds / 60) % 60,
            seconds % 60
        )),
        gps_latitude: Some(to_dms(lat_deg.abs())),
        gps_latitude_ref: Some(lat_ref.to_string()),
        gps_longitude: Some(to_dms(lon_deg.abs())),
        gps_longitude_ref: Some(lon_ref.to_string()),
    }
}

pub fn to_dms(value: f64) -> Dms {
    let degrees = value.trunc();
    let minutes_full = (value - degrees) * 60.0;
    let minutes = minutes_full.trunc();
    let seconds = (minutes_full - minutes) * 60.0;
    Dms::new(degrees, minutes, seconds)
}

/// Numbered photos `<prefix>0.jpg` .. along a track moving 0.4 degrees east every 5 seconds
pub fn write_track(prefix: &str, count: u32) -> Vec<PathBuf> {
    (0..count)
        .map(|i| {
            let path = PathBuf::from(format!("{prefix}{i}.jpg"));
            write_photo(&path, &record_at(i * 5, 51.5, -20.0 + f64::from(i) * 0.4));
            path
        })
        .collect()
}
