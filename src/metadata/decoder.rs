//! EXIF decoding via the `kamadak-exif` crate

use super::MetadataSource;
use crate::types::{Dms, MetadataRecord};
use crate::Result;
use anyhow::Context;
use exif::{Exif, In, Reader, Tag, Value};
use std::fs::File;
use std::io::{BufRead, BufReader, Cursor, Seek};
use std::path::Path;
use tracing::debug;

/// Reads capture time and GPS tags from JPEG/TIFF/HEIF/PNG/WebP containers
#[derive(Debug, Clone, Copy, Default)]
pub struct ExifDecoder;

impl ExifDecoder {
    pub fn new() -> Self {
        Self
    }

    /// Decode an in-memory image
    pub fn decode_bytes(&self, data: &[u8]) -> Result<MetadataRecord> {
        read_record(&mut Cursor::new(data))
    }
}

impl MetadataSource for ExifDecoder {
    fn decode(&self, path: &Path) -> Result<MetadataRecord> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open image: {}", path.display()))?;
        let record = read_record(&mut BufReader::new(file))
            .with_context(|| format!("Failed to read EXIF from: {}", path.display()))?;

        debug!(image = %path.display(), ?record, "decoded metadata");
        Ok(record)
    }
}

fn read_record<R: BufRead + Seek>(reader: &mut R) -> Result<MetadataRecord> {
    let exif = match Reader::new().read_from_container(reader) {
        Ok(exif) => exif,
        // An image without any EXIF block has no usable fields; extraction reports what is missing
        Err(exif::Error::NotFound(what)) => {
            debug!("no EXIF data found in {what} container");
            return Ok(MetadataRecord::default());
        }
        Err(e) => return Err(e.into()),
    };

    Ok(MetadataRecord {
        datetime_original: ascii_field(&exif, Tag::DateTimeOriginal),
        gps_latitude: dms_field(&exif, Tag::GPSLatitude),
        gps_latitude_ref: ascii_field(&exif, Tag::GPSLatitudeRef),
        gps_longitude: dms_field(&exif, Tag::GPSLongitude),
        gps_longitude_ref: ascii_field(&exif, Tag::GPSLongitudeRef),
    })
}

fn ascii_field(exif: &Exif, tag: Tag) -> Option<String> {
    match &exif.get_field(tag, In::PRIMARY)?.value {
        Value::Ascii(parts) => {
            let text = String::from_utf8_lossy(parts.first()?)
                .trim_end_matches('\0')
                .trim()
                .to_string();
            (!text.is_empty()).then_some(text)
        }
        _ => None,
    }
}

fn dms_field(exif: &Exif, tag: Tag) -> Option<Dms> {
    match &exif.get_field(tag, In::PRIMARY)?.value {
        Value::Rational(parts) if parts.len() >= 3 => Some(Dms::new(
            parts[0].to_f64(),
            parts[1].to_f64(),
            parts[2].to_f64(),
        )),
        _ => None,
    }
}
