//! Metadata decoding and sample extraction
//!
//! A [`MetadataSource`] turns an image file into a [`MetadataRecord`];
//! [`extract_sample`] turns that record into a [`GeoSample`](crate::GeoSample).

pub mod decoder;
pub mod extract;

pub use self::decoder::ExifDecoder;
pub use self::extract::extract_sample;

use crate::types::MetadataRecord;
use crate::Result;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Something that can decode the metadata embedded in an image file
pub trait MetadataSource {
    fn decode(&self, path: &Path) -> Result<MetadataRecord>;
}

impl<T: MetadataSource + ?Sized> MetadataSource for &T {
    fn decode(&self, path: &Path) -> Result<MetadataRecord> {
        (**self).decode(path)
    }
}

/// Records keyed by path, for replaying known metadata without image files
impl MetadataSource for HashMap<PathBuf, MetadataRecord> {
    fn decode(&self, path: &Path) -> Result<MetadataRecord> {
        self.get(path)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("No metadata recorded for {}", path.display()))
    }
}
