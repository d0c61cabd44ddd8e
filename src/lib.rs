//! ISS Speed Library
//!
//! A Rust library for estimating the ground-track speed of the International
//! Space Station from geotagged photographs. Each photo's EXIF capture time and
//! GPS position become a sample; consecutive samples give a great-circle
//! distance and an elapsed time, and the resulting speeds are averaged.
//!
//! # Features
//!
//! - **`csv`** (default): Enable the per-iteration CSV log
//! - **`cli`** (default): Build the command-line interface binary
//! - **`json`**: Enable JSON run configuration and JSON run summaries
//! - **`serde`**: Enable serialization/deserialization of types
//!
//! # Quick Start
//!
//! Run the sampling loop against numbered fixture photos (`photos/0.jpg`,
//! `photos/1.jpg`, ...):
//! ```rust,no_run
//! use iss_speed::{DryRunCapture, ExifDecoder, FileResultWriter, RunConfig, SamplingLoop, SystemClock};
//!
//! let config = RunConfig::default();
//! let mut sampling = SamplingLoop::new(config, DryRunCapture, ExifDecoder::new(), SystemClock::new()).unwrap();
//! let report = sampling.run(&mut FileResultWriter).unwrap();
//! println!("Average speed: {} km/s", report.result_text);
//! ```
//!
//! Compare two photos directly:
//! ```rust,no_run
//! use iss_speed::{estimate_from_files, ElapsedTimePolicy, ExifDecoder};
//!
//! let report = estimate_from_files(&["photo_232.jpg", "photo_237.jpg"], &ExifDecoder::new(), ElapsedTimePolicy::Absolute).unwrap();
//! println!("{:?}", report.average);
//! ```
//!
//! # Public API
//!
//! ## Estimation
//! - [`distance_km`] - Haversine distance at ISS altitude
//! - [`to_decimal_degrees`] / [`apply_hemisphere`] - DMS to signed decimal degrees
//! - [`extract_sample`] - Metadata record to [`GeoSample`]
//! - [`estimate_speed`] - Two samples to a [`SpeedEstimate`]
//!
//! ## Running
//! - [`SamplingLoop`] - Capture/estimate loop with iteration and duration caps
//! - [`RunConfig`] - Run settings
//! - [`estimate_from_files`] - Pairwise comparison of existing photos
//! - [`estimate_from_track`] - Check against logged ground-track positions
//!
//! ## Collaborators
//! - [`Capture`] ([`DryRunCapture`], [`CommandCapture`])
//! - [`MetadataSource`] ([`ExifDecoder`])
//! - [`ResultWriter`] ([`FileResultWriter`])
//! - [`Clock`] ([`SystemClock`], [`SimulatedClock`])

// Module declarations
pub mod capture;
pub mod clock;
pub mod compare;
pub mod config;
pub mod conversion;
pub mod distance;
pub mod error;
pub mod estimate;
pub mod export;
pub mod metadata;
pub mod sampling;
pub mod types;

pub use capture::*;
pub use clock::*;
pub use compare::*;
pub use config::*;
pub use conversion::*;
pub use distance::*;
pub use error::*;
pub use estimate::*;
pub use export::*;
pub use metadata::*;
pub use sampling::*;
pub use types::*;

// Re-export Result type for convenience
pub use anyhow::Result;
