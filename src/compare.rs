//! Speed estimates from data that already exists
//!
//! [`estimate_from_files`] compares consecutive photos on disk without running
//! the capture loop. [`estimate_from_track`] checks the distance model against
//! ground-track observations with a known time difference.

use crate::distance::distance_km;
use crate::estimate::{estimate_speed, ElapsedTimePolicy};
use crate::metadata::{extract_sample, MetadataSource};
use crate::types::{AverageSpeed, GeoPoint, Measurement};
use crate::Result;
use anyhow::{bail, Context};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Published mean ISS speed, for comparison only
pub const PUBLISHED_ISS_SPEED_KMPS: f64 = 7.66;

/// Speed between one pair of photos
#[derive(Debug, Clone, PartialEq)]
pub struct PairEstimate {
    pub from: PathBuf,
    pub to: PathBuf,
    pub measurement: Measurement,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PairwiseReport {
    pub pairs: Vec<PairEstimate>,
    pub average: AverageSpeed,
}

/// Compare each photo with the one before it and average the speeds
pub fn estimate_from_files<S: MetadataSource, P: AsRef<Path>>(
    paths: &[P],
    source: &S,
    policy: ElapsedTimePolicy,
) -> Result<PairwiseReport> {
    if paths.len() < 2 {
        bail!("At least two images are needed for a comparison, got {}", paths.len());
    }

    let mut samples = Vec::with_capacity(paths.len());
    for path in paths {
        let path = path.as_ref();
        let record = source.decode(path)?;
        let sample = extract_sample(&record)
            .with_context(|| format!("Failed to extract sample from {}", path.display()))?;
        samples.push((path.to_path_buf(), sample));
    }

    let mut pairs = Vec::with_capacity(samples.len() - 1);
    for window in samples.windows(2) {
        let (from, previous) = &window[0];
        let (to, current) = &window[1];
        let estimate = estimate_speed(current, Some(previous), policy).with_context(|| {
            format!("Failed to compare {} and {}", from.display(), to.display())
        })?;
        if let Some(measurement) = estimate.measurement() {
            info!(
                "{:.3} km in {} s = {:.5} km/s ({} -> {})",
                measurement.distance_km,
                measurement.elapsed_s,
                measurement.speed_kmps,
                from.display(),
                to.display()
            );
            pairs.push(PairEstimate {
                from: from.clone(),
                to: to.clone(),
                measurement: *measurement,
            });
        }
    }

    let total: f64 = pairs.iter().map(|p| p.measurement.speed_kmps).sum();
    let average = AverageSpeed::Estimated(total / pairs.len() as f64);
    Ok(PairwiseReport { pairs, average })
}

/// Two ground-track positions observed `elapsed_s` seconds apart
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackObservation {
    pub start: GeoPoint,
    pub end: GeoPoint,
    pub elapsed_s: f64,
}

impl TrackObservation {
    pub const fn new(
        start_lon: f64,
        start_lat: f64,
        end_lon: f64,
        end_lat: f64,
        elapsed_s: f64,
    ) -> Self {
        Self {
            start: GeoPoint {
                latitude_deg: start_lat,
                longitude_deg: start_lon,
            },
            end: GeoPoint {
                latitude_deg: end_lat,
                longitude_deg: end_lon,
            },
            elapsed_s,
        }
    }

    pub fn measurement(&self) -> Measurement {
        let distance_km = distance_km(
            self.start.longitude_deg,
            self.start.latitude_deg,
            self.end.longitude_deg,
            self.end.latitude_deg,
        );
        Measurement {
            distance_km,
            elapsed_s: self.elapsed_s,
            speed_kmps: (distance_km / self.elapsed_s).abs(),
        }
    }
}

/// Logged ISS ground-track positions roughly one minute apart (lon, lat)
pub const REFERENCE_TRACK: [TrackObservation; 5] = [
    TrackObservation::new(66.77867751, -20.2800441, 69.11392852, -17.45516549, 63.0),
    TrackObservation::new(75.77266642, -8.716663614, 77.96575012, -5.672454996, 60.0),
    TrackObservation::new(171.5097129, 47.64335562, 176.3749973, 45.99076451, 60.0),
    TrackObservation::new(-69.50729155, -49.8513892, -63.8963865, -50.79717797, 60.0),
    TrackObservation::new(-18.00219328, -46.90519689, -13.0462651, -45.05238817, 63.0),
];

/// Average speed over the observations; observations with no elapsed time are skipped
pub fn estimate_from_track(observations: &[TrackObservation]) -> AverageSpeed {
    let mut speeds = Vec::with_capacity(observations.len());
    for (index, observation) in observations.iter().enumerate() {
        if observation.elapsed_s == 0.0 {
            warn!("skipping track observation {index}: zero elapsed time");
            continue;
        }
        speeds.push(observation.measurement().speed_kmps);
    }

    if speeds.is_empty() {
        AverageSpeed::Unavailable
    } else {
        AverageSpeed::Estimated(speeds.iter().sum::<f64>() / speeds.len() as f64)
    }
}
