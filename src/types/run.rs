use crate::types::{AverageSpeed, GeoSample, SpeedEstimate};
use std::path::PathBuf;
use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Running totals of a sampling run
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RunAccumulator {
    /// Sum of all valid speed estimates in km/s
    pub total_speed_kmps: f64,
    /// Number of iterations that produced a valid estimate
    pub valid_count: u32,
    /// Number of iterations that finished, including the first
    pub iterations_completed: u32,
}

impl RunAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one finished iteration; invalid estimates only advance the iteration count
    pub fn record(&mut self, estimate: &SpeedEstimate) {
        if let Some(speed) = estimate.speed_kmps() {
            self.total_speed_kmps += speed;
            self.valid_count += 1;
        }
        self.iterations_completed += 1;
    }

    /// `total / (iterations - 1)`; the first iteration never has anything to compare with
    pub fn average(&self) -> AverageSpeed {
        if self.iterations_completed > 1 {
            AverageSpeed::Estimated(
                self.total_speed_kmps / f64::from(self.iterations_completed - 1),
            )
        } else {
            AverageSpeed::Unavailable
        }
    }
}

/// Why a sampling run stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum StopReason {
    IterationLimit,
    DurationLimit,
    /// A capture, decode or estimation error ended the run
    Aborted,
}

/// What happened in one iteration of the sampling loop
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IterationRecord {
    pub iteration: u32,
    pub image_path: PathBuf,
    pub sample: GeoSample,
    pub estimate: SpeedEstimate,
}

/// Outcome of a completed sampling run
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RunReport {
    pub iterations: Vec<IterationRecord>,
    pub accumulator: RunAccumulator,
    pub stop_reason: StopReason,
    pub average: AverageSpeed,
    /// Exactly what was handed to the result writer
    pub result_text: String,
    pub elapsed: Duration,
}

impl RunReport {
    pub fn iterations_completed(&self) -> u32 {
        self.accumulator.iterations_completed
    }

    pub fn valid_estimates(&self) -> impl Iterator<Item = &IterationRecord> {
        self.iterations.iter().filter(|r| r.estimate.is_valid())
    }
}
