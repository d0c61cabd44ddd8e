#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Value written to the result file when no average could be computed
pub const NO_ESTIMATE_SENTINEL_KMPS: f64 = -1.0;

/// Distance and time between two samples and the speed derived from them
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Measurement {
    /// Great-circle distance at ISS altitude
    pub distance_km: f64,
    /// Signed; negative when the samples arrived out of order
    pub elapsed_s: f64,
    /// Always non-negative
    pub speed_kmps: f64,
}

/// Result of comparing a sample against its predecessor
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SpeedEstimate {
    /// No predecessor to compare against
    Invalid,
    /// Speed derived from this sample and its predecessor
    Valid(Measurement),
}

impl SpeedEstimate {
    pub fn is_valid(&self) -> bool {
        matches!(self, SpeedEstimate::Valid(_))
    }

    pub fn speed_kmps(&self) -> Option<f64> {
        match self {
            SpeedEstimate::Valid(m) => Some(m.speed_kmps),
            SpeedEstimate::Invalid => None,
        }
    }

    pub fn measurement(&self) -> Option<&Measurement> {
        match self {
            SpeedEstimate::Valid(m) => Some(m),
            SpeedEstimate::Invalid => None,
        }
    }
}

/// Final average of a run
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AverageSpeed {
    /// Mean speed in km/s
    Estimated(f64),
    /// Fewer than two iterations completed
    Unavailable,
}

impl AverageSpeed {
    pub fn kmps(&self) -> Option<f64> {
        match self {
            AverageSpeed::Estimated(v) => Some(*v),
            AverageSpeed::Unavailable => None,
        }
    }

    /// Fixed five-decimal rendering used for the result file
    pub fn to_result_string(&self) -> String {
        crate::conversion::format_speed_kmps(self.kmps().unwrap_or(NO_ESTIMATE_SENTINEL_KMPS))
    }
}
