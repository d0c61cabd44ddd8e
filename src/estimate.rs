//! Speed estimation between two consecutive samples

use crate::distance::distance_km;
use crate::error::{SpeedError, SpeedResult};
use crate::types::{GeoSample, Measurement, SpeedEstimate};
use tracing::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How a negative elapsed time (samples out of order, clock skew) is treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ElapsedTimePolicy {
    /// Report the magnitude of the speed. Hides ordering bugs.
    #[default]
    Absolute,
    /// Reject samples whose timestamp precedes the previous one
    Strict,
}

/// Estimate the speed at which `current` was reached from `previous`
///
/// Without a previous sample the estimate is [`SpeedEstimate::Invalid`].
/// Identical timestamps are a [`SpeedError::ZeroElapsedTime`] and must end the run.
pub fn estimate_speed(
    current: &GeoSample,
    previous: Option<&GeoSample>,
    policy: ElapsedTimePolicy,
) -> SpeedResult<SpeedEstimate> {
    let previous = match previous {
        Some(previous) => previous,
        None => {
            debug!("nothing to compare");
            return Ok(SpeedEstimate::Invalid);
        }
    };

    let elapsed_s = current.timestamp_s - previous.timestamp_s;
    if elapsed_s == 0.0 {
        return Err(SpeedError::ZeroElapsedTime {
            timestamp_s: current.timestamp_s,
        });
    }
    if elapsed_s < 0.0 && policy == ElapsedTimePolicy::Strict {
        return Err(SpeedError::NegativeElapsedTime { elapsed_s });
    }

    let distance_km = distance_km(
        current.longitude_deg,
        current.latitude_deg,
        previous.longitude_deg,
        previous.latitude_deg,
    );
    let speed_kmps = (distance_km / elapsed_s).abs();

    debug!(distance_km, elapsed_s, speed_kmps, "compared samples");

    Ok(SpeedEstimate::Valid(Measurement {
        distance_km,
        elapsed_s,
        speed_kmps,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::{haversine_km, ORBIT_RADIUS_KM};

    fn reference_pair() -> (GeoSample, GeoSample) {
        // lon/lat order follows distance_km's arguments
        let previous = GeoSample::new(1_000.0, -20.2800441, 66.77867751);
        let current = GeoSample::new(1_060.0, -17.45516549, 69.11392852);
        (previous, current)
    }

    #[test]
    fn test_first_sample_is_invalid() {
        let (_, current) = reference_pair();
        for policy in [ElapsedTimePolicy::Absolute, ElapsedTimePolicy::Strict] {
            assert_eq!(estimate_speed(&current, None, policy), Ok(SpeedEstimate::Invalid));
        }
        let odd = GeoSample::new(f64::NAN, 0.0, 0.0);
        assert_eq!(
            estimate_speed(&odd, None, ElapsedTimePolicy::Absolute),
            Ok(SpeedEstimate::Invalid)
        );
    }

    #[test]
    fn test_reference_pair_speed() {
        let (previous, current) = reference_pair();
        let estimate = estimate_speed(&current, Some(&previous), ElapsedTimePolicy::Absolute).unwrap();
        let m = estimate.measurement().expect("valid estimate");

        let expected = haversine_km(66.77867751, -20.2800441, 69.11392852, -17.45516549, ORBIT_RADIUS_KM);
        assert!((m.distance_km - expected).abs() < 1e-9);
        assert_eq!(m.elapsed_s, 60.0);
        assert!((m.speed_kmps - expected / 60.0).abs() < 1e-12);
        assert!((m.speed_kmps - 7.08448).abs() < 1e-4);
    }

    #[test]
    fn test_zero_elapsed_time_is_fatal() {
        let a = GeoSample::new(500.0, 10.0, 20.0);
        let b = GeoSample::new(500.0, 11.0, 21.0);
        assert_eq!(
            estimate_speed(&b, Some(&a), ElapsedTimePolicy::Absolute),
            Err(SpeedError::ZeroElapsedTime { timestamp_s: 500.0 })
        );
    }

    #[test]
    fn test_negative_elapsed_time_policies() {
        let (previous, current) = reference_pair();

        // Swapped order: the absolute policy reports the same magnitude
        let forward = estimate_speed(&current, Some(&previous), ElapsedTimePolicy::Absolute).unwrap();
        let backward = estimate_speed(&previous, Some(&current), ElapsedTimePolicy::Absolute).unwrap();
        assert_eq!(backward.measurement().unwrap().elapsed_s, -60.0);
        assert!((forward.speed_kmps().unwrap() - backward.speed_kmps().unwrap()).abs() < 1e-12);

        assert_eq!(
            estimate_speed(&previous, Some(&current), ElapsedTimePolicy::Strict),
            Err(SpeedError::NegativeElapsedTime { elapsed_s: -60.0 })
        );
    }

    #[test]
    fn test_stationary_samples_have_zero_speed() {
        let a = GeoSample::new(0.0, 45.0, 7.0);
        let b = GeoSample::new(5.0, 45.0, 7.0);
        let estimate = estimate_speed(&b, Some(&a), ElapsedTimePolicy::Strict).unwrap();
        assert_eq!(estimate.speed_kmps(), Some(0.0));
    }
}
