//! Distance/speed/time conversions between the two road sensors.

use thiserror::Error;

/// km/h per m/s.
const KMH_PER_MPS: f64 = 3.6;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum TimingError {
    #[error("division by zero: speed must be greater than 0 km/h")]
    DivisionByZero,
    #[error("invalid input: speed {speed_kmh} km/h, distance {distance_mm} mm")]
    InvalidInput { speed_kmh: f64, distance_mm: f64 },
}

/// Time in seconds a vehicle at `speed_kmh` needs to cover `distance_mm`.
///
/// `(distance_mm / 1000) / (speed_kmh / 3.6)`
pub fn calculate_timing(speed_kmh: f64, distance_mm: f64) -> Result<f64, TimingError> {
    if speed_kmh == 0.0 {
        return Err(TimingError::DivisionByZero);
    }
    if !speed_kmh.is_finite() || !distance_mm.is_finite() || speed_kmh < 0.0 || distance_mm < 0.0
    {
        return Err(TimingError::InvalidInput {
            speed_kmh,
            distance_mm,
        });
    }

    let speed_mps = speed_kmh / KMH_PER_MPS;
    let distance_m = distance_mm / 1000.0;
    Ok(distance_m / speed_mps)
}

/// Speed in km/h measured over `distance_mm` in `time_delta_ms`, truncated.
///
/// A zero time delta yields 0 rather than dividing by zero.
pub fn calculate_speed_kmh(time_delta_ms: u32, distance_mm: u32) -> u32 {
    if time_delta_ms == 0 {
        return 0;
    }

    // km/h = (mm * 3600) / (ms * 1000)
    let speed = (distance_mm as u64 * 3600) / (time_delta_ms as u64 * 1000);
    speed.min(u32::MAX as u64) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_timing_reference_values() {
        let t50 = calculate_timing(50.0, 1000.0).unwrap();
        assert!((t50 - 0.072).abs() < EPS);

        let t70 = calculate_timing(70.0, 1000.0).unwrap();
        assert!((t70 - 0.0514).abs() < 1e-4);
    }

    #[test]
    fn test_timing_scales_with_distance() {
        let short = calculate_timing(36.0, 500.0).unwrap();
        let long = calculate_timing(36.0, 2000.0).unwrap();
        assert!((short - 0.05).abs() < EPS);
        assert!((long - 0.2).abs() < EPS);
    }

    #[test]
    fn test_timing_zero_speed_is_division_by_zero() {
        assert_eq!(
            calculate_timing(0.0, 1000.0),
            Err(TimingError::DivisionByZero)
        );
    }

    #[test]
    fn test_timing_rejects_negative_and_nan() {
        assert!(matches!(
            calculate_timing(-10.0, 1000.0),
            Err(TimingError::InvalidInput { .. })
        ));
        assert!(matches!(
            calculate_timing(f64::NAN, 1000.0),
            Err(TimingError::InvalidInput { .. })
        ));
    }

    proptest! {
        #[test]
        fn prop_one_meter_takes_reciprocal_of_speed(speed in 0.001f64..1e6) {
            let t = calculate_timing(speed, 1000.0).unwrap();
            let expected = 3.6 / speed;
            prop_assert!((t - expected).abs() <= expected * 1e-12, "speed {}: {} vs {}", speed, t, expected);
        }

        #[test]
        fn prop_time_times_speed_recovers_distance(
            speed in 0.001f64..1e6,
            distance in 1.0f64..1e7,
        ) {
            let t = calculate_timing(speed, distance).unwrap();
            let distance_m = t * speed / 3.6;
            let expected = distance / 1000.0;
            prop_assert!((distance_m - expected).abs() <= expected * 1e-12);
        }

        #[test]
        fn prop_whole_number_speeds_match_formula(speed in 1u32..=1000, distance in 1u32..=100_000) {
            let t = calculate_timing(speed as f64, distance as f64).unwrap();
            let expected = (distance as f64 / 1000.0) / (speed as f64 / 3.6);
            prop_assert_eq!(t, expected);
        }
    }

    #[test]
    fn test_calculate_speed_basic() {
        assert_eq!(calculate_speed_kmh(1000, 1000), 3);
        assert_eq!(calculate_speed_kmh(100, 1000), 36);
        assert_eq!(calculate_speed_kmh(60, 1000), 60);
    }

    #[test]
    fn test_calculate_speed_edge_cases() {
        assert_eq!(calculate_speed_kmh(0, 1000), 0);
        // Large distance over a tiny window must not overflow
        assert!(calculate_speed_kmh(10, 10_000) > 0);
        assert_eq!(calculate_speed_kmh(1, u32::MAX), u32::MAX);
    }
}
