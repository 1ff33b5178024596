//! Classification and enforcement rules.

use crate::models::{Detection, Reading, SpeedLimits, SpeedStatus, VehicleType};
use crate::timing::calculate_speed_kmh;

/// Two axles or fewer is a light vehicle, anything more is heavy.
pub fn classify_vehicle(axle_count: u8) -> VehicleType {
    if axle_count <= 2 {
        VehicleType::Light
    } else {
        VehicleType::Heavy
    }
}

/// Compare a measured speed against its limit.
///
/// The warning band starts at `limit * warning_threshold_percent / 100`
/// (integer division) and ends just below the limit.
pub fn determine_speed_status(
    speed_kmh: u32,
    speed_limit: u32,
    warning_threshold_percent: u32,
) -> SpeedStatus {
    if speed_kmh >= speed_limit {
        return SpeedStatus::Violation;
    }

    let warning_threshold =
        (speed_limit as u64 * warning_threshold_percent as u64 / 100) as u32;
    if speed_kmh >= warning_threshold {
        return SpeedStatus::Warning;
    }

    SpeedStatus::Normal
}

impl SpeedLimits {
    pub fn limit_for(&self, vehicle_type: VehicleType) -> u32 {
        match vehicle_type {
            VehicleType::Light => self.light_kmh,
            VehicleType::Heavy => self.heavy_kmh,
        }
    }

    /// Turn a raw detection into the reading the radar would show.
    pub fn evaluate(&self, detection: &Detection, distance_mm: u32) -> Reading {
        let speed_kmh = calculate_speed_kmh(detection.time_delta_ms, distance_mm);
        let limit_kmh = self.limit_for(detection.vehicle_type);
        let status =
            determine_speed_status(speed_kmh, limit_kmh, self.warning_threshold_percent);

        Reading {
            speed_kmh,
            vehicle_type: detection.vehicle_type,
            limit_kmh,
            status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_vehicle() {
        assert_eq!(classify_vehicle(1), VehicleType::Light);
        assert_eq!(classify_vehicle(2), VehicleType::Light);
        assert_eq!(classify_vehicle(3), VehicleType::Heavy);
        assert_eq!(classify_vehicle(4), VehicleType::Heavy);
        assert_eq!(classify_vehicle(10), VehicleType::Heavy);
    }

    #[test]
    fn test_determine_speed_status() {
        // 90% of 60 = 54 km/h
        assert_eq!(determine_speed_status(50, 60, 90), SpeedStatus::Normal);
        assert_eq!(determine_speed_status(54, 60, 90), SpeedStatus::Warning);
        assert_eq!(determine_speed_status(55, 60, 90), SpeedStatus::Warning);
        assert_eq!(determine_speed_status(60, 60, 90), SpeedStatus::Violation);
        assert_eq!(determine_speed_status(80, 60, 90), SpeedStatus::Violation);
    }

    #[test]
    fn test_limit_for_vehicle_type() {
        let limits = SpeedLimits::default();
        assert_eq!(limits.limit_for(VehicleType::Light), 60);
        assert_eq!(limits.limit_for(VehicleType::Heavy), 40);
    }

    #[test]
    fn test_evaluate_heavy_at_fifty_is_violation() {
        let limits = SpeedLimits::default();
        let detection = Detection {
            axle_count: 3,
            time_delta_ms: 72,
            vehicle_type: VehicleType::Heavy,
        };

        let reading = limits.evaluate(&detection, 1000);
        assert_eq!(reading.speed_kmh, 50);
        assert_eq!(reading.limit_kmh, 40);
        assert_eq!(reading.status, SpeedStatus::Violation);
    }

    #[test]
    fn test_evaluate_light_at_fifty_is_normal() {
        let limits = SpeedLimits::default();
        let detection = Detection {
            axle_count: 2,
            time_delta_ms: 72,
            vehicle_type: VehicleType::Light,
        };

        let reading = limits.evaluate(&detection, 1000);
        assert_eq!(reading.status, SpeedStatus::Normal);
    }
}
