//! Offline replay of a pulse plan through the radar's detector.

use super::plan::PulsePlan;
use radar_core::{AxleDetector, Reading, SpeedLimits};

/// Reading the radar firmware should report for `plan`.
///
/// `None` if the timeline never completes a detection, which is the case for
/// a plan with a single sensor 2 pulse.
pub fn expected_reading(plan: &PulsePlan, limits: &SpeedLimits) -> Option<Reading> {
    let mut detector = AxleDetector::new();
    let detection = plan
        .timeline()
        .into_iter()
        .filter_map(|edge| detector.on_edge(edge))
        .last()?;

    Some(limits.evaluate(&detection, plan.distance_mm))
}
