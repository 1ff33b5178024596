//! Axle-counting detector for the two magnetic road sensors.
//!
//! Sensor 1 counts axles as the vehicle rolls over it. The first edge on
//! sensor 2 arms the measurement and freezes the count; the second edge on
//! sensor 2 closes it. The time between the last axle on sensor 1 and that
//! closing edge is what the speed is computed from.

use crate::models::Detection;
use crate::rules::classify_vehicle;

/// Max gap between axles of the same vehicle (ms).
pub const AXLE_TIMEOUT_MS: u64 = 2000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sensor {
    /// Counts axles (gpio5)
    One,
    /// Marks the end of the pass (gpio6)
    Two,
}

impl Sensor {
    pub fn gpio(self) -> u8 {
        match self {
            Sensor::One => 5,
            Sensor::Two => 6,
        }
    }
}

/// Rising edge on a sensor at a monotonic timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SensorEdge {
    pub sensor: Sensor,
    pub at_ms: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SensorState {
    #[default]
    Idle,
    CountingAxles,
    /// Sensor 2 armed, waiting for its closing edge
    MeasuringSpeed,
}

#[derive(Debug, Default)]
pub struct AxleDetector {
    state: SensorState,
    axle_count: u8,
    last_axle_ms: u64,
}

impl AxleDetector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SensorState {
        self.state
    }

    pub fn axle_count(&self) -> u8 {
        self.axle_count
    }

    /// Feed one edge. Returns a detection once sensor 2 closes a pass.
    pub fn on_edge(&mut self, edge: SensorEdge) -> Option<Detection> {
        match (edge.sensor, self.state) {
            (Sensor::One, SensorState::Idle) => {
                tracing::debug!(at_ms = edge.at_ms, "sensor 1: first axle");
                self.state = SensorState::CountingAxles;
                self.axle_count = 1;
                self.last_axle_ms = edge.at_ms;
                None
            }
            (Sensor::One, SensorState::CountingAxles) => {
                if edge.at_ms.saturating_sub(self.last_axle_ms) > AXLE_TIMEOUT_MS {
                    tracing::warn!("sensor 1: axle timeout, restarting count");
                    self.axle_count = 1;
                } else {
                    self.axle_count = self.axle_count.saturating_add(1);
                    tracing::debug!(axle = self.axle_count, "sensor 1: axle");
                }
                self.last_axle_ms = edge.at_ms;
                None
            }
            (Sensor::One, SensorState::MeasuringSpeed) => {
                tracing::debug!("sensor 1: ignoring axle while waiting for sensor 2");
                None
            }
            (Sensor::Two, SensorState::Idle) => {
                tracing::warn!("sensor 2 fired without sensor 1, ignoring");
                None
            }
            (Sensor::Two, SensorState::CountingAxles) => {
                tracing::debug!(at_ms = edge.at_ms, "sensor 2: vehicle arrived, measuring");
                self.state = SensorState::MeasuringSpeed;
                None
            }
            (Sensor::Two, SensorState::MeasuringSpeed) => {
                let delta = edge.at_ms.saturating_sub(self.last_axle_ms);
                let detection = Detection {
                    axle_count: self.axle_count,
                    time_delta_ms: delta.min(u32::MAX as u64) as u32,
                    vehicle_type: classify_vehicle(self.axle_count),
                };
                tracing::info!(
                    axles = detection.axle_count,
                    time_delta_ms = detection.time_delta_ms,
                    "detection complete"
                );
                self.reset();
                Some(detection)
            }
        }
    }

    /// Drop a stale axle count once no axle has been seen for the timeout.
    ///
    /// Only a count in progress expires; an armed measurement waits for
    /// sensor 2.
    pub fn expire(&mut self, now_ms: u64) {
        if self.state == SensorState::CountingAxles
            && now_ms.saturating_sub(self.last_axle_ms) > AXLE_TIMEOUT_MS
        {
            tracing::warn!("axle count timed out, resetting");
            self.reset();
        }
    }

    fn reset(&mut self) {
        self.state = SensorState::Idle;
        self.axle_count = 0;
    }
}
