//! Core data models for the radar.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Vehicle class, decided by axle count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleType {
    /// Two axles
    #[default]
    Light,
    /// Three or more axles
    Heavy,
}

impl VehicleType {
    /// Number of axles the simulator pulses for this class.
    pub fn axles(self) -> u8 {
        match self {
            VehicleType::Light => 2,
            VehicleType::Heavy => 3,
        }
    }
}

impl fmt::Display for VehicleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VehicleType::Light => write!(f, "light"),
            VehicleType::Heavy => write!(f, "heavy"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpeedStatus {
    Normal,
    /// At or above the warning threshold, below the limit
    Warning,
    /// At or above the limit
    Violation,
}

impl fmt::Display for SpeedStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpeedStatus::Normal => write!(f, "NORMAL"),
            SpeedStatus::Warning => write!(f, "WARNING"),
            SpeedStatus::Violation => write!(f, "VIOLATION"),
        }
    }
}

/// Speed limits applied by the radar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeedLimits {
    /// Limit for light vehicles in km/h
    pub light_kmh: u32,
    /// Limit for heavy vehicles in km/h
    pub heavy_kmh: u32,
    /// Percentage of the limit where warnings start (e.g. 90)
    pub warning_threshold_percent: u32,
}

impl Default for SpeedLimits {
    fn default() -> Self {
        Self {
            light_kmh: 60,
            heavy_kmh: 40,
            warning_threshold_percent: 90,
        }
    }
}

/// A completed pass over both sensors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Detection {
    pub axle_count: u8,
    /// Milliseconds between the last axle on sensor 1 and sensor 2
    pub time_delta_ms: u32,
    pub vehicle_type: VehicleType,
}

/// What the radar reports for a detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reading {
    pub speed_kmh: u32,
    pub vehicle_type: VehicleType,
    pub limit_kmh: u32,
    pub status: SpeedStatus,
}
