//! Simulator configuration from environment.

use radar_core::SpeedLimits;
use std::env;

#[derive(Debug, Clone)]
pub struct SimulatorConfig {
    pub monitor_host: String,
    pub monitor_port: u16,
    pub limits: SpeedLimits,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            monitor_host: "localhost".to_string(),
            monitor_port: 55555,
            limits: SpeedLimits::default(),
        }
    }
}

impl SimulatorConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let parsed = |key: &str, fallback: u32| -> u32 {
            lookup(key).and_then(|s| s.parse().ok()).unwrap_or(fallback)
        };

        Self {
            monitor_host: lookup("RADAR_MONITOR_HOST").unwrap_or(defaults.monitor_host),
            monitor_port: lookup("RADAR_MONITOR_PORT")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.monitor_port),
            limits: SpeedLimits {
                light_kmh: parsed("RADAR_SPEED_LIMIT_LIGHT_KMH", defaults.limits.light_kmh),
                heavy_kmh: parsed("RADAR_SPEED_LIMIT_HEAVY_KMH", defaults.limits.heavy_kmh),
                warning_threshold_percent: parsed(
                    "RADAR_WARNING_THRESHOLD_PERCENT",
                    defaults.limits.warning_threshold_percent,
                ),
            },
        }
    }

    /// QEMU `-monitor` argument matching this config.
    pub fn monitor_arg(&self) -> String {
        format!(
            "tcp:{}:{},server,nowait",
            self.monitor_host, self.monitor_port
        )
    }
}
