//! Pulse plan for one vehicle pass.

use radar_core::{calculate_timing, Sensor, SensorEdge, TimingError, VehicleType};
use serde::Serialize;

/// Gap between consecutive axles on sensor 1.
pub const DEFAULT_AXLE_INTERVAL_MS: u64 = 100;

/// QOM path of the emulated GPIO controller.
const GPIO_PATH: &str = "/machine/gpio";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PlanStep {
    /// Header for the n-th axle (1-based)
    Axle { number: u8 },
    /// Drive a GPIO line high or low
    Set { gpio: u8, level: bool },
    Wait { ms: u64 },
    /// Header for the sensor 2 pulse
    Sensor2,
    /// Header for the second sensor 2 pulse that closes the measurement
    Sensor2Close,
}

impl PlanStep {
    /// Monitor command for `Set` steps.
    pub fn command(&self) -> Option<String> {
        match self {
            PlanStep::Set { gpio, level } => Some(format!(
                "qom-set {} gpio{} {}",
                GPIO_PATH,
                gpio,
                u8::from(*level)
            )),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PulsePlan {
    pub vehicle_type: VehicleType,
    pub axles: u8,
    pub speed_kmh: u32,
    pub distance_mm: u32,
    /// Time between the sensors at `speed_kmh`
    pub sensor_delay_s: f64,
    pub axle_interval_ms: u64,
    pub steps: Vec<PlanStep>,
}

impl PulsePlan {
    /// Build the pulse sequence for a vehicle crossing both sensors.
    ///
    /// Fails only when the sensor delay cannot be computed (zero speed).
    pub fn build(
        vehicle_type: VehicleType,
        speed_kmh: u32,
        distance_mm: u32,
        axle_interval_ms: u64,
    ) -> Result<Self, TimingError> {
        let sensor_delay_s = calculate_timing(speed_kmh as f64, distance_mm as f64)?;
        let axles = vehicle_type.axles();

        let mut steps = Vec::with_capacity(axles as usize * 4 + 4);
        for i in 0..axles {
            steps.push(PlanStep::Axle { number: i + 1 });
            steps.extend(pulse(Sensor::One));
            if i + 1 < axles {
                steps.push(PlanStep::Wait {
                    ms: axle_interval_ms,
                });
            }
        }

        steps.push(PlanStep::Wait {
            ms: whole_ms(sensor_delay_s * 1000.0),
        });
        steps.push(PlanStep::Sensor2);
        steps.extend(pulse(Sensor::Two));

        Ok(Self {
            vehicle_type,
            axles,
            speed_kmh,
            distance_mm,
            sensor_delay_s,
            axle_interval_ms,
            steps,
        })
    }

    /// Append a second sensor 2 pulse right after the first.
    ///
    /// The firmware arms the measurement on the first sensor 2 edge and only
    /// reports a detection on the second one; without it the pass stays open.
    pub fn with_closing_pulse(mut self) -> Self {
        self.steps.push(PlanStep::Sensor2Close);
        self.steps.extend(pulse(Sensor::Two));
        self
    }

    pub fn sensor_delay_ms(&self) -> f64 {
        self.sensor_delay_s * 1000.0
    }

    /// All monitor commands in order.
    pub fn commands(&self) -> Vec<String> {
        self.steps.iter().filter_map(PlanStep::command).collect()
    }

    /// Rising edges the firmware would see if the plan ran with exact waits.
    pub fn timeline(&self) -> Vec<SensorEdge> {
        let mut clock_ms = 0u64;
        let mut edges = Vec::new();

        for step in &self.steps {
            match step {
                PlanStep::Wait { ms } => clock_ms = clock_ms.saturating_add(*ms),
                PlanStep::Set { gpio, level: true } => {
                    let sensor = if *gpio == Sensor::One.gpio() {
                        Sensor::One
                    } else {
                        Sensor::Two
                    };
                    edges.push(SensorEdge {
                        sensor,
                        at_ms: clock_ms,
                    });
                }
                _ => {}
            }
        }

        edges
    }
}

/// Round to whole milliseconds, halves to even.
fn whole_ms(ms: f64) -> u64 {
    ms.round_ties_even() as u64
}

fn pulse(sensor: Sensor) -> [PlanStep; 2] {
    let gpio = sensor.gpio();
    [
        PlanStep::Set { gpio, level: true },
        PlanStep::Set { gpio, level: false },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_light_plan_at_fifty() {
        let plan = PulsePlan::build(VehicleType::Light, 50, 1000, DEFAULT_AXLE_INTERVAL_MS).unwrap();
        assert_eq!(plan.axles, 2);
        assert!((plan.sensor_delay_ms() - 72.0).abs() < 1e-9);

        let headers = plan
            .steps
            .iter()
            .filter(|s| matches!(s, PlanStep::Axle { .. }))
            .count();
        assert_eq!(headers, 2);
        assert_eq!(plan.commands().len(), 6);

        let waits: Vec<u64> = plan
            .steps
            .iter()
            .filter_map(|s| match s {
                PlanStep::Wait { ms } => Some(*ms),
                _ => None,
            })
            .collect();
        assert_eq!(waits, vec![100, 72]);
    }

    #[test]
    fn test_heavy_plan_command_order() {
        let plan = PulsePlan::build(VehicleType::Heavy, 70, 1000, DEFAULT_AXLE_INTERVAL_MS).unwrap();
        let commands = plan.commands();
        assert_eq!(commands.len(), 8);
        assert_eq!(commands[0], "qom-set /machine/gpio gpio5 1");
        assert_eq!(commands[1], "qom-set /machine/gpio gpio5 0");
        assert_eq!(commands[6], "qom-set /machine/gpio gpio6 1");
        assert_eq!(commands[7], "qom-set /machine/gpio gpio6 0");
    }

    #[test]
    fn test_zero_speed_fails() {
        let err = PulsePlan::build(VehicleType::Light, 0, 1000, DEFAULT_AXLE_INTERVAL_MS).unwrap_err();
        assert_eq!(err, TimingError::DivisionByZero);
    }

    #[test]
    fn test_timeline_edges() {
        let plan = PulsePlan::build(VehicleType::Heavy, 50, 1000, 150).unwrap();
        let edges = plan.timeline();
        let times: Vec<(Sensor, u64)> = edges.iter().map(|e| (e.sensor, e.at_ms)).collect();
        assert_eq!(
            times,
            vec![
                (Sensor::One, 0),
                (Sensor::One, 150),
                (Sensor::One, 300),
                (Sensor::Two, 372),
            ]
        );
    }

    #[test]
    fn test_closing_pulse_adds_second_sensor_two_edge() {
        let plan = PulsePlan::build(VehicleType::Light, 50, 1000, DEFAULT_AXLE_INTERVAL_MS)
            .unwrap()
            .with_closing_pulse();

        assert_eq!(plan.commands().len(), 8);
        assert_eq!(plan.steps[plan.steps.len() - 3], PlanStep::Sensor2Close);

        let edges = plan.timeline();
        let sensor_two: Vec<u64> = edges
            .iter()
            .filter(|e| e.sensor == Sensor::Two)
            .map(|e| e.at_ms)
            .collect();
        assert_eq!(sensor_two, vec![172, 172]);
    }

    #[test]
    fn test_huge_axle_interval_saturates_clock() {
        let plan = PulsePlan::build(VehicleType::Heavy, 50, 1000, u64::MAX).unwrap();
        let edges = plan.timeline();
        assert_eq!(edges.len(), 4);
        assert_eq!(edges[1].at_ms, u64::MAX);
        assert_eq!(edges[3].at_ms, u64::MAX);
    }

    #[test]
    fn test_wait_rounds_halves_to_even() {
        assert_eq!(whole_ms(2.5), 2);
        assert_eq!(whole_ms(3.5), 4);
        assert_eq!(whole_ms(72.4), 72);
        assert_eq!(whole_ms(51.43), 51);
    }

    #[test]
    fn test_steps_serialize_tagged() {
        let json = serde_json::to_value(PlanStep::Set { gpio: 5, level: true }).unwrap();
        assert_eq!(json["kind"], "set");
        assert_eq!(json["gpio"], 5);
    }
}
