//! Console and JSON output for a pulse plan.

use super::plan::{PlanStep, PulsePlan};
use chrono::{DateTime, Utc};
use radar_core::{validate_plate, MercosulCountry, Reading};
use serde::Serialize;
use std::fmt;

/// Plate the camera would capture, with the country it validates as.
#[derive(Debug, Clone, Serialize)]
pub struct PlateCheck {
    pub plate: String,
    pub country: MercosulCountry,
}

impl PlateCheck {
    pub fn new(plate: &str) -> Self {
        Self {
            plate: plate.to_string(),
            country: validate_plate(plate),
        }
    }
}

/// Human-readable report: vehicle summary, monitor commands, expected reading.
pub struct TextReport<'a> {
    pub plan: &'a PulsePlan,
    pub expected: Option<&'a Reading>,
    /// Value for QEMU's `-monitor` flag
    pub monitor_arg: &'a str,
    pub plate: Option<&'a PlateCheck>,
}

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let plan = self.plan;

        writeln!(
            f,
            "Simulating {} vehicle",
            plan.vehicle_type.to_string().to_uppercase()
        )?;
        writeln!(f, "   Axles: {}", plan.axles)?;
        writeln!(f, "   Speed: {} km/h", plan.speed_kmh)?;
        writeln!(f, "   Time between sensors: {:.1} ms", plan.sensor_delay_ms())?;
        writeln!(f)?;

        writeln!(f, "QEMU monitor: commands are printed, not sent.")?;
        writeln!(f, "(Start QEMU with -monitor {})", self.monitor_arg)?;
        writeln!(f)?;

        writeln!(f, "=== QEMU Commands ===")?;
        writeln!(f, "Run these commands in the QEMU monitor (Ctrl+A, C):")?;
        writeln!(f)?;

        for (i, step) in plan.steps.iter().enumerate() {
            match step {
                PlanStep::Axle { number } => writeln!(f, "# Axle {}", number)?,
                PlanStep::Set { .. } => {
                    if let Some(command) = step.command() {
                        writeln!(f, "{}", command)?;
                    }
                }
                PlanStep::Wait { ms } => {
                    // The wait before sensor 2 stands apart from the axle block
                    if matches!(plan.steps.get(i + 1), Some(PlanStep::Sensor2)) {
                        writeln!(f)?;
                    }
                    writeln!(f, "# Wait ~{}ms", ms)?;
                    writeln!(f)?;
                }
                PlanStep::Sensor2 => writeln!(f, "# Sensor 2")?,
                PlanStep::Sensor2Close => writeln!(f, "# Sensor 2 (closes the measurement)")?,
            }
        }

        writeln!(f)?;
        writeln!(f, "=====================")?;

        writeln!(f)?;
        writeln!(f, "Expected radar reading:")?;
        match self.expected {
            Some(reading) => {
                writeln!(f, "   Speed: {} km/h", reading.speed_kmh)?;
                writeln!(f, "   Type: {}", reading.vehicle_type)?;
                writeln!(f, "   Limit: {} km/h", reading.limit_kmh)?;
                writeln!(f, "   Status: {}", reading.status)?;
            }
            None => {
                writeln!(f, "   No detection: the firmware arms on the first sensor 2 edge")?;
                writeln!(f, "   and waits for a second one (see --closing-pulse).")?;
            }
        }

        if let Some(check) = self.plate {
            if check.country.is_valid() {
                writeln!(f, "   Plate: {} ({})", check.plate, check.country)?;
            } else {
                writeln!(f, "   Plate: {} (not a Mercosul plate)", check.plate)?;
            }
        }

        Ok(())
    }
}

/// Machine-readable report for `--format json`.
#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub generated_at: DateTime<Utc>,
    pub monitor: &'a str,
    pub plan: &'a PulsePlan,
    pub commands: Vec<String>,
    pub expected: Option<&'a Reading>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plate: Option<&'a PlateCheck>,
}

impl<'a> JsonReport<'a> {
    pub fn new(
        plan: &'a PulsePlan,
        expected: Option<&'a Reading>,
        monitor: &'a str,
        plate: Option<&'a PlateCheck>,
    ) -> Self {
        Self {
            generated_at: Utc::now(),
            monitor,
            plan,
            commands: plan.commands(),
            expected,
            plate,
        }
    }
}
