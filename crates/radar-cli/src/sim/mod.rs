//! Vehicle pass simulation: pulse plans, console rendering and replay.

pub mod plan;
pub mod render;
pub mod replay;

pub use plan::{PlanStep, PulsePlan, DEFAULT_AXLE_INTERVAL_MS};
pub use render::{JsonReport, PlateCheck, TextReport};
pub use replay::expected_reading;
