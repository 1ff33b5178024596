pub mod models;
pub mod plate;
pub mod rules;
pub mod sensor;
pub mod timing;

pub use models::{Detection, Reading, SpeedLimits, SpeedStatus, VehicleType};
pub use plate::{validate_plate, MercosulCountry};
pub use rules::{classify_vehicle, determine_speed_status};
pub use sensor::{AxleDetector, Sensor, SensorEdge, SensorState, AXLE_TIMEOUT_MS};
pub use timing::{calculate_speed_kmh, calculate_timing, TimingError};
