//! Vehicle pass simulator for the electronic speed radar.
//!
//! Prints the QEMU monitor commands that pulse both road sensors as a
//! vehicle of the given type crosses them at the given speed. Nothing is
//! sent to the monitor; paste the commands yourself.
//!
//! Usage:
//!   cargo run -p radar-cli --bin simulate_vehicle -- --type light --speed 50
//!   cargo run -p radar-cli --bin simulate_vehicle -- --type heavy --speed 70

use anyhow::Result;
use clap::{Parser, ValueEnum};
use radar_cli::sim::{expected_reading, JsonReport, PlateCheck, PulsePlan, TextReport};
use radar_cli::SimulatorConfig;
use radar_core::VehicleType;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum VehicleArg {
    /// Light vehicle, 2 axles
    Light,
    /// Heavy vehicle, 3 axles
    Heavy,
}

impl From<VehicleArg> for VehicleType {
    fn from(arg: VehicleArg) -> Self {
        match arg {
            VehicleArg::Light => VehicleType::Light,
            VehicleArg::Heavy => VehicleType::Heavy,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Simulate a vehicle crossing the electronic speed radar
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Vehicle type
    #[arg(long = "type", value_enum, default_value = "light")]
    vehicle_type: VehicleArg,

    /// Vehicle speed in km/h
    #[arg(long, default_value_t = 50)]
    speed: u32,

    /// Distance between sensors in mm
    #[arg(long, default_value_t = 1000)]
    distance: u32,

    /// Gap between axles in ms
    #[arg(long, default_value_t = radar_cli::sim::DEFAULT_AXLE_INTERVAL_MS)]
    axle_interval: u64,

    /// Add a second sensor 2 pulse so the firmware completes the measurement
    #[arg(long)]
    closing_pulse: bool,

    /// Plate to validate against the Mercosul formats
    #[arg(long)]
    plate: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Speed limit for light vehicles in km/h (overrides RADAR_SPEED_LIMIT_LIGHT_KMH)
    #[arg(long)]
    light_limit: Option<u32>,

    /// Speed limit for heavy vehicles in km/h (overrides RADAR_SPEED_LIMIT_HEAVY_KMH)
    #[arg(long)]
    heavy_limit: Option<u32>,

    /// Warning threshold as a percentage of the limit (overrides RADAR_WARNING_THRESHOLD_PERCENT)
    #[arg(long)]
    warning_threshold: Option<u32>,
}

fn main() -> Result<()> {
    // Logs go to stderr so stdout stays pasteable
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("simulate_vehicle=info".parse()?)
                .add_directive("radar_core=warn".parse()?),
        )
        .init();

    let args = Args::parse();

    let mut config = SimulatorConfig::from_env();
    if let Some(limit) = args.light_limit {
        config.limits.light_kmh = limit;
    }
    if let Some(limit) = args.heavy_limit {
        config.limits.heavy_kmh = limit;
    }
    if let Some(percent) = args.warning_threshold {
        config.limits.warning_threshold_percent = percent;
    }
    tracing::debug!(?config, "loaded simulator config");

    let text = matches!(args.format, OutputFormat::Text);
    if text {
        println!();
        println!("{}", "=".repeat(50));
        println!("  ELECTRONIC SPEED RADAR SIMULATOR");
        println!("{}", "=".repeat(50));
        println!();
    }

    // A failed simulation is reported but does not change the exit code
    if let Err(e) = simulate(&args, &config) {
        tracing::error!(speed_kmh = args.speed, "simulation failed: {}", e);
        println!("Error: {}", e);
    }

    if text {
        println!();
        println!("Tip: to automate this, start QEMU with:");
        println!("   west build -t run -- -monitor {}", config.monitor_arg());
        println!();
        println!("This tool could then send the commands automatically.");
    }

    Ok(())
}

fn simulate(args: &Args, config: &SimulatorConfig) -> Result<()> {
    let vehicle_type = VehicleType::from(args.vehicle_type);
    let mut plan = PulsePlan::build(vehicle_type, args.speed, args.distance, args.axle_interval)?;
    if args.closing_pulse {
        plan = plan.with_closing_pulse();
    }
    tracing::info!(
        vehicle = %vehicle_type,
        speed_kmh = plan.speed_kmh,
        sensor_delay_ms = plan.sensor_delay_ms(),
        "built pulse plan"
    );

    let expected = expected_reading(&plan, &config.limits);
    if expected.is_none() {
        tracing::info!("pulse plan leaves the measurement open");
    }

    let plate = args.plate.as_deref().map(PlateCheck::new);
    if let Some(check) = &plate {
        if !check.country.is_valid() {
            tracing::warn!(plate = %check.plate, "plate does not match any Mercosul format");
        }
    }

    let monitor_arg = config.monitor_arg();
    match args.format {
        OutputFormat::Text => {
            let report = TextReport {
                plan: &plan,
                expected: expected.as_ref(),
                monitor_arg: &monitor_arg,
                plate: plate.as_ref(),
            };
            print!("{}", report);
        }
        OutputFormat::Json => {
            let report = JsonReport::new(&plan, expected.as_ref(), &monitor_arg, plate.as_ref());
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}
