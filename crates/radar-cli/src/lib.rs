//! Radar CLI - Command line tools for the electronic speed radar.
//!
//! This crate provides:
//! - simulate_vehicle: prints the QEMU monitor commands that emulate a
//!   vehicle crossing both road sensors

pub mod config;
pub mod sim;

pub use config::SimulatorConfig;
