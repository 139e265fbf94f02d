//! Settings and telemetry state for an air-quality and weather display.
//!
//! - [`settings`]: the device settings block, its text encoding and storage
//! - [`telemetry`]: latest reading, rolling particulate history, driver scratch
//! - [`state`]: the two blocks shared between the sampling task and readers
//! - [`measurement`]: one sampling cycle against a [`sensors::Sensor`]

#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod constants;
pub mod measurement;
pub mod sensors;
pub mod settings;
pub mod state;
pub mod telemetry;

pub use measurement::Measurement;
pub use settings::DeviceSettings;
pub use state::DeviceState;
pub use telemetry::{Telemetry, TelemetrySample};
