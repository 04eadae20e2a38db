//! Hardware sensor input.
//!
//! This module provides the abstraction over the hardware monitoring
//! subsystem. A source is opened once at process start and then asked for
//! a fresh snapshot of all chips and readings on every scrape; nothing is
//! cached between snapshots.

mod chip;
mod hwmon;
mod source;

pub use chip::{Chip, Feature};
pub use hwmon::HwmonSensors;
pub use source::{MockSensors, SensorError, SensorSource};
