//! Lm Sensors Exporter Library
//!
//! Republishes hardware monitoring readings (fan speed, voltage, power,
//! temperature) as Prometheus gauges for pull-based scraping.
//!
//! # Architecture
//!
//! The system follows an explicit scrape-time data flow:
//!
//! ```text
//! HTTP scrape → collector → sensor snapshot → classification → samples
//! ```
//!
//! # Design Principles
//!
//! - **Stateless scrapes**: every scrape re-enumerates chips and readings;
//!   nothing is cached between requests
//! - **Fixed schema**: the four metric families are advertised even when
//!   no hardware is detected
//! - **Isolated failures**: an unreadable feature is skipped, a failed
//!   snapshot drops that scrape; neither takes the process down
//!
//! # Example
//!
//! ```no_run
//! use sensor_exporter::{
//!     exporter::SensorsCollector,
//!     sensors::{HwmonSensors, SensorSource},
//! };
//! use prometheus::Registry;
//!
//! // Initialize the sensor source once at startup
//! let mut sensors = HwmonSensors::new();
//! sensors.open().unwrap();
//!
//! // Register the collector; each gather performs one fresh snapshot
//! let registry = Registry::new();
//! registry
//!     .register(Box::new(SensorsCollector::new(sensors).unwrap()))
//!     .unwrap();
//!
//! let families = registry.gather();
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod exporter;
pub mod sensors;

// Re-export commonly used types at crate root
pub use exporter::{ExporterConfig, ExporterServer, SensorsCollector};
pub use sensors::{Chip, Feature, HwmonSensors, MockSensors, SensorError, SensorSource};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
