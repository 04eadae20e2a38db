//! Prometheus exposition for sensor readings.
//!
//! Every scrape triggers one fresh snapshot of the sensor source; there is
//! no caching or background polling. Features are classified by name
//! prefix into four gauge families:
//!
//! - `sensor_lm_fan_speed_rpm` (`fan*`, label `fantype`)
//! - `sensor_lm_temperature_celsius` (`temp*`, label `temptype`)
//! - `sensor_lm_voltage_volts` (`in*`, label `intype`)
//! - `sensor_lm_power_watts` (`power*`, label `powertype`)
//!
//! Every sample additionally carries `chip` and `adaptor` labels naming
//! the device the reading came from. Features matching no family are
//! omitted from the output.

mod collector;
mod family;
mod server;

pub use collector::{ExporterError, SensorsCollector};
pub use family::{classify, Family, FAMILIES};
pub use server::{
    parse_listen_address, ConfigError, ExporterConfig, ExporterServer, ServerError,
};
