//! Lm Sensors Exporter
//!
//! Serves hardware monitoring readings in the Prometheus text format over
//! HTTP.

use clap::Parser;
use prometheus::Registry;
use sensor_exporter::{
    exporter::{ExporterConfig, ExporterServer, SensorsCollector},
    sensors::{HwmonSensors, SensorSource},
};
use tracing::info;

#[derive(Debug, Parser)]
#[command(
    name = "sensor-exporter",
    version,
    about = "Prometheus exporter for hardware sensors"
)]
struct Args {
    /// Address on which to expose metrics and web interface.
    #[arg(long = "web.listen-address", default_value = ":9255")]
    listen_address: String,

    /// Path under which to expose metrics.
    #[arg(long = "web.telemetry-path", default_value = "/metrics")]
    telemetry_path: String,
}

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();

    info!("Lm Sensors Exporter v{}", sensor_exporter::VERSION);

    let config = match ExporterConfig::from_flags(&args.listen_address, &args.telemetry_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid flags: {}", e);
            std::process::exit(1);
        }
    };

    let mut sensors = HwmonSensors::new();
    if let Err(e) = sensors.open() {
        eprintln!("Failed to initialize sensors: {}", e);
        std::process::exit(1);
    }

    let registry = Registry::new();
    let collector = match SensorsCollector::new(sensors) {
        Ok(collector) => collector,
        Err(e) => {
            eprintln!("Failed to build collector: {}", e);
            std::process::exit(1);
        }
    };
    if let Err(e) = registry.register(Box::new(collector)) {
        eprintln!("Failed to register collector: {}", e);
        std::process::exit(1);
    }

    let server = ExporterServer::new(config, registry);
    if let Err(e) = server.run().await {
        eprintln!("Server failed: {}", e);
        std::process::exit(1);
    }
}
