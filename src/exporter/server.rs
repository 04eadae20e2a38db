//! HTTP server exposing the metrics endpoint and landing page.

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::get,
    Router,
};
use prometheus::{Encoder, Registry, TextEncoder};
use std::net::SocketAddr;
use std::sync::Arc;
use thiserror::Error;

/// Errors that can occur during exporter server operations.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to bind to address: {0}")]
    Bind(#[from] std::io::Error),

    #[error("server error: {0}")]
    Server(String),
}

/// Configuration validation errors.
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("invalid listen address: {0}")]
    InvalidListenAddress(String),
    #[error("invalid telemetry path: {0}")]
    InvalidTelemetryPath(String),
}

/// Configuration for the exporter server.
#[derive(Debug, Clone)]
pub struct ExporterConfig {
    /// Address to bind the server to.
    pub listen_address: SocketAddr,
    /// URL path under which metrics are exposed.
    pub telemetry_path: String,
}

impl Default for ExporterConfig {
    fn default() -> Self {
        Self {
            listen_address: ([0, 0, 0, 0], 9255).into(),
            telemetry_path: "/metrics".to_string(),
        }
    }
}

impl ExporterConfig {
    /// Builds a configuration from the raw command-line flag values.
    pub fn from_flags(listen_address: &str, telemetry_path: &str) -> Result<Self, ConfigError> {
        let config = Self {
            listen_address: parse_listen_address(listen_address)?,
            telemetry_path: telemetry_path.to_string(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.telemetry_path.starts_with('/') || self.telemetry_path.len() < 2 {
            return Err(ConfigError::InvalidTelemetryPath(
                self.telemetry_path.clone(),
            ));
        }
        Ok(())
    }
}

/// Parses a listen address, accepting the bare `:port` form as shorthand
/// for binding every interface.
pub fn parse_listen_address(raw: &str) -> Result<SocketAddr, ConfigError> {
    let normalized = if raw.starts_with(':') {
        format!("0.0.0.0{raw}")
    } else {
        raw.to_string()
    };
    normalized
        .parse()
        .map_err(|_| ConfigError::InvalidListenAddress(raw.to_string()))
}

/// Shared state for the exporter server.
struct AppState {
    registry: Registry,
    telemetry_path: String,
}

/// HTTP server exposing a metrics registry for scraping.
pub struct ExporterServer {
    config: ExporterConfig,
    registry: Registry,
}

impl ExporterServer {
    /// Creates a new exporter server around a populated registry.
    pub fn new(config: ExporterConfig, registry: Registry) -> Self {
        Self { config, registry }
    }

    /// Starts the HTTP server.
    ///
    /// Runs until shutdown is requested via ctrl-c.
    pub async fn run(self) -> Result<(), ServerError> {
        let state = Arc::new(AppState {
            registry: self.registry,
            telemetry_path: self.config.telemetry_path.clone(),
        });
        let app = Router::new()
            .route(&self.config.telemetry_path, get(metrics_handler))
            .route("/", get(landing_handler))
            .with_state(state);

        let listener = tokio::net::TcpListener::bind(self.config.listen_address).await?;

        tracing::info!(
            addr = %self.config.listen_address,
            path = %self.config.telemetry_path,
            "Exporter listening"
        );

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| ServerError::Server(e.to_string()))?;

        Ok(())
    }
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        tracing::info!("Shutdown requested");
    }
}

/// Handler for the metrics endpoint.
async fn metrics_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let encoder = TextEncoder::new();
    let families = state.registry.gather();
    let mut buffer = Vec::new();

    match encoder.encode(&families, &mut buffer) {
        Ok(()) => (
            StatusCode::OK,
            [("content-type", "text/plain; version=0.0.4; charset=utf-8")],
            String::from_utf8_lossy(&buffer).into_owned(),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            [("content-type", "text/plain; charset=utf-8")],
            format!("Failed to encode metrics: {}", e),
        ),
    }
}

/// Handler for the landing page.
async fn landing_handler(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(landing_page(&state.telemetry_path))
}

fn landing_page(telemetry_path: &str) -> String {
    format!(
        "<html>\n\
         <head><title>Lm Sensors Exporter</title></head>\n\
         <body>\n\
         <h1>Lm Sensors Exporter</h1>\n\
         <p><a href=\"{telemetry_path}\">Metrics</a></p>\n\
         </body>\n\
         </html>\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exporter::SensorsCollector;
    use crate::sensors::{Chip, Feature, MockSensors};

    #[test]
    fn test_config_default() {
        let config = ExporterConfig::default();
        assert_eq!(config.listen_address.port(), 9255);
        assert_eq!(config.telemetry_path, "/metrics");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_bare_port_listen_address() {
        let addr = parse_listen_address(":9255").unwrap();
        assert_eq!(addr, "0.0.0.0:9255".parse().unwrap());
    }

    #[test]
    fn test_parse_full_listen_address() {
        let addr = parse_listen_address("127.0.0.1:8080").unwrap();
        assert_eq!(addr.port(), 8080);
    }

    #[test]
    fn test_parse_invalid_listen_address() {
        assert!(matches!(
            parse_listen_address("not-an-address"),
            Err(ConfigError::InvalidListenAddress(_))
        ));
    }

    #[test]
    fn test_telemetry_path_must_be_rooted() {
        assert!(matches!(
            ExporterConfig::from_flags(":9255", "metrics"),
            Err(ConfigError::InvalidTelemetryPath(_))
        ));
        assert!(matches!(
            ExporterConfig::from_flags(":9255", "/"),
            Err(ConfigError::InvalidTelemetryPath(_))
        ));
        assert!(ExporterConfig::from_flags(":9255", "/metrics").is_ok());
    }

    #[test]
    fn test_landing_page_links_telemetry_path() {
        let page = landing_page("/probe");
        assert!(page.contains("<a href=\"/probe\">Metrics</a>"));
        assert!(page.contains("Lm Sensors Exporter"));
    }

    #[tokio::test]
    async fn test_metrics_handler_serves_samples() {
        let collector = SensorsCollector::new(MockSensors::with_chips(vec![Chip::new(
            "chip0",
            "ISA adapter",
            vec![Feature::new("temp1", "CPU", 45.0)],
        )]))
        .unwrap();
        let registry = Registry::new();
        registry.register(Box::new(collector)).unwrap();

        let state = Arc::new(AppState {
            registry,
            telemetry_path: "/metrics".to_string(),
        });
        let response = metrics_handler(State(state)).await.into_response();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = String::from_utf8(body.to_vec()).unwrap();
        assert!(body.contains("sensor_lm_temperature_celsius"));
        assert!(body.contains("temptype=\"CPU\""));
    }
}
