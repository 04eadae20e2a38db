//! The scrape-time bridge from sensor snapshots to metric samples.

use super::family::{Family, FAMILIES};
use crate::sensors::SensorSource;
use prometheus::core::{Collector, Desc};
use prometheus::proto::MetricFamily;
use prometheus::{GaugeVec, Opts};
use std::collections::HashMap;
use thiserror::Error;

/// Errors that can occur while building the collector.
#[derive(Debug, Error)]
pub enum ExporterError {
    #[error("prometheus error: {0}")]
    Prometheus(#[from] prometheus::Error),
}

/// Prometheus collector emitting one gauge sample per classifiable sensor
/// feature.
///
/// Descriptors are fixed at construction; every `collect` call performs a
/// fresh snapshot of the underlying source, so consecutive scrapes observe
/// the hardware state independently.
pub struct SensorsCollector<S> {
    source: S,
    descs: Vec<Desc>,
}

impl<S: SensorSource> SensorsCollector<S> {
    /// Creates a collector over an already-opened sensor source.
    pub fn new(source: S) -> Result<Self, ExporterError> {
        let descs = FAMILIES
            .iter()
            .map(|family| {
                Desc::new(
                    family.name.to_string(),
                    family.help.to_string(),
                    label_names(family).iter().map(|s| s.to_string()).collect(),
                    HashMap::new(),
                )
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { source, descs })
    }
}

/// Label schema of a family: its type label, then chip and adapter identity.
fn label_names(family: &Family) -> [&'static str; 3] {
    [family.type_label, "chip", "adaptor"]
}

impl<S: SensorSource + 'static> Collector for SensorsCollector<S> {
    fn desc(&self) -> Vec<&Desc> {
        self.descs.iter().collect()
    }

    fn collect(&self) -> Vec<MetricFamily> {
        let chips = match self.source.snapshot() {
            Ok(chips) => chips,
            Err(e) => {
                // Partial snapshots are dropped whole rather than emitted.
                tracing::warn!(error = %e, "sensor snapshot failed, dropping scrape");
                return Vec::new();
            }
        };

        let mut gauges = Vec::with_capacity(FAMILIES.len());
        for family in &FAMILIES {
            let opts = Opts::new(family.name, family.help);
            match GaugeVec::new(opts, &label_names(family)) {
                Ok(vec) => gauges.push(vec),
                Err(e) => {
                    tracing::error!(family = family.name, error = %e, "failed to build gauge family");
                    return Vec::new();
                }
            }
        }

        for chip in &chips {
            for feature in chip.features() {
                let Some(index) = FAMILIES.iter().position(|f| f.matches(feature.name())) else {
                    continue;
                };
                if !feature.value().is_finite() {
                    tracing::warn!(
                        chip = chip.name(),
                        feature = feature.name(),
                        "non-finite reading, skipping"
                    );
                    continue;
                }
                gauges[index]
                    .with_label_values(&[feature.label(), chip.name(), chip.adaptor()])
                    .set(feature.value());
            }
        }

        gauges
            .iter()
            .flat_map(|vec| vec.collect())
            .filter(|family| !family.get_metric().is_empty())
            .collect()
    }
}
