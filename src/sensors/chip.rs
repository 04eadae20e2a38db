//! Chip and feature types representing one hardware monitoring snapshot.

/// A single named reading exposed by a [`Chip`].
///
/// The name is the classification key (e.g. `temp1`, `fan2`); the label is
/// the human-readable sub-identifier (e.g. `Core 0`). Values are already
/// normalized to the unit implied by the feature kind.
#[derive(Debug, Clone)]
pub struct Feature {
    /// Feature name, used for metric classification.
    name: String,
    /// Human-readable label for this feature.
    label: String,
    /// Current reading.
    value: f64,
}

impl Feature {
    /// Creates a new feature reading.
    pub fn new(name: impl Into<String>, label: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            value,
        }
    }

    /// Returns the feature name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the human-readable label.
    #[inline]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the current reading.
    #[inline]
    pub fn value(&self) -> f64 {
        self.value
    }
}

/// A hardware monitoring chip detected by the sensor subsystem.
///
/// Chips exist only for the duration of one snapshot; each scrape
/// re-enumerates them from scratch.
#[derive(Debug, Clone)]
pub struct Chip {
    /// Human-readable chip name.
    name: String,
    /// Name of the adapter the chip is attached to.
    adaptor: String,
    /// Current feature readings.
    features: Vec<Feature>,
}

impl Chip {
    /// Creates a new chip with the given identity and features.
    pub fn new(
        name: impl Into<String>,
        adaptor: impl Into<String>,
        features: Vec<Feature>,
    ) -> Self {
        Self {
            name: name.into(),
            adaptor: adaptor.into(),
            features,
        }
    }

    /// Returns the chip name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the adapter name.
    #[inline]
    pub fn adaptor(&self) -> &str {
        &self.adaptor
    }

    /// Returns the chip's feature readings.
    #[inline]
    pub fn features(&self) -> &[Feature] {
        &self.features
    }
}
