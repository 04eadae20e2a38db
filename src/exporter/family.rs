//! Static metric family descriptors and feature classification.
//!
//! The four families are a fixed table so that adding one is a data
//! change, not a code change. Classification is a case-insensitive
//! first-match over the feature name; the prefixes in use do not overlap
//! for real sensor names.

/// One metric family: a fixed descriptor plus the feature-name prefix
/// that selects it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Family {
    /// Feature name prefix that classifies into this family.
    pub prefix: &'static str,
    /// Fully qualified metric name.
    pub name: &'static str,
    /// Help text advertised with the descriptor.
    pub help: &'static str,
    /// Name of the family-specific label holding the feature label.
    pub type_label: &'static str,
}

impl Family {
    /// Checks whether a feature name classifies into this family.
    pub fn matches(&self, feature_name: &str) -> bool {
        let prefix = self.prefix.as_bytes();
        let name = feature_name.as_bytes();
        name.len() >= prefix.len() && name[..prefix.len()].eq_ignore_ascii_case(prefix)
    }
}

/// The fixed metric families, in classification order.
pub const FAMILIES: [Family; 4] = [
    Family {
        prefix: "fan",
        name: "sensor_lm_fan_speed_rpm",
        help: "fan speed (rotations per minute).",
        type_label: "fantype",
    },
    Family {
        prefix: "temp",
        name: "sensor_lm_temperature_celsius",
        help: "temperature in celsius",
        type_label: "temptype",
    },
    Family {
        prefix: "in",
        name: "sensor_lm_voltage_volts",
        help: "voltage in volts",
        type_label: "intype",
    },
    Family {
        prefix: "power",
        name: "sensor_lm_power_watts",
        help: "power in watts",
        type_label: "powertype",
    },
];

/// Classifies a feature name into its metric family, if any.
///
/// Features matching no family are intentionally dropped by callers; this
/// is not an error.
pub fn classify(feature_name: &str) -> Option<&'static Family> {
    FAMILIES.iter().find(|family| family.matches(feature_name))
}
