//! Sensor source backed by the Linux hwmon sysfs tree.
//!
//! Each `/sys/class/hwmon/hwmonN` directory is one chip: its `name` file
//! holds the chip name, and every `<feature>_input` file holds one raw
//! reading. Raw values use kernel units (millidegrees, millivolts,
//! microwatts) and are normalized here so downstream consumers only see
//! celsius, volts, watts and rpm.

use super::{Chip, Feature, SensorError, SensorSource};
use std::fs;
use std::path::{Path, PathBuf};

/// Default location of the hwmon class tree.
const HWMON_ROOT: &str = "/sys/class/hwmon";

/// Divisors converting raw sysfs readings into standard units, keyed by
/// feature name prefix. First match wins; anything else is taken raw.
const UNIT_SCALES: [(&str, f64); 6] = [
    ("temp", 1000.0),
    ("in", 1000.0),
    ("curr", 1000.0),
    ("humidity", 1000.0),
    ("power", 1_000_000.0),
    ("energy", 1_000_000.0),
];

/// Sensor source reading the hwmon sysfs tree.
#[derive(Debug)]
pub struct HwmonSensors {
    root: PathBuf,
    opened: bool,
}

impl HwmonSensors {
    /// Creates a source rooted at `/sys/class/hwmon`.
    pub fn new() -> Self {
        Self::with_root(HWMON_ROOT)
    }

    /// Creates a source rooted at an alternate directory.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            opened: false,
        }
    }
}

impl Default for HwmonSensors {
    fn default() -> Self {
        Self::new()
    }
}

impl SensorSource for HwmonSensors {
    fn open(&mut self) -> Result<(), SensorError> {
        if !self.root.is_dir() {
            return Err(SensorError::Unavailable(format!(
                "{} is not a readable directory",
                self.root.display()
            )));
        }
        self.opened = true;
        tracing::info!(root = %self.root.display(), "hwmon sensor source opened");
        Ok(())
    }

    fn snapshot(&self) -> Result<Vec<Chip>, SensorError> {
        if !self.opened {
            return Err(SensorError::NotInitialized);
        }

        let entries =
            fs::read_dir(&self.root).map_err(|e| SensorError::ReadFailed(e.to_string()))?;

        let mut chips = Vec::new();
        for entry in entries.flatten() {
            let dir = entry.path();
            if !dir.is_dir() {
                continue;
            }
            chips.push(read_chip(&dir));
        }
        // Stable output across scrapes of unchanged hardware.
        chips.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(chips)
    }

    fn is_open(&self) -> bool {
        self.opened
    }
}

/// Reads one hwmon directory into a chip with all its feature readings.
fn read_chip(dir: &Path) -> Chip {
    let name = read_trimmed(&dir.join("name")).unwrap_or_else(|| {
        dir.file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "unknown".to_string())
    });
    let adaptor = adaptor_name(dir);

    let mut features = Vec::new();
    if let Ok(files) = fs::read_dir(dir) {
        for file in files.flatten() {
            let path = file.path();
            let Some(file_name) = path.file_name().and_then(|s| s.to_str()) else {
                continue;
            };
            let Some(feature_name) = file_name.strip_suffix("_input") else {
                continue;
            };
            let Some(raw) = read_trimmed(&path) else {
                tracing::warn!(chip = %name, feature = feature_name, "unreadable feature, skipping");
                continue;
            };
            let Ok(value) = raw.parse::<f64>() else {
                tracing::warn!(chip = %name, feature = feature_name, raw = %raw, "unparsable feature value, skipping");
                continue;
            };

            let label = read_trimmed(&dir.join(format!("{feature_name}_label")))
                .unwrap_or_else(|| feature_name.to_string());
            features.push(Feature::new(feature_name, label, value / unit_scale(feature_name)));
        }
    }
    features.sort_by(|a, b| a.name().cmp(b.name()));

    Chip::new(name, adaptor, features)
}

/// Returns the divisor converting a raw reading into its standard unit.
fn unit_scale(feature_name: &str) -> f64 {
    UNIT_SCALES
        .iter()
        .find(|(prefix, _)| feature_name.starts_with(prefix))
        .map(|(_, divisor)| *divisor)
        .unwrap_or(1.0)
}

/// Derives an adapter name from the chip's `device` symlink, mirroring the
/// names libsensors reports for each bus type.
fn adaptor_name(dir: &Path) -> String {
    let Ok(target) = fs::canonicalize(dir.join("device")) else {
        return "Unknown adapter".to_string();
    };

    // An i2c chip sits under its adapter directory, which carries the
    // adapter's own name (e.g. "SMBus I801 adapter").
    if let Some(i2c_dir) = target.ancestors().find(|p| {
        p.file_name()
            .and_then(|s| s.to_str())
            .is_some_and(|s| s.starts_with("i2c-"))
    }) {
        return read_trimmed(&i2c_dir.join("name")).unwrap_or_else(|| "I2C adapter".to_string());
    }

    let path = target.to_string_lossy();
    if path.contains("/isa/") {
        "ISA adapter"
    } else if path.contains("/pci") {
        "PCI adapter"
    } else if path.contains("/virtual/") {
        "Virtual device"
    } else if path.contains("/platform/") {
        "Platform device"
    } else {
        "Unknown adapter"
    }
    .to_string()
}

fn read_trimmed(path: &Path) -> Option<String> {
    let raw = fs::read_to_string(path).ok()?;
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_file(dir: &Path, name: &str, content: &str) {
        fs::write(dir.join(name), content).unwrap();
    }

    fn fake_chip(root: &Path, entry: &str, name: &str) -> PathBuf {
        let dir = root.join(entry);
        fs::create_dir(&dir).unwrap();
        write_file(&dir, "name", name);
        dir
    }

    #[test]
    fn test_open_missing_root() {
        let tmp = tempfile::tempdir().unwrap();
        let mut sensors = HwmonSensors::with_root(tmp.path().join("nope"));
        assert!(matches!(sensors.open(), Err(SensorError::Unavailable(_))));
        assert!(!sensors.is_open());
    }

    #[test]
    fn test_snapshot_without_open() {
        let tmp = tempfile::tempdir().unwrap();
        let sensors = HwmonSensors::with_root(tmp.path());
        assert!(matches!(
            sensors.snapshot(),
            Err(SensorError::NotInitialized)
        ));
    }

    #[test]
    fn test_empty_root_yields_no_chips() {
        let tmp = tempfile::tempdir().unwrap();
        let mut sensors = HwmonSensors::with_root(tmp.path());
        sensors.open().unwrap();
        assert!(sensors.snapshot().unwrap().is_empty());
    }

    #[test]
    fn test_snapshot_scales_and_labels() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = fake_chip(tmp.path(), "hwmon0", "coretemp");
        write_file(&dir, "temp1_input", "45000");
        write_file(&dir, "temp1_label", "Core 0");
        write_file(&dir, "fan1_input", "1200");
        write_file(&dir, "in0_input", "12100");
        write_file(&dir, "power1_input", "15000000");

        let mut sensors = HwmonSensors::with_root(tmp.path());
        sensors.open().unwrap();
        let chips = sensors.snapshot().unwrap();

        assert_eq!(chips.len(), 1);
        let chip = &chips[0];
        assert_eq!(chip.name(), "coretemp");
        assert_eq!(chip.adaptor(), "Unknown adapter");

        let get = |name: &str| {
            chip.features()
                .iter()
                .find(|f| f.name() == name)
                .unwrap()
                .clone()
        };
        let temp = get("temp1");
        assert_eq!(temp.label(), "Core 0");
        assert_eq!(temp.value(), 45.0);

        // No label file falls back to the feature name.
        let fan = get("fan1");
        assert_eq!(fan.label(), "fan1");
        assert_eq!(fan.value(), 1200.0);

        assert_eq!(get("in0").value(), 12.1);
        assert_eq!(get("power1").value(), 15.0);
    }

    #[test]
    fn test_malformed_feature_skipped() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = fake_chip(tmp.path(), "hwmon0", "nct6775");
        write_file(&dir, "temp1_input", "garbage");
        write_file(&dir, "fan1_input", "900");

        let mut sensors = HwmonSensors::with_root(tmp.path());
        sensors.open().unwrap();
        let chips = sensors.snapshot().unwrap();

        assert_eq!(chips[0].features().len(), 1);
        assert_eq!(chips[0].features()[0].name(), "fan1");
    }

    #[test]
    fn test_chips_sorted_by_name() {
        let tmp = tempfile::tempdir().unwrap();
        fake_chip(tmp.path(), "hwmon1", "zchip");
        fake_chip(tmp.path(), "hwmon0", "achip");

        let mut sensors = HwmonSensors::with_root(tmp.path());
        sensors.open().unwrap();
        let chips = sensors.snapshot().unwrap();

        assert_eq!(chips[0].name(), "achip");
        assert_eq!(chips[1].name(), "zchip");
    }

    #[test]
    fn test_missing_name_falls_back_to_entry() {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir(tmp.path().join("hwmon0")).unwrap();

        let mut sensors = HwmonSensors::with_root(tmp.path());
        sensors.open().unwrap();
        let chips = sensors.snapshot().unwrap();

        assert_eq!(chips[0].name(), "hwmon0");
    }

    #[test]
    fn test_unit_scale_table() {
        assert_eq!(unit_scale("temp3"), 1000.0);
        assert_eq!(unit_scale("in12"), 1000.0);
        assert_eq!(unit_scale("power1"), 1_000_000.0);
        assert_eq!(unit_scale("fan2"), 1.0);
    }
}
