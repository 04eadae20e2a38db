//! Sensor source abstraction.
//!
//! This module provides a trait-based abstraction over the hardware
//! monitoring subsystem, allowing for both real hwmon input and mock
//! implementations for testing.

use super::Chip;
use std::sync::Mutex;
use thiserror::Error;

/// Errors that can occur while reading sensors.
#[derive(Debug, Error)]
pub enum SensorError {
    #[error("sensor subsystem unavailable: {0}")]
    Unavailable(String),
    #[error("failed to read sensors: {0}")]
    ReadFailed(String),
    #[error("sensors not initialized")]
    NotInitialized,
}

/// Trait for sensor source implementations.
///
/// `open` is called exactly once at process start and must fail there if
/// the subsystem is unusable. `snapshot` re-enumerates all chips and their
/// current readings on every call; implementations must tolerate concurrent
/// snapshots, as each scrape request performs its own read.
pub trait SensorSource: Send + Sync {
    /// Initializes the sensor subsystem.
    fn open(&mut self) -> Result<(), SensorError>;

    /// Enumerates all currently detected chips with fresh readings.
    fn snapshot(&self) -> Result<Vec<Chip>, SensorError>;

    /// Checks if the source has been initialized.
    fn is_open(&self) -> bool;
}

/// Mock sensor source for testing that serves configured chips.
#[derive(Debug, Default)]
pub struct MockSensors {
    chips: Mutex<Vec<Chip>>,
    failing: Mutex<bool>,
    opened: bool,
}

impl MockSensors {
    /// Creates an unopened mock with no chips.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an already-open mock serving the given chips.
    pub fn with_chips(chips: Vec<Chip>) -> Self {
        Self {
            chips: Mutex::new(chips),
            failing: Mutex::new(false),
            opened: true,
        }
    }

    /// Replaces the chips returned by subsequent snapshots.
    pub fn set_chips(&self, chips: Vec<Chip>) {
        *lock(&self.chips) = chips;
    }

    /// Makes subsequent snapshots fail when set.
    pub fn set_failing(&self, failing: bool) {
        *lock(&self.failing) = failing;
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl SensorSource for MockSensors {
    fn open(&mut self) -> Result<(), SensorError> {
        self.opened = true;
        tracing::info!("MockSensors opened");
        Ok(())
    }

    fn snapshot(&self) -> Result<Vec<Chip>, SensorError> {
        if !self.opened {
            return Err(SensorError::NotInitialized);
        }
        if *lock(&self.failing) {
            return Err(SensorError::ReadFailed("mock failure".to_string()));
        }
        Ok(lock(&self.chips).clone())
    }

    fn is_open(&self) -> bool {
        self.opened
    }
}
