//! sysinfo-backed metric provider.
//!
//! [`HostProbe`] implements [`MetricProvider`] by reading the host's
//! temperature sensors, load average, and disk usage through `sysinfo`.
//! It owns the per-metric threshold configuration and computes the
//! exceeded flag for every reading; downstream components treat those
//! flags as authoritative.

use std::path::Path;

use sysinfo::{Components, Disks, System};

use hostwatch_core::provider::{MetricProvider, ProbeError, Reading};

use crate::config::ProbeConfig;

/// Reads host health metrics and applies the configured thresholds.
pub struct HostProbe {
    config: ProbeConfig,
}

impl HostProbe {
    pub fn new(config: ProbeConfig) -> Self {
        Self { config }
    }
}

/// A metric exceeds its threshold when the observed value is strictly
/// greater than the configured limit.
fn exceeds(value: f64, threshold: f64) -> bool {
    value > threshold
}

/// Used percentage of a disk from its total and available byte counts.
fn usage_percent(total: u64, available: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let used = total.saturating_sub(available);
    (used as f64 / total as f64) * 100.0
}

impl MetricProvider for HostProbe {
    /// Hottest temperature among sensors whose label matches the
    /// configured substring (case-insensitive).
    fn cpu_temperature(&self) -> Result<Reading, ProbeError> {
        let components = Components::new_with_refreshed_list();
        let label = self.config.cpu_sensor_label.to_lowercase();

        let temperature = components
            .iter()
            .filter(|c| c.label().to_lowercase().contains(&label))
            .map(|c| f64::from(c.temperature()))
            .fold(None, |max: Option<f64>, t| {
                Some(max.map_or(t, |m| m.max(t)))
            })
            .ok_or(ProbeError::SensorMissing {
                metric: "cpu_temperature",
            })?;

        Ok(Reading::new(
            temperature,
            exceeds(temperature, self.config.cpu_temp_threshold),
        ))
    }

    fn load_average(&self) -> Result<Reading, ProbeError> {
        let load = System::load_average().one;
        if load < 0.0 {
            // sysinfo reports a negative load on platforms without the
            // getloadavg interface.
            return Err(ProbeError::ReadFailed {
                metric: "load_average",
                detail: "load average not supported on this platform".to_string(),
            });
        }
        Ok(Reading::new(
            load,
            exceeds(load, self.config.load_avg_threshold),
        ))
    }

    fn disk_usage(&self) -> Result<Reading, ProbeError> {
        let disks = Disks::new_with_refreshed_list();
        let mount: &Path = &self.config.disk_mount_point;

        let disk = disks
            .list()
            .iter()
            .find(|d| d.mount_point() == mount)
            .ok_or_else(|| ProbeError::ReadFailed {
                metric: "disk_usage",
                detail: format!("no disk mounted at {}", mount.display()),
            })?;

        let usage = usage_percent(disk.total_space(), disk.available_space());
        Ok(Reading::new(
            usage,
            exceeds(usage, self.config.disk_usage_threshold),
        ))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
