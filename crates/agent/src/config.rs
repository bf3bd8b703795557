//! Agent configuration.
//!
//! All configuration is read from the environment exactly once at process
//! start and carried in explicit structs threaded through as arguments.
//! No component reads ambient process state after startup.

use std::path::PathBuf;
use std::str::FromStr;

/// Default stats-store location next to the binary's working directory.
const DEFAULT_DATABASE_URL: &str = "sqlite://hostwatch.db?mode=rwc";

/// Threshold defaults: 70 C CPU, 1.0 load, 80% disk.
const DEFAULT_CPU_TEMP_THRESHOLD: f64 = 70.0;
const DEFAULT_LOAD_AVG_THRESHOLD: f64 = 1.0;
const DEFAULT_DISK_USAGE_THRESHOLD: f64 = 80.0;

const DEFAULT_DISK_MOUNT_POINT: &str = "/";
const DEFAULT_CPU_SENSOR_LABEL: &str = "cpu";

/// Per-metric threshold configuration owned by the host probe.
///
/// Thresholds belong to the provider boundary: the probe computes the
/// exceeded flags, and nothing downstream recomputes them.
#[derive(Debug, Clone)]
pub struct ProbeConfig {
    /// CPU temperature alert threshold, degrees Celsius.
    pub cpu_temp_threshold: f64,
    /// 1-minute load average alert threshold.
    pub load_avg_threshold: f64,
    /// Disk usage alert threshold, percent.
    pub disk_usage_threshold: f64,
    /// Mount point of the monitored disk.
    pub disk_mount_point: PathBuf,
    /// Case-insensitive substring matched against sensor labels to pick
    /// the CPU temperature component.
    pub cpu_sensor_label: String,
}

/// Full agent configuration for one run.
#[derive(Debug, Clone)]
pub struct AgentConfig {
    /// SQLite database URL for the stats store.
    pub database_url: String,
    pub probe: ProbeConfig,
}

impl AgentConfig {
    /// Load configuration from environment variables, with defaults for
    /// everything. SMTP settings are read separately by
    /// `hostwatch_notify::EmailConfig::from_env`.
    ///
    /// | Variable               | Default                        |
    /// |------------------------|--------------------------------|
    /// | `DATABASE_URL`         | `sqlite://hostwatch.db?mode=rwc` |
    /// | `CPU_TEMP_THRESHOLD`   | `70.0`                         |
    /// | `LOAD_AVG_THRESHOLD`   | `1.0`                          |
    /// | `DISK_USAGE_THRESHOLD` | `80.0`                         |
    /// | `DISK_MOUNT_POINT`     | `/`                            |
    /// | `CPU_SENSOR_LABEL`     | `cpu`                          |
    pub fn from_env() -> Self {
        AgentConfig {
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            probe: ProbeConfig {
                cpu_temp_threshold: env_or("CPU_TEMP_THRESHOLD", DEFAULT_CPU_TEMP_THRESHOLD),
                load_avg_threshold: env_or("LOAD_AVG_THRESHOLD", DEFAULT_LOAD_AVG_THRESHOLD),
                disk_usage_threshold: env_or(
                    "DISK_USAGE_THRESHOLD",
                    DEFAULT_DISK_USAGE_THRESHOLD,
                ),
                disk_mount_point: PathBuf::from(
                    std::env::var("DISK_MOUNT_POINT")
                        .unwrap_or_else(|_| DEFAULT_DISK_MOUNT_POINT.to_string()),
                ),
                cpu_sensor_label: std::env::var("CPU_SENSOR_LABEL")
                    .unwrap_or_else(|_| DEFAULT_CPU_SENSOR_LABEL.to_string()),
            },
        }
    }
}

/// Parse an environment variable, falling back to the default on absence
/// or parse failure.
fn env_or<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        for key in [
            "DATABASE_URL",
            "CPU_TEMP_THRESHOLD",
            "LOAD_AVG_THRESHOLD",
            "DISK_USAGE_THRESHOLD",
            "DISK_MOUNT_POINT",
            "CPU_SENSOR_LABEL",
        ] {
            std::env::remove_var(key);
        }

        let config = AgentConfig::from_env();
        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(config.probe.cpu_temp_threshold, 70.0);
        assert_eq!(config.probe.load_avg_threshold, 1.0);
        assert_eq!(config.probe.disk_usage_threshold, 80.0);
        assert_eq!(config.probe.disk_mount_point, PathBuf::from("/"));
        assert_eq!(config.probe.cpu_sensor_label, "cpu");
    }

    #[test]
    fn env_or_falls_back_on_unparseable_value() {
        std::env::set_var("HOSTWATCH_TEST_BOGUS", "not-a-number");
        let value: f64 = env_or("HOSTWATCH_TEST_BOGUS", 42.0);
        assert_eq!(value, 42.0);
        std::env::remove_var("HOSTWATCH_TEST_BOGUS");
    }
}
