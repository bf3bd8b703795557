//! Metric provider boundary.
//!
//! The sampler treats sensor acquisition as an external collaborator:
//! each of the three monitored metrics is read through [`MetricProvider`],
//! which yields the current numeric value together with a pre-computed
//! threshold-exceeded flag. The provider owns its own min/max/threshold
//! configuration; nothing downstream recomputes the flag.

use serde::Serialize;

/// One metric reading: the observed value plus the provider's own verdict
/// on whether its configured threshold was crossed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Reading {
    pub value: f64,
    pub exceeded: bool,
}

impl Reading {
    pub fn new(value: f64, exceeded: bool) -> Self {
        Self { value, exceeded }
    }
}

/// Error type for a failed sensor read.
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    /// The sensor exists but could not be read.
    #[error("Failed to read {metric}: {detail}")]
    ReadFailed {
        metric: &'static str,
        detail: String,
    },

    /// No matching sensor was found on this host.
    #[error("No sensor found for {metric}")]
    SensorMissing { metric: &'static str },
}

/// Boundary trait for the external metric collaborator.
///
/// Each read is independent; a caller wanting a coherent snapshot performs
/// all three reads in one pass (see [`Sample::capture`](crate::sample::Sample::capture)).
pub trait MetricProvider {
    /// Current CPU temperature in degrees Celsius.
    fn cpu_temperature(&self) -> Result<Reading, ProbeError>;

    /// Current 1-minute load average (unitless).
    fn load_average(&self) -> Result<Reading, ProbeError>;

    /// Current disk usage of the monitored mount, percent 0–100.
    fn disk_usage(&self) -> Result<Reading, ProbeError>;
}
