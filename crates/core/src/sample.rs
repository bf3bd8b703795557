//! Sample model and builder.
//!
//! A [`Sample`] is one immutable snapshot of the three monitored metrics
//! plus their exceeded flags, captured in a single provider pass. If any
//! individual read fails the whole capture fails — the run is skipped
//! rather than stored with placeholder data.

use chrono::Utc;
use serde::Serialize;

use crate::provider::{MetricProvider, ProbeError};
use crate::types::Timestamp;

/// Error type for a failed sample capture. Fatal to the run: this is the
/// only failure the orchestrator propagates to the caller.
#[derive(Debug, thiserror::Error)]
pub enum SampleError {
    #[error("Metric unavailable: {0}")]
    MetricUnavailable(#[from] ProbeError),
}

/// One atomic snapshot of host health. Never mutated after construction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sample {
    /// Wall-clock capture time (UTC).
    pub timestamp: Timestamp,
    /// CPU temperature, degrees Celsius.
    pub cpu_temperature: f64,
    /// 1-minute load average, unitless.
    pub load_average: f64,
    /// Disk usage of the monitored mount, percent 0–100.
    pub disk_usage_percent: f64,
    /// Provider verdicts — sourced, not recomputed.
    pub cpu_exceeded: bool,
    pub load_exceeded: bool,
    pub disk_exceeded: bool,
}

impl Sample {
    /// Capture a sample from the provider.
    ///
    /// All three metrics are read in one pass; the first read failure
    /// aborts the capture and no partial sample is ever produced.
    pub fn capture<P: MetricProvider>(provider: &P) -> Result<Self, SampleError> {
        let cpu = provider.cpu_temperature()?;
        let load = provider.load_average()?;
        let disk = provider.disk_usage()?;

        Ok(Sample {
            timestamp: Utc::now(),
            cpu_temperature: cpu.value,
            load_average: load.value,
            disk_usage_percent: disk.value,
            cpu_exceeded: cpu.exceeded,
            load_exceeded: load.exceeded,
            disk_exceeded: disk.exceeded,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
