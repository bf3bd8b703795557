//! Alert message construction.
//!
//! The core owns the notification content: a fixed subject line and a
//! three-line plain-text body, one line per metric in fixed order
//! (temperature, load average, disk usage), each carrying the current
//! value and the corresponding exceeded flag.

use serde::Serialize;

use crate::sample::Sample;

/// Fixed subject line for every alert email.
pub const ALERT_SUBJECT: &str = "[hostwatch] Threshold exceeded";

/// A fully rendered alert ready for delivery.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlertMessage {
    pub subject: &'static str,
    pub body: String,
}

impl AlertMessage {
    /// Render the alert body for a sample.
    ///
    /// Line order and format are stable; operators and tests rely on it.
    pub fn render(sample: &Sample) -> Self {
        let body = format!(
            "CPU temperature: {} C (exceeded: {})\n\
             Load average: {} (exceeded: {})\n\
             Disk usage: {}% (exceeded: {})",
            sample.cpu_temperature,
            sample.cpu_exceeded,
            sample.load_average,
            sample.load_exceeded,
            sample.disk_usage_percent,
            sample.disk_exceeded,
        );
        AlertMessage {
            subject: ALERT_SUBJECT,
            body,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
