//! The sampling pipeline.
//!
//! One invocation runs the linear chain
//! `Start → Sampled → Persisted → Evaluated → (Notified | Skipped) → Done`
//! exactly once and terminates; periodic invocation belongs to an external
//! scheduler. Persistence and delivery failures are caught here, logged,
//! and never propagated — alerting is the safety-critical path and must
//! not be suppressed by a disk hiccup, and a mail hiccup must not fail
//! the run. Only a failed sample capture aborts.

use hostwatch_core::alert::AlertMessage;
use hostwatch_core::evaluate::{self, AlertDecision};
use hostwatch_core::provider::MetricProvider;
use hostwatch_core::sample::{Sample, SampleError};
use hostwatch_core::types::DbId;
use hostwatch_db::repositories::StatsRepo;
use hostwatch_db::DbPool;
use hostwatch_notify::Notifier;

/// What one pipeline run did.
#[derive(Debug)]
pub struct RunOutcome {
    /// Id of the persisted row, `None` if persistence failed or no store
    /// was available.
    pub record_id: Option<DbId>,
    pub decision: AlertDecision,
    /// Whether an alert was delivered successfully.
    pub notified: bool,
}

/// Execute one full sampling run.
///
/// `pool` and `notifier` are optional capabilities: a missing store or an
/// unconfigured mail channel degrades that step to a logged warning, the
/// rest of the run is unaffected.
pub async fn run_once<P: MetricProvider>(
    provider: &P,
    pool: Option<&DbPool>,
    notifier: Option<&dyn Notifier>,
) -> Result<RunOutcome, SampleError> {
    // Start → Sampled. The only fatal transition: no partial sample is
    // ever carried forward, the run is skipped instead.
    let sample = Sample::capture(provider)?;
    tracing::info!(
        cpu_temperature = sample.cpu_temperature,
        load_average = sample.load_average,
        disk_usage_percent = sample.disk_usage_percent,
        "Sampled host health"
    );

    // Sampled → Persisted. Always attempted; failure is logged and the
    // run continues so evaluation and delivery still happen.
    let record_id = match pool {
        Some(pool) => persist(pool, &sample).await,
        None => {
            tracing::warn!("Stats store unavailable, sample not persisted");
            None
        }
    };

    // Persisted → Evaluated. Pure; the outcome is logged either way.
    let decision = evaluate::evaluate(&sample);
    if decision.triggered {
        tracing::warn!(
            reasons = decision.reasons.len(),
            cpu_exceeded = sample.cpu_exceeded,
            load_exceeded = sample.load_exceeded,
            disk_exceeded = sample.disk_exceeded,
            "Threshold exceeded"
        );
    } else {
        tracing::info!("No thresholds exceeded");
    }

    // Evaluated → Notified | Skipped.
    let notified = if decision.triggered {
        deliver(notifier, &sample).await
    } else {
        false
    };

    // Done.
    Ok(RunOutcome {
        record_id,
        decision,
        notified,
    })
}

/// Append the sample to the stats store, converting failure into a log
/// entry. The schema is created lazily on first use.
async fn persist(pool: &DbPool, sample: &Sample) -> Option<DbId> {
    if let Err(e) = StatsRepo::ensure_schema(pool).await {
        tracing::error!(error = %e, "Failed to ensure stats schema");
        return None;
    }
    match StatsRepo::append(pool, sample).await {
        Ok(id) => {
            tracing::info!(id, "Sample persisted");
            Some(id)
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to persist sample");
            None
        }
    }
}

/// Send the alert, converting failure into a log entry. Best effort,
/// single attempt.
async fn deliver(notifier: Option<&dyn Notifier>, sample: &Sample) -> bool {
    let Some(notifier) = notifier else {
        tracing::warn!("Alert triggered but delivery is not configured");
        return false;
    };

    let message = AlertMessage::render(sample);
    match notifier.send(&message).await {
        Ok(()) => true,
        Err(e) => {
            tracing::error!(error = %e, "Failed to deliver alert");
            false
        }
    }
}
