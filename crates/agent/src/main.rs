//! `hostwatch-agent` -- periodic host-health sampler.
//!
//! Reads CPU temperature, load average, and disk usage once, appends the
//! sample to a local SQLite stats store, and emails an alert when any
//! metric crossed its configured threshold. Runs the pipeline exactly
//! once and exits; schedule it externally (cron, systemd timer).
//!
//! Exit status: `0` unless the metrics themselves could not be sampled.
//! Persistence and delivery failures are logged and do not change the
//! exit status -- the next scheduled run retries fresh.
//!
//! # Environment variables
//!
//! | Variable               | Required | Default | Description                       |
//! |------------------------|----------|---------|-----------------------------------|
//! | `DATABASE_URL`         | no       | `sqlite://hostwatch.db?mode=rwc` | stats store |
//! | `CPU_TEMP_THRESHOLD`   | no       | `70.0`  | degrees Celsius                   |
//! | `LOAD_AVG_THRESHOLD`   | no       | `1.0`   | 1-minute load average             |
//! | `DISK_USAGE_THRESHOLD` | no       | `80.0`  | percent                           |
//! | `DISK_MOUNT_POINT`     | no       | `/`     | disk to sample                    |
//! | `CPU_SENSOR_LABEL`     | no       | `cpu`   | sensor label substring            |
//! | `SMTP_HOST`            | no       | --      | unset disables alert delivery     |
//! | `ALERT_RECIPIENT`      | with SMTP| --      | fixed alert recipient             |
//! | `SMTP_PORT` / `SMTP_FROM` / `SMTP_USER` / `SMTP_PASSWORD` / `SEND_TIMEOUT_SECS` | no | see `hostwatch-notify` | |

use hostwatch_agent::config::AgentConfig;
use hostwatch_agent::pipeline;
use hostwatch_agent::probe::HostProbe;
use hostwatch_notify::{EmailConfig, EmailNotifier, Notifier};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hostwatch_agent=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AgentConfig::from_env();
    tracing::debug!(?config, "Loaded configuration");

    // Store-open failure is non-fatal: the run still evaluates and alerts.
    let pool = match hostwatch_db::create_pool(&config.database_url).await {
        Ok(pool) => {
            if let Err(e) = hostwatch_db::health_check(&pool).await {
                tracing::warn!(error = %e, "Stats store health check failed");
            }
            Some(pool)
        }
        Err(e) => {
            tracing::error!(error = %e, url = %config.database_url, "Failed to open stats store");
            None
        }
    };

    let notifier: Option<EmailNotifier> = match EmailConfig::from_env() {
        Some(email_config) => Some(EmailNotifier::new(email_config)),
        None => {
            tracing::info!("SMTP not configured, alert delivery disabled");
            None
        }
    };

    let probe = HostProbe::new(config.probe.clone());

    let result = pipeline::run_once(
        &probe,
        pool.as_ref(),
        notifier.as_ref().map(|n| n as &dyn Notifier),
    )
    .await;

    if let Some(pool) = pool {
        pool.close().await;
    }

    match result {
        Ok(outcome) => {
            tracing::info!(
                record_id = ?outcome.record_id,
                triggered = outcome.decision.triggered,
                notified = outcome.notified,
                "Run complete"
            );
        }
        Err(e) => {
            tracing::error!(error = %e, "Run aborted: could not sample metrics");
            std::process::exit(1);
        }
    }
}
