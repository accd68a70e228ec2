//! Policy expiration sweeper
//!
//! A single background task that, once per interval, looks up the policies
//! whose last covered day was the calendar day one hour ago and logs one
//! record per policy. It never changes any data.
//!
//! ```text
//!   ┌──────┐  interval elapsed   ┌──────────┐
//!   │ Idle │ ──────────────────▶ │ Scanning │
//!   └──────┘ ◀────────────────── └──────────┘
//!       │       scan finished          │
//!       └──── shutdown signal ─────────┴──▶ stopped
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! let sweeper = ExpirationSweeper::new(policy_port, SweeperConfig::default());
//! let handle = sweeper.spawn();
//! // ... serve requests ...
//! let stats = handle.shutdown().await;
//! ```

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use core_kernel::{CarId, PolicyId, PortError, Timezone};

use crate::ports::PolicyPort;

/// Default time between two scans
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(60 * 60);

/// How far back from "now" the sweeper looks to pick the expiration day
pub const EXPIRATION_LOOKBACK_HOURS: i64 = 1;

/// Computes the end date the sweeper looks for at instant `now`
///
/// This is the calendar day, in `timezone`, of the instant one hour before
/// `now`. Between 00:00 and 01:00 local time it is the previous day.
pub fn expiration_reference_date(now: DateTime<Utc>, timezone: &Timezone) -> NaiveDate {
    timezone.date_of(now - chrono::Duration::hours(EXPIRATION_LOOKBACK_HOURS))
}

/// Source of the current instant
pub trait Clock: Send + Sync + 'static {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A policy found expired during a sweep
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExpiredPolicyNotice {
    pub policy_id: PolicyId,
    pub car_id: CarId,
    pub provider: String,
    pub expired_on: NaiveDate,
}

/// Sweeper settings
#[derive(Debug, Clone)]
pub struct SweeperConfig {
    /// Delay between the end of one scan and the start of the next
    pub interval: Duration,
    /// Timezone whose calendar decides the expiration day
    pub timezone: Timezone,
}

impl SweeperConfig {
    pub fn interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn timezone(mut self, timezone: Timezone) -> Self {
        self.timezone = timezone;
        self
    }
}

impl Default for SweeperConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_SWEEP_INTERVAL,
            timezone: Timezone::default(),
        }
    }
}

/// Counters reported when the sweeper stops
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweeperStats {
    /// Scans started
    pub cycles: u64,
    /// Scans that failed to read the store
    pub failed_cycles: u64,
    /// Expired policies logged across all scans
    pub notices: u64,
}

/// Background task logging newly-expired policies
pub struct ExpirationSweeper {
    policies: Arc<dyn PolicyPort>,
    config: SweeperConfig,
    clock: Arc<dyn Clock>,
}

impl ExpirationSweeper {
    /// Creates a sweeper reading from `policies`, driven by the wall clock
    pub fn new(policies: Arc<dyn PolicyPort>, config: SweeperConfig) -> Self {
        Self {
            policies,
            config,
            clock: Arc::new(SystemClock),
        }
    }

    /// Replaces the clock used to decide the reference date
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn config(&self) -> &SweeperConfig {
        &self.config
    }

    /// Runs one scan using the sweeper's clock
    pub async fn sweep_once(&self) -> Result<Vec<ExpiredPolicyNotice>, PortError> {
        self.sweep_at(self.clock.now()).await
    }

    /// Runs one scan as if the current instant were `now`
    ///
    /// Emits one `info` record per expired policy and returns the same
    /// policies as notices.
    pub async fn sweep_at(&self, now: DateTime<Utc>) -> Result<Vec<ExpiredPolicyNotice>, PortError> {
        let reference_date = expiration_reference_date(now, &self.config.timezone);
        debug!(%reference_date, "Scanning for expired policies");

        let expired = self.policies.policies_ending_on(reference_date).await?;

        let notices: Vec<ExpiredPolicyNotice> = expired
            .into_iter()
            .map(|policy| ExpiredPolicyNotice {
                policy_id: policy.id,
                car_id: policy.car_id,
                provider: policy.provider,
                expired_on: reference_date,
            })
            .collect();

        for notice in &notices {
            info!(
                policy_id = %notice.policy_id,
                car_id = %notice.car_id,
                provider = %notice.provider,
                expired_on = %notice.expired_on,
                "Policy {} for car {} expired on {}",
                notice.policy_id, notice.car_id, notice.expired_on
            );
        }

        Ok(notices)
    }

    /// Runs scans until `shutdown` flips to true or its sender is dropped
    ///
    /// A failed scan is logged and the loop carries on with the next
    /// interval. The signal is checked before every scan and raced against
    /// every delay, so no scan starts once shutdown has been observed.
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) -> SweeperStats {
        info!(
            interval_secs = self.config.interval.as_secs(),
            timezone = self.config.timezone.name(),
            "Expiration sweeper started"
        );

        let mut stats = SweeperStats::default();

        loop {
            if *shutdown.borrow_and_update() {
                break;
            }

            stats.cycles += 1;
            match self.sweep_once().await {
                Ok(notices) => {
                    stats.notices += notices.len() as u64;
                    debug!(expired = notices.len(), "Expiration scan finished");
                }
                Err(err) if err.is_transient() => {
                    stats.failed_cycles += 1;
                    warn!(error = %err, "Expiration scan failed, retrying next interval");
                }
                Err(err) => {
                    stats.failed_cycles += 1;
                    error!(error = %err, "Expiration scan failed");
                }
            }

            tokio::select! {
                _ = tokio::time::sleep(self.config.interval) => {}
                _ = shutdown.changed() => break,
            }
        }

        info!(
            cycles = stats.cycles,
            failed_cycles = stats.failed_cycles,
            notices = stats.notices,
            "Expiration sweeper stopped"
        );
        stats
    }

    /// Spawns the sweeper on the current tokio runtime
    pub fn spawn(self) -> ExpirationSweeperHandle {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let task = tokio::spawn(self.run(shutdown_rx));

        ExpirationSweeperHandle { shutdown_tx, task }
    }
}

/// Owner of a running sweeper task
pub struct ExpirationSweeperHandle {
    shutdown_tx: watch::Sender<bool>,
    task: JoinHandle<SweeperStats>,
}

impl ExpirationSweeperHandle {
    /// Returns true once the task has exited
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Signals the task to stop and waits for it
    ///
    /// Returns default stats if the task panicked.
    pub async fn shutdown(self) -> SweeperStats {
        // The receiver is gone only if the task already exited
        let _ = self.shutdown_tx.send(true);

        match self.task.await {
            Ok(stats) => stats,
            Err(err) => {
                error!(error = %err, "Expiration sweeper task did not exit cleanly");
                SweeperStats::default()
            }
        }
    }
}
