//! Tests for the policy expiration sweeper

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use core_kernel::{
    CarId, CoveragePeriod, DomainPort, HealthCheckResult, HealthCheckable, PolicyId, PortError,
};
use domain_policy::expiration::{Clock, ExpirationSweeper, SweeperConfig};
use domain_policy::{InsurancePolicy, PolicyPort};

// ============================================================================
// Test ports
// ============================================================================

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn policy(id: i64, car: i64, start: NaiveDate, end: Option<NaiveDate>) -> InsurancePolicy {
    InsurancePolicy::new(
        PolicyId::new(id),
        CarId::new(car),
        "Allianz",
        CoveragePeriod::new(start, end).unwrap(),
    )
    .unwrap()
}

/// Serves a fixed list of policies and counts scans
#[derive(Default)]
struct CountingPolicyPort {
    policies: Vec<InsurancePolicy>,
    scans: AtomicUsize,
    /// Number of leading scans that fail with a connection error
    failing_scans: usize,
}

impl CountingPolicyPort {
    fn with_policies(policies: Vec<InsurancePolicy>) -> Self {
        Self {
            policies,
            ..Default::default()
        }
    }

    fn failing_first(failing_scans: usize) -> Self {
        Self {
            failing_scans,
            ..Default::default()
        }
    }

    fn scans(&self) -> usize {
        self.scans.load(Ordering::SeqCst)
    }
}

impl DomainPort for CountingPolicyPort {}

#[async_trait]
impl HealthCheckable for CountingPolicyPort {
    async fn health_check(&self) -> HealthCheckResult {
        HealthCheckResult::healthy("counting-policy-port")
    }
}

#[async_trait]
impl PolicyPort for CountingPolicyPort {
    async fn policies_for_car(&self, car_id: CarId) -> Result<Vec<InsurancePolicy>, PortError> {
        Ok(self.policies.iter().filter(|p| p.car_id == car_id).cloned().collect())
    }

    async fn policies_ending_on(&self, date: NaiveDate) -> Result<Vec<InsurancePolicy>, PortError> {
        let scan = self.scans.fetch_add(1, Ordering::SeqCst);
        if scan < self.failing_scans {
            return Err(PortError::connection("database restarting"));
        }
        Ok(self.policies.iter().filter(|p| p.expires_on(date)).cloned().collect())
    }
}

struct FixedClock(DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

// ============================================================================
// Single scan
// ============================================================================

mod sweep_tests {
    use super::*;

    #[tokio::test]
    async fn test_sweep_reports_one_notice_per_match() {
        let port = Arc::new(CountingPolicyPort::with_policies(vec![
            policy(1, 1, date(2024, 1, 1), Some(date(2024, 6, 30))),
            policy(2, 2, date(2023, 7, 1), Some(date(2024, 6, 30))),
            policy(3, 3, date(2024, 1, 1), Some(date(2024, 12, 31))),
            policy(4, 4, date(2024, 1, 1), None),
        ]));
        let sweeper = ExpirationSweeper::new(port, SweeperConfig::default());

        let now = Utc.with_ymd_and_hms(2024, 6, 30, 15, 0, 0).unwrap();
        let notices = sweeper.sweep_at(now).await.unwrap();

        let ids: Vec<_> = notices.iter().map(|n| n.policy_id).collect();
        assert_eq!(ids, vec![PolicyId::new(1), PolicyId::new(2)]);
        assert!(notices.iter().all(|n| n.expired_on == date(2024, 6, 30)));
        assert_eq!(notices[1].car_id, CarId::new(2));
    }

    #[tokio::test]
    async fn test_sweep_just_after_midnight_looks_at_previous_day() {
        let port = Arc::new(CountingPolicyPort::with_policies(vec![policy(
            1,
            1,
            date(2024, 1, 1),
            Some(date(2024, 12, 31)),
        )]));
        let sweeper = ExpirationSweeper::new(port, SweeperConfig::default());

        let now = Utc.with_ymd_and_hms(2025, 1, 1, 0, 15, 0).unwrap();
        let notices = sweeper.sweep_at(now).await.unwrap();

        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].expired_on, date(2024, 12, 31));
    }

    #[tokio::test]
    async fn test_sweep_with_no_match_reports_nothing() {
        let port = Arc::new(CountingPolicyPort::with_policies(vec![policy(
            1,
            1,
            date(2024, 1, 1),
            Some(date(2024, 12, 31)),
        )]));
        let sweeper = ExpirationSweeper::new(port.clone(), SweeperConfig::default());

        let now = Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap();
        let notices = sweeper.sweep_at(now).await.unwrap();

        assert!(notices.is_empty());
        assert_eq!(port.scans(), 1);
    }

    #[tokio::test]
    async fn test_sweep_once_uses_injected_clock() {
        let port = Arc::new(CountingPolicyPort::with_policies(vec![policy(
            7,
            3,
            date(2025, 3, 1),
            Some(date(2025, 9, 30)),
        )]));
        let clock = FixedClock(Utc.with_ymd_and_hms(2025, 9, 30, 18, 0, 0).unwrap());
        let sweeper = ExpirationSweeper::new(port, SweeperConfig::default())
            .with_clock(Arc::new(clock));

        let notices = sweeper.sweep_once().await.unwrap();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].policy_id, PolicyId::new(7));
    }

    #[tokio::test]
    async fn test_sweep_surfaces_store_errors() {
        let port = Arc::new(CountingPolicyPort::failing_first(1));
        let sweeper = ExpirationSweeper::new(port, SweeperConfig::default());

        let result = sweeper.sweep_once().await;
        assert!(matches!(result, Err(ref e) if e.is_transient()));
    }
}

// ============================================================================
// Background loop
// ============================================================================

mod loop_tests {
    use super::*;

    const HOUR: Duration = Duration::from_secs(60 * 60);

    #[tokio::test(start_paused = true)]
    async fn test_loop_scans_once_per_interval() {
        let port = Arc::new(CountingPolicyPort::default());
        let handle = ExpirationSweeper::new(port.clone(), SweeperConfig::default().interval(HOUR))
            .spawn();

        // Scans at 0h, 1h, 2h and 3h
        tokio::time::sleep(HOUR * 3 + Duration::from_secs(1)).await;
        let stats = handle.shutdown().await;

        assert_eq!(stats.cycles, 4);
        assert_eq!(stats.failed_cycles, 0);
        assert_eq!(port.scans(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_interrupts_the_wait() {
        let port = Arc::new(CountingPolicyPort::default());
        let handle = ExpirationSweeper::new(port.clone(), SweeperConfig::default().interval(HOUR))
            .spawn();

        tokio::time::sleep(Duration::from_secs(1)).await;
        let started = tokio::time::Instant::now();
        let stats = handle.shutdown().await;

        assert!(started.elapsed() < Duration::from_secs(1));
        assert_eq!(stats.cycles, 1);
        assert_eq!(port.scans(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_scan_does_not_stop_the_loop() {
        let port = Arc::new(CountingPolicyPort::failing_first(2));
        let handle = ExpirationSweeper::new(port.clone(), SweeperConfig::default().interval(HOUR))
            .spawn();

        tokio::time::sleep(HOUR * 2 + Duration::from_secs(1)).await;
        assert!(!handle.is_finished());

        let stats = handle.shutdown().await;
        assert_eq!(stats.cycles, 3);
        assert_eq!(stats.failed_cycles, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_loop_counts_notices() {
        // The wall clock is not paused, so pin the reference date with a clock
        let port = Arc::new(CountingPolicyPort::with_policies(vec![
            policy(1, 1, date(2024, 1, 1), Some(date(2024, 6, 30))),
            policy(2, 2, date(2024, 1, 1), Some(date(2024, 6, 30))),
        ]));
        let clock = FixedClock(Utc.with_ymd_and_hms(2024, 6, 30, 12, 0, 0).unwrap());
        let handle = ExpirationSweeper::new(port, SweeperConfig::default().interval(HOUR))
            .with_clock(Arc::new(clock))
            .spawn();

        tokio::time::sleep(HOUR + Duration::from_secs(1)).await;
        let stats = handle.shutdown().await;

        assert_eq!(stats.cycles, 2);
        assert_eq!(stats.notices, 4);
    }

    #[tokio::test]
    async fn test_shutdown_right_after_spawn() {
        let port = Arc::new(CountingPolicyPort::default());
        let handle = ExpirationSweeper::new(port, SweeperConfig::default().interval(HOUR)).spawn();

        let stats = tokio::time::timeout(Duration::from_secs(5), handle.shutdown())
            .await
            .expect("sweeper should stop promptly");
        assert!(stats.cycles <= 1);
    }
}
