use dashmap::DashMap;
use giveaway_errors::AppError;
use std::net::IpAddr;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

const MAX_DRAWS_PER_MINUTE: u32 = 10;
const MAX_DRAWS_PER_HOUR: u32 = 100;
const CLEANUP_INTERVAL_SECS: u64 = 300;

#[derive(Clone)]
struct DrawRecord {
    minute_count: u32,
    hour_count: u32,
    minute_start: Instant,
    hour_start: Instant,
}

impl DrawRecord {
    fn starting_at(now: Instant) -> Self {
        Self {
            minute_count: 0,
            hour_count: 0,
            minute_start: now,
            hour_start: now,
        }
    }
}

/// Per-client draw quota over fixed minute and hour windows.
#[derive(Clone)]
pub struct RateLimiter {
    draws: Arc<DashMap<IpAddr, DrawRecord>>,
    last_cleanup: Arc<Mutex<Instant>>,
    per_minute: u32,
    per_hour: u32,
}

impl RateLimiter {
    pub fn new() -> Self {
        Self::with_limits(MAX_DRAWS_PER_MINUTE, MAX_DRAWS_PER_HOUR)
    }

    pub fn with_limits(per_minute: u32, per_hour: u32) -> Self {
        Self {
            draws: Arc::new(DashMap::new()),
            last_cleanup: Arc::new(Mutex::new(Instant::now())),
            per_minute,
            per_hour,
        }
    }

    pub fn check_rate_limit(&self, ip: IpAddr) -> Result<(), RateLimitError> {
        self.check_at(ip, Instant::now())
    }

    fn check_at(&self, ip: IpAddr, now: Instant) -> Result<(), RateLimitError> {
        self.maybe_cleanup(now);

        let mut record = self
            .draws
            .entry(ip)
            .or_insert_with(|| DrawRecord::starting_at(now));

        if now.duration_since(record.minute_start) > Duration::from_secs(60) {
            record.minute_count = 0;
            record.minute_start = now;
        }

        if now.duration_since(record.hour_start) > Duration::from_secs(3600) {
            record.hour_count = 0;
            record.hour_start = now;
        }

        if record.minute_count >= self.per_minute {
            let wait_secs = 60u64.saturating_sub(now.duration_since(record.minute_start).as_secs());
            return Err(RateLimitError::TooManyDrawsPerMinute(wait_secs));
        }

        if record.hour_count >= self.per_hour {
            let wait_secs =
                3600u64.saturating_sub(now.duration_since(record.hour_start).as_secs());
            return Err(RateLimitError::TooManyDrawsPerHour(wait_secs));
        }

        record.minute_count += 1;
        record.hour_count += 1;

        Ok(())
    }

    fn maybe_cleanup(&self, now: Instant) {
        let Ok(mut last_cleanup) = self.last_cleanup.lock() else {
            return;
        };
        if now.duration_since(*last_cleanup) > Duration::from_secs(CLEANUP_INTERVAL_SECS) {
            self.draws
                .retain(|_, record| now.duration_since(record.hour_start) < Duration::from_secs(3600));
            *last_cleanup = now;
        }
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RateLimitError {
    #[error("minute draw quota exceeded, retry in {0}s")]
    TooManyDrawsPerMinute(u64),
    #[error("hourly draw quota exceeded, retry in {0}s")]
    TooManyDrawsPerHour(u64),
}

impl RateLimitError {
    pub fn message_fr(&self) -> String {
        match self {
            Self::TooManyDrawsPerMinute(secs) => {
                format!("Trop de tirages ! Patientez {} secondes.", secs)
            }
            Self::TooManyDrawsPerHour(secs) => {
                format!(
                    "Limite horaire de tirages atteinte. Patientez {} minutes.",
                    secs.div_ceil(60)
                )
            }
        }
    }
}

impl From<RateLimitError> for AppError {
    fn from(e: RateLimitError) -> Self {
        AppError::RateLimited(e.message_fr())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    const CLIENT: IpAddr = IpAddr::V4(Ipv4Addr::new(203, 0, 113, 7));

    #[test]
    fn test_minute_window_blocks_then_resets() {
        let limiter = RateLimiter::with_limits(2, 100);
        let start = Instant::now();

        assert!(limiter.check_at(CLIENT, start).is_ok());
        assert!(limiter.check_at(CLIENT, start).is_ok());
        assert!(matches!(
            limiter.check_at(CLIENT, start + Duration::from_secs(10)),
            Err(RateLimitError::TooManyDrawsPerMinute(50))
        ));
        assert!(limiter
            .check_at(CLIENT, start + Duration::from_secs(61))
            .is_ok());
    }

    #[test]
    fn test_hour_window() {
        let limiter = RateLimiter::with_limits(100, 3);
        let start = Instant::now();
        for i in 0..3 {
            assert!(limiter
                .check_at(CLIENT, start + Duration::from_secs(i * 70))
                .is_ok());
        }
        assert!(matches!(
            limiter.check_at(CLIENT, start + Duration::from_secs(300)),
            Err(RateLimitError::TooManyDrawsPerHour(_))
        ));
    }

    #[test]
    fn test_clients_are_independent() {
        let limiter = RateLimiter::with_limits(1, 10);
        let other = IpAddr::V4(Ipv4Addr::LOCALHOST);
        assert!(limiter.check_rate_limit(CLIENT).is_ok());
        assert!(limiter.check_rate_limit(CLIENT).is_err());
        assert!(limiter.check_rate_limit(other).is_ok());
    }

    #[test]
    fn test_converts_to_rate_limited_error() {
        let err: AppError = RateLimitError::TooManyDrawsPerHour(90).into();
        assert_eq!(
            err,
            AppError::RateLimited("Limite horaire de tirages atteinte. Patientez 2 minutes.".into())
        );
    }
}
