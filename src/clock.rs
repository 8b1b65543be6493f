//! Seeds derived from wall-clock time.
//!
//! The daily seed counts whole periods since a fixed epoch, so everyone playing during
//! the same period gets the same puzzle. Practice seeds are the creation time in
//! milliseconds.

use chrono::{DateTime, Duration, TimeZone, Utc};

/// Start of puzzle #0.
pub fn default_epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2022, 1, 24, 0, 0, 0)
        .single()
        .unwrap_or_default()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyClock {
    epoch: DateTime<Utc>,
    period: Duration,
}

impl Default for DailyClock {
    fn default() -> Self {
        Self::new(default_epoch(), Duration::days(1))
    }
}

impl DailyClock {
    /// A non-positive `period` is replaced with one day.
    pub fn new(epoch: DateTime<Utc>, period: Duration) -> Self {
        let period = if period > Duration::zero() {
            period
        } else {
            Duration::days(1)
        };
        Self { epoch, period }
    }

    pub fn epoch(&self) -> DateTime<Utc> {
        self.epoch
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Whole periods elapsed between the epoch and `now`, rounded down.
    pub fn seed_at(&self, now: DateTime<Utc>) -> i64 {
        let elapsed = (now - self.epoch).num_milliseconds();
        elapsed.div_euclid(self.period.num_milliseconds())
    }

    /// When the puzzle after `seed` becomes current.
    pub fn next_rollover(&self, seed: i64) -> DateTime<Utc> {
        let millis = (seed + 1).saturating_mul(self.period.num_milliseconds());
        self.epoch + Duration::milliseconds(millis)
    }

    /// Time left until the next puzzle, never negative.
    pub fn time_until_next(&self, seed: i64, now: DateTime<Utc>) -> Duration {
        (self.next_rollover(seed) - now).max(Duration::zero())
    }

    pub fn is_stale(&self, seed: i64, now: DateTime<Utc>) -> bool {
        self.seed_at(now) != seed
    }
}

pub fn practice_seed(now: DateTime<Utc>) -> i64 {
    now.timestamp_millis()
}

/// Renders a countdown as `HH:MM:SS`.
pub fn format_countdown(remaining: Duration) -> String {
    let total = remaining.num_seconds().max(0);
    format!("{:02}:{:02}:{:02}", total / 3600, total % 3600 / 60, total % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
    }

    #[test]
    fn test_seed_counts_whole_days() {
        let clock = DailyClock::default();
        assert_eq!(clock.seed_at(at(2022, 1, 24, 0, 0, 0)), 0);
        assert_eq!(clock.seed_at(at(2022, 1, 24, 23, 59, 59)), 0);
        assert_eq!(clock.seed_at(at(2022, 1, 25, 0, 0, 0)), 1);
        assert_eq!(clock.seed_at(at(2023, 1, 24, 12, 0, 0)), 365);
    }

    #[test]
    fn test_seed_before_epoch_rounds_down() {
        let clock = DailyClock::default();
        assert_eq!(clock.seed_at(at(2022, 1, 23, 12, 0, 0)), -1);
    }

    #[test]
    fn test_custom_period() {
        let clock = DailyClock::new(at(2024, 1, 1, 0, 0, 0), Duration::seconds(5));
        assert_eq!(clock.seed_at(at(2024, 1, 1, 0, 0, 4)), 0);
        assert_eq!(clock.seed_at(at(2024, 1, 1, 0, 0, 5)), 1);
        assert_eq!(clock.seed_at(at(2024, 1, 1, 0, 1, 0)), 12);
    }

    #[test]
    fn test_non_positive_period_falls_back_to_a_day() {
        let clock = DailyClock::new(default_epoch(), Duration::zero());
        assert_eq!(clock.period(), Duration::days(1));
    }

    #[test]
    fn test_rollover_and_countdown() {
        let clock = DailyClock::default();
        let now = at(2022, 1, 26, 18, 30, 0);
        let seed = clock.seed_at(now);
        assert_eq!(seed, 2);
        assert_eq!(clock.next_rollover(seed), at(2022, 1, 27, 0, 0, 0));
        let remaining = clock.time_until_next(seed, now);
        assert_eq!(remaining, Duration::hours(5) + Duration::minutes(30));
        assert_eq!(format_countdown(remaining), "05:30:00");
        assert_eq!(clock.time_until_next(0, now), Duration::zero());
    }

    #[test]
    fn test_staleness() {
        let clock = DailyClock::default();
        let now = at(2022, 2, 1, 9, 0, 0);
        let seed = clock.seed_at(now);
        assert!(!clock.is_stale(seed, now));
        assert!(clock.is_stale(seed, now + Duration::days(1)));
    }

    #[test]
    fn test_practice_seed_is_millis() {
        let now = at(2024, 5, 1, 0, 0, 0);
        assert_eq!(practice_seed(now), now.timestamp_millis());
        assert_ne!(practice_seed(now), practice_seed(now + Duration::milliseconds(1)));
    }
}
