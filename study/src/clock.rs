//! Injected notion of "now".
//!
//! All date-dependent rules (due dates, streaks, today counts) read the
//! current time through a [`Clock`] so callers can pin "today".

use chrono::{DateTime, FixedOffset, Local, NaiveDate};
use std::sync::RwLock;

pub trait Clock: Send + Sync {
    /// Current instant, carrying the user's local offset.
    fn now(&self) -> DateTime<FixedOffset>;

    /// Current local calendar date.
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// Wall clock in the machine's local timezone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Local::now().fixed_offset()
    }
}

/// Clock frozen at a settable instant.
#[derive(Debug)]
pub struct FixedClock {
    now: RwLock<DateTime<FixedOffset>>,
}

impl FixedClock {
    pub fn new(now: DateTime<FixedOffset>) -> Self {
        Self {
            now: RwLock::new(now),
        }
    }

    /// Move the clock to a new instant.
    pub fn set(&self, now: DateTime<FixedOffset>) {
        match self.now.write() {
            Ok(mut guard) => *guard = now,
            Err(poisoned) => *poisoned.into_inner() = now,
        }
    }

    /// Advance the clock by whole days.
    pub fn advance_days(&self, days: i64) {
        let next = self.now() + chrono::Duration::days(days);
        self.set(next);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        match self.now.read() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_fixed_clock_today_uses_its_offset() {
        // 23:30 at UTC-03:00 is already the next day in UTC
        let offset = FixedOffset::west_opt(3 * 3600).unwrap();
        let clock = FixedClock::new(offset.with_ymd_and_hms(2024, 1, 3, 23, 30, 0).unwrap());
        assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2024, 1, 3).unwrap());
    }

    #[test]
    fn test_fixed_clock_advance() {
        let offset = FixedOffset::east_opt(0).unwrap();
        let clock = FixedClock::new(offset.with_ymd_and_hms(2024, 1, 31, 12, 0, 0).unwrap());
        clock.advance_days(1);
        assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
    }
}
