/// Time source for the habit store
///
/// Completion logic works on calendar days, so the store asks a `Clock` for
/// the current time instead of calling `Utc::now()` directly. Tests use
/// `FixedClock` to move between days.

use std::cell::Cell;
use chrono::{DateTime, Duration, NaiveDate, Utc};

/// Source of the current time
pub trait Clock {
    /// Current instant
    fn now(&self) -> DateTime<Utc>;

    /// Current calendar day, without a time component
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// Clock backed by the system time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock that stays at a chosen instant until told otherwise
#[derive(Debug, Clone)]
pub struct FixedClock {
    now: Cell<DateTime<Utc>>,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self { now: Cell::new(now) }
    }

    /// Clock set to midnight UTC of `date`
    pub fn at_date(date: NaiveDate) -> Self {
        Self::new(date.and_time(chrono::NaiveTime::MIN).and_utc())
    }

    /// Move the clock forward by whole days
    pub fn advance_days(&self, days: i64) {
        self.now.set(self.now.get() + Duration::days(days));
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now.get()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}
