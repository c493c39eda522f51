use chrono::{DateTime, Utc};
use chrono_tz::Tz;

/// Source of the current time, swappable in tests
pub trait Clock: Send + Sync {
    fn now_utc(&self) -> DateTime<Utc>;

    /// Current time expressed in the given timezone
    fn now(&self, zone: Tz) -> DateTime<Tz> {
        self.now_utc().with_timezone(&zone)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_utc(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
