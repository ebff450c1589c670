// Clock Port (for testability)

use chrono::NaiveDate;

/// Clock interface (allows fixed dates in tests).
///
/// Services read `today()` exactly once per operation and thread the date
/// through classification, so a batch never straddles a day boundary.
pub trait Clock: Send + Sync {
    /// Current calendar date (UTC)
    fn today(&self) -> NaiveDate;

    /// Get current time in milliseconds since epoch
    fn now_millis(&self) -> i64;
}

/// System clock (production)
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        chrono::Utc::now().date_naive()
    }

    fn now_millis(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}
