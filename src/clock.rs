//! Time source seam.
//!
//! The middleware stamps every log line with "now". In production that is
//! the system wall clock; in tests it is whatever instant you hand it —
//! a frozen [`DateTime<Utc>`] is itself a [`Clock`].

use chrono::{DateTime, Utc};

/// A source of the current time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// The system wall clock. The default when no clock is configured.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A frozen instant is a clock that always reads that instant.
///
/// ```rust
/// use chrono::{TimeZone, Utc};
/// use traza::Clock;
///
/// let frozen = Utc.with_ymd_and_hms(2015, 4, 1, 16, 42, 23).unwrap();
/// assert_eq!(frozen.now(), frozen);
/// ```
impl Clock for DateTime<Utc> {
    fn now(&self) -> DateTime<Utc> {
        *self
    }
}
