use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;

use chrono::{DateTime, Local};

/// Source of the current time for the bar
pub trait Clock: Send {
    fn now(&self) -> DateTime<Local>;
}

/// The system wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;
impl Clock for SystemClock {
    #[inline(always)]
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// A clock that only moves when told to.
///
/// Clones share the same time, so a test can keep one handle
/// and give the other to the bar.
///
/// `Acquire` ordering is used for load and `Release` ordering is used for store.
///
/// ```rust
/// use std::time::Duration;
/// use progressist::{Clock, ManualClock};
///
/// let clock = ManualClock::new(chrono::Local::now());
/// let handle = clock.clone();
/// let before = clock.now();
/// handle.advance(Duration::from_secs(3));
/// assert_eq!((clock.now() - before).num_seconds(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct ManualClock(Arc<AtomicI64>);
impl ManualClock {
    pub fn new(at: DateTime<Local>) -> Self {
        Self(Arc::new(AtomicI64::new(at.timestamp_micros())))
    }
    /// Jump to a point in time
    pub fn set(&self, at: DateTime<Local>) {
        self.0.store(at.timestamp_micros(), Ordering::Release)
    }
    /// Move forward
    pub fn advance(&self, by: Duration) {
        let micros = i64::try_from(by.as_micros()).unwrap_or(i64::MAX);
        let _ = self
            .0
            .fetch_update(Ordering::Release, Ordering::Acquire, |x| {
                Some(x.saturating_add(micros))
            });
    }
}
impl Clock for ManualClock {
    fn now(&self) -> DateTime<Local> {
        let micros = self.0.load(Ordering::Acquire);
        DateTime::from_timestamp_micros(micros)
            .unwrap_or_default()
            .with_timezone(&Local)
    }
}
