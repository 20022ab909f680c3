use chrono::{DateTime, Local, TimeDelta};

/// Derived metrics, computed on every render that is not throttled
#[derive(Debug, Clone, PartialEq)]
pub struct Metrics {
    /// `done / total`, in `[0, 1]`. `0` when the total is unknown
    pub fraction: f64,
    /// `total - done`
    pub remaining: f64,
    /// Progress made since the bar started, `done - supply`
    pub addition: f64,
    /// Whole seconds since start
    pub elapsed: i64,
    /// Average seconds per unit, `0` before any progress
    pub avg: f64,
    /// Estimated whole seconds left
    pub tta: i64,
    /// Time of the render
    pub now: DateTime<Local>,
}

impl Metrics {
    /// Metrics of a bar that has not rendered yet
    pub fn empty(now: DateTime<Local>) -> Self {
        Self {
            fraction: 0.0,
            remaining: 0.0,
            addition: 0.0,
            elapsed: 0,
            avg: 0.0,
            tta: 0,
            now,
        }
    }

    pub fn compute(
        done: f64,
        total: f64,
        supply: f64,
        start: DateTime<Local>,
        now: DateTime<Local>,
    ) -> Self {
        let remaining = total - done;
        let addition = done - supply;
        let fraction = if total > 0.0 {
            (done / total).clamp(0.0, 1.0)
        } else {
            0.0
        };
        let elapsed = (now - start).num_seconds();
        let (avg, tta) = if addition != 0.0 {
            // same as remaining * avg, without the rounding error of avg
            let tta = remaining * elapsed as f64 / addition;
            (elapsed as f64 / addition, tta as i64)
        } else {
            (0.0, 0)
        };
        Self {
            fraction,
            remaining,
            addition,
            elapsed,
            avg,
            tta,
            now,
        }
    }

    /// Units per second
    pub fn speed(&self) -> f64 {
        if self.avg != 0.0 { 1.0 / self.avg } else { 0.0 }
    }

    /// Estimated time of arrival, `now + tta`
    pub fn eta(&self) -> DateTime<Local> {
        TimeDelta::try_seconds(self.tta)
            .and_then(|tta| self.now.checked_add_signed(tta))
            .unwrap_or(self.now)
    }
}
