use std::str::FromStr;
use std::time::Duration;

use chrono::{DateTime, Local, TimeDelta};

use crate::{Error, Result};

/// Policy to skip renders, to limit how often the line is written.
///
/// The render that reaches the total is never skipped.
///
/// ```rust
/// use std::time::Duration;
/// use progressist::Throttle;
///
/// assert_eq!("5".parse::<Throttle>().unwrap(), Throttle::Steps(5));
/// assert_eq!("0.1".parse::<Throttle>().unwrap(), Throttle::Fraction(0.1));
/// assert_eq!("500ms".parse::<Throttle>().unwrap(), Throttle::Interval(Duration::from_millis(500)));
/// assert!("1.5".parse::<Throttle>().is_err());
/// assert!("often".parse::<Throttle>().is_err());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum Throttle {
    /// Render on every update
    #[default]
    Off,
    /// Render when `done` moved by at least this many units since the last render
    Steps(u64),
    /// Like `Steps`, with the step being this fraction of the total (at least 1).
    /// Must be in `(0, 1]`
    Fraction(f64),
    /// Render at most once per interval
    Interval(Duration),
}

impl Throttle {
    /// Make a fraction throttle, checking that it is in `(0, 1]`
    pub fn fraction(x: f64) -> Result<Self> {
        let throttle = Self::Fraction(x);
        throttle.validate()?;
        Ok(throttle)
    }

    /// Check the throttle is usable
    pub fn validate(&self) -> Result<()> {
        if let Self::Fraction(x) = self
            && !(*x > 0.0 && *x <= 1.0)
        {
            return Err(Error::config(format!(
                "fraction throttle must be between 0 and 1.0, got {x}"
            )));
        }
        Ok(())
    }

    /// If this throttle can skip renders
    pub fn is_active(&self) -> bool {
        !matches!(self, Self::Off | Self::Steps(0))
    }

    /// Decide if a render may proceed, updating the checkpoint if so
    pub(crate) fn allows(
        &self,
        checkpoint: &mut Checkpoint,
        done: f64,
        total: f64,
        now: DateTime<Local>,
    ) -> bool {
        let is_last = total > 0.0 && done >= total;
        match *self {
            Self::Off | Self::Steps(0) => true,
            Self::Steps(_) | Self::Fraction(_) => {
                let step = match *self {
                    Self::Fraction(x) => (total * x).max(1.0),
                    Self::Steps(n) => n as f64,
                    _ => 1.0,
                };
                if done < checkpoint.done + step && !is_last {
                    return false;
                }
                checkpoint.done = done;
                true
            }
            Self::Interval(interval) => {
                if let Some(last) = checkpoint.time {
                    let interval = TimeDelta::from_std(interval).unwrap_or(TimeDelta::MAX);
                    let next = last.checked_add_signed(interval);
                    if !is_last && next.is_none_or(|next| now < next) {
                        return false;
                    }
                }
                checkpoint.time = Some(now);
                true
            }
        }
    }
}

/// Where the last render that went through happened
#[derive(Debug, Clone, Default)]
pub(crate) struct Checkpoint {
    done: f64,
    time: Option<DateTime<Local>>,
}

impl From<u64> for Throttle {
    #[inline(always)]
    fn from(value: u64) -> Self {
        Self::Steps(value)
    }
}
impl From<u32> for Throttle {
    #[inline(always)]
    fn from(value: u32) -> Self {
        Self::Steps(value.into())
    }
}
/// For integer literals. Negative counts turn throttling off
impl From<i32> for Throttle {
    #[inline(always)]
    fn from(value: i32) -> Self {
        Self::Steps(u64::try_from(value).unwrap_or(0))
    }
}
impl From<usize> for Throttle {
    #[inline(always)]
    fn from(value: usize) -> Self {
        Self::Steps(value as u64)
    }
}
impl From<f64> for Throttle {
    #[inline(always)]
    fn from(value: f64) -> Self {
        Self::Fraction(value)
    }
}
impl From<Duration> for Throttle {
    #[inline(always)]
    fn from(value: Duration) -> Self {
        Self::Interval(value)
    }
}

impl FromStr for Throttle {
    type Err = Error;

    /// Parse `off`, a step count (`5`), a fraction (`0.25`), or an interval
    /// with a `ms`, `s`, `m` or `h` suffix (`500ms`, `2s`)
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("off") {
            return Ok(Self::Off);
        }
        if let Ok(steps) = s.parse::<u64>() {
            return Ok(Self::Steps(steps));
        }
        if s.starts_with(|c: char| c.is_ascii_digit() || c == '.') {
            let unit_at = s
                .find(|c: char| !(c.is_ascii_digit() || c == '.'))
                .unwrap_or(s.len());
            let (number, unit) = s.split_at(unit_at);
            if let Ok(x) = number.parse::<f64>() {
                let secs = match unit {
                    "" => return Self::fraction(x),
                    "ms" => Some(x / 1000.0),
                    "s" => Some(x),
                    "m" => Some(x * 60.0),
                    "h" => Some(x * 3600.0),
                    _ => None,
                };
                if let Some(secs) = secs
                    && let Ok(interval) = Duration::try_from_secs_f64(secs)
                {
                    return Ok(Self::Interval(interval));
                }
            }
        }
        Err(Error::config(format!("invalid throttle '{s}'")))
    }
}
