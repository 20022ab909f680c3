use std::fmt;

use chrono::{DateTime, Local};

const SECS_PER_DAY: i64 = 86_400;

/// A resolved template field.
///
/// Each kind carries its own default rendering, which is used when the
/// placeholder has no format spec (`{percent}` renders `42.00%`). An explicit
/// spec replaces the default, see [`format_field`](crate::format_field).
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A unit count. Rendered as an integer when whole (`50`), otherwise as
    /// the shortest decimal (`78.2134`)
    Count(f64),
    /// A rate or ratio, rendered with 2 decimals by default
    Float(f64),
    /// A fraction in `[0, 1]`, rendered as a percentage with 2 decimals by default
    Percent(f64),
    /// A number of seconds, rendered as `H:MM:SS` by default
    Duration(i64),
    /// A point in time. `from_now` is the distance in seconds from the
    /// moment of the render, which decides if the date is shown by default
    Timestamp { at: DateTime<Local>, from_now: i64 },
    /// Plain text
    Text(String),
}

impl Value {
    /// Get the numeric value, if this value is numeric or is text that
    /// parses as a number
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Count(x) | Self::Float(x) | Self::Percent(x) => Some(*x),
            Self::Duration(secs) => Some(*secs as f64),
            Self::Timestamp { .. } => None,
            Self::Text(s) => s.trim().parse().ok(),
        }
    }

    /// Get the text, if this is a text value
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Count(x) => write!(f, "{x}"),
            Self::Float(x) => write!(f, "{x:.2}"),
            Self::Percent(x) => write!(f, "{:.2}%", x * 100.0),
            Self::Duration(secs) => fmt::Display::fmt(&HumanDuration(*secs), f),
            Self::Timestamp { at, from_now } => {
                if *from_now >= SECS_PER_DAY {
                    write!(f, "{}", at.format("%Y-%m-%d %H:%M:%S"))
                } else {
                    write!(f, "{}", at.format("%H:%M:%S"))
                }
            }
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// Format seconds as `H:MM:SS`, prefixed with the number of days
/// when at least one day long (`1 day, 0:00:01`)
pub struct HumanDuration(pub i64);
impl fmt::Display for HumanDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 < 0 {
            f.write_str("-")?;
        }
        let total = self.0.unsigned_abs();
        let days = total / SECS_PER_DAY as u64;
        let rem = total % SECS_PER_DAY as u64;
        let (hours, minutes, seconds) = (rem / 3600, rem % 3600 / 60, rem % 60);
        match days {
            0 => {}
            1 => f.write_str("1 day, ")?,
            n => write!(f, "{n} days, ")?,
        }
        write!(f, "{hours}:{minutes:02}:{seconds:02}")
    }
}

impl From<String> for Value {
    #[inline(always)]
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}
impl From<&str> for Value {
    #[inline(always)]
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}
impl From<char> for Value {
    #[inline(always)]
    fn from(value: char) -> Self {
        Self::Text(value.to_string())
    }
}
#[rustfmt::skip]
const _: () = {
    impl From<u8> for Value { #[inline(always)] fn from(value: u8) -> Self { Self::Count(value.into_count()) } }
    impl From<u16> for Value { #[inline(always)] fn from(value: u16) -> Self { Self::Count(value.into_count()) } }
    impl From<u32> for Value { #[inline(always)] fn from(value: u32) -> Self { Self::Count(value.into_count()) } }
    impl From<u64> for Value { #[inline(always)] fn from(value: u64) -> Self { Self::Count(value.into_count()) } }
    impl From<usize> for Value { #[inline(always)] fn from(value: usize) -> Self { Self::Count(value.into_count()) } }
    impl From<i32> for Value { #[inline(always)] fn from(value: i32) -> Self { Self::Count(value.into_count()) } }
    impl From<i64> for Value { #[inline(always)] fn from(value: i64) -> Self { Self::Count(value.into_count()) } }
    impl From<f32> for Value { #[inline(always)] fn from(value: f32) -> Self { Self::Count(value.into_count()) } }
    impl From<f64> for Value { #[inline(always)] fn from(value: f64) -> Self { Self::Count(value) } }
};

/// Numeric types that can be used as a progress count
pub trait IntoCount {
    fn into_count(self) -> f64;
}
#[rustfmt::skip]
const _: () = {
    impl IntoCount for u8 { #[inline(always)] fn into_count(self) -> f64 { self as f64 } }
    impl IntoCount for u16 { #[inline(always)] fn into_count(self) -> f64 { self as f64 } }
    impl IntoCount for u32 { #[inline(always)] fn into_count(self) -> f64 { self as f64 } }
    impl IntoCount for u64 { #[inline(always)] fn into_count(self) -> f64 { self as f64 } }
    impl IntoCount for usize { #[inline(always)] fn into_count(self) -> f64 { self as f64 } }
    impl IntoCount for i32 { #[inline(always)] fn into_count(self) -> f64 { self as f64 } }
    impl IntoCount for i64 { #[inline(always)] fn into_count(self) -> f64 { self as f64 } }
    impl IntoCount for f32 { #[inline(always)] fn into_count(self) -> f64 { self as f64 } }
    impl IntoCount for f64 { #[inline(always)] fn into_count(self) -> f64 { self } }
};
