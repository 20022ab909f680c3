//! Formatting of template fields.
//!
//! A placeholder spec is dispatched on its suffix first:
//! - `B`: byte size in binary units (`{done:B}` → `104.7 MiB`, `{done:.2B}` → `104.74 MiB`).
//!   The value must be numeric.
//! - `D`: forced integer (`12.0` → `12`). Values that are not numeric pass through.
//!   Fill, alignment and width before the `D` apply, the precision is ignored.
//! - anything else is the standard mini-language, see [`FormatSpec`].
//!
//! Timestamps take a `strftime` pattern instead (`{eta:%H:%M}`).
use std::fmt::Write as _;

use crate::Value;

mod spec;
pub use spec::{Align, FormatSpec, Sign};
mod bytes;
pub use bytes::scale_bytes;

/// Format a field value with a spec, which may be empty.
///
/// Returns an error message if the spec is invalid for the value.
///
/// ```rust
/// use progressist::{Value, format_field};
/// assert_eq!(format_field(&Value::Count(1098.0), "B").unwrap(), "1.1 KiB");
/// assert_eq!(format_field(&Value::Count(12.0), "D").unwrap(), "12");
/// assert_eq!(format_field(&Value::Percent(0.5), ".1%").unwrap(), "50.0%");
/// assert_eq!(format_field(&Value::Duration(3), "").unwrap(), "0:00:03");
/// assert!(format_field(&Value::from("hello"), "B").is_err());
/// ```
pub fn format_field(value: &Value, spec: &str) -> Result<String, String> {
    if spec.is_empty() {
        return Ok(value.to_string());
    }
    if let Value::Timestamp { at, .. } = value
        && spec.contains('%')
    {
        let mut out = String::new();
        return match write!(out, "{}", at.format(spec)) {
            Ok(()) => Ok(out),
            Err(_) => Err(format!("invalid time format '{spec}'")),
        };
    }
    if let Some(prefix) = spec.strip_suffix('B') {
        let Some(bytes) = value.as_f64() else {
            return Err(format!("byte size format needs a number, got '{value}'"));
        };
        return bytes::format_bytes(bytes, prefix);
    }
    if let Some(prefix) = spec.strip_suffix('D') {
        let text = match forced_int(value) {
            Some(x) => x.to_string(),
            None => value.to_string(),
        };
        // only the padding applies, a precision would cut digits
        let mut spec = FormatSpec::parse(prefix)?;
        spec.precision = None;
        return spec.format_text(&text);
    }

    let parsed = FormatSpec::parse(spec)?;
    match value {
        Value::Count(x) | Value::Float(x) | Value::Percent(x) => parsed.format_number(*x),
        Value::Duration(secs) => parsed.format_number(*secs as f64),
        Value::Timestamp { .. } => parsed.format_text(&value.to_string()),
        Value::Text(s) => match parsed.kind {
            None | Some('s') => parsed.format_text(s),
            Some(_) => match value.as_f64() {
                Some(x) => parsed.format_number(x),
                None => Err(format!("'{s}' is not a number")),
            },
        },
    }
}

/// Integer representation of the value, if it has one
fn forced_int(value: &Value) -> Option<i64> {
    match value {
        Value::Count(x) | Value::Float(x) | Value::Percent(x) => {
            x.is_finite().then_some(x.trunc() as i64)
        }
        Value::Duration(secs) => Some(*secs),
        Value::Timestamp { .. } => None,
        Value::Text(s) => s.trim().parse().ok(),
    }
}
