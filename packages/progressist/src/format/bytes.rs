use super::FormatSpec;

const UNITS: [&str; 8] = ["KiB", "MiB", "GiB", "TiB", "PiB", "EiB", "ZiB", "YiB"];

/// Scale a byte count to the first binary unit where it is below 1024.
///
/// The smallest unit is `KiB`, so `12` becomes `(0.01171875, "KiB")`.
/// Anything beyond `YiB` stays in `YiB`.
///
/// ```rust
/// assert_eq!(progressist::scale_bytes(1536.0), (1.5, "KiB"));
/// ```
pub fn scale_bytes(bytes: f64) -> (f64, &'static str) {
    let mut size = bytes;
    for unit in &UNITS[..UNITS.len() - 1] {
        size /= 1024.0;
        if size.abs() < 1024.0 {
            return (size, unit);
        }
    }
    (size / 1024.0, UNITS[UNITS.len() - 1])
}

/// Format the value for the `B` suffix. `spec` is everything before the `B`,
/// applied to the scaled number as a fixed point format
pub(crate) fn format_bytes(bytes: f64, spec: &str) -> Result<String, String> {
    let mut spec = FormatSpec::parse(spec)?;
    if spec.kind.is_some() {
        return Err("the byte size format cannot be combined with a type".to_string());
    }
    spec.kind = Some('f');
    spec.precision = Some(spec.precision.unwrap_or(1));
    let (value, unit) = scale_bytes(bytes.trunc());
    let number = spec.format_number(value)?;
    Ok(format!("{number} {unit}"))
}
