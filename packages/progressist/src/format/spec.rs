use std::fmt::Write as _;

/// Alignment of a formatted field within its width
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    /// `<`
    Left,
    /// `>`
    Right,
    /// `^`
    Center,
    /// `=`, padding goes between the sign and the digits
    AfterSign,
}

/// Sign display for numbers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Sign {
    /// `-`, only negative numbers get a sign (default)
    #[default]
    Negative,
    /// `+`
    Always,
    /// ` `, a space for non-negative numbers
    Space,
}

/// A parsed format spec, using the mini-language
/// `[[fill]align][sign][0][width][.precision][type]`.
///
/// The supported types are `d` (integer), `f`/`F` (fixed point),
/// `e` (exponent), `%` (percentage) and `s` (string).
#[derive(Debug, Clone, PartialEq)]
pub struct FormatSpec {
    pub fill: char,
    pub align: Option<Align>,
    pub sign: Sign,
    pub zero: bool,
    pub width: usize,
    pub precision: Option<usize>,
    pub kind: Option<char>,
}

impl Default for FormatSpec {
    fn default() -> Self {
        Self {
            fill: ' ',
            align: None,
            sign: Sign::Negative,
            zero: false,
            width: 0,
            precision: None,
            kind: None,
        }
    }
}

/// Largest width or precision, the limit of `std::fmt`
const MAX_NUMBER: usize = u16::MAX as usize;

fn parse_align(c: char) -> Option<Align> {
    match c {
        '<' => Some(Align::Left),
        '>' => Some(Align::Right),
        '^' => Some(Align::Center),
        '=' => Some(Align::AfterSign),
        _ => None,
    }
}

impl FormatSpec {
    /// Parse a spec. Returns an error message if the spec is malformed
    pub fn parse(spec: &str) -> Result<Self, String> {
        let chars: Vec<char> = spec.chars().collect();
        let mut out = Self::default();
        let mut i = 0;

        if let Some(align) = chars.get(1).copied().and_then(parse_align) {
            out.fill = chars[0];
            out.align = Some(align);
            i = 2;
        } else if let Some(align) = chars.first().copied().and_then(parse_align) {
            out.align = Some(align);
            i = 1;
        }

        match chars.get(i) {
            Some('+') => {
                out.sign = Sign::Always;
                i += 1;
            }
            Some('-') => i += 1,
            Some(' ') => {
                out.sign = Sign::Space;
                i += 1;
            }
            _ => {}
        }

        if chars.get(i) == Some(&'0') {
            out.zero = true;
            i += 1;
        }

        let (width, next) = parse_number(&chars, i);
        if let Some(width) = width {
            if width > MAX_NUMBER {
                return Err(format!("width too large in '{spec}'"));
            }
            out.width = width;
        }
        i = next;

        if chars.get(i) == Some(&'.') {
            let (precision, next) = parse_number(&chars, i + 1);
            let Some(precision) = precision else {
                return Err(format!("missing precision after '.' in '{spec}'"));
            };
            if precision > MAX_NUMBER {
                return Err(format!("precision too large in '{spec}'"));
            }
            out.precision = Some(precision);
            i = next;
        }

        if let Some(&kind) = chars.get(i) {
            if !matches!(kind, 'd' | 'f' | 'F' | 'e' | '%' | 's') {
                return Err(format!("unknown format type '{kind}' in '{spec}'"));
            }
            out.kind = Some(kind);
            i += 1;
        }

        if i != chars.len() {
            return Err(format!("invalid format spec '{spec}'"));
        }
        Ok(out)
    }

    /// Format a number according to this spec.
    ///
    /// Without a type, whole numbers render as integers and others in the
    /// shortest form, unless a precision is given, which implies `f`.
    pub fn format_number(&self, value: f64) -> Result<String, String> {
        let magnitude = value.abs();
        let mut digits = String::new();
        // _: fmt for string does not fail
        let _ = match self.kind {
            Some('d') => write!(digits, "{}", magnitude.trunc()),
            Some('f' | 'F') => write!(digits, "{:.*}", self.precision.unwrap_or(6), magnitude),
            Some('%') => write!(
                digits,
                "{:.*}%",
                self.precision.unwrap_or(6),
                magnitude * 100.0
            ),
            Some('e') => {
                let raw = format!("{:.*e}", self.precision.unwrap_or(6), magnitude);
                match raw.split_once('e') {
                    Some((mantissa, exp)) => {
                        let exp: i32 = exp.parse().unwrap_or_default();
                        write!(digits, "{mantissa}e{exp:+03}")
                    }
                    None => write!(digits, "{raw}"),
                }
            }
            Some(kind) => return Err(format!("type '{kind}' is not valid for a number")),
            None => match self.precision {
                Some(precision) => write!(digits, "{magnitude:.precision$}"),
                None => write!(digits, "{magnitude}"),
            },
        };

        let sign = if value.is_sign_negative() && value != 0.0 {
            "-"
        } else {
            match self.sign {
                Sign::Negative => "",
                Sign::Always => "+",
                Sign::Space => " ",
            }
        };

        if self.zero && self.align.is_none() {
            let spec = Self {
                fill: '0',
                align: Some(Align::AfterSign),
                ..self.clone()
            };
            return Ok(spec.pad(sign, &digits, Align::Right));
        }
        Ok(self.pad(sign, &digits, Align::Right))
    }

    /// Format text according to this spec. The precision truncates
    pub fn format_text(&self, value: &str) -> Result<String, String> {
        if let Some(kind) = self.kind
            && kind != 's'
        {
            return Err(format!("type '{kind}' is not valid for text"));
        }
        if self.align == Some(Align::AfterSign) {
            return Err("'=' alignment is not allowed for text".to_string());
        }
        match self.precision {
            Some(n) => {
                let truncated: String = value.chars().take(n).collect();
                Ok(self.pad("", &truncated, Align::Left))
            }
            None => Ok(self.pad("", value, Align::Left)),
        }
    }

    /// Pad `sign` + `body` to the width, with the default alignment
    /// used when none is specified
    fn pad(&self, sign: &str, body: &str, default_align: Align) -> String {
        let len = sign.chars().count() + body.chars().count();
        let mut out = String::with_capacity(self.width.max(len));
        if len >= self.width {
            out.push_str(sign);
            out.push_str(body);
            return out;
        }
        let padding = self.width - len;
        let (before, after) = match self.align.unwrap_or(default_align) {
            Align::Left => (0, padding),
            Align::Right => (padding, 0),
            Align::Center => (padding / 2, padding - padding / 2),
            Align::AfterSign => {
                out.push_str(sign);
                out.extend(std::iter::repeat_n(self.fill, padding));
                out.push_str(body);
                return out;
            }
        };
        out.extend(std::iter::repeat_n(self.fill, before));
        out.push_str(sign);
        out.push_str(body);
        out.extend(std::iter::repeat_n(self.fill, after));
        out
    }
}

/// Parse a run of ascii digits starting at `i`
fn parse_number(chars: &[char], mut i: usize) -> (Option<usize>, usize) {
    let start = i;
    let mut n: usize = 0;
    while let Some(d) = chars.get(i).and_then(|c| c.to_digit(10)) {
        n = n.saturating_mul(10).saturating_add(d as usize);
        i += 1;
    }
    if i == start { (None, i) } else { (Some(n), i) }
}
