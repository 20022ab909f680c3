use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::{Error, Frame};

/// Renderer for [`Animation::Custom`]: takes the frame and the width of the slot
pub type AnimationFn = Arc<dyn Fn(&Frame<'_>, usize) -> String + Send + Sync>;

/// What is drawn in the `{animation}` slot of the template
#[derive(Clone, Default)]
pub enum Animation {
    /// Fill bar, `=` for done and ` ` for remaining by default
    #[default]
    Bar,
    /// A single glyph cycling through the steps, one step per frame
    Spinner,
    /// The steps tiled over the whole slot, shifting one step per frame
    Stream,
    /// Anything else
    Custom(AnimationFn),
}

impl Animation {
    /// Make a custom animation
    ///
    /// ```rust
    /// use progressist::Animation;
    /// // a bar filling from the right
    /// let reverse = Animation::custom(|frame, width| {
    ///     let done = (frame.metrics.fraction * width as f64) as usize;
    ///     " ".repeat(width - done) + &"=".repeat(done)
    /// });
    /// ```
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&Frame<'_>, usize) -> String + Send + Sync + 'static,
    {
        Self::Custom(Arc::new(f))
    }

    /// Render the animation with the given width
    pub fn render(&self, frame: &Frame<'_>, width: usize) -> String {
        let config = frame.config;
        match self {
            Self::Bar => bar(
                frame.metrics.fraction,
                width,
                config.done_char(),
                config.remain_char(),
            ),
            Self::Spinner => spinner(config.steps(), frame.prints),
            Self::Stream => stream(config.steps(), frame.prints, width),
            Self::Custom(f) => f(frame, width),
        }
    }
}

impl fmt::Debug for Animation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bar => f.write_str("Bar"),
            Self::Spinner => f.write_str("Spinner"),
            Self::Stream => f.write_str("Stream"),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

impl FromStr for Animation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bar" | "progress" => Ok(Self::Bar),
            "spinner" => Ok(Self::Spinner),
            "stream" => Ok(Self::Stream),
            other => Err(Error::config(format!("unknown animation '{other}'"))),
        }
    }
}

/// `floor(fraction * width)` done chars, the rest remain chars
pub fn bar(fraction: f64, width: usize, done_char: char, remain_char: char) -> String {
    if width == 0 {
        return String::new();
    }
    let done = ((fraction.clamp(0.0, 1.0) * width as f64) as usize).min(width);
    let mut out = String::with_capacity(width);
    out.extend(std::iter::repeat_n(done_char, done));
    out.extend(std::iter::repeat_n(remain_char, width - done));
    out
}

/// The step for the frame
pub fn spinner(steps: &[char], prints: u64) -> String {
    if steps.is_empty() {
        return String::new();
    }
    let i = (prints % steps.len() as u64) as usize;
    steps[i].to_string()
}

/// The steps repeated over `width`, starting at the frame offset
pub fn stream(steps: &[char], prints: u64, width: usize) -> String {
    if steps.is_empty() {
        return String::new();
    }
    let offset = (prints % steps.len() as u64) as usize;
    steps.iter().cycle().skip(offset).take(width).collect()
}
