use std::io::{Stdout, Write};

use chrono::{DateTime, Local};

use crate::bar::State;
use crate::{
    Animation, Clock, Error, FieldRegistry, Frame, IntoCount, ProgressBar, Result, SystemClock,
    Template, Throttle, Value, term_width_or_default,
};

/// Make a progress bar builder with the prefix, and these defaults:
///
/// - Total: unknown (`0`)
/// - Template: `{prefix} {animation} {percent} ({done}/{total})`
/// - Animation: [`Animation::Bar`] with `=` and ` `
/// - Spinner steps: `- \ | /`
/// - Throttle: off
/// - Columns: the terminal width, or 80
///
/// See [`ProgressBarBuilder`] for builder methods
///
/// ```rust,no_run
/// let mut bar = progressist::progress("Copying:").total(20).build()?;
/// for _ in 0..20 {
///     bar.tick()?;
/// }
/// # Ok::<(), progressist::Error>(())
/// ```
#[inline(always)]
pub fn progress(prefix: impl Into<String>) -> ProgressBarBuilder {
    ProgressBarBuilder::new().prefix(prefix)
}

pub const DEFAULT_TEMPLATE: &str = "{prefix} {animation} {percent} ({done}/{total})";
pub const DEFAULT_STEPS: [char; 4] = ['-', '\\', '|', '/'];

/// Builder for a progress bar
pub struct ProgressBarBuilder {
    prefix: String,
    /// 0 means unknown
    total: f64,
    done_char: char,
    remain_char: char,
    steps: Vec<char>,
    template: String,
    outro: String,
    animation: Animation,
    invisible_chars: usize,
    throttle: Throttle,
    start: Option<DateTime<Local>>,
    /// None means query the terminal
    columns: Option<usize>,
    clock: Option<Box<dyn Clock>>,
    fields: FieldRegistry,
}

impl Default for ProgressBarBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressBarBuilder {
    /// Start building a progress bar. Note [`progressist::progress`](progress) is the canonical shorthand
    pub fn new() -> Self {
        Self {
            prefix: "Progress:".to_string(),
            total: 0.0,
            done_char: '=',
            remain_char: ' ',
            steps: DEFAULT_STEPS.to_vec(),
            template: DEFAULT_TEMPLATE.to_string(),
            outro: "\n".to_string(),
            animation: Animation::Bar,
            invisible_chars: 1,
            throttle: Throttle::Off,
            start: None,
            columns: None,
            clock: None,
            fields: FieldRegistry::with_builtins(),
        }
    }

    /// Set the text of the `{prefix}` field
    #[inline(always)]
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Set the total. `0` means the total is unknown, in which case the bar
    /// stays empty; spinners and streams work best for that.
    ///
    /// ```rust
    /// progressist::progress("Download:").total(197739688u64);
    /// ```
    #[inline(always)]
    pub fn total<T: IntoCount>(mut self, total: T) -> Self {
        self.total = total.into_count();
        self
    }

    /// Glyph for the done part of the bar
    #[inline(always)]
    pub fn done_char(mut self, c: char) -> Self {
        self.done_char = c;
        self
    }

    /// Glyph for the remaining part of the bar
    #[inline(always)]
    pub fn remain_char(mut self, c: char) -> Self {
        self.remain_char = c;
        self
    }

    /// Glyphs for the spinner and stream animations
    ///
    /// ```rust
    /// progressist::progress("Waiting").steps("▁▂▃▄▅▆▇█".chars());
    /// ```
    #[inline(always)]
    pub fn steps(mut self, steps: impl IntoIterator<Item = char>) -> Self {
        self.steps = steps.into_iter().collect();
        self
    }

    /// Set the template of the line. A `\r` is added in front if missing.
    ///
    /// `{animation}` is where the bar, spinner or stream goes. The other
    /// placeholders are the fields, see [`FieldRegistry::with_builtins`].
    #[inline(always)]
    pub fn template(mut self, template: impl Into<String>) -> Self {
        self.template = template.into();
        self
    }

    /// Set the template written once when the progress finishes. Default is a new line
    #[inline(always)]
    pub fn outro(mut self, outro: impl Into<String>) -> Self {
        self.outro = outro.into();
        self
    }

    /// Set what is drawn in the `{animation}` slot
    #[inline(always)]
    pub fn animation(mut self, animation: Animation) -> Self {
        self.animation = animation;
        self
    }

    /// Number of chars in the template that take no room on screen, like the
    /// leading `\r` (the default of 1) or color escapes.
    ///
    /// ```rust
    /// // "\r" + "\x1b[34m" + "\x1b[39m"
    /// progressist::progress("").template("\r\x1b[34mBlue: {animation}\x1b[39m").invisible_chars(11);
    /// ```
    #[inline(always)]
    pub fn invisible_chars(mut self, n: usize) -> Self {
        self.invisible_chars = n;
        self
    }

    /// Skip renders to limit the output
    ///
    /// ```rust
    /// use std::time::Duration;
    /// progressist::progress("").throttle(5);                        // every 5 units
    /// progressist::progress("").throttle(0.01);                     // every 1% of the total
    /// progressist::progress("").throttle(Duration::from_secs(1));   // every second
    /// ```
    #[inline(always)]
    pub fn throttle(mut self, throttle: impl Into<Throttle>) -> Self {
        self.throttle = throttle.into();
        self
    }

    /// Set when the progress started, to resume a task
    #[inline(always)]
    pub fn start(mut self, start: DateTime<Local>) -> Self {
        self.start = Some(start);
        self
    }

    /// Set the width of the line instead of querying the terminal
    #[inline(always)]
    pub fn columns(mut self, columns: usize) -> Self {
        self.columns = Some(columns);
        self
    }

    /// Set the clock, [`SystemClock`] by default
    #[inline(always)]
    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Some(Box::new(clock));
        self
    }

    /// Add a field for the templates, or replace a builtin one
    ///
    /// ```rust
    /// use progressist::Value;
    /// progressist::progress("Jobs:")
    ///     .template("{prefix} {animation} {pid}")
    ///     .field("pid", |_| Value::from(std::process::id()));
    /// ```
    #[inline(always)]
    pub fn field<F>(mut self, name: impl Into<String>, accessor: F) -> Self
    where
        F: Fn(&Frame<'_>) -> Value + Send + Sync + 'static,
    {
        self.fields.register(name, accessor);
        self
    }

    /// Build a bar printing to stdout
    #[inline(always)]
    pub fn build(self) -> Result<ProgressBar<Stdout>> {
        self.build_with(std::io::stdout())
    }

    /// Build a bar printing to the writer
    pub fn build_with<W: Write>(self, out: W) -> Result<ProgressBar<W>> {
        self.throttle.validate()?;
        if self.steps.is_empty() {
            return Err(Error::config("spinner steps cannot be empty"));
        }
        let template = if self.template.starts_with('\r') {
            Template::parse(&self.template)?
        } else {
            Template::parse(&format!("\r{}", self.template))?
        };
        let outro = Template::parse(&self.outro)?;
        let columns = match self.columns {
            Some(columns) => columns,
            None => term_width_or_default(),
        };
        let config = BarConfig {
            prefix: self.prefix,
            done_char: self.done_char,
            remain_char: self.remain_char,
            steps: self.steps,
            template,
            outro,
            animation: self.animation,
            invisible_chars: self.invisible_chars,
            columns,
            fields: self.fields,
        };
        let state = State::new(self.total, self.start, self.throttle);
        let clock = self.clock.unwrap_or_else(|| Box::new(SystemClock));
        Ok(ProgressBar::new(config, state, clock, out))
    }
}

/// Configuration of a bar, fixed once it is built
#[derive(Debug)]
pub struct BarConfig {
    prefix: String,
    done_char: char,
    remain_char: char,
    steps: Vec<char>,
    template: Template,
    outro: Template,
    animation: Animation,
    invisible_chars: usize,
    columns: usize,
    fields: FieldRegistry,
}

impl BarConfig {
    #[inline(always)]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }
    #[inline(always)]
    pub fn done_char(&self) -> char {
        self.done_char
    }
    #[inline(always)]
    pub fn remain_char(&self) -> char {
        self.remain_char
    }
    #[inline(always)]
    pub fn steps(&self) -> &[char] {
        &self.steps
    }
    /// The line template, always starting with `\r`
    #[inline(always)]
    pub fn template(&self) -> &Template {
        &self.template
    }
    #[inline(always)]
    pub fn outro(&self) -> &Template {
        &self.outro
    }
    #[inline(always)]
    pub fn animation(&self) -> &Animation {
        &self.animation
    }
    #[inline(always)]
    pub fn invisible_chars(&self) -> usize {
        self.invisible_chars
    }
    /// Width of the line
    #[inline(always)]
    pub fn columns(&self) -> usize {
        self.columns
    }
    #[inline(always)]
    pub fn fields(&self) -> &FieldRegistry {
        &self.fields
    }
}
