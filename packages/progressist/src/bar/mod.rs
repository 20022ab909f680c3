//! # Progress Bar
//!
//! A bar is a single line, rewritten in place (each line starts with `\r`),
//! resolved from a template on every update.
//!
//! ## Rendering
//! Each render goes through these steps:
//! - The [throttle](crate::Throttle) may skip the render entirely. Nothing is
//!   computed or written then.
//! - The metrics are computed: fraction, elapsed, average, time to arrival.
//! - First pass: every field of the template except `{animation}` is resolved.
//! - The free space is computed: the columns not taken by the first pass.
//! - Second pass: the animation is drawn in the free space.
//! - The line is written and flushed. If the bar reached 100%, the outro
//!   is written instead of flushing, once.
//!
//! ## Resuming
//! If the first update sets `done` explicitly and no `start` was configured,
//! that value is the *supply*: progress that was already there, for example
//! the part of a file downloaded by a previous run. The average and the
//! estimations only count what comes after.
//!
//! ```rust
//! use progressist::Update;
//!
//! let mut bar = progressist::progress("Bar:")
//!     .total(100)
//!     .columns(50)
//!     .template("{prefix} {animation} {done}/{total}")
//!     .build_with(Vec::new())?;
//! bar.update(Update::new().done(50))?;
//! let out = String::from_utf8(bar.into_writer()).unwrap();
//! assert_eq!(out, "\rBar: ===================                    50/100");
//! # Ok::<(), progressist::Error>(())
//! ```
use std::io::{Stdout, Write};

use chrono::{DateTime, Local};

use crate::{Clock, Frame, IntoCount, Result, Template, Throttle};

mod builder;
pub use builder::{BarConfig, DEFAULT_STEPS, DEFAULT_TEMPLATE, ProgressBarBuilder, progress};
mod iter;
pub use iter::ProgressIter;
mod metrics;
pub use metrics::Metrics;
mod state;
use state::State;
mod update;
pub use update::Update;

/// A progress bar writing to `W`.
///
/// See the [module documentation](self)
pub struct ProgressBar<W: Write = Stdout> {
    config: BarConfig,
    state: State,
    clock: Box<dyn Clock>,
    out: W,
}

impl ProgressBar<Stdout> {
    /// Start building a bar, same as [`ProgressBarBuilder::new`]
    #[inline(always)]
    pub fn builder() -> ProgressBarBuilder {
        ProgressBarBuilder::new()
    }
}

impl<W: Write> ProgressBar<W> {
    pub(crate) fn new(config: BarConfig, state: State, clock: Box<dyn Clock>, out: W) -> Self {
        Self {
            config,
            state,
            clock,
            out,
        }
    }

    /// Apply the update and render
    pub fn update(&mut self, update: Update) -> Result<()> {
        let Update {
            step,
            done,
            total,
            props,
        } = update;
        self.state.props.extend(props);
        if let Some(total) = total {
            self.state.total = total;
        }
        match done {
            Some(done) => {
                self.state.done = done;
                if self.state.start.is_none() {
                    crate::debug!("progress starts at {done}, rate will count from there");
                    self.state.supply = done;
                }
            }
            None => self.state.done += step,
        }
        self.render()
    }

    /// Move by one step and render
    #[inline(always)]
    pub fn tick(&mut self) -> Result<()> {
        self.update(Update::new())
    }

    /// Move by `step` and render
    #[inline(always)]
    pub fn inc<T: IntoCount>(&mut self, step: T) -> Result<()> {
        self.update(Update::new().step(step))
    }

    /// Set `done` and render
    #[inline(always)]
    pub fn set<T: IntoCount>(&mut self, done: T) -> Result<()> {
        self.update(Update::new().done(done))
    }

    /// Callback for transfers reporting blocks: the number of blocks
    /// transferred so far, the size of a block, and the total size,
    /// negative if unknown.
    ///
    /// The last block is usually partial, so the count is capped at the total.
    pub fn on_block(&mut self, blocks: u64, block_size: u64, total_size: i64) -> Result<()> {
        let total = if total_size > 0 { total_size as f64 } else { 0.0 };
        let mut done = blocks.saturating_mul(block_size) as f64;
        if total > 0.0 {
            done = done.min(total);
        }
        self.update(Update::new().done(done).total(total))
    }

    /// Wrap an iterator so the bar moves by one step per item.
    ///
    /// See [`ProgressIter`]
    ///
    /// ```rust
    /// let mut bar = progressist::progress("Items:").total(3).build_with(Vec::new())?;
    /// let sum: u32 = bar.iter([1, 2, 3]).sum();
    /// assert_eq!(sum, 6);
    /// assert_eq!(bar.done(), 3.0);
    /// assert!(bar.is_finished());
    /// # Ok::<(), progressist::Error>(())
    /// ```
    #[inline(always)]
    pub fn iter<I: IntoIterator>(&mut self, iterable: I) -> ProgressIter<'_, I::IntoIter, W> {
        ProgressIter::new(self, iterable.into_iter())
    }

    /// Render the current state, unless throttled
    pub fn render(&mut self) -> Result<()> {
        let state = &mut self.state;
        if state.completed && state.is_complete() {
            // already rendered at 100%, don't print the same line again
            return Ok(());
        }
        let now = self.clock.now();
        if !state
            .throttle
            .allows(&mut state.checkpoint, state.done, state.total, now)
        {
            crate::trace!("render throttled at {}", state.done);
            return Ok(());
        }
        let start = *state.start.get_or_insert(now);
        state.metrics = crate::Metrics::compute(state.done, state.total, state.supply, start, now);

        let line = self.compose(self.config.template())?;
        self.out.write_all(line.as_bytes())?;
        self.state.prints += 1;

        if self.state.metrics.fraction >= 1.0 {
            if !self.state.completed {
                // an early finish does not count, the outro follows the 100% line
                self.state.completed = true;
                self.state.finished = false;
            }
            // finish will flush
            return self.finish();
        }
        self.state.finished = false;
        self.state.completed = false;
        self.out.flush()?;
        Ok(())
    }

    /// Write the outro, once per completion.
    ///
    /// If the total is unknown and the bar is throttled, the last updates
    /// might not have been rendered, so throttling is turned off and the
    /// bar rendered one last time before.
    pub fn finish(&mut self) -> Result<()> {
        if self.state.finished {
            return Ok(());
        }
        if self.state.total <= 0.0 && self.state.throttle.is_active() {
            crate::debug!("no total, forcing a last render before finishing");
            self.state.throttle = Throttle::Off;
            self.render()?;
        }
        self.state.finished = true;
        crate::debug!(
            "progress finished at {} after {} frames",
            self.state.done,
            self.state.prints
        );
        let outro = self.compose(self.config.outro())?;
        self.out.write_all(outro.as_bytes())?;
        self.out.flush()?;
        Ok(())
    }

    /// Render a template in two passes
    fn compose(&self, template: &Template) -> Result<String> {
        let mut frame = self.frame();
        let layout = template.measure(&frame)?;
        frame.free_space = layout.free_space(self.config.columns(), self.config.invisible_chars());
        crate::trace!(
            "first pass '{}', free space {}",
            layout.placeholder_line().escape_debug(),
            frame.free_space
        );
        let animation = self.config.animation();
        Ok(layout.fill(frame.free_space, |width| animation.render(&frame, width)))
    }

    fn frame(&self) -> Frame<'_> {
        Frame {
            config: &self.config,
            metrics: &self.state.metrics,
            props: &self.state.props,
            done: self.state.done,
            total: self.state.total,
            supply: self.state.supply,
            prints: self.state.prints,
            free_space: 0,
        }
    }

    /// Units done
    #[inline(always)]
    pub fn done(&self) -> f64 {
        self.state.done
    }

    /// Total units, `0` if unknown
    #[inline(always)]
    pub fn total(&self) -> f64 {
        self.state.total
    }

    /// Units that were already done when the bar was resumed
    #[inline(always)]
    pub fn supply(&self) -> f64 {
        self.state.supply
    }

    /// Fraction at the last render
    #[inline(always)]
    pub fn fraction(&self) -> f64 {
        self.state.metrics.fraction
    }

    /// Number of frames written
    #[inline(always)]
    pub fn prints(&self) -> u64 {
        self.state.prints
    }

    /// Metrics at the last render
    #[inline(always)]
    pub fn metrics(&self) -> &crate::Metrics {
        &self.state.metrics
    }

    /// When the progress started, set by the first render if not configured
    #[inline(always)]
    pub fn start(&self) -> Option<DateTime<Local>> {
        self.state.start
    }

    /// The current throttle. It is turned off when a bar without total finishes
    #[inline(always)]
    pub fn throttle(&self) -> Throttle {
        self.state.throttle
    }

    /// If the outro was written for the current completion
    #[inline(always)]
    pub fn is_finished(&self) -> bool {
        self.state.finished
    }

    #[inline(always)]
    pub fn config(&self) -> &BarConfig {
        &self.config
    }

    #[inline(always)]
    pub fn writer(&self) -> &W {
        &self.out
    }

    /// Get the writer back
    #[inline(always)]
    pub fn into_writer(self) -> W {
        self.out
    }
}
