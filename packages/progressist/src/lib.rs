//! Minimalist progress bar for the terminal, driven by a text template.
//!
//! # General Principle
//! A bar is one line, rewritten in place. What the line looks like is
//! entirely up to the template: `{name}` placeholders are replaced by fields
//! (counters, percentage, timings, or anything registered), and the
//! `{animation}` placeholder takes whatever room is left on the line.
//!
//! ```rust,no_run
//! let mut bar = progressist::progress("Progress:").total(20).build()?;
//! for _ in bar.iter(0..20) {
//!     std::thread::sleep(std::time::Duration::from_millis(100));
//! }
//! # Ok::<(), progressist::Error>(())
//! ```
//!
//! # Templates
//! The default template is `{prefix} {animation} {percent} ({done}/{total})`,
//! see [`FieldRegistry::with_builtins`] for every field available.
//!
//! Placeholders can have a format spec after a colon, using the usual
//! mini-language (`{avg:.1f}`, `{percent:.1%}`, `{done:>6}`), plus:
//! - `B` for byte sizes: `{done:B}` → `104.7 MiB`
//! - `D` to force an integer: `{done:D}`
//!
//! Fields without spec use a sensible default for their kind:
//! percentages with 2 decimals, durations as `H:MM:SS`, and so on.
//! See [`Value`].
//!
//! Unknown fields render as empty text.
//!
//! # Animations
//! - [`Animation::Bar`]: `=====     `
//! - [`Animation::Spinner`]: `-`, `\`, `|`, `/`, one step per frame
//! - [`Animation::Stream`]: `⎻⎼⎻⎼⎻⎼⎻⎼`, shifting by one step per frame
//!
//! # Throttling
//! Bars updated very often can be throttled, see [`Throttle`].
//!
//! # `log` integration
//! The crate logs through [`log`](https://docs.rs/log):
//! `trace` for throttled renders and layout, `debug` for lifecycle events.
//! The `release-nolog` and `release-nodebuglog` features turn them off
//! statically.

mod error;
pub use error::{Error, Result};

mod value;
pub use value::{HumanDuration, IntoCount, Value};

mod format;
pub use format::{Align, FormatSpec, Sign, format_field, scale_bytes};

mod template;
pub use template::{ANIMATION, FieldLookup, Layout, PLACEHOLDER, Template};

mod fields;
pub use fields::{FieldFn, FieldRegistry, Frame};

mod animation;
pub use animation::{Animation, AnimationFn};

/// Renderers for the builtin animations
pub mod anim {
    pub use crate::animation::{bar, spinner, stream};
}

mod throttle;
pub use throttle::Throttle;

mod clock;
pub use clock::{Clock, ManualClock, SystemClock};

mod term_size;
pub use term_size::{
    DEFAULT_COLUMNS, DEFAULT_ROWS, term_width, term_width_height, term_width_height_or_default,
    term_width_or_default,
};

mod bar;
pub use bar::{
    BarConfig, DEFAULT_STEPS, DEFAULT_TEMPLATE, Metrics, ProgressBar, ProgressBarBuilder,
    ProgressIter, Update, progress,
};

pub(crate) use log::{debug, trace, warn};
