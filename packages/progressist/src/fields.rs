use std::collections::{BTreeSet, HashMap};
use std::fmt;

use crate::{BarConfig, FieldLookup, Metrics, Value, animation};

/// Accessor computing a field from the frame being rendered
pub type FieldFn = Box<dyn Fn(&Frame<'_>) -> Value + Send + Sync>;

/// Everything known about the bar at the moment of a render.
///
/// This is what field accessors and custom animations get to look at.
pub struct Frame<'a> {
    pub config: &'a BarConfig,
    /// Metrics computed for this render
    pub metrics: &'a Metrics,
    /// Values set with [`Update::prop`](crate::Update::prop)
    pub props: &'a HashMap<String, Value>,
    pub done: f64,
    /// `0` when unknown
    pub total: f64,
    /// Progress that was already there when the bar was resumed
    pub supply: f64,
    /// Number of frames written before this one
    pub prints: u64,
    /// Width given to the animation. `0` during the first pass
    pub free_space: usize,
}

impl FieldLookup for Frame<'_> {
    fn lookup(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.props.get(name) {
            return Some(value.clone());
        }
        self.config.fields().get(name, self)
    }
}

/// Named fields available to templates.
///
/// Registering a name that already exists replaces the accessor,
/// including builtin ones.
///
/// ```rust
/// use progressist::{FieldRegistry, Value};
///
/// let mut fields = FieldRegistry::with_builtins();
/// fields.register("half", |frame| Value::Count(frame.done / 2.0));
/// assert!(fields.contains("half"));
/// assert!(fields.contains("percent"));
/// ```
#[derive(Default)]
pub struct FieldRegistry {
    fields: HashMap<String, FieldFn>,
}

impl FieldRegistry {
    /// Make an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Make a registry with the builtin fields:
    ///
    /// | field | value |
    /// |-|-|
    /// | `prefix` | the configured prefix |
    /// | `done`, `total` | the counters |
    /// | `remaining` | `total - done` |
    /// | `supply` | progress already done when resuming |
    /// | `addition` | `done - supply` |
    /// | `fraction` | `done / total` in `[0, 1]` |
    /// | `percent` | the fraction as a percentage |
    /// | `elapsed` | time since start |
    /// | `avg` | seconds per unit |
    /// | `speed` | units per second |
    /// | `tta` | estimated time remaining |
    /// | `eta` | estimated time of arrival |
    /// | `prints` | frames written so far |
    /// | `columns` | the line width |
    /// | `free_space` | width of the animation |
    /// | `done_char`, `remain_char` | the bar glyphs |
    /// | `spinner` | the current spinner step |
    /// | `progress`, `stream` | bar and stream animations at `free_space` |
    pub fn with_builtins() -> Self {
        let mut fields = Self::new();
        fields.register("prefix", |f| Value::from(f.config.prefix()));
        fields.register("done", |f| Value::Count(f.done));
        fields.register("total", |f| Value::Count(f.total));
        fields.register("remaining", |f| Value::Count(f.metrics.remaining));
        fields.register("supply", |f| Value::Count(f.supply));
        fields.register("addition", |f| Value::Count(f.metrics.addition));
        fields.register("fraction", |f| Value::Float(f.metrics.fraction));
        fields.register("percent", |f| Value::Percent(f.metrics.fraction));
        fields.register("elapsed", |f| Value::Duration(f.metrics.elapsed));
        fields.register("avg", |f| Value::Float(f.metrics.avg));
        fields.register("speed", |f| Value::Float(f.metrics.speed()));
        fields.register("tta", |f| Value::Duration(f.metrics.tta));
        fields.register("eta", |f| Value::Timestamp {
            at: f.metrics.eta(),
            from_now: f.metrics.tta,
        });
        fields.register("prints", |f| Value::from(f.prints));
        fields.register("columns", |f| Value::from(f.config.columns()));
        fields.register("free_space", |f| Value::from(f.free_space));
        fields.register("done_char", |f| Value::from(f.config.done_char()));
        fields.register("remain_char", |f| Value::from(f.config.remain_char()));
        fields.register("spinner", |f| {
            Value::Text(animation::spinner(f.config.steps(), f.prints))
        });
        fields.register("progress", |f| {
            Value::Text(animation::bar(
                f.metrics.fraction,
                f.free_space,
                f.config.done_char(),
                f.config.remain_char(),
            ))
        });
        fields.register("stream", |f| {
            Value::Text(animation::stream(f.config.steps(), f.prints, f.free_space))
        });
        fields
    }

    /// Add or replace a field
    pub fn register<F>(&mut self, name: impl Into<String>, accessor: F)
    where
        F: Fn(&Frame<'_>) -> Value + Send + Sync + 'static,
    {
        self.fields.insert(name.into(), Box::new(accessor));
    }

    /// If the field is registered
    #[inline(always)]
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Evaluate a field for the frame
    pub fn get(&self, name: &str, frame: &Frame<'_>) -> Option<Value> {
        self.fields.get(name).map(|accessor| accessor(frame))
    }
}

impl fmt::Debug for FieldRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // sorted for stable output
        let names: BTreeSet<&str> = self.fields.keys().map(String::as_str).collect();
        f.debug_set().entries(names).finish()
    }
}
