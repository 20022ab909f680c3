use crate::{IntoCount, Value};

/// Changes applied by [`ProgressBar::update`](crate::ProgressBar::update) before rendering.
///
/// By default an update moves `done` by one step. Setting `done`
/// explicitly replaces the counter and the step is not applied.
///
/// ```rust
/// use progressist::Update;
///
/// Update::new();                              // done += 1
/// Update::new().step(7);                      // done += 7
/// Update::new().done(50).total(100);          // done = 50, total = 100
/// Update::new().prop("file", "archive.tar");  // {file} in the template
/// ```
#[derive(Debug, Clone)]
pub struct Update {
    pub(crate) step: f64,
    pub(crate) done: Option<f64>,
    pub(crate) total: Option<f64>,
    pub(crate) props: Vec<(String, Value)>,
}

impl Default for Update {
    fn default() -> Self {
        Self::new()
    }
}

impl Update {
    /// An update by one step
    pub fn new() -> Self {
        Self {
            step: 1.0,
            done: None,
            total: None,
            props: vec![],
        }
    }

    /// Set the step added to `done`. `0` only re-renders
    #[inline(always)]
    pub fn step<T: IntoCount>(mut self, step: T) -> Self {
        self.step = step.into_count();
        self
    }

    /// Set `done` to this value
    #[inline(always)]
    pub fn done<T: IntoCount>(mut self, done: T) -> Self {
        self.done = Some(done.into_count());
        self
    }

    /// Set the total. `0` makes it unknown
    #[inline(always)]
    pub fn total<T: IntoCount>(mut self, total: T) -> Self {
        self.total = Some(total.into_count());
        self
    }

    /// Set a value for a template field. It stays set for the next
    /// renders and takes precedence over registered fields
    #[inline(always)]
    pub fn prop(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.props.push((name.into(), value.into()));
        self
    }
}
