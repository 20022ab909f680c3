use std::collections::HashMap;

use chrono::{DateTime, Local};

use crate::throttle::Checkpoint;
use crate::{Metrics, Throttle, Value};

/// Internal mutable state
#[derive(Debug)]
pub(crate) struct State {
    pub done: f64,
    /// 0 means unknown
    pub total: f64,
    pub start: Option<DateTime<Local>>,
    /// `done` when the bar was resumed, excluded from the rate
    pub supply: f64,
    /// Number of frames written
    pub prints: u64,
    /// The outro was written and the bar has not rendered below 100% since
    pub finished: bool,
    /// A render reached 100% and the bar has not rendered below it since.
    /// Unlike `finished`, an explicit early `finish` does not set it
    pub completed: bool,
    pub throttle: Throttle,
    pub checkpoint: Checkpoint,
    /// Metrics of the last render that went through
    pub metrics: Metrics,
    pub props: HashMap<String, Value>,
}

impl State {
    pub fn new(total: f64, start: Option<DateTime<Local>>, throttle: Throttle) -> Self {
        Self {
            done: 0.0,
            total,
            start,
            supply: 0.0,
            prints: 0,
            finished: false,
            completed: false,
            throttle,
            checkpoint: Checkpoint::default(),
            metrics: Metrics::empty(start.unwrap_or_else(Local::now)),
            props: HashMap::new(),
        }
    }

    /// Total is known and reached
    #[inline(always)]
    pub fn is_complete(&self) -> bool {
        self.total > 0.0 && self.done >= self.total
    }
}
