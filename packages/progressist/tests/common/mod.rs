#![allow(dead_code)]

use std::io::Write;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Local, TimeDelta, TimeZone};
use progressist::{ManualClock, ProgressBar, ProgressBarBuilder};

/// Writer keeping what was written, readable while the bar owns a clone
#[derive(Debug, Clone, Default)]
pub struct Capture(Arc<Mutex<Vec<u8>>>);

impl Capture {
    /// Take everything written since the last call
    pub fn take(&self) -> String {
        let bytes = std::mem::take(&mut *self.0.lock().unwrap());
        String::from_utf8(bytes).unwrap()
    }
}

impl Write for Capture {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// 2016-04-07 01:02:03, local time
pub fn fixed_now() -> DateTime<Local> {
    Local.with_ymd_and_hms(2016, 4, 7, 1, 2, 3).unwrap()
}

pub fn seconds_ago(secs: i64) -> DateTime<Local> {
    fixed_now() - TimeDelta::seconds(secs)
}

/// 50 columns, total of 100, started right now
pub fn fixture() -> (ProgressBarBuilder, ManualClock) {
    let clock = ManualClock::new(fixed_now());
    let builder = progressist::progress("Bar:")
        .total(100)
        .columns(50)
        .start(fixed_now())
        .template("{prefix} {animation} {done}/{total}")
        .clock(clock.clone());
    (builder, clock)
}

pub fn build(builder: ProgressBarBuilder) -> (ProgressBar<Capture>, Capture) {
    let out = Capture::default();
    let bar = builder.build_with(out.clone()).unwrap();
    (bar, out)
}
