use std::io::Write;

use crate::{Error, ProgressBar, Result};

/// Iterator adapter updating a bar, made with [`ProgressBar::iter`].
///
/// The bar moves by one step when the next item is requested, i.e. after
/// the work on the previous item is done. Once the source is exhausted,
/// the bar is finished if it did not reach 100% by itself (for example
/// when the total is unknown).
///
/// Rendering errors cannot be returned from `next`, so the first one is
/// logged and kept (see [`error`](Self::error)), and the bar stops being
/// updated. Items still come through.
pub struct ProgressIter<'a, I, W: Write> {
    bar: &'a mut ProgressBar<W>,
    inner: I,
    /// An item was handed out and its step is not counted yet
    pending: bool,
    exhausted: bool,
    error: Option<Error>,
}

impl<'a, I, W: Write> ProgressIter<'a, I, W> {
    pub(crate) fn new(bar: &'a mut ProgressBar<W>, inner: I) -> Self {
        Self {
            bar,
            inner,
            pending: false,
            exhausted: false,
            error: None,
        }
    }

    /// The error that stopped the updates, if any
    #[inline(always)]
    pub fn error(&self) -> Option<&Error> {
        self.error.as_ref()
    }

    /// Take the error that stopped the updates, if any
    #[inline(always)]
    pub fn take_error(&mut self) -> Option<Error> {
        self.error.take()
    }

    fn apply(&mut self, f: impl FnOnce(&mut ProgressBar<W>) -> Result<()>) {
        if self.error.is_some() {
            return;
        }
        if let Err(e) = f(&mut *self.bar) {
            crate::warn!("progress bar stopped updating: {e}");
            self.error = Some(e);
        }
    }
}

impl<I: Iterator, W: Write> Iterator for ProgressIter<'_, I, W> {
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pending {
            self.pending = false;
            self.apply(|bar| bar.tick());
        }
        if self.exhausted {
            return None;
        }
        match self.inner.next() {
            Some(item) => {
                self.pending = true;
                Some(item)
            }
            None => {
                self.exhausted = true;
                if self.bar.fraction() != 1.0 {
                    // spinner without total
                    self.apply(|bar| bar.finish());
                }
                None
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.exhausted {
            (0, Some(0))
        } else {
            self.inner.size_hint()
        }
    }
}
