/// Width used when the terminal size cannot be queried
pub const DEFAULT_COLUMNS: usize = 80;
/// Height used when the terminal size cannot be queried
pub const DEFAULT_ROWS: usize = 20;

/// Get the terminal width, or the default if cannot get
pub fn term_width_or_default() -> usize {
    term_width_height_or_default().0
}

/// Get the terminal width and height, or `80x20` if cannot get
pub fn term_width_height_or_default() -> (usize, usize) {
    term_width_height().unwrap_or_else(|| {
        crate::debug!("terminal size not available, using {DEFAULT_COLUMNS}x{DEFAULT_ROWS}");
        (DEFAULT_COLUMNS, DEFAULT_ROWS)
    })
}

/// Get the terminal width
pub fn term_width() -> Option<usize> {
    term_width_height().map(|x| x.0)
}

/// Get the terminal width and height.
///
/// Always `None` when the `term` feature is disabled
pub fn term_width_height() -> Option<(usize, usize)> {
    #[cfg(feature = "term")]
    {
        use terminal_size::*;
        terminal_size().map(|(Width(w), Height(h))| (w as usize, h as usize))
    }
    #[cfg(not(feature = "term"))]
    {
        None
    }
}
