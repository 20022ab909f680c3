use thiserror::Error;

/// Errors that can happen when building or rendering a progress bar.
///
/// Unknown template fields are not errors, they render as empty text.
#[derive(Error, Debug)]
pub enum Error {
    /// The bar was configured with an invalid throttle or template.
    ///
    /// This is raised by the builder, before anything is rendered.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// A field could not be formatted with the spec it was given,
    /// for example `{prefix:B}` on a non-numeric prefix.
    #[error("cannot format field '{field}': {message}")]
    Format { field: String, message: String },

    /// Writing or flushing the output failed.
    #[error("I/O error")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl Error {
    pub(crate) fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
    pub(crate) fn format(field: &str, message: impl Into<String>) -> Self {
        Self::Format {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Result type alias for this crate
pub type Result<T> = std::result::Result<T, Error>;
