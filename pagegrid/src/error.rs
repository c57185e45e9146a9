//! Error types

/// Errors produced while building rows from raw payloads.
#[derive(Debug, thiserror::Error)]
pub enum RowError {
    /// The payload element has no value under the configured key field.
    #[error("row missing key field '{field}'")]
    MissingKey {
        /// The key field that was expected.
        field: String,
    },
}

/// Errors a [`DataSource`](crate::DataSource) can return from a page fetch.
///
/// The table never surfaces these to the renderer: a failed fetch is
/// logged and the previous page stays visible.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// The underlying fetch failed (network, backend, transport).
    #[error("fetch failed: {0}")]
    Fetch(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The source returned a payload that could not be decoded.
    #[error("malformed page payload: {message}")]
    Decode {
        /// Description of the decode failure.
        message: String,
    },

    /// A payload element was missing its row key.
    #[error(transparent)]
    Row(#[from] RowError),
}

impl SourceError {
    /// Wraps an arbitrary fetch failure.
    pub fn fetch(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Fetch(err.into())
    }

    /// Creates a decode error.
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }
}
