//! Error taxonomy shared by every layer.
//!
//! The CLI maps these onto exit codes: [`Error::Usage`] exits 2, everything
//! else exits 1. A not-found artwork response is not an error at all; see
//! [`crate::downloader::DownloadOutcome::NotFound`].

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Bad flag combination; reported before any I/O happens.
    #[error("{0}")]
    Usage(String),

    /// Missing credentials, missing HTTP session, unreadable config file.
    #[error("{0}")]
    Config(String),

    /// Transport-level failure (connect, resolve, timeout, reset).
    #[error("{0}")]
    Network(#[from] curl::Error),

    /// Non-2xx response other than an artwork 404.
    #[error("GET {url} returned HTTP {status}")]
    Http { url: String, status: u32 },

    #[error("library not found: {0}")]
    LibraryNotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The server answered with something that is not the expected JSON.
    #[error("invalid server response: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn config(message: impl Into<String>) -> Self {
        Error::Config(message.into())
    }

    pub fn usage(message: impl Into<String>) -> Self {
        Error::Usage(message.into())
    }

    /// True for failures that come from talking to the server rather than
    /// from local state.
    pub fn is_network(&self) -> bool {
        matches!(self, Error::Network(_) | Error::Http { .. } | Error::Json(_))
    }
}
