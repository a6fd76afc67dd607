//! HTTP session capability.
//!
//! Everything that talks to the network goes through [`HttpSession`] so the
//! orchestrator and the Plex client can run against test doubles.

mod client;

pub use client::{CurlSession, DEFAULT_BUFFER_SIZE, DEFAULT_TIMEOUT};

use crate::Result;
use std::io::Write;

/// How a GET ended when it did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStatus {
    /// 2xx; the body was streamed to the sink.
    Complete { bytes: u64 },
    /// 404; nothing was written to the sink.
    NotFound,
}

/// A blocking HTTP client able to stream one GET response body.
pub trait HttpSession {
    /// Streams the body of `url` into `sink`.
    ///
    /// Returns [`FetchStatus::NotFound`] on 404, `Error::Http` on any other
    /// non-2xx status and `Error::Network` on transport failure.
    fn get(&self, url: &str, sink: &mut dyn Write) -> Result<FetchStatus>;
}
