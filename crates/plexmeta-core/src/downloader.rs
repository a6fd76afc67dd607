//! Single-asset downloader.

use crate::http::{FetchStatus, HttpSession};
use crate::storage::ArtworkFile;
use crate::{Error, Result};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadOutcome {
    Downloaded { bytes: u64 },
    /// The server answered 404; nothing was written.
    NotFound,
}

/// Streams artwork URLs to target paths through an [`HttpSession`].
#[derive(Clone, Copy)]
pub struct Downloader<'a> {
    session: Option<&'a dyn HttpSession>,
}

impl<'a> Downloader<'a> {
    pub fn new(session: Option<&'a dyn HttpSession>) -> Self {
        Self { session }
    }

    /// Downloads `url` to `target`, creating parent directories.
    ///
    /// A 404 is [`DownloadOutcome::NotFound`], not an error. Without a
    /// session this fails with `Error::Config` before touching the disk.
    pub fn download(&self, url: &str, target: &Path) -> Result<DownloadOutcome> {
        let session = self
            .session
            .ok_or_else(|| Error::config("HTTP session is not configured"))?;

        let mut file = ArtworkFile::create(target)?;
        let status = match session.get(url, file.writer()) {
            Ok(status) => status,
            Err(e) => {
                if let Err(cleanup) = file.discard() {
                    tracing::warn!(path = %target.display(), "could not remove partial file: {}", cleanup);
                }
                return Err(e);
            }
        };

        match status {
            FetchStatus::Complete { bytes } => {
                file.finalize(target)?;
                tracing::debug!(url, path = %target.display(), bytes, "artwork saved");
                Ok(DownloadOutcome::Downloaded { bytes })
            }
            FetchStatus::NotFound => {
                file.discard()?;
                tracing::info!(url, "artwork not found (404), skipped");
                Ok(DownloadOutcome::NotFound)
            }
        }
    }
}
