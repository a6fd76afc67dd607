//! Plex JSON API client.

use super::parse::{Envelope, MetadataContainer, MetadataEntry, SectionsContainer};
use super::MediaServer;
use crate::http::{CurlSession, FetchStatus, HttpSession};
use crate::model::{Episode, LibrarySection, MediaItem, Season};
use crate::{Error, Result};
use serde::de::DeserializeOwned;

const PRODUCT: &str = "plexmeta";

/// Read-only client for one Plex server.
///
/// The token travels as `X-Plex-Token` on the session, so artwork URLs
/// handed out by this client are safe to print.
#[derive(Debug, Clone)]
pub struct PlexServer<S = CurlSession> {
    base_url: String,
    session: S,
}

/// Session carrying the headers every Plex request needs.
pub fn plex_session(token: &str) -> CurlSession {
    CurlSession::new()
        .with_header("Accept", "application/json")
        .with_header("X-Plex-Token", token)
        .with_header("X-Plex-Product", PRODUCT)
        .with_header("X-Plex-Client-Identifier", PRODUCT)
}

impl<S: HttpSession> PlexServer<S> {
    /// Validates `base_url` and wraps `session`. No request is made.
    pub fn connect(base_url: &str, session: S) -> Result<Self> {
        let parsed = url::Url::parse(base_url)
            .map_err(|e| Error::config(format!("invalid base URL {base_url:?}: {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(Error::config(format!(
                "base URL must be http or https, got {base_url:?}"
            )));
        }
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for a server path; absolute inputs pass through.
    pub fn url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.url(path);
        let mut body = Vec::new();
        match self.session.get(&url, &mut body)? {
            FetchStatus::Complete { .. } => {
                let envelope: Envelope<T> = serde_json::from_slice(&body)?;
                Ok(envelope.container)
            }
            FetchStatus::NotFound => Err(Error::Http { url, status: 404 }),
        }
    }

    fn children(&self, key: &str) -> Result<Vec<MetadataEntry>> {
        let container: MetadataContainer =
            self.get_json(&format!("/library/metadata/{key}/children"))?;
        Ok(container.metadata)
    }

    fn artwork_url(&self, thumb: Option<&str>) -> Option<String> {
        thumb
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(|t| self.url(t))
    }
}

impl<S: HttpSession> MediaServer for PlexServer<S> {
    fn sections(&self) -> Result<Vec<LibrarySection>> {
        let container: SectionsContainer = self.get_json("/library/sections")?;
        Ok(container
            .directories
            .into_iter()
            .map(|d| LibrarySection::new(d.key, d.title, d.kind))
            .collect())
    }

    fn items(&self, section: &LibrarySection) -> Result<Vec<MediaItem>> {
        tracing::debug!(library = %section.title, key = %section.key, "listing items");
        let container: MetadataContainer =
            self.get_json(&format!("/library/sections/{}/all", section.key))?;
        Ok(container
            .metadata
            .into_iter()
            .map(|m| MediaItem {
                locations: m.on_disk_paths(),
                poster_url: self.artwork_url(m.thumb.as_deref()),
                key: m.rating_key,
                title: m.title,
                year: m.year,
            })
            .collect())
    }

    fn seasons(&self, show: &MediaItem) -> Result<Vec<Season>> {
        Ok(self
            .children(&show.key)?
            .into_iter()
            .map(|m| Season {
                poster_url: self.artwork_url(m.thumb.as_deref()),
                key: m.rating_key,
                number: m.index,
            })
            .collect())
    }

    fn episodes(&self, season: &Season) -> Result<Vec<Episode>> {
        Ok(self
            .children(&season.key)?
            .into_iter()
            .map(|m| Episode {
                thumb_url: self.artwork_url(m.thumb.as_deref()),
                title: m.title,
                number: m.index,
            })
            .collect())
    }

    fn http_session(&self) -> Option<&dyn HttpSession> {
        Some(&self.session)
    }
}
