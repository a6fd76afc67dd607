//! Media-server capability: the read-only slice of the server's object model
//! this tool needs.
//!
//! The enumerator and orchestrator only depend on [`MediaServer`]; the Plex
//! JSON client is one implementation, test doubles are another.

mod parse;
mod plex;

pub use plex::{plex_session, PlexServer};

use crate::http::HttpSession;
use crate::model::{Episode, LibrarySection, MediaItem, Season};
use crate::{Error, Result};

pub trait MediaServer {
    /// Library sections in server order.
    fn sections(&self) -> Result<Vec<LibrarySection>>;

    /// Top-level items of a section in server order, artwork URLs resolved.
    fn items(&self, section: &LibrarySection) -> Result<Vec<MediaItem>>;

    fn seasons(&self, show: &MediaItem) -> Result<Vec<Season>>;

    fn episodes(&self, season: &Season) -> Result<Vec<Episode>>;

    /// Session the server itself talks through, reused for artwork when the
    /// caller does not supply one.
    fn http_session(&self) -> Option<&dyn HttpSession> {
        None
    }

    /// Looks a section up by title, ignoring ASCII case.
    fn section(&self, title: &str) -> Result<LibrarySection> {
        self.sections()?
            .into_iter()
            .find(|s| s.title.eq_ignore_ascii_case(title))
            .ok_or_else(|| Error::LibraryNotFound(title.to_string()))
    }
}

#[cfg(test)]
pub(crate) mod fake;
