//! In-memory [`MediaServer`] for tests.

use super::MediaServer;
use crate::model::{Episode, LibrarySection, MediaItem, Season};
use crate::{Error, Result};
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

#[derive(Debug, Default)]
pub(crate) struct FakeServer {
    pub sections: Vec<LibrarySection>,
    /// Items by section key.
    pub items: HashMap<String, Vec<MediaItem>>,
    /// Seasons by show key.
    pub seasons: HashMap<String, Vec<Season>>,
    /// Episodes by season key.
    pub episodes: HashMap<String, Vec<Episode>>,
    /// Section keys whose item listing fails with HTTP 500.
    pub failing: HashSet<String>,
    /// Show or season keys whose children listing fails with HTTP 500.
    pub failing_children: HashSet<String>,
    /// Keys passed to `seasons`, in call order.
    pub season_calls: RefCell<Vec<String>>,
}

impl FakeServer {
    pub fn with_section(mut self, section: LibrarySection, items: Vec<MediaItem>) -> Self {
        self.items.insert(section.key.clone(), items);
        self.sections.push(section);
        self
    }

    pub fn with_seasons(mut self, show_key: &str, seasons: Vec<Season>) -> Self {
        self.seasons.insert(show_key.to_string(), seasons);
        self
    }

    pub fn with_episodes(mut self, season_key: &str, episodes: Vec<Episode>) -> Self {
        self.episodes.insert(season_key.to_string(), episodes);
        self
    }

    pub fn failing(mut self, section_key: &str) -> Self {
        self.failing.insert(section_key.to_string());
        self
    }

    pub fn failing_children(mut self, key: &str) -> Self {
        self.failing_children.insert(key.to_string());
        self
    }

    fn children_error(&self, key: &str) -> Result<()> {
        if self.failing_children.contains(key) {
            return Err(Error::Http {
                url: format!("http://fake/library/metadata/{key}/children"),
                status: 500,
            });
        }
        Ok(())
    }

    /// Library "Movies" holding "Movie One (1999)" and "Movie Two (2004)".
    pub fn movies() -> Self {
        FakeServer::default().with_section(
            LibrarySection::new("1", "Movies", "movie"),
            vec![
                movie("1", "Movie One", "/media/Movies/Movie One (1999)", "http://x/1.jpg"),
                movie("2", "Movie Two", "/media/Movies/Movie Two (2004)", "http://x/2.jpg"),
            ],
        )
    }
}

pub(crate) fn movie(key: &str, title: &str, location: &str, url: &str) -> MediaItem {
    MediaItem {
        key: key.to_string(),
        title: title.to_string(),
        year: None,
        locations: vec![location.to_string()],
        poster_url: Some(url.to_string()),
    }
}

pub(crate) fn season(key: &str, number: Option<u32>, url: &str) -> Season {
    Season {
        key: key.to_string(),
        number,
        poster_url: Some(url.to_string()),
    }
}

pub(crate) fn episode(title: &str, number: Option<u32>, url: &str) -> Episode {
    Episode {
        title: title.to_string(),
        number,
        thumb_url: Some(url.to_string()),
    }
}

impl MediaServer for FakeServer {
    fn sections(&self) -> Result<Vec<LibrarySection>> {
        Ok(self.sections.clone())
    }

    fn items(&self, section: &LibrarySection) -> Result<Vec<MediaItem>> {
        if self.failing.contains(&section.key) {
            return Err(Error::Http {
                url: format!("http://fake/library/sections/{}/all", section.key),
                status: 500,
            });
        }
        Ok(self.items.get(&section.key).cloned().unwrap_or_default())
    }

    fn seasons(&self, show: &MediaItem) -> Result<Vec<Season>> {
        self.season_calls.borrow_mut().push(show.key.clone());
        self.children_error(&show.key)?;
        Ok(self.seasons.get(&show.key).cloned().unwrap_or_default())
    }

    fn episodes(&self, season: &Season) -> Result<Vec<Episode>> {
        self.children_error(&season.key)?;
        Ok(self.episodes.get(&season.key).cloned().unwrap_or_default())
    }
}
