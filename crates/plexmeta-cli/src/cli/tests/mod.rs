//! CLI tests: argument parsing plus command output against an in-memory server.

use super::{Cli, CliCommand};
use clap::Parser;
use plexmeta_core::http::{FetchStatus, HttpSession};
use plexmeta_core::model::{Episode, LibrarySection, MediaItem, Season};
use plexmeta_core::server::MediaServer;
use plexmeta_core::{Error, Result};
use std::collections::HashMap;
use std::io::Write;

pub(super) fn parse(args: &[&str]) -> CliCommand {
    let cli = Cli::try_parse_from(args).unwrap();
    cli.command
}

/// Movie-only server; artwork URLs missing from `artwork` answer 404.
#[derive(Default)]
pub(super) struct StubServer {
    sections: Vec<LibrarySection>,
    items: HashMap<String, Vec<MediaItem>>,
    artwork: Artwork,
}

#[derive(Default)]
pub(super) struct Artwork(HashMap<String, Vec<u8>>);

impl HttpSession for Artwork {
    fn get(&self, url: &str, sink: &mut dyn Write) -> Result<FetchStatus> {
        match self.0.get(url) {
            Some(body) => {
                sink.write_all(body)?;
                Ok(FetchStatus::Complete {
                    bytes: body.len() as u64,
                })
            }
            None => Ok(FetchStatus::NotFound),
        }
    }
}

impl StubServer {
    pub(super) fn with_movies(mut self, title: &str, movies: &[(&str, u16, &str)]) -> Self {
        let key = (self.sections.len() + 1).to_string();
        self.sections
            .push(LibrarySection::new(key.clone(), title, "movie"));
        let items = movies
            .iter()
            .enumerate()
            .map(|(i, (name, year, url))| MediaItem {
                key: format!("{key}-{i}"),
                title: name.to_string(),
                year: Some(*year),
                poster_url: Some(url.to_string()),
                ..Default::default()
            })
            .collect();
        self.items.insert(key, items);
        self
    }

    pub(super) fn with_artwork(mut self, url: &str, body: &[u8]) -> Self {
        self.artwork.0.insert(url.to_string(), body.to_vec());
        self
    }
}

impl MediaServer for StubServer {
    fn sections(&self) -> Result<Vec<LibrarySection>> {
        Ok(self.sections.clone())
    }

    fn items(&self, section: &LibrarySection) -> Result<Vec<MediaItem>> {
        self.items.get(&section.key).cloned().ok_or_else(|| Error::Http {
            url: format!("http://plex/library/sections/{}/all", section.key),
            status: 500,
        })
    }

    fn seasons(&self, _show: &MediaItem) -> Result<Vec<Season>> {
        Ok(Vec::new())
    }

    fn episodes(&self, _season: &Season) -> Result<Vec<Episode>> {
        Ok(Vec::new())
    }

    fn http_session(&self) -> Option<&dyn HttpSession> {
        Some(&self.artwork)
    }
}
