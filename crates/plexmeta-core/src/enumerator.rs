//! Poster enumeration over one library section.
//!
//! Yields assets lazily: the item list is fetched up front, but a show's
//! seasons and episodes are only requested when iteration reaches that show,
//! so `take(n)` never walks further than it has to.

use crate::model::{AssetKind, LibraryKind, LibrarySection, MediaItem, PosterAsset};
use crate::naming::derive_asset_name;
use crate::server::MediaServer;
use crate::{Error, Result};
use std::collections::VecDeque;

/// Single-pass iterator of [`PosterAsset`]s in server order. Ends after the
/// first error it yields; assets found before the error come first.
pub struct PosterEnumerator<'a> {
    server: &'a dyn MediaServer,
    kind: LibraryKind,
    items: std::vec::IntoIter<MediaItem>,
    pending: VecDeque<PosterAsset>,
    /// Error hit while expanding an item, held until `pending` drains.
    deferred: Option<Error>,
    done: bool,
}

impl<'a> PosterEnumerator<'a> {
    pub fn new(server: &'a dyn MediaServer, section: &LibrarySection) -> Result<Self> {
        let items = server.items(section)?;
        tracing::debug!(
            library = %section.title,
            kind = %section.type_name,
            items = items.len(),
            "enumerating posters"
        );
        Ok(Self {
            server,
            kind: section.kind,
            items: items.into_iter(),
            pending: VecDeque::new(),
            deferred: None,
            done: false,
        })
    }

    fn expand(&mut self, item: MediaItem) -> Result<()> {
        let kind = match self.kind {
            LibraryKind::Movie => AssetKind::Movie,
            LibraryKind::Other => AssetKind::Other,
            LibraryKind::Show => return self.expand_show(item),
        };
        if let (Some(url), Some(asset_name)) = (item.poster_url.clone(), derive_asset_name(&item)) {
            self.pending.push_back(PosterAsset {
                title: item.title,
                url,
                asset_name,
                kind,
                season: None,
                episode: None,
            });
        }
        Ok(())
    }

    fn expand_show(&mut self, show: MediaItem) -> Result<()> {
        let Some(asset_name) = derive_asset_name(&show) else {
            tracing::debug!(key = %show.key, "show without a usable name, skipped");
            return Ok(());
        };

        if let Some(url) = &show.poster_url {
            self.pending.push_back(PosterAsset {
                title: show.title.clone(),
                url: url.clone(),
                asset_name: asset_name.clone(),
                kind: AssetKind::Show,
                season: None,
                episode: None,
            });
        }

        for season in self.server.seasons(&show)? {
            let Some(season_number) = season.number else {
                continue;
            };
            if let Some(url) = &season.poster_url {
                self.pending.push_back(PosterAsset {
                    title: format!("{} - Season {}", show.title, season_number),
                    url: url.clone(),
                    asset_name: asset_name.clone(),
                    kind: AssetKind::Season,
                    season: Some(season_number),
                    episode: None,
                });
            }

            for episode in self.server.episodes(&season)? {
                let (Some(episode_number), Some(url)) = (episode.number, episode.thumb_url) else {
                    continue;
                };
                self.pending.push_back(PosterAsset {
                    title: format!(
                        "{} - S{:02}E{:02}",
                        show.title, season_number, episode_number
                    ),
                    url,
                    asset_name: asset_name.clone(),
                    kind: AssetKind::Episode,
                    season: Some(season_number),
                    episode: Some(episode_number),
                });
            }
        }
        Ok(())
    }
}

impl Iterator for PosterEnumerator<'_> {
    type Item = Result<PosterAsset>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(asset) = self.pending.pop_front() {
                return Some(Ok(asset));
            }
            if let Some(e) = self.deferred.take() {
                self.done = true;
                return Some(Err(e));
            }
            if self.done {
                return None;
            }
            let item = self.items.next()?;
            if let Err(e) = self.expand(item) {
                self.deferred = Some(e);
            }
        }
    }
}
