//! Read-only views of server objects plus the transient values built from them.

use std::path::PathBuf;

/// Kind of a library section as far as artwork layout is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LibraryKind {
    Movie,
    Show,
    Other,
}

impl LibraryKind {
    /// Maps the server's section type (`movie`, `show`, `artist`, `photo`, ...).
    pub fn from_type(raw: &str) -> Self {
        match raw {
            "movie" => LibraryKind::Movie,
            "show" => LibraryKind::Show,
            _ => LibraryKind::Other,
        }
    }
}

/// A named library section on the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibrarySection {
    /// Section key used in API paths (`/library/sections/{key}/all`).
    pub key: String,
    pub title: String,
    pub kind: LibraryKind,
    /// Type string exactly as the server reported it.
    pub type_name: String,
}

impl LibrarySection {
    pub fn new(key: impl Into<String>, title: impl Into<String>, type_name: impl Into<String>) -> Self {
        let type_name = type_name.into();
        Self {
            key: key.into(),
            title: title.into(),
            kind: LibraryKind::from_type(&type_name),
            type_name,
        }
    }
}

/// A top-level item of a section (movie, show, artist, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MediaItem {
    pub key: String,
    pub title: String,
    pub year: Option<u16>,
    /// Folders holding the item on disk, asset-folder candidates first.
    pub locations: Vec<String>,
    pub poster_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Season {
    pub key: String,
    pub number: Option<u32>,
    pub poster_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Episode {
    pub title: String,
    pub number: Option<u32>,
    pub thumb_url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Movie,
    Show,
    Season,
    Episode,
    Other,
}

/// One piece of artwork to fetch, with everything needed to name it on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PosterAsset {
    pub title: String,
    pub url: String,
    /// Asset folder name under the output directory.
    pub asset_name: String,
    pub kind: AssetKind,
    pub season: Option<u32>,
    pub episode: Option<u32>,
}

/// Per-library download configuration. Built once per library processed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadJob {
    pub output_dir: PathBuf,
    pub library: String,
    pub base_url: String,
}

impl DownloadJob {
    pub fn new(output_dir: impl Into<PathBuf>, library: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            output_dir: output_dir.into(),
            library: library.into(),
            base_url: base_url.into(),
        }
    }
}

/// A dry-run entry: the asset and where it would be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedAsset {
    pub asset: PosterAsset,
    pub target: PathBuf,
}
