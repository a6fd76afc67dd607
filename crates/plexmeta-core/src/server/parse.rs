//! Minimal Plex JSON structures (`Accept: application/json`).

use serde::Deserialize;

/// Every Plex response wraps its payload in `MediaContainer`.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    #[serde(rename = "MediaContainer")]
    pub container: T,
}

/// `GET /library/sections`.
#[derive(Debug, Default, Deserialize)]
pub struct SectionsContainer {
    #[serde(default, rename = "Directory")]
    pub directories: Vec<DirectoryEntry>,
}

#[derive(Debug, Deserialize)]
pub struct DirectoryEntry {
    pub key: String,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// `GET /library/sections/{key}/all` and `GET /library/metadata/{key}/children`.
/// Plex omits `Metadata` entirely when the list is empty.
#[derive(Debug, Default, Deserialize)]
pub struct MetadataContainer {
    #[serde(default, rename = "Metadata")]
    pub metadata: Vec<MetadataEntry>,
}

#[derive(Debug, Default, Deserialize)]
pub struct MetadataEntry {
    #[serde(default, rename = "ratingKey")]
    pub rating_key: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub year: Option<u16>,
    /// Season number for seasons, episode number for episodes.
    #[serde(default)]
    pub index: Option<u32>,
    #[serde(default)]
    pub thumb: Option<String>,
    #[serde(default, rename = "Media")]
    pub media: Vec<MediaEntry>,
    #[serde(default, rename = "Location")]
    pub locations: Vec<LocationEntry>,
}

#[derive(Debug, Default, Deserialize)]
pub struct MediaEntry {
    #[serde(default, rename = "Part")]
    pub parts: Vec<PartEntry>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PartEntry {
    #[serde(default)]
    pub file: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LocationEntry {
    pub path: String,
}

impl MetadataEntry {
    /// Folders holding the item on disk: the directory of each media file
    /// (movies), then the item's own folders (shows).
    pub fn on_disk_paths(&self) -> Vec<String> {
        self.media
            .iter()
            .flat_map(|m| m.parts.iter())
            .filter_map(|p| p.file.as_deref().and_then(parent_dir))
            .chain(self.locations.iter().map(|l| l.path.clone()))
            .collect()
    }
}

/// Directory part of a server-side file path, which may use either separator.
fn parent_dir(file: &str) -> Option<String> {
    file.trim()
        .rsplit_once(['/', '\\'])
        .map(|(dir, _)| dir.to_string())
        .filter(|dir| !dir.trim_matches(['/', '\\']).is_empty())
}
