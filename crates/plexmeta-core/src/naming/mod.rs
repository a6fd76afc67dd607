//! Asset naming: item metadata to Kometa asset folder and file names.
//!
//! Layout produced under the output directory:
//!
//! ```text
//! Movie One (1999)/poster.jpg
//! Show Name/poster.jpg
//! Show Name/Season01.jpg
//! Show Name/S01E02.jpg
//! ```

mod sanitize;

use crate::model::{AssetKind, MediaItem, PosterAsset};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

pub use sanitize::sanitize_folder_name;

/// Returned when a name normalizes to nothing.
pub const FALLBACK_ASSET_NAME: &str = "untitled";

/// Extension of every artwork file written.
pub const ARTWORK_EXTENSION: &str = "jpg";

/// Extensions stripped from file-derived names. Anything else after a dot is
/// part of the title ("Mr. Robot", "Show.Name").
const STRIPPED_EXTENSIONS: &[&str] = &[
    "mkv", "mp4", "avi", "m4v", "mov", "wmv", "ts", "m2ts", "webm", "mpg", "mpeg", "flv", "iso",
    "vob", "ogv", "divx", "jpg", "png",
];

static TITLE_YEAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<title>.+?)\s*\((?P<year>\d{4})\)").expect("title/year pattern is valid")
});

/// Normalizes a raw folder or file name into an asset folder name.
///
/// `Movie One (1999) {imdb-tt0000001} [1080p].mkv` becomes `Movie One (1999)`;
/// without a year the name is cut at the first `{` or `[` tag. Never fails.
pub fn normalize_asset_name(raw: &str) -> String {
    let stem = strip_media_extension(raw.trim());

    let kept = match TITLE_YEAR.captures(stem) {
        Some(caps) if !caps["title"].trim().is_empty() => {
            format!("{} ({})", caps["title"].trim(), &caps["year"])
        }
        _ => {
            let cut = stem.find(['{', '[']).unwrap_or(stem.len());
            stem[..cut].trim().to_string()
        }
    };

    let sanitized = sanitize_folder_name(&kept);
    if sanitized.is_empty() || sanitized == "." || sanitized == ".." {
        FALLBACK_ASSET_NAME.to_string()
    } else {
        sanitized
    }
}

fn strip_media_extension(name: &str) -> &str {
    match name.rsplit_once('.') {
        Some((stem, ext))
            if !stem.is_empty()
                && STRIPPED_EXTENSIONS
                    .iter()
                    .any(|known| known.eq_ignore_ascii_case(ext)) =>
        {
            stem
        }
        _ => name,
    }
}

/// Last component of a server-side path, which may use either separator.
fn basename(location: &str) -> &str {
    location
        .trim_end_matches(['/', '\\'])
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or("")
}

/// Asset folder name for an item, or `None` when there is nothing to derive
/// it from (no on-disk location and a blank title).
///
/// The first on-disk location wins so folders line up with the media on
/// disk; otherwise `Title (Year)` is used.
pub fn derive_asset_name(item: &MediaItem) -> Option<String> {
    let from_location = item
        .locations
        .iter()
        .map(|l| basename(l.trim()))
        .find(|b| !b.trim().is_empty());
    if let Some(base) = from_location {
        return Some(normalize_asset_name(base));
    }

    let title = item.title.trim();
    if title.is_empty() {
        return None;
    }
    Some(match item.year {
        Some(year) => normalize_asset_name(&format!("{title} ({year})")),
        None => normalize_asset_name(title),
    })
}

/// Filename stem for an asset. `index` is the asset's position in the
/// library enumeration and only shows up in the `poster_N` fallback.
pub fn asset_stem(asset: &PosterAsset, index: usize) -> String {
    match (asset.kind, asset.season, asset.episode) {
        (AssetKind::Movie | AssetKind::Show, _, _) => "poster".to_string(),
        (AssetKind::Season, Some(season), _) => format!("Season{season:02}"),
        (AssetKind::Episode, Some(season), Some(episode)) => format!("S{season:02}E{episode:02}"),
        _ => format!("poster_{index}"),
    }
}

/// `OUTPUT_DIR/<asset name>/<stem>.jpg`.
pub fn target_path(output_dir: &Path, asset: &PosterAsset, index: usize) -> PathBuf {
    output_dir
        .join(&asset.asset_name)
        .join(format!("{}.{}", asset_stem(asset, index), ARTWORK_EXTENSION))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn asset(kind: AssetKind, season: Option<u32>, episode: Option<u32>) -> PosterAsset {
        PosterAsset {
            title: "Show Name".to_string(),
            url: "http://plex/thumb".to_string(),
            asset_name: "Show Name".to_string(),
            kind,
            season,
            episode,
        }
    }

    #[test]
    fn strips_extension() {
        assert_eq!(normalize_asset_name("Movie One (1999).mkv"), "Movie One (1999)");
    }

    #[test]
    fn keeps_title_year_and_drops_tags() {
        assert_eq!(
            normalize_asset_name("Movie One (1999) {imdb-tt0000001} [Bluray-1080p].mkv"),
            "Movie One (1999)"
        );
        assert_eq!(
            normalize_asset_name("Blade Runner 2049 (2017) [2160p]"),
            "Blade Runner 2049 (2017)"
        );
        assert_eq!(
            normalize_asset_name("Love (Actually) (2003)"),
            "Love (Actually) (2003)"
        );
    }

    #[test]
    fn without_year_truncates_at_first_tag() {
        assert_eq!(normalize_asset_name("Show Name {tvdb-12345}"), "Show Name");
        assert_eq!(normalize_asset_name("Show Name [imdb-tt1]{x}"), "Show Name");
        assert_eq!(normalize_asset_name("Plain Title"), "Plain Title");
    }

    #[test]
    fn dots_in_titles_survive() {
        assert_eq!(normalize_asset_name("Mr. Robot"), "Mr. Robot");
        assert_eq!(normalize_asset_name("Show.Name"), "Show.Name");
    }

    #[test]
    fn empty_input_falls_back() {
        assert_eq!(normalize_asset_name(""), FALLBACK_ASSET_NAME);
        assert_eq!(normalize_asset_name("   "), FALLBACK_ASSET_NAME);
        assert_eq!(normalize_asset_name("[only tags]"), FALLBACK_ASSET_NAME);
        assert_eq!(normalize_asset_name(".."), FALLBACK_ASSET_NAME);
    }

    #[test]
    fn derive_prefers_location_basename() {
        let item = MediaItem {
            title: "Movie One".to_string(),
            locations: vec!["/media/Movies/Movie One (1999) [1080p]".into()],
            ..Default::default()
        };
        assert_eq!(derive_asset_name(&item).as_deref(), Some("Movie One (1999)"));

        let show = MediaItem {
            title: "Show Name".to_string(),
            locations: vec!["D:\\TV\\Show Name {tvdb-1}\\".into()],
            ..Default::default()
        };
        assert_eq!(derive_asset_name(&show).as_deref(), Some("Show Name"));
    }

    #[test]
    fn derive_falls_back_to_title_and_year() {
        let item = MediaItem {
            title: "Movie Two".to_string(),
            year: Some(2004),
            ..Default::default()
        };
        assert_eq!(derive_asset_name(&item).as_deref(), Some("Movie Two (2004)"));

        let no_year = MediaItem {
            title: "Movie Three".to_string(),
            ..Default::default()
        };
        assert_eq!(derive_asset_name(&no_year).as_deref(), Some("Movie Three"));
    }

    #[test]
    fn derive_none_without_location_or_title() {
        let item = MediaItem {
            title: "  ".to_string(),
            locations: vec!["".into()],
            ..Default::default()
        };
        assert_eq!(derive_asset_name(&item), None);
    }

    #[test]
    fn stem_for_movie_ignores_index() {
        assert_eq!(asset_stem(&asset(AssetKind::Movie, None, None), 3), "poster");
        assert_eq!(asset_stem(&asset(AssetKind::Show, None, None), 7), "poster");
    }

    #[test]
    fn stem_for_season_and_episode() {
        assert_eq!(asset_stem(&asset(AssetKind::Season, Some(1), None), 0), "Season01");
        assert_eq!(asset_stem(&asset(AssetKind::Season, Some(0), None), 0), "Season00");
        assert_eq!(asset_stem(&asset(AssetKind::Episode, Some(1), Some(2)), 0), "S01E02");
        assert_eq!(
            asset_stem(&asset(AssetKind::Episode, Some(2), Some(104)), 0),
            "S02E104"
        );
    }

    #[test]
    fn stem_fallback_uses_index() {
        assert_eq!(asset_stem(&asset(AssetKind::Other, None, None), 4), "poster_4");
        assert_eq!(asset_stem(&asset(AssetKind::Episode, Some(1), None), 9), "poster_9");
    }

    #[test]
    fn target_path_layout() {
        let out = Path::new("/tmp/posters");
        let p = target_path(out, &asset(AssetKind::Episode, Some(1), Some(2)), 0);
        assert_eq!(p, Path::new("/tmp/posters/Show Name/S01E02.jpg"));
    }
}
