use crate::http::{DEFAULT_BUFFER_SIZE, DEFAULT_TIMEOUT};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

fn default_output_dir() -> PathBuf {
    PathBuf::from("posters")
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT.as_secs()
}

fn default_chunk_size() -> usize {
    DEFAULT_BUFFER_SIZE
}

/// Global configuration loaded from `~/.config/plexmeta/config.toml`.
///
/// Every field is a fallback: command-line flags and `PLEX_*` environment
/// variables take precedence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlexmetaConfig {
    /// Plex server URL, e.g. `http://127.0.0.1:32400`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Plex access token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    /// Library used when neither `--library` nor `--all-libraries` is given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub library: Option<String>,
    /// Root of the asset folders.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Receive buffer size in bytes for artwork transfers.
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
}

impl Default for PlexmetaConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            token: None,
            library: None,
            output_dir: default_output_dir(),
            timeout_secs: default_timeout_secs(),
            chunk_size: default_chunk_size(),
        }
    }
}

impl PlexmetaConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("plexmeta")
        .map_err(|e| Error::config(format!("cannot locate config directory: {e}")))?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Path of an existing config file, found without creating anything.
pub fn find_config_file() -> Option<PathBuf> {
    xdg::BaseDirectories::with_prefix("plexmeta")
        .ok()?
        .find_config_file("config.toml")
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<PlexmetaConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = PlexmetaConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)
            .map_err(|e| Error::config(format!("cannot serialize default config: {e}")))?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    load_from_path(&path)
}

pub fn load_from_path(path: &Path) -> Result<PlexmetaConfig> {
    let data = fs::read_to_string(path)?;
    toml::from_str(&data).map_err(|e| Error::config(format!("{}: {e}", path.display())))
}
