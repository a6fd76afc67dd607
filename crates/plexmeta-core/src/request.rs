//! Operator input validation.
//!
//! Raw options (flags with their environment fallbacks already applied by the
//! CLI parser) are resolved against the config file into validated requests.
//! Flag-combination problems are `Error::Usage` and are detected before any
//! credential check, so a bad invocation never reaches the network.

use crate::config::{self, PlexmetaConfig};
use crate::orchestrator::LibraryFailureMode;
use crate::{Error, Result};
use std::path::{Path, PathBuf};

const MISSING_SELECTION: &str = "one of --library or --all-libraries is required";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LibrarySelection {
    One(String),
    All,
}

/// Server URL and token, both non-blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub base_url: String,
    pub token: String,
}

impl Credentials {
    pub fn resolve(
        base_url: Option<String>,
        token: Option<String>,
        cfg: &PlexmetaConfig,
    ) -> Result<Self> {
        let base_url = non_blank(base_url)
            .or_else(|| non_blank(cfg.base_url.clone()))
            .ok_or_else(|| Error::config("missing server URL: pass --base-url or set PLEX_BASE_URL"))?;
        let token = non_blank(token)
            .or_else(|| non_blank(cfg.token.clone()))
            .ok_or_else(|| Error::config("missing access token: pass --token or set PLEX_TOKEN"))?;
        Ok(Self { base_url, token })
    }
}

/// Unvalidated `download` options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DownloadOptions {
    pub base_url: Option<String>,
    pub token: Option<String>,
    /// `--library` as given on the command line.
    pub library: Option<String>,
    /// `PLEX_LIBRARY`, consulted only when no selection flag is given.
    pub env_library: Option<String>,
    pub all_libraries: bool,
    pub output_dir: Option<PathBuf>,
    pub limit: Option<usize>,
    pub dry_run: bool,
    pub skip_failed_libraries: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    pub credentials: Credentials,
    pub selection: LibrarySelection,
    pub output_dir: PathBuf,
    pub limit: Option<usize>,
    pub dry_run: bool,
    pub failure_mode: LibraryFailureMode,
}

impl DownloadOptions {
    /// Flag-combination checks that need nothing beyond the options.
    pub fn check_usage(&self) -> Result<()> {
        if self.library.is_some() && self.all_libraries {
            return Err(Error::usage(
                "--library and --all-libraries are mutually exclusive",
            ));
        }
        if matches!(&self.library, Some(name) if name.trim().is_empty()) {
            return Err(Error::usage("--library must not be empty"));
        }
        if self.limit == Some(0) {
            return Err(Error::usage("--limit must be at least 1"));
        }
        Ok(())
    }

    /// True when neither a flag nor `PLEX_LIBRARY` picks the library, so
    /// only the config file can.
    pub fn needs_config_library(&self) -> bool {
        self.library.is_none()
            && !self.all_libraries
            && non_blank(self.env_library.clone()).is_none()
    }

    /// Reads an existing config file when it is the only possible source of
    /// the library, without creating anything. Returns `Ok(None)` when the
    /// selection does not depend on it.
    ///
    /// A missing, unreadable or library-less file is the operator's missing
    /// selection flag, so it is a usage error.
    pub fn selection_config(&self, config_file: Option<&Path>) -> Result<Option<PlexmetaConfig>> {
        self.check_usage()?;
        if !self.needs_config_library() {
            return Ok(None);
        }
        let cfg = config_file.and_then(|path| match config::load_from_path(path) {
            Ok(cfg) => Some(cfg),
            Err(e) => {
                tracing::warn!("ignoring config file for library selection: {}", e);
                None
            }
        });
        match cfg {
            Some(cfg) if non_blank(cfg.library.clone()).is_some() => Ok(Some(cfg)),
            _ => Err(Error::usage(MISSING_SELECTION)),
        }
    }

    pub fn resolve(self, cfg: &PlexmetaConfig) -> Result<DownloadRequest> {
        self.check_usage()?;
        let selection = match (self.library, self.all_libraries) {
            (Some(name), _) => LibrarySelection::One(name.trim().to_string()),
            (None, true) => LibrarySelection::All,
            (None, false) => non_blank(self.env_library)
                .or_else(|| non_blank(cfg.library.clone()))
                .map(LibrarySelection::One)
                .ok_or_else(|| Error::usage(MISSING_SELECTION))?,
        };

        let credentials = Credentials::resolve(self.base_url, self.token, cfg)?;
        let failure_mode = if self.skip_failed_libraries {
            LibraryFailureMode::Skip
        } else {
            LibraryFailureMode::Abort
        };

        Ok(DownloadRequest {
            credentials,
            selection,
            output_dir: self.output_dir.unwrap_or_else(|| cfg.output_dir.clone()),
            limit: self.limit,
            dry_run: self.dry_run,
            failure_mode,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
