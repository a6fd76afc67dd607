//! CLI for plexmeta.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use plexmeta_core::config::{self, PlexmetaConfig};
use plexmeta_core::request::DownloadOptions;
use plexmeta_core::Error;
use std::path::PathBuf;

use commands::{run_completions, run_download, run_libraries_list};

/// Exit status for network and configuration failures.
pub const EXIT_FAILURE: i32 = 1;
/// Exit status for bad flag combinations (same as clap's own usage errors).
pub const EXIT_USAGE: i32 = 2;

/// Top-level CLI for plexmeta.
#[derive(Debug, Parser)]
#[command(name = "plexmeta")]
#[command(about = "Download Plex artwork into Kometa asset folders", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Download posters, season posters and episode thumbnails.
    Download {
        /// Plex server URL, e.g. http://127.0.0.1:32400.
        #[arg(long, env = "PLEX_BASE_URL", value_name = "URL")]
        base_url: Option<String>,

        /// Plex access token.
        #[arg(long, env = "PLEX_TOKEN", hide_env_values = true)]
        token: Option<String>,

        /// Library section to download (falls back to PLEX_LIBRARY).
        #[arg(long, value_name = "NAME")]
        library: Option<String>,

        /// Download every library section.
        #[arg(long, conflicts_with = "library")]
        all_libraries: bool,

        /// Root directory for the asset folders (default: "posters").
        #[arg(long, value_name = "DIR")]
        output_dir: Option<PathBuf>,

        /// Process at most N assets per library.
        #[arg(long, value_name = "N", value_parser = clap::value_parser!(u64).range(1..))]
        limit: Option<u64>,

        /// Print target paths without downloading anything.
        #[arg(long)]
        dry_run: bool,

        /// With --all-libraries, report a failing library and continue instead of aborting.
        #[arg(long)]
        skip_failed_libraries: bool,
    },

    /// Inspect library sections.
    Libraries {
        #[command(subcommand)]
        command: LibrariesCommand,
    },

    /// Print a shell completion script.
    Completions {
        /// Target shell.
        shell: Shell,
    },
}

#[derive(Debug, Subcommand)]
pub enum LibrariesCommand {
    /// List library sections as "Title (type)".
    List {
        /// Plex server URL, e.g. http://127.0.0.1:32400.
        #[arg(long, env = "PLEX_BASE_URL", value_name = "URL")]
        base_url: Option<String>,

        /// Plex access token.
        #[arg(long, env = "PLEX_TOKEN", hide_env_values = true)]
        token: Option<String>,
    },
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        cli.command.run()
    }

    fn run(self) -> Result<()> {
        match self {
            CliCommand::Download {
                base_url,
                token,
                library,
                all_libraries,
                output_dir,
                limit,
                dry_run,
                skip_failed_libraries,
            } => {
                let opts = DownloadOptions {
                    base_url,
                    token,
                    library,
                    env_library: std::env::var("PLEX_LIBRARY").ok(),
                    all_libraries,
                    output_dir,
                    limit: limit.map(|n| usize::try_from(n).unwrap_or(usize::MAX)),
                    dry_run,
                    skip_failed_libraries,
                };
                let cfg = download_config(&opts, config::find_config_file())?;
                run_download(opts, &cfg)?;
            }
            CliCommand::Libraries {
                command: LibrariesCommand::List { base_url, token },
            } => {
                let cfg = load_config()?;
                run_libraries_list(base_url, token, &cfg)?;
            }
            CliCommand::Completions { shell } => run_completions(shell)?,
        }
        Ok(())
    }
}

/// Config for `download`. Usage problems surface before any config file is
/// read or created.
fn download_config(opts: &DownloadOptions, config_file: Option<PathBuf>) -> Result<PlexmetaConfig> {
    match opts.selection_config(config_file.as_deref())? {
        Some(cfg) => Ok(cfg),
        None => load_config(),
    }
}

/// Loads the config file. An unreadable config directory only costs the
/// fallbacks; a malformed file is an error.
fn load_config() -> Result<PlexmetaConfig> {
    match config::load_or_init() {
        Ok(cfg) => {
            tracing::debug!("loaded config: {:?}", cfg.output_dir);
            Ok(cfg)
        }
        Err(Error::Io(e)) => {
            tracing::warn!("config file unavailable, using defaults: {}", e);
            Ok(PlexmetaConfig::default())
        }
        Err(e) => Err(e.into()),
    }
}

/// Process exit status for a failed command.
pub fn exit_code(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<Error>() {
        Some(Error::Usage(_)) => EXIT_USAGE,
        _ => EXIT_FAILURE,
    }
}

/// One-line message for a failed command, prefixed by error class.
pub fn error_message(err: &anyhow::Error) -> String {
    match err.downcast_ref::<Error>() {
        Some(Error::Usage(m)) => format!("Usage error: {m}\nSee 'plexmeta download --help'."),
        Some(Error::Config(m)) => format!("Configuration error: {m}"),
        Some(Error::LibraryNotFound(name)) => format!("Library not found: {name}"),
        Some(e) if e.is_network() => format!("Request failed: {err:#}"),
        _ => format!("plexmeta error: {err:#}"),
    }
}

#[cfg(test)]
mod tests;
