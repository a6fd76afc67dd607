//! `plexmeta libraries list` – show library sections.

use anyhow::Result;
use plexmeta_core::config::PlexmetaConfig;
use plexmeta_core::model::LibrarySection;
use plexmeta_core::orchestrator::Orchestrator;
use plexmeta_core::request::Credentials;
use plexmeta_core::server::{plex_session, PlexServer};
use std::io::{self, Write};

pub fn run_libraries_list(
    base_url: Option<String>,
    token: Option<String>,
    cfg: &PlexmetaConfig,
) -> Result<()> {
    let creds = Credentials::resolve(base_url, token, cfg)?;
    let session = plex_session(&creds.token).with_timeout(cfg.timeout());
    let plex = PlexServer::connect(&creds.base_url, session)?;
    let sections = Orchestrator::new(&plex).list_libraries()?;
    render_libraries(&mut io::stdout().lock(), &sections)?;
    Ok(())
}

pub(crate) fn render_libraries(out: &mut dyn Write, sections: &[LibrarySection]) -> io::Result<()> {
    if sections.is_empty() {
        writeln!(out, "No library sections on this server.")?;
    }
    for s in sections {
        writeln!(out, "{} ({})", s.title, s.type_name)?;
    }
    Ok(())
}
