//! `plexmeta download` – fetch artwork for one or all libraries.

use anyhow::Result;
use plexmeta_core::config::PlexmetaConfig;
use plexmeta_core::model::{DownloadJob, PlannedAsset};
use plexmeta_core::orchestrator::{DryRunPlan, Orchestrator};
use plexmeta_core::report::{DownloadReport, LibraryFailure};
use plexmeta_core::request::{DownloadOptions, DownloadRequest, LibrarySelection};
use plexmeta_core::server::{plex_session, MediaServer, PlexServer};
use std::io::{self, Write};
use std::path::Path;

pub fn run_download(opts: DownloadOptions, cfg: &PlexmetaConfig) -> Result<()> {
    let request = opts.resolve(cfg)?;
    let session = plex_session(&request.credentials.token)
        .with_timeout(cfg.timeout())
        .with_buffer_size(cfg.chunk_size);
    let plex = PlexServer::connect(&request.credentials.base_url, session)?;
    execute(&plex, &request, &mut io::stdout().lock())
}

/// Runs a resolved request against `server` and prints the outcome.
pub(crate) fn execute(
    server: &dyn MediaServer,
    request: &DownloadRequest,
    out: &mut dyn Write,
) -> Result<()> {
    let orchestrator = Orchestrator::new(server)
        .with_limit(request.limit)
        .with_failure_mode(request.failure_mode);
    let base_url = &request.credentials.base_url;

    if request.dry_run {
        let plan = match &request.selection {
            LibrarySelection::One(name) => {
                orchestrator.plan(&DownloadJob::new(&request.output_dir, name, base_url))?
            }
            LibrarySelection::All => orchestrator.plan_all(&request.output_dir)?,
        };
        render_plan(out, &plan)?;
    } else {
        let report = match &request.selection {
            LibrarySelection::One(name) => {
                orchestrator.download(&DownloadJob::new(&request.output_dir, name, base_url))?
            }
            LibrarySelection::All => orchestrator.download_all(&request.output_dir, base_url)?,
        };
        tracing::info!(
            downloaded = report.downloaded,
            missing = report.skipped_not_found,
            "download finished"
        );
        render_report(out, &report, &request.output_dir)?;
    }
    Ok(())
}

pub(crate) fn render_report(
    out: &mut dyn Write,
    report: &DownloadReport,
    output_dir: &Path,
) -> io::Result<()> {
    writeln!(
        out,
        "Downloaded {} posters to {}",
        report.downloaded,
        output_dir.display()
    )?;
    if !report.missing.is_empty() {
        writeln!(
            out,
            "Skipped {} missing posters (HTTP 404):",
            report.skipped_not_found
        )?;
        let width = report
            .missing
            .iter()
            .map(|a| a.title.chars().count())
            .max()
            .unwrap_or(0)
            .max("TITLE".len());
        writeln!(out, "  {:<width$}  {}", "TITLE", "URL")?;
        for asset in &report.missing {
            writeln!(out, "  {:<width$}  {}", asset.title, asset.url)?;
        }
    }
    render_duplicates(out, &report.duplicates)?;
    render_failures(out, &report.failed_libraries)
}

pub(crate) fn render_plan(out: &mut dyn Write, plan: &DryRunPlan) -> io::Result<()> {
    writeln!(
        out,
        "Dry run: {} posters would be downloaded.",
        plan.assets.len()
    )?;
    for planned in &plan.assets {
        writeln!(out, "  - {}", planned.target.display())?;
    }
    render_duplicates(out, &plan.duplicates)?;
    render_failures(out, &plan.failed_libraries)
}

fn render_duplicates(out: &mut dyn Write, duplicates: &[PlannedAsset]) -> io::Result<()> {
    if duplicates.is_empty() {
        return Ok(());
    }
    writeln!(
        out,
        "Skipped {} posters whose target was already used:",
        duplicates.len()
    )?;
    for d in duplicates {
        writeln!(out, "  {} -> {}", d.asset.title, d.target.display())?;
    }
    Ok(())
}

fn render_failures(out: &mut dyn Write, failures: &[LibraryFailure]) -> io::Result<()> {
    if failures.is_empty() {
        return Ok(());
    }
    writeln!(out, "Failed libraries:")?;
    for f in failures {
        writeln!(out, "  {}: {}", f.library, f.error)?;
    }
    Ok(())
}
