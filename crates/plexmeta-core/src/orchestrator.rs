//! Download orchestration: enumerator + downloader over one or all
//! libraries, with the optional per-library limit and dry-run planning.

use crate::downloader::{DownloadOutcome, Downloader};
use crate::enumerator::PosterEnumerator;
use crate::http::HttpSession;
use crate::model::{DownloadJob, LibrarySection, PlannedAsset, PosterAsset};
use crate::naming::target_path;
use crate::report::{DownloadReport, LibraryFailure};
use crate::server::MediaServer;
use crate::{Error, Result};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// What all-libraries mode does when one library fails on the server side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LibraryFailureMode {
    /// Stop the whole run with the library's error.
    #[default]
    Abort,
    /// Record the library as failed and carry on with the next one.
    /// Local failures (disk, configuration) still abort.
    Skip,
}

/// Result of a dry run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DryRunPlan {
    pub assets: Vec<PlannedAsset>,
    /// Assets left out because an earlier asset already targets their path.
    pub duplicates: Vec<PlannedAsset>,
    pub failed_libraries: Vec<LibraryFailure>,
}

pub struct Orchestrator<'a> {
    server: &'a dyn MediaServer,
    downloader: Downloader<'a>,
    limit: Option<usize>,
    failure_mode: LibraryFailureMode,
}

impl<'a> Orchestrator<'a> {
    /// Downloads through the server's own session unless
    /// [`with_session`](Self::with_session) overrides it.
    pub fn new(server: &'a dyn MediaServer) -> Self {
        Self {
            server,
            downloader: Downloader::new(server.http_session()),
            limit: None,
            failure_mode: LibraryFailureMode::default(),
        }
    }

    pub fn with_session(mut self, session: &'a dyn HttpSession) -> Self {
        self.downloader = Downloader::new(Some(session));
        self
    }

    /// Caps the number of assets processed per library (first N in
    /// enumeration order).
    pub fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_failure_mode(mut self, mode: LibraryFailureMode) -> Self {
        self.failure_mode = mode;
        self
    }

    pub fn list_libraries(&self) -> Result<Vec<LibrarySection>> {
        self.server.sections()
    }

    /// Dry run for one library: target paths, no artwork transfer.
    pub fn plan(&self, job: &DownloadJob) -> Result<DryRunPlan> {
        let section = self.server.section(&job.library)?;
        let mut plan = DryRunPlan::default();
        self.plan_section(&section, &job.output_dir, &mut HashSet::new(), &mut plan)?;
        Ok(plan)
    }

    /// Downloads one library's artwork into `job.output_dir`.
    pub fn download(&self, job: &DownloadJob) -> Result<DownloadReport> {
        let section = self.server.section(&job.library)?;
        let mut report = DownloadReport::default();
        self.download_section(&section, job, &mut HashSet::new(), &mut report)?;
        Ok(report)
    }

    pub fn plan_all(&self, output_dir: &Path) -> Result<DryRunPlan> {
        let mut plan = DryRunPlan::default();
        let mut seen = HashSet::new();
        for section in self.server.sections()? {
            if let Err(e) = self.plan_section(&section, output_dir, &mut seen, &mut plan) {
                let failure = self.library_failed(&section, e)?;
                plan.failed_libraries.push(failure);
            }
        }
        Ok(plan)
    }

    /// Downloads every library, one [`DownloadJob`] per section, merging the
    /// reports in server order. Target paths are unique across the whole run.
    pub fn download_all(&self, output_dir: &Path, base_url: &str) -> Result<DownloadReport> {
        let mut report = DownloadReport::default();
        let mut seen = HashSet::new();
        for section in self.server.sections()? {
            let job = DownloadJob::new(output_dir, section.title.clone(), base_url);
            let mut library_report = DownloadReport::default();
            let outcome = self.download_section(&section, &job, &mut seen, &mut library_report);
            report.merge(library_report);
            if let Err(e) = outcome {
                let failure = self.library_failed(&section, e)?;
                report.failed_libraries.push(failure);
            }
        }
        Ok(report)
    }

    /// Turns a library error into a recorded failure, or hands it back when
    /// the run must abort.
    fn library_failed(&self, section: &LibrarySection, e: Error) -> Result<LibraryFailure> {
        if self.failure_mode == LibraryFailureMode::Skip && e.is_network() {
            tracing::warn!(library = %section.title, "library failed, skipping: {}", e);
            Ok(LibraryFailure {
                library: section.title.clone(),
                error: e.to_string(),
            })
        } else {
            Err(e)
        }
    }

    /// First-N assets of a section with their enumeration index.
    fn assets(
        &self,
        section: &LibrarySection,
    ) -> Result<impl Iterator<Item = (usize, Result<PosterAsset>)> + 'a> {
        let limit = self.limit.unwrap_or(usize::MAX);
        Ok(PosterEnumerator::new(self.server, section)?
            .take(limit)
            .enumerate())
    }

    fn plan_section(
        &self,
        section: &LibrarySection,
        output_dir: &Path,
        seen: &mut HashSet<PathBuf>,
        plan: &mut DryRunPlan,
    ) -> Result<()> {
        for (index, asset) in self.assets(section)? {
            let planned = plan_asset(output_dir, asset?, index);
            if claim_target(seen, &planned) {
                plan.assets.push(planned);
            } else {
                plan.duplicates.push(planned);
            }
        }
        Ok(())
    }

    fn download_section(
        &self,
        section: &LibrarySection,
        job: &DownloadJob,
        seen: &mut HashSet<PathBuf>,
        report: &mut DownloadReport,
    ) -> Result<()> {
        tracing::info!(
            library = %section.title,
            output_dir = %job.output_dir.display(),
            server = %job.base_url,
            "downloading artwork"
        );
        for (index, asset) in self.assets(section)? {
            let planned = plan_asset(&job.output_dir, asset?, index);
            if !claim_target(seen, &planned) {
                report.record_duplicate(planned);
                continue;
            }
            match self.downloader.download(&planned.asset.url, &planned.target)? {
                DownloadOutcome::Downloaded { .. } => report.record_downloaded(),
                DownloadOutcome::NotFound => report.record_missing(planned.asset),
            }
        }
        tracing::info!(
            library = %section.title,
            downloaded = report.downloaded,
            skipped = report.skipped_not_found,
            "library done"
        );
        Ok(())
    }
}

fn plan_asset(output_dir: &Path, asset: PosterAsset, index: usize) -> PlannedAsset {
    PlannedAsset {
        target: target_path(output_dir, &asset, index),
        asset,
    }
}

/// Marks the asset's target as taken for this run; `false` when an earlier
/// asset already had it.
fn claim_target(seen: &mut HashSet<PathBuf>, planned: &PlannedAsset) -> bool {
    if seen.insert(planned.target.clone()) {
        return true;
    }
    tracing::warn!(
        title = %planned.asset.title,
        path = %planned.target.display(),
        "target already used in this run, skipped"
    );
    false
}
