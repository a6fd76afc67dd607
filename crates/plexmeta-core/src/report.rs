//! Download report accumulated across libraries.

use crate::model::{PlannedAsset, PosterAsset};

/// A library that was skipped in all-libraries mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryFailure {
    pub library: String,
    pub error: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DownloadReport {
    pub downloaded: usize,
    /// Assets the server answered 404 for.
    pub skipped_not_found: usize,
    /// The 404 assets, in enumeration order.
    pub missing: Vec<PosterAsset>,
    /// Assets whose target path an earlier asset of the run already took.
    pub duplicates: Vec<PlannedAsset>,
    pub failed_libraries: Vec<LibraryFailure>,
}

impl DownloadReport {
    pub fn record_downloaded(&mut self) {
        self.downloaded += 1;
    }

    pub fn record_missing(&mut self, asset: PosterAsset) {
        self.skipped_not_found += 1;
        self.missing.push(asset);
    }

    pub fn record_duplicate(&mut self, planned: PlannedAsset) {
        self.duplicates.push(planned);
    }

    /// Sums counts and appends `other`'s lists after this report's.
    pub fn merge(&mut self, other: DownloadReport) {
        self.downloaded += other.downloaded;
        self.skipped_not_found += other.skipped_not_found;
        self.missing.extend(other.missing);
        self.duplicates.extend(other.duplicates);
        self.failed_libraries.extend(other.failed_libraries);
    }

    pub fn processed(&self) -> usize {
        self.downloaded + self.skipped_not_found
    }
}
