#![forbid(unsafe_code)]

use std::path::PathBuf;

/// A backed region whose path contained a signature fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionMatch {
    pub path: PathBuf,
    /// The signature fragment that hit, as stored in the set (case-folded).
    pub signature: String,
}

/// Outcome of one pass over a mapping list.
///
/// The verdict is derived from the match list rather than stored, so the
/// diagnostic data and the boolean can never disagree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanResult {
    pub matches: Vec<RegionMatch>,
    /// Regions parsed and examined, whether or not they carried a path.
    pub regions_examined: usize,
    /// Malformed lines skipped without aborting the scan.
    pub skipped_lines: usize,
}

impl ScanResult {
    pub fn detected(&self) -> bool {
        !self.matches.is_empty()
    }
}

/// One process's entry in a [`sweep`](crate::ModuleScanner::sweep) report.
#[derive(Debug, Clone)]
pub struct ProcessReport {
    pub pid: u32,
    /// Resolved executable path, when the process allowed reading it.
    pub exe: Option<PathBuf>,
    pub result: ScanResult,
}
