#![forbid(unsafe_code)]

use crate::domain::{ProcessReport, RegionMatch, ScanResult, SignatureSet};
use crate::error::Error;
use crate::procmaps;
use std::fs;
use std::path::PathBuf;
use tracing::{debug, trace, warn};

/// Scans a process's mapping list for injection-framework artifacts.
///
/// Every scan re-reads live state and is independent of every other scan,
/// so a single scanner can be shared by reference across threads and called
/// at any point in the process lifecycle.
#[derive(Debug, Clone, Default)]
pub struct ModuleScanner {
    signatures: SignatureSet,
}

impl ModuleScanner {
    pub fn new(signatures: SignatureSet) -> Self {
        Self { signatures }
    }

    pub fn from_config(config: &config::Config) -> Self {
        Self::new(SignatureSet::from_config(config))
    }

    pub fn signatures(&self) -> &SignatureSet {
        &self.signatures
    }

    /// Scan the calling process's own mapping list.
    pub fn scan(&self) -> Result<ScanResult, Error> {
        self.scan_maps_file("/proc/self/maps")
    }

    /// Scan another process's mapping list.
    pub fn scan_pid(&self, pid: u32) -> Result<ScanResult, Error> {
        self.scan_maps_file(format!("/proc/{pid}/maps"))
    }

    /// Scan a mapping listing at an explicit path, live or captured.
    pub fn scan_maps_file(&self, path: impl Into<PathBuf>) -> Result<ScanResult, Error> {
        let path = path.into();
        // Pathnames in the listing are raw bytes; lossy conversion keeps a
        // stray non-UTF-8 path from failing the whole scan.
        let bytes =
            fs::read(&path).map_err(|source| Error::ResourceUnavailable { path, source })?;
        let listing = String::from_utf8_lossy(&bytes);
        Ok(self.scan_lines(listing.lines()))
    }

    /// Scan an already-obtained listing, one maps line per item.
    ///
    /// Malformed lines are counted and skipped; they never abort the scan,
    /// since the exact field layout varies across kernel versions and one
    /// bad line must not mask an artifact on the next one.
    pub fn scan_lines<I, S>(&self, lines: I) -> ScanResult
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut result = ScanResult::default();
        for line in lines {
            let line = line.as_ref();
            if line.trim().is_empty() {
                continue;
            }
            let region = match procmaps::parse_line(line) {
                Ok(region) => region,
                Err(err) => {
                    debug!(%err, line, "skipping malformed maps line");
                    result.skipped_lines += 1;
                    continue;
                }
            };
            result.regions_examined += 1;
            let Some(path) = region.path() else {
                continue;
            };
            if let Some(signature) = self.signatures.match_path(path) {
                result.matches.push(RegionMatch {
                    path: path.to_owned(),
                    signature: signature.to_owned(),
                });
            }
        }
        trace!(
            regions = result.regions_examined,
            skipped = result.skipped_lines,
            matches = result.matches.len(),
            "mapping scan finished"
        );
        result
    }

    /// Boolean verdict for the calling process, stopping at the first hit.
    pub fn detect(&self) -> Result<bool, Error> {
        let path = PathBuf::from("/proc/self/maps");
        let bytes =
            fs::read(&path).map_err(|source| Error::ResourceUnavailable { path, source })?;
        let listing = String::from_utf8_lossy(&bytes);
        let hit = listing
            .lines()
            .filter_map(|line| procmaps::parse_line(line).ok())
            .any(|region| {
                region
                    .path()
                    .is_some_and(|p| self.signatures.match_path(p).is_some())
            });
        Ok(hit)
    }

    /// Scan every process visible in procfs.
    ///
    /// Processes that exit between enumeration and read, or that deny
    /// access, are skipped with a warning; only failing to enumerate at
    /// all is an error.
    pub fn sweep(&self) -> Result<Vec<ProcessReport>, Error> {
        let mut reports = Vec::new();
        for process in procfs::process::all_processes()? {
            let process = match process {
                Ok(p) => p,
                Err(err) => {
                    warn!(?err, "failed to read process entry");
                    continue;
                }
            };
            let pid = process.pid as u32;
            let exe = process.exe().ok();
            let result = match self.scan_pid(pid) {
                Ok(result) => result,
                Err(err) => {
                    warn!(pid, %err, "failed to read mapping list");
                    continue;
                }
            };
            reports.push(ProcessReport { pid, exe, result });
        }
        Ok(reports)
    }
}
