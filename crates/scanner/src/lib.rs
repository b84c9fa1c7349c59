#![forbid(unsafe_code)]

//! Detects code-injection frameworks by inspecting a process's loaded-module
//! list: the mapping listing is read, each file-backed region's path is
//! tested against a set of known artifact fragments, and every hit is
//! reported alongside the verdict.

pub mod domain;
pub mod error;
pub mod procmaps;
pub mod scan;

pub use domain::{MappedRegion, Permissions, ProcessReport, RegionMatch, ScanResult, SignatureSet};
pub use error::Error;
pub use procmaps::ParseError;
pub use scan::ModuleScanner;
