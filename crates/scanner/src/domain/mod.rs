#![forbid(unsafe_code)]

mod region;
mod signature;
mod verdict;

pub use region::{MappedRegion, Permissions};
pub use signature::SignatureSet;
pub use verdict::{ProcessReport, RegionMatch, ScanResult};
