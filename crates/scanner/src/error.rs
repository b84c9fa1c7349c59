#![forbid(unsafe_code)]

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The maps resource could not be opened or read at all. Distinct from a
    /// negative verdict: "could not check" must never read as "nothing found".
    #[error("mapping list {path:?} unavailable: {source}")]
    ResourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to enumerate processes: {0}")]
    ProcessList(#[from] procfs::ProcError),
}
