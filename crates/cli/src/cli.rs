use clap::Parser;
use clap_verbosity_flag::{Verbosity, WarnLevel};
use std::path::{Path, PathBuf};

/// injectscan: loaded-module injection detector
///
/// injectscan reads a process's memory-mapping list and searches the paths
/// of its file-backed regions for artifacts of code-injection frameworks
/// (hooking bridges, instrumentation agents and the like). By default it
/// scans its own process; a target pid, a captured maps listing, or a sweep
/// over all visible processes can be selected instead.
#[derive(Debug, Parser, Clone)]
#[command(about, long_about, version)]
pub struct Cli {
    /// Path to configuration file.
    ///
    /// If not provided, the default locations are checked. They are
    /// `/etc/injectscan/config.toml` and `/etc/injectscan/config.d/*.toml`,
    /// where the latter being a glob pattern. If they don't exist, the
    /// compiled-in signature list is used as-is.
    #[arg(short, long, value_parser = validate_file)]
    pub conffile: Option<PathBuf>,

    /// Scan the mapping list of this pid instead of our own process.
    #[arg(short, long, group = "target")]
    pub pid: Option<u32>,

    /// Scan a captured maps listing at this path instead of a live process.
    #[arg(short, long, group = "target", value_parser = validate_file)]
    pub maps_file: Option<PathBuf>,

    /// Sweep every process visible in procfs.
    #[arg(short, long, group = "target")]
    pub all: bool,

    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,
}

/// Check if the file exists.
#[inline(always)]
fn validate_file(file: &str) -> Result<PathBuf, String> {
    let path = Path::new(file);
    if path.exists() {
        Ok(path.to_owned())
    } else {
        Err(format!("File not found: {:?}", path))
    }
}
