#![forbid(unsafe_code)]

use std::path::{Path, PathBuf};

/// Permission flags of a mapped region, from the `rwxp`/`rwxs` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Permissions {
    pub read: bool,
    pub write: bool,
    pub execute: bool,
    /// Shared mapping (`s`) as opposed to private copy-on-write (`p`).
    pub shared: bool,
}

/// One entry of a process mapping list.
///
/// Values are built fresh from the current listing on every scan and never
/// cached: the mapping list reflects live process state and code can be
/// loaded or unloaded between reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappedRegion {
    pub start: u64,
    pub end: u64,
    pub perms: Permissions,
    pub offset: u64,
    /// Device major number. 0 = anonymous or pseudo mapping.
    pub dev_major: u32,
    /// Device minor number. 0 = anonymous or pseudo mapping.
    pub dev_minor: u32,
    /// Inode number. 0 = anonymous or pseudo mapping.
    pub inode: u64,
    /// Backing file path. Absent for anonymous mappings and for pseudo
    /// entries such as `[heap]` or `[vdso]`.
    pub path: Option<PathBuf>,
}

impl MappedRegion {
    pub fn length(&self) -> u64 {
        self.end.saturating_sub(self.start)
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}
