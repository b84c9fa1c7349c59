use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Signatures {
    /// Whether the compiled-in artifact list is included. Normally you do
    /// want that, it covers the bridge jar/dex and the well-known injection
    /// frameworks' library names, but you may want to turn it off to run
    /// against a fully custom list.
    pub builtin: bool,

    /// Additional path fragments to search for, merged on top of the
    /// compiled-in list. Fragments are matched case-insensitively as
    /// substrings of each mapped file's path, so a bare file name, a
    /// package name, or a full path prefix all work.
    pub extra: Vec<String>,

    /// Fragments removed after `builtin` and `extra` are merged. Useful to
    /// silence one compiled-in entry that false-positives in a particular
    /// environment without abandoning the rest of the list.
    pub disable: Vec<String>,
}

impl Default for Signatures {
    fn default() -> Self {
        Self {
            builtin: true,
            extra: Vec::new(),
            disable: Vec::new(),
        }
    }
}
