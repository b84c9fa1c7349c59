#![forbid(unsafe_code)]

use std::path::Path;
use std::sync::Arc;

/// Path fragments of on-disk artifacts that the common injection frameworks
/// leave in a hooked process's mapping list. Matching is substring
/// containment, so the installer package name also covers apk paths like
/// `/data/app/de.robv.android.xposed.installer-1/base.apk`.
const BUILTIN_SIGNATURES: &[&str] = &[
    "xposedbridge.jar",
    "xposedbridge.dex",
    "de.robv.android.xposed.installer",
    "libxposed_art.so",
    "app_process_xposed",
    "libriru",
    "liblspd.so",
    "lspatch",
    "libsubstrate.so",
    "frida-agent",
    "libfrida",
];

/// Immutable, case-folded set of injection-artifact path fragments.
///
/// Built once at startup and shared by reference across scans; never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureSet {
    fragments: Arc<[String]>,
}

impl SignatureSet {
    /// The compiled-in artifact list, nothing added or removed.
    pub fn builtin() -> Self {
        Self::assemble(true, &[], &[])
    }

    pub fn from_config(config: &config::Config) -> Self {
        let sig = &config.signatures;
        Self::assemble(sig.builtin, &sig.extra, &sig.disable)
    }

    /// Custom fragment list, replacing the builtins entirely.
    pub fn from_fragments<I, S>(fragments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let extra: Vec<String> = fragments
            .into_iter()
            .map(|s| s.as_ref().to_owned())
            .collect();
        Self::assemble(false, &extra, &[])
    }

    fn assemble(builtin: bool, extra: &[String], disable: &[String]) -> Self {
        let mut fragments: Vec<String> = Vec::new();
        if builtin {
            fragments.extend(BUILTIN_SIGNATURES.iter().map(|s| (*s).to_owned()));
        }
        fragments.extend(extra.iter().map(|s| s.trim().to_lowercase()));
        fragments.retain(|f| !f.is_empty());
        for disabled in disable {
            let disabled = disabled.trim().to_lowercase();
            fragments.retain(|f| *f != disabled);
        }
        fragments.sort();
        fragments.dedup();
        Self {
            fragments: fragments.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn fragments(&self) -> impl Iterator<Item = &str> {
        self.fragments.iter().map(String::as_str)
    }

    /// First fragment contained in `path`, compared case-insensitively.
    pub fn match_path(&self, path: &Path) -> Option<&str> {
        let folded = path.to_string_lossy().to_lowercase();
        self.fragments
            .iter()
            .find(|fragment| folded.contains(fragment.as_str()))
            .map(String::as_str)
    }
}

impl Default for SignatureSet {
    fn default() -> Self {
        Self::builtin()
    }
}
