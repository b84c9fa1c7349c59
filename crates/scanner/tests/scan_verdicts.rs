#![forbid(unsafe_code)]

use proptest::prelude::*;
use scanner::{Error, ModuleScanner, SignatureSet};
use tempfile::tempdir;

const CLEAN_LISTING: &[&str] = &[
    "00400000-00452000 r-xp 00000000 08:02 173521  /usr/bin/dbus-daemon",
    "7f1c2a000000-7f1c2a1b5000 r-xp 00000000 08:02 1835017 /usr/lib/libc.so.6",
    "7f1c2a1b5000-7f1c2a1b9000 rw-p 001b5000 08:02 1835017 /usr/lib/libc.so.6",
    "7ffd4c000000-7ffd4c021000 rw-p 00000000 00:00 0",
    "7ffd4c021000-7ffd4c042000 rw-p 00000000 00:00 0   [stack]",
];

const BRIDGE_LINE: &str =
    "7f1c2b000000-7f1c2b040000 r--p 00000000 fd:01 44 /system/framework/XposedBridge.jar";

fn scanner() -> ModuleScanner {
    ModuleScanner::new(SignatureSet::builtin())
}

#[test]
fn clean_listing_is_a_negative_verdict() {
    let result = scanner().scan_lines(CLEAN_LISTING);
    assert!(!result.detected());
    assert!(result.matches.is_empty());
    assert_eq!(result.regions_examined, CLEAN_LISTING.len());
    assert_eq!(result.skipped_lines, 0);
}

#[test]
fn artifact_path_is_a_positive_verdict_with_diagnostics() {
    let mut listing: Vec<&str> = CLEAN_LISTING.to_vec();
    listing.push(BRIDGE_LINE);

    let result = scanner().scan_lines(&listing);
    assert!(result.detected());
    assert_eq!(result.matches.len(), 1);
    assert_eq!(
        result.matches[0].path.to_str(),
        Some("/system/framework/XposedBridge.jar")
    );
    assert_eq!(result.matches[0].signature, "xposedbridge.jar");
}

#[test]
fn matching_ignores_path_case() {
    let listing = [
        "00400000-00452000 r--p 00000000 fd:01 7 /data/app/DE.ROBV.ANDROID.XPOSED.INSTALLER-1/base.apk",
    ];
    let result = scanner().scan_lines(listing);
    assert!(result.detected());
    assert_eq!(result.matches[0].signature, "de.robv.android.xposed.installer");
}

#[test]
fn empty_listing_is_a_negative_verdict_not_an_error() {
    let result = scanner().scan_lines(std::iter::empty::<&str>());
    assert!(!result.detected());
    assert_eq!(result.regions_examined, 0);
}

#[test]
fn malformed_lines_are_counted_and_skipped() {
    let listing = [
        "garbage that is not a maps line",
        CLEAN_LISTING[0],
        "00400000-nope r-xp 00000000 08:02 1",
        BRIDGE_LINE,
    ];
    let result = scanner().scan_lines(listing);
    assert!(result.detected());
    assert_eq!(result.skipped_lines, 2);
    assert_eq!(result.regions_examined, 2);
}

#[test]
fn missing_maps_file_is_resource_unavailable() {
    let dir = tempdir().unwrap();
    let err = scanner()
        .scan_maps_file(dir.path().join("no-such-maps"))
        .unwrap_err();
    assert!(matches!(err, Error::ResourceUnavailable { .. }));
}

#[test]
fn repeated_scans_of_an_unchanged_listing_agree() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("maps");
    let mut listing = CLEAN_LISTING.join("\n");
    listing.push('\n');
    listing.push_str(BRIDGE_LINE);
    std::fs::write(&path, listing).unwrap();

    let scanner = scanner();
    let first = scanner.scan_maps_file(&path).unwrap();
    let second = scanner.scan_maps_file(&path).unwrap();
    assert!(first.detected());
    assert_eq!(first, second);
}

/// Lines that can neither parse as a maps entry nor carry a path.
fn garbage_lines() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-zA-Z!?,;= ]{1,40}", 0..8).prop_map(|lines| {
        lines
            .into_iter()
            .filter(|l| !l.trim().is_empty())
            .collect()
    })
}

proptest! {
    #[test]
    fn garbage_lines_never_change_the_verdict(
        garbage in garbage_lines(),
        with_artifact in any::<bool>(),
    ) {
        let mut baseline: Vec<String> =
            CLEAN_LISTING.iter().map(|l| (*l).to_owned()).collect();
        if with_artifact {
            baseline.push(BRIDGE_LINE.to_owned());
        }

        // interleave garbage between the well-formed lines
        let mut noisy = Vec::new();
        for (idx, line) in baseline.iter().enumerate() {
            if let Some(bad) = garbage.get(idx) {
                noisy.push(bad.clone());
            }
            noisy.push(line.clone());
        }

        let scanner = scanner();
        let clean = scanner.scan_lines(&baseline);
        let dirty = scanner.scan_lines(&noisy);
        prop_assert_eq!(clean.detected(), dirty.detected());
        prop_assert_eq!(clean.matches, dirty.matches);
    }
}
