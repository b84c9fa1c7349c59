#![forbid(unsafe_code)]

//! Verdict rendering. Verdicts go to stdout so they survive log filtering;
//! everything diagnostic goes through `tracing` to stderr.

use scanner::{ProcessReport, ScanResult};

#[allow(clippy::print_stdout)]
pub fn print_scan(result: &ScanResult) {
    for hit in &result.matches {
        println!(
            "DETECTED {} (signature {:?})",
            hit.path.display(),
            hit.signature
        );
    }
    if !result.detected() {
        println!(
            "clean: {} regions examined, {} malformed lines skipped",
            result.regions_examined, result.skipped_lines
        );
    }
}

/// Render a sweep report. Returns whether anything was detected.
#[allow(clippy::print_stdout)]
pub fn print_sweep(reports: &[ProcessReport]) -> bool {
    let mut flagged = 0usize;
    for report in reports {
        if !report.result.detected() {
            continue;
        }
        flagged += 1;
        let exe = report
            .exe
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "<unknown exe>".to_owned());
        for hit in &report.result.matches {
            println!(
                "DETECTED pid {} ({}): {} (signature {:?})",
                report.pid,
                exe,
                hit.path.display(),
                hit.signature
            );
        }
    }
    if flagged == 0 {
        println!("clean: {} processes scanned", reports.len());
    } else {
        println!(
            "{} of {} scanned processes flagged",
            flagged,
            reports.len()
        );
    }
    flagged > 0
}

#[allow(clippy::print_stderr)]
pub fn print_failure(err: &anyhow::Error) {
    eprintln!("injectscan: {err:#}");
}
