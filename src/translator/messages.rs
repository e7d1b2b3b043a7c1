//! Relays engine console output into the log.

use log::Level;

const WARNING_MARKERS: &[&str] = &["warning", "error", "cannot", "not found", "unresolved", "exception"];

/// Problem reports go to `warn`, everything else to `info`.
pub fn level_for(line: &str) -> Level {
    let lower = line.to_ascii_lowercase();
    if WARNING_MARKERS.iter().any(|marker| lower.contains(marker)) {
        Level::Warn
    } else {
        Level::Info
    }
}

/// Log each non-blank line of engine output; returns how many were warnings.
pub fn relay(output: &str) -> usize {
    let mut warnings = 0;
    for line in output.lines().map(str::trim_end).filter(|l| !l.trim().is_empty()) {
        let level = level_for(line);
        if level == Level::Warn {
            warnings += 1;
        }
        log::log!(level, "{}", line);
    }
    warnings
}
