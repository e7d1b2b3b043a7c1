//! Host runtime detection and the verification runtime policy.

use std::path::Path;
use std::process::Command;

use log::debug;

use crate::error::{JobError, Result};

/// Whether the host already runs the legacy target runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimePolicy {
    /// The system class loader exposes the legacy standard library.
    Legacy,
    /// Verification needs an explicit legacy classpath.
    Newer,
}

impl RuntimePolicy {
    /// Compare a host version against the target, e.g. `1.4.2_19` vs `1.4`.
    pub fn from_versions(host: &str, target: &str) -> Self {
        if normalize_version(host) == normalize_version(target) {
            RuntimePolicy::Legacy
        } else {
            RuntimePolicy::Newer
        }
    }

    pub fn is_legacy(self) -> bool {
        self == RuntimePolicy::Legacy
    }
}

/// Reduce a Java version to its feature release: `1.4.2_19` -> `1.4`,
/// `11.0.2` -> `11`, `21-ea` -> `21`.
pub fn normalize_version(version: &str) -> String {
    let version = version.trim().trim_matches('"');
    let mut parts = version
        .split(['.', '_', '-', '+'])
        .take_while(|p| !p.is_empty() && p.chars().all(|c| c.is_ascii_digit()));
    match (parts.next(), parts.next()) {
        (Some("1"), Some(minor)) => format!("1.{}", minor),
        (Some(major), _) => major.to_string(),
        (None, _) => version.to_string(),
    }
}

/// Pull the quoted version out of `java -version` output.
pub fn parse_version_output(output: &str) -> Option<String> {
    output.lines().find_map(|line| {
        let rest = &line[line.find("version \"")? + "version \"".len()..];
        let end = rest.find('"')?;
        Some(rest[..end].to_string())
    })
}

/// Ask `java` for its version.
pub fn detect_host_runtime(java: &Path) -> Result<String> {
    let output = Command::new(java)
        .arg("-version")
        .output()
        .map_err(|e| JobError::Engine(format!("Failed to execute {}: {}", java.display(), e)))?;

    // The version banner goes to stderr.
    let text = format!(
        "{}{}",
        String::from_utf8_lossy(&output.stderr),
        String::from_utf8_lossy(&output.stdout)
    );
    let version = parse_version_output(&text)
        .ok_or_else(|| JobError::Engine(format!("Unrecognised version output from {}", java.display())))?;
    debug!("Host runtime reported version {}", version);
    Ok(version)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_legacy_versions() {
        assert_eq!(normalize_version("1.4.2_19"), "1.4");
        assert_eq!(normalize_version("1.5.0"), "1.5");
        assert_eq!(normalize_version("1.4"), "1.4");
    }

    #[test]
    fn test_normalize_modern_versions() {
        assert_eq!(normalize_version("11.0.2"), "11");
        assert_eq!(normalize_version("21-ea"), "21");
        assert_eq!(normalize_version("17"), "17");
    }

    #[test]
    fn test_policy_from_versions() {
        assert_eq!(RuntimePolicy::from_versions("1.4.2_19", "1.4"), RuntimePolicy::Legacy);
        assert_eq!(RuntimePolicy::from_versions("1.8.0_402", "1.4"), RuntimePolicy::Newer);
        assert_eq!(RuntimePolicy::from_versions("1.5.0_22", "1.5"), RuntimePolicy::Legacy);
        assert!(!RuntimePolicy::from_versions("17.0.1", "1.4").is_legacy());
    }

    #[test]
    fn test_parse_version_output() {
        let banner = "java version \"1.4.2_19\"\nJava(TM) 2 Runtime Environment\n";
        assert_eq!(parse_version_output(banner).as_deref(), Some("1.4.2_19"));

        let openjdk = "openjdk version \"17.0.10\" 2024-01-16\nOpenJDK Runtime Environment\n";
        assert_eq!(parse_version_output(openjdk).as_deref(), Some("17.0.10"));

        assert!(parse_version_output("garbage").is_none());
    }

    #[test]
    fn test_detect_missing_java_is_engine_error() {
        let err = detect_host_runtime(Path::new("/nonexistent/bin/java")).unwrap_err();
        assert!(matches!(err, JobError::Engine(_)));
    }
}
