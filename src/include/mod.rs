//! Include resolution - turns include specs and file sets into source units.
//!
//! Resolution never deduplicates. Overlapping specs produce repeated units and
//! the engine is expected to treat a repeated input as a no-op.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{JobError, Result};

pub use self::fileset::FileSet;
pub use self::pattern::{DEFAULT_EXCLUDES, PatternSet};
pub use self::resolver::IncludeResolver;
pub use self::scanner::{DirectoryScanner, EntryKind, ScanEntry};

mod fileset;
mod pattern;
mod resolver;
mod scanner;

/// How matched regular files are classified.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
pub enum ResolutionMode {
    /// Files become individual source files relative to the spec's base.
    #[default]
    #[serde(rename = "files")]
    FileOrDirectory,
    /// Every matched file is a source archive.
    #[serde(rename = "archives")]
    ArchivesOnly,
}

/// A directory plus an optional wildcard pattern.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct IncludeSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directory: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,

    #[serde(default)]
    pub mode: ResolutionMode,
}

impl IncludeSpec {
    /// Include a whole directory as a source directory.
    pub fn directory(dir: impl Into<PathBuf>) -> Self {
        Self {
            directory: Some(dir.into()),
            ..Default::default()
        }
    }

    /// Include whatever `pattern` matches under `dir`.
    pub fn pattern(dir: impl Into<PathBuf>, pattern: impl Into<String>) -> Self {
        Self {
            directory: Some(dir.into()),
            pattern: Some(pattern.into()),
            mode: ResolutionMode::FileOrDirectory,
        }
    }

    /// Include archives matched by `pattern` under `dir`.
    pub fn archives(dir: impl Into<PathBuf>, pattern: impl Into<String>) -> Self {
        Self {
            mode: ResolutionMode::ArchivesOnly,
            ..Self::pattern(dir, pattern)
        }
    }

    /// Reject specs that name nothing.
    pub fn validate(&self) -> Result<()> {
        let has_pattern = self.pattern.as_deref().is_some_and(|p| !p.trim().is_empty());
        if self.directory.is_none() && !has_pattern {
            return Err(JobError::InvalidInclude(
                "include needs a directory, a pattern, or both".to_string(),
            ));
        }
        Ok(())
    }
}

impl fmt::Display for IncludeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dir = self
            .directory
            .as_deref()
            .map(|d| d.display().to_string())
            .unwrap_or_else(|| "null".to_string());
        write!(f, "directory={}, pattern={}", dir, self.pattern.as_deref().unwrap_or("null"))
    }
}

/// A concrete translation input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SourceUnit {
    Directory(PathBuf),
    Archive(PathBuf),
    File { base: PathBuf, relative: PathBuf },
}

impl SourceUnit {
    /// Full path of the input on disk.
    pub fn path(&self) -> PathBuf {
        match self {
            SourceUnit::Directory(path) | SourceUnit::Archive(path) => path.clone(),
            SourceUnit::File { base, relative } => base.join(relative),
        }
    }

    /// Base directory for individual files, `None` for other kinds.
    pub fn base(&self) -> Option<&Path> {
        match self {
            SourceUnit::File { base, .. } => Some(base),
            _ => None,
        }
    }
}

impl fmt::Display for SourceUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceUnit::Directory(path) => write!(f, "dir {}", path.display()),
            SourceUnit::Archive(path) => write!(f, "jar {}", path.display()),
            SourceUnit::File { base, relative } => {
                write!(f, "file {} (in {})", relative.display(), base.display())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spec_without_directory_or_pattern_is_invalid() {
        let spec = IncludeSpec::default();
        assert!(matches!(spec.validate(), Err(JobError::InvalidInclude(_))));
    }

    #[test]
    fn test_blank_pattern_counts_as_absent() {
        let spec = IncludeSpec {
            pattern: Some("  ".to_string()),
            ..Default::default()
        };
        assert!(spec.validate().is_err());
    }

    #[test]
    fn test_pattern_without_directory_is_valid() {
        let spec = IncludeSpec {
            pattern: Some("lib/*.jar".to_string()),
            ..Default::default()
        };
        assert!(spec.validate().is_ok());
    }

    #[test]
    fn test_display_matches_include_listing() {
        let spec = IncludeSpec::pattern("/src", "*.class");
        assert_eq!(spec.to_string(), "directory=/src, pattern=*.class");
        assert_eq!(IncludeSpec::directory("/src").to_string(), "directory=/src, pattern=null");
    }

    #[test]
    fn test_mode_deserializes_from_yaml() {
        let spec: IncludeSpec = serde_yaml::from_str("directory: lib\npattern: '*.jar'\nmode: archives\n").unwrap();
        assert_eq!(spec.mode, ResolutionMode::ArchivesOnly);

        let spec: IncludeSpec = serde_yaml::from_str("directory: classes\n").unwrap();
        assert_eq!(spec.mode, ResolutionMode::FileOrDirectory);
        assert!(spec.pattern.is_none());
    }

    #[test]
    fn test_source_unit_path() {
        let unit = SourceUnit::File {
            base: PathBuf::from("/src"),
            relative: PathBuf::from("a/A.class"),
        };
        assert_eq!(unit.path(), PathBuf::from("/src/a/A.class"));
        assert_eq!(unit.base(), Some(Path::new("/src")));
        assert_eq!(SourceUnit::Archive(PathBuf::from("/lib/x.jar")).base(), None);
    }
}
