//! File sets: a base directory with include and exclude patterns.

use std::path::PathBuf;

use log::debug;
use serde::{Deserialize, Serialize};

use super::pattern::{DEFAULT_EXCLUDES, PatternSet};
use super::scanner::{DirectoryScanner, EntryKind, ScanEntry};
use super::SourceUnit;
use crate::error::Result;

fn default_true() -> bool {
    true
}

/// A scanned set of paths below one directory.
///
/// Used three ways: as individual source files, as a set of jars, or as a
/// set of source directories.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct FileSet {
    pub directory: PathBuf,

    /// Empty means everything.
    #[serde(default)]
    pub includes: Vec<String>,

    #[serde(default)]
    pub excludes: Vec<String>,

    #[serde(default = "default_true")]
    pub use_default_excludes: bool,
}

impl FileSet {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            includes: Vec::new(),
            excludes: Vec::new(),
            use_default_excludes: true,
        }
    }

    pub fn include(mut self, pattern: impl Into<String>) -> Self {
        self.includes.push(pattern.into());
        self
    }

    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.excludes.push(pattern.into());
        self
    }

    pub fn without_default_excludes(mut self) -> Self {
        self.use_default_excludes = false;
        self
    }

    /// Same set rooted somewhere else.
    pub fn rebased(&self, directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            ..self.clone()
        }
    }

    fn scan(&self) -> Result<Vec<ScanEntry>> {
        let includes = if self.includes.is_empty() {
            PatternSet::parse("**")?
        } else {
            PatternSet::from_patterns(&self.includes)?
        };

        let mut exclude_patterns: Vec<&str> = self.excludes.iter().map(String::as_str).collect();
        if self.use_default_excludes {
            exclude_patterns.extend_from_slice(DEFAULT_EXCLUDES);
        }
        let excludes = PatternSet::from_patterns(exclude_patterns)?;

        DirectoryScanner::new(&self.directory, includes)
            .with_excludes(excludes)
            .scan()
    }

    /// Relative paths of included regular files, in scan order.
    pub fn included_files(&self) -> Result<Vec<PathBuf>> {
        self.entries_of(EntryKind::File)
    }

    /// Relative paths of included directories, in scan order.
    pub fn included_directories(&self) -> Result<Vec<PathBuf>> {
        self.entries_of(EntryKind::Directory)
    }

    fn entries_of(&self, kind: EntryKind) -> Result<Vec<PathBuf>> {
        let entries = self.scan()?;
        let skipped = entries.iter().filter(|e| e.kind == EntryKind::Missing).count();
        if skipped > 0 {
            debug!("Skipped {} dangling entries under {}", skipped, self.directory.display());
        }
        Ok(entries
            .into_iter()
            .filter(|e| e.kind == kind)
            .map(|e| e.relative)
            .collect())
    }

    /// Every included file as an individual source file.
    pub fn source_files(&self) -> Result<Vec<SourceUnit>> {
        Ok(self
            .included_files()?
            .into_iter()
            .map(|relative| SourceUnit::File {
                base: self.directory.clone(),
                relative,
            })
            .collect())
    }

    /// Every included file as a source archive.
    pub fn source_archives(&self) -> Result<Vec<SourceUnit>> {
        Ok(self
            .included_files()?
            .into_iter()
            .map(|relative| SourceUnit::Archive(self.directory.join(relative)))
            .collect())
    }

    /// Every included directory as a source directory.
    pub fn source_directories(&self) -> Result<Vec<SourceUnit>> {
        Ok(self
            .included_directories()?
            .into_iter()
            .map(|relative| SourceUnit::Directory(self.directory.join(relative)))
            .collect())
    }
}
