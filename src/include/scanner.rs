//! Recursive directory scanning against include/exclude pattern sets.

use std::fs;
use std::path::{Path, PathBuf};

use log::trace;
use walkdir::WalkDir;

use super::pattern::PatternSet;
use crate::error::{JobError, Result};

/// What a scanned path turned out to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
    /// Listed by the walk but gone or dangling when inspected.
    Missing,
}

/// One matched path, relative to the scanner's base directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanEntry {
    pub relative: PathBuf,
    pub kind: EntryKind,
}

/// Walks a base directory and reports entries matching the includes.
///
/// Entries are reported in walk order with siblings sorted by file name.
/// Excluded directories are pruned, so nothing below them is reported.
#[derive(Debug)]
pub struct DirectoryScanner {
    base: PathBuf,
    includes: PatternSet,
    excludes: PatternSet,
}

impl DirectoryScanner {
    pub fn new(base: impl Into<PathBuf>, includes: PatternSet) -> Self {
        Self {
            base: base.into(),
            includes,
            excludes: PatternSet::default(),
        }
    }

    pub fn with_excludes(mut self, excludes: PatternSet) -> Self {
        self.excludes = excludes;
        self
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    /// Scan the tree. A missing base directory is `PathNotFound`.
    pub fn scan(&self) -> Result<Vec<ScanEntry>> {
        if !self.base.is_dir() {
            return Err(JobError::PathNotFound(self.base.clone()));
        }

        let base = self.base.as_path();
        let excludes = &self.excludes;
        let walker = WalkDir::new(base)
            .min_depth(1)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !excludes.matches(&relative_key(base, entry.path())));

        let mut entries = Vec::new();
        for entry in walker {
            let entry = entry?;
            let key = relative_key(base, entry.path());
            if !self.includes.matches(&key) {
                continue;
            }
            let kind = classify(entry.path());
            trace!("Scan matched {} ({:?})", key, kind);
            entries.push(ScanEntry {
                relative: entry.path().strip_prefix(base).unwrap_or(entry.path()).to_path_buf(),
                kind,
            });
        }
        Ok(entries)
    }
}

/// `/`-joined path of `path` below `base`.
pub(crate) fn relative_key(base: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(base).unwrap_or(path);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

fn classify(path: &Path) -> EntryKind {
    match fs::metadata(path) {
        Ok(meta) if meta.is_dir() => EntryKind::Directory,
        Ok(_) => EntryKind::File,
        Err(_) => EntryKind::Missing,
    }
}
