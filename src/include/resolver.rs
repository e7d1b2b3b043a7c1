//! Include spec resolution.

use std::path::{Path, PathBuf};

use log::debug;

use super::pattern::PatternSet;
use super::scanner::{DirectoryScanner, EntryKind};
use super::{IncludeSpec, ResolutionMode, SourceUnit};
use crate::error::{JobError, Result};

/// Resolves include specs relative to a working directory.
#[derive(Debug, Clone)]
pub struct IncludeResolver {
    working_dir: PathBuf,
}

impl IncludeResolver {
    pub fn new(working_dir: impl Into<PathBuf>) -> Self {
        Self {
            working_dir: working_dir.into(),
        }
    }

    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    /// Resolve specs in order. Every spec is validated before any is scanned.
    pub fn resolve(&self, specs: &[IncludeSpec]) -> Result<Vec<SourceUnit>> {
        for spec in specs {
            spec.validate()?;
        }

        let mut units = Vec::new();
        for spec in specs {
            let base = self.absolute(spec.directory.as_deref());
            match spec.pattern.as_deref().filter(|p| !p.trim().is_empty()) {
                Some(pattern) => {
                    let resolved = self.resolve_pattern(&base, pattern, spec.mode)?;
                    debug!("Include [{}] matched {} input(s)", spec, resolved.len());
                    units.extend(resolved);
                }
                None => {
                    debug!("Include [{}] adds the directory itself", spec);
                    units.push(SourceUnit::Directory(base));
                }
            }
        }
        Ok(units)
    }

    /// Expand `pattern` below `base`.
    ///
    /// Literal patterns must name an existing path, as must every walked
    /// match; either failure is `PathNotFound` for the offending path.
    pub fn resolve_pattern(&self, base: &Path, pattern: &str, mode: ResolutionMode) -> Result<Vec<SourceUnit>> {
        let base = self.absolute(Some(base));
        let patterns = PatternSet::parse(pattern)?;

        for literal in patterns.literals() {
            let path = base.join(literal);
            if !path.exists() {
                return Err(JobError::PathNotFound(path));
            }
        }

        let scanner = DirectoryScanner::new(&base, patterns);
        let mut units = Vec::new();
        for entry in scanner.scan()? {
            let unit = match (entry.kind, mode) {
                (EntryKind::Missing, _) => return Err(JobError::PathNotFound(base.join(&entry.relative))),
                (EntryKind::Directory, _) => SourceUnit::Directory(base.join(&entry.relative)),
                (EntryKind::File, ResolutionMode::FileOrDirectory) => SourceUnit::File {
                    base: base.clone(),
                    relative: entry.relative,
                },
                (EntryKind::File, ResolutionMode::ArchivesOnly) => SourceUnit::Archive(base.join(&entry.relative)),
            };
            units.push(unit);
        }
        Ok(units)
    }

    fn absolute(&self, dir: Option<&Path>) -> PathBuf {
        match dir {
            Some(dir) if dir.is_absolute() => dir.to_path_buf(),
            Some(dir) => self.working_dir.join(dir),
            None => self.working_dir.clone(),
        }
    }
}
