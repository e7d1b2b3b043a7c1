//! Generic translation of includes and file sets.

use crate::error::Result;
use crate::include::{FileSet, IncludeResolver, IncludeSpec};
use crate::job::pipeline::{JobInputs, JobVariant};
use crate::translator::Destination;

/// Translates explicitly listed inputs into a configured destination.
#[derive(Debug, Clone, Default)]
pub struct TranslateJob {
    pub includes: Vec<IncludeSpec>,
    /// Individual source files.
    pub fileset: Option<FileSet>,
    /// Jar files.
    pub jarfileset: Option<FileSet>,
    /// Source directories.
    pub dirset: Option<FileSet>,
    pub destination: Destination,
}

impl JobVariant for TranslateJob {
    fn name(&self) -> &'static str {
        "translate"
    }

    fn resolve_inputs(&mut self, resolver: &IncludeResolver) -> Result<JobInputs> {
        let mut sources = resolver.resolve(&self.includes)?;

        let anchor = |set: &FileSet| set.rebased(resolver.working_dir().join(&set.directory));
        if let Some(set) = &self.fileset {
            sources.extend(anchor(set).source_files()?);
        }
        if let Some(set) = &self.jarfileset {
            sources.extend(anchor(set).source_archives()?);
        }
        if let Some(set) = &self.dirset {
            sources.extend(anchor(set).source_directories()?);
        }

        Ok(JobInputs {
            sources,
            destination: self.destination.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::include::SourceUnit;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::tempdir;

    #[test]
    fn test_includes_then_sets_in_order() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("classes/com")).unwrap();
        fs::create_dir_all(dir.path().join("lib")).unwrap();
        fs::create_dir_all(dir.path().join("modules/core")).unwrap();
        fs::write(dir.path().join("classes/com/A.class"), "").unwrap();
        fs::write(dir.path().join("lib/x.jar"), "").unwrap();

        let mut job = TranslateJob {
            includes: vec![IncludeSpec::directory("extra")],
            fileset: Some(FileSet::new("classes").include("**/*.class")),
            jarfileset: Some(FileSet::new("lib").include("*.jar")),
            dirset: Some(FileSet::new("modules").include("*")),
            destination: Destination::directory("out"),
        };

        let resolver = IncludeResolver::new(dir.path());
        let inputs = job.resolve_inputs(&resolver).unwrap();

        assert_eq!(
            inputs.sources,
            vec![
                SourceUnit::Directory(dir.path().join("extra")),
                SourceUnit::File {
                    base: dir.path().join("classes"),
                    relative: PathBuf::from("com/A.class"),
                },
                SourceUnit::Archive(dir.path().join("lib/x.jar")),
                SourceUnit::Directory(dir.path().join("modules/core")),
            ]
        );
        assert_eq!(inputs.destination, Destination::directory("out"));
    }

    #[test]
    fn test_empty_fileset_adds_nothing() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("classes")).unwrap();

        let mut job = TranslateJob {
            fileset: Some(FileSet::new("classes").include("**/*.class")),
            ..Default::default()
        };

        let inputs = job.resolve_inputs(&IncludeResolver::new(dir.path())).unwrap();
        assert!(inputs.sources.is_empty());
    }
}
