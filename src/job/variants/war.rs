//! Translation of an exploded web application.
//!
//! The exploded build directory is copied to a classified staging directory,
//! the engine rewrites the staged classes and libraries in place, and the
//! staged tree is packed into a classified war.

use std::path::{Path, PathBuf};

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::error::{JobError, Result};
use crate::include::{FileSet, IncludeResolver, SourceUnit};
use crate::job::archive::Archiver;
use crate::job::attach::{AttachOptions, attach_if_enabled};
use crate::job::pipeline::{JobInputs, JobVariant, PostProcessContext, PostProcessed};
use crate::job::project::ProjectDescriptor;
use crate::job::staging::copy_directory_structure;
use crate::translator::Destination;

pub const WEB_DESCRIPTOR: &str = "WEB-INF/web.xml";
pub const CLASSES_DIR: &str = "WEB-INF/classes";
pub const LIB_DIR: &str = "WEB-INF/lib";

fn default_jar_includes() -> Vec<String> {
    vec!["*.jar".to_string()]
}

/// Which libraries under `WEB-INF/lib` get translated.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct WarOptions {
    pub jar_includes: Vec<String>,
    pub jar_excludes: Vec<String>,
}

impl Default for WarOptions {
    fn default() -> Self {
        Self {
            jar_includes: default_jar_includes(),
            jar_excludes: Vec::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct WarJob {
    project: ProjectDescriptor,
    attach: AttachOptions,
    options: WarOptions,
    staged: Option<PathBuf>,
}

impl WarJob {
    pub fn new(project: ProjectDescriptor, attach: AttachOptions, options: WarOptions) -> Self {
        Self {
            project,
            attach,
            options,
            staged: None,
        }
    }

    /// The exploded war produced by the host build.
    pub fn exploded_dir(&self) -> PathBuf {
        self.project.output_directory.join(&self.project.final_name)
    }

    /// `<output>/<final-name>-<classifier>`
    pub fn staging_dir(&self) -> PathBuf {
        self.project
            .output_directory
            .join(format!("{}-{}", self.project.final_name, self.attach.classifier))
    }

    /// `<output>/<final-name>-<classifier>.war`
    pub fn output(&self) -> PathBuf {
        self.project.classified_output(&self.attach.classifier, "war")
    }

    fn library_set(&self, staged: &Path) -> FileSet {
        let mut set = FileSet::new(staged.join(LIB_DIR));
        set.includes = self.options.jar_includes.clone();
        set.excludes = self.options.jar_excludes.clone();
        set
    }
}

impl JobVariant for WarJob {
    fn name(&self) -> &'static str {
        "war"
    }

    fn skip_reason(&self) -> Option<String> {
        if self.project.is_war() {
            None
        } else {
            Some(format!("packaging is '{}'", self.project.packaging))
        }
    }

    fn resolve_inputs(&mut self, _resolver: &IncludeResolver) -> Result<JobInputs> {
        let exploded = self.exploded_dir();
        if !exploded.is_dir() {
            return Err(JobError::InvalidWarDirectory(exploded));
        }

        let staged = self.staging_dir();
        info!("Staging {} into {}", exploded.display(), staged.display());
        copy_directory_structure(&exploded, &staged)?;

        let mut sources = vec![SourceUnit::Directory(staged.join(CLASSES_DIR))];
        let libraries = self.library_set(&staged);
        if libraries.directory.is_dir() {
            sources.extend(libraries.source_archives()?);
        } else {
            debug!("No {} in {}", LIB_DIR, staged.display());
        }

        self.staged = Some(staged);
        Ok(JobInputs {
            sources,
            destination: Destination::in_place(),
        })
    }

    fn post_process(&mut self, ctx: PostProcessContext<'_>) -> Result<PostProcessed> {
        let staged = self
            .staged
            .clone()
            .ok_or_else(|| JobError::InvalidProject("war was not staged".to_string()))?;
        let output = self.output();
        let archiver = ctx.archiver.ok_or_else(|| JobError::ArchiveRewriteFailed {
            path: output.clone(),
            reason: "no archiver configured".to_string(),
        })?;

        rewrite_archive(archiver, &staged, &output)?;
        let attached = attach_if_enabled(ctx.registry, &self.attach, "war", &output)?;
        Ok(PostProcessed {
            produced: Some(output),
            attached,
        })
    }
}

/// Pack a staged web application into `output`.
pub fn rewrite_archive(archiver: &dyn Archiver, staged: &Path, output: &Path) -> Result<()> {
    let failed = |reason: String| JobError::ArchiveRewriteFailed {
        path: output.to_path_buf(),
        reason,
    };

    if !staged.join(WEB_DESCRIPTOR).is_file() {
        return Err(failed(format!("{} is missing from {}", WEB_DESCRIPTOR, staged.display())));
    }

    info!("Packing {} into {}", staged.display(), output.display());
    archiver.create_archive(staged, output).map_err(|e| match e {
        err @ JobError::ArchiveRewriteFailed { .. } => err,
        other => failed(other.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::fs;
    use tempfile::tempdir;

    struct FakeArchiver {
        packed: RefCell<Vec<(PathBuf, PathBuf)>>,
        fail: bool,
    }

    impl FakeArchiver {
        fn new(fail: bool) -> Self {
            Self {
                packed: RefCell::new(Vec::new()),
                fail,
            }
        }
    }

    impl Archiver for FakeArchiver {
        fn create_archive(&self, source_dir: &Path, output: &Path) -> Result<()> {
            if self.fail {
                return Err(JobError::Engine("disk full".to_string()));
            }
            self.packed
                .borrow_mut()
                .push((source_dir.to_path_buf(), output.to_path_buf()));
            Ok(())
        }
    }

    fn war_project(output: &Path) -> ProjectDescriptor {
        ProjectDescriptor {
            packaging: "war".to_string(),
            output_directory: output.to_path_buf(),
            final_name: "shop".to_string(),
            ..Default::default()
        }
    }

    fn exploded(output: &Path) {
        let root = output.join("shop");
        fs::create_dir_all(root.join("WEB-INF/classes/com")).unwrap();
        fs::create_dir_all(root.join("WEB-INF/lib")).unwrap();
        fs::write(root.join("WEB-INF/web.xml"), "<web-app/>").unwrap();
        fs::write(root.join("WEB-INF/classes/com/A.class"), "").unwrap();
        fs::write(root.join("WEB-INF/lib/a.jar"), "").unwrap();
        fs::write(root.join("WEB-INF/lib/b.jar"), "").unwrap();
        fs::write(root.join("WEB-INF/lib/notes.txt"), "").unwrap();
    }

    #[test]
    fn test_stages_classes_and_jars() {
        let dir = tempdir().unwrap();
        exploded(dir.path());

        let mut job = WarJob::new(war_project(dir.path()), AttachOptions::default(), WarOptions::default());
        let inputs = job.resolve_inputs(&IncludeResolver::new(dir.path())).unwrap();

        let staged = dir.path().join("shop-jdk14");
        assert!(staged.join("WEB-INF/web.xml").is_file());
        assert_eq!(
            inputs.sources,
            vec![
                SourceUnit::Directory(staged.join("WEB-INF/classes")),
                SourceUnit::Archive(staged.join("WEB-INF/lib/a.jar")),
                SourceUnit::Archive(staged.join("WEB-INF/lib/b.jar")),
            ]
        );
        assert!(inputs.destination.is_empty());
    }

    #[test]
    fn test_missing_exploded_dir() {
        let dir = tempdir().unwrap();
        let mut job = WarJob::new(war_project(dir.path()), AttachOptions::default(), WarOptions::default());

        let err = job.resolve_inputs(&IncludeResolver::new(dir.path())).unwrap_err();
        assert!(matches!(err, JobError::InvalidWarDirectory(p) if p == dir.path().join("shop")));
    }

    #[test]
    fn test_jar_packaging_is_skipped() {
        let job = WarJob::new(ProjectDescriptor::default(), AttachOptions::default(), WarOptions::default());
        assert_eq!(job.skip_reason().unwrap(), "packaging is 'jar'");
    }

    #[test]
    fn test_rewrite_requires_descriptor() {
        let dir = tempdir().unwrap();
        let archiver = FakeArchiver::new(false);

        let err = rewrite_archive(&archiver, dir.path(), &dir.path().join("out.war")).unwrap_err();
        assert!(matches!(err, JobError::ArchiveRewriteFailed { .. }));
        assert!(archiver.packed.borrow().is_empty());
    }

    #[test]
    fn test_archiver_errors_become_rewrite_failures() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("WEB-INF")).unwrap();
        fs::write(dir.path().join(WEB_DESCRIPTOR), "").unwrap();

        let err = rewrite_archive(&FakeArchiver::new(true), dir.path(), &dir.path().join("out.war")).unwrap_err();
        match err {
            JobError::ArchiveRewriteFailed { reason, .. } => assert!(reason.contains("disk full")),
            other => panic!("expected ArchiveRewriteFailed, got {:?}", other),
        }
    }
}
