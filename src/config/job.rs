//! Job files.
//!
//! A job file is a YAML document describing one translation: options,
//! inputs, classpaths, destination and the project it belongs to. Relative
//! paths are taken relative to the job file's directory.

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::include::{FileSet, IncludeSpec};
use crate::job::{AttachOptions, JobRequest, ProjectDescriptor, ProjectJarJob, TranslateJob, WarJob, WarOptions};
use crate::translator::{Destination, RuntimePolicy, TranslationOptions};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct JobFile {
    pub options: TranslationOptions,

    pub attach: AttachOptions,

    pub includes: Vec<IncludeSpec>,

    pub fileset: Option<FileSet>,

    pub jarfileset: Option<FileSet>,

    pub dirset: Option<FileSet>,

    pub classpath: Vec<String>,

    /// `None` when not configured at all; entries may be null.
    pub verify_classpath: Option<Vec<Option<String>>>,

    pub destdir: Option<PathBuf>,

    pub destjar: Option<PathBuf>,

    pub project: ProjectDescriptor,

    pub war: WarOptions,

    /// Directory relative paths are resolved against.
    #[serde(skip)]
    pub base_dir: PathBuf,
}

impl JobFile {
    /// Load a job file, anchoring its paths at the file's directory.
    pub fn load(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).context(format!("Failed to read job file {}", path.display()))?;
        let mut job: Self =
            serde_yaml::from_str(&content).context(format!("Failed to parse job file {}", path.display()))?;

        let base = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        job.anchor(&base);
        log::debug!("Loaded job file {} (base {})", path.display(), job.base_dir.display());
        Ok(job)
    }

    /// Resolve relative output, project and classpath paths against `base`.
    pub fn anchor(&mut self, base: &Path) {
        let paths = [
            self.destdir.as_mut(),
            self.destjar.as_mut(),
            self.project.artifact.as_mut(),
            Some(&mut self.project.output_directory),
        ];
        for path in paths.into_iter().flatten() {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }

        let verify_entries = self.verify_classpath.iter_mut().flatten().flatten();
        for entry in self.classpath.iter_mut().chain(verify_entries) {
            anchor_entry(base, entry);
        }
        self.base_dir = base.to_path_buf();
    }

    pub fn destination(&self) -> Destination {
        Destination {
            directory: self.destdir.clone(),
            archive: self.destjar.clone(),
        }
    }

    pub fn request(&self, policy: RuntimePolicy) -> JobRequest {
        JobRequest {
            options: self.options.clone(),
            classpath: self.classpath.clone(),
            verify_classpath: self.verify_classpath.clone(),
            policy,
        }
    }

    pub fn translate_job(&self) -> TranslateJob {
        TranslateJob {
            includes: self.includes.clone(),
            fileset: self.fileset.clone(),
            jarfileset: self.jarfileset.clone(),
            dirset: self.dirset.clone(),
            destination: self.destination(),
        }
    }

    pub fn project_job(&self) -> ProjectJarJob {
        ProjectJarJob::new(self.project.clone(), self.attach.clone())
    }

    pub fn war_job(&self) -> WarJob {
        WarJob::new(self.project.clone(), self.attach.clone(), self.war.clone())
    }
}

/// Blank entries are left for the classpath builder to reject.
fn anchor_entry(base: &Path, entry: &mut String) {
    let trimmed = entry.trim();
    if !trimmed.is_empty() && Path::new(trimmed).is_relative() {
        *entry = base.join(trimmed).to_string_lossy().into_owned();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::include::ResolutionMode;
    use tempfile::TempDir;

    const JOB: &str = r#"
options:
  verify: true
  fail-on-warning: false
  embed: com.acme.retro
attach:
  classifier: jdk13
includes:
  - directory: classes
    pattern: "**/*.class"
  - directory: lib
    pattern: "*.jar"
    mode: archives
jarfileset:
  directory: deps
  includes: ["*.jar"]
classpath: [lib/api.jar, /opt/jre14/lib/rt.jar]
verify-classpath: [rt.jar, null, " "]
destdir: out
project:
  packaging: war
  output-directory: target
  final-name: shop
war:
  jar-includes: ["shop-*.jar"]
"#;

    #[test]
    fn test_load_and_anchor() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("job.yml");
        fs::write(&path, JOB).unwrap();

        let job = JobFile::load(&path).unwrap();

        assert!(job.options.verify);
        assert!(!job.options.fail_on_warning);
        assert_eq!(job.options.target.as_deref(), Some("1.4"));
        assert_eq!(job.options.embed.as_deref(), Some("com.acme.retro"));
        assert_eq!(job.attach.classifier, "jdk13");
        assert!(job.attach.attach);
        assert_eq!(job.includes.len(), 2);
        assert_eq!(job.includes[1].mode, ResolutionMode::ArchivesOnly);
        let anchored = |rel: &str| dir.path().join(rel).to_string_lossy().into_owned();
        assert_eq!(job.classpath, vec![anchored("lib/api.jar"), "/opt/jre14/lib/rt.jar".to_string()]);
        assert_eq!(job.verify_classpath, Some(vec![Some(anchored("rt.jar")), None, Some(" ".to_string())]));
        assert_eq!(job.destdir, Some(dir.path().join("out")));
        assert!(job.destjar.is_none());
        assert_eq!(job.project.output_directory, dir.path().join("target"));
        assert_eq!(job.war.jar_includes, vec!["shop-*.jar".to_string()]);
        assert_eq!(job.base_dir, dir.path());
    }

    #[test]
    fn test_absent_verify_classpath_is_none() {
        let job: JobFile = serde_yaml::from_str("classpath: [a.jar]\n").unwrap();
        assert!(job.verify_classpath.is_none());
        assert!(job.destination().is_empty());
    }

    #[test]
    fn test_absolute_paths_are_kept() {
        let mut job = JobFile {
            destjar: Some(PathBuf::from("/abs/out.jar")),
            ..Default::default()
        };
        job.anchor(Path::new("/work"));
        assert_eq!(job.destjar, Some(PathBuf::from("/abs/out.jar")));
        assert_eq!(job.project.output_directory, PathBuf::from("/work/target"));
    }

    #[test]
    fn test_missing_file_has_context() {
        let err = JobFile::load(Path::new("/nonexistent/job.yml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read job file"));
    }
}
