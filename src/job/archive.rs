//! Archiver collaborator used to repackage a staged directory.

use std::path::{Path, PathBuf};
use std::process::Command;

use log::debug;

use crate::error::{JobError, Result};

/// Packs a directory tree into an archive file.
pub trait Archiver {
    fn create_archive(&self, source_dir: &Path, output: &Path) -> Result<()>;
}

/// Archiver backed by the JDK `jar` tool.
///
/// Runs `jar cfM <output> -C <dir> .` so a manifest already present in the
/// tree is kept as-is instead of being regenerated.
#[derive(Debug, Clone)]
pub struct JarToolArchiver {
    jar: PathBuf,
}

impl JarToolArchiver {
    pub fn new(jar: impl Into<PathBuf>) -> Self {
        Self { jar: jar.into() }
    }

    /// Prefer the `jar` next to the given `java`, fall back to `PATH`.
    pub fn locate(java: Option<&Path>) -> Result<Self> {
        if let Some(sibling) = java.map(|j| j.with_file_name(jar_file_name())) {
            if sibling.is_file() {
                return Ok(Self::new(sibling));
            }
        }
        let jar = which::which("jar")
            .map_err(|e| JobError::Engine(format!("Cannot locate the jar tool: {}", e)))?;
        Ok(Self::new(jar))
    }

    pub fn program(&self) -> &Path {
        &self.jar
    }
}

fn jar_file_name() -> &'static str {
    if cfg!(windows) { "jar.exe" } else { "jar" }
}

impl Archiver for JarToolArchiver {
    fn create_archive(&self, source_dir: &Path, output: &Path) -> Result<()> {
        let failed = |reason: String| JobError::ArchiveRewriteFailed {
            path: output.to_path_buf(),
            reason,
        };

        debug!("Archiving {} into {}", source_dir.display(), output.display());
        let result = Command::new(&self.jar)
            .arg("cfM")
            .arg(output)
            .arg("-C")
            .arg(source_dir)
            .arg(".")
            .output()
            .map_err(|e| failed(format!("failed to execute {}: {}", self.jar.display(), e)))?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            return Err(failed(format!("jar exited with {:?}: {}", result.status.code(), stderr.trim())));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locate_prefers_sibling_of_java() {
        let dir = tempfile::tempdir().unwrap();
        let java = dir.path().join("java");
        std::fs::write(dir.path().join(jar_file_name()), "").unwrap();

        let archiver = JarToolArchiver::locate(Some(&java)).unwrap();
        assert_eq!(archiver.program(), dir.path().join(jar_file_name()));
    }

    #[test]
    fn test_missing_tool_is_archive_failure() {
        let archiver = JarToolArchiver::new("/nonexistent/bin/jar");
        let err = archiver
            .create_archive(Path::new("/tmp"), Path::new("/tmp/out.war"))
            .unwrap_err();
        match err {
            JobError::ArchiveRewriteFailed { path, .. } => assert_eq!(path, PathBuf::from("/tmp/out.war")),
            other => panic!("expected ArchiveRewriteFailed, got {:?}", other),
        }
    }
}
