//! Runs the engine as a separate `java -jar` process.

use std::env;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use log::{debug, info, warn};
use tempfile::TempDir;

use super::{Translator, messages};
use crate::error::{JobError, Result};

/// Exit status for a run that completed but did not verify.
const EXIT_UNVERIFIED: i32 = 1;

/// Engine driven through its command line.
///
/// Flags are collected as setters are called. Individual source files have
/// no command-line form, so they are copied into a scratch directory that
/// is passed as an extra source directory for the duration of `run`.
#[derive(Debug)]
pub struct ProcessTranslator {
    java: PathBuf,
    engine_jar: PathBuf,
    args: Vec<OsString>,
    file_groups: Vec<(PathBuf, Vec<PathBuf>)>,
    classpath: Vec<PathBuf>,
    has_destination: bool,
}

impl ProcessTranslator {
    pub fn new(java: impl Into<PathBuf>, engine_jar: impl Into<PathBuf>) -> Self {
        Self {
            java: java.into(),
            engine_jar: engine_jar.into(),
            args: Vec::new(),
            file_groups: Vec::new(),
            classpath: Vec::new(),
            has_destination: false,
        }
    }

    /// Engine arguments collected so far, excluding staged sources and classpath.
    pub fn args(&self) -> &[OsString] {
        &self.args
    }

    pub fn classpath(&self) -> &[PathBuf] {
        &self.classpath
    }

    fn flag(&mut self, name: &str, enabled: bool) {
        if enabled {
            self.args.push(name.into());
        }
    }

    fn option(&mut self, name: &str, value: impl Into<OsString>) {
        self.args.push(name.into());
        self.args.push(value.into());
    }

    fn build_command(&self, staged: &[TempDir]) -> Result<Command> {
        let mut cmd = Command::new(&self.java);
        cmd.arg("-jar").arg(&self.engine_jar).args(&self.args);
        for dir in staged {
            cmd.arg("-srcdir").arg(dir.path());
        }
        if !self.classpath.is_empty() {
            let joined = env::join_paths(&self.classpath)
                .map_err(|e| JobError::Engine(format!("Invalid classpath element: {}", e)))?;
            cmd.arg("-classpath").arg(joined);
        }
        Ok(cmd)
    }
}

/// Copy each group of files into its own scratch directory, keeping relative paths.
pub(crate) fn stage_file_groups(groups: &[(PathBuf, Vec<PathBuf>)]) -> Result<Vec<TempDir>> {
    let mut staged = Vec::with_capacity(groups.len());
    for (base, files) in groups {
        let dir = tempfile::Builder::new().prefix("retrojob-src").tempdir()?;
        for relative in files {
            let target = dir.path().join(relative);
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(base.join(relative), &target)?;
        }
        debug!("Staged {} file(s) from {} into {}", files.len(), base.display(), dir.path().display());
        staged.push(dir);
    }
    Ok(staged)
}

/// Map the engine's exit code onto the verified flag.
pub(crate) fn interpret_exit(code: Option<i32>) -> Result<bool> {
    match code {
        Some(0) => Ok(true),
        Some(EXIT_UNVERIFIED) => Ok(false),
        Some(other) => Err(JobError::Engine(format!("engine exited with status {}", other))),
        None => Err(JobError::Engine("engine terminated by signal".to_string())),
    }
}

impl Translator for ProcessTranslator {
    fn add_source_directory(&mut self, path: &Path) {
        self.option("-srcdir", path);
    }

    fn add_source_archive(&mut self, path: &Path) {
        self.option("-srcjar", path);
    }

    fn add_source_files(&mut self, base: &Path, relative: &[PathBuf]) {
        self.file_groups.push((base.to_path_buf(), relative.to_vec()));
    }

    fn set_destination_directory(&mut self, path: &Path) {
        self.has_destination = true;
        self.option("-destdir", path);
    }

    fn set_destination_archive(&mut self, path: &Path) {
        self.has_destination = true;
        self.option("-destjar", path);
    }

    fn set_strip_signatures(&mut self, value: bool) {
        self.flag("-stripsign", value);
    }

    fn set_verbose(&mut self, value: bool) {
        self.flag("-verbose", value);
    }

    fn set_verify(&mut self, value: bool) {
        self.flag("-verify", value);
    }

    fn set_lazy(&mut self, value: bool) {
        self.flag("-lazy", value);
    }

    fn set_advanced(&mut self, value: bool) {
        self.flag("-advanced", value);
    }

    fn set_retain_api(&mut self, value: bool) {
        self.flag("-retainapi", value);
    }

    fn set_retain_flags(&mut self, value: bool) {
        self.flag("-retainflags", value);
    }

    fn set_target(&mut self, value: &str) {
        self.option("-target", value);
    }

    fn set_embed(&mut self, value: &str) {
        self.option("-embed", value);
    }

    fn set_backport(&mut self, value: &str) {
        self.option("-backport", value);
    }

    fn set_source_mask(&mut self, value: &str) {
        self.option("-srcmask", value);
    }

    fn add_classpath_element(&mut self, path: &Path) {
        self.classpath.push(path.to_path_buf());
    }

    fn run(&mut self) -> Result<bool> {
        if !self.file_groups.is_empty() && !self.has_destination {
            warn!("Individual source files without a destination: translated copies will be discarded");
        }

        // Held until the process exits; dropping removes the scratch copies.
        let staged = stage_file_groups(&self.file_groups)?;
        let mut cmd = self.build_command(&staged)?;

        info!("Running engine {}", self.engine_jar.display());
        debug!("Engine command: {:?}", cmd);
        let output = cmd
            .output()
            .map_err(|e| JobError::Engine(format!("Failed to execute {}: {}", self.java.display(), e)))?;

        let warnings = messages::relay(&String::from_utf8_lossy(&output.stdout))
            + messages::relay(&String::from_utf8_lossy(&output.stderr));
        debug!("Engine finished with {:?}, {} warning line(s)", output.status.code(), warnings);

        interpret_exit(output.status.code())
    }
}
