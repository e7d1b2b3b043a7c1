//! In-memory translator that records every call instead of translating.
//!
//! Used by tests and dry runs to inspect exactly what the orchestrator asked
//! the engine to do.

use std::path::{Path, PathBuf};

use super::Translator;
use crate::error::{JobError, Result};

/// One call made against the engine contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineCall {
    SourceDirectory(PathBuf),
    SourceArchive(PathBuf),
    SourceFiles { base: PathBuf, relative: Vec<PathBuf> },
    DestinationDirectory(PathBuf),
    DestinationArchive(PathBuf),
    StripSignatures(bool),
    Verbose(bool),
    Verify(bool),
    Lazy(bool),
    Advanced(bool),
    RetainApi(bool),
    RetainFlags(bool),
    Target(String),
    Embed(String),
    Backport(String),
    SourceMask(String),
    ClasspathElement(PathBuf),
    Run,
}

/// Recording engine with a scripted outcome.
#[derive(Debug, Default)]
pub struct RecordingTranslator {
    calls: Vec<EngineCall>,
    verified: bool,
    fail_with: Option<String>,
    destination_existed_at_run: Option<bool>,
}

impl RecordingTranslator {
    /// Engine that reports a verified run.
    pub fn verified() -> Self {
        Self {
            verified: true,
            ..Default::default()
        }
    }

    /// Engine that reports unresolved references.
    pub fn unverified() -> Self {
        Self::default()
    }

    /// Engine whose run errors out.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            fail_with: Some(message.into()),
            ..Default::default()
        }
    }

    pub fn calls(&self) -> &[EngineCall] {
        &self.calls
    }

    pub fn run_count(&self) -> usize {
        self.calls.iter().filter(|c| **c == EngineCall::Run).count()
    }

    /// Whether the destination directory existed on disk when `run` was called.
    pub fn destination_existed_at_run(&self) -> Option<bool> {
        self.destination_existed_at_run
    }

    /// True if any recorded call satisfies `predicate`.
    pub fn has_call(&self, predicate: impl Fn(&EngineCall) -> bool) -> bool {
        self.calls.iter().any(predicate)
    }

    fn destination_directory(&self) -> Option<&Path> {
        self.calls.iter().rev().find_map(|call| match call {
            EngineCall::DestinationDirectory(path) => Some(path.as_path()),
            _ => None,
        })
    }
}

impl Translator for RecordingTranslator {
    fn add_source_directory(&mut self, path: &Path) {
        self.calls.push(EngineCall::SourceDirectory(path.to_path_buf()));
    }

    fn add_source_archive(&mut self, path: &Path) {
        self.calls.push(EngineCall::SourceArchive(path.to_path_buf()));
    }

    fn add_source_files(&mut self, base: &Path, relative: &[PathBuf]) {
        self.calls.push(EngineCall::SourceFiles {
            base: base.to_path_buf(),
            relative: relative.to_vec(),
        });
    }

    fn set_destination_directory(&mut self, path: &Path) {
        self.calls.push(EngineCall::DestinationDirectory(path.to_path_buf()));
    }

    fn set_destination_archive(&mut self, path: &Path) {
        self.calls.push(EngineCall::DestinationArchive(path.to_path_buf()));
    }

    fn set_strip_signatures(&mut self, value: bool) {
        self.calls.push(EngineCall::StripSignatures(value));
    }

    fn set_verbose(&mut self, value: bool) {
        self.calls.push(EngineCall::Verbose(value));
    }

    fn set_verify(&mut self, value: bool) {
        self.calls.push(EngineCall::Verify(value));
    }

    fn set_lazy(&mut self, value: bool) {
        self.calls.push(EngineCall::Lazy(value));
    }

    fn set_advanced(&mut self, value: bool) {
        self.calls.push(EngineCall::Advanced(value));
    }

    fn set_retain_api(&mut self, value: bool) {
        self.calls.push(EngineCall::RetainApi(value));
    }

    fn set_retain_flags(&mut self, value: bool) {
        self.calls.push(EngineCall::RetainFlags(value));
    }

    fn set_target(&mut self, value: &str) {
        self.calls.push(EngineCall::Target(value.to_string()));
    }

    fn set_embed(&mut self, value: &str) {
        self.calls.push(EngineCall::Embed(value.to_string()));
    }

    fn set_backport(&mut self, value: &str) {
        self.calls.push(EngineCall::Backport(value.to_string()));
    }

    fn set_source_mask(&mut self, value: &str) {
        self.calls.push(EngineCall::SourceMask(value.to_string()));
    }

    fn add_classpath_element(&mut self, path: &Path) {
        self.calls.push(EngineCall::ClasspathElement(path.to_path_buf()));
    }

    fn run(&mut self) -> Result<bool> {
        self.destination_existed_at_run = self.destination_directory().map(Path::is_dir);
        self.calls.push(EngineCall::Run);
        match &self.fail_with {
            Some(message) => Err(JobError::Engine(message.clone())),
            None => Ok(self.verified),
        }
    }
}
