//! Translator configuration and the engine seam.
//!
//! The engine itself is external. [`Translator`] is the narrow contract the
//! orchestrator drives: add inputs, set a destination and options, add
//! classpath elements, then `run` once.

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::include::SourceUnit;

pub use self::assembler::{assemble, ensure_directory};
pub use self::classpath::{Classpath, ClasspathBuilder};
pub use self::options::{DEFAULT_SOURCE_MASK, DEFAULT_TARGET, TranslationOptions};
pub use self::process::ProcessTranslator;
pub use self::recording::{EngineCall, RecordingTranslator};
pub use self::runtime::{RuntimePolicy, detect_host_runtime, normalize_version};

mod assembler;
mod classpath;
pub mod messages;
mod options;
mod process;
mod recording;
mod runtime;

/// Contract of the bytecode translation engine.
pub trait Translator {
    fn add_source_directory(&mut self, path: &Path);
    fn add_source_archive(&mut self, path: &Path);
    fn add_source_files(&mut self, base: &Path, relative: &[PathBuf]);

    fn set_destination_directory(&mut self, path: &Path);
    fn set_destination_archive(&mut self, path: &Path);

    fn set_strip_signatures(&mut self, value: bool);
    fn set_verbose(&mut self, value: bool);
    fn set_verify(&mut self, value: bool);
    fn set_lazy(&mut self, value: bool);
    fn set_advanced(&mut self, value: bool);
    fn set_retain_api(&mut self, value: bool);
    fn set_retain_flags(&mut self, value: bool);

    fn set_target(&mut self, value: &str);
    fn set_embed(&mut self, value: &str);
    fn set_backport(&mut self, value: &str);
    fn set_source_mask(&mut self, value: &str);

    fn add_classpath_element(&mut self, path: &Path);

    /// Translate everything. `Ok(true)` means verified.
    fn run(&mut self) -> Result<bool>;
}

/// Where the engine writes. Both may be set; neither is ever invented.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Destination {
    pub directory: Option<PathBuf>,
    pub archive: Option<PathBuf>,
}

impl Destination {
    pub fn directory(path: impl Into<PathBuf>) -> Self {
        Self {
            directory: Some(path.into()),
            archive: None,
        }
    }

    pub fn archive(path: impl Into<PathBuf>) -> Self {
        Self {
            directory: None,
            archive: Some(path.into()),
        }
    }

    /// Translate sources in place.
    pub fn in_place() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.directory.is_none() && self.archive.is_none()
    }
}

/// Everything the engine needs for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslatorConfig {
    pub strip_signatures: bool,
    pub verbose: bool,
    pub verify: bool,
    pub lazy: bool,
    pub fail_on_warning: bool,
    pub advanced: bool,
    pub retain_api: bool,
    pub retain_flags: bool,
    pub target: Option<String>,
    pub embed: Option<String>,
    pub backport: Option<String>,
    pub source_mask: Option<String>,
    pub classpath: Vec<PathBuf>,
    pub verify_classpath: Vec<PathBuf>,
    pub sources: Vec<SourceUnit>,
    pub destination: Destination,
}

/// Outcome reported by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JobResult {
    pub verified: bool,
}
