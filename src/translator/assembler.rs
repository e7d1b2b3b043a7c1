//! Configuration assembly.
//!
//! Booleans are always forwarded. Optional strings are forwarded only when
//! present and non-blank, so the engine's own defaults stay in force.

use std::fs;
use std::path::Path;

use log::debug;

use super::{Classpath, Destination, TranslationOptions, TranslatorConfig};
use crate::error::{JobError, Result};
use crate::include::SourceUnit;

/// Build the engine configuration, creating the destination directory first.
pub fn assemble(
    options: &TranslationOptions,
    classpath: Classpath,
    sources: Vec<SourceUnit>,
    destination: Destination,
) -> Result<TranslatorConfig> {
    if let Some(dir) = &destination.directory {
        ensure_directory(dir)?;
    }
    if destination.is_empty() {
        debug!("No destination configured, the engine will translate in place");
    }

    Ok(TranslatorConfig {
        strip_signatures: options.strip_signatures,
        verbose: options.verbose,
        verify: options.verify,
        lazy: options.lazy,
        fail_on_warning: options.fail_on_warning,
        advanced: options.advanced,
        retain_api: options.retain_api,
        retain_flags: options.retain_flags,
        target: present(&options.target),
        embed: present(&options.embed),
        backport: present(&options.backport),
        source_mask: present(&options.source_mask),
        classpath: classpath.compile,
        verify_classpath: classpath.verify,
        sources,
        destination,
    })
}

/// Create `dir` and any missing parents.
pub fn ensure_directory(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|source| JobError::DirectoryCreationFailed {
        path: dir.to_path_buf(),
        source,
    })?;
    debug!("Ensured directory {}", dir.display());
    Ok(())
}

fn present(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .filter(|v| !v.trim().is_empty())
        .map(str::to_string)
}
