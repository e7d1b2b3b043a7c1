//! Secondary artifact registration.

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use log::info;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Default classifier for translated artifacts.
pub const DEFAULT_CLASSIFIER: &str = "jdk14";

/// File name of the attachment ledger inside the output directory.
pub const REGISTRY_FILE: &str = "attached-artifacts.jsonl";

/// Whether and how to attach the translated artifact.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct AttachOptions {
    pub attach: bool,
    pub classifier: String,
}

impl Default for AttachOptions {
    fn default() -> Self {
        Self {
            attach: true,
            classifier: DEFAULT_CLASSIFIER.to_string(),
        }
    }
}

/// A build product registered next to the main artifact.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Attachment {
    pub kind: String,
    pub classifier: String,
    pub path: PathBuf,
}

/// Receives secondary build artifacts.
pub trait ArtifactRegistry {
    fn attach(&mut self, attachment: Attachment) -> Result<()>;
}

/// Attach `path` when enabled; returns what was registered.
pub fn attach_if_enabled(
    registry: &mut dyn ArtifactRegistry,
    options: &AttachOptions,
    kind: &str,
    path: &Path,
) -> Result<Option<Attachment>> {
    if !options.attach {
        info!("Attaching disabled, leaving {} unregistered", path.display());
        return Ok(None);
    }
    let attachment = Attachment {
        kind: kind.to_string(),
        classifier: options.classifier.clone(),
        path: path.to_path_buf(),
    };
    registry.attach(attachment.clone())?;
    info!("Attached {} artifact '{}': {}", kind, options.classifier, path.display());
    Ok(Some(attachment))
}

/// Registry that appends one JSON record per attachment.
#[derive(Debug)]
pub struct JsonlArtifactRegistry {
    path: PathBuf,
}

impl JsonlArtifactRegistry {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Registry ledger inside a build output directory.
    pub fn in_directory(dir: &Path) -> Self {
        Self::new(dir.join(REGISTRY_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read back every attachment recorded so far.
    pub fn entries(&self) -> Result<Vec<Attachment>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let reader = BufReader::new(File::open(&self.path)?);
        let mut entries = Vec::new();
        for line in reader.lines() {
            let line = line?;
            if !line.trim().is_empty() {
                entries.push(serde_json::from_str(&line)?);
            }
        }
        Ok(entries)
    }
}

impl ArtifactRegistry for JsonlArtifactRegistry {
    fn attach(&mut self, attachment: Attachment) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        writeln!(file, "{}", serde_json::to_string(&attachment)?)?;
        Ok(())
    }
}
