//! Compile and verification classpath construction.

use std::path::PathBuf;

use log::warn;

use super::RuntimePolicy;
use crate::error::{JobError, Result};

/// Resolved classpath lists, plus any policy warnings raised on the way.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classpath {
    pub compile: Vec<PathBuf>,
    pub verify: Vec<PathBuf>,
    pub warnings: Vec<String>,
}

/// Applies the verification classpath policy for a host runtime.
///
/// | verify | host   | verify classpath | result                       |
/// |--------|--------|------------------|------------------------------|
/// | false  | any    | ignored          | compile classpath only       |
/// | true   | legacy | none             | ok                           |
/// | true   | legacy | some             | included, one policy warning |
/// | true   | newer  | none or empty    | `MissingVerifyClasspath`     |
/// | true   | newer  | some             | included                     |
///
/// A null or blank verify entry is `NullClasspathEntry` whenever verify is on.
#[derive(Debug, Clone, Copy)]
pub struct ClasspathBuilder {
    policy: RuntimePolicy,
}

impl ClasspathBuilder {
    pub fn new(policy: RuntimePolicy) -> Self {
        Self { policy }
    }

    pub fn build(
        &self,
        elements: &[String],
        verify_elements: Option<&[Option<String>]>,
        verify: bool,
    ) -> Result<Classpath> {
        // No existence checks; the engine reports unusable entries.
        let compile = elements.iter().map(PathBuf::from).collect();

        let mut classpath = Classpath {
            compile,
            ..Default::default()
        };
        if !verify {
            return Ok(classpath);
        }

        let entries = verify_elements.unwrap_or_default();
        for (index, entry) in entries.iter().enumerate() {
            if entry.as_deref().is_none_or(|e| e.trim().is_empty()) {
                return Err(JobError::NullClasspathEntry(index));
            }
        }

        match self.policy {
            RuntimePolicy::Legacy => {
                if !entries.is_empty() {
                    let message = "verify classpath is unnecessary: the host already runs the legacy target runtime"
                        .to_string();
                    warn!("{}", message);
                    classpath.warnings.push(message);
                }
            }
            RuntimePolicy::Newer => {
                if entries.is_empty() {
                    return Err(JobError::MissingVerifyClasspath(
                        "a runtime newer than the legacy target".to_string(),
                    ));
                }
            }
        }

        classpath.verify = entries.iter().flatten().map(PathBuf::from).collect();
        Ok(classpath)
    }
}
