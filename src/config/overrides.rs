//! Command-line overrides.
//!
//! Applied on top of a loaded job file, each one only when set.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::job::JobFile;

/// Per-invocation overrides of job file values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct JobOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destdir: Option<PathBuf>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub destjar: Option<PathBuf>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub verify: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub fail_on_warning: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub classifier: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub attach: Option<bool>,
}

impl JobOverrides {
    /// Check if any overrides are set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Layer these overrides onto `job`.
    pub fn apply(&self, job: &mut JobFile) {
        if let Some(dir) = &self.destdir {
            job.destdir = Some(dir.clone());
        }
        if let Some(jar) = &self.destjar {
            job.destjar = Some(jar.clone());
        }
        if let Some(verify) = self.verify {
            job.options.verify = verify;
        }
        if let Some(fail) = self.fail_on_warning {
            job.options.fail_on_warning = fail;
        }
        if let Some(target) = &self.target {
            job.options.target = Some(target.clone());
        }
        if let Some(classifier) = &self.classifier {
            job.attach.classifier = classifier.clone();
        }
        if let Some(attach) = self.attach {
            job.attach.attach = attach;
        }
    }
}
