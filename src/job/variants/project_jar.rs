//! Translation of a project's main jar into a classified copy.

use std::path::PathBuf;

use crate::error::{JobError, Result};
use crate::include::{IncludeResolver, SourceUnit};
use crate::job::attach::{AttachOptions, attach_if_enabled};
use crate::job::pipeline::{JobInputs, JobVariant, PostProcessContext, PostProcessed};
use crate::job::project::ProjectDescriptor;
use crate::translator::Destination;

#[derive(Debug, Clone)]
pub struct ProjectJarJob {
    project: ProjectDescriptor,
    attach: AttachOptions,
}

impl ProjectJarJob {
    pub fn new(project: ProjectDescriptor, attach: AttachOptions) -> Self {
        Self { project, attach }
    }

    /// `<output>/<final-name>-<classifier>.jar`
    pub fn output(&self) -> PathBuf {
        self.project.classified_output(&self.attach.classifier, "jar")
    }
}

impl JobVariant for ProjectJarJob {
    fn name(&self) -> &'static str {
        "project"
    }

    fn skip_reason(&self) -> Option<String> {
        if self.project.is_java() {
            None
        } else {
            Some(format!("project language is '{}'", self.project.language))
        }
    }

    fn resolve_inputs(&mut self, _resolver: &IncludeResolver) -> Result<JobInputs> {
        let artifact = self
            .project
            .artifact
            .clone()
            .ok_or_else(|| JobError::InvalidProject("project has no packaged artifact".to_string()))?;

        Ok(JobInputs {
            sources: vec![SourceUnit::Archive(artifact)],
            destination: Destination::archive(self.output()),
        })
    }

    fn post_process(&mut self, ctx: PostProcessContext<'_>) -> Result<PostProcessed> {
        let output = self.output();
        let attached = attach_if_enabled(ctx.registry, &self.attach, "jar", &output)?;
        Ok(PostProcessed {
            produced: Some(output),
            attached,
        })
    }
}
