//! The shared job pipeline.
//!
//! Every job runs the same steps in the same order: classpath policy, input
//! resolution, configuration assembly, one engine run, outcome policy, then
//! variant post-processing. Variants only decide what goes in and what
//! happens to the result.

use std::path::PathBuf;

use log::{debug, info};

use super::archive::Archiver;
use super::attach::{ArtifactRegistry, Attachment};
use super::executor::execute;
use super::outcome::{Outcome, evaluate};
use crate::error::Result;
use crate::include::{IncludeResolver, SourceUnit};
use crate::translator::{ClasspathBuilder, Destination, RuntimePolicy, TranslationOptions, Translator, assemble};

/// Option values and classpath inputs for one invocation.
#[derive(Debug, Clone)]
pub struct JobRequest {
    pub options: TranslationOptions,
    pub classpath: Vec<String>,
    pub verify_classpath: Option<Vec<Option<String>>>,
    pub policy: RuntimePolicy,
}

impl JobRequest {
    pub fn new(options: TranslationOptions, policy: RuntimePolicy) -> Self {
        Self {
            options,
            classpath: Vec::new(),
            verify_classpath: None,
            policy,
        }
    }

    pub fn with_classpath(mut self, classpath: Vec<String>) -> Self {
        self.classpath = classpath;
        self
    }

    pub fn with_verify_classpath(mut self, verify_classpath: Vec<Option<String>>) -> Self {
        self.verify_classpath = Some(verify_classpath);
        self
    }
}

/// What a variant wants translated and where the output goes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobInputs {
    pub sources: Vec<SourceUnit>,
    pub destination: Destination,
}

/// Collaborators available after a successful run.
pub struct PostProcessContext<'a> {
    pub outcome: Outcome,
    /// Only set when the caller supplied one; variants that repackage need it.
    pub archiver: Option<&'a dyn Archiver>,
    pub registry: &'a mut dyn ArtifactRegistry,
}

/// Products of post-processing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostProcessed {
    pub produced: Option<PathBuf>,
    pub attached: Option<Attachment>,
}

/// A kind of translation job.
pub trait JobVariant {
    fn name(&self) -> &'static str;

    /// `Some(reason)` to skip this job without error.
    fn skip_reason(&self) -> Option<String> {
        None
    }

    fn resolve_inputs(&mut self, resolver: &IncludeResolver) -> Result<JobInputs>;

    fn post_process(&mut self, _ctx: PostProcessContext<'_>) -> Result<PostProcessed> {
        Ok(PostProcessed::default())
    }
}

/// Result of running a job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobReport {
    Skipped {
        variant: &'static str,
        reason: String,
    },
    Completed {
        variant: &'static str,
        outcome: Outcome,
        inputs: usize,
        produced: Option<PathBuf>,
        attached: Option<Attachment>,
        warnings: Vec<String>,
    },
}

impl JobReport {
    /// The skip report for `variant`, if it does not apply to this project.
    pub fn skip_for(variant: &dyn JobVariant) -> Option<Self> {
        let reason = variant.skip_reason()?;
        debug!("Not executing {} job: {}", variant.name(), reason);
        Some(JobReport::Skipped {
            variant: variant.name(),
            reason,
        })
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, JobReport::Skipped { .. })
    }
}

/// Runs job variants against an engine.
pub struct Orchestrator<'a> {
    resolver: IncludeResolver,
    archiver: Option<&'a dyn Archiver>,
    registry: &'a mut dyn ArtifactRegistry,
}

impl<'a> Orchestrator<'a> {
    pub fn new(working_dir: impl Into<PathBuf>, registry: &'a mut dyn ArtifactRegistry) -> Self {
        Self {
            resolver: IncludeResolver::new(working_dir),
            archiver: None,
            registry,
        }
    }

    /// Archiver for variants that repackage their output.
    pub fn with_archiver(mut self, archiver: &'a dyn Archiver) -> Self {
        self.archiver = Some(archiver);
        self
    }

    /// Run one job to completion. The engine is invoked at most once.
    pub fn run(
        &mut self,
        variant: &mut dyn JobVariant,
        request: &JobRequest,
        translator: &mut dyn Translator,
    ) -> Result<JobReport> {
        if let Some(skipped) = JobReport::skip_for(variant) {
            return Ok(skipped);
        }
        let name = variant.name();
        info!("Starting {} job", name);

        let options = &request.options;
        let classpath = ClasspathBuilder::new(request.policy).build(
            &request.classpath,
            request.verify_classpath.as_deref(),
            options.verify,
        )?;
        let warnings = classpath.warnings.clone();

        let inputs = variant.resolve_inputs(&self.resolver)?;
        let input_count = inputs.sources.len();
        let config = assemble(options, classpath, inputs.sources, inputs.destination)?;

        let result = execute(translator, &config)?;
        let outcome = evaluate(result, config.fail_on_warning)?;

        let post = variant.post_process(PostProcessContext {
            outcome,
            archiver: self.archiver,
            registry: &mut *self.registry,
        })?;
        info!("Finished {} job ({:?})", name, outcome);

        Ok(JobReport::Completed {
            variant: name,
            outcome,
            inputs: input_count,
            produced: post.produced,
            attached: post.attached,
            warnings,
        })
    }
}
