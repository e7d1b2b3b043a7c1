//! Job orchestration: variants, the shared pipeline, and post-processing
//! collaborators.

pub mod archive;
pub mod attach;
pub mod executor;
pub mod outcome;
pub mod pipeline;
pub mod project;
pub mod staging;
pub mod variants;

pub use archive::{Archiver, JarToolArchiver};
pub use attach::{
    ArtifactRegistry, AttachOptions, Attachment, DEFAULT_CLASSIFIER, JsonlArtifactRegistry, attach_if_enabled,
};
pub use executor::execute;
pub use outcome::{Outcome, evaluate};
pub use pipeline::{JobInputs, JobReport, JobRequest, JobVariant, Orchestrator, PostProcessContext, PostProcessed};
pub use project::ProjectDescriptor;
pub use variants::{ProjectJarJob, TranslateJob, WarJob, WarOptions};
