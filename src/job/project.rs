//! Project facts supplied by the host build.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Language this tool translates.
pub const JAVA_LANGUAGE: &str = "java";

/// Packaging kind of a web application.
pub const WAR_PACKAGING: &str = "war";

/// The build product a job works on, already resolved by the host build.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ProjectDescriptor {
    /// Packaging kind, e.g. `jar` or `war`.
    pub packaging: String,

    /// Language of the project's main artifact.
    pub language: String,

    /// The packaged main artifact, when one has been built.
    pub artifact: Option<PathBuf>,

    /// Build output directory.
    pub output_directory: PathBuf,

    /// Base name of build products.
    pub final_name: String,
}

impl Default for ProjectDescriptor {
    fn default() -> Self {
        Self {
            packaging: "jar".to_string(),
            language: JAVA_LANGUAGE.to_string(),
            artifact: None,
            output_directory: PathBuf::from("target"),
            final_name: "app".to_string(),
        }
    }
}

impl ProjectDescriptor {
    pub fn is_java(&self) -> bool {
        self.language == JAVA_LANGUAGE
    }

    pub fn is_war(&self) -> bool {
        self.packaging == WAR_PACKAGING
    }

    /// `<output>/<final-name>-<classifier>.<extension>`
    pub fn classified_output(&self, classifier: &str, extension: &str) -> PathBuf {
        self.output_directory
            .join(format!("{}-{}.{}", self.final_name, classifier, extension))
    }
}
