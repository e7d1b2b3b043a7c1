//! The three job variants.

mod project_jar;
mod translate;
mod war;

pub use self::project_jar::ProjectJarJob;
pub use self::translate::TranslateJob;
pub use self::war::{CLASSES_DIR, LIB_DIR, WEB_DESCRIPTOR, WarJob, WarOptions, rewrite_archive};
