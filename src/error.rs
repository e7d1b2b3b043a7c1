//! Error types for retrojob
//!
//! Centralized error handling using thiserror. Every variant is fatal for the
//! current build step; nothing here is retried.

use std::path::PathBuf;
use thiserror::Error;

/// All error types that can occur while assembling or running a translation job
#[derive(Debug, Error)]
pub enum JobError {
    /// Include spec with neither a directory nor a pattern
    #[error("Invalid include: {0}")]
    InvalidInclude(String),

    /// A matched or named input path does not exist
    #[error("Path not found: {}", .0.display())]
    PathNotFound(PathBuf),

    /// Wildcard pattern could not be compiled
    #[error("Invalid pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// Verify classpath contains a null or empty element
    #[error("Null element in <verifyClasspath> at position {0}")]
    NullClasspathEntry(usize),

    /// Verification on a newer host runtime needs an explicit verify classpath
    #[error("Verification requires an explicit verify classpath when running on {0}")]
    MissingVerifyClasspath(String),

    /// Engine reported unresolved references and fail-on-warning is set
    #[error("Verification failed.")]
    VerificationFailed,

    /// Destination directory could not be created
    #[error("Failed to create directory {}: {source}", path.display())]
    DirectoryCreationFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Re-archiving the staged web-archive directory failed
    #[error("Failed to rewrite archive {}: {reason}", path.display())]
    ArchiveRewriteFailed { path: PathBuf, reason: String },

    /// Exploded war directory is missing or not a directory
    #[error("Invalid WAR build directory: {}", .0.display())]
    InvalidWarDirectory(PathBuf),

    /// Project descriptor is missing something the job needs
    #[error("Invalid project: {0}")]
    InvalidProject(String),

    /// Engine could not be started or crashed
    #[error("Engine error: {0}")]
    Engine(String),

    /// Directory walk error
    #[error("Scan error: {0}")]
    Walk(#[from] walkdir::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for retrojob operations
pub type Result<T> = std::result::Result<T, JobError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_not_found_error() {
        let err = JobError::PathNotFound(PathBuf::from("/src/missing.jar"));
        assert_eq!(err.to_string(), "Path not found: /src/missing.jar");
    }

    #[test]
    fn test_verification_failed_error() {
        assert_eq!(JobError::VerificationFailed.to_string(), "Verification failed.");
    }

    #[test]
    fn test_null_classpath_entry_error() {
        let err = JobError::NullClasspathEntry(2);
        assert_eq!(err.to_string(), "Null element in <verifyClasspath> at position 2");
    }

    #[test]
    fn test_directory_creation_failed_keeps_source() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = JobError::DirectoryCreationFailed {
            path: PathBuf::from("/out/classes"),
            source: io_err,
        };
        assert!(err.to_string().contains("/out/classes"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: JobError = io_err.into();
        assert!(matches!(err, JobError::Io(_)));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid").unwrap_err();
        let err: JobError = json_err.into();
        assert!(matches!(err, JobError::Json(_)));
    }
}
