//! Retrojob - orchestrates bytecode backport translation jobs
//!
//! Retrojob resolves what should be translated, assembles one configuration
//! for an external translation engine, runs it once, applies the
//! verification outcome policy and post-processes the result into
//! classified jars or wars.

pub mod config;
pub mod error;
pub mod include;
pub mod job;
pub mod translator;

pub use error::{JobError, Result};
