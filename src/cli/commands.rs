//! CLI command definitions using clap.
//!
//! Defines the main CLI structure and subcommands:
//! - translate: translate includes and file sets
//! - project: translate the project's main jar into a classified jar
//! - war: translate an exploded web application into a classified war

use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

use retrojob::config::JobOverrides;

/// Retrojob - backport Java bytecode for older runtimes
#[derive(Parser, Debug)]
#[command(name = "retrojob")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Optional settings file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}

/// Main subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Translate the includes and file sets listed in a job file
    Translate(JobArgs),

    /// Translate the project's main artifact into a classified jar
    Project(JobArgs),

    /// Translate an exploded web application into a classified war
    War(JobArgs),
}

impl Commands {
    pub fn job_args(&self) -> &JobArgs {
        match self {
            Commands::Translate(args) | Commands::Project(args) | Commands::War(args) => args,
        }
    }
}

/// Job file plus per-invocation overrides
#[derive(Args, Debug)]
pub struct JobArgs {
    /// Job file (YAML)
    pub job: PathBuf,

    /// Write translated classes to this directory
    #[arg(long)]
    pub destdir: Option<PathBuf>,

    /// Write translated classes to this jar
    #[arg(long)]
    pub destjar: Option<PathBuf>,

    /// Verify translated classes against the verify classpath
    #[arg(long)]
    pub verify: bool,

    /// Accept unverified results instead of failing
    #[arg(long)]
    pub no_fail_on_warning: bool,

    /// Target runtime version, e.g. 1.4
    #[arg(short, long)]
    pub target: Option<String>,

    /// Classifier of the produced artifact
    #[arg(long)]
    pub classifier: Option<String>,

    /// Do not register the produced artifact
    #[arg(long)]
    pub no_attach: bool,
}

impl JobArgs {
    pub fn job_file(&self) -> &Path {
        &self.job
    }

    /// Only flags that were actually given become overrides.
    pub fn overrides(&self) -> JobOverrides {
        JobOverrides {
            destdir: self.destdir.clone(),
            destjar: self.destjar.clone(),
            verify: self.verify.then_some(true),
            fail_on_warning: self.no_fail_on_warning.then_some(false),
            target: self.target.clone(),
            classifier: self.classifier.clone(),
            attach: self.no_attach.then_some(false),
        }
    }
}
