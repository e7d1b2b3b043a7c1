use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::{info, warn};
use std::path::Path;

mod cli;

use cli::Cli;
use cli::commands::Commands;
use retrojob::config::{self, JobFile, Settings};
use retrojob::job::{JarToolArchiver, JobReport, JobVariant, JsonlArtifactRegistry, Orchestrator, Outcome};
use retrojob::translator::{ProcessTranslator, RuntimePolicy, TranslationOptions, detect_host_runtime};

fn setup_logging(cli: &Cli, settings: &Settings) {
    let level = if cli.is_verbose() {
        "debug"
    } else {
        settings.log_level.as_deref().unwrap_or("info")
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

/// Only verification cares which runtime the host runs.
fn runtime_policy(settings: &Settings, java: &Path, options: &TranslationOptions) -> RuntimePolicy {
    if !options.verify {
        return RuntimePolicy::Newer;
    }
    let host = match &settings.host_runtime {
        Some(version) => version.clone(),
        None => match detect_host_runtime(java) {
            Ok(version) => version,
            Err(e) => {
                warn!("Could not determine host runtime, assuming a newer one: {}", e);
                return RuntimePolicy::Newer;
            }
        },
    };
    let policy = RuntimePolicy::from_versions(&host, options.effective_target());
    info!("Host runtime {} for target {}: {:?}", host, options.effective_target(), policy);
    policy
}

fn variant_for(command: &Commands, job: &JobFile) -> Box<dyn JobVariant> {
    match command {
        Commands::Translate(_) => Box::new(job.translate_job()),
        Commands::Project(_) => Box::new(job.project_job()),
        Commands::War(_) => Box::new(job.war_job()),
    }
}

fn run_application(cli: &Cli, settings: &Settings) -> Result<JobReport> {
    let args = cli.command.job_args();
    let job = config::load_job(args.job_file(), &args.overrides())?;
    let mut variant = variant_for(&cli.command, &job);

    // A job that does not apply must not need java or the engine.
    if let Some(skipped) = JobReport::skip_for(variant.as_ref()) {
        return Ok(skipped);
    }

    let java = settings.java_executable()?;
    let engine_jar = settings.engine_jar()?;
    let request = job.request(runtime_policy(settings, &java, &job.options));

    let archiver = match cli.command {
        Commands::War(_) => Some(JarToolArchiver::locate(Some(&java)).context("Cannot repackage the web archive")?),
        _ => None,
    };
    let mut registry = JsonlArtifactRegistry::in_directory(&job.project.output_directory);
    let mut translator = ProcessTranslator::new(&java, engine_jar);

    let mut orchestrator = Orchestrator::new(&job.base_dir, &mut registry);
    if let Some(archiver) = &archiver {
        orchestrator = orchestrator.with_archiver(archiver);
    }
    let report = orchestrator
        .run(variant.as_mut(), &request, &mut translator)
        .context(format!("Translation job {} failed", args.job_file().display()))?;
    Ok(report)
}

fn print_report(report: &JobReport) {
    match report {
        JobReport::Skipped { variant, reason } => {
            println!("{} {} job: {}", "Skipped".yellow(), variant, reason);
        }
        JobReport::Completed {
            variant,
            outcome,
            inputs,
            produced,
            attached,
            warnings,
        } => {
            for warning in warnings {
                println!("{} {}", "Warning:".yellow(), warning);
            }
            let status = match outcome {
                Outcome::Verified => "Translated".green(),
                Outcome::AcceptedUnverified => "Translated (unverified)".yellow(),
            };
            println!("{} {} job: {} input(s)", status, variant, inputs);
            if let Some(path) = produced {
                println!("  {} {}", "Produced:".cyan(), path.display());
            }
            if let Some(attachment) = attached {
                println!("  {} {} ({})", "Attached:".cyan(), attachment.kind, attachment.classifier);
            }
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let loaded = config::discover_settings(cli.config.as_deref()).context("Failed to load settings")?;
    setup_logging(&cli, &loaded.settings);
    loaded.report();
    let settings = loaded.settings;

    info!("Starting with settings from: {:?}", cli.config);

    let report = run_application(&cli, &settings)?;
    print_report(&report);
    Ok(())
}
