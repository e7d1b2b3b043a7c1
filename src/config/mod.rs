//! Configuration for retrojob.
//!
//! Two layers plus overrides:
//! 1. Settings (--config, .retrojob.yml or ~/.config/retrojob/retrojob.yml)
//! 2. The job file named on the command line
//! 3. Command-line overrides applied on top of the job file

pub use self::job::JobFile;
pub use self::overrides::JobOverrides;
pub use self::settings::{LoadedSettings, PROJECT_SETTINGS, Settings};

mod job;
mod overrides;
mod settings;

/// Load settings from the standard search paths.
pub fn load_settings(explicit: Option<&std::path::Path>) -> eyre::Result<Settings> {
    Settings::load(explicit)
}

/// Find settings without logging, so logging can be configured from them.
pub fn discover_settings(explicit: Option<&std::path::Path>) -> eyre::Result<LoadedSettings> {
    Settings::discover(explicit)
}

/// Load a job file and layer `overrides` on top of it.
pub fn load_job(path: &std::path::Path, overrides: &JobOverrides) -> eyre::Result<JobFile> {
    let mut job = JobFile::load(path)?;
    if !overrides.is_empty() {
        log::debug!("Applying command-line overrides: {:?}", overrides);
        overrides.apply(&mut job);
    }
    Ok(job)
}
