//! Tool settings.
//!
//! Loaded from --config, .retrojob.yml or ~/.config/retrojob/retrojob.yml

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Project-local settings file name.
pub const PROJECT_SETTINGS: &str = ".retrojob.yml";

/// Machine-level settings for running the engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Settings {
    /// Java executable used to run the engine.
    pub java: Option<PathBuf>,

    /// The engine jar.
    pub engine_jar: Option<PathBuf>,

    /// Host runtime version; detected from `java -version` when unset.
    pub host_runtime: Option<String>,

    /// Log level used when RUST_LOG is not set.
    pub log_level: Option<String>,
}

impl Settings {
    /// Load settings with fallback chain.
    ///
    /// Search order:
    /// 1. Explicit path if provided
    /// 2. .retrojob.yml in current directory
    /// 3. ~/.config/retrojob/retrojob.yml
    /// 4. Defaults
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let loaded = Self::discover(explicit)?;
        loaded.report();
        Ok(loaded.settings)
    }

    /// Like [`Settings::load`], but hands back what happened on the way
    /// instead of logging it, for callers that set up logging afterwards.
    pub fn discover(explicit: Option<&Path>) -> Result<LoadedSettings> {
        if let Some(path) = explicit {
            let settings =
                Self::load_from_file(path).context(format!("Failed to load settings from {}", path.display()))?;
            return Ok(LoadedSettings {
                settings,
                source: Some(path.to_path_buf()),
                problems: Vec::new(),
            });
        }

        let mut candidates = vec![PathBuf::from(PROJECT_SETTINGS)];
        candidates.extend(Self::user_settings_path());
        Ok(Self::discover_in(&candidates))
    }

    /// First candidate that loads wins; broken ones are recorded and skipped.
    fn discover_in(candidates: &[PathBuf]) -> LoadedSettings {
        let mut problems = Vec::new();
        for candidate in candidates.iter().filter(|c| c.exists()) {
            match Self::load_from_file(candidate) {
                Ok(settings) => {
                    return LoadedSettings {
                        settings,
                        source: Some(candidate.clone()),
                        problems,
                    };
                }
                Err(e) => problems.push(format!("Failed to load {}: {:#}", candidate.display(), e)),
            }
        }
        LoadedSettings {
            settings: Self::default(),
            source: None,
            problems,
        }
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read settings file")?;
        let settings: Self = serde_yaml::from_str(&content).context("Failed to parse settings file")?;
        Ok(settings)
    }

    fn user_settings_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("retrojob").join("retrojob.yml"))
    }

    /// The java executable: setting, then `$JAVA_HOME/bin/java`, then `PATH`.
    pub fn java_executable(&self) -> Result<PathBuf> {
        if let Some(java) = &self.java {
            return Ok(java.clone());
        }
        if let Some(home) = env::var_os("JAVA_HOME") {
            let candidate = Path::new(&home).join("bin").join(java_file_name());
            if candidate.is_file() {
                return Ok(candidate);
            }
        }
        which::which("java").context("Cannot find a java executable; set `java` in settings or JAVA_HOME")
    }

    pub fn engine_jar(&self) -> Result<&Path> {
        let jar = self
            .engine_jar
            .as_deref()
            .ok_or_else(|| eyre::eyre!("`engine-jar` is not set in settings"))?;
        if !jar.is_file() {
            eyre::bail!("Engine jar not found: {}", jar.display());
        }
        Ok(jar)
    }
}

/// Settings plus where they came from.
#[derive(Debug)]
pub struct LoadedSettings {
    pub settings: Settings,
    pub source: Option<PathBuf>,
    /// Settings files that exist but could not be loaded.
    pub problems: Vec<String>,
}

impl LoadedSettings {
    /// Log the outcome of discovery.
    pub fn report(&self) {
        for problem in &self.problems {
            log::warn!("{}", problem);
        }
        match &self.source {
            Some(path) => log::info!("Loaded settings from {}", path.display()),
            None => log::debug!("No settings file found, using defaults"),
        }
    }
}

fn java_file_name() -> &'static str {
    if cfg!(windows) { "java.exe" } else { "java" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_kebab_case() {
        let yaml = r#"
java: /opt/jdk/bin/java
engine-jar: /opt/retro/engine.jar
host-runtime: "17.0.2"
log-level: debug
"#;
        let settings: Settings = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(settings.java, Some(PathBuf::from("/opt/jdk/bin/java")));
        assert_eq!(settings.host_runtime.as_deref(), Some("17.0.2"));
        assert_eq!(settings.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_explicit_path_must_load() {
        let err = Settings::load(Some(Path::new("/nonexistent/retrojob.yml"))).unwrap_err();
        assert!(err.to_string().contains("Failed to load settings"));
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.yml");
        fs::write(&path, "engine-jar: engine.jar\n").unwrap();

        let settings = Settings::load(Some(&path)).unwrap();
        assert_eq!(settings.engine_jar, Some(PathBuf::from("engine.jar")));
        assert!(settings.java.is_none());
    }

    #[test]
    fn test_broken_settings_file_is_reported_and_skipped() {
        let dir = TempDir::new().unwrap();
        let broken = dir.path().join(PROJECT_SETTINGS);
        let user = dir.path().join("retrojob.yml");
        fs::write(&broken, "java: [not, a, path\n").unwrap();
        fs::write(&user, "log-level: warn\n").unwrap();

        let loaded = Settings::discover_in(&[broken.clone(), user.clone()]);

        assert_eq!(loaded.source, Some(user));
        assert_eq!(loaded.settings.log_level.as_deref(), Some("warn"));
        assert_eq!(loaded.problems.len(), 1);
        assert!(loaded.problems[0].contains(&broken.display().to_string()));
    }

    #[test]
    fn test_no_candidates_means_defaults() {
        let dir = TempDir::new().unwrap();
        let loaded = Settings::discover_in(&[dir.path().join("missing.yml")]);
        assert_eq!(loaded.settings, Settings::default());
        assert!(loaded.source.is_none());
        assert!(loaded.problems.is_empty());
    }

    #[test]
    fn test_configured_java_wins() {
        let settings = Settings {
            java: Some(PathBuf::from("/custom/java")),
            ..Default::default()
        };
        assert_eq!(settings.java_executable().unwrap(), PathBuf::from("/custom/java"));
    }

    #[test]
    fn test_engine_jar_must_exist() {
        assert!(Settings::default().engine_jar().is_err());

        let dir = TempDir::new().unwrap();
        let jar = dir.path().join("engine.jar");
        fs::write(&jar, "").unwrap();
        let settings = Settings {
            engine_jar: Some(jar.clone()),
            ..Default::default()
        };
        assert_eq!(settings.engine_jar().unwrap(), jar.as_path());
    }
}
