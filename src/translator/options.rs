//! Translation options as supplied by the job layer.

use serde::{Deserialize, Serialize};

/// Default engine target version.
pub const DEFAULT_TARGET: &str = "1.4";

/// Default source mask.
pub const DEFAULT_SOURCE_MASK: &str = "*.class";

/// Immutable option set for one translation job.
///
/// Defaults live here, in the configuration layer. The assembler only ever
/// forwards what is present.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct TranslationOptions {
    /// Strip generic signature information.
    pub strip_signatures: bool,

    pub verbose: bool,

    /// Check translated bytecode for references that cannot be resolved.
    pub verify: bool,

    /// Only translate classes compiled for a newer target.
    pub lazy: bool,

    /// Fail the job when verification reports problems.
    pub fail_on_warning: bool,

    /// Use alternative implementations for better compatibility.
    pub advanced: bool,

    pub retain_api: bool,

    pub retain_flags: bool,

    pub target: Option<String>,

    /// Package for a private copy of the runtime support classes.
    pub embed: Option<String>,

    /// User-defined backport packages, `;`-separated.
    pub backport: Option<String>,

    /// Wildcard mask of files to translate, e.g. `*.class;*.tld`.
    pub source_mask: Option<String>,
}

impl Default for TranslationOptions {
    fn default() -> Self {
        Self {
            strip_signatures: false,
            verbose: false,
            verify: false,
            lazy: false,
            fail_on_warning: true,
            advanced: false,
            retain_api: false,
            retain_flags: false,
            target: Some(DEFAULT_TARGET.to_string()),
            embed: None,
            backport: None,
            source_mask: Some(DEFAULT_SOURCE_MASK.to_string()),
        }
    }
}

impl TranslationOptions {
    /// The legacy runtime this job targets, for runtime policy decisions.
    pub fn effective_target(&self) -> &str {
        self.target
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or(DEFAULT_TARGET)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = TranslationOptions::default();
        assert!(options.fail_on_warning);
        assert!(!options.verify);
        assert!(!options.strip_signatures);
        assert_eq!(options.target.as_deref(), Some("1.4"));
        assert_eq!(options.source_mask.as_deref(), Some("*.class"));
        assert!(options.embed.is_none());
        assert!(options.backport.is_none());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let options: TranslationOptions = serde_yaml::from_str("verify: true\nembed: com.acme.rt\n").unwrap();
        assert!(options.verify);
        assert!(options.fail_on_warning);
        assert_eq!(options.embed.as_deref(), Some("com.acme.rt"));
        assert_eq!(options.target.as_deref(), Some("1.4"));
    }

    #[test]
    fn test_explicit_null_clears_default() {
        let options: TranslationOptions = serde_yaml::from_str("target: null\nsource-mask: ~\n").unwrap();
        assert!(options.target.is_none());
        assert!(options.source_mask.is_none());
        assert_eq!(options.effective_target(), "1.4");
    }
}
