//! Wildcard pattern sets used for include and exclude matching.
//!
//! Paths are matched relative to a base directory with `/` separators.
//! `*` and `?` stay inside one path segment, `**` spans segments.

use glob::{MatchOptions, Pattern};

use crate::error::{JobError, Result};

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// SCM and editor droppings skipped by file sets unless disabled.
pub const DEFAULT_EXCLUDES: &[&str] = &[
    "**/*~",
    "**/#*#",
    "**/.#*",
    "**/%*%",
    "**/._*",
    "**/CVS",
    "**/CVS/**",
    "**/.cvsignore",
    "**/.svn",
    "**/.svn/**",
    "**/.git",
    "**/.git/**",
    "**/.gitignore",
    "**/.hg",
    "**/.hg/**",
    "**/.DS_Store",
    "**/.bzr",
    "**/.bzr/**",
];

/// A union of compiled wildcard patterns.
#[derive(Debug, Clone, Default)]
pub struct PatternSet {
    patterns: Vec<(String, Pattern)>,
}

impl PatternSet {
    /// Parse a `;`- or `,`-separated pattern string, e.g. `*.class;*.tld`.
    pub fn parse(spec: &str) -> Result<Self> {
        Self::from_patterns(spec.split([';', ',']))
    }

    /// Compile each pattern; blank entries are ignored.
    pub fn from_patterns<I, S>(patterns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut compiled = Vec::new();
        for raw in patterns {
            let normalized = normalize(raw.as_ref());
            if normalized.is_empty() {
                continue;
            }
            if escapes_base(&normalized) {
                return Err(JobError::InvalidPattern {
                    pattern: raw.as_ref().to_string(),
                    reason: "patterns must stay below their base directory".to_string(),
                });
            }
            let pattern = Pattern::new(&normalized).map_err(|e| JobError::InvalidPattern {
                pattern: raw.as_ref().to_string(),
                reason: e.msg.to_string(),
            })?;
            compiled.push((normalized, pattern));
        }
        Ok(Self { patterns: compiled })
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// True if any pattern matches the `/`-separated relative path.
    pub fn matches(&self, relative: &str) -> bool {
        self.patterns
            .iter()
            .any(|(_, pattern)| pattern.matches_with(relative, MATCH_OPTIONS))
    }

    /// Patterns that name a single path rather than a wildcard.
    pub fn literals(&self) -> impl Iterator<Item = &str> {
        self.patterns
            .iter()
            .map(|(raw, _)| raw.as_str())
            .filter(|raw| is_literal(raw))
    }
}

/// True if the pattern has no wildcard characters.
pub fn is_literal(pattern: &str) -> bool {
    !pattern.contains(['*', '?', '['])
}

/// Absolute patterns and `..` segments point outside the scanned tree.
fn escapes_base(pattern: &str) -> bool {
    pattern.starts_with('/') || pattern.split('/').any(|segment| segment == "..")
}

/// Normalize separators; a trailing `/` means everything below it.
fn normalize(raw: &str) -> String {
    let mut pattern = raw.trim().replace('\\', "/");
    while let Some(stripped) = pattern.strip_prefix("./") {
        pattern = stripped.to_string();
    }
    if pattern.ends_with('/') {
        pattern.push_str("**");
    }
    pattern
}
