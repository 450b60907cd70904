//! Configuration error types
//!
//! Everything that can go wrong while building a [`ProfileStore`]. Lookups
//! against a store that loaded successfully recover through documented
//! fallbacks instead of failing, and the guardrail checks never fail.
//!
//! [`ProfileStore`]: crate::agent_profile::ProfileStore

use std::path::PathBuf;
use thiserror::Error;

use crate::router::TaskCategory;

/// Result type alias for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors raised while loading or validating the profile document
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Profile document could not be read.
    ///
    /// [`ProfileStore::load`](crate::agent_profile::ProfileStore::load)
    /// recovers from this with the built-in profile set; only
    /// [`ProfileStore::from_path`](crate::agent_profile::ProfileStore::from_path)
    /// surfaces it.
    #[error("Failed to read profile document at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Profile document is present but structurally invalid
    #[error("Malformed profile document{}: {message}", display_path(.path))]
    Malformed {
        path: Option<PathBuf>,
        message: String,
    },

    /// A profile declares a guardrail that has no check behind it
    #[error("Profile '{profile}' declares unknown guardrail '{name}'")]
    UnknownGuardrail { profile: String, name: String },

    /// A task or guardrail pattern failed to compile
    #[error("Invalid pattern for {owner}: {pattern:?} ({message})")]
    PatternCompile {
        owner: String,
        pattern: String,
        message: String,
    },

    /// Neither the requested category nor `general_development` has a record
    #[error("No recommendation record for {category} and no general_development fallback")]
    MissingFallbackRecommendation { category: TaskCategory },
}

impl ConfigError {
    /// Build a pattern compile error from a regex failure.
    pub fn pattern(owner: impl Into<String>, pattern: &str, err: regex::Error) -> Self {
        Self::PatternCompile {
            owner: owner.into(),
            pattern: pattern.to_string(),
            message: err.to_string(),
        }
    }

    /// Whether the loader may substitute the built-in profile set.
    pub fn is_missing_document(&self) -> bool {
        matches!(self, Self::Io { .. })
    }
}

fn display_path(path: &Option<PathBuf>) -> String {
    match path {
        Some(p) => format!(" at {}", p.display()),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_display_with_and_without_path() {
        let err = ConfigError::Malformed {
            path: Some(PathBuf::from("configs/ai.yml")),
            message: "expected a map".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Malformed profile document at configs/ai.yml: expected a map"
        );

        let err = ConfigError::Malformed {
            path: None,
            message: "expected a map".to_string(),
        };
        assert_eq!(err.to_string(), "Malformed profile document: expected a map");
    }

    #[test]
    fn test_pattern_error_keeps_source_text() {
        let bad = "\\b(unclosed";
        let regex_err = regex::Regex::new(bad).unwrap_err();
        let err = ConfigError::pattern("rapid_prototype", bad, regex_err);
        match &err {
            ConfigError::PatternCompile { owner, pattern, .. } => {
                assert_eq!(owner, "rapid_prototype");
                assert_eq!(pattern, bad);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(!err.is_missing_document());
    }

    #[test]
    fn test_io_error_is_missing_document() {
        let err = ConfigError::Io {
            path: PathBuf::from("nope.yml"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert!(err.is_missing_document());
        assert!(err.to_string().contains("nope.yml"));
    }

    #[test]
    fn test_missing_fallback_names_category() {
        let err = ConfigError::MissingFallbackRecommendation {
            category: TaskCategory::Documentation,
        };
        assert!(err.to_string().contains("documentation"));
    }
}
