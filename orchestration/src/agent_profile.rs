//! Agent profiles — personalities, task recommendations and vulnerability data.
//!
//! A [`ProfileStore`] is built once from the YAML profile document (or the
//! built-in defaults) and is immutable afterwards. It owns everything the
//! classifier and guardrail engine read: the compiled task pattern catalog,
//! the compiled guardrail rules, model profiles and recommendation records.
//!
//! # Document layout
//!
//! ```yaml
//! ai_personalities:
//!   architect:
//!     model: claude-sonnet-4
//!     display_name: The Architect
//!     guardrails: [verbosity_control, security_hardening]
//! task_recommendations:
//!   architecture_design:
//!     primary: architect
//!     fallback: rapid_prototyper
//!     avoid: [speed_demon]
//!   general_development:
//!     primary: rapid_prototyper
//! vulnerability_profiles:
//!   claude_sonnet_4:
//!     common_issues: [over_engineering]
//! ```
//!
//! Optional `task_patterns` and `guardrail_rules` sections override the
//! built-in heuristics.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::error::{ConfigError, ConfigResult};
use crate::guardrails::{CompiledRules, Guardrail, GuardrailRules};
use crate::router::{PatternCatalog, TaskCategory};

/// Profile used when a recommendation record names no primary or fallback.
pub const BASELINE_PROFILE: &str = "rapid_prototyper";

/// Default profile document location, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "configs/ai-personalities.yml";

/// A named agent personality.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelProfile {
    /// Profile id (key in `ai_personalities`)
    pub id: String,
    /// Underlying model name; the profile id when the document omits it
    pub model: String,
    /// Human-readable name used in reasoning text
    pub display_name: String,
    /// Guardrails to apply to this profile's output, de-duplicated, in
    /// declaration order
    pub guardrails: Vec<Guardrail>,
}

/// Which profiles to use (and avoid) for one task category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback: Option<String>,
    #[serde(default)]
    pub avoid: Vec<String>,
}

impl RecommendationRecord {
    /// Primary profile id, or [`BASELINE_PROFILE`].
    pub fn primary_or_baseline(&self) -> &str {
        self.primary.as_deref().unwrap_or(BASELINE_PROFILE)
    }

    /// Fallback profile id, or [`BASELINE_PROFILE`].
    pub fn fallback_or_baseline(&self) -> &str {
        self.fallback.as_deref().unwrap_or(BASELINE_PROFILE)
    }
}

/// Free-form vulnerability data, returned verbatim.
pub type VulnerabilityProfile = serde_json::Value;

/// Personality entry as written in the document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct PersonalityEntry {
    model: Option<String>,
    display_name: Option<String>,
    guardrails: Vec<String>,
}

/// Profile document as written on disk, before validation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct ProfileDocument {
    ai_personalities: BTreeMap<String, PersonalityEntry>,
    task_recommendations: BTreeMap<TaskCategory, RecommendationRecord>,
    vulnerability_profiles: BTreeMap<String, VulnerabilityProfile>,
    task_patterns: BTreeMap<TaskCategory, Vec<String>>,
    guardrail_rules: GuardrailRules,
}

/// Validated, immutable configuration shared by every engine.
#[derive(Debug, Clone)]
pub struct ProfileStore {
    profiles: BTreeMap<String, ModelProfile>,
    recommendations: BTreeMap<TaskCategory, RecommendationRecord>,
    vulnerabilities: BTreeMap<String, VulnerabilityProfile>,
    catalog: PatternCatalog,
    rules: CompiledRules,
    source: Option<PathBuf>,
}

impl ProfileStore {
    /// Load the profile document at `path`.
    ///
    /// A missing or unreadable file is not fatal: the built-in profile set
    /// is used instead. A file that exists but fails validation is an error.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        match Self::from_path(path) {
            Err(e) if e.is_missing_document() => {
                warn!(
                    path = %path.display(),
                    error = %e,
                    "Profile document not available, using built-in defaults"
                );
                Self::builtin()
            }
            other => other,
        }
    }

    /// Load the profile document at `path` without any fallback.
    pub fn from_path(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let document = parse_document(&content, Some(path))?;
        Self::from_document(document, Some(path.to_path_buf()))
    }

    /// Build a store from YAML text.
    pub fn from_yaml_str(yaml: &str) -> ConfigResult<Self> {
        let document = parse_document(yaml, None)?;
        Self::from_document(document, None)
    }

    /// The minimal built-in profile set: one balanced profile and a
    /// `general_development` record pointing at it.
    pub fn builtin() -> ConfigResult<Self> {
        let mut document = ProfileDocument::default();
        document.ai_personalities.insert(
            BASELINE_PROFILE.to_string(),
            PersonalityEntry {
                model: Some("gpt-4o".to_string()),
                display_name: Some("Rapid Prototyper".to_string()),
                guardrails: vec![Guardrail::ControlFlowValidation.to_string()],
            },
        );
        document.task_recommendations.insert(
            TaskCategory::GeneralDevelopment,
            RecommendationRecord {
                primary: Some(BASELINE_PROFILE.to_string()),
                ..RecommendationRecord::default()
            },
        );
        Self::from_document(document, None)
    }

    fn from_document(document: ProfileDocument, source: Option<PathBuf>) -> ConfigResult<Self> {
        let mut profiles = BTreeMap::new();
        for (id, entry) in document.ai_personalities {
            let mut guardrails = Vec::new();
            for name in &entry.guardrails {
                let guardrail: Guardrail =
                    name.parse().map_err(|_| ConfigError::UnknownGuardrail {
                        profile: id.clone(),
                        name: name.clone(),
                    })?;
                if !guardrails.contains(&guardrail) {
                    guardrails.push(guardrail);
                }
            }
            let profile = ModelProfile {
                model: entry.model.unwrap_or_else(|| id.clone()),
                display_name: entry.display_name.unwrap_or_else(|| id.clone()),
                id: id.clone(),
                guardrails,
            };
            profiles.insert(id, profile);
        }

        if !document
            .task_recommendations
            .contains_key(&TaskCategory::GeneralDevelopment)
        {
            return Err(ConfigError::MissingFallbackRecommendation {
                category: TaskCategory::GeneralDevelopment,
            });
        }

        for (category, record) in &document.task_recommendations {
            let referenced = std::iter::once(record.primary_or_baseline())
                .chain(record.fallback.as_deref())
                .chain(record.avoid.iter().map(String::as_str));
            for id in referenced {
                if !profiles.contains_key(id) {
                    warn!(%category, profile = id, "Recommendation references unknown profile");
                }
            }
        }

        let catalog = PatternCatalog::with_overrides(&document.task_patterns)?;
        let rules = document.guardrail_rules.compile()?;

        let origin = source
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "built-in".to_string());
        info!(
            profiles = profiles.len(),
            recommendations = document.task_recommendations.len(),
            vulnerability_profiles = document.vulnerability_profiles.len(),
            patterns = catalog.pattern_count(),
            source = %origin,
            "Profile store loaded"
        );

        Ok(Self {
            profiles,
            recommendations: document.task_recommendations,
            vulnerabilities: document.vulnerability_profiles,
            catalog,
            rules,
            source,
        })
    }

    /// Profile by id.
    pub fn profile(&self, id: &str) -> Option<&ModelProfile> {
        self.profiles.get(id)
    }

    /// All profiles, ordered by id.
    pub fn profiles(&self) -> impl Iterator<Item = &ModelProfile> {
        self.profiles.values()
    }

    /// Guardrails declared by a profile; empty for unknown ids.
    pub fn guardrails_for(&self, id: &str) -> &[Guardrail] {
        match self.profiles.get(id) {
            Some(profile) => &profile.guardrails,
            None => {
                debug!(profile = id, "Unknown profile, no guardrails apply");
                &[]
            }
        }
    }

    /// Record for `category`, falling back to `general_development`.
    ///
    /// Returns the category whose record was actually used alongside it.
    pub fn recommendation_for(
        &self,
        category: TaskCategory,
    ) -> ConfigResult<(TaskCategory, &RecommendationRecord)> {
        if let Some(record) = self.recommendations.get(&category) {
            return Ok((category, record));
        }
        debug!(%category, "No recommendation record, using general_development");
        self.recommendations
            .get(&TaskCategory::GeneralDevelopment)
            .map(|record| (TaskCategory::GeneralDevelopment, record))
            .ok_or(ConfigError::MissingFallbackRecommendation { category })
    }

    /// Vulnerability data for a model id, with `-` normalized to `_`.
    pub fn vulnerability_profile(&self, model_id: &str) -> Option<&VulnerabilityProfile> {
        self.vulnerabilities.get(&normalize_model_key(model_id))
    }

    pub fn catalog(&self) -> &PatternCatalog {
        &self.catalog
    }

    pub fn rules(&self) -> &CompiledRules {
        &self.rules
    }

    /// Path the store was loaded from; `None` for built-in or in-memory stores.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }
}

/// Key form used by `vulnerability_profiles`.
pub fn normalize_model_key(model_id: &str) -> String {
    model_id.replace('-', "_")
}

/// Parse YAML text into a [`ProfileDocument`]. An empty or null document is
/// malformed rather than a document with every section missing.
fn parse_document(yaml: &str, path: Option<&Path>) -> ConfigResult<ProfileDocument> {
    let malformed = |message: String| ConfigError::Malformed {
        path: path.map(Path::to_path_buf),
        message,
    };
    if yaml.trim().is_empty() {
        return Err(malformed("profile document is empty".into()));
    }
    serde_yaml::from_str::<Option<ProfileDocument>>(yaml)
        .map_err(|e| malformed(e.to_string()))?
        .ok_or_else(|| malformed("profile document is empty".into()))
}
