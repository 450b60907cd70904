//! Task classification
//!
//! Scores a free-text task description against the [`PatternCatalog`] and
//! picks the best matching category.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::patterns::PatternCatalog;

/// Confidence reported when no category found any evidence.
pub const DEFAULT_CONFIDENCE: f64 = 0.5;

/// Task intents used to drive model recommendation
///
/// Declaration order is the classifier's iteration order: on a score tie the
/// category declared first wins.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum TaskCategory {
    /// System design, large-scale structure
    ArchitectureDesign,
    /// MVPs, demos, hackathon work
    RapidPrototype,
    /// Performance and cleanup work
    CodeOptimization,
    /// READMEs, guides, API docs
    Documentation,
    /// Auth, crypto, audits
    SecurityCritical,
    /// Production-grade business systems
    EnterpriseDevelopment,
    /// Teaching material and tutorials
    EducationalContent,
    /// Fallback when nothing else matches
    GeneralDevelopment,
}

impl TaskCategory {
    /// All categories in iteration order.
    pub fn all() -> &'static [TaskCategory] {
        &[
            Self::ArchitectureDesign,
            Self::RapidPrototype,
            Self::CodeOptimization,
            Self::Documentation,
            Self::SecurityCritical,
            Self::EnterpriseDevelopment,
            Self::EducationalContent,
            Self::GeneralDevelopment,
        ]
    }

    /// Configuration key for this category.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ArchitectureDesign => "architecture_design",
            Self::RapidPrototype => "rapid_prototype",
            Self::CodeOptimization => "code_optimization",
            Self::Documentation => "documentation",
            Self::SecurityCritical => "security_critical",
            Self::EnterpriseDevelopment => "enterprise_development",
            Self::EducationalContent => "educational_content",
            Self::GeneralDevelopment => "general_development",
        }
    }
}

impl std::fmt::Display for TaskCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TaskCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("unknown task category: {s}"))
    }
}

/// Classification result
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// Winning category
    pub category: TaskCategory,
    /// Normalized score clamped to [0, 1]; not a probability
    pub confidence: f64,
}

impl ClassificationResult {
    /// The no-evidence result.
    pub fn fallback() -> Self {
        Self {
            category: TaskCategory::GeneralDevelopment,
            confidence: DEFAULT_CONFIDENCE,
        }
    }
}

/// Pattern-based task classifier
#[derive(Debug, Clone, Copy)]
pub struct TaskClassifier<'a> {
    catalog: &'a PatternCatalog,
}

impl<'a> TaskClassifier<'a> {
    pub fn new(catalog: &'a PatternCatalog) -> Self {
        Self { catalog }
    }

    /// Normalized score of every catalog category, in iteration order.
    pub fn scores(&self, description: &str) -> Vec<(TaskCategory, f64)> {
        let desc_lower = description.to_lowercase();
        self.catalog
            .sets()
            .iter()
            .map(|set| (set.category(), set.score(&desc_lower)))
            .collect()
    }

    /// Classify a task from its description.
    ///
    /// Returns [`ClassificationResult::fallback`] when every category scores
    /// zero or the catalog is empty.
    pub fn classify(&self, description: &str) -> ClassificationResult {
        let mut best: Option<(TaskCategory, f64)> = None;
        for (category, score) in self.scores(description) {
            // strict comparison keeps the earliest category on ties
            if best.map_or(true, |(_, top)| score > top) {
                best = Some((category, score));
            }
        }

        let result = match best {
            Some((category, score)) if score > 0.0 => ClassificationResult {
                category,
                confidence: score.min(1.0),
            },
            _ => ClassificationResult::fallback(),
        };

        debug!(
            category = %result.category,
            confidence = result.confidence,
            "classified task"
        );
        result
    }
}
