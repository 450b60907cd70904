//! Task pattern catalog
//!
//! Each task category owns an ordered set of case-insensitive, word-boundary
//! regexes. The catalog is compiled once when the profile store is built and
//! is read-only afterwards; a pattern that fails to compile aborts the load
//! instead of silently dropping the category.

use regex::{Regex, RegexBuilder};
use std::collections::BTreeMap;

use super::task_classifier::TaskCategory;
use crate::error::{ConfigError, ConfigResult};

const ARCHITECTURE_DESIGN: &[&str] = &[
    r"\b(architecture|design|system|enterprise|scalable|microservices)\b",
    r"\b(complex|comprehensive|full-stack|infrastructure)\b",
    r"\b(patterns|frameworks|enterprise-grade)\b",
];

const RAPID_PROTOTYPE: &[&str] = &[
    r"\b(prototype|mvp|quick|fast|rapid|demo)\b",
    r"\b(poc|proof.of.concept|iteration|experiment)\b",
    r"\b(hackathon|sprint|minimal.viable)\b",
];

const CODE_OPTIMIZATION: &[&str] = &[
    r"\b(optimize|refactor|performance|efficient|clean)\b",
    r"\b(improve|enhance|streamline|minimize)\b",
    r"\b(memory|speed|algorithm|complexity)\b",
];

const DOCUMENTATION: &[&str] = &[
    r"\b(document|readme|guide|tutorial|explain)\b",
    r"\b(comments|documentation|api.docs|manual)\b",
    r"\b(help|instructions|examples|walkthrough)\b",
];

const SECURITY_CRITICAL: &[&str] = &[
    r"\b(security|secure|auth|authentication|authorization)\b",
    r"\b(encryption|crypto|ssl|tls|certificate)\b",
    r"\b(vulnerability|penetration|audit|compliance)\b",
];

const ENTERPRISE_DEVELOPMENT: &[&str] = &[
    r"\b(enterprise|production|corporate|business)\b",
    r"\b(scalable|robust|reliable|maintainable)\b",
    r"\b(compliance|audit|governance|standards)\b",
];

const EDUCATIONAL_CONTENT: &[&str] = &[
    r"\b(learn|teach|tutorial|example|educational)\b",
    r"\b(beginner|student|course|training)\b",
    r"\b(explain|demonstrate|illustrate)\b",
];

/// Built-in pattern sources for a category.
///
/// `general_development` has no patterns: it is only ever selected as the
/// no-evidence default.
pub fn default_patterns(category: TaskCategory) -> &'static [&'static str] {
    match category {
        TaskCategory::ArchitectureDesign => ARCHITECTURE_DESIGN,
        TaskCategory::RapidPrototype => RAPID_PROTOTYPE,
        TaskCategory::CodeOptimization => CODE_OPTIMIZATION,
        TaskCategory::Documentation => DOCUMENTATION,
        TaskCategory::SecurityCritical => SECURITY_CRITICAL,
        TaskCategory::EnterpriseDevelopment => ENTERPRISE_DEVELOPMENT,
        TaskCategory::EducationalContent => EDUCATIONAL_CONTENT,
        TaskCategory::GeneralDevelopment => &[],
    }
}

/// Compiled patterns for one task category.
#[derive(Debug, Clone)]
pub struct PatternSet {
    category: TaskCategory,
    patterns: Vec<Regex>,
}

impl PatternSet {
    /// Compile a pattern set, failing on the first invalid pattern.
    pub fn compile<S: AsRef<str>>(category: TaskCategory, sources: &[S]) -> ConfigResult<Self> {
        let patterns = sources
            .iter()
            .map(|source| {
                let source = source.as_ref();
                RegexBuilder::new(source)
                    .case_insensitive(true)
                    .build()
                    .map_err(|e| ConfigError::pattern(category.to_string(), source, e))
            })
            .collect::<ConfigResult<Vec<_>>>()?;
        Ok(Self { category, patterns })
    }

    pub fn category(&self) -> TaskCategory {
        self.category
    }

    /// Number of patterns in the set.
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Total non-overlapping matches across every pattern.
    pub fn match_count(&self, text: &str) -> usize {
        self.patterns
            .iter()
            .map(|re| re.find_iter(text).count())
            .sum()
    }

    /// Match count normalized by pattern count.
    ///
    /// Several distinct patterns firing outscores one pattern firing
    /// repeatedly, and sets of different sizes stay comparable. An empty set
    /// scores zero.
    pub fn score(&self, text: &str) -> f64 {
        if self.patterns.is_empty() {
            return 0.0;
        }
        self.match_count(text) as f64 / self.patterns.len() as f64
    }
}

/// Category → pattern set table, iterated in [`TaskCategory::all`] order.
#[derive(Debug, Clone, Default)]
pub struct PatternCatalog {
    sets: Vec<PatternSet>,
}

impl PatternCatalog {
    /// Catalog with no categories. Classification always falls back to the
    /// default result.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Compile the built-in patterns.
    pub fn builtin() -> ConfigResult<Self> {
        Self::with_overrides(&BTreeMap::new())
    }

    /// Compile the built-in patterns, replacing the list of any category
    /// present in `overrides`.
    ///
    /// Iteration order stays [`TaskCategory::all`] regardless of how the
    /// overrides are ordered, so tie-breaking is reproducible.
    pub fn with_overrides(overrides: &BTreeMap<TaskCategory, Vec<String>>) -> ConfigResult<Self> {
        let mut sets = Vec::new();
        for &category in TaskCategory::all() {
            let set = match overrides.get(&category) {
                Some(sources) => PatternSet::compile(category, sources)?,
                None => PatternSet::compile(category, default_patterns(category))?,
            };
            if !set.is_empty() {
                sets.push(set);
            }
        }
        Ok(Self { sets })
    }

    /// Pattern sets in iteration order.
    pub fn sets(&self) -> &[PatternSet] {
        &self.sets
    }

    pub fn get(&self, category: TaskCategory) -> Option<&PatternSet> {
        self.sets.iter().find(|s| s.category == category)
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// Total compiled patterns across all categories.
    pub fn pattern_count(&self) -> usize {
        self.sets.iter().map(PatternSet::len).sum()
    }
}
