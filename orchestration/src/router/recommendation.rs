//! Model recommendation
//!
//! Combines the task classification with the profile store's
//! recommendation records to pick a primary and fallback profile.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::task_classifier::{ClassificationResult, TaskCategory, TaskClassifier};
use crate::agent_profile::{ProfileStore, VulnerabilityProfile};
use crate::error::ConfigResult;
use crate::guardrails::Guardrail;

/// Model recommendation for a task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Category the description was classified as
    pub category: TaskCategory,
    /// Profile id to use first
    pub primary_model: String,
    /// Profile id to use if the primary is unavailable
    pub fallback_model: String,
    /// Classification confidence in [0, 1]
    pub confidence: f64,
    /// Human-readable justification
    pub reasoning: String,
    /// Guardrails declared by the primary profile
    pub guardrails: Vec<Guardrail>,
    /// Profile ids known to do poorly on this kind of task
    pub avoid_models: Vec<String>,
}

/// Reasoning sentence for a category, before the confidence suffix.
pub fn reasoning_template(category: TaskCategory, display_name: &str) -> String {
    match category {
        TaskCategory::ArchitectureDesign => format!(
            "Complex architecture requires {}'s comprehensive approach",
            display_name
        ),
        TaskCategory::RapidPrototype => format!(
            "Quick development benefits from {}'s balanced solutions",
            display_name
        ),
        TaskCategory::CodeOptimization => format!(
            "Optimization tasks suit {}'s efficient approach",
            display_name
        ),
        TaskCategory::Documentation => format!(
            "Documentation benefits from {}'s clear explanations",
            display_name
        ),
        TaskCategory::SecurityCritical => format!(
            "Security-critical code requires {}'s robust patterns",
            display_name
        ),
        TaskCategory::EnterpriseDevelopment => format!(
            "Enterprise development needs {}'s comprehensive solutions",
            display_name
        ),
        TaskCategory::EducationalContent => format!(
            "Educational content benefits from {}'s clear documentation",
            display_name
        ),
        TaskCategory::GeneralDevelopment => {
            format!("{} is suitable for general development", display_name)
        }
    }
}

/// Confidence as a one-decimal percentage, e.g. `33.3%`.
pub fn format_confidence(confidence: f64) -> String {
    format!("{:.1}%", confidence * 100.0)
}

/// Recommends profiles for task descriptions
#[derive(Debug, Clone, Copy)]
pub struct RecommendationEngine<'a> {
    store: &'a ProfileStore,
    classifier: TaskClassifier<'a>,
}

impl<'a> RecommendationEngine<'a> {
    pub fn new(store: &'a ProfileStore) -> Self {
        Self {
            store,
            classifier: TaskClassifier::new(store.catalog()),
        }
    }

    pub fn classifier(&self) -> &TaskClassifier<'a> {
        &self.classifier
    }

    /// Recommend profiles for a task description.
    ///
    /// Fails only when the store has neither a record for the classified
    /// category nor a `general_development` record.
    pub fn recommend(&self, description: &str) -> ConfigResult<Recommendation> {
        let classification = self.classifier.classify(description);
        self.recommend_for(classification)
    }

    /// Build a recommendation from an existing classification.
    pub fn recommend_for(&self, classification: ClassificationResult) -> ConfigResult<Recommendation> {
        let ClassificationResult {
            category,
            confidence,
        } = classification;
        let (record_key, record) = self.store.recommendation_for(category)?;

        let primary = record.primary_or_baseline();
        let profile = self.store.profile(primary);
        let display_name = profile.map_or(primary, |p| p.display_name.as_str());
        let guardrails = profile.map(|p| p.guardrails.clone()).unwrap_or_default();

        let reasoning = format!(
            "{} (Confidence: {})",
            reasoning_template(category, display_name),
            format_confidence(confidence)
        );

        debug!(
            %category,
            %record_key,
            primary,
            known_profile = profile.is_some(),
            "built recommendation"
        );

        Ok(Recommendation {
            category,
            primary_model: primary.to_string(),
            fallback_model: record.fallback_or_baseline().to_string(),
            confidence,
            reasoning,
            guardrails,
            avoid_models: record.avoid.clone(),
        })
    }

    /// Vulnerability data for a model, or `None`.
    pub fn security_profile(&self, model_id: &str) -> Option<&'a VulnerabilityProfile> {
        self.store.vulnerability_profile(model_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROFILES: &str = r#"
ai_personalities:
  architect:
    model: claude-sonnet-4
    display_name: The Architect
    guardrails: [verbosity_control, security_hardening]
  speed_demon:
    model: gpt-4o-mini
    display_name: Speed Demon
    guardrails: [control_flow_validation]
task_recommendations:
  architecture_design:
    primary: architect
    fallback: speed_demon
    avoid: [junior]
  rapid_prototype:
    primary: speed_demon
  general_development:
    primary: speed_demon
    fallback: architect
vulnerability_profiles:
  gpt_4o_mini:
    weak_spots: [control_flow]
"#;

    fn store() -> ProfileStore {
        ProfileStore::from_yaml_str(PROFILES).unwrap()
    }

    #[test]
    fn test_format_confidence() {
        assert_eq!(format_confidence(1.0), "100.0%");
        assert_eq!(format_confidence(0.5), "50.0%");
        assert_eq!(format_confidence(1.0 / 3.0), "33.3%");
    }

    #[test]
    fn test_every_category_has_a_template() {
        for category in TaskCategory::all() {
            let text = reasoning_template(*category, "Tester");
            assert!(text.contains("Tester"), "{category}: {text}");
        }
    }

    #[test]
    fn test_recommend_architecture() {
        let store = store();
        let engine = RecommendationEngine::new(&store);
        let rec = engine
            .recommend("Design a comprehensive microservices architecture")
            .unwrap();
        assert_eq!(rec.category, TaskCategory::ArchitectureDesign);
        assert_eq!(rec.primary_model, "architect");
        assert_eq!(rec.fallback_model, "speed_demon");
        assert_eq!(rec.avoid_models, vec!["junior".to_string()]);
        assert_eq!(
            rec.guardrails,
            vec![Guardrail::VerbosityControl, Guardrail::SecurityHardening]
        );
        assert_eq!(
            rec.reasoning,
            "Complex architecture requires The Architect's comprehensive approach (Confidence: 100.0%)"
        );
    }

    #[test]
    fn test_record_without_fallback_uses_baseline() {
        let store = store();
        let engine = RecommendationEngine::new(&store);
        let rec = engine.recommend("quick demo").unwrap();
        assert_eq!(rec.category, TaskCategory::RapidPrototype);
        assert_eq!(rec.primary_model, "speed_demon");
        assert_eq!(rec.fallback_model, "rapid_prototyper");
        assert!(rec.avoid_models.is_empty());
    }

    #[test]
    fn test_missing_record_uses_general_development() {
        let store = store();
        let engine = RecommendationEngine::new(&store);
        let rec = engine.recommend("write a readme guide").unwrap();
        assert_eq!(rec.category, TaskCategory::Documentation);
        assert_eq!(rec.primary_model, "speed_demon");
        assert_eq!(rec.fallback_model, "architect");
        assert!(rec
            .reasoning
            .starts_with("Documentation benefits from Speed Demon's clear explanations"));
    }

    #[test]
    fn test_no_evidence_recommendation() {
        let store = store();
        let engine = RecommendationEngine::new(&store);
        let rec = engine.recommend("").unwrap();
        assert_eq!(rec.category, TaskCategory::GeneralDevelopment);
        assert_eq!(rec.confidence, 0.5);
        assert_eq!(
            rec.reasoning,
            "Speed Demon is suitable for general development (Confidence: 50.0%)"
        );
    }

    #[test]
    fn test_unknown_primary_uses_id_and_no_guardrails() {
        let yaml = r#"
task_recommendations:
  general_development:
    primary: ghost
"#;
        let store = ProfileStore::from_yaml_str(yaml).unwrap();
        let rec = RecommendationEngine::new(&store).recommend("hello").unwrap();
        assert_eq!(rec.primary_model, "ghost");
        assert!(rec.guardrails.is_empty());
        assert!(rec.reasoning.starts_with("ghost is suitable"));
    }

    #[test]
    fn test_security_profile_lookup() {
        let store = store();
        let engine = RecommendationEngine::new(&store);
        let profile = engine.security_profile("gpt-4o-mini").unwrap();
        assert_eq!(profile["weak_spots"][0], "control_flow");
        assert!(engine.security_profile("claude-sonnet-4").is_none());
    }

    #[test]
    fn test_recommendation_serializes_snake_case() {
        let store = store();
        let rec = RecommendationEngine::new(&store)
            .recommend("quick demo")
            .unwrap();
        let json = serde_json::to_value(&rec).unwrap();
        assert_eq!(json["category"], "rapid_prototype");
        assert_eq!(json["guardrails"][0], "control_flow_validation");
        assert_eq!(json["primary_model"], "speed_demon");
    }
}
