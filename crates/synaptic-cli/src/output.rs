//! Output rendering for the three formats.
//!
//! Every renderer returns the complete text to print so the binary does a
//! single write to stdout. Structured formats serialize the library types
//! directly; text is meant for humans.

use anyhow::{Context, Result};
use orchestration::{
    router::format_confidence, ClientConfig, GuardrailWarning, Recommendation, TaskCategory,
    VulnerabilityProfile,
};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Write as _;

/// Output format selected with `--output`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Yaml,
}

fn structured<T: Serialize>(value: &T, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Yaml => serde_yaml::to_string(value).context("Failed to render YAML"),
        OutputFormat::Json | OutputFormat::Text => {
            serde_json::to_string_pretty(value).context("Failed to render JSON")
        }
    }
}

#[derive(Serialize)]
struct ExplainedRecommendation<'a> {
    #[serde(flatten)]
    recommendation: &'a Recommendation,
    #[serde(skip_serializing_if = "Option::is_none")]
    scores: Option<BTreeMap<TaskCategory, f64>>,
}

/// Render a recommendation, optionally with the per-category scores.
pub fn render_recommendation(
    task: &str,
    recommendation: &Recommendation,
    scores: Option<&[(TaskCategory, f64)]>,
    format: OutputFormat,
) -> Result<String> {
    if format != OutputFormat::Text {
        let explained = ExplainedRecommendation {
            recommendation,
            scores: scores.map(|s| s.iter().copied().collect()),
        };
        return structured(&explained, format);
    }

    let mut out = String::new();
    writeln!(out, "AI Model Recommendation for: '{}'", task)?;
    writeln!(out, "Primary Model: {}", recommendation.primary_model)?;
    writeln!(out, "Fallback Model: {}", recommendation.fallback_model)?;
    writeln!(
        out,
        "Confidence: {}",
        format_confidence(recommendation.confidence)
    )?;
    writeln!(out, "Reasoning: {}", recommendation.reasoning)?;
    writeln!(out, "Guardrails: {}", join(&recommendation.guardrails))?;
    if !recommendation.avoid_models.is_empty() {
        writeln!(out, "Avoid Models: {}", recommendation.avoid_models.join(", "))?;
    }
    if let Some(scores) = scores {
        writeln!(out, "Category Scores:")?;
        for (category, score) in scores {
            writeln!(out, "  {}: {:.2}", category, score)?;
        }
    }
    Ok(out.trim_end().to_string())
}

#[derive(Serialize)]
struct GuardrailOutput<'a> {
    model: &'a str,
    warnings: &'a [GuardrailWarning],
}

/// Render guardrail warnings for a profile.
pub fn render_guardrail_warnings(
    model: &str,
    warnings: &[GuardrailWarning],
    format: OutputFormat,
) -> Result<String> {
    if format != OutputFormat::Text {
        return structured(&GuardrailOutput { model, warnings }, format);
    }
    if warnings.is_empty() {
        return Ok(format!("No guardrail warnings for '{}'", model));
    }

    let mut out = format!("Guardrail warnings for '{}':", model);
    for warning in warnings {
        write!(out, "\n- [{}] {}", warning.guardrail, warning)?;
    }
    Ok(out)
}

#[derive(Serialize)]
struct SecurityProfileOutput<'a> {
    model: &'a str,
    profile: Option<&'a VulnerabilityProfile>,
}

/// Render a vulnerability profile, or a not-found message.
pub fn render_security_profile(
    model: &str,
    profile: Option<&VulnerabilityProfile>,
    format: OutputFormat,
) -> Result<String> {
    if format != OutputFormat::Text {
        return structured(&SecurityProfileOutput { model, profile }, format);
    }
    match profile {
        Some(profile) => {
            let body = serde_yaml::to_string(profile).context("Failed to render YAML")?;
            Ok(format!(
                "Security profile for '{}':\n{}",
                model,
                body.trim_end()
            ))
        }
        None => Ok(format!("No security profile found for '{}'", model)),
    }
}

/// Render the client configuration. Text output is the JSON document a
/// client expects on disk.
pub fn render_client_config(config: &ClientConfig, format: OutputFormat) -> Result<String> {
    structured(config, format)
}

fn join<T: std::fmt::Display>(items: &[T]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use orchestration::{Guardrail, WarningKind};

    fn recommendation() -> Recommendation {
        Recommendation {
            category: TaskCategory::ArchitectureDesign,
            primary_model: "architect".to_string(),
            fallback_model: "rapid_prototyper".to_string(),
            confidence: 1.0 / 3.0,
            reasoning: "Complex architecture requires The Architect's comprehensive approach (Confidence: 33.3%)".to_string(),
            guardrails: vec![Guardrail::VerbosityControl, Guardrail::SecurityHardening],
            avoid_models: vec![],
        }
    }

    #[test]
    fn test_text_recommendation_layout() {
        let text = render_recommendation(
            "design a system",
            &recommendation(),
            None,
            OutputFormat::Text,
        )
        .unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "AI Model Recommendation for: 'design a system'",
                "Primary Model: architect",
                "Fallback Model: rapid_prototyper",
                "Confidence: 33.3%",
                "Reasoning: Complex architecture requires The Architect's comprehensive approach (Confidence: 33.3%)",
                "Guardrails: verbosity_control, security_hardening",
            ]
        );
    }

    #[test]
    fn test_text_avoid_line_only_when_present() {
        let mut rec = recommendation();
        rec.avoid_models = vec!["speed_demon".into(), "junior".into()];
        let text = render_recommendation("x", &rec, None, OutputFormat::Text).unwrap();
        assert!(text.ends_with("Avoid Models: speed_demon, junior"));
    }

    #[test]
    fn test_explain_adds_scores() {
        let scores = [
            (TaskCategory::ArchitectureDesign, 1.0 / 3.0),
            (TaskCategory::RapidPrototype, 0.0),
        ];
        let text =
            render_recommendation("x", &recommendation(), Some(&scores), OutputFormat::Text)
                .unwrap();
        assert!(text.contains("Category Scores:\n  architecture_design: 0.33\n  rapid_prototype: 0.00"));

        let json = render_recommendation("x", &recommendation(), Some(&scores), OutputFormat::Json)
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["primary_model"], "architect");
        assert_eq!(value["scores"]["rapid_prototype"], 0.0);
    }

    #[test]
    fn test_json_recommendation_has_no_scores_without_explain() {
        let json =
            render_recommendation("x", &recommendation(), None, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value.get("scores").is_none());
        assert_eq!(value["guardrails"][1], "security_hardening");
    }

    #[test]
    fn test_yaml_recommendation() {
        let yaml =
            render_recommendation("x", &recommendation(), None, OutputFormat::Yaml).unwrap();
        assert!(yaml.contains("primary_model: architect"));
        assert!(yaml.contains("category: architecture_design"));
    }

    #[test]
    fn test_guardrail_text_output() {
        let warnings = vec![GuardrailWarning::new(
            Guardrail::SecurityHardening,
            WarningKind::SqlInjection,
            "Potential SQL injection vulnerability. Use parameterized queries.",
        )];
        let text = render_guardrail_warnings("auditor", &warnings, OutputFormat::Text).unwrap();
        assert_eq!(
            text,
            "Guardrail warnings for 'auditor':\n- [security_hardening] Potential SQL injection vulnerability. Use parameterized queries."
        );
        assert_eq!(
            render_guardrail_warnings("auditor", &[], OutputFormat::Text).unwrap(),
            "No guardrail warnings for 'auditor'"
        );
    }

    #[test]
    fn test_security_profile_not_found() {
        let text = render_security_profile("gpt-4o", None, OutputFormat::Text).unwrap();
        assert_eq!(text, "No security profile found for 'gpt-4o'");

        let json = render_security_profile("gpt-4o", None, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value["profile"].is_null());
    }
}
