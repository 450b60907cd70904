//! Personality-aware guardrails for generated code.
//!
//! Each guardrail is an independent text-pattern check over a code string.
//! Checks only report; they never rewrite the code they inspect.
//!
//! # Modules
//!
//! - [`rules`] — tunable thresholds and patterns, compiled at load time
//! - [`checks`] — the four checks
//! - [`engine`] — runs a profile's guardrails in dispatch order

pub mod checks;
pub mod engine;
pub mod rules;

pub use engine::GuardrailEngine;
pub use rules::{CompiledRules, CredentialPattern, GuardrailRules};

use serde::{Deserialize, Serialize};

/// A named check that a model profile can opt into.
///
/// Declaration order is the dispatch order used by [`GuardrailEngine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Guardrail {
    /// Flags long code and too few function definitions
    VerbosityControl,
    /// Flags variables that are declared but never referenced
    DeadCodeRemoval,
    /// Flags hardcoded credentials and SQL string concatenation
    SecurityHardening,
    /// Flags deep conditional nesting and unbalanced try/catch
    ControlFlowValidation,
}

impl Guardrail {
    /// All guardrails in dispatch order.
    pub fn all() -> &'static [Guardrail] {
        &[
            Self::VerbosityControl,
            Self::DeadCodeRemoval,
            Self::SecurityHardening,
            Self::ControlFlowValidation,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::VerbosityControl => "verbosity_control",
            Self::DeadCodeRemoval => "dead_code_removal",
            Self::SecurityHardening => "security_hardening",
            Self::ControlFlowValidation => "control_flow_validation",
        }
    }
}

impl std::fmt::Display for Guardrail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Guardrail {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|g| g.as_str() == s)
            .ok_or_else(|| format!("unknown guardrail: {s}"))
    }
}

/// What a warning is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    /// Snippet exceeds the line limit
    VerboseCode,
    /// Too few definitions for the snippet length
    LargeBlocks,
    /// Declared variable never referenced again
    UnusedVariable,
    /// Credential assigned from a string literal
    HardcodedCredential,
    /// SQL assembled by string concatenation
    SqlInjection,
    /// Too many nested conditionals
    NestedConditions,
    /// try and catch counts differ
    UnmatchedTryCatch,
}

impl std::fmt::Display for WarningKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::VerboseCode => write!(f, "verbose_code"),
            Self::LargeBlocks => write!(f, "large_blocks"),
            Self::UnusedVariable => write!(f, "unused_variable"),
            Self::HardcodedCredential => write!(f, "hardcoded_credential"),
            Self::SqlInjection => write!(f, "sql_injection"),
            Self::NestedConditions => write!(f, "nested_conditions"),
            Self::UnmatchedTryCatch => write!(f, "unmatched_try_catch"),
        }
    }
}

/// One detected issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuardrailWarning {
    /// Check that raised the warning
    pub guardrail: Guardrail,
    pub kind: WarningKind,
    /// Human-readable message, including the suggested remedy
    pub message: String,
}

impl GuardrailWarning {
    pub fn new(guardrail: Guardrail, kind: WarningKind, message: impl Into<String>) -> Self {
        Self {
            guardrail,
            kind,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for GuardrailWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// Output of a guardrail run: the inspected code, unchanged, and every
/// warning in dispatch order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuardrailReport {
    pub code: String,
    pub warnings: Vec<GuardrailWarning>,
}

impl GuardrailReport {
    /// Whether no check raised anything.
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Warning messages in order.
    pub fn messages(&self) -> Vec<&str> {
        self.warnings.iter().map(|w| w.message.as_str()).collect()
    }

    /// Warnings of one kind.
    pub fn of_kind(&self, kind: WarningKind) -> Vec<&GuardrailWarning> {
        self.warnings.iter().filter(|w| w.kind == kind).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guardrail_names_parse() {
        for guardrail in Guardrail::all() {
            let parsed: Guardrail = guardrail.to_string().parse().unwrap();
            assert_eq!(parsed, *guardrail);
        }
        assert!("exception_handling".parse::<Guardrail>().is_err());
    }

    #[test]
    fn test_dispatch_order_matches_declaration() {
        let mut sorted = Guardrail::all().to_vec();
        sorted.sort();
        assert_eq!(sorted, Guardrail::all());
        assert_eq!(Guardrail::all()[0], Guardrail::VerbosityControl);
        assert_eq!(Guardrail::all()[3], Guardrail::ControlFlowValidation);
    }

    #[test]
    fn test_warning_displays_message() {
        let warning = GuardrailWarning::new(
            Guardrail::DeadCodeRemoval,
            WarningKind::UnusedVariable,
            "Potential unused variable: tmp",
        );
        assert_eq!(warning.to_string(), "Potential unused variable: tmp");
    }

    #[test]
    fn test_warning_serialization() {
        let warning = GuardrailWarning::new(
            Guardrail::SecurityHardening,
            WarningKind::SqlInjection,
            "Potential SQL injection vulnerability. Use parameterized queries.",
        );
        let json = serde_json::to_value(&warning).unwrap();
        assert_eq!(json["guardrail"], "security_hardening");
        assert_eq!(json["kind"], "sql_injection");
    }

    #[test]
    fn test_report_helpers() {
        let report = GuardrailReport {
            code: "let x = 1;".to_string(),
            warnings: vec![GuardrailWarning::new(
                Guardrail::DeadCodeRemoval,
                WarningKind::UnusedVariable,
                "Potential unused variable: x",
            )],
        };
        assert!(!report.is_clean());
        assert_eq!(report.messages(), vec!["Potential unused variable: x"]);
        assert_eq!(report.of_kind(WarningKind::UnusedVariable).len(), 1);
        assert!(report.of_kind(WarningKind::SqlInjection).is_empty());
    }
}
