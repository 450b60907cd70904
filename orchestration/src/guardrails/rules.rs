//! Guardrail rule tuning — thresholds and pattern lists behind each check.
//!
//! [`GuardrailRules`] is the serde form that lives in the profile document
//! under `guardrail_rules`; every field is optional and defaults to the
//! stock heuristics. [`GuardrailRules::compile`] validates every pattern up
//! front so a bad regex fails the load instead of the first check run.
//!
//! ```yaml
//! guardrail_rules:
//!   max_lines: 120
//!   credential_names: [password, api_key, secret, token]
//! ```

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

/// Tunable heuristics for the guardrail checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuardrailRules {
    /// Line count above which code is flagged as verbose.
    pub max_lines: usize,
    /// Expected lines per definition; fewer definitions than
    /// `lines / lines_per_definition` is flagged. Zero disables the check.
    pub lines_per_definition: usize,
    /// Patterns that introduce a function or definition.
    pub definition_patterns: Vec<String>,
    /// Variable declaration pattern. Capture group 1 must be the identifier.
    pub declaration_pattern: String,
    /// Credential names checked for assignment from a string literal.
    pub credential_names: Vec<String>,
    /// Patterns for SQL assembled by string concatenation.
    pub sql_concatenation_patterns: Vec<String>,
    /// Pattern for one conditional nested inside another on the same line.
    pub nested_conditional_pattern: String,
    /// Nested conditional count above which a warning is raised.
    pub max_nested_conditionals: usize,
    /// Exception-try marker.
    pub try_pattern: String,
    /// Exception-catch marker.
    pub catch_pattern: String,
}

impl Default for GuardrailRules {
    fn default() -> Self {
        Self {
            max_lines: 100,
            lines_per_definition: 50,
            definition_patterns: vec![
                r"\b(function|def|fn)\b".to_string(),
                r"\bconst\s+\w+\s*=".to_string(),
            ],
            declaration_pattern: r"\b(?:let|const|var)\s+(?:mut\s+)?([A-Za-z_]\w*)\s*=".to_string(),
            credential_names: vec![
                "password".to_string(),
                "api_key".to_string(),
                "secret".to_string(),
            ],
            sql_concatenation_patterns: vec![r"SELECT.*\+.*FROM".to_string()],
            nested_conditional_pattern: r"\bif\s*\(.*\bif\s*\(".to_string(),
            max_nested_conditionals: 3,
            try_pattern: r"\btry\b".to_string(),
            catch_pattern: r"\b(catch|except)\b".to_string(),
        }
    }
}

impl GuardrailRules {
    /// Compile every pattern, failing on the first invalid one.
    pub fn compile(&self) -> ConfigResult<CompiledRules> {
        let definitions = self
            .definition_patterns
            .iter()
            .map(|p| build("definition_patterns", p, false))
            .collect::<ConfigResult<Vec<_>>>()?;

        let declaration = build("declaration_pattern", &self.declaration_pattern, false)?;
        if declaration.captures_len() < 2 {
            return Err(ConfigError::PatternCompile {
                owner: "declaration_pattern".to_string(),
                pattern: self.declaration_pattern.clone(),
                message: "pattern must capture the declared identifier".to_string(),
            });
        }

        let credentials = self
            .credential_names
            .iter()
            .map(|name| {
                let pattern = format!(r#"{}\s*=\s*["'][^"']+["']"#, regex::escape(name));
                build("credential_names", &pattern, true).map(|regex| CredentialPattern {
                    name: name.clone(),
                    regex,
                })
            })
            .collect::<ConfigResult<Vec<_>>>()?;

        let sql_concatenation = self
            .sql_concatenation_patterns
            .iter()
            .map(|p| build("sql_concatenation_patterns", p, true))
            .collect::<ConfigResult<Vec<_>>>()?;

        Ok(CompiledRules {
            max_lines: self.max_lines,
            lines_per_definition: self.lines_per_definition,
            definitions,
            declaration,
            credentials,
            sql_concatenation,
            nested_conditional: build(
                "nested_conditional_pattern",
                &self.nested_conditional_pattern,
                false,
            )?,
            max_nested_conditionals: self.max_nested_conditionals,
            try_marker: build("try_pattern", &self.try_pattern, false)?,
            catch_marker: build("catch_pattern", &self.catch_pattern, false)?,
        })
    }
}

fn build(owner: &str, pattern: &str, case_insensitive: bool) -> ConfigResult<Regex> {
    RegexBuilder::new(pattern)
        .case_insensitive(case_insensitive)
        .build()
        .map_err(|e| ConfigError::pattern(owner, pattern, e))
}

/// Credential assignment check for one credential name.
#[derive(Debug, Clone)]
pub struct CredentialPattern {
    pub name: String,
    pub regex: Regex,
}

/// Validated, compiled form of [`GuardrailRules`].
#[derive(Debug, Clone)]
pub struct CompiledRules {
    pub(crate) max_lines: usize,
    pub(crate) lines_per_definition: usize,
    pub(crate) definitions: Vec<Regex>,
    pub(crate) declaration: Regex,
    pub(crate) credentials: Vec<CredentialPattern>,
    pub(crate) sql_concatenation: Vec<Regex>,
    pub(crate) nested_conditional: Regex,
    pub(crate) max_nested_conditionals: usize,
    pub(crate) try_marker: Regex,
    pub(crate) catch_marker: Regex,
}

impl CompiledRules {
    pub fn max_lines(&self) -> usize {
        self.max_lines
    }

    pub fn max_nested_conditionals(&self) -> usize {
        self.max_nested_conditionals
    }

    pub fn credentials(&self) -> &[CredentialPattern] {
        &self.credentials
    }
}
