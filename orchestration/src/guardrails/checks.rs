//! The guardrail checks.
//!
//! Every check is a total function over arbitrary text: malformed or
//! adversarial input produces "no warning", never an error. None of them
//! depends on another check's output.

use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use super::rules::CompiledRules;
use super::{Guardrail, GuardrailWarning, WarningKind};

/// Whole-word tokens, used to count identifier references.
static WORD_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\w+").expect("WORD_TOKEN regex should compile"));

/// Run one guardrail against `code`.
pub fn run(guardrail: Guardrail, rules: &CompiledRules, code: &str) -> Vec<GuardrailWarning> {
    match guardrail {
        Guardrail::VerbosityControl => verbosity_control(rules, code),
        Guardrail::DeadCodeRemoval => dead_code_removal(rules, code),
        Guardrail::SecurityHardening => security_hardening(rules, code),
        Guardrail::ControlFlowValidation => control_flow_validation(rules, code),
    }
}

/// Flag long snippets and snippets with too few definitions for their size.
pub fn verbosity_control(rules: &CompiledRules, code: &str) -> Vec<GuardrailWarning> {
    let mut warnings = Vec::new();
    let lines = code.split('\n').count();

    if lines > rules.max_lines {
        warnings.push(GuardrailWarning::new(
            Guardrail::VerbosityControl,
            WarningKind::VerboseCode,
            format!(
                "Code is verbose ({} lines). Consider breaking into smaller functions.",
                lines
            ),
        ));
    }

    if rules.lines_per_definition > 0 {
        let definitions: usize = rules
            .definitions
            .iter()
            .map(|re| re.find_iter(code).count())
            .sum();
        let expected = lines as f64 / rules.lines_per_definition as f64;
        if (definitions as f64) < expected {
            warnings.push(GuardrailWarning::new(
                Guardrail::VerbosityControl,
                WarningKind::LargeBlocks,
                "Consider breaking large code blocks into smaller functions.",
            ));
        }
    }

    warnings
}

/// Flag declared variables whose name never appears again.
pub fn dead_code_removal(rules: &CompiledRules, code: &str) -> Vec<GuardrailWarning> {
    let mut occurrences: HashMap<&str, usize> = HashMap::new();
    for token in WORD_TOKEN.find_iter(code) {
        *occurrences.entry(token.as_str()).or_default() += 1;
    }

    let mut seen = HashSet::new();
    let mut warnings = Vec::new();
    for caps in rules.declaration.captures_iter(code) {
        let Some(name) = caps.get(1).map(|m| m.as_str()) else {
            continue;
        };
        if !seen.insert(name) {
            continue;
        }
        if occurrences.get(name).copied().unwrap_or(0) == 1 {
            warnings.push(GuardrailWarning::new(
                Guardrail::DeadCodeRemoval,
                WarningKind::UnusedVariable,
                format!("Potential unused variable: {}", name),
            ));
        }
    }
    warnings
}

/// Flag hardcoded credentials (once per credential name) and SQL built by
/// string concatenation.
pub fn security_hardening(rules: &CompiledRules, code: &str) -> Vec<GuardrailWarning> {
    let mut warnings: Vec<GuardrailWarning> = rules
        .credentials
        .iter()
        .filter(|c| c.regex.is_match(code))
        .map(|c| {
            GuardrailWarning::new(
                Guardrail::SecurityHardening,
                WarningKind::HardcodedCredential,
                format!(
                    "Potential hardcoded credential ({}) detected. Use environment variables.",
                    c.name
                ),
            )
        })
        .collect();

    if rules.sql_concatenation.iter().any(|re| re.is_match(code)) {
        warnings.push(GuardrailWarning::new(
            Guardrail::SecurityHardening,
            WarningKind::SqlInjection,
            "Potential SQL injection vulnerability. Use parameterized queries.",
        ));
    }

    warnings
}

/// Flag deeply nested conditionals and unbalanced try/catch markers.
pub fn control_flow_validation(rules: &CompiledRules, code: &str) -> Vec<GuardrailWarning> {
    let mut warnings = Vec::new();

    let nested = rules.nested_conditional.find_iter(code).count();
    if nested > rules.max_nested_conditionals {
        warnings.push(GuardrailWarning::new(
            Guardrail::ControlFlowValidation,
            WarningKind::NestedConditions,
            format!(
                "Complex nested conditions detected ({} nested conditionals). Consider simplifying logic.",
                nested
            ),
        ));
    }

    let tally = HandlerTally::scan(rules, code);
    if tally.unhandled > 0 || tally.stray > 0 {
        warnings.push(GuardrailWarning::new(
            Guardrail::ControlFlowValidation,
            WarningKind::UnmatchedTryCatch,
            format!(
                "Unmatched try/catch blocks ({} try, {} catch). Ensure proper error handling.",
                tally.tries,
                tally.handled + tally.stray
            ),
        ));
    }

    warnings
}

/// Try markers paired with the handler markers that follow them.
///
/// A handler closes the innermost open try. Further handlers after a try
/// has been closed are extra clauses of that statement (`except A` then
/// `except B`) and are not counted again.
#[derive(Debug, Default, PartialEq)]
struct HandlerTally {
    tries: usize,
    handled: usize,
    /// Tries still open at the end of the snippet.
    unhandled: usize,
    /// Handlers that appear before any try.
    stray: usize,
}

impl HandlerTally {
    fn scan(rules: &CompiledRules, code: &str) -> Self {
        let mut markers: Vec<(usize, bool)> = rules
            .try_marker
            .find_iter(code)
            .map(|m| (m.start(), true))
            .chain(rules.catch_marker.find_iter(code).map(|m| (m.start(), false)))
            .collect();
        markers.sort_unstable();

        let mut tally = Self::default();
        for (_, is_try) in markers {
            if is_try {
                tally.tries += 1;
                tally.unhandled += 1;
            } else if tally.unhandled > 0 {
                tally.unhandled -= 1;
                tally.handled += 1;
            } else if tally.tries == 0 {
                tally.stray += 1;
            }
        }
        tally
    }
}
