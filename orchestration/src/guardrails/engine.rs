//! Guardrail engine — runs a profile's declared checks over generated code.

use tracing::debug;

use super::checks;
use super::rules::CompiledRules;
use super::{Guardrail, GuardrailReport};
use crate::agent_profile::ProfileStore;

/// Applies personality-specific guardrails to generated code.
///
/// Checks always run in [`Guardrail::all`] order no matter how a profile
/// lists them, so warning order is stable.
#[derive(Debug, Clone, Copy)]
pub struct GuardrailEngine<'a> {
    store: &'a ProfileStore,
}

impl<'a> GuardrailEngine<'a> {
    pub fn new(store: &'a ProfileStore) -> Self {
        Self { store }
    }

    /// Run the guardrails declared by `model_id`'s profile.
    ///
    /// An unknown profile declares nothing, so the report is clean.
    pub fn apply_guardrails(&self, model_id: &str, code: &str) -> GuardrailReport {
        let guardrails = self.store.guardrails_for(model_id);
        debug!(
            profile = model_id,
            guardrails = guardrails.len(),
            "applying guardrails"
        );
        run_guardrails(self.store.rules(), guardrails, code)
    }

    /// Run an explicit guardrail list.
    pub fn run(&self, guardrails: &[Guardrail], code: &str) -> GuardrailReport {
        run_guardrails(self.store.rules(), guardrails, code)
    }
}

/// Run `guardrails` in dispatch order and collect their warnings.
///
/// The code is returned unchanged; no check rewrites it.
pub fn run_guardrails(
    rules: &CompiledRules,
    guardrails: &[Guardrail],
    code: &str,
) -> GuardrailReport {
    let warnings = Guardrail::all()
        .iter()
        .filter(|g| guardrails.contains(*g))
        .flat_map(|g| checks::run(*g, rules, code))
        .collect();

    GuardrailReport {
        code: code.to_string(),
        warnings,
    }
}
