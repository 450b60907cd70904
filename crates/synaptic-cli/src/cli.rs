use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use orchestration::{client_config, GuardrailEngine, ProfileStore, RecommendationEngine};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::output::{self, OutputFormat};

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(name = "synaptic", author, version, about, long_about = None)]
pub struct Args {
    /// Profile document (overrides SYNAPTIC_CONFIG)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, global = true, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Recommend a primary and fallback profile for a task
    Recommend {
        /// Task description
        #[arg(long)]
        task: String,

        /// Also print the per-category scores
        #[arg(long, default_value_t = false)]
        explain: bool,
    },

    /// Run a profile's guardrails over a code snippet
    Guardrails {
        /// Profile id whose guardrails apply
        #[arg(long)]
        model: String,

        /// File to check (reads stdin when omitted)
        #[arg(long)]
        file: Option<PathBuf>,
    },

    /// Show the known vulnerability profile of a model
    SecurityProfile {
        #[arg(long)]
        model: String,
    },

    /// Print MCP client configuration for a set of profiles
    ClientConfig {
        /// Comma-separated profile ids
        #[arg(long, value_delimiter = ',', required = true)]
        models: Vec<String>,
    },
}

/// Run `command` against `store` and return the rendered output.
///
/// `stdin` is only read by `guardrails` without `--file`.
pub fn execute(
    command: &Command,
    store: &ProfileStore,
    format: OutputFormat,
    stdin: &mut dyn Read,
) -> Result<String> {
    match command {
        Command::Recommend { task, explain } => {
            let engine = RecommendationEngine::new(store);
            let recommendation = engine.recommend(task)?;
            let scores = explain.then(|| engine.classifier().scores(task));
            output::render_recommendation(task, &recommendation, scores.as_deref(), format)
        }
        Command::Guardrails { model, file } => {
            let code = read_code(file.as_deref(), stdin)?;
            let report = GuardrailEngine::new(store).apply_guardrails(model, &code);
            debug!(
                profile = %model,
                warnings = report.warnings.len(),
                "guardrail run complete"
            );
            output::render_guardrail_warnings(model, &report.warnings, format)
        }
        Command::SecurityProfile { model } => {
            let profile = RecommendationEngine::new(store).security_profile(model);
            output::render_security_profile(model, profile, format)
        }
        Command::ClientConfig { models } => {
            let config = client_config(store, models.as_slice());
            output::render_client_config(&config, format)
        }
    }
}

fn read_code(file: Option<&Path>, stdin: &mut dyn Read) -> Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut code = String::new();
            stdin
                .read_to_string(&mut code)
                .context("Failed to read code from stdin")?;
            Ok(code)
        }
    }
}
