//! `synaptic` — task-aware model recommendation and code guardrails.
//!
//! # Usage
//!
//! ```bash
//! synaptic recommend --task "Design a scalable microservices architecture"
//! synaptic --output json recommend --task "quick MVP for a hackathon" --explain
//! synaptic guardrails --model architect --file generated.py
//! cat generated.js | synaptic guardrails --model speed_demon
//! synaptic security-profile --model gpt-4o-mini
//! synaptic client-config --models architect,rapid_prototyper
//!
//! # Custom configuration
//! SYNAPTIC_CONFIG=./profiles.yml RUST_LOG=debug synaptic recommend --task "..."
//! ```

use anyhow::Result;
use clap::Parser;
use std::io::Write;
use synaptic_cli::config::DEFAULT_LOG_FILTER;
use synaptic_cli::{execute, Args, CliConfig};
use tracing::info;

fn main() -> Result<()> {
    let args = Args::parse();

    // stdout carries the rendered output only
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = CliConfig::resolve(args.config.clone());
    info!(
        path = %config.profile_path.display(),
        source = ?config.path_source,
        "Using profile document"
    );
    let store = config.load_store()?;

    let rendered = execute(&args.command, &store, args.output, &mut std::io::stdin())?;

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{rendered}")?;
    stdout.flush()?;
    Ok(())
}
