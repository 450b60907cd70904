//! Synaptic Orchestration Library
//!
//! This library provides:
//! - Pattern-based task classification with normalized confidence
//! - Profile recommendation from a configurable personality table
//! - Personality-aware guardrails over generated code
//!
//! # Components
//!
//! ## Router
//! - [`PatternCatalog`]: compiled regex sets per task category
//! - [`TaskClassifier`]: scores a description and picks a category
//! - [`RecommendationEngine`]: maps the category to primary/fallback profiles
//!
//! ## Guardrails
//! - [`GuardrailEngine`]: runs a profile's declared checks in dispatch order
//! - `verbosity_control`, `dead_code_removal`, `security_hardening`,
//!   `control_flow_validation`
//!
//! ## Configuration
//! - [`ProfileStore`]: immutable, validated profile document
//! - [`client_config`]: MCP client entries for selected profiles
//!
//! # Usage
//!
//! ```no_run
//! use orchestration::{GuardrailEngine, ProfileStore, RecommendationEngine};
//!
//! let store = ProfileStore::load("configs/ai-personalities.yml")?;
//! let rec = RecommendationEngine::new(&store).recommend("quick MVP for a hackathon")?;
//! let report = GuardrailEngine::new(&store).apply_guardrails(&rec.primary_model, "let x = 1;");
//! for warning in &report.warnings {
//!     println!("{warning}");
//! }
//! # Ok::<(), orchestration::ConfigError>(())
//! ```

pub mod agent_profile;
pub mod client_config;
pub mod error;
pub mod guardrails;
pub mod router;

pub use agent_profile::{
    ModelProfile, ProfileStore, RecommendationRecord, VulnerabilityProfile, BASELINE_PROFILE,
    DEFAULT_CONFIG_PATH,
};
pub use client_config::{client_config, ClientConfig, McpServerEntry, Provider};
pub use error::{ConfigError, ConfigResult};
pub use guardrails::{
    Guardrail, GuardrailEngine, GuardrailReport, GuardrailRules, GuardrailWarning, WarningKind,
};
pub use router::{
    ClassificationResult, PatternCatalog, Recommendation, RecommendationEngine, TaskCategory,
    TaskClassifier, DEFAULT_CONFIDENCE,
};
