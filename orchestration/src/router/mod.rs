//! Task Router Module
//!
//! Routes task descriptions to agent profiles based on:
//! - Pattern evidence per task category (see [`patterns`])
//! - Normalized scoring with a deterministic tie-break (see [`task_classifier`])
//! - Per-category recommendation records (see [`recommendation`])
//!
//! # Category Iteration Order
//!
//! ```text
//! architecture_design → rapid_prototype → code_optimization → documentation
//! → security_critical → enterprise_development → educational_content
//! → general_development (fallback only, no patterns)
//! ```
//!
//! The first category in this order wins a score tie.

pub mod patterns;
pub mod recommendation;
pub mod task_classifier;

pub use patterns::{default_patterns, PatternCatalog, PatternSet};
pub use recommendation::{
    format_confidence, reasoning_template, Recommendation, RecommendationEngine,
};
pub use task_classifier::{ClassificationResult, TaskCategory, TaskClassifier, DEFAULT_CONFIDENCE};
