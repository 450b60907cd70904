//! MCP client configuration for recommended profiles.
//!
//! Renders the `mcpServers` block a desktop MCP client needs to reach the
//! providers behind a set of profiles. API keys are left as `${VAR}`
//! placeholders for the client to expand.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

use crate::agent_profile::ProfileStore;

/// Model providers with a known MCP server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provider {
    Anthropic,
    OpenAi,
}

impl Provider {
    /// Provider serving `model_name`, matched on the model family.
    pub fn for_model(model_name: &str) -> Option<Self> {
        if model_name.contains("claude") {
            Some(Self::Anthropic)
        } else if model_name.contains("gpt") {
            Some(Self::OpenAi)
        } else {
            None
        }
    }

    /// Key under `mcpServers`.
    pub fn server_name(&self) -> &'static str {
        match self {
            Self::Anthropic => "claude",
            Self::OpenAi => "openai",
        }
    }

    fn package(&self) -> &'static str {
        match self {
            Self::Anthropic => "@anthropic-ai/mcp-server-claude",
            Self::OpenAi => "@openai/mcp-server",
        }
    }

    fn api_key_var(&self) -> &'static str {
        match self {
            Self::Anthropic => "ANTHROPIC_API_KEY",
            Self::OpenAi => "OPENAI_API_KEY",
        }
    }

    /// Server entry launching this provider's MCP server through `npx`.
    pub fn server_entry(&self) -> McpServerEntry {
        let key = self.api_key_var();
        McpServerEntry {
            command: "npx".to_string(),
            args: vec!["-y".to_string(), self.package().to_string()],
            env: BTreeMap::from([(key.to_string(), format!("${{{}}}", key))]),
        }
    }
}

/// One MCP server launch entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct McpServerEntry {
    pub command: String,
    pub args: Vec<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub env: BTreeMap<String, String>,
}

/// Client configuration document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(rename = "mcpServers")]
    pub mcp_servers: BTreeMap<String, McpServerEntry>,
}

/// Build the client configuration for the given profile ids.
///
/// Unknown ids are treated as model names. Profiles sharing a provider
/// collapse into a single server entry.
pub fn client_config<S: AsRef<str>>(store: &ProfileStore, profile_ids: &[S]) -> ClientConfig {
    let mut config = ClientConfig::default();
    for id in profile_ids {
        let id = id.as_ref();
        let model_name = store.profile(id).map_or(id, |p| p.model.as_str());
        match Provider::for_model(model_name) {
            Some(provider) => {
                config
                    .mcp_servers
                    .entry(provider.server_name().to_string())
                    .or_insert_with(|| provider.server_entry());
            }
            None => debug!(profile = id, model = model_name, "No MCP server for model"),
        }
    }
    config
}
