use anyhow::{Context, Result};
use orchestration::{ProfileStore, DEFAULT_CONFIG_PATH};
use std::path::PathBuf;

/// Environment variable naming the profile document.
pub const CONFIG_ENV_VAR: &str = "SYNAPTIC_CONFIG";

/// Log filter used when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Where the profile document path came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathSource {
    /// `--config` flag
    Flag,
    /// `SYNAPTIC_CONFIG`
    Env,
    /// Built-in default location
    Default,
}

/// Resolved CLI configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    pub profile_path: PathBuf,
    pub path_source: PathSource,
}

impl CliConfig {
    /// Resolve against the process environment: flag, then
    /// `SYNAPTIC_CONFIG`, then the default path.
    pub fn resolve(flag: Option<PathBuf>) -> Self {
        Self::resolve_with(flag, std::env::var(CONFIG_ENV_VAR).ok())
    }

    /// Resolve with an explicit environment value. Blank values count as unset.
    pub fn resolve_with(flag: Option<PathBuf>, env_value: Option<String>) -> Self {
        if let Some(path) = flag {
            return Self {
                profile_path: path,
                path_source: PathSource::Flag,
            };
        }
        match env_value.filter(|v| !v.trim().is_empty()) {
            Some(value) => Self {
                profile_path: PathBuf::from(value),
                path_source: PathSource::Env,
            },
            None => Self {
                profile_path: PathBuf::from(DEFAULT_CONFIG_PATH),
                path_source: PathSource::Default,
            },
        }
    }

    /// Load the profile store, falling back to built-in profiles when the
    /// document is absent.
    pub fn load_store(&self) -> Result<ProfileStore> {
        ProfileStore::load(&self.profile_path).with_context(|| {
            format!(
                "Failed to load profile document {}",
                self.profile_path.display()
            )
        })
    }
}
