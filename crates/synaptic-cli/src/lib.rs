//! Synaptic command-line front end.
//!
//! Argument parsing, profile document resolution and output rendering for
//! the `synaptic` binary. The binary itself only wires these together.

pub mod cli;
pub mod config;
pub mod output;

pub use cli::{execute, Args, Command};
pub use config::{CliConfig, PathSource};
pub use output::OutputFormat;
