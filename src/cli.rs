// src/cli.rs

//! CLI argument parsing using `clap`.
//!
//! Every step input can be passed as a flag for local runs; flags win over
//! the `INPUT_*` variables the runner sets.

use clap::{Parser, ValueEnum};

use crate::config::model::{INPUT_API_KEY, INPUT_COMMAND, INPUT_DRY_RUN, INPUT_LLM_PROVIDER};
use crate::config::MapInputs;

/// Command-line arguments for `cortex-action`.
#[derive(Debug, Clone, Default, Parser)]
#[command(
    name = "cortex-action",
    version,
    about = "Install Cortex if needed and forward a command to it.",
    long_about = None
)]
pub struct CliArgs {
    /// Command and arguments passed to `cortex` (e.g. "build --target x").
    #[arg(long, value_name = "COMMAND")]
    pub command: Option<String>,

    /// "true" to only print what would be executed.
    #[arg(long, value_name = "BOOL")]
    pub dry_run: Option<String>,

    /// API key forwarded to cortex. Prefer the `INPUT_API-KEY` (or `INPUT_API_KEY`) variable.
    #[arg(long, value_name = "KEY")]
    pub api_key: Option<String>,

    /// "openai" selects OPENAI_API_KEY, anything else ANTHROPIC_API_KEY.
    #[arg(long, value_name = "PROVIDER")]
    pub llm_provider: Option<String>,

    /// Fail instead of installing when cortex is missing from PATH.
    #[arg(long, env = "CORTEX_ACTION_SKIP_INSTALL")]
    pub skip_install: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `CORTEX_ACTION_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

impl CliArgs {
    /// Inputs given as flags, keyed by their declared input name.
    pub fn input_overrides(&self) -> MapInputs {
        let mut inputs = MapInputs::new();
        let pairs = [
            (INPUT_COMMAND, &self.command),
            (INPUT_DRY_RUN, &self.dry_run),
            (INPUT_API_KEY, &self.api_key),
            (INPUT_LLM_PROVIDER, &self.llm_provider),
        ];
        for (name, value) in pairs {
            if let Some(v) = value {
                inputs.insert(name, v.clone());
            }
        }
        inputs
    }
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
