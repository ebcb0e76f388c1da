// src/config/model.rs

use crate::types::{ApiKey, Provider};

/// Input names as declared by the action.
pub const INPUT_COMMAND: &str = "command";
pub const INPUT_DRY_RUN: &str = "dry-run";
pub const INPUT_API_KEY: &str = "api-key";
pub const INPUT_LLM_PROVIDER: &str = "llm_provider";

/// Inputs exactly as the host supplied them.
///
/// Missing inputs are empty strings, the same as an unset `INPUT_*` variable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawInputs {
    pub command: String,
    pub dry_run: String,
    pub api_key: String,
    pub llm_provider: String,
}

/// A single run's validated inputs. Built once, never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationRequest {
    base_command: String,
    dry_run: bool,
    api_key: ApiKey,
    provider: Provider,
}

impl InvocationRequest {
    /// Construct without validation. Prefer `InvocationRequest::try_from(raw)`.
    pub(crate) fn new_unchecked(
        base_command: String,
        dry_run: bool,
        api_key: ApiKey,
        provider: Provider,
    ) -> Self {
        Self {
            base_command,
            dry_run,
            api_key,
            provider,
        }
    }

    pub fn base_command(&self) -> &str {
        &self.base_command
    }

    pub fn dry_run(&self) -> bool {
        self.dry_run
    }

    pub fn api_key(&self) -> &ApiKey {
        &self.api_key
    }

    pub fn provider(&self) -> Provider {
        self.provider
    }
}
