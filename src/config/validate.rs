// src/config/validate.rs

use crate::config::model::{INPUT_API_KEY, INPUT_COMMAND, InvocationRequest, RawInputs};
use crate::errors::{CortexActionError, Result};
use crate::types::{ApiKey, Provider};

impl TryFrom<RawInputs> for InvocationRequest {
    type Error = CortexActionError;

    fn try_from(raw: RawInputs) -> std::result::Result<Self, Self::Error> {
        let command = required(INPUT_COMMAND, raw.command)?;
        let api_key = required(INPUT_API_KEY, raw.api_key)?;

        Ok(InvocationRequest::new_unchecked(
            command,
            parse_dry_run(&raw.dry_run),
            ApiKey::new(api_key),
            Provider::from_selector(&raw.llm_provider),
        ))
    }
}

/// Only the literal `"true"` enables dry-run.
pub fn parse_dry_run(value: &str) -> bool {
    value == "true"
}

fn required(name: &str, value: String) -> Result<String> {
    if value.trim().is_empty() {
        return Err(CortexActionError::ConfigError(format!(
            "input required and not supplied: {name}"
        )));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(command: &str, dry_run: &str, api_key: &str, provider: &str) -> RawInputs {
        RawInputs {
            command: command.to_string(),
            dry_run: dry_run.to_string(),
            api_key: api_key.to_string(),
            llm_provider: provider.to_string(),
        }
    }

    #[test]
    fn valid_inputs_build_a_request() {
        let req = InvocationRequest::try_from(raw("build --target x", "true", "sk", "openai"))
            .unwrap();
        assert_eq!(req.base_command(), "build --target x");
        assert!(req.dry_run());
        assert_eq!(req.api_key().expose(), "sk");
        assert_eq!(req.provider(), Provider::OpenAi);
    }

    #[test]
    fn blank_command_is_a_config_error() {
        let err = InvocationRequest::try_from(raw("  ", "false", "sk", "")).unwrap_err();
        match err {
            CortexActionError::ConfigError(msg) => assert!(msg.contains("command")),
            other => panic!("Expected ConfigError, got: {:?}", other),
        }
    }

    #[test]
    fn missing_api_key_is_a_config_error() {
        let err = InvocationRequest::try_from(raw("status", "false", "", "")).unwrap_err();
        assert!(matches!(err, CortexActionError::ConfigError(_)));
        assert!(err.to_string().contains("api-key"));
    }

    #[test]
    fn dry_run_requires_literal_true() {
        assert!(parse_dry_run("true"));
        assert!(!parse_dry_run("TRUE"));
        assert!(!parse_dry_run("yes"));
        assert!(!parse_dry_run(""));
    }
}
