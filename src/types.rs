use std::fmt;

/// LLM vendor whose key is forwarded to `cortex`.
///
/// Selection is a closed two-way switch: only the exact selector `"openai"`
/// picks [`Provider::OpenAi`]; every other value, including an empty or
/// differently-cased one, falls through to [`Provider::Anthropic`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provider {
    OpenAi,
    Anthropic,
}

impl Provider {
    pub const ALL: [Provider; 2] = [Provider::OpenAi, Provider::Anthropic];

    /// Map an `llm_provider` input to a provider. Exact match, no case folding.
    pub fn from_selector(selector: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|p| p.selector() == selector)
            .unwrap_or_default()
    }

    /// Canonical selector value for this provider.
    pub fn selector(self) -> &'static str {
        match self {
            Provider::OpenAi => "openai",
            Provider::Anthropic => "anthropic",
        }
    }

    /// Name of the environment variable the child process reads the key from.
    pub fn env_var(self) -> &'static str {
        match self {
            Provider::OpenAi => "OPENAI_API_KEY",
            Provider::Anthropic => "ANTHROPIC_API_KEY",
        }
    }
}

impl Default for Provider {
    fn default() -> Self {
        Provider::Anthropic
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.selector())
    }
}

/// Final status reported through the `status` output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Success,
    Failed,
}

impl Status {
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Success => "success",
            Status::Failed => "failed",
        }
    }

    pub fn is_success(self) -> bool {
        self == Status::Success
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// API key forwarded to the child process.
///
/// `Debug` never prints the value.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selector_is_exact_match() {
        assert_eq!(Provider::from_selector("openai"), Provider::OpenAi);
        assert_eq!(Provider::from_selector("anthropic"), Provider::Anthropic);
        assert_eq!(Provider::from_selector(""), Provider::Anthropic);
        assert_eq!(Provider::from_selector("OpenAI"), Provider::Anthropic);
        assert_eq!(Provider::from_selector(" openai"), Provider::Anthropic);
    }

    #[test]
    fn provider_env_var_names() {
        assert_eq!(Provider::OpenAi.env_var(), "OPENAI_API_KEY");
        assert_eq!(Provider::Anthropic.env_var(), "ANTHROPIC_API_KEY");
    }

    #[test]
    fn status_output_values() {
        assert_eq!(Status::Success.to_string(), "success");
        assert_eq!(Status::Failed.as_str(), "failed");
        assert!(!Status::Failed.is_success());
    }

    #[test]
    fn provider_displays_its_selector() {
        assert_eq!(Provider::OpenAi.to_string(), "openai");
        assert_eq!(Provider::Anthropic.to_string(), "anthropic");
    }

    #[test]
    fn api_key_debug_is_redacted() {
        let key = ApiKey::new("sk-test");
        assert_eq!(format!("{key:?}"), "ApiKey(***)");
        assert_eq!(key.expose(), "sk-test");
    }
}
