use cortex_action::config::model::{
    INPUT_API_KEY, INPUT_COMMAND, INPUT_DRY_RUN, INPUT_LLM_PROVIDER,
};
use cortex_action::config::{InvocationRequest, MapInputs, RawInputs};

/// Builder for step inputs as the runner would provide them.
#[derive(Debug, Clone, Default)]
pub struct InputsBuilder {
    inputs: MapInputs,
}

impl InputsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn command(mut self, value: &str) -> Self {
        self.inputs.insert(INPUT_COMMAND, value);
        self
    }

    pub fn dry_run(mut self, value: &str) -> Self {
        self.inputs.insert(INPUT_DRY_RUN, value);
        self
    }

    pub fn api_key(mut self, value: &str) -> Self {
        self.inputs.insert(INPUT_API_KEY, value);
        self
    }

    pub fn llm_provider(mut self, value: &str) -> Self {
        self.inputs.insert(INPUT_LLM_PROVIDER, value);
        self
    }

    pub fn build(self) -> MapInputs {
        self.inputs
    }
}

/// Builder for a validated `InvocationRequest`.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    raw: RawInputs,
}

impl RequestBuilder {
    pub fn new(command: &str) -> Self {
        Self {
            raw: RawInputs {
                command: command.to_string(),
                dry_run: "false".to_string(),
                api_key: "sk-test".to_string(),
                llm_provider: String::new(),
            },
        }
    }

    pub fn dry_run(mut self, val: bool) -> Self {
        self.raw.dry_run = val.to_string();
        self
    }

    pub fn api_key(mut self, key: &str) -> Self {
        self.raw.api_key = key.to_string();
        self
    }

    pub fn llm_provider(mut self, provider: &str) -> Self {
        self.raw.llm_provider = provider.to_string();
        self
    }

    pub fn build(self) -> InvocationRequest {
        InvocationRequest::try_from(self.raw).expect("Failed to build valid request from builder")
    }
}
