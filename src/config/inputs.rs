// src/config/inputs.rs

//! Reading step inputs.
//!
//! The runner exposes each `with:` input as an environment variable named
//! `INPUT_<NAME>`, upper-cased, spaces replaced by `_` (dashes are kept, so
//! `dry-run` becomes `INPUT_DRY-RUN`). Shells cannot export such names, so
//! the dash-free spelling `INPUT_DRY_RUN` is accepted as a fallback. Values
//! are trimmed.

use std::collections::BTreeMap;

use crate::config::model::{
    INPUT_API_KEY, INPUT_COMMAND, INPUT_DRY_RUN, INPUT_LLM_PROVIDER, RawInputs,
};

/// Somewhere step inputs can be looked up by their declared name.
pub trait InputSource {
    fn get(&self, name: &str) -> Option<String>;
}

/// Environment variable carrying the input `name`.
pub fn input_env_name(name: &str) -> String {
    format!("INPUT_{}", name.replace(' ', "_").to_uppercase())
}

/// Inputs from the current process environment.
#[derive(Debug, Default, Clone, Copy)]
pub struct EnvInputs;

impl InputSource for EnvInputs {
    fn get(&self, name: &str) -> Option<String> {
        let primary = input_env_name(name);
        std::env::var(&primary)
            .ok()
            .or_else(|| std::env::var(primary.replace('-', "_")).ok())
    }
}

/// Fixed set of inputs keyed by declared name.
#[derive(Debug, Default, Clone)]
pub struct MapInputs {
    values: BTreeMap<String, String>,
}

impl MapInputs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, value: impl Into<String>) -> Self {
        self.values.insert(name.to_string(), value.into());
        self
    }

    pub fn insert(&mut self, name: &str, value: impl Into<String>) {
        self.values.insert(name.to_string(), value.into());
    }
}

impl InputSource for MapInputs {
    fn get(&self, name: &str) -> Option<String> {
        self.values.get(name).cloned()
    }
}

/// Looks in `overrides` first, then falls back to `base`.
pub struct LayeredInputs<'a> {
    overrides: &'a dyn InputSource,
    base: &'a dyn InputSource,
}

impl<'a> LayeredInputs<'a> {
    pub fn new(overrides: &'a dyn InputSource, base: &'a dyn InputSource) -> Self {
        Self { overrides, base }
    }
}

impl InputSource for LayeredInputs<'_> {
    fn get(&self, name: &str) -> Option<String> {
        self.overrides.get(name).or_else(|| self.base.get(name))
    }
}

/// Read all declared inputs. Missing ones become empty strings.
pub fn load_inputs(source: &dyn InputSource) -> RawInputs {
    let read = |name: &str| {
        source
            .get(name)
            .map(|v| v.trim().to_string())
            .unwrap_or_default()
    };

    RawInputs {
        command: read(INPUT_COMMAND),
        dry_run: read(INPUT_DRY_RUN),
        api_key: read(INPUT_API_KEY),
        llm_provider: read(INPUT_LLM_PROVIDER),
    }
}
