//! Redaction of registered secret values.

/// Replacement written in place of a secret.
pub const MASK: &str = "***";

/// Replaces registered secrets in arbitrary text.
///
/// Empty values are ignored. Longer secrets are replaced first so a secret
/// that contains another one never leaves a fragment behind.
#[derive(Debug, Clone, Default)]
pub struct SecretMasker {
    secrets: Vec<String>,
}

impl SecretMasker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a value to be masked. Returns `false` if it was ignored.
    pub fn add_secret(&mut self, value: impl Into<String>) -> bool {
        let value = value.into();
        if value.is_empty() || self.secrets.contains(&value) {
            return false;
        }
        let pos = self
            .secrets
            .iter()
            .position(|s| s.len() < value.len())
            .unwrap_or(self.secrets.len());
        self.secrets.insert(pos, value);
        true
    }

    pub fn mask(&self, input: &str) -> String {
        let mut out = input.to_string();
        for secret in &self.secrets {
            if out.contains(secret.as_str()) {
                out = out.replace(secret.as_str(), MASK);
            }
        }
        out
    }

    pub fn secret_count(&self) -> usize {
        self.secrets.len()
    }
}
