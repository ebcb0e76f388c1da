// src/exec/result.rs

use crate::errors::CortexActionError;
use crate::types::Status;

/// Terminal output of a run: the log, the status and, on failure, the reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationResult {
    pub execution_log: String,
    pub status: Status,
    pub error_message: Option<String>,
}

impl InvocationResult {
    pub fn success(execution_log: impl Into<String>) -> Self {
        Self {
            execution_log: execution_log.into(),
            status: Status::Success,
            error_message: None,
        }
    }

    /// Failed run; `execution_log` is whatever was captured before the error.
    pub fn failed(execution_log: impl Into<String>, err: &CortexActionError) -> Self {
        Self {
            execution_log: execution_log.into(),
            status: Status::Failed,
            error_message: Some(err.to_string()),
        }
    }

    pub fn from_error(err: &CortexActionError) -> Self {
        Self::failed(String::new(), err)
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_result_keeps_partial_log_and_message() {
        let err = CortexActionError::NonZeroExit { code: 3 };
        let res = InvocationResult::failed("partial", &err);
        assert_eq!(res.status, Status::Failed);
        assert_eq!(res.execution_log, "partial");
        assert_eq!(res.error_message.as_deref(), Some("process exited with non-zero code 3"));
    }

    #[test]
    fn config_errors_carry_no_log() {
        let err = CortexActionError::ConfigError("input required and not supplied: command".into());
        let res = InvocationResult::from_error(&err);
        assert!(!res.is_success());
        assert!(res.execution_log.is_empty());
    }
}
