// src/action/mod.rs

//! Glue to the CI host: log lines, secret masking and step outputs.
//!
//! - [`commands`] formats `::name::message` workflow commands.
//! - [`mask`] holds the [`SecretMasker`] shared by all log sinks.
//! - [`log`] provides the [`ActionLog`] trait and the stdout-backed
//!   [`WorkflowLog`].
//! - [`outputs`] writes step outputs via `GITHUB_OUTPUT`.

pub mod commands;
pub mod log;
pub mod mask;
pub mod outputs;

pub use log::{ActionLog, WorkflowLog};
pub use mask::SecretMasker;
pub use outputs::{GithubOutputs, OUTPUT_EXECUTION_LOG, OUTPUT_STATUS, OutputSink};

use tracing::{debug, warn};

use crate::errors::Result;
use crate::exec::InvocationResult;

/// Emit both outputs and, on failure, the failure annotation.
///
/// Every output is attempted and the failure is always annotated, even when
/// an earlier write failed; the first write error is returned afterwards.
/// The log is masked once more on the way out.
pub fn report(
    result: &InvocationResult,
    outputs: &mut dyn OutputSink,
    log: &dyn ActionLog,
) -> Result<()> {
    let execution_log = log.mask(&result.execution_log);
    let writes = [
        (OUTPUT_EXECUTION_LOG, execution_log.as_str()),
        (OUTPUT_STATUS, result.status.as_str()),
    ];

    let mut first_err = None;
    for (name, value) in writes {
        if let Err(e) = outputs.set_output(name, value) {
            warn!(output = name, error = %e, "failed to write step output");
            first_err.get_or_insert(e);
        }
    }
    debug!(status = %result.status, "outputs written");

    if let Some(message) = &result.error_message {
        log.set_failed(message);
    }

    match first_err {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
