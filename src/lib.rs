// src/lib.rs

pub mod action;
pub mod cli;
pub mod config;
pub mod errors;
pub mod exec;
pub mod install;
pub mod logging;
pub mod types;

use tracing::{error, info};

use crate::action::{ActionLog, GithubOutputs, WorkflowLog, report};
use crate::cli::CliArgs;
use crate::config::{EnvInputs, InputSource, InvocationRequest, LayeredInputs, load_inputs};
use crate::errors::{CortexActionError, Result};
use crate::exec::command::{CORTEX_PROGRAM, env_get};
use crate::exec::{CommandRunner, InvocationResult};
use crate::install::{InstallPlan, ensure_installed, locate_on_path};

/// How the step gets hold of `cortex`.
#[derive(Debug, Clone, Default)]
pub struct StepOptions {
    /// Require `cortex` on PATH instead of installing it.
    pub skip_install: bool,
    pub install_plan: InstallPlan,
}

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - inputs (flags layered over `INPUT_*` variables)
/// - installation check
/// - the command runner
/// - outputs and failure reporting
pub async fn run(args: CliArgs) -> Result<InvocationResult> {
    let log = WorkflowLog::stdout();
    let mut outputs = GithubOutputs::from_env();

    let overrides = args.input_overrides();
    let inputs = LayeredInputs::new(&overrides, &EnvInputs);
    let options = StepOptions {
        skip_install: args.skip_install,
        ..StepOptions::default()
    };

    let runner = CommandRunner::from_process_env();
    let result = run_step(&inputs, &runner, &options, &log).await;
    report(&result, &mut outputs, &log)?;
    Ok(result)
}

/// Run the whole step and turn every error into a failed result.
///
/// This is the one place errors are caught.
pub async fn run_step(
    inputs: &dyn InputSource,
    runner: &CommandRunner,
    options: &StepOptions,
    log: &dyn ActionLog,
) -> InvocationResult {
    match try_run_step(inputs, runner, options, log).await {
        Ok(result) => {
            info!(status = %result.status, "step finished");
            result
        }
        Err(err) => {
            error!(error = %log.mask(&err.to_string()), "step failed");
            InvocationResult::from_error(&err)
        }
    }
}

async fn try_run_step(
    inputs: &dyn InputSource,
    runner: &CommandRunner,
    options: &StepOptions,
    log: &dyn ActionLog,
) -> Result<InvocationResult> {
    let raw = load_inputs(inputs);
    // Mask before anything can echo it, even if validation fails below.
    log.register_secret(&raw.api_key);
    let request = InvocationRequest::try_from(raw)?;

    let env = runner.base_env();
    if options.skip_install {
        if locate_on_path(CORTEX_PROGRAM, env_get(&env, "PATH")).is_none() {
            return Err(CortexActionError::InstallError(format!(
                "`{CORTEX_PROGRAM}` not found on PATH and installation was skipped"
            )));
        }
    } else {
        ensure_installed(&options.install_plan, &env, log).await?;
    }

    Ok(runner.run(&request, log).await)
}
