// src/install/mod.rs

//! Making sure `cortex` is runnable before anything is forwarded to it.
//!
//! If the program is already on `PATH` nothing happens. Otherwise the steps
//! of an [`InstallPlan`] run in order through the shell; the first failing
//! step aborts with [`CortexActionError::InstallError`].

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::action::ActionLog;
use crate::errors::{CortexActionError, Result};
use crate::exec::capture::Captured;
use crate::exec::command::{ChildEnv, env_get};
use crate::exec::runner::execute;

/// Where the default plan checks out and installs Cortex.
pub const DEFAULT_CHECKOUT_DIR: &str = "/tmp/cortex";
pub const DEFAULT_REPOSITORY: &str = "https://github.com/cortexlinux/cortex.git";
pub const DEFAULT_BIN_DIR: &str = "/usr/local/bin";

/// Ordered shell steps that put `program` on `PATH`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallPlan {
    pub program: String,
    pub steps: Vec<InstallStep>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallStep {
    /// Shown in the pipeline log before the step runs.
    pub description: String,
    pub command: String,
}

impl InstallStep {
    pub fn new(description: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            command: command.into(),
        }
    }
}

impl InstallPlan {
    pub fn new(program: impl Into<String>, steps: Vec<InstallStep>) -> Self {
        Self {
            program: program.into(),
            steps,
        }
    }

    /// Clone the repository, install it into a venv and expose a wrapper
    /// script in `/usr/local/bin`.
    pub fn cortex_from_source() -> Self {
        let dir = DEFAULT_CHECKOUT_DIR;
        let bin = DEFAULT_BIN_DIR;
        let wrapper = format!(
            "sudo tee {bin}/cortex > /dev/null << 'EOF'\n\
             #!/bin/bash\n\
             source {dir}/venv/bin/activate\n\
             cd {dir}\n\
             python -m cortex.cli \"$@\"\n\
             EOF"
        );

        Self::new(
            "cortex",
            vec![
                InstallStep::new(
                    "Cloning Cortex repository...",
                    format!("git clone {DEFAULT_REPOSITORY} {dir}"),
                ),
                InstallStep::new(
                    "Creating virtual environment...",
                    format!("python3 -m venv {dir}/venv"),
                ),
                InstallStep::new(
                    "Installing Cortex...",
                    format!(
                        "bash -c 'source {dir}/venv/bin/activate && cd {dir} && pip install -e .'"
                    ),
                ),
                InstallStep::new("Creating bin directory...", format!("sudo mkdir -p {bin}")),
                InstallStep::new("Writing cortex wrapper script...", wrapper),
                InstallStep::new(
                    "Making wrapper executable...",
                    format!("sudo chmod +x {bin}/cortex"),
                ),
            ],
        )
    }
}

impl Default for InstallPlan {
    fn default() -> Self {
        Self::cortex_from_source()
    }
}

/// First executable file named `program` among the entries of `path_var`.
pub fn locate_on_path(program: &str, path_var: Option<&OsStr>) -> Option<PathBuf> {
    let path_var = path_var?;
    std::env::split_paths(path_var)
        .filter(|dir| !dir.as_os_str().is_empty())
        .map(|dir| dir.join(program))
        .find(|candidate| is_executable(candidate))
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

/// Ensure `plan.program` can be found on the `PATH` of `env`.
///
/// Returns where it was found.
pub async fn ensure_installed(
    plan: &InstallPlan,
    env: &ChildEnv,
    log: &dyn ActionLog,
) -> Result<PathBuf> {
    log.info("Setting up Cortex...");

    if let Some(found) = locate_on_path(&plan.program, env_get(env, "PATH")) {
        debug!(path = %found.display(), "found existing installation");
        log.info("Cortex is already installed.");
        return Ok(found);
    }

    log.info("Cortex not found, proceeding with installation...");
    for step in &plan.steps {
        log.info(&step.description);
        let mut captured = Captured::default();
        execute(&step.command, env, &mut captured, log)
            .await
            .map_err(|e| {
                CortexActionError::InstallError(format!("{}: {e}", step.description))
            })?;
    }

    let found = locate_on_path(&plan.program, env_get(env, "PATH")).ok_or_else(|| {
        CortexActionError::InstallError(format!(
            "`{}` is still not on PATH after installation",
            plan.program
        ))
    })?;

    info!(path = %found.display(), "installation finished");
    log.info("Cortex installation completed.");
    Ok(found)
}
