// src/exec/command.rs

use std::collections::BTreeMap;
use std::ffi::{OsStr, OsString};
use std::process::Stdio;

use tokio::process::Command;

use crate::types::{ApiKey, Provider};

/// Executable every invocation is forwarded to.
pub const CORTEX_PROGRAM: &str = "cortex";

/// Flag appended in dry-run mode.
pub const DRY_RUN_FLAG: &str = "--dry-run";

/// Environment handed to a child process, built explicitly per invocation.
pub type ChildEnv = BTreeMap<OsString, OsString>;

/// `cortex <base_command>`, plus ` --dry-run` when requested.
///
/// The base command is passed through as-is; the shell does the splitting.
pub fn compose_command(base_command: &str, dry_run: bool) -> String {
    let mut line = format!("{CORTEX_PROGRAM} {base_command}");
    if dry_run {
        line.push(' ');
        line.push_str(DRY_RUN_FLAG);
    }
    line
}

/// The synthetic log line reported instead of running in dry-run mode.
pub fn dry_run_log(base_command: &str) -> String {
    format!("[DRY-RUN] {}", compose_command(base_command, true))
}

/// Copy `base` and overlay the provider's key variable.
///
/// Nothing here touches the host process environment.
pub fn build_child_env<I, K, V>(base: I, provider: Provider, api_key: &ApiKey) -> ChildEnv
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<OsString>,
    V: Into<OsString>,
{
    let mut env: ChildEnv = base
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect();
    env.insert(provider.env_var().into(), api_key.expose().into());
    env
}

/// Shell line that replaces the shell with the program it names, so the
/// spawned child is the program itself and its exit status (or the signal
/// that ended it) is reported unchanged.
pub fn direct_invocation(command_line: &str) -> String {
    if cfg!(windows) {
        command_line.to_string()
    } else {
        format!("exec {command_line}")
    }
}

/// Build a shell command appropriate for the platform, with piped output
/// and exactly `env` as its environment.
pub fn shell_command(command_line: &str, env: &ChildEnv) -> Command {
    let mut cmd = if cfg!(windows) {
        let mut c = Command::new("cmd");
        c.arg("/C").arg(command_line);
        c
    } else {
        let mut c = Command::new("sh");
        c.arg("-c").arg(command_line);
        c
    };

    cmd.env_clear()
        .envs(env.iter().map(|(k, v)| (k.as_os_str(), v.as_os_str())))
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);
    cmd
}

/// Look up a variable in a child environment.
pub fn env_get<'a>(env: &'a ChildEnv, key: &str) -> Option<&'a OsStr> {
    env.get(OsStr::new(key)).map(OsString::as_os_str)
}
