// src/exec/runner.rs

//! The single command invocation of a run.

use std::ffi::OsString;

use tokio::sync::mpsc;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::action::ActionLog;
use crate::config::InvocationRequest;
use crate::errors::{CortexActionError, Result};
use crate::exec::InvocationResult;
use crate::exec::capture::{Captured, Chunk, IDLE_FLUSH, LineBuffer, Stream, spawn_reader};
use crate::exec::command::{
    ChildEnv, build_child_env, compose_command, direct_invocation, dry_run_log, shell_command,
};

/// Runs `cortex` for one [`InvocationRequest`].
///
/// The child environment is `base_env` plus the provider key; by default
/// `base_env` is a snapshot of the current process environment.
#[derive(Debug, Clone)]
pub struct CommandRunner {
    base_env: Vec<(OsString, OsString)>,
}

impl Default for CommandRunner {
    fn default() -> Self {
        Self::from_process_env()
    }
}

impl CommandRunner {
    pub fn from_process_env() -> Self {
        Self {
            base_env: std::env::vars_os().collect(),
        }
    }

    pub fn with_base_env<I, K, V>(base_env: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<OsString>,
        V: Into<OsString>,
    {
        Self {
            base_env: base_env
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// The environment before any key is overlaid.
    pub fn base_env(&self) -> ChildEnv {
        self.base_env.iter().cloned().collect()
    }

    /// Environment the child would see for `request`.
    pub fn child_env(&self, request: &InvocationRequest) -> ChildEnv {
        build_child_env(
            self.base_env.iter().cloned(),
            request.provider(),
            request.api_key(),
        )
    }

    /// Execute (or simulate) the request. Never returns an error: failures
    /// become a failed [`InvocationResult`] carrying whatever was captured.
    pub async fn run(&self, request: &InvocationRequest, log: &dyn ActionLog) -> InvocationResult {
        log.register_secret(request.api_key().expose());

        if request.dry_run() {
            let line = dry_run_log(request.base_command());
            log.info(&line);
            return InvocationResult::success(log.mask(&line));
        }

        let provider = request.provider();
        debug!(%provider, "injecting provider key into child environment");
        log.info(&format!("Setting up {} environment variable...", provider.env_var()));
        let env = self.child_env(request);

        let command_line = compose_command(request.base_command(), false);
        log.info(&format!("Executing: {command_line}"));

        let mut captured = Captured::default();
        match execute(&direct_invocation(&command_line), &env, &mut captured, log).await {
            Ok(()) => {
                let output = log.mask(&captured.log());
                if !output.is_empty() {
                    log.info(&format!("Command completed. Full output: {}", output.trim()));
                }
                InvocationResult::success(output)
            }
            Err(err) => {
                warn!(error = %err, "cortex invocation failed");
                InvocationResult::failed(log.mask(&captured.log()), &err)
            }
        }
    }
}

/// Spawn `command_line`, forward output to `log` as it arrives and
/// accumulate it into `captured`. Succeeds only on exit code zero.
///
/// Complete lines are forwarded as soon as their chunk arrives; a partial
/// line is forwarded once both streams have been quiet for [`IDLE_FLUSH`].
pub async fn execute(
    command_line: &str,
    env: &ChildEnv,
    captured: &mut Captured,
    log: &dyn ActionLog,
) -> Result<()> {
    info!(cmd = %log.mask(command_line), "starting cortex process");

    let mut child = shell_command(command_line, env).spawn().map_err(|source| {
        CortexActionError::SpawnError {
            command: command_line.to_string(),
            source,
        }
    })?;

    let (tx, mut rx) = mpsc::channel::<Chunk>(64);
    let mut readers = Vec::with_capacity(2);
    if let Some(stdout) = child.stdout.take() {
        readers.push(spawn_reader(stdout, Stream::Stdout, tx.clone()));
    }
    if let Some(stderr) = child.stderr.take() {
        readers.push(spawn_reader(stderr, Stream::Stderr, tx.clone()));
    }
    drop(tx);

    let mut stdout_lines = LineBuffer::default();
    let mut stderr_lines = LineBuffer::default();
    loop {
        match timeout(IDLE_FLUSH, rx.recv()).await {
            Ok(Some(chunk)) => {
                captured.push(&chunk);
                let lines = match chunk.stream {
                    Stream::Stdout => stdout_lines.feed(&chunk.bytes),
                    Stream::Stderr => stderr_lines.feed(&chunk.bytes),
                };
                for line in lines {
                    forward(chunk.stream, &line, log);
                }
            }
            Ok(None) => break,
            Err(_idle) => flush_partial(&mut stdout_lines, &mut stderr_lines, log),
        }
    }
    flush_partial(&mut stdout_lines, &mut stderr_lines, log);

    for reader in readers {
        if let Err(e) = reader.await {
            warn!(error = %e, "output reader task panicked");
        }
    }

    let status = child.wait().await?;
    debug!(exit_code = ?status.code(), success = status.success(), "cortex process exited");

    if status.success() {
        return Ok(());
    }
    match status.code() {
        Some(code) => Err(CortexActionError::NonZeroExit { code }),
        None => Err(CortexActionError::Terminated),
    }
}

fn flush_partial(stdout: &mut LineBuffer, stderr: &mut LineBuffer, log: &dyn ActionLog) {
    if let Some(partial) = stdout.flush() {
        forward(Stream::Stdout, &partial, log);
    }
    if let Some(partial) = stderr.flush() {
        forward(Stream::Stderr, &partial, log);
    }
}

fn forward(stream: Stream, line: &str, log: &dyn ActionLog) {
    let text = line.trim();
    match stream {
        Stream::Stdout => log.info(text),
        Stream::Stderr if !text.is_empty() => log.error(text),
        Stream::Stderr => {}
    }
}
