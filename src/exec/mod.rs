// src/exec/mod.rs

//! Process execution layer.
//!
//! - [`command`] composes the `cortex` command line and the child
//!   environment.
//! - [`capture`] streams stdout/stderr chunks while the child runs.
//! - [`runner`] ties both together into a single [`CommandRunner::run`].
//! - [`result`] holds the [`InvocationResult`] every run ends with.

pub mod capture;
pub mod command;
pub mod result;
pub mod runner;

pub use command::{CORTEX_PROGRAM, ChildEnv, build_child_env, compose_command, dry_run_log};
pub use result::InvocationResult;
pub use runner::CommandRunner;
