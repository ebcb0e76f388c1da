// src/errors.rs

//! Crate-wide error aliases and helpers.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CortexActionError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Installation failed: {0}")]
    InstallError(String),

    #[error("Failed to start `{command}`: {source}")]
    SpawnError {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("process exited with non-zero code {code}")]
    NonZeroExit { code: i32 },

    #[error("process was terminated by a signal")]
    Terminated,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Unable to set output `{name}`: {reason}")]
    OutputError { name: String, reason: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, CortexActionError>;
