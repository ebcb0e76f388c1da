//! Step outputs.
//!
//! Modern runners hand the step a file through `GITHUB_OUTPUT`; each output
//! is appended as a heredoc-style block:
//!
//! ```text
//! name<<ghadelimiter_<uuid>
//! value
//! ghadelimiter_<uuid>
//! ```
//!
//! Without that file the legacy `::set-output` command is written to stdout.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::action::commands::format_command;
use crate::errors::{CortexActionError, Result};

pub const OUTPUT_EXECUTION_LOG: &str = "execution-log";
pub const OUTPUT_STATUS: &str = "status";

/// Something step outputs can be written to.
pub trait OutputSink {
    fn set_output(&mut self, name: &str, value: &str) -> Result<()>;
}

/// Output sink that follows the runner's file or command protocol.
pub struct GithubOutputs<W: Write> {
    file: Option<PathBuf>,
    fallback: W,
}

impl GithubOutputs<std::io::Stdout> {
    /// Use `GITHUB_OUTPUT` if set and non-empty, stdout commands otherwise.
    pub fn from_env() -> Self {
        let file = std::env::var_os("GITHUB_OUTPUT")
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);
        Self {
            file,
            fallback: std::io::stdout(),
        }
    }
}

impl<W: Write> GithubOutputs<W> {
    pub fn new(file: Option<PathBuf>, fallback: W) -> Self {
        Self { file, fallback }
    }

    pub fn into_fallback(self) -> W {
        self.fallback
    }
}

impl<W: Write> OutputSink for GithubOutputs<W> {
    fn set_output(&mut self, name: &str, value: &str) -> Result<()> {
        match &self.file {
            Some(path) => {
                let block = key_value_message(name, value, &new_delimiter())?;
                append(path, &block)
            }
            None => {
                let line = format_command("set-output", &[("name", name)], value);
                writeln!(self.fallback, "{line}")?;
                Ok(())
            }
        }
    }
}

fn new_delimiter() -> String {
    format!("ghadelimiter_{}", Uuid::new_v4())
}

/// Build the file-command block for one output.
pub fn key_value_message(name: &str, value: &str, delimiter: &str) -> Result<String> {
    if name.contains(delimiter) || value.contains(delimiter) {
        return Err(CortexActionError::OutputError {
            name: name.to_string(),
            reason: format!("value must not contain the delimiter \"{delimiter}\""),
        });
    }
    Ok(format!("{name}<<{delimiter}\n{value}\n{delimiter}\n"))
}

fn append(path: &Path, block: &str) -> Result<()> {
    let mut file = OpenOptions::new().append(true).create(true).open(path)?;
    file.write_all(block.as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_format() {
        let block = key_value_message("status", "success", "EOF_X").unwrap();
        assert_eq!(block, "status<<EOF_X\nsuccess\nEOF_X\n");
    }

    #[test]
    fn delimiter_inside_value_is_rejected() {
        let err = key_value_message("execution-log", "a EOF_X b", "EOF_X").unwrap_err();
        assert!(matches!(err, CortexActionError::OutputError { .. }));
    }

    #[test]
    fn legacy_command_without_file() {
        let mut outputs = GithubOutputs::new(None, Vec::new());
        outputs.set_output("status", "failed").unwrap();
        let written = String::from_utf8(outputs.into_fallback()).unwrap();
        assert_eq!(written, "::set-output name=status::failed\n");
    }

    #[test]
    fn file_protocol_appends_blocks() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("output");
        let mut outputs = GithubOutputs::new(Some(path.clone()), Vec::new());
        outputs.set_output("execution-log", "line1\nline2").unwrap();
        outputs.set_output("status", "success").unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("execution-log<<ghadelimiter_"));
        assert!(contents.contains("\nline1\nline2\n"));
        assert!(contents.contains("status<<ghadelimiter_"));
        assert!(contents.contains("\nsuccess\n"));
        assert!(outputs.into_fallback().is_empty());
    }
}
