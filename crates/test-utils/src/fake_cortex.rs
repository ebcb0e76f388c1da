use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use cortex_action::exec::CommandRunner;
use tempfile::TempDir;

/// A throwaway `cortex` executable on its own PATH entry.
///
/// The script body runs under `/bin/sh` with the arguments cortex received.
pub struct FakeCortex {
    dir: TempDir,
}

impl FakeCortex {
    pub fn new(body: &str) -> anyhow::Result<Self> {
        let dir = tempfile::tempdir()?;
        let script = dir.path().join("cortex");
        fs::write(&script, format!("#!/bin/sh\n{body}\n"))?;
        fs::set_permissions(&script, fs::Permissions::from_mode(0o755))?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    /// A file path inside the fake's directory, handy for side-effect marker files.
    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Base environment with only PATH set, fake first.
    pub fn env(&self) -> Vec<(String, String)> {
        vec![(
            "PATH".to_string(),
            format!("{}:/usr/bin:/bin", self.dir.path().display()),
        )]
    }

    pub fn runner(&self) -> CommandRunner {
        CommandRunner::with_base_env(self.env())
    }
}

/// A runner whose PATH contains no `cortex`.
pub fn runner_without_cortex() -> anyhow::Result<(TempDir, CommandRunner)> {
    let dir = tempfile::tempdir()?;
    let runner = CommandRunner::with_base_env(vec![(
        "PATH".to_string(),
        format!("{}:/usr/bin:/bin", dir.path().display()),
    )]);
    Ok((dir, runner))
}
