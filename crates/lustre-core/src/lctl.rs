//! Access to parameters only exposed through `lctl get_param`.
//!
//! In production the text comes from running `lctl` (through `sudo` when
//! the exporter is not root). In fixture mode the same text is read from a
//! captured tree where the dotted parameter name maps to a path.

use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::Arc;

use tracing::debug;

use crate::collector::{FileSystem, expand};
use crate::error::CollectError;

/// Parameter listing the changelog users of every MDT.
pub const CHANGELOG_PARAM: &str = "mdd.*-*.changelog_users";

/// Provider of raw `get_param` output.
pub trait TextSource: Send + Sync {
    /// Human-readable origin, for logs.
    fn describe(&self) -> String;

    /// Fetches the text. `Ok(None)` means nothing to report.
    fn fetch(&self) -> Result<Option<String>, CollectError>;
}

/// Runs `lctl get_param` for one parameter.
#[derive(Debug, Clone)]
pub struct LctlCommand {
    program: PathBuf,
    args: Vec<String>,
}

impl LctlCommand {
    /// Locates `lctl` (and `sudo` when not root) on `PATH`.
    pub fn detect(param: &str) -> Result<Self, CollectError> {
        let lctl = locate("lctl")?;
        if is_root() {
            return Ok(Self::direct(lctl, param));
        }
        let sudo = locate("sudo")?;
        Ok(Self {
            program: sudo,
            args: vec![
                lctl.to_string_lossy().into_owned(),
                "get_param".to_string(),
                param.to_string(),
            ],
        })
    }

    /// Runs `program get_param <param>` without privilege escalation.
    pub fn direct(program: impl Into<PathBuf>, param: &str) -> Self {
        Self {
            program: program.into(),
            args: vec!["get_param".to_string(), param.to_string()],
        }
    }

    fn program_name(&self) -> String {
        self.program.to_string_lossy().into_owned()
    }
}

impl TextSource for LctlCommand {
    fn describe(&self) -> String {
        format!("{} {}", self.program_name(), self.args.join(" "))
    }

    fn fetch(&self) -> Result<Option<String>, CollectError> {
        debug!(command = %self.describe(), "running lctl");
        let output = Command::new(&self.program)
            .args(&self.args)
            .output()
            .map_err(|e| CollectError::Command {
                program: self.program_name(),
                reason: e.to_string(),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(CollectError::Command {
                program: self.program_name(),
                reason: format!("{}: {}", output.status, stderr.trim()),
            });
        }
        Ok(Some(String::from_utf8_lossy(&output.stdout).into_owned()))
    }
}

/// Reads captured `get_param` output from `<root>/<param with dots as slashes>`.
pub struct FixtureFile<F: FileSystem> {
    fs: Arc<F>,
    pattern: PathBuf,
}

impl<F: FileSystem> FixtureFile<F> {
    pub fn new(fs: Arc<F>, root: &Path, param: &str) -> Self {
        Self {
            fs,
            pattern: root.join(param.replace('.', "/")),
        }
    }
}

impl<F: FileSystem> TextSource for FixtureFile<F> {
    fn describe(&self) -> String {
        self.pattern.display().to_string()
    }

    fn fetch(&self) -> Result<Option<String>, CollectError> {
        let Some(path) = expand(self.fs.as_ref(), &self.pattern)?.into_iter().next() else {
            debug!(pattern = %self.pattern.display(), "no lctl fixture found");
            return Ok(None);
        };
        self.fs
            .read_to_string(&path)
            .map(Some)
            .map_err(|e| CollectError::unreadable(path, e))
    }
}

fn locate(program: &str) -> Result<PathBuf, CollectError> {
    which::which(program).map_err(|e| CollectError::Command {
        program: program.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(unix)]
fn is_root() -> bool {
    unsafe { libc::geteuid() == 0 }
}

#[cfg(not(unix))]
fn is_root() -> bool {
    false
}
