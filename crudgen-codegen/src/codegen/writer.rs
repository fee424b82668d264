//! Artifact writers

use std::fs;
use std::path::Path;
use std::process::Command;

use tracing::{debug, info};

use crate::error::{CodegenError, Result};

/// Persists rendered artifacts
pub trait ArtifactWriter {
    fn write(&self, path: &Path, contents: &str) -> Result<()>;
}

/// Writes artifacts to disk, creating section directories as needed
#[derive(Debug, Clone, Default)]
pub struct FsWriter {
    format_command: Option<String>,
}

impl FsWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `command <file>` after every write (e.g. `prettier --write`)
    pub fn with_format_command(command: Option<String>) -> Self {
        Self {
            format_command: command.filter(|c| !c.trim().is_empty()),
        }
    }
}

impl ArtifactWriter for FsWriter {
    fn write(&self, path: &Path, contents: &str) -> Result<()> {
        let failure = |source| CodegenError::WriteFailure {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(failure)?;
        }
        fs::write(path, contents).map_err(failure)?;

        if let Some(command) = &self.format_command {
            format_file(command, path);
        }
        Ok(())
    }
}

/// Best-effort external formatter on a generated file.
fn format_file(command: &str, path: &Path) {
    let mut parts = command.split_whitespace();
    let Some(program) = parts.next() else {
        return;
    };
    match Command::new(program).args(parts).arg(path).status() {
        Ok(status) if status.success() => {}
        Ok(status) => debug!("{} exited with {} on {}", program, status, path.display()),
        Err(err) => debug!("Could not run {}: {}", program, err),
    }
}

/// Logs what would be written without touching the filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct DryRunWriter;

impl ArtifactWriter for DryRunWriter {
    fn write(&self, path: &Path, contents: &str) -> Result<()> {
        info!("Would write {} ({} bytes)", path.display(), contents.len());
        Ok(())
    }
}
