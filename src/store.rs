use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{info, warn};

/// A file holding nothing but the best score as a decimal number.
pub struct HighScoreFile {
    path: PathBuf,
}

impl HighScoreFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        HighScoreFile { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A missing or garbled file counts as no high score yet.
    pub fn load(&self) -> Result<u32> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(0),
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to read high score from {}", self.path.display()))
            }
        };

        match contents.trim().parse() {
            Ok(score) => Ok(score),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "ignoring unreadable high score file");
                Ok(0)
            }
        }
    }

    pub fn save(&self, score: u32) -> Result<()> {
        fs::write(&self.path, format!("{}\n", score))
            .with_context(|| format!("Failed to write high score to {}", self.path.display()))?;
        info!(score, path = %self.path.display(), "high score saved");
        Ok(())
    }
}
