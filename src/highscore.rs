//! High-score persistence: one decimal integer in a plain text file.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Error, Result};

pub const DEFAULT_HIGH_SCORE_FILE: &str = "highscore.txt";

#[derive(Clone, Debug)]
pub struct HighScoreFile {
    path: PathBuf,
}

impl HighScoreFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A missing or unreadable file counts as a high score of zero.
    pub fn load(&self) -> u32 {
        match fs::read_to_string(&self.path) {
            Ok(contents) => contents.trim().parse().unwrap_or_else(|err| {
                debug!(path = %self.path.display(), %err, "high score file is not a number");
                0
            }),
            Err(err) => {
                debug!(path = %self.path.display(), %err, "no high score on disk");
                0
            }
        }
    }

    pub fn save(&self, score: u32) -> Result<()> {
        fs::write(&self.path, score.to_string()).map_err(|source| Error::HighScoreWrite {
            path: self.path.clone(),
            source,
        })
    }
}

impl Default for HighScoreFile {
    fn default() -> Self {
        Self::new(DEFAULT_HIGH_SCORE_FILE)
    }
}
