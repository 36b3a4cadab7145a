use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to write high score to {}", path.display())]
    HighScoreWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to open log file {}", path.display())]
    LogFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
