//! Error type of the deck pipeline.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while preparing or writing the decks of one cell.
#[derive(Debug, Error)]
pub enum Error {
    /// Reading or writing one of the deck formats failed.
    #[error(transparent)]
    Io(#[from] crate::io::Error),

    /// The material could not be converted to the cell density or expanded.
    #[error(transparent)]
    Compose(#[from] crate::compose::Error),

    /// The deck configuration TOML could not be parsed.
    #[error("failed to parse deck configuration: {0}")]
    Config(#[from] toml::de::Error),

    /// The deck configuration file could not be read.
    #[error("failed to read deck configuration {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A working directory could not be created, renamed or written.
    #[error("working directory {}: {source}", path.display())]
    Workdir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub(crate) fn workdir(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Workdir {
            path: path.into(),
            source,
        }
    }
}
