use super::Format;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O operation failed: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    #[error("failed to parse {format} data: {details} (at line ~{line})")]
    Parse {
        format: Format,
        line: usize,
        details: String,
    },

    #[error("no MCNP version marker on the first listing line")]
    MissingVersionMarker,

    #[error("transform TR{id} uses an unsupported {tokens}-token form")]
    UnsupportedTransform { id: u32, tokens: usize },

    #[error("malformed interval shorthand: {0}")]
    InvalidInterval(String),

    #[error("cell {0} not found in the listing")]
    CellNotFound(u32),

    #[error("material m{0} not found in the listing")]
    MaterialNotFound(u32),

    #[error("no residual nuclei section for cell {0}")]
    ResidualCellNotFound(u32),

    #[error("invalid input: {0}")]
    Validation(String),

    #[error(
        "non-standard energy group structure requested without confirmation; set `confirm_nonstandard` to proceed"
    )]
    NonStandardGroupStructure,

    #[error("failed to (de)serialize summary records: {0}")]
    Summary(#[from] serde_json::Error),
}

impl Error {
    pub fn parse(format: Format, line: usize, details: impl Into<String>) -> Self {
        Self::Parse {
            format,
            line,
            details: details.into(),
        }
    }

    pub fn validation(details: impl Into<String>) -> Self {
        Self::Validation(details.into())
    }
}
