use std::path::PathBuf;

use thiserror::Error;

/// The input could not be read as a ledger. Nothing partially parsed is
/// returned alongside any of these.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("cannot open {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV at line {line}: {message}")]
    Csv { line: u64, message: String },

    #[error("missing required column(s): {} (found: {})", missing.join(", "), found.join(", "))]
    MissingColumns {
        missing: Vec<String>,
        found: Vec<String>,
    },

    #[error("invalid amount pattern: {0}")]
    Pattern(#[from] regex::Error),
}

impl IngestError {
    pub(crate) fn from_csv(err: csv::Error) -> Self {
        let line = err.position().map(|p| p.line()).unwrap_or(0);
        IngestError::Csv {
            line,
            message: err.to_string(),
        }
    }
}
