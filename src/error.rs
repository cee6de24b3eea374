use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong between reading a dataset and writing a chart.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Failed to read from stdin: {0}")]
    Stdin(#[source] std::io::Error),

    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to fetch {url}: {message}")]
    Fetch { url: String, message: String },

    #[error("Failed to parse records: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to parse config: {0}")]
    Config(String),

    #[error("Unknown palette '{name}'. Available: {available}")]
    UnknownPalette { name: String, available: String },

    #[error("{0}")]
    Export(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
