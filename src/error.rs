use std::path::PathBuf;

/// Failures that abort an export run.
///
/// Every variant belongs to one of three stages (fetch, parse, write); none
/// of them is retried.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("fetch error: request to {url} failed: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("fetch error: {url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("fetch error: could not store {url} at {}: {source}", .path.display())]
    Store {
        url: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse error: could not read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse error in {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("write error on {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

impl ExportError {
    /// Name of the pipeline stage that failed.
    pub fn stage(&self) -> &'static str {
        match self {
            Self::Fetch { .. } | Self::Status { .. } | Self::Store { .. } => "fetch",
            Self::Read { .. } | Self::Parse { .. } => "parse",
            Self::Write { .. } => "write",
        }
    }
}
