use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Longest slice of a response body echoed in a parse diagnostic.
const RAW_BODY_PREVIEW: usize = 512;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("invalid JSON in response: {detail}; response text: {}", preview(.raw_body))]
    Parse { detail: String, raw_body: String },

    #[error("missing key '{field}' in response")]
    MissingField { field: String },

    #[error("could not write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{0}")]
    Unexpected(String),
}

/// Coarse failure category used for the status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Network,
    JsonDecode,
    MissingKey,
    FileWrite,
    Unexpected,
}

impl FetchError {
    pub fn kind(&self) -> FailureKind {
        match self {
            FetchError::Network { .. } | FetchError::Http { .. } => FailureKind::Network,
            FetchError::Parse { .. } => FailureKind::JsonDecode,
            FetchError::MissingField { .. } => FailureKind::MissingKey,
            FetchError::Io { .. } => FailureKind::FileWrite,
            FetchError::Unexpected(_) => FailureKind::Unexpected,
        }
    }

    /// Expected failures are reported and the process still exits cleanly.
    pub fn is_expected(&self) -> bool {
        self.kind() != FailureKind::Unexpected
    }

    /// Whether another source might succeed where this one failed.
    pub fn is_source_failure(&self) -> bool {
        matches!(
            self.kind(),
            FailureKind::Network | FailureKind::JsonDecode | FailureKind::MissingKey
        )
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FailureKind::Network => "Error fetching data",
            FailureKind::JsonDecode => "Error decoding JSON",
            FailureKind::MissingKey => "Error parsing JSON data",
            FailureKind::FileWrite => "Error writing puzzle file",
            FailureKind::Unexpected => "An unexpected error occurred",
        };
        f.write_str(label)
    }
}

fn preview(body: &str) -> String {
    if body.chars().count() <= RAW_BODY_PREVIEW {
        return body.to_string();
    }
    let head: String = body.chars().take(RAW_BODY_PREVIEW).collect();
    format!("{head}... ({} bytes total)", body.len())
}
