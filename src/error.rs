// Error types shared by the HTTP clients, the result recorder and the
// orchestrator. The UI layer and `main` wrap these in `anyhow`.

use reqwest::StatusCode;
use std::path::PathBuf;
use thiserror::Error;

/// Coarse classification of why a single image could not be copied.
///
/// Failed records keep one of these so the cause survives for
/// diagnostics even though the JSON record only says `failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Timeout, connection refused, DNS and other transport problems.
    Network,
    /// Unexpected HTTP status or a non-success `status` in a JSON body.
    RemoteStatus,
    /// A body that could not be decoded.
    Malformed,
    /// The disk refused the upload-by-URL request.
    Rejected,
    /// The destination folder was missing and could not be created.
    FolderUnavailable,
    /// The HTTP client could not be set up.
    Client,
}

/// Errors from the dog image API.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} responded with HTTP {status}")]
    HttpStatus { url: String, status: StatusCode },

    #[error("API returned status '{status}': {message}")]
    ApiStatus { status: String, message: String },

    #[error("malformed response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl CatalogError {
    pub fn kind(&self) -> FailureKind {
        match self {
            CatalogError::Transport { .. } => FailureKind::Network,
            CatalogError::HttpStatus { .. } | CatalogError::ApiStatus { .. } => {
                FailureKind::RemoteStatus
            }
            CatalogError::Decode { .. } => FailureKind::Malformed,
        }
    }
}

/// Errors from the cloud disk API.
#[derive(Debug, Error)]
pub enum DiskError {
    #[error("token cannot be used in an Authorization header")]
    InvalidToken(#[source] reqwest::header::InvalidHeaderValue),

    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("request for {path} failed: {source}")]
    Transport {
        path: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("disk rejected {path} with HTTP {status}")]
    Rejected { path: String, status: StatusCode },

    #[error("folder {folder} is missing and could not be created: {source}")]
    FolderUnavailable {
        folder: String,
        #[source]
        source: Box<DiskError>,
    },
}

impl DiskError {
    pub fn kind(&self) -> FailureKind {
        match self {
            DiskError::InvalidToken(_) | DiskError::Client(_) => FailureKind::Client,
            DiskError::Transport { .. } => FailureKind::Network,
            DiskError::Rejected { .. } => FailureKind::Rejected,
            DiskError::FolderUnavailable { .. } => FailureKind::FolderUnavailable,
        }
    }
}

/// Errors while writing the result file.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("failed to serialize results: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Invalid environment configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value '{value}' for {key}")]
    Invalid { key: String, value: String },
}

/// Conditions that stop a run before any image is processed.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("token must not be empty")]
    EmptyToken,

    #[error(transparent)]
    Disk(#[from] DiskError),

    #[error("could not fetch the breed list: {0}")]
    Catalog(#[source] CatalogError),

    #[error("the breed list is empty")]
    EmptyCatalog,

    #[error("breed '{0}' not found")]
    UnknownBreed(String),

    #[error("could not create folder {folder}: {source}")]
    FolderCreation {
        folder: String,
        #[source]
        source: DiskError,
    },
}
