use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a single pipeline invocation
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("failed to read image {}: {source}", path.display())]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl PipelineError {
    pub fn file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::File {
            path: path.into(),
            source,
        }
    }

    /// Taxonomy tag carried into reports
    pub fn failure_kind(&self) -> FailureKind {
        match self {
            Self::File { .. } => FailureKind::File,
            Self::Transport(_) => FailureKind::Transport,
            Self::Config(_) => FailureKind::Config,
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportErrorKind {
    Connect,
    Timeout,
    MalformedBody,
    Request,
}

impl fmt::Display for TransportErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Connect => "connection failed",
            Self::Timeout => "request timed out",
            Self::MalformedBody => "malformed response body",
            Self::Request => "request failed",
        };
        f.write_str(label)
    }
}

/// Network-level failure talking to the OCR service
#[derive(Error, Debug)]
#[error("transport error ({kind}): {message}")]
pub struct TransportError {
    pub kind: TransportErrorKind,
    pub message: String,
}

impl TransportError {
    pub fn new(kind: TransportErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Classify a reqwest failure
    pub fn from_reqwest(err: &reqwest::Error) -> Self {
        let kind = if err.is_timeout() {
            TransportErrorKind::Timeout
        } else if err.is_connect() {
            TransportErrorKind::Connect
        } else if err.is_decode() {
            TransportErrorKind::MalformedBody
        } else {
            TransportErrorKind::Request
        };
        Self::new(kind, err.to_string())
    }
}

/// Failures raised by a face verification backend.
///
/// These are folded into a failed `VerificationResult` at the boundary.
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("failed to start verification backend: {0}")]
    Spawn(#[from] std::io::Error),
    #[error("{0}")]
    Reported(String),
    #[error("verification backend produced unreadable output: {0}")]
    MalformedOutput(String),
    #[error("verification backend returned an unexpected result: {0}")]
    UnexpectedShape(String),
}

/// Which branch of the error taxonomy a failed report came from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FailureKind {
    File,
    Transport,
    Application,
    Backend,
    Config,
}
