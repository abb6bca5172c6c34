//! Error types for the megacp library.

use std::fmt;

use thiserror::Error;

/// Main error type for megacp operations.
#[derive(Error, Debug)]
pub enum MegaError {
    /// HTTP request failed with status code.
    #[error("HTTP error: {0}")]
    HttpError(u16),

    /// Network request error.
    #[error("Request error: {0}")]
    RequestError(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Server is busy, retry later.
    #[error("Server busy, try again later")]
    ServerBusy,

    /// Invalid or unexpected response from server.
    #[error("Invalid response from server")]
    InvalidResponse,

    /// MEGA API returned an error code.
    #[error("API error: {code} - {message}")]
    ApiError { code: i32, message: String },

    /// Cryptographic operation failed.
    #[error("Crypto error: {0}")]
    CryptoError(String),

    /// Base64 decoding error.
    #[error("Base64 decode error: {0}")]
    Base64Error(#[from] base64::DecodeError),

    /// Conflicting or insufficient command line arguments.
    #[error("{0}")]
    InvalidArguments(String),

    /// Destination path can't be split into a folder and a name.
    #[error("Invalid destination {0}")]
    InvalidDestination(String),

    /// Destination folder doesn't exist.
    #[error("Destination folder not found {0}")]
    DestinationNotFound(String),

    /// Destination resolved to a file.
    #[error("Destination path is not a folder {0}")]
    NotAFolder(String),

    /// Destination is a virtual root that can't receive nodes.
    #[error("Destination folder is not writable {0}")]
    NotWritable(String),

    /// Rename was requested but the new name is empty.
    #[error("Destination file name can't be determined for {0}")]
    NameUndetermined(String),

    /// Every source was filtered out; nothing was sent to the server.
    #[error("Nothing to do!")]
    NothingToDo,

    /// The copy request was rejected.
    #[error("Failed to copy files and folders: {0}")]
    CopyFailed(#[source] Box<MegaError>),

    /// Custom error message.
    #[error("{0}")]
    Custom(String),
}

/// Coarse, machine-checkable classification of a [`MegaError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Argument error, detected before any lookup.
    Args,
    /// Benign no-op: nothing survived source filtering.
    Nop,
    /// Any other hard failure.
    Err,
}

impl ErrorCategory {
    /// Short tag for scripts and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Args => "args",
            ErrorCategory::Nop => "nop",
            ErrorCategory::Err => "err",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl MegaError {
    /// Category tag of this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            MegaError::InvalidArguments(_) => ErrorCategory::Args,
            MegaError::NothingToDo => ErrorCategory::Nop,
            _ => ErrorCategory::Err,
        }
    }

    /// `true` for the "nothing to do" condition, which callers may treat as success.
    pub fn is_nop(&self) -> bool {
        self.category() == ErrorCategory::Nop
    }
}

/// Result type alias for megacp operations.
pub type Result<T> = std::result::Result<T, MegaError>;
