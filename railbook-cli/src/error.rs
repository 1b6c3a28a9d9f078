//! Error types for the command-line front end.

use std::path::PathBuf;

use railbook_client::{ClientError, SessionError};
use railbook_core::CoreError;

/// Errors that end a `railbook` invocation.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum CliError {
    /// The arguments do not form a command.
    #[error("{0}")]
    Usage(String),

    /// The API call was rejected. The user has already been notified.
    #[error(transparent)]
    Client(#[from] ClientError),

    /// Reading or writing the stored token failed.
    #[error(transparent)]
    Session(#[from] SessionError),

    /// Route lookup failed.
    #[error(transparent)]
    Route(#[from] CoreError),

    /// A JSON argument could not be parsed.
    #[error("invalid JSON argument: {0}")]
    Json(#[from] serde_json::Error),

    /// Writing a downloaded file failed.
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CliError {
    /// Process exit code for this error.
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::Usage(_) => 2,
            _ => 1,
        }
    }

    /// Whether the message still needs printing. Rejections from a request
    /// were already shown by the notifier; configuration errors were not.
    #[must_use]
    pub fn needs_report(&self) -> bool {
        match self {
            CliError::Client(e) => matches!(e, ClientError::Config(_)),
            _ => true,
        }
    }
}
