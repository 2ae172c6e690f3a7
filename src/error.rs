//! Error types for discovery and upload orchestration.
//!
//! Fatal errors stop a `list` or `push` before any upload happens and are
//! represented by [`ErrorshotsError`]. Per-task transfer failures are carried
//! by [`TransferError`] inside an upload outcome and never propagate.

use std::path::PathBuf;

use thiserror::Error;

/// Fatal errors surfaced by discovery and by the uploader before dispatch.
#[derive(Error, Debug)]
pub enum ErrorshotsError {
    /// An external command (cache query or filesystem scan) failed.
    #[error("Command `{command}` failed: {message}")]
    ExternalCommand { command: String, message: String },

    /// The override file exists but could not be read.
    #[error("Failed to read override file {}: {source}", path.display())]
    OverrideFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A required credential field is empty.
    #[error("{provider} credential {field} is not defined.")]
    MissingCredential { provider: String, field: String },

    /// `push` was invoked without a provider.
    #[error("No provider is provided.")]
    NoProvider,

    /// `push` was invoked with a provider nobody implements.
    #[error("Provider {0} is unknown.")]
    UnknownProvider(String),

    /// The remote-storage client could not be constructed.
    #[error("Failed to create storage client: {0}")]
    Client(String),
}

impl ErrorshotsError {
    /// Build an [`ErrorshotsError::ExternalCommand`] from a command line and a message.
    pub fn external_command(command: impl Into<String>, message: impl std::fmt::Display) -> Self {
        ErrorshotsError::ExternalCommand {
            command: command.into(),
            message: message.to_string(),
        }
    }
}

/// Failure of a single upload task.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransferError {
    /// The local file or directory could not be read.
    #[error("I/O error for {path}: {message}")]
    Io { path: String, message: String },

    /// The object store rejected or failed the request.
    #[error("Upload of s3://{bucket}/{key} failed: {message}")]
    Remote {
        bucket: String,
        key: String,
        message: String,
    },

    /// The task died before reporting.
    #[error("Upload task for {path} aborted: {message}")]
    Aborted { path: String, message: String },
}
