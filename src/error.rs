// ABOUTME: Application-wide error types for podremote.
// ABOUTME: Errors that end the process before or around a command.

use crate::args::UsageError;
use crate::commands::EXIT_USAGE;
use crate::runtime::ConnectError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Usage(#[from] UsageError),

    #[error(transparent)]
    Connect(#[from] ConnectError),

    #[error("configuration file not found: {0}")]
    ConfigNotFound(PathBuf),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl Error {
    /// Process exit status for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Usage(_) => EXIT_USAGE,
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
