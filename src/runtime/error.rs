// ABOUTME: Connection setup errors with SNAFU pattern.
// ABOUTME: Unifies endpoint detection, client construction and the first ping.

use snafu::Snafu;

use super::detection::DetectionError;
use super::traits::RuntimeInfoError;

/// Failure to reach an engine before any command runs.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ConnectError {
    #[snafu(display("runtime detection failed: {source}"))]
    Detection { source: DetectionError },

    #[snafu(display("cannot create client for {endpoint}: {source}"))]
    Client {
        endpoint: String,
        source: bollard::errors::Error,
    },

    #[snafu(display("{endpoint} is not responding: {source}"))]
    Unreachable {
        endpoint: String,
        source: RuntimeInfoError,
    },
}

/// Error kind for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectErrorKind {
    /// No engine socket found and none configured.
    NoRuntimeFound,
    /// The configured address cannot be used.
    BadAddress,
    /// The engine did not answer.
    ConnectionFailed,
}

impl ConnectError {
    /// Returns the error kind for programmatic handling.
    pub fn kind(&self) -> ConnectErrorKind {
        match self {
            ConnectError::Detection { source } => match source {
                DetectionError::NoRuntimeFound => ConnectErrorKind::NoRuntimeFound,
                DetectionError::UnsupportedUrl(_) => ConnectErrorKind::BadAddress,
            },
            ConnectError::Client { .. } => ConnectErrorKind::BadAddress,
            ConnectError::Unreachable { .. } => ConnectErrorKind::ConnectionFailed,
        }
    }
}

impl From<DetectionError> for ConnectError {
    fn from(source: DetectionError) -> Self {
        ConnectError::Detection { source }
    }
}
