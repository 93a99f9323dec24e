// ABOUTME: Engine metadata and reachability checks.
// ABOUTME: Used by the info command and by connection setup.

use super::sealed::Sealed;
use super::{Fault, FaultKind};
use async_trait::async_trait;

#[async_trait]
pub trait RuntimeInfo: Sealed + Send + Sync {
    /// The engine's system information document.
    async fn info(&self) -> Result<serde_json::Value, RuntimeInfoError>;

    async fn ping(&self) -> Result<(), RuntimeInfoError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RuntimeInfoError {
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    #[error("{0}")]
    Runtime(String),
}

impl Fault for RuntimeInfoError {
    fn kind(&self) -> FaultKind {
        match self {
            RuntimeInfoError::ConnectionFailed(_) => FaultKind::Connection,
            RuntimeInfoError::Runtime(_) => FaultKind::Remote,
        }
    }
}
