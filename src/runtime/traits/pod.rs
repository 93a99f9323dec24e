// ABOUTME: Pod operations, served by the Podman libpod API.
// ABOUTME: Engines without pod support answer every call with Unsupported.

use super::sealed::Sealed;
use super::shared_types::{Pod, PodConfig, ProcessTable};
use super::{Fault, FaultKind};
use crate::args::Signal;
use crate::types::PodId;
use async_trait::async_trait;

#[async_trait]
pub trait PodOps: Sealed + Send + Sync {
    async fn get_pod(&self, ident: &str) -> Result<Pod, PodError>;

    async fn list_pods(&self) -> Result<Vec<Pod>, PodError>;

    async fn create_pod(&self, config: &PodConfig) -> Result<PodId, PodError>;

    async fn kill_pod(&self, id: &PodId, signal: Signal) -> Result<(), PodError>;

    async fn pause_pod(&self, id: &PodId) -> Result<(), PodError>;

    async fn unpause_pod(&self, id: &PodId) -> Result<(), PodError>;

    async fn restart_pod(&self, id: &PodId) -> Result<(), PodError>;

    async fn stop_pod(&self, id: &PodId) -> Result<(), PodError>;

    async fn remove_pod(&self, id: &PodId, force: bool) -> Result<(), PodError>;

    async fn inspect_pod(&self, id: &PodId) -> Result<serde_json::Value, PodError>;

    async fn top_pod(&self, id: &PodId) -> Result<ProcessTable, PodError>;
}

#[derive(Debug, thiserror::Error)]
pub enum PodError {
    #[error("Pod \"{0}\" not found")]
    NotFound(String),

    #[error("pods require a Podman engine reached through its unix socket")]
    Unsupported,

    #[error("lost connection to the engine: {0}")]
    Connection(String),

    #[error("{0}")]
    Runtime(String),
}

impl Fault for PodError {
    fn kind(&self) -> FaultKind {
        match self {
            PodError::NotFound(_) => FaultKind::NotFound,
            PodError::Connection(_) => FaultKind::Connection,
            PodError::Unsupported | PodError::Runtime(_) => FaultKind::Remote,
        }
    }
}
