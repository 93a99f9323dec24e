// ABOUTME: Container lifecycle operations.
// ABOUTME: Lookup, listing, state changes, inspection, export and commit.

use super::sealed::Sealed;
use super::shared_types::{
    CommitConfig, Container, ContainerConfig, ContainerDetails, ProcessTable,
};
use super::{Fault, FaultKind};
use crate::args::Signal;
use crate::types::{ContainerId, ImageId};
use async_trait::async_trait;
use std::path::Path;
use std::time::Duration;

#[async_trait]
pub trait ContainerOps: Sealed + Send + Sync {
    /// Look up a container by id, id prefix or name.
    async fn get_container(&self, ident: &str) -> Result<Container, ContainerError>;

    /// List containers in the engine's order.
    async fn list_containers(
        &self,
        filters: &ContainerFilters,
    ) -> Result<Vec<Container>, ContainerError>;

    async fn create_container(
        &self,
        config: &ContainerConfig,
    ) -> Result<ContainerId, ContainerError>;

    async fn start_container(&self, id: &ContainerId) -> Result<(), ContainerError>;

    async fn stop_container(
        &self,
        id: &ContainerId,
        timeout: Duration,
    ) -> Result<(), ContainerError>;

    async fn kill_container(&self, id: &ContainerId, signal: Signal)
    -> Result<(), ContainerError>;

    async fn pause_container(&self, id: &ContainerId) -> Result<(), ContainerError>;

    async fn unpause_container(&self, id: &ContainerId) -> Result<(), ContainerError>;

    async fn restart_container(
        &self,
        id: &ContainerId,
        timeout: Duration,
    ) -> Result<(), ContainerError>;

    async fn remove_container(&self, id: &ContainerId, force: bool) -> Result<(), ContainerError>;

    /// Full inspect document plus the fields commands read from it.
    async fn inspect_container(&self, id: &ContainerId)
    -> Result<ContainerDetails, ContainerError>;

    async fn top_container(&self, id: &ContainerId) -> Result<ProcessTable, ContainerError>;

    /// Write the container filesystem as a tarball to a local file.
    async fn export_container(&self, id: &ContainerId, dest: &Path)
    -> Result<(), ContainerError>;

    async fn commit_container(
        &self,
        id: &ContainerId,
        config: &CommitConfig,
    ) -> Result<ImageId, ContainerError>;
}

/// Filters for listing containers.
#[derive(Debug, Clone, Default)]
pub struct ContainerFilters {
    /// Include containers that are not running.
    pub all: bool,
}

impl ContainerFilters {
    pub fn all() -> Self {
        Self { all: true }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ContainerError {
    #[error("Container \"{0}\" not found")]
    NotFound(String),

    #[error("Image \"{0}\" not found")]
    ImageNotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("cannot write {path}: {reason}")]
    Io { path: String, reason: String },

    #[error("lost connection to the engine: {0}")]
    Connection(String),

    #[error("{0}")]
    Runtime(String),
}

impl Fault for ContainerError {
    fn kind(&self) -> FaultKind {
        match self {
            ContainerError::NotFound(_) | ContainerError::ImageNotFound(_) => FaultKind::NotFound,
            ContainerError::Connection(_) => FaultKind::Connection,
            ContainerError::Conflict(_)
            | ContainerError::Io { .. }
            | ContainerError::Runtime(_) => FaultKind::Remote,
        }
    }
}
